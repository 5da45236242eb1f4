//! Interactive inspection loop

use crate::presenter::Presenter;
use anyhow::Result;
use dbr_core::DatabaseConnector;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const PROMPT: &str = "Enter table name (or 'q' to quit application): ";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Empty,
    Describe(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "q" | "exit" | "quit" => Command::Quit,
            "" => Command::Empty,
            name => Command::Describe(name.to_string()),
        }
    }
}

/// Drives a connector for one schema and writes rendered results
pub struct Inspector<'a, C: DatabaseConnector + ?Sized> {
    connector: &'a C,
    presenter: &'a dyn Presenter,
    schema: String,
}

impl<'a, C: DatabaseConnector + ?Sized> Inspector<'a, C> {
    pub fn new(connector: &'a C, presenter: &'a dyn Presenter, schema: impl Into<String>) -> Self {
        Self {
            connector,
            presenter,
            schema: schema.into(),
        }
    }

    /// Print the connection banner and the tables of the schema.
    ///
    /// Failing to list tables is returned to the caller.
    pub async fn start<W: Write>(&self, database: &str, out: &mut W) -> Result<()> {
        write!(out, "{}", self.presenter.render_connected(database, &self.schema))?;

        let tables = self.connector.list_tables(&self.schema).await?;
        tracing::debug!(schema = %self.schema, count = tables.len(), "Listed tables");

        write!(out, "{}", self.presenter.render_table_list(&self.schema, &tables)?)?;
        out.flush()?;
        Ok(())
    }

    /// Describe one table. Lookup failures are reported on `out` and do not
    /// end the session.
    pub async fn describe<W: Write>(&self, table_name: &str, out: &mut W) -> Result<()> {
        match self.connector.describe_table(&self.schema, table_name).await {
            Ok(table) => write!(out, "{}", self.presenter.render_table(&table)?)?,
            Err(e) => {
                tracing::debug!(
                    schema = %self.schema,
                    table = %table_name,
                    error = %e,
                    "Describe failed"
                );
                writeln!(out, "Error fetching table structure: {}", e)?;
            }
        }
        Ok(())
    }

    /// Prompt for table names until the user quits or input ends
    pub async fn run<R, W>(&self, mut input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut buf = Vec::new();

        loop {
            write!(out, "\n{}", PROMPT)?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf).await? == 0 {
                // End of input behaves like quit
                writeln!(out)?;
                writeln!(out, "Closing application.")?;
                break;
            }

            // A line that is not UTF-8 is reported and the prompt repeats
            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    tracing::debug!(error = %e, "Discarding undecodable input line");
                    writeln!(out, "An error occurred reading input: {}", e)?;
                    continue;
                }
            };

            match Command::parse(line) {
                Command::Quit => {
                    writeln!(out, "Closing application.")?;
                    break;
                }
                Command::Empty => continue,
                Command::Describe(name) => self.describe(&name, out).await?,
            }
        }

        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::{JsonPresenter, TextPresenter};
    use dbr_core::{Column, Error, MockDatabaseConnector, Table};

    fn orders_table() -> Table {
        let mut table = Table::new("public", "orders");
        table.columns.push(Column {
            name: "id".to_string(),
            data_type: "bigint".to_string(),
            nullable: false,
            default_value: None,
            is_primary_key: true,
            foreign_key: None,
        });
        table
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(Command::parse("q"), Command::Quit);
        assert_eq!(Command::parse(" exit \n"), Command::Quit);
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(
            Command::parse(" orders\r\n"),
            Command::Describe("orders".to_string())
        );
        // Only exact keywords quit
        assert_eq!(Command::parse("Quit"), Command::Describe("Quit".to_string()));
    }

    #[tokio::test]
    async fn test_start_lists_tables() {
        let mut mock = MockDatabaseConnector::new();
        mock.expect_list_tables()
            .withf(|schema| schema == "sales")
            .times(1)
            .returning(|_| Ok(vec!["invoices".to_string(), "orders".to_string()]));

        let inspector = Inspector::new(&mock, &TextPresenter, "sales");
        let mut out = Vec::new();
        inspector.start("shop", &mut out).await.unwrap();

        assert_eq!(
            output(out),
            "Connected to shop, schema: sales\n\nAvailable tables in sales:\n1. invoices\n2. orders\n"
        );
    }

    #[tokio::test]
    async fn test_start_propagates_list_failure() {
        let mut mock = MockDatabaseConnector::new();
        mock.expect_list_tables()
            .returning(|_| Err(Error::NotConnected));

        let inspector = Inspector::new(&mock, &TextPresenter, "public");
        let mut out = Vec::new();
        assert!(inspector.start("shop", &mut out).await.is_err());
    }

    #[tokio::test]
    async fn test_loop_describes_until_quit() {
        let mut mock = MockDatabaseConnector::new();
        mock.expect_describe_table()
            .withf(|schema, table| schema == "public" && table == "orders")
            .times(1)
            .returning(|_, _| Ok(orders_table()));
        mock.expect_describe_table()
            .withf(|_, table| table == "ghost")
            .times(1)
            .returning(|schema, table| Err(Error::table_not_found(schema, table)));

        let inspector = Inspector::new(&mock, &TextPresenter, "public");
        let input: &[u8] = b"orders\n\nghost\nq\nnever_reached\n";
        let mut out = Vec::new();
        inspector.run(input, &mut out).await.unwrap();

        let text = output(out);
        assert!(text.contains("Table structure 'public.orders':"));
        assert!(text.contains("Error fetching table structure: the table 'public.ghost' does not exist"));
        assert!(text.ends_with("Closing application.\n"));
        assert_eq!(text.matches(PROMPT).count(), 4);
    }

    #[tokio::test]
    async fn test_loop_survives_undecodable_line() {
        let mut mock = MockDatabaseConnector::new();
        mock.expect_describe_table()
            .withf(|_, table| table == "orders")
            .times(1)
            .returning(|_, _| Ok(orders_table()));

        let inspector = Inspector::new(&mock, &TextPresenter, "public");
        let input: &[u8] = b"caf\xe8\norders\nq\n";
        let mut out = Vec::new();
        inspector.run(input, &mut out).await.unwrap();

        let text = output(out);
        assert!(text.contains("An error occurred reading input: "));
        assert!(text.contains("Table structure 'public.orders':"));
        assert!(text.ends_with("Closing application.\n"));
        assert_eq!(text.matches(PROMPT).count(), 3);
    }

    #[tokio::test]
    async fn test_loop_handles_last_line_without_newline() {
        let mut mock = MockDatabaseConnector::new();
        mock.expect_describe_table()
            .times(1)
            .returning(|_, _| Ok(orders_table()));

        let inspector = Inspector::new(&mock, &TextPresenter, "public");
        let input: &[u8] = b"orders";
        let mut out = Vec::new();
        inspector.run(input, &mut out).await.unwrap();

        let text = output(out);
        assert!(text.contains("Table structure 'public.orders':"));
        assert!(text.ends_with("\nClosing application.\n"));
    }

    #[tokio::test]
    async fn test_loop_ends_on_eof() {
        let mock = MockDatabaseConnector::new();
        let inspector = Inspector::new(&mock, &TextPresenter, "public");
        let input: &[u8] = b"";
        let mut out = Vec::new();
        inspector.run(input, &mut out).await.unwrap();

        assert_eq!(output(out), format!("\n{}\nClosing application.\n", PROMPT));
    }

    #[tokio::test]
    async fn test_describe_json() {
        let mut mock = MockDatabaseConnector::new();
        mock.expect_describe_table()
            .returning(|_, _| Ok(orders_table()));

        let inspector = Inspector::new(&mock, &JsonPresenter, "public");
        let mut out = Vec::new();
        inspector.describe("orders", &mut out).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["schema"], "public");
        assert_eq!(value["columns"][0]["data_type"], "bigint");
    }
}
