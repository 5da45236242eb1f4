//! Rendering of table lists and table structures

use anyhow::Result;
use dbr_core::Table;
use serde::Serialize;

const COLUMN_RULE_WIDTH: usize = 115;
const INDEX_RULE_WIDTH: usize = 90;

/// Turns catalog results into displayable text
pub trait Presenter: Send + Sync {
    /// Banner shown once the connection is established
    fn render_connected(&self, database: &str, schema: &str) -> String;

    fn render_table_list(&self, schema: &str, tables: &[String]) -> Result<String>;

    fn render_table(&self, table: &Table) -> Result<String>;
}

/// Fixed-width text tables for terminals
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPresenter;

impl Presenter for TextPresenter {
    fn render_connected(&self, database: &str, schema: &str) -> String {
        format!("Connected to {}, schema: {}\n\n", database, schema)
    }

    fn render_table_list(&self, schema: &str, tables: &[String]) -> Result<String> {
        if tables.is_empty() {
            return Ok(format!("No tables found in schema '{}'.\n", schema));
        }

        let mut out = format!("Available tables in {}:\n", schema);
        for (i, name) in tables.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, name));
        }
        Ok(out)
    }

    fn render_table(&self, table: &Table) -> Result<String> {
        let mut out = format!("\nTable structure '{}':\n\n", table.qualified_name());

        out.push_str("COLUMNS:\n");
        out.push_str(&format!(
            "{:<20} {:<25} {:<10} {:<25} {:<10} {:<25}\n",
            "Name", "Type", "Nullable", "Default", "Primary Key", "Foreign Key"
        ));
        out.push_str(&"-".repeat(COLUMN_RULE_WIDTH));
        out.push('\n');

        for col in &table.columns {
            out.push_str(&format!(
                "{:<20} {:<25} {:<10} {:<25} {:<10} {:<25}\n",
                col.name,
                col.data_type,
                col.nullable,
                col.default_value.as_deref().unwrap_or("NULL"),
                col.is_primary_key,
                col.foreign_key.as_deref().unwrap_or(""),
            ));
        }

        if !table.indexes.is_empty() {
            out.push_str("\nINDEXES:\n");
            out.push_str(&format!(
                "{:<30} {:<40} {:<10} {:<10}\n",
                "Name", "Columns", "Unique", "Primary Key"
            ));
            out.push_str(&"-".repeat(INDEX_RULE_WIDTH));
            out.push('\n');

            for idx in &table.indexes {
                out.push_str(&format!(
                    "{:<30} {:<40} {:<10} {:<10}\n",
                    idx.name,
                    idx.columns.join(", "),
                    idx.unique,
                    idx.primary,
                ));
            }
        }

        Ok(out)
    }
}

/// Pretty-printed JSON, one document per call
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPresenter;

#[derive(Serialize)]
struct TableList<'a> {
    schema: &'a str,
    tables: &'a [String],
}

impl Presenter for JsonPresenter {
    // Keeps stdout a stream of JSON documents
    fn render_connected(&self, _database: &str, _schema: &str) -> String {
        String::new()
    }

    fn render_table_list(&self, schema: &str, tables: &[String]) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&TableList { schema, tables })?;
        out.push('\n');
        Ok(out)
    }

    fn render_table(&self, table: &Table) -> Result<String> {
        let mut out = serde_json::to_string_pretty(table)?;
        out.push('\n');
        Ok(out)
    }
}
