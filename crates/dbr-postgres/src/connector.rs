//! PostgreSQL implementation of [`DatabaseConnector`]

use crate::catalog;
use crate::models::{ColumnRow, IndexRow, fold_indexes};
use async_trait::async_trait;
use dbr_core::{Column, ConnectionParams, DatabaseConnector, Error, Result, Table};
use sqlx::Connection;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgSslMode};
use std::time::Duration;
use tokio::sync::Mutex;

/// Catalog reader backed by a single PostgreSQL connection.
///
/// The connection lives behind an async mutex, so queries issued through
/// one connector never interleave.
pub struct PostgresConnector {
    conn: Mutex<Option<PgConnection>>,
    connect_timeout: Option<Duration>,
}

impl Default for PostgresConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl PostgresConnector {
    /// Create a connector with no open connection
    pub fn new() -> Self {
        Self {
            conn: Mutex::new(None),
            connect_timeout: None,
        }
    }

    /// Bound the time spent establishing a connection
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    async fn open(&self, options: &PgConnectOptions) -> Result<PgConnection> {
        let attempt = match self.connect_timeout {
            Some(limit) => tokio::time::timeout(limit, PgConnection::connect_with(options))
                .await
                .map_err(|_| {
                    Error::connection(format!(
                        "timed out after {}s connecting to PostgreSQL",
                        limit.as_secs()
                    ))
                })?,
            None => PgConnection::connect_with(options).await,
        };

        attempt.map_err(|e| Error::connection(format!("Failed to connect to PostgreSQL: {}", e)))
    }
}

/// Build the connection descriptor for `params`. TLS is disabled.
pub fn connect_options(params: &ConnectionParams) -> Result<PgConnectOptions> {
    let mut options = PgConnectOptions::new()
        .host(&params.host)
        .port(params.port_number()?)
        .username(&params.user)
        .database(&params.database)
        .ssl_mode(PgSslMode::Disable);

    if !params.password.is_empty() {
        options = options.password(&params.password);
    }

    Ok(options)
}

/// Sort a sqlx failure into the row-decoding or query bucket
fn catalog_error(context: &str, err: sqlx::Error) -> Error {
    match err {
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::TypeNotFound { .. } => Error::scan(context, err),
        _ => Error::query(context, err),
    }
}

#[async_trait]
impl DatabaseConnector for PostgresConnector {
    async fn connect(&self, params: &ConnectionParams) -> Result<()> {
        params.validate()?;
        let options = connect_options(params)?;

        let mut guard = self.conn.lock().await;
        if let Some(previous) = guard.take() {
            tracing::debug!("Closing previous connection before reconnecting");
            if let Err(e) = previous.close().await {
                tracing::warn!(error = %e, "Failed to close previous connection");
            }
        }

        tracing::warn!(
            host = %params.host,
            database = %params.database,
            "Connecting with TLS disabled (sslmode=disable)"
        );

        let mut conn = self.open(&options).await?;

        if let Err(e) = conn.ping().await {
            if let Err(close_err) = conn.close().await {
                tracing::debug!(error = %close_err, "Failed to close half-open connection");
            }
            return Err(Error::connection(format!(
                "Failed to ping PostgreSQL: {}",
                e
            )));
        }

        tracing::info!(
            host = %params.host,
            database = %params.database,
            "Connected to PostgreSQL"
        );

        *guard = Some(conn);
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        let mut guard = self.conn.lock().await;
        match guard.take() {
            Some(conn) => {
                tracing::debug!("Closing PostgreSQL connection");
                conn.close()
                    .await
                    .map_err(|e| Error::Disconnect(e.to_string()))
            }
            None => Ok(()),
        }
    }

    async fn is_connected(&self) -> bool {
        self.conn.lock().await.is_some()
    }

    async fn list_tables(&self, schema: &str) -> Result<Vec<String>> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or(Error::NotConnected)?;

        tracing::debug!(schema = %schema, "Listing PostgreSQL tables");

        sqlx::query_scalar::<_, String>(catalog::LIST_TABLES)
            .bind(schema)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| catalog_error("fetching tables", e))
    }

    async fn describe_table(&self, schema: &str, table_name: &str) -> Result<Table> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or(Error::NotConnected)?;

        tracing::debug!(
            table = %table_name,
            schema = %schema,
            "Describing PostgreSQL table"
        );

        // An unknown table and a table without visible columns both yield
        // zero column rows, so existence is checked first.
        let exists: bool = sqlx::query_scalar(catalog::TABLE_EXISTS)
            .bind(schema)
            .bind(table_name)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| catalog_error("checking table existence", e))?;

        if !exists {
            return Err(Error::table_not_found(schema, table_name));
        }

        let column_rows: Vec<ColumnRow> = sqlx::query_as(catalog::LIST_COLUMNS)
            .bind(table_name)
            .bind(schema)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| catalog_error("fetching columns", e))?;

        let index_rows: Vec<IndexRow> = sqlx::query_as(catalog::LIST_INDEXES)
            .bind(table_name)
            .bind(schema)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| catalog_error("fetching indexes", e))?;

        let mut table = Table::new(schema, table_name);
        table.columns = column_rows.into_iter().map(Column::from).collect();
        table.indexes = fold_indexes(index_rows);

        tracing::debug!(
            table = %table.qualified_name(),
            columns = table.columns.len(),
            indexes = table.indexes.len(),
            "Described PostgreSQL table"
        );

        Ok(table)
    }
}
