use crate::{ConnectionParams, Result, Table};
use async_trait::async_trait;

/// Capability implemented by catalog readers for a specific engine.
///
/// Implementations own their database handle. Every method takes `&self`
/// so a front end can hold the connector by reference; queries issued
/// through one connector are serialized.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait DatabaseConnector: Send + Sync {
    /// Open a connection and verify it with a liveness probe.
    ///
    /// Any previously open handle is closed first.
    async fn connect(&self, params: &ConnectionParams) -> Result<()>;

    /// Close the connection. Calling this without an open handle succeeds.
    async fn disconnect(&self) -> Result<()>;

    async fn is_connected(&self) -> bool;

    /// Base tables in `schema`, sorted by name
    async fn list_tables(&self, schema: &str) -> Result<Vec<String>>;

    /// Columns and indexes of `schema.table`
    async fn describe_table(&self, schema: &str, table: &str) -> Result<Table>;
}
