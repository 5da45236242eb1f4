use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Disconnect error: {0}")]
    Disconnect(String),

    #[error("Not connected to a database")]
    NotConnected,

    #[error("the table '{0}' does not exist")]
    TableNotFound(String),

    #[error("an error occurred {context}: {source}")]
    Query {
        context: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("an error occurred decoding rows while {context}: {source}")]
    Scan {
        context: String,
        #[source]
        source: anyhow::Error,
    },
}

impl Error {
    /// Helper for creating connection errors
    ///
    /// # Example
    /// ```
    /// use dbr_core::Error;
    /// let err = Error::connection("connection refused");
    /// ```
    pub fn connection(msg: impl Into<String>) -> Self {
        Error::Connection(msg.into())
    }

    /// Helper for creating the "does not exist" error for `schema.table`
    ///
    /// # Example
    /// ```
    /// use dbr_core::Error;
    /// let err = Error::table_not_found("public", "users");
    /// assert_eq!(err.to_string(), "the table 'public.users' does not exist");
    /// ```
    pub fn table_not_found(schema: &str, table: &str) -> Self {
        Error::TableNotFound(format!("{}.{}", schema, table))
    }

    /// Helper for wrapping a failed catalog query
    pub fn query(context: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Error::Query {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Helper for wrapping a row decoding failure
    pub fn scan(context: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Error::Scan {
            context: context.into(),
            source: source.into(),
        }
    }
}
