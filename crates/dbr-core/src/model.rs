//! Table-structure model produced by catalog readers

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Port used when none is configured
pub const DEFAULT_PORT: u16 = 5432;

/// Schema inspected when none is given
pub const DEFAULT_SCHEMA: &str = "public";

/// Parameters needed to open a database connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionParams {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub schema: String,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT.to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            database: String::new(),
            schema: DEFAULT_SCHEMA.to_string(),
        }
    }
}

impl ConnectionParams {
    /// Create parameters for the given database, other fields defaulted
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Default::default()
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Check the parameters are usable for a connection attempt.
    ///
    /// The database name is the only required field.
    pub fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(Error::connection("database name is required"));
        }
        self.port_number()?;
        Ok(())
    }

    /// Numeric port; an empty string means [`DEFAULT_PORT`]
    pub fn port_number(&self) -> Result<u16> {
        let port = self.port.trim();
        if port.is_empty() {
            return Ok(DEFAULT_PORT);
        }
        port.parse::<u16>()
            .map_err(|_| Error::connection(format!("invalid port '{}'", self.port)))
    }
}

/// A single table column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    /// Default expression, present only when the catalog reports one
    pub default_value: Option<String>,
    pub is_primary_key: bool,
    /// Referenced column, formatted as `"<table> (<column>)"`
    pub foreign_key: Option<String>,
}

/// An index over one or more columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub columns: Vec<String>,
    pub unique: bool,
    pub primary: bool,
}

/// Structure of a table: columns in declared order, indexes sorted by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub schema: String,
    pub columns: Vec<Column>,
    pub indexes: Vec<Index>,
}

impl Table {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: schema.into(),
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// `schema.name`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}
