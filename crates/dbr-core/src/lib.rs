//! Core types for dbreader
//!
//! This crate provides the table-structure model, the connector abstraction
//! that catalog readers implement, and the configuration layer shared by the
//! front ends.

pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod traits;

// Re-exports
pub use config::{ConnectionConfig, ReaderConfig};
pub use error::{Error, Result};
pub use format::format_data_type;
pub use model::{Column, ConnectionParams, DEFAULT_PORT, DEFAULT_SCHEMA, Index, Table};
pub use traits::DatabaseConnector;

#[cfg(any(test, feature = "mock"))]
pub use traits::MockDatabaseConnector;
