//! PostgreSQL catalog reader for dbreader
//!
//! Reads table, column, constraint and index metadata from the PostgreSQL
//! system catalogs and assembles it into the [`dbr_core::Table`] model.

mod catalog;
mod connector;
mod models;

pub use connector::{PostgresConnector, connect_options};
