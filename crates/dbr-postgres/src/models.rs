//! Catalog row models and their assembly into the table model

use dbr_core::{Column, Index, format_data_type};
use std::collections::BTreeMap;

/// Row of the column query
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct ColumnRow {
    pub column_name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub column_default: Option<String>,
    pub is_primary_key: bool,
    pub foreign_key_ref: Option<String>,
}

/// Row of the index query: one per (index, column)
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct IndexRow {
    pub index_name: String,
    pub column_name: String,
    pub is_unique: bool,
    pub is_primary: bool,
}

impl From<ColumnRow> for Column {
    fn from(row: ColumnRow) -> Self {
        Column {
            name: row.column_name,
            data_type: format_data_type(&row.data_type),
            nullable: row.is_nullable,
            default_value: row.column_default,
            is_primary_key: row.is_primary_key,
            foreign_key: row.foreign_key_ref.filter(|fk| !fk.is_empty()),
        }
    }
}

/// Merge index rows sharing a name into one [`Index`], appending columns in
/// row order. Flags come from the first row seen for each name. The result
/// is sorted by index name.
pub(crate) fn fold_indexes(rows: impl IntoIterator<Item = IndexRow>) -> Vec<Index> {
    let mut indexes: BTreeMap<String, Index> = BTreeMap::new();

    for row in rows {
        indexes
            .entry(row.index_name)
            .or_insert_with_key(|name| Index {
                name: name.clone(),
                columns: Vec::new(),
                unique: row.is_unique,
                primary: row.is_primary,
            })
            .columns
            .push(row.column_name);
    }

    indexes.into_values().collect()
}
