//! Compact type names

/// Rewrites applied in order; wider patterns must precede the narrower
/// ones they contain ("character varying" before "character").
const TYPE_REWRITES: &[(&str, &str)] = &[
    ("character varying", "varchar"),
    ("character", "char"),
    ("double precision", "double"),
    ("timestamp without time zone", "timestamp"),
    ("timestamp with time zone", "timestampz"),
];

/// Format a PostgreSQL type name in a more compact form
///
/// # Example
/// ```
/// use dbr_core::format_data_type;
/// assert_eq!(format_data_type("character varying(50)"), "varchar(50)");
/// ```
pub fn format_data_type(pg_type: &str) -> String {
    TYPE_REWRITES
        .iter()
        .fold(pg_type.to_string(), |acc, (from, to)| acc.replace(from, to))
}
