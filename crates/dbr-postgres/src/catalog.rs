//! Catalog queries
//!
//! Identifier columns are cast to `text`: `information_schema` exposes them
//! as the `sql_identifier` domain and `pg_catalog` as `name`.

/// Base tables of a schema, views excluded. `$1` = schema.
pub(crate) const LIST_TABLES: &str = r#"
    SELECT
        table_name::text AS table_name
    FROM information_schema.tables
    WHERE table_schema = $1
    AND table_type = 'BASE TABLE'
    ORDER BY table_name
"#;

/// `$1` = schema, `$2` = table.
pub(crate) const TABLE_EXISTS: &str = r#"
    SELECT EXISTS (
        SELECT 1
        FROM information_schema.tables
        WHERE table_schema = $1
        AND table_name = $2
    )
"#;

/// One row per visible, non-dropped column in attribute order.
///
/// A column taking part in several foreign keys keeps the reference of the
/// constraint whose name sorts first. `$1` = table, `$2` = schema.
pub(crate) const LIST_COLUMNS: &str = r#"
    SELECT DISTINCT ON (a.attnum)
        a.attname::text AS column_name,
        pg_catalog.format_type(a.atttypid, a.atttypmod) AS data_type,
        NOT a.attnotnull AS is_nullable,
        CASE WHEN a.atthasdef THEN pg_catalog.pg_get_expr(adef.adbin, adef.adrelid) ELSE NULL END AS column_default,
        prim.conname IS NOT NULL AS is_primary_key,
        CASE
            WHEN fk.conname IS NOT NULL AND att2.attname IS NOT NULL THEN
                fk_cl.relname::text || ' (' || att2.attname::text || ')'
            ELSE NULL
        END AS foreign_key_ref
    FROM pg_catalog.pg_attribute a
    LEFT JOIN pg_catalog.pg_attrdef adef
        ON a.attrelid = adef.adrelid AND a.attnum = adef.adnum
    LEFT JOIN pg_catalog.pg_constraint prim
        ON prim.conrelid = a.attrelid AND a.attnum = ANY(prim.conkey) AND prim.contype = 'p'
    LEFT JOIN pg_catalog.pg_constraint fk
        ON fk.conrelid = a.attrelid AND a.attnum = ANY(fk.conkey) AND fk.contype = 'f'
    LEFT JOIN pg_catalog.pg_class fk_cl
        ON fk.confrelid = fk_cl.oid
    LEFT JOIN pg_catalog.pg_attribute att2
        ON fk.confrelid = att2.attrelid
        AND att2.attnum = ANY(fk.confkey)
        AND fk.conkey[array_position(fk.conkey, a.attnum)] = a.attnum
        AND fk.confkey[array_position(fk.conkey, a.attnum)] = att2.attnum
    WHERE a.attrelid = (
            SELECT c.oid
            FROM pg_catalog.pg_class c
            JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
            WHERE c.relname = $1 AND n.nspname = $2
        )
        AND a.attnum > 0
        AND NOT a.attisdropped
    ORDER BY a.attnum, fk.conname
"#;

/// One row per (index, column) on an ordinary table, ordered by index name
/// then attribute number. `$1` = table, `$2` = schema.
pub(crate) const LIST_INDEXES: &str = r#"
    SELECT
        i.relname::text AS index_name,
        a.attname::text AS column_name,
        ix.indisunique AS is_unique,
        ix.indisprimary AS is_primary
    FROM
        pg_catalog.pg_class t,
        pg_catalog.pg_class i,
        pg_catalog.pg_index ix,
        pg_catalog.pg_attribute a,
        pg_catalog.pg_namespace n
    WHERE
        t.oid = ix.indrelid
        AND i.oid = ix.indexrelid
        AND a.attrelid = t.oid
        AND a.attnum = ANY(ix.indkey)
        AND t.relkind = 'r'
        AND t.relname = $1
        AND n.oid = t.relnamespace
        AND n.nspname = $2
    ORDER BY
        i.relname, a.attnum
"#;
