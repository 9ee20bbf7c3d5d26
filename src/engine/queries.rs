// Catalog Queries
//
// SQL text for every catalog query issued against PostgreSQL. All identifier
// columns are cast to text so they decode as `String` and compare against
// text bind parameters. `$1`/`$2` bind the table name and the scope array.

/// All schemas except the system ones
pub const SCHEMAS: &str = r#"
SELECT schema_name::text AS schema_name
FROM information_schema.schemata
WHERE schema_name NOT IN ('information_schema', 'pg_catalog', 'pg_toast')
  AND schema_name NOT LIKE 'pg\_temp\_%'
  AND schema_name NOT LIKE 'pg\_toast\_temp\_%'
ORDER BY schema_name
"#;

/// Base tables in scope ($1 = scope)
pub const TABLES: &str = r#"
SELECT DISTINCT table_name::text AS table_name
FROM information_schema.tables
WHERE table_schema::text = ANY($1)
  AND table_type = 'BASE TABLE'
ORDER BY table_name
"#;

/// Base tables in scope whose name, column names or column comments match
/// ($1 = scope, $2 = ILIKE pattern)
pub const TABLES_MATCHING: &str = r#"
SELECT DISTINCT t.table_name::text AS table_name
FROM information_schema.tables t
LEFT JOIN information_schema.columns c
  ON t.table_name = c.table_name
  AND t.table_schema = c.table_schema
LEFT JOIN pg_catalog.pg_statio_all_tables st
  ON c.table_schema = st.schemaname
  AND c.table_name = st.relname
LEFT JOIN pg_catalog.pg_description pgd
  ON pgd.objoid = st.relid
  AND pgd.objsubid = c.ordinal_position
WHERE t.table_schema::text = ANY($1)
  AND t.table_type = 'BASE TABLE'
  AND (
    t.table_name::text ILIKE $2
    OR c.column_name::text ILIKE $2
    OR pgd.description ILIKE $2
  )
ORDER BY table_name
"#;

/// Scoped schemas holding a base table of the given name ($1 = table, $2 = scope)
pub const TABLE_SCHEMAS: &str = r#"
SELECT table_schema::text AS table_schema
FROM information_schema.tables
WHERE table_name::text = $1
  AND table_schema::text = ANY($2)
  AND table_type = 'BASE TABLE'
ORDER BY table_schema
"#;

/// Columns of one table with their comments ($1 = table, $2 = scope).
/// Precision is only reported for `numeric`; integer and float types carry
/// an implicit precision that is not part of their declaration.
pub const COLUMNS: &str = r#"
SELECT
  c.table_schema::text AS table_schema,
  c.column_name::text AS column_name,
  CASE c.data_type
    WHEN 'ARRAY' THEN substr(c.udt_name::text, 2) || '[]'
    WHEN 'USER-DEFINED' THEN c.udt_name::text
    ELSE c.data_type::text
  END AS data_type,
  c.udt_name::text AS udt_name,
  c.character_maximum_length::int4 AS character_maximum_length,
  CASE WHEN c.data_type = 'numeric' THEN c.numeric_precision::int4 END AS numeric_precision,
  CASE WHEN c.data_type = 'numeric' THEN c.numeric_scale::int4 END AS numeric_scale,
  c.is_nullable::text AS is_nullable,
  c.column_default::text AS column_default,
  pgd.description::text AS comment,
  c.ordinal_position::int4 AS ordinal_position
FROM information_schema.columns c
LEFT JOIN pg_catalog.pg_statio_all_tables st
  ON c.table_schema = st.schemaname
  AND c.table_name = st.relname
LEFT JOIN pg_catalog.pg_description pgd
  ON pgd.objoid = st.relid
  AND pgd.objsubid = c.ordinal_position
WHERE c.table_name::text = $1
  AND c.table_schema::text = ANY($2)
ORDER BY c.table_schema, c.ordinal_position
"#;

/// Primary key columns in key order ($1 = table, $2 = scope)
pub const PRIMARY_KEY: &str = r#"
SELECT
  tc.table_schema::text AS table_schema,
  tc.constraint_name::text AS constraint_name,
  ku.column_name::text AS column_name
FROM information_schema.table_constraints tc
JOIN information_schema.key_column_usage ku
  ON tc.constraint_name = ku.constraint_name
  AND tc.table_schema = ku.table_schema
  AND tc.table_name = ku.table_name
WHERE tc.constraint_type = 'PRIMARY KEY'
  AND tc.table_name::text = $1
  AND tc.table_schema::text = ANY($2)
ORDER BY tc.table_schema, ku.ordinal_position
"#;

/// Unique constraint columns grouped by constraint ($1 = table, $2 = scope)
pub const UNIQUE_COLUMNS: &str = r#"
SELECT
  tc.table_schema::text AS table_schema,
  tc.constraint_name::text AS constraint_name,
  ku.column_name::text AS column_name
FROM information_schema.table_constraints tc
JOIN information_schema.key_column_usage ku
  ON tc.constraint_name = ku.constraint_name
  AND tc.table_schema = ku.table_schema
  AND tc.table_name = ku.table_name
WHERE tc.constraint_type = 'UNIQUE'
  AND tc.table_name::text = $1
  AND tc.table_schema::text = ANY($2)
ORDER BY tc.table_schema, tc.constraint_name, ku.ordinal_position
"#;

/// Foreign key rows, each referencing column paired with the referenced
/// column at the same key position ($1 = table, $2 = scope)
pub const FOREIGN_KEYS: &str = r#"
SELECT
  ns.nspname::text AS table_schema,
  con.conname::text AS constraint_name,
  att.attname::text AS column_name,
  fcl.relname::text AS foreign_table_name,
  fatt.attname::text AS foreign_column_name
FROM pg_catalog.pg_constraint con
JOIN pg_catalog.pg_class cl ON cl.oid = con.conrelid
JOIN pg_catalog.pg_namespace ns ON ns.oid = cl.relnamespace
JOIN pg_catalog.pg_class fcl ON fcl.oid = con.confrelid
CROSS JOIN LATERAL unnest(con.conkey, con.confkey) WITH ORDINALITY AS k(attnum, fattnum, ord)
JOIN pg_catalog.pg_attribute att
  ON att.attrelid = con.conrelid
  AND att.attnum = k.attnum
JOIN pg_catalog.pg_attribute fatt
  ON fatt.attrelid = con.confrelid
  AND fatt.attnum = k.fattnum
WHERE con.contype = 'f'
  AND cl.relname::text = $1
  AND ns.nspname::text = ANY($2)
ORDER BY ns.nspname, con.conname, k.ord
"#;
