// DDL Synthesis
//
// Renders `TableMetadata` as a `CREATE TABLE` statement followed by
// `COMMENT ON COLUMN` statements. Output depends only on the input.

use crate::catalog::{ColumnMetadata, ForeignKeyReference, TableMetadata, TypeModifier};
use crate::synth::ident::quote_ident;
use crate::synth::literal::quote_string;

/// How foreign key rows are turned into constraint clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForeignKeyStyle {
    /// One `FOREIGN KEY (col) REFERENCES t(col)` clause per catalog row
    #[default]
    PerColumn,
    /// Consecutive rows of one constraint folded into a single multi-column clause
    Composite,
}

/// Rendering knobs for `render_create_table`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DdlOptions {
    pub foreign_keys: ForeignKeyStyle,
}

/// Long catalog type names with a shorter spelling PostgreSQL accepts
const TYPE_ALIASES: [(&str, &str); 6] = [
    ("character varying", "VARCHAR"),
    ("character", "CHAR"),
    ("bit varying", "VARBIT"),
    ("timestamp without time zone", "TIMESTAMP"),
    ("timestamp with time zone", "TIMESTAMPTZ"),
    ("time without time zone", "TIME"),
];

fn type_keyword(declared_type: &str) -> String {
    TYPE_ALIASES
        .iter()
        .find(|(long, _)| long.eq_ignore_ascii_case(declared_type))
        .map(|(_, short)| short.to_string())
        .unwrap_or_else(|| declared_type.to_uppercase())
}

/// Render a column type, e.g. `VARCHAR(255)` or `NUMERIC(10,2)`
pub fn render_type(column: &ColumnMetadata) -> String {
    let keyword = type_keyword(column.declared_type());
    match column.modifier() {
        Some(TypeModifier::Length(len)) => format!("{}({})", keyword, len),
        // A zero scale is the server default and is left implicit
        Some(TypeModifier::Precision { precision, scale: Some(scale) }) if scale > 0 => {
            format!("{}({},{})", keyword, precision, scale)
        }
        Some(TypeModifier::Precision { precision, .. }) => format!("{}({})", keyword, precision),
        None => keyword,
    }
}

fn render_column(column: &ColumnMetadata) -> String {
    let mut def = format!("  {} {}", quote_ident(column.name()), render_type(column));

    if !column.is_nullable() {
        def.push_str(" NOT NULL");
    }

    if let Some(expr) = column.default_expression() {
        def.push_str(" DEFAULT ");
        def.push_str(expr);
    }

    def
}

fn join_idents<'a>(names: impl IntoIterator<Item = &'a String>) -> String {
    names
        .into_iter()
        .map(|n| quote_ident(n).into_owned())
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_foreign_keys(references: &[ForeignKeyReference], style: ForeignKeyStyle) -> Vec<String> {
    match style {
        ForeignKeyStyle::PerColumn => references
            .iter()
            .map(|fk| {
                format!(
                    "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {}({})",
                    quote_ident(&fk.constraint),
                    quote_ident(&fk.column),
                    quote_ident(&fk.referenced_table),
                    quote_ident(&fk.referenced_column)
                )
            })
            .collect(),
        ForeignKeyStyle::Composite => {
            let mut groups: Vec<Vec<&ForeignKeyReference>> = Vec::new();
            for fk in references {
                match groups.last_mut() {
                    Some(group)
                        if group[0].constraint == fk.constraint
                            && group[0].referenced_table == fk.referenced_table =>
                    {
                        group.push(fk)
                    }
                    _ => groups.push(vec![fk]),
                }
            }

            groups
                .into_iter()
                .map(|group| {
                    format!(
                        "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {}({})",
                        quote_ident(&group[0].constraint),
                        join_idents(group.iter().map(|fk| &fk.column)),
                        quote_ident(&group[0].referenced_table),
                        join_idents(group.iter().map(|fk| &fk.referenced_column))
                    )
                })
                .collect()
        }
    }
}

/// Render the `CREATE TABLE` text for a table, plus one `COMMENT ON COLUMN`
/// line per commented column after a blank line.
pub fn render_create_table(metadata: &TableMetadata, options: &DdlOptions) -> String {
    let table = quote_ident(metadata.table_name());

    let mut body: Vec<String> = metadata.columns().iter().map(render_column).collect();

    if let Some(pk) = metadata.primary_key() {
        body.push(format!("  PRIMARY KEY ({})", join_idents(pk.columns())));
    }

    for unique in metadata.unique_constraints() {
        body.push(format!(
            "  CONSTRAINT {} UNIQUE ({})",
            quote_ident(unique.name()),
            join_idents(unique.columns())
        ));
    }

    for clause in render_foreign_keys(metadata.foreign_keys(), options.foreign_keys) {
        body.push(format!("  {}", clause));
    }

    let mut ddl = format!("CREATE TABLE {} (\n{}\n);", table, body.join(",\n"));

    let comments: Vec<String> = metadata
        .commented_columns()
        .filter_map(|col| {
            col.comment().map(|comment| {
                format!(
                    "COMMENT ON COLUMN {}.{} IS {};",
                    table,
                    quote_ident(col.name()),
                    quote_string(comment)
                )
            })
        })
        .collect();

    if !comments.is_empty() {
        ddl.push_str("\n\n");
        ddl.push_str(&comments.join("\n"));
    }

    ddl
}
