// SQL Text Synthesis
//
// Pure renderers that turn table metadata and fetched rows into SQL text.
// Nothing here touches the database.

pub mod ddl;
pub mod dml;
pub mod ident;
pub mod literal;

pub use self::ddl::{render_create_table, render_type, DdlOptions, ForeignKeyStyle};
pub use self::dml::{render_insert, render_inserts};
pub use self::ident::{quote_ident, quote_qualified};
pub use self::literal::{quote_string, sql_literal};
