// Relational Engine Boundary
//
// Everything pgscribe needs from the database it inspects: the catalog source
// traits, the raw row shapes they return, runtime-typed row values and the
// PostgreSQL implementation.

pub mod postgres;
pub mod queries;
pub mod result;
pub mod source;

pub use self::postgres::{PgCatalog, PgConnector};
pub use self::result::{DataValue, Row, RowSet};
pub use self::source::{
    CatalogSource, ColumnRow, Connector, Credentials, FetchColumn, FetchRequest, ForeignKeyRow,
    KeyColumnRow, TableFilter,
};
