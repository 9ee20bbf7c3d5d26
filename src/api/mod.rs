//! HTTP JSON API
//!
//! Every response uses the `{success, message?, ...payload}` envelope.

pub mod handlers;
pub mod models;
pub mod routes;

pub use self::routes::configure_routes;
