//! Route table.

use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};

use crate::api::handlers;
use crate::api::models::ApiResponse;

fn bad_request<E: std::fmt::Display + std::fmt::Debug + 'static>(err: E) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::<()>::failure(err.to_string()));
    InternalError::from_response(err, response).into()
}

/// Register the `/api` routes.
///
/// Malformed JSON bodies, query strings and paths are answered with the
/// failure envelope and status 400.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| bad_request(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| bad_request(err)))
        .app_data(web::PathConfig::default().error_handler(|err, _req| bad_request(err)))
        .service(
            web::scope("/api")
                .route("/connect", web::post().to(handlers::connect))
                .route("/disconnect", web::post().to(handlers::disconnect))
                .route("/schema", web::get().to(handlers::schema))
                .route("/tables", web::get().to(handlers::tables))
                .route("/tables/{name}/columns", web::get().to(handlers::columns))
                .route("/tables/{name}/ddl", web::get().to(handlers::ddl))
                .route("/tables/{name}/dml", web::get().to(handlers::dml)),
        );
}
