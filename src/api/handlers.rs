//! Request handlers.
//!
//! Each handler forwards to `SchemaService` and wraps the outcome in the
//! response envelope. Failures are logged here and mapped to a status code.

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use log::{error, warn};
use serde::Serialize;

use crate::api::models::{
    ApiResponse, ColumnsPayload, ConnectRequest, DdlPayload, DmlQuery, SchemaPayload, TableSearchQuery,
    TablesPayload,
};
use crate::common::ScribeError;
use crate::service::SchemaService;

/// HTTP status for a failed operation
pub fn status_for(err: &ScribeError) -> StatusCode {
    match err {
        ScribeError::NotConnected | ScribeError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        ScribeError::TableNotFound { .. } => StatusCode::NOT_FOUND,
        ScribeError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        ScribeError::Connection(_) | ScribeError::MetadataQuery(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn failure(operation: &str, err: ScribeError) -> HttpResponse {
    if err.is_client_error() {
        warn!("{} rejected: {}", operation, err);
    } else {
        error!("{} failed: {}", operation, err);
    }
    HttpResponse::build(status_for(&err)).json(ApiResponse::<()>::failure(err.to_string()))
}

fn respond<T: Serialize>(operation: &str, result: Result<T, ScribeError>) -> HttpResponse {
    match result {
        Ok(payload) => HttpResponse::Ok().json(ApiResponse::ok(payload)),
        Err(err) => failure(operation, err),
    }
}

/// POST /api/connect
pub async fn connect(service: web::Data<SchemaService>, body: web::Json<ConnectRequest>) -> HttpResponse {
    let credentials = match body.into_inner().into_credentials() {
        Ok(credentials) => credentials,
        Err(err) => return failure("connect", err),
    };
    match service.connect(&credentials).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::message(format!(
            "Connected to {}",
            credentials.describe()
        ))),
        Err(err) => failure("connect", err),
    }
}

/// POST /api/disconnect
pub async fn disconnect(service: web::Data<SchemaService>) -> HttpResponse {
    service.disconnect().await;
    HttpResponse::Ok().json(ApiResponse::<()>::message("Disconnected"))
}

/// GET /api/schema
pub async fn schema(service: web::Data<SchemaService>) -> HttpResponse {
    let result = service
        .resolve_schemas()
        .await
        .map(|schema| SchemaPayload { schema });
    respond("resolve schemas", result)
}

/// GET /api/tables?search=
pub async fn tables(service: web::Data<SchemaService>, query: web::Query<TableSearchQuery>) -> HttpResponse {
    let result = service
        .list_tables(query.search.as_deref())
        .await
        .map(|tables| TablesPayload { tables });
    respond("list tables", result)
}

/// GET /api/tables/{name}/columns
pub async fn columns(service: web::Data<SchemaService>, name: web::Path<String>) -> HttpResponse {
    let result = service
        .columns(&name)
        .await
        .map(|columns| ColumnsPayload { columns });
    respond("columns", result)
}

/// GET /api/tables/{name}/ddl
pub async fn ddl(service: web::Data<SchemaService>, name: web::Path<String>) -> HttpResponse {
    let result = service.ddl(&name).await.map(|ddl| DdlPayload { ddl });
    respond("ddl", result)
}

/// GET /api/tables/{name}/dml?limit=
pub async fn dml(
    service: web::Data<SchemaService>,
    name: web::Path<String>,
    query: web::Query<DmlQuery>,
) -> HttpResponse {
    let result = service.dml(&name, query.limit).await;
    respond("dml", result)
}
