//! Request and response bodies for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::common::{SchemaName, ScribeError, ScribeResult, TableName};
use crate::engine::source::Credentials;
use crate::introspect::ColumnSummary;

/// Uniform response envelope.
///
/// The payload's fields are flattened next to `success`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(payload: T) -> Self {
        ApiResponse {
            success: true,
            message: None,
            payload: Some(payload),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            message: Some(message.into()),
            payload: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            message: Some(message.into()),
            payload: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaPayload {
    pub schema: Vec<SchemaName>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TablesPayload {
    pub tables: Vec<TableName>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnsPayload {
    pub columns: Vec<ColumnSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DdlPayload {
    pub ddl: String,
}

/// Browser clients send the port either as a number or as a string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Number(i64),
    Text(String),
}

impl PortValue {
    pub fn resolve(&self) -> ScribeResult<u16> {
        let port = match self {
            PortValue::Number(n) => *n,
            PortValue::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| ScribeError::InvalidRequest(format!("invalid port: {}", s)))?,
        };
        match u16::try_from(port) {
            Ok(p) if p > 0 => Ok(p),
            _ => Err(ScribeError::InvalidRequest(format!("port out of range: {}", port))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectRequest {
    pub host: String,
    pub port: PortValue,
    pub database: String,
    #[serde(alias = "user")]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl ConnectRequest {
    pub fn into_credentials(self) -> ScribeResult<Credentials> {
        let port = self.port.resolve()?;
        Ok(Credentials {
            host: self.host,
            port,
            database: self.database,
            username: self.username,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableSearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DmlQuery {
    pub limit: Option<u32>,
}
