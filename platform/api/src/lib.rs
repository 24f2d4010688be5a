//! GraphQL wire envelope and the error taxonomy shared by the HR client and any
//! server speaking the same schema.

use std::sync::Arc;

use anyhow::anyhow;
use async_graphql::{Error, ErrorExtensions};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

/// Shared GraphQL result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("internal server error")]
    Internal(Arc<anyhow::Error>),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "NETWORK",
            ApiError::Validation(_) => "VALIDATION",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self::Internal(Arc::new(err))
    }

    /// Classify an error received in a GraphQL response body.
    ///
    /// Errors without a `code` extension are refusals of the request document
    /// itself (argument coercion, unknown fields) and count as validation errors.
    pub fn from_graphql(err: &GraphqlErrorPayload) -> Self {
        match err.code() {
            Some("NOT_FOUND") => ApiError::NotFound(err.message.clone()),
            Some("INTERNAL") => ApiError::internal(anyhow!(err.message.clone())),
            Some("NETWORK") => ApiError::Network(err.message.clone()),
            _ => ApiError::Validation(err.message.clone()),
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> Error {
        let mut err = Error::new(self.to_string());
        err = err.extend_with(|_err, e| {
            e.set("code", self.code());
        });
        if let ApiError::Validation(_) = self {
            err = err.extend_with(|_err, e| {
                e.set("type", "BAD_REQUEST");
            });
        }
        err
    }
}

/// Convert any error into a GraphQL error payload while hiding internals.
pub fn internal_error(err: impl Into<anyhow::Error>) -> Error {
    ApiError::internal(err.into()).extend()
}

/// Body of a GraphQL POST.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    pub variables: Value,
}

impl GraphqlRequest {
    pub fn new(query: impl Into<String>, variables: Value) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            variables,
        }
    }

    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct GraphqlErrorPayload {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<Map<String, Value>>,
}

impl GraphqlErrorPayload {
    pub fn code(&self) -> Option<&str> {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .and_then(Value::as_str)
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorPayload>,
}

/// Decode a raw GraphQL response body into the operation's data type.
///
/// Errors win over data: a response carrying any error is reported through its
/// first error even when partial data came along.
pub fn decode_response<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    let response: GraphqlResponse = serde_json::from_value(body)
        .map_err(|err| ApiError::internal(anyhow!("malformed GraphQL response: {err}")))?;
    if let Some(first) = response.errors.first() {
        if response.errors.len() > 1 {
            warn!(count = response.errors.len(), "response carried several errors; reporting the first");
        }
        return Err(ApiError::from_graphql(first));
    }
    let data = response
        .data
        .filter(|data| !data.is_null())
        .ok_or_else(|| ApiError::internal(anyhow!("response carried neither data nor errors")))?;
    serde_json::from_value(data)
        .map_err(|err| ApiError::internal(anyhow!("unexpected response shape: {err}")))
}
