//! Router utilities shared by every resource
//!
//! - `GET /health` and `GET /healthz` report liveness
//! - unknown paths answer 404 `ROUTE_NOT_FOUND`
//! - unsupported methods on known paths answer 405 `METHOD_NOT_ALLOWED`
//! - a panic in a handler is rendered as a 500 `INTERNAL_ERROR`

use crate::core::error::{BistroError, RequestError};
use axum::{
    Json, Router,
    http::{Method, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::any::Any;

/// Name reported by the health endpoint
pub const SERVICE_NAME: &str = "bistro-api";

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}

/// Method fallback for resource routes
pub async fn method_not_allowed(method: Method, uri: Uri) -> BistroError {
    RequestError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
    .into()
}

/// Router-wide fallback for paths no resource claims
pub async fn route_not_found(uri: Uri) -> BistroError {
    RequestError::RouteNotFound {
        path: uri.path().to_string(),
    }
    .into()
}

/// Turn a caught handler panic into the standard error body
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    BistroError::Internal(format!("handler panicked: {}", detail)).into_response()
}
