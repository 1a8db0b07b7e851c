//! Shared helpers for HTTP-level tests

#![allow(dead_code)]

use axum_test::TestServer;
use bistro::prelude::*;
use serde_json::{Value, json};

/// A server over empty stores
pub fn server() -> TestServer {
    server_with(ServerBuilder::new())
}

/// A server over the given builder's stores
pub fn server_with(builder: ServerBuilder) -> TestServer {
    let app = builder.build().expect("router should build");
    TestServer::try_new(app).expect("Failed to create test server")
}

/// A server seeded from YAML
pub fn seeded_server(yaml: &str) -> TestServer {
    let config = ServiceConfig::from_yaml_str(yaml).expect("seed yaml should parse");
    server_with(
        ServerBuilder::new()
            .with_config(&config)
            .expect("seed data should be valid"),
    )
}

/// Wrap a payload the way clients send it
pub fn body(data: Value) -> Value {
    json!({ "data": data })
}

pub fn taco() -> Value {
    json!({
        "name": "Taco",
        "description": "Corn tortilla with carnitas",
        "price": 5,
        "image_url": "https://example.com/taco.png"
    })
}

pub fn order_for(deliver_to: &str) -> Value {
    json!({
        "deliverTo": deliver_to,
        "mobileNumber": "(505) 143-3369",
        "dishes": [
            { "id": 1, "name": "Taco", "price": 5, "quantity": 2 }
        ]
    })
}

/// Message of an error response body
pub fn message(response: &axum_test::TestResponse) -> String {
    let body: Value = response.json();
    body["message"].as_str().unwrap_or_default().to_string()
}
