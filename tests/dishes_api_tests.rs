//! HTTP-level tests for the dish resource

mod common;

use axum::http::{Method, StatusCode};
use common::{body, message, seeded_server, server, taco};
use serde_json::{Value, json};

const MENU: &str = r#"
seed:
  dishes:
    - id: 1
      name: Enchilada
      description: Red sauce
      price: 9
      image_url: enchilada.png
    - id: 2
      name: Tamale
      description: Pork
      price: 4
      image_url: tamale.png
"#;

// =============================================================================
// List / Read
// =============================================================================

#[tokio::test]
async fn test_list_returns_dishes_in_store_order() {
    let server = seeded_server(MENU);

    let response = server.get("/dishes").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Enchilada", "Tamale"]);
}

#[tokio::test]
async fn test_list_empty_store() {
    let server = server();
    let response = server.get("/dishes").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "data": [] }));
}

#[tokio::test]
async fn test_read_is_repeatable() {
    let server = seeded_server(MENU);

    let first: Value = server.get("/dishes/2").await.json();
    let second: Value = server.get("/dishes/2").await.json();

    assert_eq!(first, second);
    assert_eq!(first["data"]["name"], "Tamale");
}

#[tokio::test]
async fn test_read_unknown_dish_is_404() {
    let server = seeded_server(MENU);

    let response = server.get("/dishes/99").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(message(&response), "Dish does not exist: 99");

    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_read_non_numeric_id_is_404() {
    let server = seeded_server(MENU);
    let response = server.get("/dishes/abc").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_then_read_round_trip() {
    let server = server();

    let response = server.post("/dishes").json(&body(taco())).await;
    response.assert_status(StatusCode::CREATED);

    let created: Value = response.json();
    let id = created["data"]["id"].as_u64().expect("integer id");
    assert_eq!(created["data"]["name"], "Taco");
    assert_eq!(created["data"]["price"], 5);

    let read: Value = server.get(&format!("/dishes/{}", id)).await.json();
    assert_eq!(read, created);
}

#[tokio::test]
async fn test_create_assigns_distinct_ids_after_seed() {
    let server = seeded_server(MENU);

    let mut ids = Vec::new();
    for _ in 0..3 {
        let created: Value = server.post("/dishes").json(&body(taco())).await.json();
        ids.push(created["data"]["id"].as_u64().unwrap());
    }

    assert_eq!(ids, vec![3, 4, 5]);
}

#[tokio::test]
async fn test_create_missing_field_names_it() {
    let server = server();

    for field in ["name", "description", "image_url", "price"] {
        let mut data = taco();
        data.as_object_mut().unwrap().remove(field);

        let response = server.post("/dishes").json(&body(data)).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(message(&response), format!("Dish must include a {}", field));
    }

    let list: Value = server.get("/dishes").await.json();
    assert!(list["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_empty_name_is_missing() {
    let server = server();
    let mut data = taco();
    data["name"] = json!("");

    let response = server.post("/dishes").json(&body(data)).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(message(&response), "Dish must include a name");
}

#[tokio::test]
async fn test_create_rejects_bad_prices() {
    let server = server();

    for price in [json!(0), json!(-3), json!(2.5), json!("5")] {
        let mut data = taco();
        data["price"] = price;

        let response = server.post("/dishes").json(&body(data)).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            message(&response),
            "Dish must have a price that is an integer greater than 0"
        );
    }

    let list: Value = server.get("/dishes").await.json();
    assert!(list["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_without_data_wrapper_reports_first_field() {
    let server = server();
    let response = server.post("/dishes").json(&taco()).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(message(&response), "Dish must include a name");
}

#[tokio::test]
async fn test_create_with_empty_body_reports_first_field() {
    let server = server();

    let response = server.post("/dishes").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(message(&response), "Dish must include a name");

    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_accepts_json_without_content_type() {
    let server = server();

    let text = body(taco()).to_string();
    let response = server.post("/dishes").text(text).await;
    response.assert_status(StatusCode::CREATED);

    let created: Value = response.json();
    assert_eq!(created["data"]["name"], "Taco");
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_taco_price_survives_rejected_update() {
    let server = server();

    let created: Value = server.post("/dishes").json(&body(taco())).await.json();
    let id = created["data"]["id"].as_u64().unwrap();
    let path = format!("/dishes/{}", id);

    let mut data = taco();
    data["price"] = json!(-1);
    let response = server.put(&path).json(&body(data)).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let read: Value = server.get(&path).await.json();
    assert_eq!(read["data"]["price"], 5);
}

#[tokio::test]
async fn test_update_replaces_fields_and_keeps_id() {
    let server = seeded_server(MENU);

    let response = server
        .put("/dishes/1")
        .json(&body(json!({
            "id": 1,
            "name": "Enchilada Verde",
            "description": "Green sauce",
            "price": 10,
            "image_url": "verde.png"
        })))
        .await;
    response.assert_status_ok();

    let expected = json!({
        "data": {
            "id": 1,
            "name": "Enchilada Verde",
            "description": "Green sauce",
            "price": 10,
            "image_url": "verde.png"
        }
    });
    response.assert_json(&expected);

    let read: Value = server.get("/dishes/1").await.json();
    assert_eq!(read, expected);
}

#[tokio::test]
async fn test_update_id_mismatch_is_400() {
    let server = seeded_server(MENU);

    let mut data = taco();
    data["id"] = json!(2);
    let response = server.put("/dishes/1").json(&body(data)).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        message(&response),
        "Dish id does not match route id. Dish: 2, Route: 1."
    );

    let read: Value = server.get("/dishes/1").await.json();
    assert_eq!(read["data"]["name"], "Enchilada");
}

#[tokio::test]
async fn test_update_with_empty_body_id_is_accepted() {
    let server = seeded_server(MENU);

    let mut data = taco();
    data["id"] = json!("");
    let response = server.put("/dishes/2").json(&body(data)).await;

    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["data"]["id"], 2);
}

#[tokio::test]
async fn test_update_unknown_dish_is_404_before_validation() {
    let server = seeded_server(MENU);
    let response = server.put("/dishes/42").json(&body(json!({}))).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// Unsupported methods
// =============================================================================

#[tokio::test]
async fn test_dishes_cannot_be_deleted() {
    let server = seeded_server(MENU);

    let response = server.delete("/dishes/1").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(message(&response), "DELETE not allowed for /dishes/1");

    server.get("/dishes/1").await.assert_status_ok();
}

#[tokio::test]
async fn test_patch_collection_is_405() {
    let server = server();
    let response = server.method(Method::PATCH, "/dishes").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
