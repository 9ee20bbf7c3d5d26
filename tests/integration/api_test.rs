use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use pgscribe::api::configure_routes;
use pgscribe::ServiceOptions;

#[path = "../common/mod.rs"]
mod common;

use common::shop_service;

fn connect_body(port: Value) -> Value {
    json!({
        "host": "localhost",
        "port": port,
        "database": "shop",
        "username": "app",
        "password": "secret"
    })
}

macro_rules! app {
    ($service:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::from($service.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_requests_before_connect_are_rejected() {
    let (service, _) = shop_service(ServiceOptions::default());
    let app = app!(service);

    let req = test::TestRequest::get().uri("/api/tables").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"success": false, "message": "Not connected to a database"}));
}

#[actix_web::test]
async fn test_full_flow() {
    let (service, _) = shop_service(ServiceOptions::default());
    let app = app!(service);

    let req = test::TestRequest::post()
        .uri("/api/connect")
        .set_json(connect_body(json!("5432")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap().contains("app@localhost:5432/shop"));

    let req = test::TestRequest::get().uri("/api/schema").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"success": true, "schema": ["public", "sales"]}));

    let req = test::TestRequest::get().uri("/api/tables?search=bill").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"success": true, "tables": ["orders"]}));

    let req = test::TestRequest::get().uri("/api/tables/accounts/columns").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["columns"][0]["name"], "id");
    assert_eq!(body["columns"][0]["key"], "PRI");
    assert_eq!(body["columns"][1]["type"], "character varying(16)");

    let req = test::TestRequest::get().uri("/api/tables/users/ddl").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["ddl"],
        "CREATE TABLE users (\n  id INTEGER NOT NULL,\n  email VARCHAR(255),\n  PRIMARY KEY (id)\n);"
    );

    let req = test::TestRequest::get().uri("/api/tables/orders/dml?limit=2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["rowCount"], 2);
    assert_eq!(body["dml"].as_str().unwrap().lines().count(), 2);

    let req = test::TestRequest::post().uri("/api/disconnect").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"success": true, "message": "Disconnected"}));
    assert!(!service.session().is_connected());
}

#[actix_web::test]
async fn test_disconnect_without_session_succeeds() {
    let (service, _) = shop_service(ServiceOptions::default());
    let app = app!(service);

    for _ in 0..2 {
        let req = test::TestRequest::post().uri("/api/disconnect").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[actix_web::test]
async fn test_bad_input_is_400() {
    let (service, _) = shop_service(ServiceOptions::default());
    let app = app!(service);

    let req = test::TestRequest::post()
        .uri("/api/connect")
        .set_json(connect_body(json!("abc")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);

    let req = test::TestRequest::post()
        .uri("/api/connect")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());

    let req = test::TestRequest::post()
        .uri("/api/connect")
        .set_json(connect_body(json!(5432)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/tables/orders/dml?limit=-1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_unknown_table_is_404() {
    let (service, _) = shop_service(ServiceOptions::default());
    let app = app!(service);

    let req = test::TestRequest::post()
        .uri("/api/connect")
        .set_json(connect_body(json!(5432)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/tables/ghost/ddl").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("ghost"));
}

#[actix_web::test]
async fn test_refused_connection_is_500() {
    let (service, connector) = shop_service(ServiceOptions::default());
    connector.set_refuse(true);
    let app = app!(service);

    let req = test::TestRequest::post()
        .uri("/api/connect")
        .set_json(connect_body(json!(5432)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(!service.session().is_connected());
}
