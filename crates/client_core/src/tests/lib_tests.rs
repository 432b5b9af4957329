use super::*;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use shared::error::ErrorCode;
use tokio::{net::TcpListener, sync::Mutex};

const BASE_PATH: &str = "/integrales-market/api/products";

#[derive(Debug, Clone, PartialEq)]
struct RecordedRequest {
    route: String,
    body: Option<Value>,
}

#[derive(Clone, Default)]
struct ServerState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    reject_with: Option<StatusCode>,
}

impl ServerState {
    async fn record(&self, route: impl Into<String>, body: Option<Value>) -> Result<(), StatusCode> {
        self.requests.lock().await.push(RecordedRequest {
            route: route.into(),
            body,
        });
        match self.reject_with {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }

    async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

async fn handle_all(State(state): State<ServerState>) -> Result<Json<Value>, StatusCode> {
    state.record("all", None).await?;
    Ok(Json(json!([
        {"productId": 1, "name": "Pen", "categoryId": "A", "price": "1.50"},
        {"productId": 2, "name": "Ink", "categoryId": 3, "price": 4.25}
    ])))
}

async fn handle_save(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    state.record("save", Some(body.clone())).await?;
    let mut saved = body;
    saved["productId"] = json!(7);
    Ok(Json(saved))
}

async fn handle_update(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> Result<StatusCode, StatusCode> {
    state.record("update", Some(body)).await?;
    Ok(StatusCode::OK)
}

async fn handle_delete(
    State(state): State<ServerState>,
    Path(product_id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    state.record(format!("delete/{product_id}"), None).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_broken_all() -> &'static str {
    "<html>maintenance</html>"
}

async fn spawn_catalog_server(reject_with: Option<StatusCode>) -> (String, ServerState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let state = ServerState {
        requests: Arc::new(Mutex::new(Vec::new())),
        reject_with,
    };
    let app = Router::new()
        .route(&format!("{BASE_PATH}/all"), get(handle_all))
        .route(&format!("{BASE_PATH}/save"), post(handle_save))
        .route(&format!("{BASE_PATH}/update"), put(handle_update))
        .route(&format!("{BASE_PATH}/delete/:id"), delete(handle_delete))
        .route("/broken/all", get(handle_broken_all))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

fn service_for(base: &str, path: &str) -> HttpProductService {
    HttpProductService::new(&ServiceSettings {
        service_url: format!("{base}{path}"),
        request_timeout_secs: Some(5),
    })
    .expect("service")
}

#[test]
fn endpoint_appends_route_segments_below_base_path() {
    let service = service_for("http://localhost:8080", "/integrales-market/api/products/");

    assert_eq!(
        service.endpoint(&ServiceRoute::ListAll).as_str(),
        "http://localhost:8080/integrales-market/api/products/all"
    );
    assert_eq!(
        service
            .endpoint(&ServiceRoute::Delete(ProductId::new("a b")))
            .as_str(),
        "http://localhost:8080/integrales-market/api/products/delete/a%20b"
    );
}

#[test]
fn invalid_base_url_is_a_config_error() {
    let err = HttpProductService::new(&ServiceSettings {
        service_url: "ftp://catalog.example/products".into(),
        request_timeout_secs: None,
    })
    .expect_err("must reject");

    assert_eq!(err.kind(), FailureKind::Config);
}

#[tokio::test]
async fn list_all_keeps_server_order_and_text_fields() {
    let (base, state) = spawn_catalog_server(None).await;
    let service = service_for(&base, BASE_PATH);

    let products = service.list_all().await.expect("list");

    assert_eq!(
        products,
        vec![
            Product::draft("Pen", "A", "1.50").with_id(ProductId::new("1")),
            Product::draft("Ink", "3", "4.25").with_id(ProductId::new("2")),
        ]
    );
    assert_eq!(state.requests().await[0].route, "all");
}

#[tokio::test]
async fn save_posts_draft_without_id_and_returns_assigned_id() {
    let (base, state) = spawn_catalog_server(None).await;
    let service = service_for(&base, BASE_PATH);

    let saved = service
        .save(&Product::draft("Book", "B", "9.99"))
        .await
        .expect("save");

    assert_eq!(saved.product_id, Some(ProductId::new("7")));
    assert_eq!(saved.name, "Book");
    let requests = state.requests().await;
    assert_eq!(
        requests[0].body,
        Some(json!({"name": "Book", "categoryId": "B", "price": "9.99"}))
    );
}

#[tokio::test]
async fn update_puts_every_field_as_text() {
    let (base, state) = spawn_catalog_server(None).await;
    let service = service_for(&base, BASE_PATH);

    service
        .update(&Product::draft("Pen", "A", "cheap").with_id(ProductId::new("1")))
        .await
        .expect("update");

    let requests = state.requests().await;
    assert_eq!(requests[0].route, "update");
    assert_eq!(
        requests[0].body,
        Some(json!({"productId": "1", "name": "Pen", "categoryId": "A", "price": "cheap"}))
    );
}

#[tokio::test]
async fn delete_targets_id_path() {
    let (base, state) = spawn_catalog_server(None).await;
    let service = service_for(&base, BASE_PATH);

    service.delete(&ProductId::new("5")).await.expect("delete");

    assert_eq!(state.requests().await[0].route, "delete/5");
}

#[tokio::test]
async fn non_success_status_is_a_service_failure() {
    let (base, _state) = spawn_catalog_server(Some(StatusCode::INTERNAL_SERVER_ERROR)).await;
    let service = service_for(&base, BASE_PATH);

    let err = service
        .update(&Product::draft("Pen", "A", "1").with_id(ProductId::new("1")))
        .await
        .expect_err("must fail");

    assert_eq!(err.kind(), FailureKind::Service);
    assert_eq!(err.status(), Some(500));
    assert!(matches!(
        err,
        CatalogError::Service {
            route: "update",
            code: ErrorCode::Internal,
            ..
        }
    ));
}

#[tokio::test]
async fn unparseable_body_is_a_decode_failure() {
    let (base, _state) = spawn_catalog_server(None).await;
    let service = service_for(&base, "/broken");

    let err = service.list_all().await.expect_err("must fail");

    assert_eq!(err.kind(), FailureKind::Decode);
}

#[tokio::test]
async fn unreachable_service_is_a_transport_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    let service = service_for(&format!("http://{addr}"), BASE_PATH);

    let err = service.list_all().await.expect_err("must fail");

    assert_eq!(err.kind(), FailureKind::Transport);
}
