use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::{Product, ProductPatch};
use tracing::{debug, info};

use crate::errors::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(product): JsonBody<Product>,
) -> (StatusCode, Json<Product>) {
    let created = state.products.put(product).await;
    info!(id = %created.id, "created product");
    (StatusCode::CREATED, Json(created))
}

/// GET /products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    match state.products.get(&id).await {
        Some(p) => Ok(Json(p)),
        None => {
            debug!(%id, "product not found");
            Err(ApiError::NotFound)
        }
    }
}

/// GET /products
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.products.list().await)
}

/// PUT /products/:id
///
/// The body extractor runs before the store is consulted, so a bad body is
/// a 400 even when `id` does not exist.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<Product>,
) -> Result<Json<Product>, ApiError> {
    match state.products.update(&id, ProductPatch::from(input)).await {
        Some(p) => {
            info!(id = %p.id, "updated product");
            Ok(Json(p))
        }
        None => {
            debug!(%id, "product not found");
            Err(ApiError::NotFound)
        }
    }
}

/// DELETE /products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.products.delete(&id).await {
        info!(%id, "deleted product");
        Ok(StatusCode::NO_CONTENT)
    } else {
        debug!(%id, "product not found");
        Err(ApiError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use tower_http::cors::CorsLayer;

    use crate::routes::build_router;

    fn app(state: &AppState) -> Router {
        build_router(state.clone(), CorsLayer::very_permissive())
    }

    fn request(method: Method, uri: &str, body: Option<&str>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(b) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_owned()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(state: &AppState, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app(state).oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    fn json_of(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    async fn create_widget(state: &AppState) {
        let (status, _) = send(
            state,
            request(Method::POST, "/products", Some(r#"{"id":"p1","name":"Widget","price":9.99}"#)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn create_returns_201_with_product() {
        let state = AppState::in_memory();
        let (status, body) = send(
            &state,
            request(Method::POST, "/products", Some(r#"{"id":"p1","name":"Widget","price":9.99}"#)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json_of(&body), json!({"id": "p1", "name": "Widget", "price": 9.99}));
    }

    #[tokio::test]
    async fn get_returns_created_product() {
        let state = AppState::in_memory();
        create_widget(&state).await;
        let (status, body) = send(&state, request(Method::GET, "/products/p1", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body), json!({"id": "p1", "name": "Widget", "price": 9.99}));
    }

    #[tokio::test]
    async fn get_missing_is_404_with_message() {
        let state = AppState::in_memory();
        let (status, body) = send(&state, request(Method::GET, "/products/nope", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json_of(&body), json!({"error": "Product not found"}));
    }

    #[tokio::test]
    async fn list_of_empty_store_is_empty_array() {
        let state = AppState::in_memory();
        let (status, body) = send(&state, request(Method::GET, "/products", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body), json!([]));
    }

    #[tokio::test]
    async fn list_returns_all_products() {
        let state = AppState::in_memory();
        for body in [r#"{"id":"a","name":"A","price":1}"#, r#"{"id":"b","name":"B","price":2}"#] {
            send(&state, request(Method::POST, "/products", Some(body))).await;
        }
        let (status, body) = send(&state, request(Method::GET, "/products", None)).await;
        assert_eq!(status, StatusCode::OK);
        let mut items: Vec<Product> = serde_json::from_slice(&body).unwrap();
        items.sort_by(|x, y| x.id.cmp(&y.id));
        assert_eq!(items, vec![Product::new("a", "A", 1.0), Product::new("b", "B", 2.0)]);
    }

    #[tokio::test]
    async fn malformed_create_is_400_and_stores_nothing() {
        let state = AppState::in_memory();
        let (status, body) = send(&state, request(Method::POST, "/products", Some("not json"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!json_of(&body)["error"].as_str().unwrap().is_empty());
        assert!(state.products.list().await.is_empty());
    }

    #[tokio::test]
    async fn create_without_content_type_still_decodes() {
        let state = AppState::in_memory();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/products")
            .body(Body::from(r#"{"id":"p1","name":"Widget","price":9.99}"#))
            .unwrap();
        let (status, _) = send(&state, req).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(state.products.get("p1").await.is_some());
    }

    #[tokio::test]
    async fn update_merges_and_keeps_id() {
        let state = AppState::in_memory();
        create_widget(&state).await;
        let (status, body) = send(
            &state,
            request(Method::PUT, "/products/p1", Some(r#"{"name":"Gadget","price":19.99}"#)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body), json!({"id": "p1", "name": "Gadget", "price": 19.99}));

        let (_, body) = send(&state, request(Method::GET, "/products/p1", None)).await;
        assert_eq!(json_of(&body), json!({"id": "p1", "name": "Gadget", "price": 19.99}));
    }

    #[tokio::test]
    async fn update_ignores_id_in_body() {
        let state = AppState::in_memory();
        create_widget(&state).await;
        let (status, body) = send(
            &state,
            request(Method::PUT, "/products/p1", Some(r#"{"id":"p2","name":"Gadget","price":1}"#)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["id"], "p1");
        assert!(state.products.get("p2").await.is_none());
    }

    #[tokio::test]
    async fn update_missing_is_404_and_store_unchanged() {
        let state = AppState::in_memory();
        create_widget(&state).await;
        let before = state.products.list().await;
        let (status, body) = send(
            &state,
            request(Method::PUT, "/products/ghost", Some(r#"{"name":"Boo","price":1}"#)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json_of(&body), json!({"error": "Product not found"}));
        assert_eq!(state.products.list().await, before);
    }

    #[tokio::test]
    async fn malformed_update_on_missing_id_is_400() {
        let state = AppState::in_memory();
        let (status, _) = send(&state, request(Method::PUT, "/products/ghost", Some("{"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_update_on_existing_id_is_400_and_store_unchanged() {
        let state = AppState::in_memory();
        create_widget(&state).await;
        let (status, body) = send(
            &state,
            request(Method::PUT, "/products/p1", Some(r#"{"name":"X","price":"x"}"#)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json_of(&body)["error"].as_str().unwrap().contains("invalid type"));
        assert_eq!(state.products.get("p1").await, Some(Product::new("p1", "Widget", 9.99)));
    }

    #[tokio::test]
    async fn delete_then_get_and_delete_again() {
        let state = AppState::in_memory();
        create_widget(&state).await;

        let (status, body) = send(&state, request(Method::DELETE, "/products/p1", None)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (status, _) = send(&state, request(Method::GET, "/products/p1", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&state, request(Method::DELETE, "/products/p1", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json_of(&body), json!({"error": "Product not found"}));
    }

    #[tokio::test]
    async fn health_is_ok() {
        let state = AppState::in_memory();
        create_widget(&state).await;
        let (status, body) = send(&state, request(Method::GET, "/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body), json!({"status": "ok"}));
    }
}
