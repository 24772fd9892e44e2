//! Shared helpers for integration tests.
//!
//! Tests exercise the real application router (same middleware stack as
//! production) against a stub backend served from an ephemeral local
//! port. The stub implements just enough of the backend API -- login,
//! current user, spots, spot images, export -- with in-memory state that
//! individual tests seed and inspect.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

use goshuin_core::pagination::Paginated;
use goshuin_core::spot::{Spot, SpotImage, SpotImageType, SpotType};
use goshuin_core::EntityId;
use goshuin_upstream::BackendClient;
use goshuin_web::config::ServerConfig;
use goshuin_web::router::build_app_router;
use goshuin_web::state::AppState;

/// Token the stub backend accepts.
pub const TEST_TOKEN: &str = "stub-token";

/// Credentials the stub backend's login endpoint accepts.
pub const TEST_USERNAME: &str = "pilgrim";
pub const TEST_PASSWORD: &str = "kongozue";

/// Fixed id of the stub's only user.
pub fn test_user_id() -> EntityId {
    Uuid::from_u128(0x5106)
}

// ---------------------------------------------------------------------------
// Stub backend
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct StubData {
    pub spots: Vec<Spot>,
    pub spot_images: HashMap<EntityId, Vec<SpotImage>>,
    /// When set, the reorder endpoint rejects every request with a 400.
    pub fail_reorders: bool,
}

/// Shared, mutable state of the stub backend.
#[derive(Clone, Default)]
pub struct StubState {
    inner: Arc<Mutex<StubData>>,
}

impl StubState {
    pub async fn data(&self) -> tokio::sync::MutexGuard<'_, StubData> {
        self.inner.lock().await
    }

    /// Seed a spot and return it.
    pub async fn seed_spot(&self, name: &str, prefecture: &str, spot_type: SpotType) -> Spot {
        let now = Utc::now();
        let spot = Spot {
            id: Uuid::new_v4(),
            user_id: test_user_id(),
            slug: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            spot_type,
            prefecture: prefecture.to_string(),
            city: None,
            address: None,
            latitude: None,
            longitude: None,
            description: None,
            website_url: None,
            phone_number: None,
            created_at: now,
            updated_at: now,
        };
        self.data().await.spots.push(spot.clone());
        spot
    }

    /// Seed `count` images for a spot, the first one primary.
    pub async fn seed_spot_images(&self, spot_id: EntityId, count: i32) -> Vec<SpotImage> {
        let images: Vec<SpotImage> = (0..count)
            .map(|order| SpotImage {
                id: Uuid::new_v4(),
                image_url: format!("uploads/spots/{spot_id}/{order}.jpg"),
                image_type: SpotImageType::Exterior,
                is_primary: order == 0,
                display_order: order,
            })
            .collect();
        self.data()
            .await
            .spot_images
            .insert(spot_id, images.clone());
        images
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Unauthorized" })),
    )
        .into_response()
}

fn check_bearer(headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {TEST_TOKEN}");
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(unauthorized()),
    }
}

#[derive(Deserialize)]
struct StubLoginForm {
    username: String,
    password: String,
}

async fn stub_login(Form(form): Form<StubLoginForm>) -> Response {
    if form.username == TEST_USERNAME && form.password == TEST_PASSWORD {
        Json(json!({ "access_token": TEST_TOKEN, "token_type": "bearer" })).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "LOGIN_BAD_CREDENTIALS" })),
        )
            .into_response()
    }
}

async fn stub_me(headers: HeaderMap) -> Response {
    if let Err(response) = check_bearer(&headers) {
        return response;
    }
    Json(json!({
        "id": test_user_id(),
        "email": "pilgrim@example.com",
        "is_active": true,
        "is_superuser": false,
        "is_verified": true,
    }))
    .into_response()
}

#[derive(Debug, Deserialize)]
struct StubListParams {
    page: Option<i64>,
    size: Option<i64>,
    prefecture: Option<String>,
    category: Option<String>,
    keyword: Option<String>,
}

async fn stub_list_spots(
    State(stub): State<StubState>,
    headers: HeaderMap,
    Query(params): Query<StubListParams>,
) -> Response {
    if let Err(response) = check_bearer(&headers) {
        return response;
    }

    let data = stub.data().await;
    let filtered: Vec<&Spot> = data
        .spots
        .iter()
        .filter(|spot| {
            params
                .prefecture
                .as_deref()
                .is_none_or(|p| spot.prefecture == p)
        })
        .filter(|spot| {
            params
                .category
                .as_deref()
                .is_none_or(|c| spot.spot_type.as_str() == c)
        })
        .filter(|spot| {
            params
                .keyword
                .as_deref()
                .is_none_or(|k| spot.name.contains(k))
        })
        .collect();

    let page = params.page.unwrap_or(1).max(1);
    let size = params.size.unwrap_or(12).max(1);
    let start = ((page - 1) * size) as usize;
    let items: Vec<Spot> = filtered
        .iter()
        .skip(start)
        .take(size as usize)
        .map(|spot| (*spot).clone())
        .collect();

    Json(Paginated {
        items,
        total: filtered.len() as i64,
        page,
        size,
    })
    .into_response()
}

async fn stub_list_images(
    State(stub): State<StubState>,
    headers: HeaderMap,
    Path(spot_id): Path<EntityId>,
) -> Response {
    if let Err(response) = check_bearer(&headers) {
        return response;
    }
    let data = stub.data().await;
    let mut images = data.spot_images.get(&spot_id).cloned().unwrap_or_default();
    images.sort_by_key(|image| image.display_order);
    Json(images).into_response()
}

#[derive(Deserialize)]
struct StubReorderRequest {
    image_ids: Vec<EntityId>,
}

async fn stub_reorder_images(
    State(stub): State<StubState>,
    headers: HeaderMap,
    Path(spot_id): Path<EntityId>,
    Json(input): Json<StubReorderRequest>,
) -> Response {
    if let Err(response) = check_bearer(&headers) {
        return response;
    }

    let mut data = stub.data().await;
    if data.fail_reorders {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Reorder rejected" })),
        )
            .into_response();
    }

    let Some(images) = data.spot_images.get_mut(&spot_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Spot not found" })),
        )
            .into_response();
    };

    let mut reordered = Vec::with_capacity(images.len());
    for (index, id) in input.image_ids.iter().enumerate() {
        let Some(mut image) = images.iter().find(|image| image.id == *id).cloned() else {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": "Provided image IDs do not match spot images" })),
            )
                .into_response();
        };
        image.display_order = index as i32;
        reordered.push(image);
    }
    *images = reordered.clone();

    Json(reordered).into_response()
}

#[derive(Deserialize)]
struct StubImageUpdate {
    image_url: Option<String>,
    image_type: Option<SpotImageType>,
    is_primary: Option<bool>,
}

async fn stub_update_image(
    State(stub): State<StubState>,
    headers: HeaderMap,
    Path((spot_id, image_id)): Path<(EntityId, EntityId)>,
    Json(input): Json<StubImageUpdate>,
) -> Response {
    if let Err(response) = check_bearer(&headers) {
        return response;
    }

    let mut data = stub.data().await;
    let Some(images) = data.spot_images.get_mut(&spot_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Spot not found" })),
        )
            .into_response();
    };

    if input.is_primary == Some(true) {
        for image in images.iter_mut() {
            image.is_primary = false;
        }
    }

    let Some(image) = images.iter_mut().find(|image| image.id == image_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Spot image not found" })),
        )
            .into_response();
    };

    if let Some(url) = input.image_url {
        image.image_url = url;
    }
    if let Some(image_type) = input.image_type {
        image.image_type = image_type;
    }
    if let Some(primary) = input.is_primary {
        image.is_primary = primary;
    }

    Json(image.clone()).into_response()
}

async fn stub_delete_image(
    State(stub): State<StubState>,
    headers: HeaderMap,
    Path((spot_id, image_id)): Path<(EntityId, EntityId)>,
) -> Response {
    if let Err(response) = check_bearer(&headers) {
        return response;
    }

    let mut data = stub.data().await;
    let Some(images) = data.spot_images.get_mut(&spot_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Spot not found" })),
        )
            .into_response();
    };

    let before = images.len();
    images.retain(|image| image.id != image_id);
    if images.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Spot image not found" })),
        )
            .into_response();
    }
    for (index, image) in images.iter_mut().enumerate() {
        image.display_order = index as i32;
    }

    StatusCode::NO_CONTENT.into_response()
}

/// Fixed CSV body served by the stub's export endpoint.
pub const STUB_CSV_EXPORT: &str = "id,spot_name,visit_date\n1,Fushimi Inari,2026-08-01\n";

async fn stub_export_csv(headers: HeaderMap) -> Response {
    if let Err(response) = check_bearer(&headers) {
        return response;
    }
    ([(CONTENT_TYPE, "text/csv")], STUB_CSV_EXPORT).into_response()
}

fn stub_router(state: StubState) -> Router {
    Router::new()
        .route("/auth/jwt/login", post(stub_login))
        .route("/users/me", get(stub_me))
        .route("/api/spots/", get(stub_list_spots))
        .route("/api/spots/{spot_id}/images", get(stub_list_images))
        .route(
            "/api/spots/{spot_id}/images/reorder",
            post(stub_reorder_images),
        )
        .route(
            "/api/spots/{spot_id}/images/{image_id}",
            axum::routing::patch(stub_update_image).delete(stub_delete_image),
        )
        .route("/api/export/csv", get(stub_export_csv))
        .with_state(state)
}

/// Start the stub backend on an ephemeral port. Returns its base URL and
/// the shared state handle for seeding and inspection.
pub async fn spawn_stub_backend() -> (String, StubState) {
    let state = StubState::default();
    let router = stub_router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub backend");
    let addr = listener.local_addr().expect("Stub backend has no address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Stub backend crashed");
    });

    (format!("http://{addr}"), state)
}

// ---------------------------------------------------------------------------
// Application under test
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` pointing at the given backend URL.
pub fn test_config(api_base_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        api_base_url: api_base_url.to_string(),
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, wired to
/// the stub backend at `api_base_url`.
///
/// This uses the same `build_app_router` as `main.rs`, so integration
/// tests exercise the production middleware stack.
pub fn build_test_app(api_base_url: &str) -> Router {
    let config = test_config(api_base_url);
    let backend = BackendClient::new(api_base_url);
    let state = AppState::new(backend, config.clone());
    build_app_router(state, &config)
}

/// Spawn a stub backend and build an app wired to it in one step.
pub async fn test_app() -> (Router, StubState) {
    let (base_url, stub) = spawn_stub_backend().await;
    (build_test_app(&base_url), stub)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a request through the app router. `token`, when set, is sent as
/// the `accessToken` cookie the way the browser would.
pub async fn request(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("accessToken={token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    app.oneshot(request).await.expect("Request failed")
}

pub async fn get_public(app: Router, path: &str) -> Response {
    request(app, Method::GET, path, None, None).await
}

pub async fn get_authed(app: Router, path: &str) -> Response {
    request(app, Method::GET, path, Some(TEST_TOKEN), None).await
}

pub async fn post_authed(app: Router, path: &str, body: Value) -> Response {
    request(app, Method::POST, path, Some(TEST_TOKEN), Some(body)).await
}

pub async fn patch_authed(app: Router, path: &str, body: Value) -> Response {
    request(app, Method::PATCH, path, Some(TEST_TOKEN), Some(body)).await
}

pub async fn delete_authed(app: Router, path: &str) -> Response {
    request(app, Method::DELETE, path, Some(TEST_TOKEN), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body is not valid JSON")
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    http_body_util::BodyExt::collect(response.into_body())
        .await
        .expect("Failed to read body")
        .to_bytes()
        .to_vec()
}
