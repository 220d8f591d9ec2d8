//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                - Liveness
//! GET    /health/ready          - Readiness (database ping when configured)
//!
//! # Catalog
//! GET    /api/productos         - List, filtered by ?categoria= and ?busqueda=
//! POST   /api/productos         - Create
//! GET    /api/productos/{id}    - Show (null when unknown)
//! PUT    /api/productos/{id}    - Partial update
//! DELETE /api/productos/{id}    - Remove
//! GET    /api/categorias        - Distinct categories
//!
//! # Users
//! POST   /api/usuarios          - Register
//! GET    /api/usuarios/{email}  - Show (created with defaults on first access)
//! PUT    /api/usuarios/{email}  - Merge update
//!
//! # Orders
//! POST   /api/pedidos           - Place order
//! GET    /api/pedidos/{email}   - Orders of a user
//!
//! # Product board
//! GET    /graphql               - GraphiQL playground
//! POST   /graphql               - Execute query
//!
//! Anything else is served from the static directory.
//! ```

pub mod graphql;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;

use std::time::Duration;

use axum::{
    Router,
    http::{Request, Response},
    middleware,
    routing::get,
};
use tower_http::{
    services::ServeDir,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(users::create))
        .route("/{email}", get(users::show).put(users::update))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(orders::create))
        .route("/{email}", get(orders::index))
}

/// Create all JSON API routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/productos", product_routes())
        .route("/categorias", get(products::categories))
        .nest("/usuarios", user_routes())
        .nest("/pedidos", order_routes())
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
        .route("/graphql", get(graphql::playground).post(graphql::execute))
}

/// Build the complete application: routes, static pages and tracing.
pub fn app(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config().static_dir);

    routes()
        .fallback_service(static_dir)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Method, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::{Catalog, InMemoryCatalog};
    use crate::config::ServerConfig;
    use crate::directory::{Directory, InMemoryDirectory};
    use crate::error::INTERNAL_ERROR_MESSAGE;
    use crate::order_log::{InMemoryOrderLog, OrderLog};

    /// State with empty in-memory stores.
    fn empty_state() -> AppState {
        AppState::from_parts(
            ServerConfig::default(),
            None,
            Catalog::in_memory(InMemoryCatalog::new()),
            Directory::in_memory(InMemoryDirectory::new()),
            OrderLog::in_memory(InMemoryOrderLog::new()),
        )
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = axum::http::Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_create_and_filter_ceviche_mixto() {
        let app = app(empty_state());

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/productos",
            Some(json!({"nombre": "Ceviche Mixto", "precio": 12500, "categoria": "Ceviche"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["stock"], 10);
        assert_eq!(created["descripcion"], "");
        assert_eq!(created["ingredientes"], json!([]));

        let (status, listed) =
            send(&app, Method::GET, "/api/productos?categoria=Ceviche", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([created]));

        let (_, all) = send(
            &app,
            Method::GET,
            "/api/productos?categoria=Categor%C3%ADas",
            None,
        )
        .await;
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let app = app(empty_state());
        send(
            &app,
            Method::POST,
            "/api/productos",
            Some(json!({
                "nombre": "Ceviche Clásico",
                "precio": 11900,
                "categoria": "Ceviche",
                "ingredientes": ["pescado", "limón"],
            })),
        )
        .await;

        let (_, upper) = send(&app, Method::GET, "/api/productos?busqueda=CEVICHE", None).await;
        let (_, lower) = send(&app, Method::GET, "/api/productos?busqueda=ceviche", None).await;
        assert_eq!(upper, lower);
        assert_eq!(upper.as_array().unwrap().len(), 1);

        let (_, lime) = send(
            &app,
            Method::GET,
            "/api/productos?busqueda=LIM%C3%93N",
            None,
        )
        .await;
        assert_eq!(lime.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_product_missing_fields_is_400() {
        let app = app(empty_state());
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/productos",
            Some(json!({"nombre": "Solo nombre"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Faltan campos requeridos: precio, categoria");
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let app = app(empty_state());
        let request = axum::http::Request::post("/api/productos")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{nombre"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_product_update_and_delete() {
        let app = app(empty_state());
        let (_, created) = send(
            &app,
            Method::POST,
            "/api/productos",
            Some(json!({"nombre": "Causa", "precio": 7500, "categoria": "Entradas"})),
        )
        .await;
        let uri = format!("/api/productos/{}", created["id"].as_str().unwrap());

        let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({"stock": 3}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["stock"], 3);
        assert_eq!(updated["nombre"], "Causa");

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, shown) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(shown, Value::Null);

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].is_string());

        let (status, _) = send(&app, Method::PUT, &uri, Some(json!({"stock": 1}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_categories_from_seeded_menu() {
        let app = app(AppState::in_memory(ServerConfig::default()));
        let (status, categories) = send(&app, Method::GET, "/api/categorias", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            categories,
            json!(["Ceviche", "Entradas", "Sopas", "Platos de fondo", "Bebidas", "Postres"])
        );
    }

    #[tokio::test]
    async fn test_user_lifecycle() {
        let app = app(empty_state());

        let (status, profile) = send(&app, Method::GET, "/api/usuarios/new@x.com", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["nombre"], "new");
        assert_eq!(profile["direccion"], "Sin dirección registrada");
        assert_eq!(profile["telefono"], "Sin teléfono registrado");
        assert_eq!(profile["metodoPago"], "Efectivo");

        let (status, updated) = send(
            &app,
            Method::PUT,
            "/api/usuarios/new@x.com",
            Some(json!({"nombre": "A", "telefono": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["nombre"], "A");
        assert_eq!(updated["telefono"], "Sin teléfono registrado");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/usuarios",
            Some(json!({"email": "new@x.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "El usuario new@x.com ya existe");
    }

    #[tokio::test]
    async fn test_user_create_requires_email() {
        let app = app(empty_state());

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/usuarios",
            Some(json!({"nombre": "Sin correo"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/usuarios",
            Some(json!({"email": "rosa@x.com", "metodoPago": "Tarjeta"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["metodoPago"], "Tarjeta");
        assert_eq!(created["nombre"], "rosa");
    }

    #[tokio::test]
    async fn test_keys_without_at_are_read_normally() {
        let app = app(empty_state());

        let (status, profile) = send(&app, Method::GET, "/api/usuarios/juan", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["email"], "juan");
        assert_eq!(profile["nombre"], "juan");

        let (status, orders) = send(&app, Method::GET, "/api/pedidos/juan", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(orders, json!([]));
    }

    #[tokio::test]
    async fn test_order_append_and_list() {
        let app = app(empty_state());

        let (status, order) = send(
            &app,
            Method::POST,
            "/api/pedidos",
            Some(json!({
                "usuarioEmail": "a@b.com",
                "productos": [{"id": "2", "cantidad": 1}],
                "total": 5000,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(order["estado"], "completado");
        assert!(order["id"].as_str().unwrap().starts_with("pedido_"));
        assert!(order["fecha"].is_string());

        let (status, orders) = send(&app, Method::GET, "/api/pedidos/a@b.com", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(orders, json!([order]));

        let (_, other) = send(&app, Method::GET, "/api/pedidos/otro@b.com", None).await;
        assert_eq!(other, json!([]));
    }

    #[tokio::test]
    async fn test_order_without_owner_is_400() {
        let app = app(empty_state());
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/pedidos",
            Some(json!({"total": 5000})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_ne!(body["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_graphql_endpoint() {
        let app = app(empty_state());
        let (status, body) = send(
            &app,
            Method::POST,
            "/graphql",
            Some(json!({
                "query": "mutation { crearProducto(nombre: \"Chicha\", descripcion: \"Morada\", valor: 8) { id nombre } }"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["crearProducto"],
            json!({"id": "1", "nombre": "Chicha"})
        );
    }

    #[tokio::test]
    async fn test_health_in_memory() {
        let app = app(empty_state());
        let response = app
            .clone()
            .oneshot(
                axum::http::Request::get("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                axum::http::Request::get("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
