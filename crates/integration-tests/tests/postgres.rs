//! End-to-end tests against `PostgreSQL`.
//!
//! These need `TEST_DATABASE_URL` pointing at a scratch database; every
//! table is truncated. Run with `--include-ignored`.

use reqwest::StatusCode;
use serde_json::{Value, json};

use cevicheria_integration_tests::{TestServer, scratch_database};

async fn post(server: &TestServer, path: &str, body: &Value) -> Value {
    let resp = server
        .client
        .post(server.url(path))
        .json(body)
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED, "POST {path}");
    resp.json().await.expect("invalid JSON")
}

async fn get(server: &TestServer, path: &str) -> Value {
    server
        .client
        .get(server.url(path))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("invalid JSON")
}

// Scenarios share one database, so they run in sequence inside one test.
#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_postgres_backend_matches_in_memory_behavior() {
    let server = TestServer::postgres(scratch_database().await).await;

    // Catalog
    let created = post(
        &server,
        "/api/productos",
        &json!({
            "nombre": "Ceviche Mixto",
            "precio": 12500,
            "categoria": "Ceviche",
            "ingredientes": ["Pescado", "LIMÓN"],
        }),
    )
    .await;
    assert_eq!(created["id"], "1");
    assert_eq!(created["stock"], 10);
    post(
        &server,
        "/api/productos",
        &json!({"nombre": "Parihuela", "precio": 14500, "categoria": "Sopas"}),
    )
    .await;

    assert_eq!(get(&server, "/api/productos?categoria=Ceviche").await, json!([created]));
    assert_eq!(
        get(&server, "/api/productos?busqueda=lim%C3%B3n").await,
        json!([created])
    );
    assert_eq!(
        get(&server, "/api/productos?busqueda=CEVICHE").await,
        get(&server, "/api/productos?busqueda=ceviche").await
    );
    assert_eq!(get(&server, "/api/categorias").await, json!(["Ceviche", "Sopas"]));

    let resp = server
        .client
        .put(server.url("/api/productos/1"))
        .json(&json!({"stock": 4}))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(get(&server, "/api/productos/1").await["stock"], 4);

    // Directory
    let profile = get(&server, "/api/usuarios/new@x.com").await;
    assert_eq!(profile["nombre"], "new");
    assert_eq!(get(&server, "/api/usuarios/new@x.com").await, profile);

    // Orders, newest first
    let first = post(
        &server,
        "/api/pedidos",
        &json!({"usuarioEmail": "new@x.com", "productos": [], "total": 100}),
    )
    .await;
    let second = post(
        &server,
        "/api/pedidos",
        &json!({"usuarioEmail": "new@x.com", "productos": [{"id": "1"}], "total": 200}),
    )
    .await;
    assert_eq!(get(&server, "/api/pedidos/new@x.com").await, json!([second, first]));

    let ready = server
        .client
        .get(server.url("/health/ready"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(ready.status(), StatusCode::OK);
}
