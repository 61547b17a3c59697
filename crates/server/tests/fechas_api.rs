use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use configs::AppConfig;

struct TestApp {
    router: Router,
    data_file: std::path::PathBuf,
}

impl TestApp {
    fn new() -> Self {
        let data_file = std::env::temp_dir().join(format!("fechas_api_{}.json", Uuid::new_v4()));
        let mut cfg = AppConfig::default();
        cfg.storage.data_file = data_file.clone();
        Self { router: server::startup::build_app(&cfg), data_file }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&b)?))?,
            None => builder.body(Body::empty())?,
        };
        let resp = self.router.clone().oneshot(req).await?;
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
        Ok((status, value))
    }

    async fn on_disk(&self) -> anyhow::Result<Value> {
        Ok(serde_json::from_slice(&tokio::fs::read(&self.data_file).await?)?)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.data_file);
    }
}

fn sample(nombre: &str) -> Value {
    json!({
        "nombre": nombre,
        "url": "u",
        "fechaInicio": "2024-01-01",
        "fechaCierre": "2024-01-02",
        "plataforma": "X"
    })
}

#[tokio::test]
async fn create_get_delete_scenario() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, created) = app.send("POST", "/fechas", Some(sample("A"))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        created,
        json!({"id": 1, "nombre": "A", "url": "u", "fechaInicio": "2024-01-01", "fechaCierre": "2024-01-02", "plataforma": "X"})
    );

    let (status, fetched) = app.send("GET", "/fechas/1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, body) = app.send("DELETE", "/fechas/1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"mensaje": "Fecha eliminada"}));

    let (status, list) = app.send("GET", "/fechas", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn create_appends_with_max_plus_one() -> anyhow::Result<()> {
    let app = TestApp::new();
    tokio::fs::write(&app.data_file, serde_json::to_vec(&json!({"fechas": [{"id": 4, "nombre": "old"}]}))?).await?;

    let (_, created) = app.send("POST", "/fechas", Some(json!({"id": 1, "nombre": "new"}))).await?;
    assert_eq!(created["id"], 5);

    let (_, list) = app.send("GET", "/fechas", None).await?;
    let ids: Vec<i64> = list.as_array().unwrap().iter().map(|f| f["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![4, 5]);
    assert_eq!(app.on_disk().await?["fechas"][1]["nombre"], "new");
    Ok(())
}

#[tokio::test]
async fn update_merges_fields_and_keeps_id() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.send("POST", "/fechas", Some(sample("A"))).await?;
    app.send("POST", "/fechas", Some(sample("B"))).await?;

    let (status, updated) = app
        .send("PUT", "/fechas/2", Some(json!({"id": 77, "nombre": "B2", "plataforma": "Y"})))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 2);
    assert_eq!(updated["nombre"], "B2");
    assert_eq!(updated["plataforma"], "Y");
    assert_eq!(updated["url"], "u");

    let (_, first) = app.send("GET", "/fechas/1", None).await?;
    assert_eq!(first["nombre"], "A");
    assert_eq!(first["plataforma"], "X");
    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_not_found_and_leave_store_untouched() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.send("POST", "/fechas", Some(sample("A"))).await?;
    let before = app.on_disk().await?;

    for (method, body) in [("GET", None), ("PUT", Some(sample("Z"))), ("DELETE", None)] {
        for uri in ["/fechas/42", "/fechas/abc"] {
            let (status, resp) = app.send(method, uri, body.clone()).await?;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
            assert_eq!(resp, json!({"mensaje": "Fecha no encontrada"}));
        }
    }

    assert_eq!(app.on_disk().await?, before);
    Ok(())
}

#[tokio::test]
async fn put_on_unknown_id_is_not_found_even_without_body() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, resp) = app.send("PUT", "/fechas/42", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp, json!({"mensaje": "Fecha no encontrada"}));
    assert!(tokio::fs::metadata(&app.data_file).await.is_err());

    // a known id with no JSON body keeps the extractor's status
    app.send("POST", "/fechas", Some(sample("A"))).await?;
    let before = app.on_disk().await?;
    let (status, resp) = app.send("PUT", "/fechas/1", None).await?;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(resp["mensaje"].is_string());
    assert_eq!(app.on_disk().await?, before);
    Ok(())
}

#[tokio::test]
async fn path_id_uses_leading_integer() -> anyhow::Result<()> {
    let app = TestApp::new();
    let (_, created) = app.send("POST", "/fechas", Some(sample("A"))).await?;

    let (status, fetched) = app.send("GET", "/fechas/1.0", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, _) = app.send("DELETE", "/fechas/1abc", None).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, list) = app.send("GET", "/fechas", None).await?;
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn list_on_missing_or_malformed_file_is_empty() -> anyhow::Result<()> {
    let app = TestApp::new();
    let (status, list) = app.send("GET", "/fechas", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));

    tokio::fs::write(&app.data_file, b"{oops").await?;
    let (status, list) = app.send("GET", "/fechas", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn non_json_body_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new();
    let req = Request::builder()
        .method("POST")
        .uri("/fechas")
        .header("content-type", "application/json")
        .body(Body::from("not json"))?;
    let resp = app.router.clone().oneshot(req).await?;
    assert!(resp.status().is_client_error());
    assert!(tokio::fs::metadata(&app.data_file).await.is_err());
    Ok(())
}

#[tokio::test]
async fn cors_allows_any_origin() -> anyhow::Result<()> {
    let app = TestApp::new();
    let req = Request::builder()
        .method("GET")
        .uri("/fechas")
        .header("origin", "http://example.com")
        .body(Body::empty())?;
    let resp = app.router.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("access-control-allow-origin"));
    Ok(())
}

#[tokio::test]
async fn health_ok() -> anyhow::Result<()> {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}
