use std::net::SocketAddr;

use configs::{AppConfig, StorageBackend};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
}

/// Serve the real startup wiring on an ephemeral port. Uses the in-memory
/// store unless `E2E_DATABASE=1` and `DATABASE_URL` are both set.
async fn start_server() -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    match std::env::var("DATABASE_URL") {
        Ok(url) if std::env::var("E2E_DATABASE").is_ok() => {
            cfg.database.url = url;
            cfg.database.min_connections = 1;
        }
        _ => cfg.storage.backend = StorageBackend::Memory,
    }

    let app = server::startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_message_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/messages", app.base_url))
        .json(&json!({"author": "Jose", "content": "hello"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["likeCount"], 0);

    let res = c.put(format!("{}/messages/{}", app.base_url, id))
        .json(&json!({"id": id, "author": "Jose", "content": "world"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::ACCEPTED);
    assert_eq!(res.json::<Value>().await?["content"], "world");

    let res = c.get(format!("{}/messages?size=100", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let page = res.json::<Value>().await?;
    let listed = page["content"].as_array().cloned().unwrap_or_default();
    assert!(listed.iter().any(|m| m["id"] == id.as_str()));

    let res = c.delete(format!("{}/messages/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "message removed");

    let res = c.get(format!("{}/messages/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_xml_payload_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new()
        .post(format!("{}/messages", app.base_url))
        .header("content-type", "application/json")
        .body("<mensagem><usuario>Ana</usuario><conteudo>oi</conteudo></mensagem>")
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["path"], "/messages");
    Ok(())
}
