use std::net::SocketAddr;
use std::path::PathBuf;

use configs::{AppConfig, ContactsBackend};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use server::startup;

struct TestApp {
    base_url: String,
    data_dir: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.data_dir);
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.storage.data_dir = std::env::temp_dir().join(format!("record_services_e2e_{}", Uuid::new_v4()));
    cfg.storage.contacts_backend = ContactsBackend::Memory;
    cfg.normalize_and_validate()?;
    service::runtime::ensure_data_dir(&cfg.storage.data_dir).await?;

    let app = startup::build_app(&cfg);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = startup::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url, data_dir: cfg.storage.data_dir })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_contact_roundtrip_over_http() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/contacts", app.base_url))
        .json(&json!({"name": "alan turing", "phone": "+44 161 496 0000", "email": "alan@example.org"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = client.get(format!("{}/contacts/Alan%20Turing", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["email"], "alan@example.org");

    let res = client.delete(format!("{}/contacts/alan%20turing", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = client.get(format!("{}/contacts/Alan%20Turing", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let data_dir = app.data_dir.clone();
    drop(app);
    assert!(!data_dir.exists());
    Ok(())
}
