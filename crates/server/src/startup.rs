use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, ContactsBackend, StorageConfig};
use dotenvy::dotenv;
use models::{application::Application, cart::CartEntry, contact::Contact, product::Product, student::Student};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};
use service::{
    runtime,
    services::{ApplicationService, ContactsService, NotesService, ShopService, StudentsService},
    storage::{
        json_map_store::JsonMapStore, memory_store::MemoryStore, note_dir_store::NoteDirStore, Collection,
        RecordStore,
    },
};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire every service to its store under `data_dir`.
pub fn build_state(storage: &StorageConfig) -> AppState {
    let applications = Collection::<Application>::new(Arc::new(JsonMapStore::<Application>::new(
        storage.applications_file(),
    )));
    let products = Collection::<Product>::new(Arc::new(JsonMapStore::<Product>::new(storage.products_file())));
    let cart = Collection::<CartEntry>::new(Arc::new(JsonMapStore::<CartEntry>::new(storage.cart_file())));
    let notes = Collection::<String>::new(Arc::new(NoteDirStore::new(storage.notes_dir())));

    // 联系人存储可选：文件或进程内存
    let contacts_store: Arc<dyn RecordStore<Contact>> = match storage.contacts_backend {
        ContactsBackend::File => Arc::new(JsonMapStore::<Contact>::new(storage.contacts_file())),
        ContactsBackend::Memory => Arc::new(MemoryStore::<Contact>::new("contacts")),
    };
    let contacts = Collection::<Contact>::new(contacts_store);

    let students = Collection::<Student>::new(Arc::new(JsonMapStore::<Student>::new(storage.students_file())))
        .with_backup(storage.backup_students);

    AppState {
        applications: Arc::new(ApplicationService::new(applications)),
        shop: Arc::new(ShopService::new(products, cart)),
        notes: Arc::new(NotesService::new(notes)),
        contacts: Arc::new(ContactsService::new(contacts)),
        students: Arc::new(StudentsService::new(students)),
    }
}

/// Router for a loaded config; stores are touched lazily on first request.
pub fn build_app(cfg: &AppConfig) -> Router {
    routes::build_router(build_state(&cfg.storage), build_cors())
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address: {e}")))
}

/// Serve `app` on an already bound listener until the task is dropped.
pub async fn serve(listener: tokio::net::TcpListener, app: Router) -> anyhow::Result<()> {
    axum::serve(listener, app).await?;
    Ok(())
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = AppConfig::load_or_env()?;
    runtime::ensure_data_dir(&cfg.storage.data_dir).await?;

    let app = build_app(&cfg);

    // Bind and serve
    let addr = bind_addr(&cfg)?;
    info!(
        %addr,
        data_dir = %cfg.storage.data_dir.display(),
        contacts_backend = ?cfg.storage.contacts_backend,
        "starting record services"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve(listener, app).await
}
