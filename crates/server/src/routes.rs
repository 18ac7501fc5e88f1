use std::sync::Arc;

use axum::{
    routing::{get, post, MethodRouter},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;
use service::services::{ApplicationService, ContactsService, NotesService, ShopService, StudentsService};

pub mod applications;
pub mod shop;
pub mod notes;
pub mod contacts;
pub mod students;

/// Shared router state: one service per record type, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub applications: Arc<ApplicationService>,
    pub shop: Arc<ShopService>,
    pub notes: Arc<NotesService>,
    pub contacts: Arc<ContactsService>,
    pub students: Arc<StudentsService>,
}

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Mount a collection endpoint at `path` and `path/`; axum does not fold trailing slashes.
fn collection(router: Router<AppState>, path: &str, methods: MethodRouter<AppState>) -> Router<AppState> {
    router.route(path, methods.clone()).route(&format!("{path}/"), methods)
}

/// Build the full application router with every service mounted under its own prefix
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let applications = collection(Router::new(), "/applications", get(applications::list).post(applications::create))
        .route("/applications/search", get(applications::search))
        .route("/applications/stats", get(applications::stats))
        .route(
            "/applications/:id",
            get(applications::get).patch(applications::update_status).delete(applications::delete),
        );

    let shop = collection(Router::new(), "/products", get(shop::list_products).post(shop::create_product));
    let shop = collection(shop, "/cart", get(shop::list_cart))
        .route("/cart/add", post(shop::add_to_cart).get(shop::add_to_cart))
        .route("/cart/checkout", get(shop::checkout))
        .route("/cart/:product_id", axum::routing::delete(shop::remove_from_cart));

    let notes = collection(Router::new(), "/notes", get(notes::list).post(notes::create))
        .route("/notes/:title", get(notes::get).put(notes::update).delete(notes::delete));

    let contacts = collection(Router::new(), "/contacts", get(contacts::list).post(contacts::create))
        .route(
            "/contacts/:name",
            get(contacts::get).put(contacts::replace).patch(contacts::patch).delete(contacts::delete),
        );

    let students = collection(Router::new(), "/students", get(students::list).post(students::create))
        .route("/students/stats", get(students::stats))
        .route(
            "/students/:name",
            get(students::get).patch(students::update_scores).delete(students::delete),
        );

    Router::new()
        .route("/health", get(health))
        .merge(applications)
        .merge(shop)
        .merge(notes)
        .merge(contacts)
        .merge(students)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
