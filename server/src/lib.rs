//! HTTP service for managing todo items stored in SQLite.
//!
//! The router is built around a [`Store`] handle passed in as state; there is
//! no global engine. [`app`] wires the default CORS allow-list, [`router`]
//! takes an explicit one.

pub mod config;
pub mod cors;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod store;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ErrorBody};
pub use models::{NewTodo, TodoPatch, TodoResponse, Welcome};
pub use store::{Session, Store, StoreError};

pub fn app(store: Store) -> Router {
    router(store, cors::default_layer())
}

pub fn router(store: Store, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(handlers::read_root))
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .route(
            "/todos/completed/{completed}",
            get(handlers::list_todos_by_status),
        )
        .fallback(handlers::unknown_route)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(store)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serve `app(store)` on `listener` until the process is stopped.
pub async fn run(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}
