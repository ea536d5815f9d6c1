//! To-Do List Server
//!
//! Server-rendered to-do lists grouped by category.
//!
//! Layered architecture:
//! - domain: Core entities and errors
//! - repository: SQLite data access
//! - commands: Data access operations used by the routes
//! - routes / views: HTTP handlers and the HTML they render
//!
//! # Configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | required (or `/run/secrets/DATABASE_URL`) |
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8000` |
//! | `TODO_LOG_DIR` | `logs` |
//! | `TODO_STATIC_DIR` | `public` |
//! | `RUST_LOG` | `info` |
//!
//! ```sh
//! DATABASE_URL=sqlite://todo.db cargo run
//! ```

use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use log::info;
use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tower_http::{services::ServeDir, trace::TraceLayer};

pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod repository;
pub mod routes;
pub mod views;

use config::Config;
use error::ServerError;
use repository::{init_db, CategoryRepository, DbState, ItemRepository};
use routes::{
    add_item_handler, category_handler, create_category_handler, delete_category_handler,
    delete_item_handler, index_handler,
};

/// Application state shared across handlers
pub struct AppState {
    pub category_repo: CategoryRepository,
    pub item_repo: ItemRepository,
}

impl AppState {
    pub fn new(db_state: &DbState) -> Arc<Self> {
        Arc::new(Self {
            category_repo: CategoryRepository::new(db_state.connection()),
            item_repo: ItemRepository::new(db_state.connection()),
        })
    }
}

/// All routes plus static files from `static_dir`
pub fn build_router(state: Arc<AppState>, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_handler).post(create_category_handler))
        .route("/delete", post(delete_category_handler))
        .route(
            "/categories/:category",
            get(category_handler).post(add_item_handler),
        )
        .route("/categories/:category/delete", post(delete_item_handler))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server() -> Result<(), ServerError> {
    let config = Config::load()?;
    rolling_logger::init_logger(&config.log_dir, "todo-list")?;

    info!("Initializing database...");
    let db_state = init_db(&config.database_url).await?;
    let state = AppState::new(&db_state);

    let app = build_router(state, &config.static_dir);

    let address = config.address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
