mod dto;
mod handlers;
mod models;
mod repository;
mod service;

use axum::{Router, response::Html, routing::get};

use std::{env, sync::Arc};

use handlers::rest;
use repository::Repository;

use tower_http::trace::TraceLayer;

use service::NoteService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Fetch env variables
    let database_dsn =
        env::var("PG_DSN").expect("database dsn must be provided as an ENV variable");
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    // Repository creation and migration
    let mut repo = Repository::new(database_dsn).await.unwrap_or_else(|e| {
        tracing::error!("Failed to establish database connection: {e}");
        panic!("failed to establish database connection: {e}");
    });

    repo.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    // Service creation
    let service = Arc::new(NoteService::new(Arc::new(repo)));

    // Router config
    let app = Router::new()
        .route("/", get(index))
        .route(
            "/notes",
            get(rest::list_notes)
                .post(rest::create_note)
                .delete(rest::delete_note),
        )
        .route("/api-doc/openapi.json", get(rest::openapi_json))
        .with_state(service)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("failed to bind listen address");

    // Starting router
    tracing::info!("Started listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("failed to start server");
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}
