use axum::{
    Router,
    routing::{delete, get, post},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::GraphStore;
use crate::Result;

pub mod routes;

/// Server state. Each request opens its own store session; no mutable
/// state is shared between requests.
pub struct AppState {
    pub database_path: PathBuf,
}

impl AppState {
    /// Open a fresh store session for one request
    pub fn store(&self) -> Result<GraphStore> {
        GraphStore::open(&self.database_path)
    }
}

pub async fn start_server(port: u16, database_path: PathBuf) -> anyhow::Result<()> {
    let state = Arc::new(AppState { database_path });

    let app = Router::new()
        .route("/", get(routes::handle_root))
        .route("/graph_data", get(routes::handle_graph_data))
        .route("/add_node/", post(routes::handle_add_node))
        .route("/classes", get(routes::handle_classes))
        .route("/get_classes", get(routes::handle_classes))
        .route("/get_subclasses", get(routes::handle_all_subclasses))
        .route("/subclasses/{class_name}", get(routes::handle_subclasses))
        .route("/terms/{subclass_name}", get(routes::handle_terms))
        .route(
            "/create_relation_between_terms",
            post(routes::handle_create_relation),
        )
        .route("/delete_all_data", delete(routes::handle_delete_all))
        .route("/delete_node", delete(routes::handle_delete_node))
        .route("/add_synonym", post(routes::handle_add_synonym))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
