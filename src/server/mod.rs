//! Mock backend speaking the same REST contract the console consumes.

use axum::{
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::ui::Icons;

pub mod error;
pub mod queries;
pub mod routes;
pub mod seed;
pub mod store;

pub use error::ServerError;
pub use store::MemoryStore;

/// Server state
#[derive(Default)]
pub struct AppState {
    pub store: RwLock<MemoryStore>,
}

impl AppState {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/query/{name}", get(routes::run_query))
        .route(
            "/api/{resource}",
            get(routes::list_records).post(routes::create_record),
        )
        .route(
            "/api/{resource}/{id}",
            get(routes::get_record)
                .put(routes::update_record)
                .delete(routes::delete_record),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Build a store, importing the seed file when one exists.
pub fn seeded_store(seed: Option<&Path>) -> MemoryStore {
    let mut store = MemoryStore::new();
    let Some(path) = seed else {
        return store;
    };
    if !path.exists() {
        tracing::warn!("seed file {} not found, starting empty", path.display());
        return store;
    }
    match seed::load_seed_file(&mut store, path) {
        Ok(summary) => tracing::info!("{}", summary),
        Err(e) => tracing::warn!("failed to import {}: {}", path.display(), e),
    }
    store
}

pub async fn start_server(port: u16, seed: Option<&Path>) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(seeded_store(seed)));
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting mock backend on {}", addr);
    println!("{} Mock backend running at http://{}/api", Icons::GLOBE, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_seed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(Some(&dir.path().join("absent.json")));
        assert_eq!(store.rows("employee").count(), 0);
    }

    #[test]
    fn test_seed_file_is_imported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(
            &path,
            r#"{"location": [{"code": "HQ", "name": "Headquarters"}],
                "employee": [{"empNo": "E1", "locationId": "HQ"}]}"#,
        )
        .unwrap();

        let store = seeded_store(Some(&path));
        let employee = store.get("employee", 1).unwrap();
        assert_eq!(employee.get("locationId"), Some(&serde_json::json!(1)));
    }
}
