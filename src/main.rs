mod config;
mod db;
mod entities;
mod error;
mod models;
mod routes;
mod session;
mod store;
mod templates;

use std::sync::Arc;

use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{config::Config, session::SessionStore, store::MovieStore};

#[derive(Clone)]
pub struct AppState {
    pub store: MovieStore,
    pub sessions: SessionStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,filmshelf=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect(&config.database_url).await?;
    let store = MovieStore::new(db);
    store.initialize().await?;

    let state = Arc::new(AppState { store, sessions: SessionStore::new() });

    let app = routes::router()
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
