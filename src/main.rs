use std::sync::Arc;
use tracing::{error, info};

use memos::{
    build_router,
    config::Config,
    db::MemoRepository,
    services::CouchDbClient,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,memos=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .init();

    let config = Config::from_env()?;
    let client = CouchDbClient::new(config.couchdb())?;
    let memos = MemoRepository::new(Arc::new(client));

    match memos.health_check().await {
        Ok(info) => info!(
            "✅ Connected to memo database '{}' ({} documents)",
            info.db_name,
            info.doc_count.unwrap_or(0)
        ),
        Err(e) => error!("❌ Memo database is not reachable yet: {}", e),
    }

    let state = Arc::new(AppState {
        memos,
        config: config.clone(),
    });
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    info!("Server starting on {}", config.server_address);

    axum::serve(listener, app).await?;

    Ok(())
}
