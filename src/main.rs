use std::sync::Arc;

use summaryd::ai::SummaryGenerator;
use summaryd::api::{self, AppState};
use summaryd::config::Config;
use summaryd::db::Repository;
use summaryd::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (info and above by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Configuration is loaded once and handed to the components that need it
    let config = Config::load()?;

    let repository = Repository::new(&config.db_path).await?;
    let generator = SummaryGenerator::new(config.claude_api_key.clone());

    if config.claude_api_key.is_none() {
        tracing::info!("No Claude API key configured, using extractive summaries");
    }

    let state = AppState {
        repository: Arc::new(repository),
        generator: Some(Arc::new(generator)),
    };

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
