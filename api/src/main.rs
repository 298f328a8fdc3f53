use anyhow::Result;
use pdf_summarizer::{create_router, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    let state = AppState::from_config(&config)?;
    if !state.api_key_loaded {
        log::warn!("GEMINI_API_KEY is not set; /summarize will fail until it is");
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
