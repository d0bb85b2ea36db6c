use pawcart::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();

    // File logging only when the data dir already exists (production layout)
    let log_dir = format!("{}/logs", config.data_dir);
    if config.is_production() {
        init_logger_with_file(Some("info"), Some(&log_dir));
    } else {
        init_logger_with_file(Some("debug"), None);
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "pawcart starting");

    let state = ServerState::initialize(&config).await;
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
