use std::sync::Arc;
use tokio::sync::Notify;

use statica::config::{AppState, Config};
use statica::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    logger::init(&cfg)?;

    let state = Arc::new(
        AppState::new(cfg).map_err(|e| format!("failed to resolve site root: {e}"))?,
    );

    let addr = state.config.socket_addr()?;
    let listener =
        server::create_listener(addr).map_err(|e| format!("failed to bind {addr}: {e}"))?;

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    logger::log_server_start(&state.root, &addr, &state.config);

    server::run(listener, state, shutdown).await;
    Ok(())
}
