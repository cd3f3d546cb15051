//! Rollcall server binary.

use std::net::SocketAddr;

use attendance_store::MemoryAttendanceStore;
use rollcall_server::{config::Config, create_app, create_state, init_tracing, services::demo_seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!(
        seed_demo_data = config.seed_demo_data,
        simulated_latency_ms = config.simulated_latency_ms,
        "Starting Rollcall server"
    );

    let store = MemoryAttendanceStore::new();
    if config.seed_demo_data {
        demo_seed::seed_demo_data(&store).await?;
    }

    let state = create_state(config.clone(), store);
    let app = create_app(state);

    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(addr = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
