use std::sync::Arc;

use tracing::info;

use loadsim_api::{AgentAdapter, HttpApi, axum};
use loadsim_core::{ProcSampler, system};
use loadsim_observe::{LoggerConfig, logger_init};

const BIND_ADDR: &str = "0.0.0.0:5111";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = LoggerConfig::default();
    logger_init(&cfg)?;

    let core_count = system::core_count();
    info!(
        agent_id = system::agent_id(),
        core_count, "starting loadsim agent"
    );

    let adapter = AgentAdapter::new(Arc::new(ProcSampler::new()), core_count);
    let router = HttpApi::new(Arc::new(adapter)).router();

    let listener = tokio::net::TcpListener::bind(BIND_ADDR).await?;
    info!(addr = BIND_ADDR, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}
