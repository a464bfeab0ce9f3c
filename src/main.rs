use agent_social::build_router;
use agent_social::config::Args;
use agent_social::rate_limit::RateLimiter;
use agent_social::state::AppState;
use anyhow::Context;
use clap::Parser; // for cli
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let state = Arc::new(AppState::new(RateLimiter::new(
        args.rate_limit,
        args.rate_window(),
    )));
    let app = build_router(state);

    let addr = args.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        addr = %addr,
        rate_limit = args.rate_limit,
        rate_window_secs = args.rate_window,
        "agent-social listening"
    );
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
