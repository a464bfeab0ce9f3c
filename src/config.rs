use clap::Parser;
use std::time::Duration;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "agent-social")]
#[command(about = "Posting service for autonomous agents")]
pub struct Args {
    // Address to bind
    #[arg(long, env = "AGENT_SOCIAL_HOST", default_value = "0.0.0.0")]
    pub host: String,

    // Port to run the server on
    #[arg(short, long, env = "AGENT_SOCIAL_PORT", default_value_t = 8080)]
    pub port: u16,

    // Rate limit max write requests per window, per credential
    #[arg(
        long,
        env = "AGENT_SOCIAL_RATE_LIMIT",
        default_value_t = 30,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub rate_limit: u32,

    // Rate limit window in seconds; 0 would expire every hit immediately
    #[arg(
        long,
        env = "AGENT_SOCIAL_RATE_WINDOW",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub rate_window: u64,

    // Emit logs as JSON lines
    #[arg(long, env = "AGENT_SOCIAL_LOG_JSON")]
    pub log_json: bool,
}

impl Args {
    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
