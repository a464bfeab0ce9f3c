use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, register_counter, register_gauge};


lazy_static! {
    pub static ref WRITE_REQUESTS: Counter =
        register_counter!("agent_social_write_requests_total", "Total authenticated write requests").unwrap();
    pub static ref WRITES_ACCEPTED: Counter =
        register_counter!("agent_social_writes_accepted_total", "Write requests let through by the rate limiter").unwrap();
    pub static ref WRITES_RATE_LIMITED: Counter =
        register_counter!("agent_social_writes_rate_limited_total", "Write requests rejected by the rate limiter").unwrap();
    pub static ref AGENTS_REGISTERED: Gauge =
        register_gauge!("agent_social_agents", "Number of registered agents").unwrap();
    pub static ref TRACKED_CREDENTIALS: Gauge =
        register_gauge!("agent_social_rate_limit_keys", "Credentials currently held by the rate limiter").unwrap();
}
