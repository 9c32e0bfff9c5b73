use std::net::SocketAddr;

/// Runtime environment the process is operating in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

/// Application configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,

    // Geo search provider
    pub geo_base_url: String,
    pub geo_timeout_secs: u64,
    pub geo_user_agent: String,
    pub geo_max_retries: u32,
    pub geo_retry_backoff_base_ms: u64,

    // Discovery engine
    pub category_ttl_secs: u64,
    pub search_ttl_secs: u64,
    pub inter_fetch_delay_ms: u64,
    pub sparse_result_threshold: usize,
}
