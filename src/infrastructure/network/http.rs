// HTTP client utilities
use crate::domain::error::DocError;
use crate::infrastructure::config::Http;
use reqwest::Client;
use std::time::Duration;

/// Create the shared HTTP client from the `[http]` config section
pub fn create_client(http: &Http) -> Result<Client, DocError> {
    let mut builder = Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(http.timeout_secs.max(1)))
        .user_agent(http.user_agent.as_str());

    if let Some(proxy) = http.proxy.as_deref().filter(|p| !p.is_empty()) {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| DocError::Config(format!("Invalid proxy '{}': {}", proxy, e)))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| DocError::Config(format!("Failed to build HTTP client: {}", e)))
}
