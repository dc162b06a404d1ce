use crate::domain::error::DocError;
use crate::domain::traits::Transport;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::client::HttpTransport;
use crate::infrastructure::network::http::create_client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub transport: Arc<dyn Transport>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, DocError> {
        let http_client = create_client(&config.http)?;
        let transport = HttpTransport::new(http_client, config.endpoint());

        Ok(Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        })
    }
}
