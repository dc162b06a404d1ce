use crate::domain::error::DocError;
use crate::domain::model::UsageSnapshot;
use crate::domain::traits::{send_json, ApiRequest, Payload, Transport};
use reqwest::Method;

/// Fetch the account's character consumption for the current billing period.
pub async fn usage(transport: &dyn Transport, api_key: &str) -> Result<UsageSnapshot, DocError> {
    if api_key.trim().is_empty() {
        return Err(DocError::InvalidInput("API key is empty".to_string()));
    }
    let request = ApiRequest::new(
        Method::GET,
        "usage",
        Payload::Query(vec![("auth_key".to_string(), api_key.to_string())]),
    );
    send_json(transport, request).await
}
