use crate::domain::error::DocError;
use crate::domain::model::{Endpoint, JobHandle};
use async_trait::async_trait;
use reqwest::Method;

/// A single multipart form field
#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        bytes: Vec<u8>,
    },
}

impl FormField {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        FormField::Text {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Multipart(Vec<FormField>),
    Query(Vec<(String, String)>),
    Empty,
}

/// One call against the provider. `path` is relative to the endpoint base.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub payload: Payload,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>, payload: Payload) -> Self {
        Self {
            method,
            path: path.into(),
            payload,
        }
    }

    /// Value of a text field or query parameter, if present
    pub fn param(&self, key: &str) -> Option<&str> {
        match &self.payload {
            Payload::Multipart(fields) => fields.iter().find_map(|f| match f {
                FormField::Text { name, value } if name == key => Some(value.as_str()),
                _ => None,
            }),
            Payload::Query(params) => params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            Payload::Empty => None,
        }
    }
}

/// Abstraction over the HTTP layer.
///
/// Implementations perform exactly one call per `send` and never retry.
/// A success is the raw response body of a 2xx reply.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Endpoint every request is sent to
    fn endpoint(&self) -> &Endpoint;

    async fn send(&self, request: ApiRequest) -> Result<Vec<u8>, DocError>;
}

/// Refuse to use a handle against an endpoint other than the one that issued it.
pub fn ensure_same_endpoint(transport: &dyn Transport, handle: &JobHandle) -> Result<(), DocError> {
    if transport.endpoint() != &handle.endpoint {
        return Err(DocError::InvalidInput(format!(
            "document {} was issued by {} and cannot be used with {}",
            handle.document_id,
            handle.endpoint.base_url,
            transport.endpoint().base_url
        )));
    }
    Ok(())
}

/// Decode a JSON success body, mapping shape errors to `ProtocolViolation`.
pub async fn send_json<T>(transport: &dyn Transport, request: ApiRequest) -> Result<T, DocError>
where
    T: serde::de::DeserializeOwned,
{
    let path = request.path.clone();
    let body = transport.send(request).await?;
    serde_json::from_slice(&body).map_err(|e| {
        DocError::ProtocolViolation(format!("unexpected response from {}: {}", path, e))
    })
}
