use crate::domain::error::DocError;
use crate::domain::model::Endpoint;
use crate::domain::traits::{ApiRequest, FormField, Payload, Transport};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;

// Provider error bodies can be whole HTML pages
const MAX_ERROR_BODY: usize = 2048;

/// DeepL transport over reqwest
pub struct HttpTransport {
    client: Client,
    endpoint: Endpoint,
}

impl HttpTransport {
    pub fn new(client: Client, endpoint: Endpoint) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    async fn send(&self, request: ApiRequest) -> Result<Vec<u8>, DocError> {
        let url = self.endpoint.url(&request.path);
        debug!(method = %request.method, path = %request.path, "sending request");

        let mut builder = self.client.request(request.method, &url);
        builder = match request.payload {
            Payload::Multipart(fields) => builder.multipart(build_form(fields)),
            Payload::Query(params) => builder.query(&params),
            Payload::Empty => builder,
        };

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DocError::ProviderRejected {
                status: status.as_u16(),
                body: truncate(body.trim(), MAX_ERROR_BODY),
            });
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        debug!(status = status.as_u16(), len = bytes.len(), "response received");
        Ok(bytes.to_vec())
    }
}

fn build_form(fields: Vec<FormField>) -> Form {
    fields.into_iter().fold(Form::new(), |form, field| match field {
        FormField::Text { name, value } => form.text(name, value),
        FormField::File {
            name,
            filename,
            bytes,
        } => form.part(name, Part::bytes(bytes).file_name(filename)),
    })
}

fn transport_error(err: reqwest::Error) -> DocError {
    if err.is_timeout() {
        DocError::TransportUnavailable(format!("request timed out: {}", err))
    } else if err.is_connect() {
        DocError::TransportUnavailable(format!("connection failed: {}", err))
    } else {
        DocError::from(err)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::EndpointTier;
    use reqwest::Method;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer one request with `status` and `body`, yielding the request line.
    async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&chunk[..n]);
                if received.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let reply = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&received)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });
        (format!("http://{}/v2/", addr), server)
    }

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(
            Client::new(),
            Endpoint::new(EndpointTier::Standard, Some(base)),
        )
    }

    fn status_request() -> ApiRequest {
        ApiRequest::new(
            Method::GET,
            "document/d1",
            Payload::Query(vec![
                ("auth_key".to_string(), "secret".to_string()),
                ("document_key".to_string(), "k1".to_string()),
            ]),
        )
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("héllo", 2), "h...");
    }

    #[tokio::test]
    async fn non_success_status_is_provider_rejected() {
        let (base, server) = serve_once("403 Forbidden", "bad key!!".to_string()).await;

        let err = transport(&base).send(status_request()).await.unwrap_err();
        server.await.unwrap();

        match err {
            DocError::ProviderRejected { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "bad key!!");
            }
            other => panic!("expected ProviderRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn long_error_body_is_truncated() {
        let (base, server) = serve_once("503 Service Unavailable", "x".repeat(5000)).await;

        let err = transport(&base).send(status_request()).await.unwrap_err();
        server.await.unwrap();

        match err {
            DocError::ProviderRejected { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body.len(), MAX_ERROR_BODY + 3);
                assert!(body.ends_with("..."));
            }
            other => panic!("expected ProviderRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn refused_connection_is_transport_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = transport(&format!("http://{}/v2/", addr))
            .send(status_request())
            .await
            .unwrap_err();

        assert!(matches!(err, DocError::TransportUnavailable(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn query_payload_lands_in_the_url() {
        let (base, server) =
            serve_once("200 OK", r#"{"status":"queued"}"#.to_string()).await;

        let body = transport(&base).send(status_request()).await.unwrap();
        let request_line = server.await.unwrap();

        assert_eq!(body, br#"{"status":"queued"}"#);
        assert!(request_line.starts_with("GET /v2/document/d1?"));
        assert!(request_line.contains("auth_key=secret"));
        assert!(request_line.contains("document_key=k1"));
    }
}
