//! Scripted transport shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use deepl_doc::{ApiRequest, DocError, Endpoint, EndpointTier, Transport};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::time::Instant;

pub const API_KEY: &str = "test-auth-key";

/// A request as seen by the transport, with the (paused) clock reading
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub request: ApiRequest,
    pub at: Instant,
}

/// Replays canned replies in order and records every request
pub struct ScriptedTransport {
    endpoint: Endpoint,
    replies: Mutex<VecDeque<Result<Vec<u8>, DocError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn standard() -> Self {
        Self::new(Endpoint::new(EndpointTier::Standard, None))
    }

    pub fn json(self, body: &str) -> Self {
        self.reply(Ok(body.as_bytes().to_vec()))
    }

    pub fn bytes(self, body: &[u8]) -> Self {
        self.reply(Ok(body.to_vec()))
    }

    pub fn fail(self, err: DocError) -> Self {
        self.reply(Err(err))
    }

    fn reply(self, reply: Result<Vec<u8>, DocError>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|c| format!("{} {}", c.request.method, c.request.path))
            .collect()
    }

    pub fn remaining_replies(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    async fn send(&self, request: ApiRequest) -> Result<Vec<u8>, DocError> {
        self.calls.lock().unwrap().push(RecordedCall {
            request: request.clone(),
            at: Instant::now(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply for {} {}", request.method, request.path))
    }
}

pub fn write_input(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
