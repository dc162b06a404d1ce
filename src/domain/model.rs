use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const STANDARD_API_URL: &str = "https://api.deepl.com/v2/";
pub const FREE_API_URL: &str = "https://api-free.deepl.com/v2/";

// 接口档位：标准版 / 免费版
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EndpointTier {
    Standard,
    Free,
}

impl EndpointTier {
    pub fn default_base(self) -> &'static str {
        match self {
            EndpointTier::Standard => STANDARD_API_URL,
            EndpointTier::Free => FREE_API_URL,
        }
    }
}

/// Resolved API base. Handles issued by one endpoint are only valid there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub tier: EndpointTier,
    pub base_url: String,
}

impl Endpoint {
    pub fn new(tier: EndpointTier, base_override: Option<&str>) -> Self {
        let base = base_override
            .filter(|b| !b.trim().is_empty())
            .unwrap_or(tier.default_base());
        let base_url = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        Self { tier, base_url }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Formality {
    More,
    Less,
}

impl Formality {
    pub fn as_str(self) -> &'static str {
        match self {
            Formality::More => "more",
            Formality::Less => "less",
        }
    }
}

// 一次翻译任务的提交参数
#[derive(Debug, Clone)]
pub struct TranslationJob {
    pub source_file: PathBuf,
    pub source_lang: Option<String>,
    pub target_lang: String,
    pub formality: Option<Formality>,
    pub endpoint: Endpoint,
}

impl TranslationJob {
    /// Source language to send, `None` meaning provider auto-detection.
    pub fn effective_source_lang(&self) -> Option<&str> {
        self.source_lang
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Bearer credential for a submitted document.
#[derive(Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub document_id: String,
    pub document_key: String,
    pub endpoint: Endpoint,
}

impl fmt::Debug for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobHandle")
            .field("document_id", &self.document_id)
            .field("document_key", &"<redacted>")
            .field("tier", &self.endpoint.tier)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Queued,
    Translating,
    Done,
    Error,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Done | JobState::Error)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobState::Queued => "queued",
            JobState::Translating => "translating",
            JobState::Done => "done",
            JobState::Error => "error",
        };
        f.write_str(s)
    }
}

/// One status report, as returned by a single poll.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct JobStatus {
    pub status: JobState,
    #[serde(default)]
    pub seconds_remaining: Option<i64>,
    #[serde(default)]
    pub billed_characters: Option<u64>,
    #[serde(default, alias = "error_message")]
    pub message: Option<String>,
}

impl JobStatus {
    pub fn new(status: JobState, seconds_remaining: Option<i64>) -> Self {
        Self {
            status,
            seconds_remaining,
            billed_characters: None,
            message: None,
        }
    }
}

/// Proof that a job reached `done`; the only way to download a result.
#[derive(Debug)]
pub struct CompletedJob {
    handle: JobHandle,
    pub final_status: JobStatus,
    pub polls: u32,
}

impl CompletedJob {
    pub(crate) fn new(handle: JobHandle, final_status: JobStatus, polls: u32) -> Self {
        Self {
            handle,
            final_status,
            polls,
        }
    }

    pub fn handle(&self) -> &JobHandle {
        &self.handle
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageSnapshot {
    pub character_count: u64,
    pub character_limit: u64,
}

impl UsageSnapshot {
    /// Rounded percentage of the limit consumed, `None` when there is no limit.
    pub fn percent_used(&self) -> Option<u64> {
        if self.character_limit == 0 {
            return None;
        }
        let pct = self.character_count as f64 / self.character_limit as f64 * 100.0;
        Some(pct.round() as u64)
    }
}
