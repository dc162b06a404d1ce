use crate::application::poll::{poll_until_done, PollPolicy};
use crate::application::retrieve::{fetch, persist};
use crate::application::submit::submit;
use crate::application::usage::usage;
use crate::domain::error::DocError;
use crate::domain::model::{JobStatus, TranslationJob, UsageSnapshot};
use crate::domain::traits::Transport;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub formality_supported: bool,
    pub policy: PollPolicy,
    pub report_usage: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            formality_supported: true,
            policy: PollPolicy::default(),
            report_usage: false,
        }
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub output: PathBuf,
    pub bytes_written: usize,
    pub polls: u32,
    pub billed_characters: Option<u64>,
    /// Best-effort usage lookup; its failure never fails the run.
    pub usage: Option<Result<UsageSnapshot, DocError>>,
}

/// Submit, wait for, and download one document, then optionally look up usage.
pub async fn translate_document<F>(
    transport: &dyn Transport,
    job: &TranslationJob,
    output: &Path,
    api_key: &str,
    options: &RunOptions,
    observer: F,
) -> Result<RunReport, DocError>
where
    F: FnMut(&JobStatus),
{
    let handle = submit(transport, job, api_key, options.formality_supported).await?;
    info!(document_id = %handle.document_id, "file uploaded, waiting until processed");

    let completed = poll_until_done(transport, handle, api_key, &options.policy, observer).await?;

    let bytes = fetch(transport, &completed, api_key).await?;
    persist(output, &bytes).await?;

    let usage_result = if options.report_usage {
        let result = usage(transport, api_key).await;
        if let Err(e) = &result {
            warn!(error = %e, "usage lookup failed");
        }
        Some(result)
    } else {
        None
    };

    Ok(RunReport {
        output: output.to_path_buf(),
        bytes_written: bytes.len(),
        polls: completed.polls,
        billed_characters: completed.final_status.billed_characters,
        usage: usage_result,
    })
}
