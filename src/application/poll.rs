use crate::domain::error::DocError;
use crate::domain::model::{CompletedJob, JobHandle, JobState, JobStatus};
use crate::domain::traits::{ensure_same_endpoint, send_json, ApiRequest, Payload, Transport};
use crate::infrastructure::config::Polling;
use reqwest::Method;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

/// Pacing and bounds for the status loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub min_interval: Duration,
    pub max_wait: Duration,
    pub max_polls: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        PollPolicy::from(&Polling::default())
    }
}

impl From<&Polling> for PollPolicy {
    fn from(polling: &Polling) -> Self {
        Self {
            min_interval: polling.min_interval(),
            max_wait: polling.max_wait(),
            max_polls: polling.max_polls.max(1),
        }
    }
}

/// What the loop does after observing a status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Wait(Duration),
    Completed,
    Failed(String),
}

/// Delay before the next poll: the provider's hint, never below `floor`.
pub fn next_delay(seconds_remaining: Option<i64>, floor: Duration) -> Duration {
    let hinted = seconds_remaining
        .filter(|s| *s > 0)
        .map(|s| Duration::from_secs(s as u64))
        .unwrap_or(Duration::ZERO);
    hinted.max(floor)
}

pub fn transition(status: &JobStatus, policy: &PollPolicy) -> Transition {
    match status.status {
        JobState::Queued | JobState::Translating => {
            Transition::Wait(next_delay(status.seconds_remaining, policy.min_interval))
        }
        JobState::Done => Transition::Completed,
        JobState::Error => Transition::Failed(
            status
                .message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "provider reported status 'error'".to_string()),
        ),
    }
}

/// Query the current status of a submitted document once.
pub async fn query_status(
    transport: &dyn Transport,
    handle: &JobHandle,
    api_key: &str,
) -> Result<JobStatus, DocError> {
    let request = ApiRequest::new(
        Method::GET,
        format!("document/{}", handle.document_id),
        Payload::Query(vec![
            ("auth_key".to_string(), api_key.to_string()),
            ("document_key".to_string(), handle.document_key.clone()),
        ]),
    );
    send_json(transport, request).await
}

/// Poll until the job reaches a terminal status.
///
/// `observer` sees every status as it arrives. Transport failures abort the
/// loop unchanged; a provider-side `error` becomes `JobFailed`; running out
/// of polls or wall-clock budget becomes `Timeout`.
pub async fn poll_until_done<F>(
    transport: &dyn Transport,
    handle: JobHandle,
    api_key: &str,
    policy: &PollPolicy,
    mut observer: F,
) -> Result<CompletedJob, DocError>
where
    F: FnMut(&JobStatus),
{
    ensure_same_endpoint(transport, &handle)?;

    let started = Instant::now();
    let mut state = JobState::Queued;
    let mut polls: u32 = 0;

    loop {
        if polls >= policy.max_polls {
            return Err(DocError::Timeout(format!(
                "document {} still {} after {} polls",
                handle.document_id, state, polls
            )));
        }

        let status = query_status(transport, &handle, api_key).await?;
        polls += 1;
        if status.status != state {
            debug!(from = %state, to = %status.status, "job state changed");
            state = status.status;
        }
        observer(&status);

        match transition(&status, policy) {
            Transition::Completed => {
                info!(
                    document_id = %handle.document_id,
                    polls,
                    billed_characters = status.billed_characters,
                    "translation finished"
                );
                return Ok(CompletedJob::new(handle, status, polls));
            }
            Transition::Failed(message) => return Err(DocError::JobFailed(message)),
            Transition::Wait(delay) => {
                let remaining = policy.max_wait.saturating_sub(started.elapsed());
                if remaining < policy.min_interval {
                    return Err(DocError::Timeout(format!(
                        "document {} still {} after {}s",
                        handle.document_id,
                        state,
                        started.elapsed().as_secs()
                    )));
                }
                let delay = delay.min(remaining);
                debug!(seconds = delay.as_secs(), "waiting before next poll");
                sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PollPolicy {
        PollPolicy::default()
    }

    #[test]
    fn delay_never_drops_below_floor() {
        let floor = Duration::from_secs(1);
        assert_eq!(next_delay(None, floor), floor);
        assert_eq!(next_delay(Some(0), floor), floor);
        assert_eq!(next_delay(Some(-3), floor), floor);
        assert_eq!(next_delay(Some(7), floor), Duration::from_secs(7));
    }

    #[test]
    fn terminal_states_stop_the_loop() {
        let done = JobStatus::new(JobState::Done, None);
        assert_eq!(transition(&done, &policy()), Transition::Completed);

        let mut failed = JobStatus::new(JobState::Error, None);
        failed.message = Some("Unsupported file".to_string());
        assert_eq!(
            transition(&failed, &policy()),
            Transition::Failed("Unsupported file".to_string())
        );
    }

    #[test]
    fn pending_states_wait_for_hint() {
        let queued = JobStatus::new(JobState::Queued, Some(5));
        assert_eq!(
            transition(&queued, &policy()),
            Transition::Wait(Duration::from_secs(5))
        );
        let translating = JobStatus::new(JobState::Translating, None);
        assert_eq!(
            transition(&translating, &policy()),
            Transition::Wait(Duration::from_secs(1))
        );
    }

    #[test]
    fn status_parses_provider_payload() {
        let status: JobStatus =
            serde_json::from_str(r#"{"document_id":"d1","status":"translating","seconds_remaining":20}"#)
                .unwrap();
        assert_eq!(status.status, JobState::Translating);
        assert_eq!(status.seconds_remaining, Some(20));

        assert!(serde_json::from_str::<JobStatus>(r#"{"status":"paused"}"#).is_err());
    }
}
