//! Client for the DeepL document translation API.
//!
//! A run uploads one document, polls the asynchronous job until the provider
//! reports a terminal status, and downloads the translated file. The HTTP
//! layer sits behind [`domain::traits::Transport`] so the job lifecycle can be
//! driven without a network.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod state;

pub use application::poll::{poll_until_done, PollPolicy};
pub use application::workflow::{translate_document, RunOptions, RunReport};
pub use domain::error::DocError;
pub use domain::model::{
    CompletedJob, Endpoint, EndpointTier, Formality, JobHandle, JobState, JobStatus,
    TranslationJob, UsageSnapshot,
};
pub use domain::traits::{ApiRequest, FormField, Payload, Transport};
