//! Ordered-candidate fallback loop shared by both pipelines.
//!
//! Free-tier inference backends rate-limit individual models independently,
//! so a 429 from one candidate says nothing about the next. Any other coded
//! error is request-level or account-level and will not improve with a
//! different model, so the loop aborts rather than masking the root cause.

use std::time::Duration;

use thiserror::Error;

use super::transport::ModelTransport;
use super::types::{ChatMessage, ModelError};

/// Pipeline-level failure: every candidate was exhausted or one failed
/// fatally, or no candidates were configured at all.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    Model(#[from] ModelError),

    #[error("no candidate models configured")]
    NoCandidates,
}

/// Text produced by the winning candidate, plus which model produced it so
/// the caller can log or audit which backend actually answered.
#[derive(Debug, Clone)]
pub struct ModelWin {
    pub content: String,
    pub model: String,
}

/// Try candidates strictly in order until one succeeds.
///
/// Per attempt: success wins and stops the loop; a 429 or a codeless error
/// (network failure, malformed body) advances to the next candidate; any
/// other coded error aborts immediately. Exhaustion fails with the last
/// observed error.
pub async fn run_candidates(
    transport: &dyn ModelTransport,
    candidates: &[String],
    messages: &[ChatMessage],
    timeout: Duration,
) -> Result<ModelWin, PipelineError> {
    let mut last_error: Option<ModelError> = None;

    for model in candidates {
        match transport.invoke(model, messages, timeout).await {
            Ok(reply) => {
                tracing::debug!(model = %model, "candidate answered");
                return Ok(ModelWin {
                    content: reply.content,
                    model: model.clone(),
                });
            }
            Err(error) if error.is_retryable() => {
                tracing::warn!(model = %model, code = ?error.code, "candidate unavailable, trying next");
                last_error = Some(error);
            }
            Err(error) => {
                tracing::warn!(model = %model, code = ?error.code, "non-retryable error, aborting fallback");
                return Err(PipelineError::Model(error));
            }
        }
    }

    match last_error {
        Some(error) => Err(PipelineError::Model(error)),
        None => Err(PipelineError::NoCandidates),
    }
}
