//! Fake transport for testing.
//!
//! Outcomes are scripted per model id, so tests can exercise the fallback
//! loop's skip and abort decisions without network access or API costs.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::transport::ModelTransport;
use super::types::{ChatMessage, ModelError, ModelReply};

/// A scripted transport that answers per model id and records invoke order.
#[derive(Debug, Default)]
pub struct FakeTransport {
    /// Map of model id -> scripted outcome
    outcomes: HashMap<String, Result<String, ModelError>>,
    /// Outcome when no model-specific script exists
    default_outcome: Option<Result<String, ModelError>>,
    /// Model ids in the order they were invoked
    calls: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful reply for a model.
    pub fn with_reply(mut self, model: &str, content: &str) -> Self {
        self.outcomes
            .insert(model.to_string(), Ok(content.to_string()));
        self
    }

    /// Script a failure for a model.
    pub fn with_error(mut self, model: &str, code: Option<i64>, message: &str) -> Self {
        self.outcomes
            .insert(model.to_string(), Err(ModelError::new(code, message)));
        self
    }

    /// Set the reply used when no model-specific script matches.
    pub fn with_default_reply(mut self, content: &str) -> Self {
        self.default_outcome = Some(Ok(content.to_string()));
        self
    }

    /// Model ids in the order they were invoked.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelTransport for FakeTransport {
    async fn invoke(
        &self,
        model: &str,
        _messages: &[ChatMessage],
        _timeout: Duration,
    ) -> Result<ModelReply, ModelError> {
        self.calls.lock().unwrap().push(model.to_string());

        match self.outcomes.get(model).or(self.default_outcome.as_ref()) {
            Some(Ok(content)) => Ok(ModelReply {
                content: content.clone(),
            }),
            Some(Err(error)) => Err(error.clone()),
            None => Err(ModelError::new(
                None,
                format!("FakeTransport: no outcome configured for model {model}"),
            )),
        }
    }
}
