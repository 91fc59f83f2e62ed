//! In-memory [`LabelProvider`] for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{ClassifyError, ClassifyResult};
use super::provider::LabelProvider;

/// A call observed by [`MockLabelProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub name: String,
    pub system_prompt: String,
}

/// Returns canned labels and records every call.
#[derive(Debug)]
pub struct MockLabelProvider {
    default_label: String,
    labels: HashMap<String, String>,
    failure: Option<u16>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl Default for MockLabelProvider {
    fn default() -> Self {
        Self::new("Unknown")
    }
}

impl MockLabelProvider {
    pub fn new(default_label: impl Into<String>) -> Self {
        Self {
            default_label: default_label.into(),
            labels: HashMap::new(),
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers `label` for `name` (exact match) instead of the default.
    pub fn with_label(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(name.into(), label.into());
        self
    }

    /// Fails every call with an HTTP error carrying `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            failure: Some(status),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn called_names(&self) -> Vec<String> {
        self.calls.lock().iter().map(|c| c.name.clone()).collect()
    }
}

#[async_trait]
impl LabelProvider for MockLabelProvider {
    async fn classify(&self, name: &str, system_prompt: &str) -> ClassifyResult<String> {
        self.calls.lock().push(RecordedCall {
            name: name.to_string(),
            system_prompt: system_prompt.to_string(),
        });

        if let Some(status) = self.failure {
            return Err(ClassifyError::Http {
                status,
                body: "mock failure".to_string(),
            });
        }

        Ok(self
            .labels
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.default_label.clone()))
    }
}
