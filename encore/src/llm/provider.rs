use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::config::LlmConfig;
use crate::error::{EncoreError, Result};

/// Prompt-to-text capability. Production runs a local model CLI; tests
/// substitute a stub.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;

    fn is_available(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LlmBackend {
    Cli { binary: String, model: String },
    Unavailable { reason: String },
}

/// Runs a local language-model CLI (`ollama run <model> <prompt>` by
/// default) and captures its stdout, bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    timeout: Duration,
}

impl LlmProvider {
    pub fn new(config: Option<&LlmConfig>) -> Self {
        let Some(config) = config else {
            return Self::unavailable("No LLM configuration provided");
        };

        Self {
            backend: LlmBackend::Cli {
                binary: config.binary.clone(),
                model: config.model.clone(),
            },
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: LlmBackend::Unavailable {
                reason: reason.to_string(),
            },
            timeout: Duration::ZERO,
        }
    }

    fn unavailable_reason(&self) -> String {
        match &self.backend {
            LlmBackend::Unavailable { reason } => reason.clone(),
            LlmBackend::Cli { .. } => String::new(),
        }
    }
}

#[async_trait]
impl TextCompletion for LlmProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let LlmBackend::Cli { binary, model } = &self.backend else {
            return Err(EncoreError::LlmUnavailable(self.unavailable_reason()));
        };

        if prompt.trim().is_empty() {
            return Err(EncoreError::Validation("Prompt cannot be empty".to_string()));
        }

        tracing::debug!(prompt_len = prompt.len(), "Running {} run {}", binary, model);

        let child = Command::new(binary)
            .arg("run")
            .arg(model)
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| EncoreError::Llm(format!("Failed to spawn {binary}: {e}")))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                EncoreError::Llm(format!(
                    "{binary} timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| EncoreError::Llm(format!("{binary} failed: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EncoreError::Llm(format!(
                "{binary} exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            return Err(EncoreError::Llm("Model produced no output".to_string()));
        }

        Ok(stdout)
    }

    fn is_available(&self) -> bool {
        matches!(self.backend, LlmBackend::Cli { .. })
    }
}
