//! Inference server client
//!
//! Generation deliberately carries no timeout: a summary of a long page on
//! a slow machine can take minutes, and the product exposes no
//! cancellation. Only the availability probe is allowed to give up
//! quickly, so the settings dialog can disable AI controls instead of
//! hanging.

use std::time::Duration;

use futures_util::StreamExt;
use serde::{Deserialize, Serialize};

use crate::error::AssistError;
use crate::Result;

/// Default address of the local inference server
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:11434";

/// How long the model-list probe waits before declaring the server down
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    stream: bool,
}

impl GenerateRequest {
    pub fn new(
        model: impl Into<String>,
        system: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system: system.into(),
            prompt: prompt.into(),
            stream: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Serialize)]
struct PullRequest<'a> {
    name: &'a str,
    stream: bool,
}

pub struct AssistClient {
    http: reqwest::Client,
    base_url: String,
}

impl AssistClient {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.base_url
    }

    /// List the models the server has installed
    pub async fn list_installed_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .http
            .get(url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AssistError::Server(format!("HTTP {}", response.status())));
        }

        let tags: TagsResponse = response.json().await?;
        Ok(tags.models.into_iter().map(|tag| tag.name).collect())
    }

    /// Whether the server answers at all. The settings dialog uses this to
    /// decide whether AI controls are offered.
    pub async fn is_available(&self) -> bool {
        self.list_installed_models().await.is_ok()
    }

    /// Install a model. Blocking and long-running; there is no progress
    /// reporting and no cancellation, only the completion signal.
    pub async fn pull_model(&self, name: &str) -> Result<()> {
        let url = format!("{}/api/pull", self.base_url);
        let response = self
            .http
            .post(url)
            .json(&PullRequest {
                name,
                stream: false,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AssistError::Server(format!("HTTP {}", response.status())));
        }

        tracing::info!(model = %name, "Model installed");
        Ok(())
    }

    /// Stream a generation, invoking `on_chunk` once per text segment the
    /// server emits. Returns when the server reports completion.
    pub async fn generate<F>(&self, request: &GenerateRequest, mut on_chunk: F) -> Result<()>
    where
        F: FnMut(&str),
    {
        let url = format!("{}/api/generate", self.base_url);
        let response = self.http.post(url).json(request).send().await?;

        if !response.status().is_success() {
            return Err(AssistError::Server(format!("HTTP {}", response.status())));
        }

        let mut stream = response.bytes_stream();
        let mut buffer = Vec::new();

        while let Some(bytes) = stream.next().await {
            let bytes = bytes?;
            for line in drain_lines(&mut buffer, &bytes) {
                let chunk: GenerateChunk = serde_json::from_str(&line)?;
                if !chunk.response.is_empty() {
                    on_chunk(&chunk.response);
                }
                if chunk.done {
                    return Ok(());
                }
            }
        }

        // Server closed the stream without a final done marker; treat the
        // leftover partial line, if any, as a last chunk.
        let tail = String::from_utf8_lossy(&buffer);
        let tail = tail.trim();
        if !tail.is_empty() {
            let chunk: GenerateChunk = serde_json::from_str(tail)?;
            if !chunk.response.is_empty() {
                on_chunk(&chunk.response);
            }
        }

        Ok(())
    }
}

impl Default for AssistClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Append raw bytes to the carry-over buffer and drain every complete
/// newline-terminated line. The carry-over stays raw so a multi-byte
/// character split across network chunks is whole again before UTF-8
/// conversion.
fn drain_lines(buffer: &mut Vec<u8>, bytes: &[u8]) -> Vec<String> {
    buffer.extend_from_slice(bytes);

    let mut lines = Vec::new();
    while let Some(idx) = buffer.iter().position(|&b| b == b'\n') {
        let raw: Vec<u8> = buffer.drain(..=idx).collect();
        let line = String::from_utf8_lossy(&raw).trim().to_string();
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_lines_reassembles_split_chunks() {
        let mut buffer = Vec::new();

        let lines = drain_lines(&mut buffer, b"{\"response\":\"Hel");
        assert!(lines.is_empty());

        let lines = drain_lines(&mut buffer, b"lo\"}\n{\"response\":\" wor");
        assert_eq!(lines, vec![r#"{"response":"Hello"}"#.to_string()]);

        let lines = drain_lines(&mut buffer, b"ld\",\"done\":true}\n");
        assert_eq!(lines, vec![r#"{"response":" world","done":true}"#.to_string()]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_drain_lines_skips_blank_lines() {
        let mut buffer = Vec::new();
        let lines = drain_lines(&mut buffer, b"\n\n{\"done\":true}\n\n");
        assert_eq!(lines, vec![r#"{"done":true}"#.to_string()]);
    }

    #[test]
    fn test_drain_lines_reassembles_split_multibyte_chars() {
        let mut buffer = Vec::new();

        // "café" with the two-byte 'é' split across chunks
        let lines = drain_lines(&mut buffer, b"{\"response\":\"caf\xC3");
        assert!(lines.is_empty());

        let lines = drain_lines(&mut buffer, b"\xA9\"}\n");
        assert_eq!(lines, vec!["{\"response\":\"caf\u{e9}\"}".to_string()]);

        let chunk: GenerateChunk = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(chunk.response, "caf\u{e9}");
    }

    #[test]
    fn test_chunk_defaults() {
        let chunk: GenerateChunk = serde_json::from_str(r#"{"model":"m"}"#).unwrap();
        assert!(chunk.response.is_empty());
        assert!(!chunk.done);
    }

    #[test]
    fn test_endpoint_is_normalized() {
        let client = AssistClient::with_endpoint("http://localhost:11434/");
        assert_eq!(client.endpoint(), "http://localhost:11434");
    }
}
