#[cfg(test)]
#[path = "ollama_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::BackendPrompt;

const DEFAULT_MODEL: &str = "codellama:latest";

fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionOptions {
    temperature: f32,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    prompt: String,
    options: CompletionOptions,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    pub response: String,
    pub done: bool,
}

pub struct Ollama {
    url: String,
    model: String,
    temperature: String,
    timeout: String,
}

impl Default for Ollama {
    fn default() -> Ollama {
        let mut model = Config::get(ConfigKey::Model);
        if model.is_empty() {
            model = DEFAULT_MODEL.to_string();
        }

        return Ollama {
            url: Config::get(ConfigKey::OllamaURL),
            model,
            temperature: Config::get(ConfigKey::Temperature),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
        };
    }
}

#[async_trait]
impl Backend for Ollama {
    fn name(&self) -> BackendName {
        return BackendName::Ollama;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "Ollama is not running");
                bail!("Ollama is not running");
            }
        };

        if res.status() != 200 {
            tracing::error!(status = res.status().as_u16(), "Ollama health check failed");
            bail!("Ollama health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, prompt: BackendPrompt) -> Result<String> {
        let req = CompletionRequest {
            model: self.model.to_string(),
            prompt: prompt.text,
            options: CompletionOptions {
                temperature: self.temperature.parse::<f32>()?,
            },
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/api/generate", url = self.url))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make completion request to Ollama"
            );
            bail!("Failed to make completion request to Ollama");
        }

        let stream = res.bytes_stream().map_err(convert_err);
        let mut lines_reader = StreamReader::new(stream).lines();

        let mut text = "".to_string();
        while let Some(line) = lines_reader.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let ores: CompletionResponse = serde_json::from_str(&line)?;
            tracing::debug!(body = ?ores, "Completion response");
            text += &ores.response;
            if ores.done {
                break;
            }
        }

        return Ok(text);
    }
}
