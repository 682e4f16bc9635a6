#[cfg(test)]
#[path = "remote_test.rs"]
mod tests;

use std::time::Duration;

use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::CompileRequest;
use crate::domain::models::Compiler;
use crate::domain::models::SessionError;

const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompileResponse {
    message: Option<String>,
    error: Option<String>,
}

/// Execution service reached over HTTP at `{url}/compile`.
pub struct RemoteCompiler {
    url: String,
    timeout: String,
}

impl Default for RemoteCompiler {
    fn default() -> RemoteCompiler {
        return RemoteCompiler {
            url: Config::get(ConfigKey::CompilerURL),
            timeout: Config::get(ConfigKey::RequestTimeout),
        };
    }
}

fn transport_err(err: reqwest::Error) -> SessionError {
    tracing::error!(error = ?err, "Compiler is not reachable");
    return SessionError::Transport(err.to_string());
}

#[async_trait]
impl Compiler for RemoteCompiler {
    #[allow(clippy::implicit_return)]
    async fn compile(&self, request: &CompileRequest) -> Result<String, SessionError> {
        let mut req = reqwest::Client::new()
            .post(format!("{url}/compile", url = self.url.trim_end_matches('/')))
            .json(request);

        // Without a configured timeout the transport's own behaviour applies.
        if let Ok(millis) = self.timeout.parse::<u64>() {
            req = req.timeout(Duration::from_millis(millis));
        }

        let res = req.send().await.map_err(transport_err)?;
        let status = res.status();
        let body = res.text().await.map_err(transport_err)?;
        let parsed = serde_json::from_str::<CompileResponse>(&body);

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "Compile request failed");
            let detail = parsed
                .ok()
                .and_then(|e| return e.error)
                .unwrap_or_else(|| return UNKNOWN_ERROR.to_string());

            return Err(SessionError::ExecutionService(detail));
        }

        let parsed = parsed.map_err(|err| {
            tracing::error!(error = ?err, "Compiler returned a malformed body");
            return SessionError::ExecutionService(format!("Malformed compiler response: {err}"));
        })?;

        if let Some(err) = parsed.error {
            return Err(SessionError::ExecutionService(err));
        }

        return Ok(parsed.message.unwrap_or_default());
    }
}
