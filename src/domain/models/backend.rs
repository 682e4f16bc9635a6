#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BackendName {
    Gemini,
    Ollama,
}

impl BackendName {
    pub fn parse(text: &str) -> Option<BackendName> {
        return BackendName::iter().find(|e| return e.to_string() == text);
    }
}

fn format_error(error: Option<&str>) -> &str {
    return error.unwrap_or("none");
}

pub struct BackendPrompt {
    pub text: String,
}

impl BackendPrompt {
    pub fn new(text: String) -> BackendPrompt {
        return BackendPrompt { text };
    }

    /// Single-turn prompt asking the model to resolve the current error.
    pub fn for_code_error(user_input: &str, code: &str, error: Option<&str>) -> BackendPrompt {
        let error = format_error(error);
        return BackendPrompt::new(format!(
            "You are a helpful AI assistant. Your task is to solve errors in the user's code using the following information: User Input: {user_input}, Code: {code}, Error: {error}."
        ));
    }
}

/// The user-side chat entry recorded next to the model's answer.
pub fn summarize_code_error(user_input: &str, code: &str, error: Option<&str>) -> String {
    let error = format_error(error);
    return format!("Help me with this code error:\nCode: {code}\nError: {error}\n{user_input}");
}

#[async_trait]
pub trait Backend {
    /// Returns the name of the backend.
    fn name(&self) -> BackendName;

    /// Used when a session starts to verify the backend is configured and
    /// reachable. Failures are reported, never fatal.
    async fn health_check(&self) -> Result<()>;

    /// Requests a single completion for the prompt. Streamed chunks are
    /// joined, the full generated text is returned once the backend is done.
    async fn get_completion(&self, prompt: BackendPrompt) -> Result<String>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
