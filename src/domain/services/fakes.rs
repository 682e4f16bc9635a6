use std::sync::Arc;
use std::sync::Mutex;

use anyhow::anyhow;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Notify;

use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::BackendPrompt;
use crate::domain::models::CompileRequest;
use crate::domain::models::Compiler;
use crate::domain::models::SessionError;

/// Answers every compile with a fixed result. With a gate set, each call
/// waits for `gate.notify_one()` before answering.
#[derive(Clone)]
pub struct FakeCompiler {
    pub result: Result<String, SessionError>,
    pub gate: Option<Arc<Notify>>,
    pub requests: Arc<Mutex<Vec<CompileRequest>>>,
}

impl FakeCompiler {
    pub fn answering(result: Result<String, SessionError>) -> FakeCompiler {
        return FakeCompiler {
            result,
            gate: None,
            requests: Arc::new(Mutex::new(vec![])),
        };
    }

    pub fn gated(result: Result<String, SessionError>, gate: Arc<Notify>) -> FakeCompiler {
        let mut compiler = FakeCompiler::answering(result);
        compiler.gate = Some(gate);
        return compiler;
    }
}

#[async_trait]
impl Compiler for FakeCompiler {
    async fn compile(&self, request: &CompileRequest) -> Result<String, SessionError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        return self.result.clone();
    }
}

#[derive(Clone)]
pub struct FakeBackend {
    pub reply: std::result::Result<String, String>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeBackend {
    pub fn answering(reply: &str) -> FakeBackend {
        return FakeBackend {
            reply: Ok(reply.to_string()),
            prompts: Arc::new(Mutex::new(vec![])),
        };
    }

    pub fn failing(err: &str) -> FakeBackend {
        let mut backend = FakeBackend::answering("");
        backend.reply = Err(err.to_string());
        return backend;
    }
}

#[async_trait]
impl Backend for FakeBackend {
    fn name(&self) -> BackendName {
        return BackendName::Gemini;
    }

    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn get_completion(&self, prompt: BackendPrompt) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.text);

        return match &self.reply {
            Ok(reply) => Ok(reply.to_string()),
            Err(err) => Err(anyhow!(err.to_string())),
        };
    }
}
