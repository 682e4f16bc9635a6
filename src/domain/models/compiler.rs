use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Language;
use super::SessionError;

/// Body of `POST /compile`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileRequest {
    pub code: String,
    pub language: Language,
}

#[async_trait]
pub trait Compiler {
    /// Runs the code remotely and returns whatever it printed. An empty string
    /// means the program produced no output.
    ///
    /// Failures reported by the service come back as
    /// `SessionError::ExecutionService`, failures to reach it as
    /// `SessionError::Transport`.
    async fn compile(&self, request: &CompileRequest) -> Result<String, SessionError>;
}

pub type CompilerBox = Box<dyn Compiler + Send + Sync>;
