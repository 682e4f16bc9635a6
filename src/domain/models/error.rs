use strum::Display;

/// Which single-flight lifecycle a request belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum RequestKind {
    Run,
    Assist,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The compile service answered with a failure status or an unusable body.
    #[error("{0}")]
    ExecutionService(String),

    /// The request never got an answer (connection, timeout, body read).
    #[error("{0}")]
    Transport(String),

    /// The generation backend failed or rejected the prompt.
    #[error("{0}")]
    AssistService(String),

    /// Integration mistake, such as an unsupported language id.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("A {0} request is already in flight")]
    Busy(RequestKind),
}
