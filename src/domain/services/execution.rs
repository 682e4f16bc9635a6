#[cfg(test)]
#[path = "execution_test.rs"]
mod tests;

use crate::domain::models::CompileRequest;
use crate::domain::models::CompilerBox;
use crate::domain::models::RequestKind;
use crate::domain::models::SessionError;
use crate::domain::models::SessionState;
use crate::domain::models::Settlement;
use crate::domain::models::Ticket;

pub const NO_OUTPUT: &str = "No output";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(String),
    /// Formatted `Error: <detail>` text, identical to what was written to
    /// both `output` and `execution_error`.
    Failed(String),
    /// Refused because another run holds the gate.
    Busy,
    /// The run was superseded or unknown, its result was dropped.
    Discarded,
}

/// A run that holds the execution gate and still has to be sent.
pub struct PendingRun {
    pub ticket: Ticket,
    pub request: CompileRequest,
}

pub struct ExecutionController {
    compiler: CompilerBox,
}

impl ExecutionController {
    pub fn new(compiler: CompilerBox) -> ExecutionController {
        return ExecutionController { compiler };
    }

    /// Takes the execution gate, clears previous results and snapshots the
    /// request payload.
    pub fn begin(state: &mut SessionState) -> Result<PendingRun, SessionError> {
        let ticket = match state.execution.begin() {
            Some(ticket) => ticket,
            None => {
                tracing::warn!("Run rejected, another run is in flight");
                return Err(SessionError::Busy(RequestKind::Run));
            }
        };

        state.clear_output();

        let request = CompileRequest {
            code: state.code().to_string(),
            language: state.language(),
        };

        tracing::debug!(
            sequence = ticket.sequence(),
            language = %request.language,
            "Run submitted"
        );

        return Ok(PendingRun { ticket, request });
    }

    /// Sends the request. Holds no session state so runs can overlap with
    /// other work on the session.
    pub async fn execute(&self, request: &CompileRequest) -> Result<String, SessionError> {
        return self.compiler.compile(request).await;
    }

    /// Records the result of a run and always releases the gate if the ticket
    /// is the one in flight.
    pub fn complete(
        state: &mut SessionState,
        ticket: Ticket,
        result: Result<String, SessionError>,
    ) -> RunOutcome {
        match state.execution.settle(ticket, result.is_ok()) {
            Settlement::Unknown => {
                tracing::warn!(sequence = ticket.sequence(), "Ignoring result for unknown run");
                return RunOutcome::Discarded;
            }
            Settlement::Discarded => {
                tracing::debug!(sequence = ticket.sequence(), "Dropping superseded run result");
                return RunOutcome::Discarded;
            }
            Settlement::Applied => {}
        }

        match result {
            Ok(message) => {
                let output = if message.is_empty() {
                    NO_OUTPUT.to_string()
                } else {
                    message
                };

                state.output = output.clone();
                state.execution_error = None;
                tracing::debug!(sequence = ticket.sequence(), "Run completed");

                return RunOutcome::Completed(output);
            }
            Err(err) => {
                let text = format!("Error: {err}");
                state.execution_error = Some(text.clone());
                state.output = text.clone();
                tracing::debug!(sequence = ticket.sequence(), error = %err, "Run failed");

                return RunOutcome::Failed(text);
            }
        }
    }

    /// Full run against a session nothing else is touching.
    pub async fn submit_run(&self, state: &mut SessionState) -> RunOutcome {
        let pending = match ExecutionController::begin(state) {
            Ok(pending) => pending,
            Err(_) => return RunOutcome::Busy,
        };

        let result = self.execute(&pending.request).await;
        return ExecutionController::complete(state, pending.ticket, result);
    }
}
