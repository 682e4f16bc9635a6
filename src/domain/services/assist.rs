#[cfg(test)]
#[path = "assist_test.rs"]
mod tests;

use crate::domain::models::summarize_code_error;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendPrompt;
use crate::domain::models::RequestKind;
use crate::domain::models::Role;
use crate::domain::models::SessionError;
use crate::domain::models::SessionState;
use crate::domain::models::Settlement;
use crate::domain::models::Ticket;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssistOutcome {
    Answered(String),
    Failed(String),
    Busy,
    Discarded,
}

/// An assist request that holds the assist gate and still has to be sent.
pub struct PendingAssist {
    pub ticket: Ticket,
    pub prompt: BackendPrompt,
    /// User-side transcript entry, appended only if the backend answers.
    pub summary: String,
}

pub struct AssistController {
    backend: BackendBox,
}

impl AssistController {
    pub fn new(backend: BackendBox) -> AssistController {
        return AssistController { backend };
    }

    /// Takes the assist gate and builds the prompt from the current code and
    /// execution error. Does not look at the execution gate.
    pub fn begin(state: &mut SessionState, user_input: &str) -> Result<PendingAssist, SessionError> {
        let ticket = match state.assist.begin() {
            Some(ticket) => ticket,
            None => {
                tracing::warn!("Assist rejected, another assist request is in flight");
                return Err(SessionError::Busy(RequestKind::Assist));
            }
        };

        state.last_assist_error = None;

        let code = state.code();
        let error = state.execution_error();
        let pending = PendingAssist {
            ticket,
            prompt: BackendPrompt::for_code_error(user_input, code, error),
            summary: summarize_code_error(user_input, code, error),
        };

        tracing::debug!(sequence = ticket.sequence(), "Assist submitted");

        return Ok(pending);
    }

    pub async fn generate(&self, prompt: BackendPrompt) -> Result<String, SessionError> {
        return self.backend.get_completion(prompt).await.map_err(|err| {
            tracing::error!(backend = %self.backend.name(), error = ?err, "Assist request failed");
            return SessionError::AssistService(err.to_string());
        });
    }

    /// Appends the exchange on success, records the error on failure. The
    /// execution fields are never touched.
    pub fn complete(
        state: &mut SessionState,
        ticket: Ticket,
        summary: &str,
        result: Result<String, SessionError>,
    ) -> AssistOutcome {
        match state.assist.settle(ticket, result.is_ok()) {
            Settlement::Unknown | Settlement::Discarded => {
                tracing::warn!(sequence = ticket.sequence(), "Ignoring stale assist result");
                return AssistOutcome::Discarded;
            }
            Settlement::Applied => {}
        }

        match result {
            Ok(reply) => {
                state.chat.push(Role::User, summary);
                state.chat.push(Role::Assistant, &reply);
                tracing::debug!(sequence = ticket.sequence(), "Assist answered");

                return AssistOutcome::Answered(reply);
            }
            Err(err) => {
                let detail = err.to_string();
                state.last_assist_error = Some(detail.clone());

                return AssistOutcome::Failed(detail);
            }
        }
    }

    /// Full assist round trip against a session nothing else is touching.
    pub async fn submit_assist(&self, state: &mut SessionState, user_input: &str) -> AssistOutcome {
        let pending = match AssistController::begin(state, user_input) {
            Ok(pending) => pending,
            Err(_) => return AssistOutcome::Busy,
        };

        let result = self.generate(pending.prompt).await;
        return AssistController::complete(state, pending.ticket, &pending.summary, result);
    }
}
