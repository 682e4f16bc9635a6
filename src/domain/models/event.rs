use super::SessionError;
use super::SessionState;
use crate::domain::services::AssistOutcome;
use crate::domain::services::RunOutcome;

/// Notifications from the session to the presentation shell.
#[derive(Debug)]
pub enum Event {
    AssistSettled(AssistOutcome),
    /// An action was refused, for instance a run while one is in flight.
    Rejected(SessionError),
    RunSettled(RunOutcome),
    StateChanged(Box<SessionState>),
}
