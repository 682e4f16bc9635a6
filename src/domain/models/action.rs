use super::Language;

/// Requests from the presentation shell to the session.
#[derive(Debug)]
pub enum Action {
    AssistRequest(String),
    ClearAssistError(),
    ClearChat(),
    ClearOutput(),
    RunCode(),
    SetCode(String),
    SwitchLanguage(Language),
}
