use super::AssistController;
use super::AssistOutcome;
use crate::domain::models::Role;
use crate::domain::models::SessionError;
use crate::domain::models::SessionState;
use crate::domain::services::fakes::FakeBackend;

fn failed_run_state() -> SessionState {
    let mut state = SessionState::default();
    state.set_code("print(x)");
    state.output = "Error: x".to_string();
    state.execution_error = Some("Error: x".to_string());
    return state;
}

#[tokio::test]
async fn it_appends_the_exchange_on_success() {
    let backend = FakeBackend::answering("Try Y");
    let controller = AssistController::new(Box::new(backend.clone()));
    let mut state = failed_run_state();

    let outcome = controller.submit_assist(&mut state, "fix this").await;

    assert_eq!(outcome, AssistOutcome::Answered("Try Y".to_string()));
    assert!(!state.is_assisting());

    let messages = state.chat().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role(), Role::User);
    assert!(messages[0].content().contains("fix this"));
    assert_eq!(messages[1].role(), Role::Assistant);
    assert_eq!(messages[1].content(), "Try Y");
    assert!(messages[1].id() > messages[0].id());

    insta::assert_snapshot!(messages[0].content(), @r###"
    Help me with this code error:
    Code: print(x)
    Error: Error: x
    fix this
    "###);

    let prompts = backend.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("User Input: fix this, Code: print(x), Error: Error: x."));
}

#[tokio::test]
async fn it_records_failures_without_touching_the_transcript() {
    let controller = AssistController::new(Box::new(FakeBackend::failing("request timed out")));
    let mut state = failed_run_state();
    state.chat.push(Role::User, "older");

    let outcome = controller.submit_assist(&mut state, "fix this").await;

    assert_eq!(outcome, AssistOutcome::Failed("request timed out".to_string()));
    assert_eq!(state.chat().len(), 1);
    assert_eq!(state.last_assist_error(), Some("request timed out"));
    assert!(!state.is_assisting());

    assert_eq!(state.execution_error(), Some("Error: x"));
    assert_eq!(state.output(), "Error: x");
}

#[tokio::test]
async fn it_grows_the_transcript_by_two_per_success() {
    let controller = AssistController::new(Box::new(FakeBackend::answering("ok")));
    let mut state = SessionState::default();

    for idx in 1..=3 {
        controller.submit_assist(&mut state, "again").await;
        assert_eq!(state.chat().len(), idx * 2);
    }
}

#[tokio::test]
async fn it_clears_the_previous_error_on_submit() {
    let controller = AssistController::new(Box::new(FakeBackend::answering("ok")));
    let mut state = SessionState::default();
    state.last_assist_error = Some("old".to_string());

    controller.submit_assist(&mut state, "retry").await;

    assert_eq!(state.last_assist_error(), None);
}

#[test]
fn it_ignores_the_execution_gate() {
    let mut state = SessionState::default();
    state.execution.begin().unwrap();

    let pending = AssistController::begin(&mut state, "while running");

    assert!(pending.is_ok());
    assert!(state.is_assisting());
    assert!(state.is_running());
}

#[tokio::test]
async fn it_rejects_overlapping_assists() {
    let controller = AssistController::new(Box::new(FakeBackend::answering("ok")));
    let mut state = SessionState::default();
    let pending = AssistController::begin(&mut state, "first").unwrap();

    assert_eq!(
        AssistController::begin(&mut state, "second").err(),
        Some(SessionError::Busy(crate::domain::models::RequestKind::Assist))
    );
    assert_eq!(
        controller.submit_assist(&mut state, "third").await,
        AssistOutcome::Busy
    );

    let outcome = AssistController::complete(
        &mut state,
        pending.ticket,
        &pending.summary,
        Ok("answer".to_string()),
    );
    assert_eq!(outcome, AssistOutcome::Answered("answer".to_string()));
    assert_eq!(state.chat().len(), 2);
}

#[test]
fn it_ignores_stale_assist_results() {
    let mut state = SessionState::default();
    let pending = AssistController::begin(&mut state, "first").unwrap();
    AssistController::complete(&mut state, pending.ticket, &pending.summary, Ok("a".to_string()));

    let outcome = AssistController::complete(
        &mut state,
        pending.ticket,
        &pending.summary,
        Ok("b".to_string()),
    );

    assert_eq!(outcome, AssistOutcome::Discarded);
    assert_eq!(state.chat().len(), 2);
}
