#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::anyhow;
use anyhow::Result;
use tokio::sync::mpsc;

use super::AssistController;
use super::ExecutionController;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::BackendName;
use crate::domain::models::Event;
use crate::domain::models::Language;
use crate::domain::models::SessionError;
use crate::domain::models::SessionState;
use crate::domain::models::StoreBox;
use crate::domain::models::StoreName;
use crate::domain::models::Ticket;
use crate::domain::models::SESSION_KEY;
use crate::infrastructure::backends::BackendManager;
use crate::infrastructure::compilers::remote::RemoteCompiler;
use crate::infrastructure::stores::StoreManager;

/// Results coming back from spawned request workers.
enum Completion {
    Run(Ticket, Result<String, SessionError>),
    Assist(Ticket, String, Result<String, SessionError>),
}

/// Sole owner of a session's state. Actions are applied in arrival order;
/// remote calls run on their own tasks and their results are applied back
/// here, so a run and an assist request can be outstanding at the same time
/// without either seeing a half-written state.
pub struct ActionsService {
    state: SessionState,
    execution: Arc<ExecutionController>,
    assist: Arc<AssistController>,
    store: StoreBox,
}

impl ActionsService {
    pub fn new(
        state: SessionState,
        execution: ExecutionController,
        assist: AssistController,
        store: StoreBox,
    ) -> ActionsService {
        return ActionsService {
            state,
            execution: Arc::new(execution),
            assist: Arc::new(assist),
            store,
        };
    }

    /// Reads the persisted buffer once. Without one, or when the store can't
    /// be read, the session starts from the language template.
    pub async fn restore(
        language: Language,
        execution: ExecutionController,
        assist: AssistController,
        store: StoreBox,
    ) -> ActionsService {
        let state = match store.load(SESSION_KEY).await {
            Ok(Some(code)) => SessionState::with_code(language, &code),
            Ok(None) => SessionState::new(language),
            Err(err) => {
                tracing::error!(store = %store.name(), error = ?err, "Failed to restore code");
                SessionState::new(language)
            }
        };

        return ActionsService::new(state, execution, assist, store);
    }

    /// Wires up the collaborators named by the loaded configuration.
    pub async fn from_config() -> Result<ActionsService> {
        let language = Language::parse(&Config::get(ConfigKey::Language))?;

        let backend_name = Config::get(ConfigKey::Backend);
        let backend = BackendManager::get(
            BackendName::parse(&backend_name)
                .ok_or_else(|| return anyhow!(format!("No backend named {backend_name}")))?,
        )?;
        if let Err(err) = backend.health_check().await {
            tracing::warn!(backend = backend_name, error = ?err, "Assist backend is unavailable");
        }

        let store_name = Config::get(ConfigKey::Store);
        let store = StoreManager::get(
            StoreName::parse(&store_name)
                .ok_or_else(|| return anyhow!(format!("No store named {store_name}")))?,
        )?;

        let execution = ExecutionController::new(Box::<RemoteCompiler>::default());
        let assist = AssistController::new(backend);

        return Ok(ActionsService::restore(language, execution, assist, store).await);
    }

    pub fn state(&self) -> &SessionState {
        return &self.state;
    }

    /// Publishes the initial state, then serves actions until the action
    /// channel closes.
    pub async fn start(
        mut self,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();
        self.publish(&tx)?;

        loop {
            tokio::select! {
                action = rx.recv() => {
                    match action {
                        Some(action) => self.handle_action(action, &tx, &done_tx).await?,
                        None => {
                            tracing::debug!("Action channel closed, ending session");
                            return Ok(());
                        }
                    }
                }
                Some(completion) = done_rx.recv() => {
                    self.handle_completion(completion, &tx)?;
                }
            }
        }
    }

    async fn handle_action(
        &mut self,
        action: Action,
        tx: &mpsc::UnboundedSender<Event>,
        done_tx: &mpsc::UnboundedSender<Completion>,
    ) -> Result<()> {
        match action {
            Action::SetCode(code) => {
                self.state.set_code(&code);
                self.persist_code().await;
            }
            Action::SwitchLanguage(language) => {
                if self.state.switch_language(language) {
                    self.persist_code().await;
                }
            }
            Action::RunCode() => {
                let pending = match ExecutionController::begin(&mut self.state) {
                    Ok(pending) => pending,
                    Err(err) => {
                        tx.send(Event::Rejected(err))?;
                        return Ok(());
                    }
                };

                let execution = self.execution.clone();
                let worker_tx = done_tx.clone();
                tokio::spawn(async move {
                    let result = execution.execute(&pending.request).await;
                    if worker_tx
                        .send(Completion::Run(pending.ticket, result))
                        .is_err()
                    {
                        tracing::debug!("Session ended before the run settled");
                    }
                });
            }
            Action::AssistRequest(user_input) => {
                let pending = match AssistController::begin(&mut self.state, &user_input) {
                    Ok(pending) => pending,
                    Err(err) => {
                        tx.send(Event::Rejected(err))?;
                        return Ok(());
                    }
                };

                let assist = self.assist.clone();
                let worker_tx = done_tx.clone();
                tokio::spawn(async move {
                    let result = assist.generate(pending.prompt).await;
                    if worker_tx
                        .send(Completion::Assist(pending.ticket, pending.summary, result))
                        .is_err()
                    {
                        tracing::debug!("Session ended before the assist request settled");
                    }
                });
            }
            Action::ClearOutput() => {
                self.state.clear_output();
            }
            Action::ClearChat() => {
                self.state.clear_chat();
            }
            Action::ClearAssistError() => {
                self.state.clear_assist_error();
            }
        }

        return self.publish(tx);
    }

    fn handle_completion(
        &mut self,
        completion: Completion,
        tx: &mpsc::UnboundedSender<Event>,
    ) -> Result<()> {
        match completion {
            Completion::Run(ticket, result) => {
                let outcome = ExecutionController::complete(&mut self.state, ticket, result);
                tx.send(Event::RunSettled(outcome))?;
            }
            Completion::Assist(ticket, summary, result) => {
                let outcome = AssistController::complete(&mut self.state, ticket, &summary, result);
                tx.send(Event::AssistSettled(outcome))?;
            }
        }

        return self.publish(tx);
    }

    fn publish(&self, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
        tx.send(Event::StateChanged(Box::new(self.state.clone())))?;
        return Ok(());
    }

    async fn persist_code(&self) {
        if let Err(err) = self.store.save(SESSION_KEY, self.state.code()).await {
            tracing::error!(store = %self.store.name(), error = ?err, "Failed to persist code");
        }
    }
}
