#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use super::Language;
use super::Lifecycle;
use super::Phase;
use super::Transcript;

pub const RUNNING_TEXT: &str = "Running code...";
pub const IDLE_TEXT: &str = "Ready to run your code...";

/// The one thing the terminal panel shows, picked by
/// running > error > output > idle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalView<'a> {
    Running,
    Error(&'a str),
    Output(&'a str),
    Idle,
}

impl<'a> TerminalView<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            TerminalView::Running => return RUNNING_TEXT,
            TerminalView::Error(text) => return text,
            TerminalView::Output(text) => return text,
            TerminalView::Idle => return IDLE_TEXT,
        }
    }
}

/// Canonical state of one editing session. Field writes outside of this
/// module go through the execution and assist controllers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    code: String,
    language: Language,
    active_file: String,
    pub(crate) output: String,
    pub(crate) execution_error: Option<String>,
    pub(crate) execution: Lifecycle,
    pub(crate) chat: Transcript,
    pub(crate) assist: Lifecycle,
    pub(crate) last_assist_error: Option<String>,
}

impl Default for SessionState {
    fn default() -> SessionState {
        return SessionState::new(Language::default());
    }
}

impl SessionState {
    pub fn new(language: Language) -> SessionState {
        return SessionState::with_code(language, language.template().code);
    }

    /// Starts a session from a previously persisted buffer.
    pub fn with_code(language: Language, code: &str) -> SessionState {
        return SessionState {
            code: code.to_string(),
            language,
            active_file: language.file_name(),
            output: "".to_string(),
            execution_error: None,
            execution: Lifecycle::default(),
            chat: Transcript::default(),
            assist: Lifecycle::default(),
            last_assist_error: None,
        };
    }

    pub fn code(&self) -> &str {
        return &self.code;
    }

    pub fn language(&self) -> Language {
        return self.language;
    }

    pub fn active_file(&self) -> &str {
        return &self.active_file;
    }

    pub fn output(&self) -> &str {
        return &self.output;
    }

    pub fn execution_error(&self) -> Option<&str> {
        return self.execution_error.as_deref();
    }

    pub fn is_running(&self) -> bool {
        return self.execution.is_pending();
    }

    pub fn execution_phase(&self) -> Phase {
        return self.execution.phase();
    }

    pub fn chat(&self) -> &Transcript {
        return &self.chat;
    }

    pub fn is_assisting(&self) -> bool {
        return self.assist.is_pending();
    }

    pub fn assist_phase(&self) -> Phase {
        return self.assist.phase();
    }

    pub fn last_assist_error(&self) -> Option<&str> {
        return self.last_assist_error.as_deref();
    }

    /// Whether the run trigger should be enabled.
    pub fn can_run(&self) -> bool {
        return !self.is_running() && !self.code.is_empty();
    }

    pub fn terminal_view(&self) -> TerminalView<'_> {
        if self.is_running() {
            return TerminalView::Running;
        }

        if let Some(err) = &self.execution_error {
            return TerminalView::Error(err);
        }

        if !self.output.is_empty() {
            return TerminalView::Output(&self.output);
        }

        return TerminalView::Idle;
    }

    /// Replaces the buffer after an edit. Output describing the previous
    /// buffer is dropped, and so is the result of a run still in flight for
    /// it. Re-setting identical code changes nothing.
    pub fn set_code(&mut self, code: &str) {
        if code == self.code {
            return;
        }

        self.code = code.to_string();
        self.clear_output();
        if self.execution.supersede() {
            tracing::debug!("Superseded in-flight run after an edit");
        }
    }

    /// Resets the buffer to the language template, clears output and moves
    /// the active file in one step. A run still in flight is superseded so its
    /// result is never shown against the new language. Switching to the
    /// active language changes nothing and returns false.
    pub fn switch_language(&mut self, language: Language) -> bool {
        if language == self.language {
            return false;
        }

        self.language = language;
        self.code = language.template().code.to_string();
        self.active_file = language.file_name();
        self.clear_output();
        if self.execution.supersede() {
            tracing::debug!(language = %language, "Superseded in-flight run");
        }

        return true;
    }

    pub fn clear_output(&mut self) {
        self.output = "".to_string();
        self.execution_error = None;
    }

    pub fn clear_chat(&mut self) {
        self.chat.clear();
    }

    pub fn clear_assist_error(&mut self) {
        self.last_assist_error = None;
    }
}
