/// What the poller remembers between cycles to avoid repeating itself in the chat.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PollState {
    last_status_message: Option<String>,
    last_error: Option<String>,
}

impl PollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary remembered status and error.
    pub fn with_memory(last_status_message: Option<String>, last_error: Option<String>) -> Self {
        Self {
            last_status_message,
            last_error,
        }
    }

    pub fn last_status_message(&self) -> Option<&str> {
        self.last_status_message.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns `true` when `message` differs from the remembered one and was stored.
    pub(crate) fn remember_status(&mut self, message: &str) -> bool {
        if self.last_status_message.as_deref() == Some(message) {
            return false;
        }
        self.last_status_message = Some(message.to_string());
        true
    }

    /// Returns `true` when `error` differs from the remembered one and was stored.
    pub(crate) fn remember_error(&mut self, error: &str) -> bool {
        if self.last_error.as_deref() == Some(error) {
            return false;
        }
        self.last_error = Some(error.to_string());
        true
    }

    pub(crate) fn clear_error(&mut self) {
        self.last_error = None;
    }
}
