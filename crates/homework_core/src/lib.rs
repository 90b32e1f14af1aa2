//! Homework core: pure validation, formatting and the notification state machine.
mod catalog;
mod effect;
mod error;
mod format;
mod msg;
mod state;
mod update;
mod validate;

pub use catalog::HomeworkStatus;
pub use effect::{Effect, NotificationKind};
pub use error::CycleError;
pub use format::{format_status, HOMEWORK_NAME_FIELD, STATUS_FIELD};
pub use msg::Msg;
pub use state::PollState;
pub use update::{failure_message, update};
pub use validate::{validate_response, HOMEWORKS_FIELD};
