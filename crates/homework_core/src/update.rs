use engine_logging::{engine_error, engine_info};
use serde_json::Value;

use crate::{format_status, validate_response, CycleError, Effect, Msg, NotificationKind, PollState};

/// Pure update function: applies one cycle's outcome to state and returns the
/// notifications to send, in order.
pub fn update(mut state: PollState, msg: Msg) -> (PollState, Vec<Effect>) {
    let mut effects = Vec::new();
    let outcome = match msg {
        Msg::ResponseReceived(response) => process_response(&mut state, &response, &mut effects),
        Msg::FetchFailed(message) => Err(CycleError::Fetch(message)),
    };

    match outcome {
        Ok(()) => state.clear_error(),
        Err(err) => {
            let text = failure_message(&err);
            engine_error!("{text}");
            if state.remember_error(&text) {
                effects.push(Effect::Notify {
                    kind: NotificationKind::Failure,
                    text,
                });
            } else {
                engine_info!("Failure unchanged since last report, chat not notified");
            }
        }
    }

    (state, effects)
}

/// Chat text reported for a failed cycle.
pub fn failure_message(err: &CycleError) -> String {
    format!("Сбой в работе программы: {err}")
}

// Records before a failing one keep their notifications.
fn process_response(
    state: &mut PollState,
    response: &Value,
    effects: &mut Vec<Effect>,
) -> Result<(), CycleError> {
    let records = validate_response(response)?;
    if records.is_empty() {
        engine_info!("No status update");
        return Ok(());
    }

    for record in records {
        let message = format_status(record)?;
        if state.remember_status(&message) {
            effects.push(Effect::Notify {
                kind: NotificationKind::StatusChanged,
                text: message,
            });
        } else {
            engine_info!("{message}");
        }
    }
    Ok(())
}
