use engine_logging::engine_error;
use serde_json::Value;

use crate::validate::json_type_name;
use crate::{CycleError, HomeworkStatus};

pub const HOMEWORK_NAME_FIELD: &str = "homework_name";
pub const STATUS_FIELD: &str = "status";

/// Build the chat message announcing the current status of one homework record.
pub fn format_status(record: &Value) -> Result<String, CycleError> {
    let Value::Object(fields) = record else {
        let err = CycleError::Schema(format!(
            "Запись о домашней работе не является словарём. Получен: {}",
            json_type_name(record)
        ));
        engine_error!("{err}");
        return Err(err);
    };

    for key in [HOMEWORK_NAME_FIELD, STATUS_FIELD] {
        if !fields.contains_key(key) {
            let err = CycleError::missing_field(key);
            engine_error!("{err}");
            return Err(err);
        }
    }

    let name = display_value(&fields[HOMEWORK_NAME_FIELD]);
    let status = &fields[STATUS_FIELD];
    match status.as_str().and_then(HomeworkStatus::from_code) {
        Some(status) => Ok(format!(
            "Изменился статус проверки работы \"{name}\". {}",
            status.verdict()
        )),
        None => {
            let err = CycleError::UnknownStatus {
                status: display_value(status),
            };
            engine_error!("{err}");
            Err(err)
        }
    }
}

// Strings render bare; anything else renders as its JSON text.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
