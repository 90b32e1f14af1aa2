use engine_logging::engine_error;
use serde_json::Value;

use crate::CycleError;

/// Field of the API response holding the list of homework records.
pub const HOMEWORKS_FIELD: &str = "homeworks";

/// Check the top-level shape of an API response and borrow its homework list.
pub fn validate_response(response: &Value) -> Result<&[Value], CycleError> {
    let Value::Object(fields) = response else {
        let err = CycleError::Schema(format!(
            "Тип данных в ответе не соответствует ожидаемому. Получен: {}",
            json_type_name(response)
        ));
        engine_error!("{err}");
        return Err(err);
    };

    let Some(homeworks) = fields.get(HOMEWORKS_FIELD) else {
        let err = CycleError::missing_field(HOMEWORKS_FIELD);
        engine_error!("{err}");
        return Err(err);
    };

    match homeworks {
        Value::Array(records) => Ok(records.as_slice()),
        other => {
            let err = CycleError::Schema(format!(
                "В ответе домашки приходят не в виде списка. Получен: {}",
                json_type_name(other)
            ));
            engine_error!("{err}");
            Err(err)
        }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
