use crate::error::{HomeworkError, Result};
use serde_json::Value;

#[derive(Debug, PartialEq)]
pub struct ApiAnswer {
    pub homeworks: Vec<Value>,
    pub current_date: i64,
}

/// Checks the shape of a homework_statuses answer.
///
/// The order of the checks matters: a response without `homeworks` is
/// reported as such even when `current_date` is missing too.
pub fn check_response(response: Value) -> Result<ApiAnswer> {
    let mut response = match response {
        Value::Object(map) => map,
        _ => return Err(HomeworkError::MalformedResponse),
    };
    let homeworks = match response.remove("homeworks") {
        Some(Value::Array(homeworks)) => homeworks,
        Some(_) => {
            return Err(HomeworkError::WrongType {
                field: "homeworks",
                expected: "an array",
            })
        }
        None => return Err(HomeworkError::MissingField("homeworks")),
    };
    let current_date = response
        .get("current_date")
        .ok_or(HomeworkError::MissingField("current_date"))?
        .as_i64()
        .ok_or(HomeworkError::WrongType {
            field: "current_date",
            expected: "an integer",
        })?;

    Ok(ApiAnswer {
        homeworks,
        current_date,
    })
}
