use crate::error::{HomeworkError, Result};
use serde_json::Value;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    pub fn code(&self) -> &'static str {
        match *self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match *self {
            HomeworkStatus::Approved => "Reviewer liked it, hooray!",
            HomeworkStatus::Reviewing => "The work has been taken for review.",
            HomeworkStatus::Rejected => "The reviewer has some remarks.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = HomeworkError;

    fn from_str(code: &str) -> Result<Self> {
        HomeworkStatus::ALL
            .iter()
            .find(|status| status.code() == code)
            .copied()
            .ok_or_else(|| HomeworkError::UnknownHomeworkStatus(code.to_string()))
    }
}

/// Composes the notification text for the latest homework record.
pub fn parse_status(homework: &Value) -> Result<String> {
    let record = homework
        .as_object()
        .ok_or(HomeworkError::MalformedHomework)?;
    let name = record
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(HomeworkError::MissingHomeworkField("homework_name"))?;
    let status = record
        .get("status")
        .and_then(Value::as_str)
        .ok_or(HomeworkError::MissingHomeworkField("status"))?
        .parse::<HomeworkStatus>()?;

    Ok(format!(
        "Changed status of review \"{name}\". {verdict}",
        name = name,
        verdict = status.verdict()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_status_for_every_known_status() {
        for status in HomeworkStatus::ALL.iter() {
            let homework = json!({"homework_name": "hw_python_oop", "status": status.code()});
            let text = parse_status(&homework).unwrap();
            assert!(text.contains("hw_python_oop"));
            assert!(text.contains(status.verdict()));
        }
    }

    #[test]
    fn test_parse_status_exact_text() {
        let homework = json!({"homework_name": "hw1", "status": "approved", "id": 7});
        assert_eq!(
            parse_status(&homework).unwrap(),
            "Changed status of review \"hw1\". Reviewer liked it, hooray!"
        );
    }

    #[test]
    fn test_parse_status_rejects_unknown_status() {
        let homework = json!({"homework_name": "hw1", "status": "lost"});
        match parse_status(&homework) {
            Err(HomeworkError::UnknownHomeworkStatus(status)) => assert_eq!(status, "lost"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_status_requires_name() {
        let homework = json!({"status": "approved"});
        assert!(matches!(
            parse_status(&homework),
            Err(HomeworkError::MissingHomeworkField("homework_name"))
        ));
    }

    #[test]
    fn test_parse_status_requires_status() {
        let homework = json!({"homework_name": "hw1"});
        assert!(matches!(
            parse_status(&homework),
            Err(HomeworkError::MissingHomeworkField("status"))
        ));
    }

    #[test]
    fn test_parse_status_rejects_non_object() {
        assert!(matches!(
            parse_status(&json!("hw1")),
            Err(HomeworkError::MalformedHomework)
        ));
    }
}
