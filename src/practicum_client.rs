use crate::error::{HomeworkError, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Source of homework review statuses.
#[async_trait]
pub trait HomeworkApi {
    /// Returns the raw answer for homeworks updated since `from_date`.
    async fn get_api_answer(&self, from_date: i64) -> Result<Value>;
}

pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: String, token: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(HomeworkError::HttpClient)?;
        Ok(PracticumClient {
            client,
            endpoint,
            token,
        })
    }

    fn unreachable(&self, from_date: i64, source: reqwest::Error) -> HomeworkError {
        HomeworkError::UnableToReachApi {
            endpoint: self.endpoint.clone(),
            headers: vec![(AUTHORIZATION.to_string(), "OAuth ***".to_string())],
            params: vec![("from_date".to_string(), from_date.to_string())],
            source,
        }
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn get_api_answer(&self, from_date: i64) -> Result<Value> {
        debug!("requesting {} from_date={}", self.endpoint, from_date);
        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|source| self.unreachable(from_date, source))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| self.unreachable(from_date, source))?;
        interpret_response(status, &body)
    }
}

fn interpret_response(status: StatusCode, body: &str) -> Result<Value> {
    if status != StatusCode::OK {
        let details = serde_json::from_str::<Value>(body).unwrap_or(Value::Null);
        return Err(HomeworkError::InvalidHttpStatus {
            status: status.as_u16(),
            code: field_as_string(&details, "code"),
            message: field_as_string(&details, "message"),
        });
    }
    serde_json::from_str(body).map_err(HomeworkError::InvalidJson)
}

fn field_as_string(details: &Value, key: &str) -> Option<String> {
    match details.get(key)? {
        Value::String(text) => Some(text.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
