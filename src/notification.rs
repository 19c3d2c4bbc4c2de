use crate::error::{HomeworkError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

#[async_trait]
pub trait Notifier {
    async fn notify(&self, chat_id: &str, message: &str) -> Result<()>;
}

#[derive(Deserialize, Debug)]
struct TelegramResponse {
    ok: bool,
    description: Option<String>,
}

pub struct TelegramClient {
    client: Client,
    url: String,
}

impl TelegramClient {
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let url = format!("{}/bot{}/sendMessage", api_url.trim_end_matches('/'), token);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(HomeworkError::HttpClient)?;
        Ok(TelegramClient { client, url })
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn notify(&self, chat_id: &str, message: &str) -> Result<()> {
        // Transport errors embed the request URL, which carries the bot token.
        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({
                "chat_id": chat_id,
                "text": message,
            }))
            .send()
            .await
            .map_err(|e| HomeworkError::SendMessageFailure(e.without_url().to_string()))?;
        let status = response.status();
        let body = response
            .json::<TelegramResponse>()
            .await
            .map_err(|e| {
                HomeworkError::SendMessageFailure(format!("HTTP {}: {}", status, e.without_url()))
            })?;
        if !status.is_success() || !body.ok {
            return Err(HomeworkError::SendMessageFailure(format!(
                "HTTP {}: {}",
                status,
                body.description.unwrap_or_else(|| "no description".to_string())
            )));
        }
        Ok(())
    }
}

/// Delivers `message`, logging successful deliveries. Every failure comes
/// back as [`HomeworkError::SendMessageFailure`] for the caller to log.
pub async fn send_message<N>(notifier: &N, chat_id: &str, message: &str) -> Result<()>
where
    N: Notifier + Sync + ?Sized,
{
    match notifier.notify(chat_id, message).await {
        Ok(()) => {
            info!("message sent to Telegram chat {}", chat_id);
            Ok(())
        }
        Err(e @ HomeworkError::SendMessageFailure(_)) => Err(e),
        Err(e) => Err(HomeworkError::SendMessageFailure(e.to_string())),
    }
}
