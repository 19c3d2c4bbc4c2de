use crate::error::{HomeworkError, Result};
use crate::notification::{send_message, Notifier};
use crate::practicum_client::HomeworkApi;
use crate::status::parse_status;
use crate::validation::check_response;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Debug, PartialEq)]
pub enum CycleOutcome {
    /// The API reported no homework updates since the cursor.
    NoHomeworks,
    Notified,
    /// The composed text matched the last delivered message.
    Unchanged,
    Failed,
}

/// Fetch, validate, extract and notify, once per `retry` interval.
///
/// The cursor and the last delivered message live only as long as the
/// process does.
pub struct Poller<A, N> {
    api: A,
    notifier: N,
    chat_id: String,
    retry: Duration,
    cursor: i64,
    last_message: Option<String>,
    clock: fn() -> i64,
}

impl<A, N> Poller<A, N>
where
    A: HomeworkApi + Sync,
    N: Notifier + Sync,
{
    pub fn new(api: A, notifier: N, chat_id: String, retry: Duration) -> Self {
        Poller {
            api,
            notifier,
            chat_id,
            retry,
            cursor: now(),
            last_message: None,
            clock: now,
        }
    }

    #[cfg(test)]
    fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self.cursor = clock();
        self
    }

    #[cfg(test)]
    fn cursor(&self) -> i64 {
        self.cursor
    }

    pub async fn run(mut self) {
        info!(
            "polling homework statuses every {} seconds",
            self.retry.as_secs()
        );
        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.retry).await;
        }
    }

    /// Runs one cycle. The next window starts when this request was sent,
    /// so updates made during a slow round-trip are not skipped.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let started = (self.clock)();
        let result = self.check_homeworks().await;
        self.cursor = self.cursor.max(started);
        debug!("next request from_date={}", self.cursor);
        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                self.handle_error(e).await;
                CycleOutcome::Failed
            }
        }
    }

    async fn check_homeworks(&mut self) -> Result<CycleOutcome> {
        let response = self.api.get_api_answer(self.cursor).await?;
        let answer = check_response(response)?;
        info!(
            "received {} homework update(s), current_date={}",
            answer.homeworks.len(),
            answer.current_date
        );
        let homework = match answer.homeworks.first() {
            Some(homework) => homework,
            None => return Ok(CycleOutcome::NoHomeworks),
        };
        let message = parse_status(homework)?;
        self.deliver(message).await
    }

    async fn deliver(&mut self, message: String) -> Result<CycleOutcome> {
        if self.last_message.as_deref() == Some(message.as_str()) {
            debug!("not repeating message: {}", message);
            return Ok(CycleOutcome::Unchanged);
        }
        send_message(&self.notifier, &self.chat_id, &message).await?;
        self.last_message = Some(message);
        Ok(CycleOutcome::Notified)
    }

    async fn handle_error(&mut self, e: HomeworkError) {
        error!("{}", e);
        if !e.is_reportable() {
            return;
        }
        let report = format!("Program failure: {}", e);
        if let Err(e) = self.deliver(report).await {
            error!("{}", e);
        }
    }
}

fn now() -> i64 {
    Utc::now().timestamp()
}
