use thiserror::Error;

pub type Result<T> = std::result::Result<T, HomeworkError>;

#[derive(Debug, Error)]
pub enum HomeworkError {
    #[error("required configuration is missing: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error(
        "unable to reach API at {endpoint} (headers: {headers:?}, params: {params:?}): {source}"
    )]
    UnableToReachApi {
        endpoint: String,
        headers: Vec<(String, String)>,
        params: Vec<(String, String)>,
        #[source]
        source: reqwest::Error,
    },

    #[error(
        "API answered with HTTP {status}, code: {}, message: {}",
        .code.as_deref().unwrap_or("-"),
        .message.as_deref().unwrap_or("-")
    )]
    InvalidHttpStatus {
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },

    #[error("API answered with invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("API response is not a JSON object")]
    MalformedResponse,

    #[error("key `{0}` is missing from the API response")]
    MissingField(&'static str),

    #[error("key `{field}` of the API response is not {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("homework record is not a JSON object")]
    MalformedHomework,

    #[error("homework record has no string `{0}`")]
    MissingHomeworkField(&'static str),

    #[error("unknown homework status `{0}`")]
    UnknownHomeworkStatus(String),

    #[error("failed to send message to Telegram: {0}")]
    SendMessageFailure(String),
}

impl HomeworkError {
    /// Whether the failure should be forwarded to the operator chat.
    ///
    /// Delivery failures are only logged, reporting them through the same
    /// channel could fail forever.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, HomeworkError::SendMessageFailure(_))
    }
}
