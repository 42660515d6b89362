use ::scraper::error::SelectorErrorKind;

/// Coarse classification of a [`StatsError`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The upstream source could not be reached or answered with a failure.
    Fetch,
    /// The upstream answered, but with a payload we could not make sense of.
    Parse,
    /// The canonical profile lookup has no such user.
    UserNotFound,
}

/// All errors that can occur while acquiring a user's statistics.
#[derive(thiserror::Error, Debug)]
pub enum StatsError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("{platform} answered {status} for {url}")]
    UnexpectedStatus {
        platform: crate::model::Source,
        url: String,
        status: reqwest::StatusCode,
    },

    /// A configured base URL could not be turned into a profile URL.
    #[error("invalid url {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// Failed to read or decode the response body.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// Launching, driving or evaluating inside the headless browser failed.
    #[error("headless browser failed: {0}")]
    Browser(String),

    /// The upstream payload did not have the minimal expected shape.
    #[error("unexpected payload for {context}: {message}")]
    Payload {
        context: &'static str,
        message: String,
    },

    /// The LeetCode submission calendar was not valid JSON.
    #[error("failed to parse submission calendar: {0}")]
    Calendar(#[from] serde_json::Error),

    /// The canonical (LeetCode) lookup returned no matching user.
    #[error("{message}")]
    UserNotFound { username: String, message: String },
}

impl StatsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatsError::Http { .. }
            | StatsError::UnexpectedStatus { .. }
            | StatsError::ResponseBody { .. }
            | StatsError::InvalidUrl { .. }
            | StatsError::Browser(_) => ErrorKind::Fetch,
            StatsError::Selector(_) | StatsError::Payload { .. } | StatsError::Calendar(_) => {
                ErrorKind::Parse
            }
            StatsError::UserNotFound { .. } => ErrorKind::UserNotFound,
        }
    }

    pub(crate) fn payload(context: &'static str, message: impl ToString) -> Self {
        StatsError::Payload {
            context,
            message: message.to_string(),
        }
    }
}

impl<'a> From<SelectorErrorKind<'a>> for StatsError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        StatsError::Selector(err.to_string())
    }
}

impl From<chromiumoxide::error::CdpError> for StatsError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        StatsError::Browser(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
