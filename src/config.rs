//! Runtime configuration.
//!
//! The endpoint and timeout come from the command line or their environment
//! fallbacks (see [`crate::cli`]). Log routing is environment-only since it
//! must be known before anything else runs.

use std::path::PathBuf;
use std::time::Duration;

use crate::CardioError;

/// Default request timeout for the prediction service.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const LOG_MODE_ENV: &str = "CARDIOCHECK_LOG_MODE";
const LOG_FILE_ENV: &str = "CARDIOCHECK_LOG_FILE";
const DEFAULT_LOG_FILE: &str = "cardiocheck.log";

/// Settings for talking to the prediction service.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Prediction endpoint; `None` when not configured.
    pub api_url: Option<String>,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    #[must_use]
    pub fn new(api_url: Option<String>, timeout_secs: u64) -> Self {
        Self {
            api_url: api_url.filter(|u| !u.trim().is_empty()),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// The configured endpoint, checked to be an absolute http(s) URL.
    ///
    /// # Errors
    /// Returns `CardioError::Config` if the URL is missing or malformed.
    pub fn endpoint(&self) -> Result<&str, CardioError> {
        let url = self.api_url.as_deref().ok_or_else(|| {
            CardioError::Config(
                "prediction endpoint not set (use --api-url or CARDIOCHECK_API_URL)".to_string(),
            )
        })?;

        let parsed = reqwest::Url::parse(url)
            .map_err(|e| CardioError::Config(format!("invalid prediction endpoint: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CardioError::Config(format!(
                "prediction endpoint must use http or https, got {}",
                parsed.scheme()
            )));
        }

        Ok(url)
    }
}

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogMode {
    /// File when running the interactive form, stderr otherwise
    Auto,
    File,
    Stdout,
    Stderr,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            "stderr" => Self::Stderr,
            _ => Self::Auto,
        }
    }
}

/// Resolved log destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    File(PathBuf),
    Stdout,
    Stderr,
}

#[derive(Debug, Clone)]
pub struct LogSettings {
    pub mode: LogMode,
    pub file: PathBuf,
}

impl LogSettings {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(LOG_MODE_ENV).ok().as_deref(),
            std::env::var(LOG_FILE_ENV).ok().as_deref(),
        )
    }

    fn from_values(mode: Option<&str>, file: Option<&str>) -> Self {
        Self {
            mode: mode.map(LogMode::parse).unwrap_or(LogMode::Auto),
            file: PathBuf::from(file.unwrap_or(DEFAULT_LOG_FILE)),
        }
    }

    /// Pick the sink. Writing logs to the terminal would corrupt the form,
    /// so `Auto` uses the file whenever the form owns an interactive screen.
    #[must_use]
    pub fn sink(&self, owns_terminal: bool) -> LogSink {
        match self.mode {
            LogMode::File => LogSink::File(self.file.clone()),
            LogMode::Stdout => LogSink::Stdout,
            LogMode::Stderr => LogSink::Stderr,
            LogMode::Auto if owns_terminal => LogSink::File(self.file.clone()),
            LogMode::Auto => LogSink::Stderr,
        }
    }
}
