//! Configuration types for the portal HTTP client

use crate::error::{ClientError, ClientResult};
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry policy applied to idempotent (GET) requests
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one (1 = no retry)
    #[builder(default = 3)]
    pub max_attempts: u32,

    /// Delay before the first retry
    #[builder(default = Duration::from_millis(250))]
    #[serde(with = "duration_ms", rename = "initial_delay_ms")]
    pub initial_delay: Duration,

    /// Upper bound for any single delay
    #[builder(default = Duration::from_secs(5))]
    #[serde(with = "duration_ms", rename = "max_delay_ms")]
    pub max_delay: Duration,

    /// Exponential backoff multiplier
    #[builder(default = 2.0)]
    pub backoff_multiplier: f64,

    /// Jitter to add to delays (0.0 = no jitter, 1.0 = up to 100% jitter)
    #[builder(default = 0.1)]
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter: 0.1,
        }
    }
}

impl RetryConfig {
    /// A policy that sends every request exactly once
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Calculate the delay to wait after `attempt` failed attempts
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return self.jittered(self.initial_delay.as_secs_f64());
        }

        let delay_secs =
            self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(attempt as i32 - 1);

        self.jittered(delay_secs)
    }

    fn jittered(&self, delay_secs: f64) -> Duration {
        let max_delay_secs = self.max_delay.as_secs_f64();
        let delay_secs = delay_secs.min(max_delay_secs);

        let jitter_amount = delay_secs * self.jitter;
        let jittered_delay = delay_secs + (rand::random::<f64>() - 0.5) * 2.0 * jitter_amount;

        Duration::from_secs_f64(jittered_delay.clamp(0.0, max_delay_secs))
    }

    /// Check if another attempt may follow `attempt` completed attempts
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Validate the retry policy
    pub fn validate(&self) -> ClientResult<()> {
        if self.max_attempts == 0 {
            return Err(ClientError::configuration(
                "Retry max_attempts must be at least 1",
            ));
        }

        if self.backoff_multiplier < 1.0 {
            return Err(ClientError::configuration(
                "Backoff multiplier must be at least 1.0",
            ));
        }

        if !(0.0..=1.0).contains(&self.jitter) {
            return Err(ClientError::configuration(
                "Jitter must be between 0.0 and 1.0",
            ));
        }

        if self.initial_delay > self.max_delay {
            return Err(ClientError::configuration(
                "Initial retry delay must not exceed the maximum delay",
            ));
        }

        Ok(())
    }
}

/// Client configuration
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root URL of the portal API (e.g. `http://localhost:8000`)
    #[builder(into)]
    pub base_url: String,

    /// Timeout applied to every single attempt
    #[builder(default = Duration::from_secs(30))]
    #[serde(with = "duration_ms", rename = "request_timeout_ms")]
    pub request_timeout: Duration,

    /// Retry policy for idempotent requests
    #[builder(default)]
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}

impl ClientConfig {
    /// Create a new client configuration with the given base URL
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ClientResult<()> {
        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::invalid_url(format!(
                "unsupported scheme '{}' in {}",
                url.scheme(),
                self.base_url
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(ClientError::configuration(
                "Request timeout must be greater than zero",
            ));
        }

        self.retry.validate()
    }
}

/// (De)serializes a `Duration` as whole milliseconds
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
