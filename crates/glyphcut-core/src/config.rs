//! Engine configuration
//!
//! Shaped rendering waits for both engines to be installed before it
//! gives up. The wait defaults to five seconds and can be changed at
//! startup through the environment:
//!
//! ```bash
//! GLYPHCUT_SHAPING_TIMEOUT_MS=250 ./my_app
//! ```
//!
//! Callers that build a [`EngineConfig`] themselves are not affected by
//! the variable.

use std::sync::OnceLock;
use std::time::Duration;

/// Environment variable overriding the shaping readiness timeout
pub const SHAPING_TIMEOUT_ENV: &str = "GLYPHCUT_SHAPING_TIMEOUT_MS";

/// Used when the environment does not say otherwise
pub const DEFAULT_SHAPING_TIMEOUT: Duration = Duration::from_secs(5);

/// Value read from the environment on first use
static ENV_TIMEOUT: OnceLock<Duration> = OnceLock::new();

fn env_timeout() -> Duration {
    *ENV_TIMEOUT.get_or_init(|| match std::env::var(SHAPING_TIMEOUT_ENV) {
        Ok(value) => match parse_timeout_ms(&value) {
            Some(timeout) => {
                log::info!("Shaping readiness timeout set to {timeout:?} via {SHAPING_TIMEOUT_ENV}");
                timeout
            },
            None => {
                log::warn!("Ignoring {SHAPING_TIMEOUT_ENV}={value:?}; expected milliseconds");
                DEFAULT_SHAPING_TIMEOUT
            },
        },
        Err(_) => DEFAULT_SHAPING_TIMEOUT,
    })
}

/// Parse a millisecond count such as `"1500"`
pub fn parse_timeout_ms(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_millis)
}

/// Knobs that govern how a render context deals with its engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// How long shaped rendering waits for the bidi and shaping engines
    pub shaping_ready_timeout: Duration,
}

impl EngineConfig {
    pub fn with_shaping_timeout(timeout: Duration) -> Self {
        Self {
            shaping_ready_timeout: timeout,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            shaping_ready_timeout: env_timeout(),
        }
    }
}
