//! Logging settings.

use serde::{Deserialize, Serialize};

fn default_filter() -> String {
    "info".to_owned()
}

const fn default_ansi() -> bool {
    true
}

/// Settings consumed by [`crate::telemetry::init`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `taskledger=debug`.
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Whether to emit ANSI colour codes.
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            ansi: default_ansi(),
        }
    }
}
