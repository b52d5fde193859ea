//! Session timing policy.

use std::time::Duration;

/// Quiet period after the last stroke before recognition runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Upper bound on one recognizer call.
pub const DEFAULT_RECOGNITION_TIMEOUT: Duration = Duration::from_secs(5);

/// Capacity of the handle → session command channel.
pub const COMMAND_BUFFER: usize = 64;

/// Canvas label shown before anything is recognized.
pub const PLACEHOLDER_TEXT: &str = "Draw symbols here";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub debounce: Duration,
    pub recognition_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            recognition_timeout: DEFAULT_RECOGNITION_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert!(config.recognition_timeout > config.debounce);
    }
}
