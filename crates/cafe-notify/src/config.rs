//! Notifier timing configuration

use serde::{Deserialize, Serialize};

/// Delays that shape a notification's lifecycle, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Delay before the slide-in position is applied
    #[serde(default = "default_enter_delay")]
    pub enter_delay_ms: u64,

    /// Time from creation until the automatic dismissal
    #[serde(default = "default_auto_dismiss")]
    pub auto_dismiss_ms: u64,

    /// Length of the slide-out before the element is removed
    #[serde(default = "default_exit_transition")]
    pub exit_transition_ms: u64,
}

fn default_enter_delay() -> u64 {
    100
}

fn default_auto_dismiss() -> u64 {
    5_000
}

fn default_exit_transition() -> u64 {
    300
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enter_delay_ms: default_enter_delay(),
            auto_dismiss_ms: default_auto_dismiss(),
            exit_transition_ms: default_exit_transition(),
        }
    }
}
