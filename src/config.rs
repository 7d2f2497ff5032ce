//! Tunables for the game loop.

use std::time::Duration;

use wanted_core::{MenuScript, RetryPolicy, probe};

/// Everything the controller needs to know that is not a collaborator.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Color-probe distance bound; at or past it the poster counts as
    /// "not there yet".
    pub probe_threshold: f64,
    /// Minimum box confidence worth clicking on.
    pub min_click_confidence: f64,
    /// Poll cadence while waiting for the wanted poster.
    pub identity_poll: RetryPolicy,
    /// Poll cadence while waiting for a clickable box.
    pub position_poll: RetryPolicy,
    /// Down/up separation for every synthetic click.
    pub click_settle: Duration,
    /// Pause after a successful click before the next round starts.
    pub post_click_grace: Duration,
    /// Menu navigation run once at startup.
    pub script: MenuScript,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            probe_threshold: probe::DEFAULT_DISTANCE_THRESHOLD,
            min_click_confidence: 0.9,
            identity_poll: RetryPolicy::unbounded(Duration::from_secs(1)),
            position_poll: RetryPolicy::unbounded(Duration::from_millis(500)),
            click_settle: Duration::from_millis(100),
            post_click_grace: Duration::from_millis(4500),
            script: MenuScript::wanted_minigame(),
        }
    }
}
