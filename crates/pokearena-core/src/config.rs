//! Session configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Time limits applied to collaborator calls made by a battle session.
///
/// An expired limit is treated exactly like a failed call: the operation is
/// aborted and the session state is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Limit for each roster fetch when a battle starts.
    pub roster_timeout: Duration,
    /// Limit for each type-factor lookup during a round.
    pub factor_timeout: Duration,
}

impl SessionConfig {
    /// Default limit for roster fetches.
    pub const DEFAULT_ROSTER_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default limit for type-factor lookups.
    pub const DEFAULT_FACTOR_TIMEOUT: Duration = Duration::from_secs(5);

    /// Returns a copy with both limits set to `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.roster_timeout = timeout;
        self.factor_timeout = timeout;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            roster_timeout: Self::DEFAULT_ROSTER_TIMEOUT,
            factor_timeout: Self::DEFAULT_FACTOR_TIMEOUT,
        }
    }
}
