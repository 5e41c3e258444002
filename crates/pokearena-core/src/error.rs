//! Error types surfaced by the battle core.
//!
//! [`ServiceError`] describes how an external collaborator (roster store,
//! type-factor oracle) failed. [`BattleError`] is what the controller hands to
//! the UI; every variant is recoverable and leaves the session usable.

use std::time::Duration;

use thiserror::Error;

use crate::combatant::ElementType;
use crate::controller::Phase;
use crate::roster::TeamId;
use crate::team::Side;

/// Convenience alias for results returned by the controller.
pub type Result<T> = std::result::Result<T, BattleError>;

/// Failure reported by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service could not be reached or answered with a server error.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The service answered with data that could not be used.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// No answer arrived within the configured limit.
    #[error("no response within {after:?}")]
    TimedOut {
        /// The limit that expired.
        after: Duration,
    },
}

/// Errors returned by [`BattleController`](crate::controller::BattleController).
#[derive(Debug, Error)]
pub enum BattleError {
    /// A battle was started without a team chosen for both sides.
    #[error("two teams must be selected before starting a battle")]
    InvalidSelection,

    /// A roster could not be loaded. The session stays in `TeamsSelected`.
    #[error("failed to load roster for {side} (team {team_id})")]
    RosterFetchFailed {
        /// Side whose roster failed.
        side: Side,
        /// Team that was requested.
        team_id: TeamId,
        /// Underlying collaborator failure.
        #[source]
        source: ServiceError,
    },

    /// A roster loaded but contains no combatants.
    #[error("roster for {side} (team {team_id}) has no combatants")]
    EmptyRoster {
        /// Side whose roster is empty.
        side: Side,
        /// Team that was requested.
        team_id: TeamId,
    },

    /// A type factor lookup failed; the round was aborted without changes.
    #[error("type factor {attacker} -> {defender} unavailable")]
    TypeFactorUnavailable {
        /// Attacking element.
        attacker: ElementType,
        /// Defending element.
        defender: ElementType,
        /// Underlying collaborator failure.
        #[source]
        source: ServiceError,
    },

    /// The operation is not allowed in the controller's current phase.
    #[error("cannot {operation} while {phase}")]
    WrongPhase {
        /// What was attempted.
        operation: &'static str,
        /// Phase the controller was in.
        phase: Phase,
    },
}

impl BattleError {
    /// Returns true if retrying the same operation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RosterFetchFailed { .. } | Self::TypeFactorUnavailable { .. }
        )
    }
}
