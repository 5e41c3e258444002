//! Battle controller: the session lifecycle.
//!
//! The controller is the only surface a UI talks to. It owns the collaborator
//! handles, the team selection and the current [`BattleSession`], and moves
//! through these phases:
//!
//! ```text
//!   Idle ──select both──▶ TeamsSelected ──start──▶ InProgress ──winner──▶ Concluded
//!    ▲                                                                        │
//!    └──────────────────────────────── new_battle ────────────────────────────┘
//! ```
//!
//! `new_battle` returns to `Idle` from any phase.
//!
//! # Failure handling
//!
//! Every collaborator call is bounded by [`SessionConfig`]. A failed or timed
//! out roster fetch leaves the controller in `TeamsSelected`; a failed type
//! factor lookup aborts the round before anything is mutated, so the caller
//! can simply retry.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::error::{BattleError, Result, ServiceError};
use crate::history::RoundSnapshot;
use crate::oracle::{lookup_pair, TypeFactorOracle};
use crate::roster::{RosterStore, TeamId};
use crate::session::{BattleSession, RoundReport};
use crate::team::{Side, Team};

// =============================================================================
// Phase and selection
// =============================================================================

/// Lifecycle phase of a [`BattleController`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No complete team selection.
    Idle,
    /// A team is chosen for both sides; the battle can start.
    TeamsSelected,
    /// Rosters are loaded and rounds can be played.
    InProgress,
    /// A round produced a winner.
    Concluded,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::TeamsSelected => write!(f, "teams selected"),
            Self::InProgress => write!(f, "in progress"),
            Self::Concluded => write!(f, "concluded"),
        }
    }
}

/// The teams chosen for each side.
///
/// Picking the same team for both sides is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSelection {
    /// Team for side A.
    pub team_a: Option<TeamId>,
    /// Team for side B.
    pub team_b: Option<TeamId>,
}

impl TeamSelection {
    /// The team chosen for `side`.
    #[must_use]
    pub fn get(&self, side: Side) -> Option<&TeamId> {
        match side {
            Side::A => self.team_a.as_ref(),
            Side::B => self.team_b.as_ref(),
        }
    }

    /// Returns true if both sides have a team.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.team_a.is_some() && self.team_b.is_some()
    }

    fn set(&mut self, side: Side, team: Option<TeamId>) {
        match side {
            Side::A => self.team_a = team,
            Side::B => self.team_b = team,
        }
    }
}

/// Result of asking the controller to play a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStep {
    /// A round was played and recorded.
    Resolved(RoundReport),
    /// Nothing was played: the displayed state already has a winner, or a
    /// side has nobody left standing.
    NoContest,
}

// =============================================================================
// Controller
// =============================================================================

/// Orchestrates team selection, roster loading, rounds and navigation.
pub struct BattleController {
    roster: Arc<dyn RosterStore>,
    oracle: Arc<dyn TypeFactorOracle>,
    config: SessionConfig,
    selection: TeamSelection,
    session: BattleSession,
    phase: Phase,
}

impl fmt::Debug for BattleController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BattleController")
            .field("config", &self.config)
            .field("selection", &self.selection)
            .field("session", &self.session)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl BattleController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(
        roster: Arc<dyn RosterStore>,
        oracle: Arc<dyn TypeFactorOracle>,
        config: SessionConfig,
    ) -> Self {
        Self {
            roster,
            oracle,
            config,
            selection: TeamSelection::default(),
            session: BattleSession::new(),
            phase: Phase::Idle,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current team selection.
    #[must_use]
    pub fn selection(&self) -> &TeamSelection {
        &self.selection
    }

    /// Current battle state.
    #[must_use]
    pub fn session(&self) -> &BattleSession {
        &self.session
    }

    /// Time limits in use.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Chooses (or clears, with `None`) the team for `side`.
    ///
    /// # Errors
    ///
    /// [`BattleError::WrongPhase`] while a battle is running or concluded.
    pub fn select_team(&mut self, side: Side, team: Option<TeamId>) -> Result<()> {
        self.ensure_not_battling("change the team selection")?;
        self.selection.set(side, team);
        self.phase = if self.selection.is_complete() {
            Phase::TeamsSelected
        } else {
            Phase::Idle
        };
        Ok(())
    }

    /// Loads both rosters and records the baseline round.
    ///
    /// The two fetches run concurrently; each roster is handed to the session
    /// as soon as it arrives.
    ///
    /// # Errors
    ///
    /// - [`BattleError::InvalidSelection`] if a side has no team.
    /// - [`BattleError::RosterFetchFailed`] / [`BattleError::EmptyRoster`] if
    ///   a roster cannot be used; the controller stays in `TeamsSelected`.
    /// - [`BattleError::WrongPhase`] if a battle is already running.
    pub async fn start_battle(&mut self) -> Result<()> {
        self.ensure_not_battling("start a battle")?;
        let (Some(team_a), Some(team_b)) =
            (self.selection.team_a.clone(), self.selection.team_b.clone())
        else {
            return Err(BattleError::InvalidSelection);
        };

        self.session.clear();
        if let Err(err) = self.load_rosters(team_a, team_b).await {
            tracing::warn!(error = %err, "battle could not start");
            self.session.clear();
            return Err(err);
        }

        tracing::info!(
            team_a = self.session.team(Side::A).map(Team::name),
            team_b = self.session.team(Side::B).map(Team::name),
            "battle started"
        );
        self.phase = Phase::InProgress;
        Ok(())
    }

    async fn load_rosters(&mut self, team_a: TeamId, team_b: TeamId) -> Result<()> {
        let limit = self.config.roster_timeout;
        let fetch_a = fetch_team(Arc::clone(&self.roster), Side::A, team_a, limit);
        let fetch_b = fetch_team(Arc::clone(&self.roster), Side::B, team_b, limit);
        tokio::pin!(fetch_a, fetch_b);

        let (mut a_done, mut b_done) = (false, false);
        while !(a_done && b_done) {
            let (side, team) = tokio::select! {
                team = &mut fetch_a, if !a_done => {
                    a_done = true;
                    (Side::A, team?)
                }
                team = &mut fetch_b, if !b_done => {
                    b_done = true;
                    (Side::B, team?)
                }
            };
            self.session.roster_loaded(side, team);
        }
        Ok(())
    }

    /// Plays the next round from the displayed state.
    ///
    /// If the displayed round is not the newest one, the rounds after it are
    /// discarded before the new one is recorded. A round that produces a
    /// winner moves the controller to `Concluded`; a round played from an
    /// earlier, undecided point moves it back to `InProgress`.
    ///
    /// # Errors
    ///
    /// - [`BattleError::TypeFactorUnavailable`] if a lookup fails or times
    ///   out; nothing is changed.
    /// - [`BattleError::WrongPhase`] if no battle has started.
    pub async fn advance_round(&mut self) -> Result<RoundStep> {
        self.ensure_battling("advance a round")?;
        if self.session.winner().is_some() {
            return Ok(RoundStep::NoContest);
        }
        let Some((element_a, element_b)) = self.session.active_elements() else {
            return Ok(RoundStep::NoContest);
        };

        let factors = match lookup_pair(
            self.oracle.as_ref(),
            &element_a,
            &element_b,
            self.config.factor_timeout,
        )
        .await
        {
            Ok(factors) => factors,
            Err(err) => {
                tracing::warn!(error = %err, round = self.session.current_round(), "round aborted");
                return Err(err);
            }
        };

        let Some(report) = self.session.apply_round(factors) else {
            return Ok(RoundStep::NoContest);
        };

        self.phase = match &report.winner {
            Some(winner) => {
                tracing::info!(round = report.round_number, winner = %winner.label(), "battle concluded");
                Phase::Concluded
            }
            None => Phase::InProgress,
        };
        Ok(RoundStep::Resolved(report))
    }

    /// Displays the previous round. Returns `None` at round 1 or with no battle.
    ///
    /// The phase is left untouched.
    pub fn previous_round(&mut self) -> Option<&RoundSnapshot> {
        if !self.is_battling() {
            return None;
        }
        self.session.previous_round()
    }

    /// Displays the next round. Returns `None` at the newest round or with no
    /// battle.
    ///
    /// The phase is left untouched.
    pub fn next_round(&mut self) -> Option<&RoundSnapshot> {
        if !self.is_battling() {
            return None;
        }
        self.session.next_round()
    }

    /// Discards the battle and the selection and returns to `Idle`.
    pub fn new_battle(&mut self) {
        tracing::info!(previous_phase = %self.phase, "new battle");
        self.session.clear();
        self.selection = TeamSelection::default();
        self.phase = Phase::Idle;
    }

    fn is_battling(&self) -> bool {
        matches!(self.phase, Phase::InProgress | Phase::Concluded)
    }

    fn ensure_battling(&self, operation: &'static str) -> Result<()> {
        if self.is_battling() {
            Ok(())
        } else {
            Err(BattleError::WrongPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    fn ensure_not_battling(&self, operation: &'static str) -> Result<()> {
        if self.is_battling() {
            Err(BattleError::WrongPhase {
                operation,
                phase: self.phase,
            })
        } else {
            Ok(())
        }
    }
}

async fn fetch_team(
    store: Arc<dyn RosterStore>,
    side: Side,
    team_id: TeamId,
    limit: Duration,
) -> Result<Team> {
    let roster = match tokio::time::timeout(limit, store.fetch_roster(&team_id)).await {
        Ok(Ok(roster)) => roster,
        Ok(Err(source)) => {
            return Err(BattleError::RosterFetchFailed {
                side,
                team_id,
                source,
            })
        }
        Err(_) => {
            return Err(BattleError::RosterFetchFailed {
                side,
                team_id,
                source: ServiceError::TimedOut { after: limit },
            })
        }
    };

    if roster.members.is_empty() {
        return Err(BattleError::EmptyRoster { side, team_id });
    }
    tracing::debug!(%side, %team_id, members = roster.members.len(), "roster loaded");
    Ok(Team::from_roster(&roster))
}
