//! Battle session state.
//!
//! A [`BattleSession`] is everything one battle knows: rosters as they arrive,
//! the live teams, the round log and the displayed outcome. It performs no
//! I/O; the controller feeds it rosters and type factors.

use serde::{Deserialize, Serialize};

use crate::combatant::{Combatant, ElementType};
use crate::history::{RoundLog, RoundSnapshot};
use crate::oracle::FactorPair;
use crate::resolver::BattleAction;
use crate::team::{Side, Team};
use crate::tracker::{RosterTracker, Substitution, WinnerOutcome};

/// What happened in one newly played round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    /// Round number of the recorded snapshot.
    pub round_number: u32,
    /// The two attacks of the round.
    pub actions: Vec<BattleAction>,
    /// Knockouts and their replacements.
    pub substitutions: Vec<Substitution>,
    /// Set when this round ended the battle.
    pub winner: Option<WinnerOutcome>,
}

impl RoundReport {
    /// Returns true when the UI should bring the round history into view,
    /// which happens once the battle has been decided.
    #[must_use]
    pub fn reveal_log(&self) -> bool {
        self.winner.is_some()
    }
}

/// State of one battle, from roster arrival to the last recorded round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSession {
    pending_a: Option<Team>,
    pending_b: Option<Team>,
    tracker: Option<RosterTracker>,
    log: RoundLog,
    winner: Option<WinnerOutcome>,
    last_actions: Vec<BattleAction>,
}

impl BattleSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts the roster for `side`.
    ///
    /// Rosters may arrive in either order. Once both are present and the log
    /// is still empty, the live teams are set up and the baseline snapshot is
    /// recorded; this happens exactly once. Returns true on the call that
    /// performed the setup.
    pub fn roster_loaded(&mut self, side: Side, team: Team) -> bool {
        if self.tracker.is_some() {
            tracing::warn!(%side, "roster arrived after the battle was set up; ignored");
            return false;
        }
        match side {
            Side::A => self.pending_a = Some(team),
            Side::B => self.pending_b = Some(team),
        }
        self.try_initialize()
    }

    fn try_initialize(&mut self) -> bool {
        if !self.log.is_empty() {
            return false;
        }
        match (self.pending_a.take(), self.pending_b.take()) {
            (Some(team_a), Some(team_b)) => {
                self.log.initialize(&team_a, &team_b);
                tracing::info!(
                    team_a = team_a.name(),
                    team_b = team_b.name(),
                    "battle ready"
                );
                self.tracker = Some(RosterTracker::new(team_a, team_b));
                true
            }
            (team_a, team_b) => {
                self.pending_a = team_a;
                self.pending_b = team_b;
                false
            }
        }
    }

    /// Returns true once both rosters have arrived and round 1 is recorded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.tracker.is_some()
    }

    /// The live teams, once ready.
    #[must_use]
    pub fn tracker(&self) -> Option<&RosterTracker> {
        self.tracker.as_ref()
    }

    /// The team on `side`: live once ready, otherwise the roster received so far.
    #[must_use]
    pub fn team(&self, side: Side) -> Option<&Team> {
        match (&self.tracker, side) {
            (Some(tracker), side) => Some(tracker.team(side)),
            (None, Side::A) => self.pending_a.as_ref(),
            (None, Side::B) => self.pending_b.as_ref(),
        }
    }

    /// The active combatant on `side`.
    #[must_use]
    pub fn active(&self, side: Side) -> Option<&Combatant> {
        self.tracker.as_ref()?.active(side)
    }

    /// Elements of both active combatants, if both sides can fight.
    #[must_use]
    pub fn active_elements(&self) -> Option<(ElementType, ElementType)> {
        Some((
            self.active(Side::A)?.element().clone(),
            self.active(Side::B)?.element().clone(),
        ))
    }

    /// The round log.
    #[must_use]
    pub fn log(&self) -> &RoundLog {
        &self.log
    }

    /// Round number on display (1-based); 0 before the battle is ready.
    #[must_use]
    pub fn current_round(&self) -> u32 {
        self.log.current_round()
    }

    /// Outcome of the displayed round.
    #[must_use]
    pub fn winner(&self) -> Option<&WinnerOutcome> {
        self.winner.as_ref()
    }

    /// Attacks of the displayed round.
    #[must_use]
    pub fn last_actions(&self) -> &[BattleAction] {
        &self.last_actions
    }

    /// Returns true if the displayed round is the newest recorded one.
    #[must_use]
    pub fn is_last_round(&self) -> bool {
        self.log.is_at_latest()
    }

    /// Returns true if member `index` of `side` is the displayed winner's
    /// champion.
    #[must_use]
    pub fn is_winning_combatant(&self, side: Side, index: usize) -> bool {
        self.winner
            .as_ref()
            .is_some_and(|winner| winner.is_champion(side, index))
    }

    /// Plays one round with already known factors and records it.
    ///
    /// Returns `None` without changes if the session is not ready or a side
    /// has no combatant standing.
    pub fn apply_round(&mut self, factors: FactorPair) -> Option<RoundReport> {
        let tracker = self.tracker.as_mut()?;
        let (resolution, substitutions) = tracker.play_round(factors)?;
        let winner = tracker.check_winner();

        let round_number = self
            .log
            .record(
                resolution.actions.clone(),
                tracker.team(Side::A),
                tracker.team(Side::B),
                winner.clone(),
            )
            .round_number();

        self.winner.clone_from(&winner);
        self.last_actions.clone_from(&resolution.actions);

        Some(RoundReport {
            round_number,
            actions: resolution.actions,
            substitutions,
            winner,
        })
    }

    /// Steps back one round and adopts it as live state.
    pub fn previous_round(&mut self) -> Option<&RoundSnapshot> {
        let snapshot = self.log.previous()?.clone();
        self.adopt(snapshot);
        self.log.current()
    }

    /// Steps forward one round and adopts it as live state.
    pub fn next_round(&mut self) -> Option<&RoundSnapshot> {
        let snapshot = self.log.next()?.clone();
        self.adopt(snapshot);
        self.log.current()
    }

    /// Replaces live state with a copy of `snapshot`.
    ///
    /// Active combatants are recomputed from the copied teams; nothing refers
    /// back to the objects that were live before.
    fn adopt(&mut self, snapshot: RoundSnapshot) {
        tracing::debug!(round = snapshot.round_number(), "restoring round");
        self.tracker = Some(RosterTracker::new(
            snapshot.team_a().clone(),
            snapshot.team_b().clone(),
        ));
        self.winner = snapshot.winner().cloned();
        self.last_actions = snapshot.actions().to_vec();
    }

    /// Discards everything.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
