//! Round history log.
//!
//! The log is a single, branch-free timeline of [`RoundSnapshot`]s with a
//! cursor marking the round currently on display. Entry `i` always has round
//! number `i + 1`; entry 0 is the pre-battle baseline.
//!
//! Moving the cursor back and then recording a new round discards every entry
//! after the cursor first. There are no forks: acting from the past rewrites
//! the future.
//!
//! # Example
//!
//! ```
//! use pokearena_core::history::RoundLog;
//! use pokearena_core::team::Team;
//!
//! let mut log = RoundLog::new();
//! log.initialize(&Team::default(), &Team::default());
//! log.record(Vec::new(), &Team::default(), &Team::default(), None);
//! log.record(Vec::new(), &Team::default(), &Team::default(), None);
//! assert_eq!(log.current_round(), 3);
//!
//! log.previous();
//! log.previous();
//! log.record(Vec::new(), &Team::default(), &Team::default(), None);
//! assert_eq!(log.len(), 2);
//! assert_eq!(log.current_round(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::resolver::BattleAction;
use crate::team::Team;
use crate::tracker::WinnerOutcome;

/// Immutable record of the battle at the end of one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    round_number: u32,
    actions: Vec<BattleAction>,
    team_a: Team,
    team_b: Team,
    winner: Option<WinnerOutcome>,
}

impl RoundSnapshot {
    /// 1-based round number.
    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Attacks that produced this state (empty for the baseline).
    #[must_use]
    pub fn actions(&self) -> &[BattleAction] {
        &self.actions
    }

    /// Side A's team as it stood after the round.
    #[must_use]
    pub fn team_a(&self) -> &Team {
        &self.team_a
    }

    /// Side B's team as it stood after the round.
    #[must_use]
    pub fn team_b(&self) -> &Team {
        &self.team_b
    }

    /// Terminal outcome, if this round ended the battle.
    #[must_use]
    pub fn winner(&self) -> Option<&WinnerOutcome> {
        self.winner.as_ref()
    }
}

/// Append-only, rewindable sequence of round snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundLog {
    entries: Vec<RoundSnapshot>,
    /// 1-based position of the displayed round; 0 while the log is empty.
    cursor: usize,
}

impl RoundLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded rounds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[RoundSnapshot] {
        &self.entries
    }

    /// The entry with the given 1-based round number.
    #[must_use]
    pub fn get(&self, round_number: u32) -> Option<&RoundSnapshot> {
        let index = usize::try_from(round_number).ok()?.checked_sub(1)?;
        self.entries.get(index)
    }

    /// Round number currently on display; 0 while the log is empty.
    #[must_use]
    pub fn current_round(&self) -> u32 {
        u32::try_from(self.cursor).unwrap_or(u32::MAX)
    }

    /// The snapshot currently on display.
    #[must_use]
    pub fn current(&self) -> Option<&RoundSnapshot> {
        self.cursor.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Returns true if the displayed round is the newest one.
    #[must_use]
    pub fn is_at_latest(&self) -> bool {
        self.cursor == self.entries.len()
    }

    /// Records the pre-battle baseline as round 1.
    ///
    /// Does nothing and returns false if the log already has entries, so it is
    /// safe to call more than once.
    pub fn initialize(&mut self, team_a: &Team, team_b: &Team) -> bool {
        if !self.entries.is_empty() {
            return false;
        }
        self.push(Vec::new(), team_a, team_b, None);
        true
    }

    /// Appends a snapshot after the displayed round and moves the cursor to it.
    ///
    /// Entries after the cursor are discarded first. Both teams are deep
    /// copied, so later changes to live state never reach the log.
    pub fn record(
        &mut self,
        actions: Vec<BattleAction>,
        team_a: &Team,
        team_b: &Team,
        winner: Option<WinnerOutcome>,
    ) -> &RoundSnapshot {
        if self.entries.len() > self.cursor {
            tracing::debug!(
                kept = self.cursor,
                discarded = self.entries.len() - self.cursor,
                "truncating round log after rewind"
            );
            self.entries.truncate(self.cursor);
        }
        self.push(actions, team_a, team_b, winner)
    }

    /// Moves the cursor one round back and returns that round.
    ///
    /// Returns `None` and stays put when already at round 1.
    pub fn previous(&mut self) -> Option<&RoundSnapshot> {
        if self.cursor <= 1 {
            return None;
        }
        self.cursor -= 1;
        self.current()
    }

    /// Moves the cursor one round forward and returns that round.
    ///
    /// Returns `None` and stays put when already at the newest round.
    pub fn next(&mut self) -> Option<&RoundSnapshot> {
        if self.cursor >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.current()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    fn push(
        &mut self,
        actions: Vec<BattleAction>,
        team_a: &Team,
        team_b: &Team,
        winner: Option<WinnerOutcome>,
    ) -> &RoundSnapshot {
        let round_number = u32::try_from(self.entries.len() + 1).unwrap_or(u32::MAX);
        self.entries.push(RoundSnapshot {
            round_number,
            actions,
            team_a: team_a.clone(),
            team_b: team_b.clone(),
            winner,
        });
        self.cursor = self.entries.len();
        tracing::debug!(round_number, "round recorded");
        &self.entries[self.cursor - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{Combatant, ElementType};

    fn team(life: u32) -> Team {
        Team::new(
            "T",
            vec![Combatant::new("m", ElementType::new("normal"), 10, life)],
        )
    }

    fn log_with_rounds(lives: &[u32]) -> RoundLog {
        let mut log = RoundLog::new();
        log.initialize(&team(100), &team(100));
        for life in lives {
            log.record(Vec::new(), &team(*life), &team(*life), None);
        }
        log
    }

    mod record_tests {
        use super::*;

        #[test]
        fn initialize_is_idempotent() {
            let mut log = RoundLog::new();
            assert!(log.initialize(&team(100), &team(100)));
            assert!(!log.initialize(&team(1), &team(1)));
            assert_eq!(log.len(), 1);
            assert_eq!(log.current().unwrap().team_a(), &team(100));
        }

        #[test]
        fn round_numbers_follow_positions() {
            let log = log_with_rounds(&[90, 80, 70]);
            for (i, entry) in log.entries().iter().enumerate() {
                assert_eq!(entry.round_number() as usize, i + 1);
            }
            assert_eq!(log.current_round(), 4);
        }

        #[test]
        fn snapshots_are_deep_copies() {
            let mut live = team(100);
            let mut log = RoundLog::new();
            log.initialize(&live, &live);

            live = Team::new("T", vec![Combatant::new("m", ElementType::new("normal"), 10, 1)]);
            log.record(Vec::new(), &live, &live, None);

            assert_eq!(log.get(1).unwrap().team_a().members()[0].life(), 100);
            assert_eq!(log.get(2).unwrap().team_a().members()[0].life(), 1);
        }

        #[test]
        fn record_after_rewind_truncates() {
            let mut log = log_with_rounds(&[90, 80, 70]);
            log.previous();
            log.previous();
            assert_eq!(log.current_round(), 2);

            let entry = log.record(Vec::new(), &team(5), &team(5), None);
            assert_eq!(entry.round_number(), 3);
            assert_eq!(log.len(), 3);
            assert_eq!(log.get(3).unwrap().team_a().members()[0].life(), 5);
            assert!(log.get(4).is_none());
            assert!(log.is_at_latest());
        }
    }

    mod navigation_tests {
        use super::*;

        #[test]
        fn previous_stops_at_round_one() {
            let mut log = log_with_rounds(&[90]);
            assert_eq!(log.previous().unwrap().round_number(), 1);
            assert!(log.previous().is_none());
            assert_eq!(log.current_round(), 1);
        }

        #[test]
        fn next_stops_at_latest() {
            let mut log = log_with_rounds(&[90]);
            assert!(log.next().is_none());
            log.previous();
            assert_eq!(log.next().unwrap().round_number(), 2);
            assert!(log.next().is_none());
        }

        #[test]
        fn previous_then_next_returns_same_snapshot() {
            let mut log = log_with_rounds(&[90, 80]);
            let left = log.current().cloned().unwrap();
            log.previous();
            assert_eq!(log.next().cloned().unwrap(), left);
        }

        #[test]
        fn empty_log_has_no_navigation() {
            let mut log = RoundLog::new();
            assert_eq!(log.current_round(), 0);
            assert!(log.current().is_none());
            assert!(log.previous().is_none());
            assert!(log.next().is_none());
            assert!(log.get(0).is_none());
        }

        #[test]
        fn clear_resets_cursor() {
            let mut log = log_with_rounds(&[90]);
            log.clear();
            assert!(log.is_empty());
            assert_eq!(log.current_round(), 0);
        }
    }
}
