//! Roster tracker: the two live teams of a battle.
//!
//! The tracker owns both teams, plays rounds between their active combatants,
//! reports substitutions after knockouts and decides when a battle is over.

use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;
use crate::oracle::FactorPair;
use crate::resolver::{resolve_round, RoundResolution};
use crate::team::{Side, Team};

/// A knockout and the combatant that replaced the fallen one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// Side that lost its active combatant.
    pub side: Side,
    /// Name of the knocked out combatant.
    pub knocked_out: String,
    /// Name of the replacement, or `None` if the side has nobody left.
    pub replacement: Option<String>,
}

/// Terminal result of a battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerOutcome {
    /// Winning side.
    pub side: Side,
    /// Display name of the winning team.
    pub team_name: String,
    /// The winner's active combatant at the end, if it has one.
    pub champion: Option<Combatant>,
    /// Roster position of `champion` within the winning team.
    pub champion_index: Option<usize>,
}

impl WinnerOutcome {
    /// Banner text, e.g. `"Team 2 Wins! - Tidecallers"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} Wins! - {}", self.side, self.team_name)
    }

    /// Returns true if member `index` of `side` is the winning combatant.
    ///
    /// Matched by position: both teams may field identical creatures.
    #[must_use]
    pub fn is_champion(&self, side: Side, index: usize) -> bool {
        self.side == side && self.champion_index == Some(index)
    }
}

/// Owner of the two live teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterTracker {
    team_a: Team,
    team_b: Team,
}

impl RosterTracker {
    /// Creates a tracker over two freshly loaded teams.
    #[must_use]
    pub fn new(team_a: Team, team_b: Team) -> Self {
        Self { team_a, team_b }
    }

    /// The team on `side`.
    #[must_use]
    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    /// The active combatant on `side`.
    #[must_use]
    pub fn active(&self, side: Side) -> Option<&Combatant> {
        self.team(side).active()
    }

    /// Returns true if both sides still have a combatant standing.
    #[must_use]
    pub fn can_fight(&self) -> bool {
        self.team_a.active().is_some() && self.team_b.active().is_some()
    }

    /// Picks the replacement after a knockout: the first member of `team`, in
    /// roster order, that is not knocked out.
    #[must_use]
    pub fn substitute(team: &Team) -> Option<&Combatant> {
        team.active()
    }

    /// Plays one round between the active combatants using `factors`.
    ///
    /// Returns `None` without touching anything if either side has no active
    /// combatant.
    pub fn play_round(&mut self, factors: FactorPair) -> Option<(RoundResolution, Vec<Substitution>)> {
        let resolution = resolve_round(self.team_a.active()?, self.team_b.active()?, factors);

        let (active_a, active_b) = (self.team_a.active_mut()?, self.team_b.active_mut()?);
        resolution.apply(active_a, active_b);
        let fallen = [
            (Side::A, active_a.is_knocked_out().then(|| active_a.name().to_owned())),
            (Side::B, active_b.is_knocked_out().then(|| active_b.name().to_owned())),
        ];

        let substitutions = fallen
            .into_iter()
            .filter_map(|(side, name)| {
                let knocked_out = name?;
                let replacement = Self::substitute(self.team(side)).map(|c| c.name().to_owned());
                tracing::debug!(%side, %knocked_out, ?replacement, "combatant knocked out");
                Some(Substitution {
                    side,
                    knocked_out,
                    replacement,
                })
            })
            .collect();

        Some((resolution, substitutions))
    }

    /// Decides whether the battle is over.
    ///
    /// Team A's defeat is checked first, so if both teams are wiped out in the
    /// same round, Team B is declared the winner.
    #[must_use]
    pub fn check_winner(&self) -> Option<WinnerOutcome> {
        let winner = if self.team_a.is_defeated() {
            Side::B
        } else if self.team_b.is_defeated() {
            Side::A
        } else {
            return None;
        };
        let team = self.team(winner);
        Some(WinnerOutcome {
            side: winner,
            team_name: team.name().to_owned(),
            champion: team.active().cloned(),
            champion_index: team.active_index(),
        })
    }
}
