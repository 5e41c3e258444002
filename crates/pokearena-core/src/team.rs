//! Teams in battle.
//!
//! A [`Team`] is an ordered list of combatants; order is substitution
//! priority. The active combatant is never stored: it is always the first
//! member that is not knocked out, so it cannot drift out of sync after a
//! knockout or after a past round is restored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;
use crate::roster::TeamRoster;

/// One of the two sides of a battle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// First selected team ("Team 1").
    A,
    /// Second selected team ("Team 2").
    B,
}

impl Side {
    /// Both sides, in evaluation order.
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    /// Returns the other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "Team 1"),
            Self::B => write!(f, "Team 2"),
        }
    }
}

/// An ordered team of combatants with a display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    name: String,
    members: Vec<Combatant>,
}

impl Team {
    /// Creates a team from already built combatants.
    #[must_use]
    pub fn new(name: impl Into<String>, members: Vec<Combatant>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    /// Copies a roster into battle-local combatants.
    #[must_use]
    pub fn from_roster(roster: &TeamRoster) -> Self {
        Self {
            name: roster.team.name.clone(),
            members: roster.members.iter().map(Combatant::from_record).collect(),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in substitution order.
    #[must_use]
    pub fn members(&self) -> &[Combatant] {
        &self.members
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the team has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Index of the active combatant: the first member not knocked out.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.members.iter().position(|c| !c.is_knocked_out())
    }

    /// The active combatant, or `None` once every member is knocked out.
    #[must_use]
    pub fn active(&self) -> Option<&Combatant> {
        self.members.iter().find(|c| !c.is_knocked_out())
    }

    pub(crate) fn active_mut(&mut self) -> Option<&mut Combatant> {
        self.members.iter_mut().find(|c| !c.is_knocked_out())
    }

    /// Returns true if every member is knocked out.
    ///
    /// An empty team counts as defeated.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.members.iter().all(Combatant::is_knocked_out)
    }

    /// Number of members still standing.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.members.iter().filter(|c| !c.is_knocked_out()).count()
    }
}
