//! Roster collaborator contracts and their wire types.
//!
//! The battle core never stores rosters itself. A [`RosterStore`] hands out
//! the ordered combatant list of a team, and a [`TeamCatalog`] lists the teams
//! that can be picked. Both are async because the production implementation
//! talks HTTP (`GET /api/team/{id}`, `GET /api/teams`).

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::combatant::ElementType;
use crate::error::ServiceError;

/// Identifier of a team in the roster store.
///
/// Accepts both JSON strings and JSON numbers when deserializing, since the
/// store is free to use either.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    /// Creates a team identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for TeamId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(id) => Self(id),
            Raw::Number(id) => Self(id.to_string()),
        })
    }
}

impl fmt::Debug for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TeamId({})", self.0)
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeamId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One creature as supplied by the roster store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureRecord {
    /// Display name.
    pub name: String,
    /// Elemental type.
    #[serde(rename = "type")]
    pub element: ElementType,
    /// Attack strength.
    pub power: u32,
    /// Starting life.
    pub life: u32,
    /// Opaque image reference.
    #[serde(default)]
    pub image: Option<String>,
}

/// Team header inside a roster response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    /// Team identifier.
    pub id: TeamId,
    /// Display name.
    pub name: String,
}

/// A team and its ordered combatants (`GET /api/team/{id}`).
///
/// Member order is substitution priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRoster {
    /// Team header.
    pub team: TeamInfo,
    /// Ordered members.
    #[serde(rename = "pokemons")]
    pub members: Vec<CreatureRecord>,
}

/// Entry of the team listing (`GET /api/teams`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    /// Team identifier.
    pub id: TeamId,
    /// Display name.
    pub team_name: String,
    /// Sum of member power, as computed by the store.
    #[serde(default)]
    pub total_power: f64,
}

/// Source of team rosters.
#[async_trait]
pub trait RosterStore: Send + Sync {
    /// Fetches the roster of `team`.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] if the store cannot produce the roster.
    async fn fetch_roster(&self, team: &TeamId) -> Result<TeamRoster, ServiceError>;
}

/// Source of the list of selectable teams.
///
/// Listing only: creating teams is left out, as the team service exposes no
/// route for it.
#[async_trait]
pub trait TeamCatalog: Send + Sync {
    /// Lists all teams, in the store's order.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] if the listing cannot be produced.
    async fn list_teams(&self) -> Result<Vec<TeamSummary>, ServiceError>;
}
