//! In-process collaborators.
//!
//! [`InMemoryRosterStore`] and [`FactorTable`] answer from data held in memory.
//! They back the test suite, the benchmarks and offline play from a
//! [`Fixture`] file.
//!
//! # Example
//!
//! ```
//! use pokearena_core::memory::FactorTable;
//!
//! let table = FactorTable::new().with_factor("fire", "water", 0.5);
//! assert_eq!(table.get(&"fire".into(), &"water".into()), 0.5);
//! assert_eq!(table.get(&"water".into(), &"fire".into()), 1.0);
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::combatant::ElementType;
use crate::error::ServiceError;
use crate::oracle::TypeFactorOracle;
use crate::roster::{RosterStore, TeamCatalog, TeamId, TeamRoster, TeamSummary};

/// Factor used for element pairs a [`FactorTable`] has no entry for.
pub const NEUTRAL_FACTOR: f64 = 1.0;

/// Roster store over a fixed set of teams.
///
/// Teams are listed in insertion order. Adding a roster whose id is already
/// present replaces the old one in place.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRosterStore {
    rosters: Vec<TeamRoster>,
}

impl InMemoryRosterStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a roster.
    #[must_use]
    pub fn with_roster(mut self, roster: TeamRoster) -> Self {
        self.insert(roster);
        self
    }

    /// Adds or replaces a roster.
    pub fn insert(&mut self, roster: TeamRoster) {
        match self.rosters.iter_mut().find(|r| r.team.id == roster.team.id) {
            Some(existing) => *existing = roster,
            None => self.rosters.push(roster),
        }
    }

    /// Number of teams held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rosters.len()
    }

    /// Returns true if no team is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rosters.is_empty()
    }
}

#[async_trait]
impl RosterStore for InMemoryRosterStore {
    async fn fetch_roster(&self, team: &TeamId) -> Result<TeamRoster, ServiceError> {
        self.rosters
            .iter()
            .find(|r| &r.team.id == team)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("team {team}")))
    }
}

#[async_trait]
impl TeamCatalog for InMemoryRosterStore {
    async fn list_teams(&self) -> Result<Vec<TeamSummary>, ServiceError> {
        Ok(self
            .rosters
            .iter()
            .map(|r| TeamSummary {
                id: r.team.id.clone(),
                team_name: r.team.name.clone(),
                total_power: r.members.iter().map(|m| f64::from(m.power)).sum(),
            })
            .collect())
    }
}

/// Type-effectiveness table with a neutral default.
#[derive(Debug, Clone, Default)]
pub struct FactorTable {
    factors: HashMap<(ElementType, ElementType), f64>,
}

impl FactorTable {
    /// Creates an empty table; every lookup answers [`NEUTRAL_FACTOR`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the factor for `attacker` hitting `defender`.
    #[must_use]
    pub fn with_factor(mut self, attacker: &str, defender: &str, factor: f64) -> Self {
        self.factors
            .insert((ElementType::new(attacker), ElementType::new(defender)), factor);
        self
    }

    /// The factor for `attacker` hitting `defender`.
    #[must_use]
    pub fn get(&self, attacker: &ElementType, defender: &ElementType) -> f64 {
        self.factors
            .get(&(attacker.clone(), defender.clone()))
            .copied()
            .unwrap_or(NEUTRAL_FACTOR)
    }
}

#[async_trait]
impl TypeFactorOracle for FactorTable {
    async fn factor(
        &self,
        attacker: &ElementType,
        defender: &ElementType,
    ) -> Result<f64, ServiceError> {
        Ok(self.get(attacker, defender))
    }
}

/// One entry of a fixture's factor list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorEntry {
    /// Attacking element.
    pub attacker: ElementType,
    /// Defending element.
    pub defender: ElementType,
    /// Damage multiplier.
    pub factor: f64,
}

/// Offline battle data: rosters plus type factors.
///
/// ```json
/// {
///   "teams": [{"team": {"id": 1, "name": "Blazers"}, "pokemons": [...]}],
///   "factors": [{"attacker": "fire", "defender": "water", "factor": 0.5}]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    /// Rosters, in listing order.
    #[serde(default)]
    pub teams: Vec<TeamRoster>,
    /// Known factors; missing pairs are neutral.
    #[serde(default)]
    pub factors: Vec<FactorEntry>,
}

impl Fixture {
    /// Splits the fixture into its two collaborators.
    #[must_use]
    pub fn into_collaborators(self) -> (InMemoryRosterStore, FactorTable) {
        let mut store = InMemoryRosterStore::new();
        for roster in self.teams {
            store.insert(roster);
        }
        let mut table = FactorTable::new();
        for entry in self.factors {
            table
                .factors
                .insert((entry.attacker, entry.defender), entry.factor);
        }
        (store, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{CreatureRecord, TeamInfo};

    fn roster(id: &str, name: &str, powers: &[u32]) -> TeamRoster {
        TeamRoster {
            team: TeamInfo {
                id: TeamId::new(id),
                name: name.into(),
            },
            members: powers
                .iter()
                .enumerate()
                .map(|(i, power)| CreatureRecord {
                    name: format!("{name}-{i}"),
                    element: "normal".into(),
                    power: *power,
                    life: 100,
                    image: None,
                })
                .collect(),
        }
    }

    mod store_tests {
        use super::*;

        #[tokio::test]
        async fn fetches_known_team() {
            let store = InMemoryRosterStore::new().with_roster(roster("1", "Blazers", &[10]));
            let fetched = store.fetch_roster(&TeamId::new("1")).await.unwrap();
            assert_eq!(fetched.team.name, "Blazers");
        }

        #[tokio::test]
        async fn unknown_team_is_not_found() {
            let store = InMemoryRosterStore::new();
            let err = store.fetch_roster(&TeamId::new("7")).await.unwrap_err();
            assert!(matches!(err, ServiceError::NotFound(_)));
        }

        #[tokio::test]
        async fn listing_keeps_order_and_sums_power() {
            let store = InMemoryRosterStore::new()
                .with_roster(roster("2", "Tides", &[30, 20]))
                .with_roster(roster("1", "Blazers", &[50]))
                .with_roster(roster("2", "Tides", &[5]));

            let teams = store.list_teams().await.unwrap();
            assert_eq!(store.len(), 2);
            assert_eq!(teams[0].team_name, "Tides");
            assert!((teams[0].total_power - 5.0).abs() < f64::EPSILON);
            assert_eq!(teams[1].id, TeamId::new("1"));
        }
    }

    mod factor_tests {
        use super::*;

        #[tokio::test]
        async fn unknown_pair_is_neutral() {
            let table = FactorTable::new().with_factor("fire", "water", 0.5);
            let factor = table
                .factor(&ElementType::new("grass"), &ElementType::new("rock"))
                .await
                .unwrap();
            assert!((factor - NEUTRAL_FACTOR).abs() < f64::EPSILON);
        }

        #[test]
        fn factors_are_directional() {
            let table = FactorTable::new().with_factor("fire", "water", 0.5);
            assert!((table.get(&"fire".into(), &"water".into()) - 0.5).abs() < f64::EPSILON);
            assert!((table.get(&"water".into(), &"fire".into()) - 1.0).abs() < f64::EPSILON);
        }
    }

    mod fixture_tests {
        use super::*;

        #[tokio::test]
        async fn fixture_builds_both_collaborators() {
            let json = r#"{
                "teams": [
                    {"team": {"id": 1, "name": "Blazers"},
                     "pokemons": [{"name": "Ember", "type": "fire", "power": 50, "life": 100}]}
                ],
                "factors": [{"attacker": "fire", "defender": "water", "factor": 0.5}]
            }"#;
            let fixture: Fixture = serde_json::from_str(json).unwrap();
            let (store, table) = fixture.into_collaborators();

            assert_eq!(store.list_teams().await.unwrap().len(), 1);
            assert!((table.get(&"fire".into(), &"water".into()) - 0.5).abs() < f64::EPSILON);
        }

        #[test]
        fn empty_fixture_is_valid() {
            let fixture: Fixture = serde_json::from_str("{}").unwrap();
            assert!(fixture.teams.is_empty());
        }
    }
}
