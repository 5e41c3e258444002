//! Test helper functions for building rosters, collaborators and controllers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::combatant::ElementType;
use crate::config::SessionConfig;
use crate::controller::BattleController;
use crate::error::ServiceError;
use crate::memory::{FactorTable, InMemoryRosterStore};
use crate::oracle::TypeFactorOracle;
use crate::roster::{CreatureRecord, RosterStore, TeamId, TeamInfo, TeamRoster};
use crate::team::Side;

// =============================================================================
// Rosters
// =============================================================================

/// Builds a creature record with no image.
pub fn creature(name: &str, element: &str, power: u32, life: u32) -> CreatureRecord {
    CreatureRecord {
        name: name.into(),
        element: element.into(),
        power,
        life,
        image: None,
    }
}

/// Builds a roster for team `id`.
pub fn roster(id: &str, name: &str, members: Vec<CreatureRecord>) -> TeamRoster {
    TeamRoster {
        team: TeamInfo {
            id: TeamId::new(id),
            name: name.into(),
        },
        members,
    }
}

/// Team "1": a lone fire creature (power 50, life 100).
pub fn blazers() -> TeamRoster {
    roster("1", "Blazers", vec![creature("Ember", "fire", 50, 100)])
}

/// Team "2": a lone water creature (power 30, life 100).
pub fn tides() -> TeamRoster {
    roster("2", "Tides", vec![creature("Bubbles", "water", 30, 100)])
}

/// Team "3": fire creature backed by a grass creature.
pub fn grove() -> TeamRoster {
    roster(
        "3",
        "Grove",
        vec![
            creature("Ember", "fire", 50, 100),
            creature("Sprout", "grass", 20, 30),
        ],
    )
}

/// Fire hits water for half, water hits fire double, everything else neutral.
pub fn fire_water_table() -> FactorTable {
    FactorTable::new()
        .with_factor("fire", "water", 0.5)
        .with_factor("water", "fire", 2.0)
}

/// Store holding [`blazers`], [`tides`] and [`grove`].
pub fn standard_store() -> InMemoryRosterStore {
    InMemoryRosterStore::new()
        .with_roster(blazers())
        .with_roster(tides())
        .with_roster(grove())
}

// =============================================================================
// Controllers
// =============================================================================

/// Controller over the given collaborators with short time limits.
pub fn controller_with(
    store: impl RosterStore + 'static,
    oracle: impl TypeFactorOracle + 'static,
) -> BattleController {
    BattleController::new(
        Arc::new(store),
        Arc::new(oracle),
        SessionConfig::default().with_timeout(Duration::from_millis(200)),
    )
}

/// Controller over [`standard_store`] and [`fire_water_table`].
pub fn standard_controller() -> BattleController {
    controller_with(standard_store(), fire_water_table())
}

/// Selects `a` and `b` and starts the battle.
pub async fn started(mut controller: BattleController, a: &str, b: &str) -> BattleController {
    controller
        .select_team(Side::A, Some(TeamId::new(a)))
        .unwrap();
    controller
        .select_team(Side::B, Some(TeamId::new(b)))
        .unwrap();
    controller.start_battle().await.unwrap();
    controller
}

/// Life of the active combatant on `side`, or 0 if nobody is standing.
pub fn active_life(controller: &BattleController, side: Side) -> u32 {
    controller
        .session()
        .active(side)
        .map_or(0, crate::combatant::Combatant::life)
}

// =============================================================================
// Misbehaving collaborators
// =============================================================================

/// Store that answers each team after its own delay.
pub struct DelayedStore {
    inner: InMemoryRosterStore,
    delays: Vec<(TeamId, Duration)>,
}

impl DelayedStore {
    /// Wraps `inner`; teams without a delay answer immediately.
    pub fn new(inner: InMemoryRosterStore, delays: &[(&str, u64)]) -> Self {
        Self {
            inner,
            delays: delays
                .iter()
                .map(|(id, ms)| (TeamId::new(*id), Duration::from_millis(*ms)))
                .collect(),
        }
    }
}

#[async_trait]
impl RosterStore for DelayedStore {
    async fn fetch_roster(&self, team: &TeamId) -> Result<TeamRoster, ServiceError> {
        if let Some((_, delay)) = self.delays.iter().find(|(id, _)| id == team) {
            tokio::time::sleep(*delay).await;
        }
        self.inner.fetch_roster(team).await
    }
}

/// Oracle that fails its first `failures` lookups, then defers to a table.
pub struct FlakyOracle {
    inner: FactorTable,
    failures: AtomicUsize,
}

impl FlakyOracle {
    /// Fails the first `failures` lookups.
    pub fn new(inner: FactorTable, failures: usize) -> Self {
        Self {
            inner,
            failures: AtomicUsize::new(failures),
        }
    }
}

#[async_trait]
impl TypeFactorOracle for FlakyOracle {
    async fn factor(
        &self,
        attacker: &ElementType,
        defender: &ElementType,
    ) -> Result<f64, ServiceError> {
        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(ServiceError::Unavailable("connection refused".into()));
        }
        self.inner.factor(attacker, defender).await
    }
}

/// Oracle that never answers.
pub struct SilentOracle;

#[async_trait]
impl TypeFactorOracle for SilentOracle {
    async fn factor(&self, _: &ElementType, _: &ElementType) -> Result<f64, ServiceError> {
        std::future::pending().await
    }
}

/// Store that never answers.
pub struct SilentStore;

#[async_trait]
impl RosterStore for SilentStore {
    async fn fetch_roster(&self, _: &TeamId) -> Result<TeamRoster, ServiceError> {
        std::future::pending().await
    }
}
