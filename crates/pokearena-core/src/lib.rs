//! # Pokearena Core
//!
//! Battle resolution and round history for Pokearena.
//!
//! Two previously assembled rosters of creatures fight a turn-based battle.
//! Each round the two active combatants strike each other simultaneously,
//! knocked out combatants are replaced by the next living member of their
//! team, and a full snapshot of both teams is appended to a navigable round
//! log.
//!
//! ## Architecture
//!
//! Leaves first:
//!
//! - **Oracle** ([`oracle`]): async access to the type-effectiveness service
//! - **Resolver** ([`resolver`]): pure damage exchange for one round
//! - **Tracker** ([`tracker`]): live teams, substitution and win detection
//! - **History** ([`history`]): append-only, rewindable round log
//! - **Controller** ([`controller`]): session lifecycle wiring the above
//!
//! Rosters and type factors come from external collaborators described by the
//! [`RosterStore`] and [`TypeFactorOracle`] traits. The [`memory`] module has
//! in-process implementations of both.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pokearena_core::{BattleController, SessionConfig, Side, TeamId};
//!
//! let mut controller = BattleController::new(store, oracle, SessionConfig::default());
//! controller.select_team(Side::A, Some(TeamId::new("1")))?;
//! controller.select_team(Side::B, Some(TeamId::new("2")))?;
//! controller.start_battle().await?;
//! let step = controller.advance_round().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod combatant;
pub mod config;
pub mod controller;
pub mod error;
pub mod history;
pub mod memory;
pub mod oracle;
pub mod resolver;
pub mod roster;
pub mod session;
pub mod team;
pub mod tracker;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use combatant::{Combatant, ElementType, HealthBand};
pub use config::SessionConfig;
pub use controller::{BattleController, Phase, RoundStep, TeamSelection};
pub use error::{BattleError, Result, ServiceError};
pub use history::{RoundLog, RoundSnapshot};
pub use oracle::{FactorPair, TypeFactorOracle};
pub use resolver::{BattleAction, RoundResolution};
pub use roster::{CreatureRecord, RosterStore, TeamCatalog, TeamId, TeamInfo, TeamRoster, TeamSummary};
pub use session::{BattleSession, RoundReport};
pub use team::{Side, Team};
pub use tracker::{RosterTracker, Substitution, WinnerOutcome};
