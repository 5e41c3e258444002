//! Cross-module tests for the battle core.
//!
//! - `scenarios.rs`: end-to-end battles driven through the controller
//! - `properties.rs`: randomized checks of the battle and history invariants
//! - `helpers.rs`: rosters, collaborators and controller factories

mod helpers;

pub use helpers::*;
