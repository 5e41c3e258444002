//! Type-effectiveness oracle access.
//!
//! The oracle answers one question: how much damage does an attacker of one
//! elemental type deal to a defender of another, as a multiplier. A round
//! needs two answers (one per attack direction). Both lookups are issued
//! together and must both succeed before the round may touch any state.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::combatant::ElementType;
use crate::error::{BattleError, ServiceError};

/// Source of type-effectiveness multipliers (`GET /api/type-factor/{a}/{d}`).
#[async_trait]
pub trait TypeFactorOracle: Send + Sync {
    /// Returns the damage multiplier for `attacker` hitting `defender`.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] if the oracle cannot answer.
    async fn factor(&self, attacker: &ElementType, defender: &ElementType)
        -> Result<f64, ServiceError>;
}

/// The two multipliers needed for one round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorPair {
    /// Multiplier for side A's active combatant hitting side B's.
    pub a_to_b: f64,
    /// Multiplier for side B's active combatant hitting side A's.
    pub b_to_a: f64,
}

impl FactorPair {
    /// Creates a pair.
    #[must_use]
    pub const fn new(a_to_b: f64, b_to_a: f64) -> Self {
        Self { a_to_b, b_to_a }
    }
}

/// Looks up both attack directions concurrently.
///
/// Each lookup is bounded by `limit`. The first failure wins; the other
/// lookup is dropped.
///
/// # Errors
///
/// Returns [`BattleError::TypeFactorUnavailable`] naming the direction that
/// failed, timed out, or answered with a negative or non-finite factor.
pub async fn lookup_pair(
    oracle: &dyn TypeFactorOracle,
    element_a: &ElementType,
    element_b: &ElementType,
    limit: Duration,
) -> Result<FactorPair, BattleError> {
    let (a_to_b, b_to_a) = tokio::try_join!(
        lookup(oracle, element_a, element_b, limit),
        lookup(oracle, element_b, element_a, limit),
    )?;
    tracing::debug!(%element_a, %element_b, a_to_b, b_to_a, "type factors resolved");
    Ok(FactorPair { a_to_b, b_to_a })
}

async fn lookup(
    oracle: &dyn TypeFactorOracle,
    attacker: &ElementType,
    defender: &ElementType,
    limit: Duration,
) -> Result<f64, BattleError> {
    let outcome = match tokio::time::timeout(limit, oracle.factor(attacker, defender)).await {
        Ok(answer) => answer.and_then(validate),
        Err(_) => Err(ServiceError::TimedOut { after: limit }),
    };
    outcome.map_err(|source| BattleError::TypeFactorUnavailable {
        attacker: attacker.clone(),
        defender: defender.clone(),
        source,
    })
}

fn validate(factor: f64) -> Result<f64, ServiceError> {
    if factor.is_finite() && factor >= 0.0 {
        Ok(factor)
    } else {
        Err(ServiceError::Malformed(format!(
            "type factor {factor} is not a non-negative number"
        )))
    }
}
