//! Combat resolver for one round of battle.
//!
//! A round is a simultaneous exchange: both damages are computed from the
//! combatants as they stood at the start of the round, then applied together.
//! Neither attack sees the other's result.
//!
//! # Damage
//!
//! `damage = round(power * factor)`, rounded half up, never negative. Life is
//! reduced by the damage taken and clamped at zero; a combatant left at zero
//! is knocked out.
//!
//! # Example
//!
//! ```
//! use pokearena_core::combatant::{Combatant, ElementType};
//! use pokearena_core::oracle::FactorPair;
//! use pokearena_core::resolver::resolve_round;
//!
//! let mut ember = Combatant::new("Ember", ElementType::new("fire"), 50, 100);
//! let mut bubbles = Combatant::new("Bubbles", ElementType::new("water"), 30, 100);
//!
//! let resolution = resolve_round(&ember, &bubbles, FactorPair::new(0.5, 2.0));
//! assert_eq!(resolution.damage_to_b, 25);
//! assert_eq!(resolution.damage_to_a, 60);
//!
//! resolution.apply(&mut ember, &mut bubbles);
//! assert_eq!(ember.life(), 40);
//! assert_eq!(bubbles.life(), 75);
//! ```

use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;
use crate::oracle::FactorPair;

/// One attack within a round.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattleAction {
    /// Name of the attacking combatant.
    pub attacker: String,
    /// Name of the defending combatant.
    pub defender: String,
    /// Damage dealt.
    pub damage: u32,
}

/// Outcome of resolving one round, before it is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResolution {
    /// Damage side A's active combatant takes.
    pub damage_to_a: u32,
    /// Damage side B's active combatant takes.
    pub damage_to_b: u32,
    /// The two attacks, A→B first, then B→A.
    pub actions: Vec<BattleAction>,
}

impl RoundResolution {
    /// Applies both damages at once.
    pub fn apply(&self, active_a: &mut Combatant, active_b: &mut Combatant) {
        active_a.take_damage(self.damage_to_a);
        active_b.take_damage(self.damage_to_b);
    }
}

/// Computes `round(power * factor)`, rounding half up and never below zero.
#[must_use]
pub fn compute_damage(power: u32, factor: f64) -> u32 {
    let raw = (f64::from(power) * factor).max(0.0);
    // f64::round rounds half away from zero, which is half up for raw >= 0.
    // The cast saturates, so NaN maps to 0 and huge products to u32::MAX.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let damage = raw.round() as u32;
    damage
}

/// Resolves the damage exchange between two active combatants.
///
/// Pure: reads only the start-of-round state and returns what should happen.
/// Callers must only invoke this while both combatants are standing.
#[must_use]
pub fn resolve_round(
    active_a: &Combatant,
    active_b: &Combatant,
    factors: FactorPair,
) -> RoundResolution {
    let damage_to_b = compute_damage(active_a.power(), factors.a_to_b);
    let damage_to_a = compute_damage(active_b.power(), factors.b_to_a);

    tracing::debug!(
        attacker_a = active_a.name(),
        attacker_b = active_b.name(),
        damage_to_a,
        damage_to_b,
        "round resolved"
    );

    RoundResolution {
        damage_to_a,
        damage_to_b,
        actions: vec![
            BattleAction {
                attacker: active_a.name().to_owned(),
                defender: active_b.name().to_owned(),
                damage: damage_to_b,
            },
            BattleAction {
                attacker: active_b.name().to_owned(),
                defender: active_a.name().to_owned(),
                damage: damage_to_a,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::ElementType;

    fn fighter(name: &str, element: &str, power: u32, life: u32) -> Combatant {
        Combatant::new(name, ElementType::new(element), power, life)
    }

    mod damage_tests {
        use super::*;

        #[test]
        fn multiplies_power_by_factor() {
            assert_eq!(compute_damage(50, 0.5), 25);
            assert_eq!(compute_damage(30, 2.0), 60);
            assert_eq!(compute_damage(40, 1.0), 40);
        }

        #[test]
        fn rounds_half_up() {
            assert_eq!(compute_damage(5, 0.5), 3); // 2.5
            assert_eq!(compute_damage(3, 0.5), 2); // 1.5
            assert_eq!(compute_damage(10, 0.24), 2); // 2.4
            assert_eq!(compute_damage(10, 0.26), 3); // 2.6
        }

        #[test]
        fn zero_factor_deals_nothing() {
            assert_eq!(compute_damage(120, 0.0), 0);
        }

        #[test]
        fn never_negative() {
            assert_eq!(compute_damage(50, -2.0), 0);
            assert_eq!(compute_damage(50, f64::NAN), 0);
        }
    }

    mod resolve_round_tests {
        use super::*;

        #[test]
        fn actions_are_a_then_b() {
            let a = fighter("Ember", "fire", 50, 100);
            let b = fighter("Bubbles", "water", 30, 100);
            let resolution = resolve_round(&a, &b, FactorPair::new(0.5, 2.0));

            assert_eq!(
                resolution.actions,
                vec![
                    BattleAction {
                        attacker: "Ember".into(),
                        defender: "Bubbles".into(),
                        damage: 25,
                    },
                    BattleAction {
                        attacker: "Bubbles".into(),
                        defender: "Ember".into(),
                        damage: 60,
                    },
                ]
            );
        }

        #[test]
        fn resolution_is_simultaneous() {
            // A would knock B out first in a sequential model, but B still strikes.
            let mut a = fighter("Glass", "normal", 100, 10);
            let mut b = fighter("Cannon", "normal", 100, 10);
            let resolution = resolve_round(&a, &b, FactorPair::new(1.0, 1.0));
            resolution.apply(&mut a, &mut b);

            assert!(a.is_knocked_out());
            assert!(b.is_knocked_out());
            assert_eq!(resolution.actions[1].damage, 100);
        }

        #[test]
        fn overkill_is_clamped() {
            let mut a = fighter("Ember", "fire", 50, 40);
            let mut b = fighter("Bubbles", "water", 30, 75);
            let resolution = resolve_round(&a, &b, FactorPair::new(0.5, 2.0));
            resolution.apply(&mut a, &mut b);

            assert_eq!(a.life(), 0);
            assert!(a.is_knocked_out());
            assert_eq!(b.life(), 50);
        }

        #[test]
        fn resolving_does_not_mutate() {
            let a = fighter("Ember", "fire", 50, 100);
            let b = fighter("Bubbles", "water", 30, 100);
            let _ = resolve_round(&a, &b, FactorPair::new(0.5, 2.0));
            assert_eq!(a.life(), 100);
            assert_eq!(b.life(), 100);
        }
    }
}
