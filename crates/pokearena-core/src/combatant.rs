//! Combatant types.
//!
//! A [`Combatant`] is the battle-local copy of one creature. It is built from a
//! roster-supplied [`CreatureRecord`] so later edits to the roster never reach
//! a battle that is already running.
//!
//! # Example
//!
//! ```
//! use pokearena_core::combatant::{Combatant, ElementType};
//!
//! let mut ember = Combatant::new("Ember", ElementType::new("fire"), 50, 100);
//! ember.take_damage(60);
//! assert_eq!(ember.life(), 40);
//! assert!(!ember.is_knocked_out());
//!
//! ember.take_damage(60);
//! assert_eq!(ember.life(), 0);
//! assert!(ember.is_knocked_out());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::roster::CreatureRecord;

/// Elemental type tag of a creature (`"fire"`, `"water"`, ...).
///
/// The tag is opaque to the battle core; its meaning lives entirely in the
/// type-factor oracle.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementType(String);

impl ElementType {
    /// Creates an element tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementType({})", self.0)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Coarse health state used for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthBand {
    /// More than 50 life left.
    Healthy,
    /// Between 1 and 50 life left.
    Wounded,
    /// Knocked out.
    Fainted,
}

/// Battle-instance state of one creature.
///
/// Life only ever decreases during a battle and is clamped at zero. A
/// combatant is knocked out exactly when its life is zero; the flag is derived
/// rather than stored so it can never disagree with life.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    name: String,
    element: ElementType,
    power: u32,
    life: u32,
    initial_life: u32,
    image: Option<String>,
}

impl Combatant {
    /// Creates a combatant at full life.
    #[must_use]
    pub fn new(name: impl Into<String>, element: ElementType, power: u32, life: u32) -> Self {
        Self {
            name: name.into(),
            element,
            power,
            life,
            initial_life: life,
            image: None,
        }
    }

    /// Copies a roster record into battle-local state.
    #[must_use]
    pub fn from_record(record: &CreatureRecord) -> Self {
        Self {
            name: record.name.clone(),
            element: record.element.clone(),
            power: record.power,
            life: record.life,
            initial_life: record.life,
            image: record.image.clone(),
        }
    }

    /// Sets the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Elemental type.
    #[must_use]
    pub fn element(&self) -> &ElementType {
        &self.element
    }

    /// Attack strength.
    #[must_use]
    pub fn power(&self) -> u32 {
        self.power
    }

    /// Current life.
    #[must_use]
    pub fn life(&self) -> u32 {
        self.life
    }

    /// Life the combatant entered the battle with.
    #[must_use]
    pub fn initial_life(&self) -> u32 {
        self.initial_life
    }

    /// Opaque image reference, if the roster supplied one.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Returns true once life has reached zero.
    #[must_use]
    pub fn is_knocked_out(&self) -> bool {
        self.life == 0
    }

    /// Life clamped to `[0, 100]` for health bars.
    #[must_use]
    pub fn health_percent(&self) -> u32 {
        self.life.min(100)
    }

    /// Presentation band for the current life.
    #[must_use]
    pub fn health_band(&self) -> HealthBand {
        match self.life {
            0 => HealthBand::Fainted,
            1..=50 => HealthBand::Wounded,
            _ => HealthBand::Healthy,
        }
    }

    /// Subtracts `amount` from life, stopping at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.life = self.life.saturating_sub(amount);
    }
}
