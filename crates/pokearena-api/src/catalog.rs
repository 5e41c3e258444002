//! Creature catalog records (`/api/pokemon`).
//!
//! These are the editable creatures behind team rosters. The catalog speaks
//! `typeName` where rosters speak `type`, and identifies records by an id the
//! server may send as a string or a number.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// A creature as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRecord {
    /// Catalog identifier.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Image reference.
    #[serde(default)]
    pub image: Option<String>,
    /// Attack strength.
    pub power: u32,
    /// Starting life.
    pub life: u32,
    /// Elemental type name; `None` if the record's type is unknown.
    #[serde(rename = "typeName", default)]
    pub type_name: Option<String>,
}

impl PokemonRecord {
    /// An update that rewrites the record with its current values.
    #[must_use]
    pub fn to_update(&self) -> PokemonUpdate {
        PokemonUpdate {
            name: self.name.clone(),
            power: self.power,
            life: self.life,
            type_name: self.type_name.clone().unwrap_or_default(),
            image: self.image.clone(),
        }
    }
}

/// Body of `PUT /api/pokemon/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonUpdate {
    /// New display name.
    pub name: String,
    /// New attack strength.
    pub power: u32,
    /// New starting life.
    pub life: u32,
    /// New type, by name (matched case-insensitively by the server).
    #[serde(rename = "typeName")]
    pub type_name: String,
    /// New image reference.
    pub image: Option<String>,
}

impl PokemonUpdate {
    /// Applies the checks the server performs, so bad input never leaves
    /// the client.
    ///
    /// # Errors
    ///
    /// [`ApiError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Invalid("name is required"));
        }
        if self.type_name.trim().is_empty() {
            return Err(ApiError::Invalid("type is required"));
        }
        if self.power == 0 {
            return Err(ApiError::Invalid("power must be positive"));
        }
        if self.life == 0 {
            return Err(ApiError::Invalid("life must be positive"));
        }
        Ok(())
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(id) => id,
        Raw::Number(id) => id.to_string(),
    })
}
