//! # Pokearena API
//!
//! HTTP client for the services a Pokearena battle depends on.
//!
//! [`ApiClient`] implements the battle core's collaborator traits
//! ([`RosterStore`](pokearena_core::RosterStore),
//! [`TeamCatalog`](pokearena_core::TeamCatalog) and
//! [`TypeFactorOracle`](pokearena_core::TypeFactorOracle)) over the REST API,
//! and adds the creature catalog endpoints used to edit creatures.
//!
//! ## Endpoints
//!
//! | Method | Path                          | Used by                    |
//! |--------|-------------------------------|----------------------------|
//! | GET    | `/api/teams`                  | [`ApiClient::list_teams`]  |
//! | GET    | `/api/team/{id}`              | [`ApiClient::team_roster`] |
//! | GET    | `/api/type-factor/{a}/{d}`    | [`ApiClient::type_factor`] |
//! | GET    | `/api/pokemon`                | [`ApiClient::list_pokemon`]|
//! | GET    | `/api/pokemon/{id}`           | [`ApiClient::pokemon`]     |
//! | PUT    | `/api/pokemon/{id}`           | [`ApiClient::update_pokemon`] |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;

pub use catalog::{PokemonRecord, PokemonUpdate};
pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
