//! Subcommands.

mod battle;
mod pokemon;
mod teams;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use pokearena_api::{ApiClient, ApiConfig};
use pokearena_core::memory::Fixture;
use pokearena_core::{RosterStore, TeamCatalog, TypeFactorOracle};

pub use battle::Battle;
pub use pokemon::PokemonCommand;
pub use teams::Teams;

/// Where rosters, the team listing and type factors come from.
pub(crate) struct Collaborators {
    pub roster: Arc<dyn RosterStore>,
    pub catalog: Arc<dyn TeamCatalog>,
    pub oracle: Arc<dyn TypeFactorOracle>,
}

impl Collaborators {
    /// Reads everything from a fixture file when one is given, from the API
    /// otherwise.
    pub async fn load(config: &ApiConfig, fixture: Option<&Path>) -> Result<Self> {
        match fixture {
            Some(path) => Self::from_fixture(path).await,
            None => {
                let client = Arc::new(ApiClient::new(config)?);
                Ok(Self {
                    roster: client.clone(),
                    catalog: client.clone(),
                    oracle: client,
                })
            }
        }
    }

    async fn from_fixture(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        let fixture: Fixture = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse fixture {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            teams = fixture.teams.len(),
            factors = fixture.factors.len(),
            "playing offline from fixture"
        );

        let (store, table) = fixture.into_collaborators();
        let store = Arc::new(store);
        Ok(Self {
            roster: store.clone(),
            catalog: store,
            oracle: Arc::new(table),
        })
    }
}
