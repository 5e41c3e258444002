//! `pokearena teams`

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use pokearena_api::ApiConfig;

use super::Collaborators;
use crate::render;

/// List the teams available for battle
#[derive(Parser, Debug)]
pub struct Teams {
    /// Read teams from a fixture file instead of the API
    #[arg(long)]
    pub fixture: Option<PathBuf>,
}

impl Teams {
    pub async fn execute(self, config: &ApiConfig) -> Result<()> {
        let collaborators = Collaborators::load(config, self.fixture.as_deref()).await?;
        let teams = collaborators.catalog.list_teams().await?;
        render::print_teams(&teams);
        Ok(())
    }
}
