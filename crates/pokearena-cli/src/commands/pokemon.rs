//! `pokearena pokemon`

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use pokearena_api::{ApiClient, ApiConfig, PokemonUpdate};

use crate::render;

/// Creature catalog commands
#[derive(Subcommand, Debug)]
pub enum PokemonCommand {
    /// List every creature, ordered by name
    List,

    /// Show one creature
    Show {
        /// Creature id
        id: String,
    },

    /// Change one or more fields of a creature
    Edit(Edit),
}

/// Fields to change; anything left out keeps its current value.
#[derive(Args, Debug, Default)]
pub struct Edit {
    /// Creature id
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New attack strength
    #[arg(long)]
    pub power: Option<u32>,

    /// New starting life
    #[arg(long)]
    pub life: Option<u32>,

    /// New type name
    #[arg(long = "type")]
    pub type_name: Option<String>,

    /// New image reference
    #[arg(long)]
    pub image: Option<String>,
}

impl Edit {
    fn apply(&self, update: &mut PokemonUpdate) {
        if let Some(name) = &self.name {
            update.name.clone_from(name);
        }
        if let Some(power) = self.power {
            update.power = power;
        }
        if let Some(life) = self.life {
            update.life = life;
        }
        if let Some(type_name) = &self.type_name {
            update.type_name.clone_from(type_name);
        }
        if let Some(image) = &self.image {
            update.image = Some(image.clone());
        }
    }
}

impl PokemonCommand {
    pub async fn execute(self, config: &ApiConfig) -> Result<()> {
        let client = ApiClient::new(config)?;
        match self {
            Self::List => {
                let records = client.list_pokemon().await?;
                render::print_pokemon_list(&records);
            }
            Self::Show { id } => {
                let record = client
                    .pokemon(&id)
                    .await
                    .with_context(|| format!("Failed to load creature {id}"))?;
                render::print_pokemon(&record);
            }
            Self::Edit(edit) => {
                let current = client
                    .pokemon(&edit.id)
                    .await
                    .with_context(|| format!("Failed to load creature {}", edit.id))?;
                let mut update = current.to_update();
                edit.apply(&mut update);

                let stored = client
                    .update_pokemon(&edit.id, &update)
                    .await
                    .with_context(|| format!("Failed to update creature {}", edit.id))?;
                println!("Updated:");
                render::print_pokemon(&stored);
            }
        }
        Ok(())
    }
}
