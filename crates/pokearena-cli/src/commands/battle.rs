//! `pokearena battle`
//!
//! Plays a battle either to the end in one go (`--auto`) or interactively,
//! one command per line:
//!
//! - `a` / `advance` / empty line: play the next round
//! - `p` / `prev`: show the previous round
//! - `n` / `next`: show the next round
//! - `l` / `log`: print the round history
//! - `new`: start over with the same teams
//! - `q` / `quit`: leave

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use pokearena_api::ApiConfig;
use pokearena_core::{BattleController, Phase, RoundStep, SessionConfig, Side, TeamId};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::Collaborators;
use crate::render;

/// Fight a battle between two teams
#[derive(Parser, Debug)]
pub struct Battle {
    /// Team for side 1
    pub team_a: String,

    /// Team for side 2 (may be the same team)
    pub team_b: String,

    /// Play every round without prompting
    #[arg(long)]
    pub auto: bool,

    /// Stop an automatic battle after this many rounds
    #[arg(long, default_value_t = 500)]
    pub max_rounds: u32,

    /// Read rosters and type factors from a fixture file instead of the API
    #[arg(long)]
    pub fixture: Option<PathBuf>,
}

enum Input {
    Advance,
    Previous,
    Next,
    Log,
    New,
    Quit,
    Unknown(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "" | "a" | "advance" => Self::Advance,
            "p" | "prev" | "previous" => Self::Previous,
            "n" | "next" => Self::Next,
            "l" | "log" => Self::Log,
            "new" => Self::New,
            "q" | "quit" | "exit" => Self::Quit,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

impl Battle {
    pub async fn execute(self, config: &ApiConfig) -> Result<()> {
        let collaborators = Collaborators::load(config, self.fixture.as_deref()).await?;
        let session_config = session_config(config);
        let mut controller =
            BattleController::new(collaborators.roster, collaborators.oracle, session_config);

        self.start(&mut controller).await?;
        render::print_state(controller.session());

        if self.auto {
            self.run_auto(&mut controller).await
        } else {
            self.run_interactive(&mut controller).await
        }
    }

    async fn start(&self, controller: &mut BattleController) -> Result<()> {
        controller.select_team(Side::A, Some(TeamId::new(self.team_a.as_str())))?;
        controller.select_team(Side::B, Some(TeamId::new(self.team_b.as_str())))?;
        controller.start_battle().await?;
        Ok(())
    }

    async fn run_auto(&self, controller: &mut BattleController) -> Result<()> {
        for _ in 0..self.max_rounds {
            match controller.advance_round().await? {
                RoundStep::Resolved(report) => {
                    render::print_report(&report);
                    render::print_state(controller.session());
                }
                RoundStep::NoContest => break,
            }
            if controller.phase() == Phase::Concluded {
                return Ok(());
            }
        }
        if controller.phase() != Phase::Concluded {
            bail!("no winner after {} rounds", controller.session().log().len().saturating_sub(1));
        }
        Ok(())
    }

    async fn run_interactive(&self, controller: &mut BattleController) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        render::print_prompt();

        while let Some(line) = lines.next_line().await? {
            match Input::parse(&line) {
                Input::Advance => match controller.advance_round().await {
                    Ok(RoundStep::Resolved(report)) => {
                        render::print_report(&report);
                        render::print_state(controller.session());
                    }
                    Ok(RoundStep::NoContest) => println!("The battle is over. Try `new` or `q`."),
                    Err(err) if err.is_retryable() => println!("{err}. Try again."),
                    Err(err) => return Err(err.into()),
                },
                Input::Previous => {
                    if controller.previous_round().is_some() {
                        render::print_state(controller.session());
                    } else {
                        println!("Already at round 1.");
                    }
                }
                Input::Next => {
                    if controller.next_round().is_some() {
                        render::print_state(controller.session());
                    } else {
                        println!("Already at the latest round.");
                    }
                }
                Input::Log => render::print_log(controller.session().log()),
                Input::New => {
                    controller.new_battle();
                    self.start(controller).await?;
                    render::print_state(controller.session());
                }
                Input::Quit => return Ok(()),
                Input::Unknown(other) => {
                    println!("Unknown command `{other}` (a, p, n, l, new, q).");
                }
            }
            render::print_prompt();
        }
        Ok(())
    }
}

fn session_config(config: &ApiConfig) -> SessionConfig {
    // Collaborator limits are capped at the HTTP request limit.
    let defaults = SessionConfig::default();
    SessionConfig {
        roster_timeout: defaults.roster_timeout.min(config.request_timeout),
        factor_timeout: defaults.factor_timeout.min(config.request_timeout),
    }
}
