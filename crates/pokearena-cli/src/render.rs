//! Plain-text rendering of battle state and catalog records.

use pokearena_api::PokemonRecord;
use pokearena_core::{
    BattleSession, Combatant, HealthBand, RoundLog, RoundReport, Side, Team, TeamSummary,
};

const BAR_WIDTH: u32 = 20;

/// Health bar such as `[#############-------]`.
///
/// Healthy combatants fill with `#`, wounded ones with `!`.
pub fn health_bar(combatant: &Combatant) -> String {
    let filled = combatant.health_percent() * BAR_WIDTH / 100;
    let fill = match combatant.health_band() {
        HealthBand::Healthy => "#",
        HealthBand::Wounded => "!",
        HealthBand::Fainted => "",
    };
    let filled = filled as usize;
    format!(
        "[{}{}]",
        fill.repeat(filled),
        "-".repeat(BAR_WIDTH as usize - filled)
    )
}

fn member_line(session: &BattleSession, side: Side, team: &Team, index: usize) -> String {
    let member = &team.members()[index];
    let marker = if team.active_index() == Some(index) {
        ">"
    } else {
        " "
    };
    let champion = if session.is_winning_combatant(side, index) {
        " (winner)"
    } else {
        ""
    };
    let status = if member.is_knocked_out() { " KO" } else { "" };
    format!(
        " {marker} {:<12} {:<9} pow {:>4} {} {:>4}/{:<4}{status}{champion}",
        member.name(),
        member.element(),
        member.power(),
        health_bar(member),
        member.life(),
        member.initial_life(),
    )
}

/// Prints both teams as of the displayed round.
pub fn print_state(session: &BattleSession) {
    let latest = if session.is_last_round() { "" } else { " (history)" };
    println!();
    println!("== Round {}{latest} ==", session.current_round());
    for side in Side::BOTH {
        let Some(team) = session.team(side) else {
            continue;
        };
        println!("{side}: {} ({} standing)", team.name(), team.remaining());
        for index in 0..team.len() {
            println!("{}", member_line(session, side, team, index));
        }
    }
    for action in session.last_actions() {
        println!("  {} hit {} for {}", action.attacker, action.defender, action.damage);
    }
    if let Some(winner) = session.winner() {
        println!("*** {} ***", winner.label());
    }
}

/// Prints what a newly played round changed.
pub fn print_report(report: &RoundReport) {
    for sub in &report.substitutions {
        match &sub.replacement {
            Some(next) => println!("{}: {} fainted, {next} steps in", sub.side, sub.knocked_out),
            None => println!("{}: {} fainted, nobody left", sub.side, sub.knocked_out),
        }
    }
}

/// Prints every recorded round, marking the displayed one.
pub fn print_log(log: &RoundLog) {
    for entry in log.entries() {
        let marker = if entry.round_number() == log.current_round() {
            ">"
        } else {
            " "
        };
        let actions = entry
            .actions()
            .iter()
            .map(|a| format!("{} -> {} ({})", a.attacker, a.defender, a.damage))
            .collect::<Vec<_>>()
            .join(", ");
        let actions = if actions.is_empty() {
            "start".to_owned()
        } else {
            actions
        };
        let winner = entry
            .winner()
            .map(|w| format!("  [{}]", w.label()))
            .unwrap_or_default();
        println!("{marker} {:>3}: {actions}{winner}", entry.round_number());
    }
}

/// Prints the team listing.
pub fn print_teams(teams: &[TeamSummary]) {
    if teams.is_empty() {
        println!("No teams.");
        return;
    }
    println!("{:<8} {:<24} {:>8}", "ID", "TEAM", "POWER");
    for team in teams {
        println!("{:<8} {:<24} {:>8.0}", team.id.as_str(), team.team_name, team.total_power);
    }
}

/// Prints the creature listing.
pub fn print_pokemon_list(records: &[PokemonRecord]) {
    println!("{:<6} {:<16} {:<10} {:>5} {:>5}", "ID", "NAME", "TYPE", "POW", "LIFE");
    for record in records {
        println!(
            "{:<6} {:<16} {:<10} {:>5} {:>5}",
            record.id,
            record.name,
            record.type_name.as_deref().unwrap_or("?"),
            record.power,
            record.life
        );
    }
}

/// Prints one creature.
pub fn print_pokemon(record: &PokemonRecord) {
    println!("id:    {}", record.id);
    println!("name:  {}", record.name);
    println!("type:  {}", record.type_name.as_deref().unwrap_or("?"));
    println!("power: {}", record.power);
    println!("life:  {}", record.life);
    if let Some(image) = &record.image {
        println!("image: {image}");
    }
}

pub fn print_prompt() {
    use std::io::Write;

    print!("[a]dvance [p]rev [n]ext [l]og new [q]uit > ");
    let _ = std::io::stdout().flush();
}
