//! Emotion battle client binary.
//!
//! Composition root: loads `.env` and environment configuration, sets up
//! logging, builds a [`BattleSession`] from the configured roster and fights
//! a series of AI-driven battles until the run ends or the battle count is
//! reached.
//!
//! # Examples
//!
//! ```bash
//! BATTLE_SEED=7 BATTLE_COUNT=3 RUST_LOG=debug cargo run -p battle-client
//! ```
mod config;
mod logging;

use anyhow::{Context, Result};
use battle_content::{ConfigLoader, Roster, RosterLoader};
use battle_core::{BattleConfig, CombatantView};
use runtime::{BattleSession, BattleSummary, UtilityAiProvider};

use crate::config::ClientConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting emotion battle client");
    tracing::info!("Seed: {}, battles: {}", config.seed, config.battles);

    let battle_config = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => BattleConfig::default(),
    };
    let roster = match &config.roster_path {
        Some(path) => RosterLoader::load(path)?,
        None => Roster::builtin(),
    };

    let summaries = run(&config, &battle_config, &roster)?;

    if let Some(path) = &config.report_path {
        let json = serde_json::to_string_pretty(&summaries)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        tracing::info!("Report written to {}", path.display());
    }
    Ok(())
}

fn run(
    config: &ClientConfig,
    battle_config: &BattleConfig,
    roster: &Roster,
) -> Result<Vec<BattleSummary>> {
    let mut session = BattleSession::from_roster(battle_config, roster)?;
    let mut ai = UtilityAiProvider::default();
    let mut player = roster.player.spawn(config.seed);
    let mut summaries = Vec::new();

    tracing::info!("Equipped emotions: {:?}", session.tracker().active_names());

    for index in 0..config.battles {
        if session.is_over() {
            break;
        }

        player.restore();
        let mut enemy = session
            .next_enemy(roster)?
            .spawn(config.seed.wrapping_add(u64::from(index) + 1));

        let summary = session.fight(&mut player, &mut enemy, &mut ai)?;
        tracing::info!(
            "Battle {} vs {}: {} in {} turns (hp {}/{}, xp {:?})",
            summary.battle,
            summary.enemy,
            summary.outcome,
            summary.turns,
            player.health(),
            player.max_health(),
            summary.xp_reward,
        );
        for activation in summary.report.activations() {
            tracing::info!("  {} fired ({})", activation.name, activation.tag);
        }
        summaries.push(summary);
    }

    let run = session.run();
    tracing::info!(
        "Run finished: {} fought, {} won, {} lost",
        run.battles_fought,
        run.battles_won,
        run.battles_lost()
    );
    Ok(summaries)
}
