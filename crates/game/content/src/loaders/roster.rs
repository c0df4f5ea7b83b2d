//! Roster loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};
use crate::roster::Roster;

/// Loader for rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    ///
    /// RON format: `Roster(player: ..., enemies: [...], emotions: [...])`
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        let roster = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid roster {}: {}", path.display(), e))?;
        Ok(roster)
    }

    pub fn parse(content: &str) -> LoadResult<Roster> {
        let roster: Roster = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;
        Self::validate(&roster)?;
        Ok(roster)
    }

    fn validate(roster: &Roster) -> LoadResult<()> {
        if roster.player.max_health == 0 {
            anyhow::bail!("player '{}' has zero max_health", roster.player.name);
        }
        if roster.enemies.is_empty() {
            anyhow::bail!("roster has no enemies");
        }
        for fighter in std::iter::once(&roster.player).chain(&roster.enemies) {
            if fighter.max_health == 0 {
                anyhow::bail!("fighter '{}' has zero max_health", fighter.name);
            }
            if fighter.skills.len() > BattleConfig::MAX_SKILLS {
                anyhow::bail!(
                    "fighter '{}' has {} skills (maximum {})",
                    fighter.name,
                    fighter.skills.len(),
                    BattleConfig::MAX_SKILLS
                );
            }
        }
        Ok(())
    }
}
