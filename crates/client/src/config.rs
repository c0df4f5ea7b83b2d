//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

/// Settings for one battle run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// TOML battle tuning; built-in defaults when unset.
    pub config_path: Option<PathBuf>,
    /// RON roster; the built-in roster when unset.
    pub roster_path: Option<PathBuf>,
    pub seed: u64,
    /// Maximum number of battles to fight.
    pub battles: u32,
    pub log_dir: Option<PathBuf>,
    /// Where to write the JSON battle summaries.
    pub report_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            roster_path: None,
            seed: 42,
            battles: 5,
            log_dir: None,
            report_path: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_CONFIG` - Battle tuning TOML file (default: built-in)
    /// - `BATTLE_ROSTER` - Roster RON file (default: built-in)
    /// - `BATTLE_SEED` - Seed for fighter rolls (default: 42)
    /// - `BATTLE_COUNT` - Battles to fight (default: 5)
    /// - `BATTLE_LOG_DIR` - Directory for a log file (default: stderr only)
    /// - `BATTLE_REPORT` - JSON report output path (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let path = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        config.config_path = path("BATTLE_CONFIG");
        config.roster_path = path("BATTLE_ROSTER");
        config.log_dir = path("BATTLE_LOG_DIR");
        config.report_path = path("BATTLE_REPORT");

        if let Some(seed) = parse(&lookup, "BATTLE_SEED") {
            config.seed = seed;
        }
        if let Some(battles) = parse::<u32>(&lookup, "BATTLE_COUNT") {
            config.battles = battles.max(1);
        }

        config
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config(&[]), ClientConfig::default());
    }

    #[test]
    fn reads_all_variables() {
        let config = config(&[
            ("BATTLE_CONFIG", "battle.toml"),
            ("BATTLE_ROSTER", "roster.ron"),
            ("BATTLE_SEED", "7"),
            ("BATTLE_COUNT", "3"),
            ("BATTLE_LOG_DIR", "logs"),
            ("BATTLE_REPORT", "report.json"),
        ]);

        assert_eq!(config.config_path, Some(PathBuf::from("battle.toml")));
        assert_eq!(config.roster_path, Some(PathBuf::from("roster.ron")));
        assert_eq!(config.seed, 7);
        assert_eq!(config.battles, 3);
        assert_eq!(config.log_dir, Some(PathBuf::from("logs")));
        assert_eq!(config.report_path, Some(PathBuf::from("report.json")));
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = config(&[("BATTLE_SEED", "many"), ("BATTLE_COUNT", "0")]);
        assert_eq!(config.seed, 42);
        assert_eq!(config.battles, 1);
    }
}
