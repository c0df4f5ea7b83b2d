use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::engine::TurnFacts;

/// Trigger category an ability accrues charge from.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ChargeTag {
    DamageTaken,
    BelowHalfHealth,
    NoDamageTaken,
    MissAttack,
    NoDamageDealt,
    NoCombatDamage,
    Debuffed,
    RngAction,
    /// Fired by battle results, never by turn facts.
    WinBattles,
    LosingBadly,
}

impl ChargeTag {
    /// Whether this tag fires for the given turn.
    pub fn fires(self, facts: &TurnFacts, config: &BattleConfig) -> bool {
        match self {
            Self::DamageTaken => facts.player_damage_taken() > 0,
            Self::BelowHalfHealth => {
                facts.player_damage_taken() > 0
                    && facts.player_health <= facts.player_max_health / 2
            }
            Self::NoDamageTaken => facts.player_damage_taken() == 0,
            Self::MissAttack => facts.missed_attack,
            Self::NoDamageDealt => {
                facts.player_damage_dealt == 0 && facts.streaks.no_player_damage_dealt >= 2
            }
            Self::NoCombatDamage => facts.streaks.no_combat_damage >= 2,
            Self::Debuffed => facts.debuffed,
            Self::RngAction => facts.randomized_action,
            Self::WinBattles => false,
            Self::LosingBadly => facts.both_alive() && is_losing_badly(facts, config),
        }
    }

    /// Tags that accrue between battles rather than from turn facts. Their
    /// charge survives the battle-start reset.
    pub fn is_run_scoped(self) -> bool {
        matches!(self, Self::WinBattles)
    }

    /// Every per-turn tag that fires for `facts`, in declaration order.
    pub fn triggered(
        facts: &TurnFacts,
        config: &BattleConfig,
    ) -> ArrayVec<ChargeTag, { BattleConfig::MAX_TRIGGERS }> {
        use strum::IntoEnumIterator;

        Self::iter().filter(|tag| tag.fires(facts, config)).collect()
    }
}

// Integer cross-multiplication keeps the thresholds exact.
fn is_losing_badly(facts: &TurnFacts, config: &BattleConfig) -> bool {
    if facts.player_max_health == 0 || facts.enemy_max_health == 0 {
        return false;
    }

    let player = u64::from(facts.player_health) * 100;
    let player_limit =
        u64::from(config.losing_badly_player_percent) * u64::from(facts.player_max_health);
    let enemy = u64::from(facts.enemy_health) * 100;
    let enemy_limit =
        u64::from(config.losing_badly_enemy_percent) * u64::from(facts.enemy_max_health);

    player < player_limit && enemy > enemy_limit
}
