/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Unmitigated self-damage taken by a frozen combatant when its action is skipped.
    pub frozen_self_damage: u32,

    /// Normal attack multiplier (percent) while a crit boost is active.
    pub crit_multiplier_percent: u32,

    /// Consecutive victories required to fire `win_battles` abilities.
    pub win_streak_threshold: u32,

    /// `losing_badly` requires the player's health percentage to be strictly below this.
    pub losing_badly_player_percent: u32,

    /// `losing_badly` requires the opponent's health percentage to be strictly above this.
    pub losing_badly_enemy_percent: u32,

    /// Cooldown applied to charge abilities that do not declare their own.
    pub default_ability_cooldown: u32,

    /// Maximum number of charge abilities that may be active in one battle.
    pub max_active_abilities: usize,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_BUFFS: usize = 16;
    pub const MAX_STATUSES: usize = 4;
    pub const MAX_SKILLS: usize = 8;
    pub const MAX_TRIGGERS: usize = 10;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FROZEN_SELF_DAMAGE: u32 = 8;
    pub const DEFAULT_CRIT_MULTIPLIER_PERCENT: u32 = 150;
    pub const DEFAULT_WIN_STREAK_THRESHOLD: u32 = 3;
    pub const DEFAULT_LOSING_BADLY_PLAYER_PERCENT: u32 = 25;
    pub const DEFAULT_LOSING_BADLY_ENEMY_PERCENT: u32 = 70;
    pub const DEFAULT_ABILITY_COOLDOWN: u32 = 3;
    pub const DEFAULT_MAX_ACTIVE_ABILITIES: usize = 3;

    pub fn new() -> Self {
        Self {
            frozen_self_damage: Self::DEFAULT_FROZEN_SELF_DAMAGE,
            crit_multiplier_percent: Self::DEFAULT_CRIT_MULTIPLIER_PERCENT,
            win_streak_threshold: Self::DEFAULT_WIN_STREAK_THRESHOLD,
            losing_badly_player_percent: Self::DEFAULT_LOSING_BADLY_PLAYER_PERCENT,
            losing_badly_enemy_percent: Self::DEFAULT_LOSING_BADLY_ENEMY_PERCENT,
            default_ability_cooldown: Self::DEFAULT_ABILITY_COOLDOWN,
            max_active_abilities: Self::DEFAULT_MAX_ACTIVE_ABILITIES,
        }
    }

    pub fn with_max_active_abilities(mut self, max_active_abilities: usize) -> Self {
        self.max_active_abilities = max_active_abilities;
        self
    }

    /// Applies the crit multiplier to a raw damage value (floored).
    pub fn crit_damage(&self, raw: u32) -> u32 {
        raw.saturating_mul(self.crit_multiplier_percent) / 100
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
