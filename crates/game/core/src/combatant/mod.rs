//! Contract between the turn engine and externally-owned combatants.
//!
//! The engine never owns a combatant. Players and enemies are implemented
//! elsewhere (see `battle-content`) and consumed through [`CombatantView`],
//! which keeps mitigation, resistances and skill effects on the entity side.
//! The engine observes outcomes only through health deltas.

mod skill;

pub use skill::{SkillCapability, SkillIntent, SkillSummary};

use crate::status::StatusKind;

/// Combat statistic targeted by buffs and debuffs.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Stat {
    Attack,
    Defense,
}

/// Who caused a damage instance.
///
/// Attributed damage goes through the target's mitigation; unattributed
/// damage (frozen self-damage, lingering effects) is applied raw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribution<'a> {
    Attacker(&'a str),
    Unattributed,
}

impl Attribution<'_> {
    pub fn is_attributed(&self) -> bool {
        matches!(self, Self::Attacker(_))
    }
}

/// Health, stat and status surface of a combatant, as seen by the engine.
///
/// # Invariants
///
/// - `health() <= max_health()` at all times
/// - `take_damage` never raises health; `heal` never exceeds `max_health()`
/// - Status queries reflect the state after the most recent `apply_status`
pub trait CombatantView {
    fn name(&self) -> &str;

    fn health(&self) -> u32;

    fn max_health(&self) -> u32;

    fn is_alive(&self) -> bool {
        self.health() > 0
    }

    /// Effective attack including active buffs and debuffs.
    fn attack(&self) -> u32;

    /// Applies damage. Mitigation and resistances are the implementor's concern.
    fn take_damage(&mut self, amount: u32, attacker: Attribution<'_>);

    fn heal(&mut self, amount: u32);

    /// Adds a buff (positive magnitude) or debuff (negative magnitude) stack.
    fn apply_buff(&mut self, stat: Stat, magnitude: i32, duration: u32);

    /// Inflicts a timed status. The matching flag is observable immediately.
    fn inflict_status(&mut self, status: StatusKind, turns: u32);

    fn is_frozen(&self) -> bool;

    fn is_stunned(&self) -> bool;

    fn is_invisible(&self) -> bool;

    fn has_extra_turn(&self) -> bool;

    fn set_extra_turn(&mut self, granted: bool);

    /// Whether the temporary crit-boost resource is active.
    fn has_crit_boost(&self) -> bool;

    fn grant_crit_boost(&mut self, turns: u32);

    /// Summed magnitude of active attack debuffs (zero when none).
    fn attack_debuff(&self) -> u32;

    /// Summed magnitude of active defense debuffs (zero when none).
    fn defense_debuff(&self) -> u32;

    fn is_debuffed(&self) -> bool {
        self.attack_debuff() > 0 || self.defense_debuff() > 0
    }

    fn skills(&self) -> Vec<SkillSummary>;

    /// Executes the skill at `index` against `opponent`.
    ///
    /// Callers validate readiness first; implementations may ignore a call
    /// for a skill that is not ready.
    fn use_skill(&mut self, index: usize, opponent: &mut dyn CombatantView);

    fn reset_all_cooldowns(&mut self);

    fn reduce_cooldowns(&mut self);

    /// Decays buff/debuff durations by one turn.
    fn update_buffs(&mut self);

    fn apply_regen(&mut self);

    /// Turn-start passive effects against the opponent.
    fn apply_passive_start(&mut self, opponent: &mut dyn CombatantView);

    /// Raises status flags for every active timed status.
    fn apply_status(&mut self);

    /// Ticks timed statuses down and drops expired ones.
    fn cleanup_statuses(&mut self);
}

/// Decision policy of a computer-controlled opponent.
pub trait EnemyPolicy: CombatantView {
    /// Executes one action of the enemy's own choosing against `opponent`.
    fn take_turn(&mut self, opponent: &mut dyn CombatantView);

    /// Experience granted to the victor.
    fn xp_reward(&self) -> u32;
}
