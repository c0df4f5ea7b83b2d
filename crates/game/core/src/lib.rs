//! Deterministic turn-based combat rules.
//!
//! `battle-core` resolves a single encounter between two externally-owned
//! combatants. [`engine::TurnSequencer`] drives the fixed per-turn phase
//! order, [`status::StatusEffectLedger`] holds per-combatant buffs, statuses
//! and cooldowns, and [`charge::ChargeTracker`] accrues charge from each
//! turn's facts and auto-fires abilities. Combatants plug in through
//! [`combatant::CombatantView`]; player input through
//! [`engine::DecisionProvider`].
pub mod charge;
pub mod combatant;
pub mod config;
pub mod engine;
pub mod error;
pub mod status;

#[cfg(test)]
mod testing;

pub use charge::{
    AbilityId, Activation, ChargeAbility, ChargeEffect, ChargeTag, ChargeTracker, RunLedger,
};
pub use combatant::{
    Attribution, CombatantView, EnemyPolicy, SkillCapability, SkillIntent, SkillSummary, Stat,
};
pub use config::BattleConfig;
pub use engine::{
    BattleOutcome, BattleReport, DamageStreaks, DecisionContext, DecisionProvider, PlayerChoice,
    ScriptedDecisions, TurnFacts, TurnPhase, TurnRecord, TurnSequencer,
};
pub use error::{BattleError, ErrorSeverity, RegistryError, SelectionError};
pub use status::{BuffStack, StatusEffectLedger, StatusFlags, StatusKind, TimedStatus};
