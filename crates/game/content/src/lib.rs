//! Reference combatants and data-driven battle content.
//!
//! This crate provides the external collaborators `battle-core` consumes:
//! - [`Fighter`]: a concrete combatant for both the player and enemies
//! - Skill definitions and the enemy decision policy
//! - Emotion cards (charge abilities) and the default catalog
//! - Rosters and loaders for RON/TOML data files
//!
//! Content types are plain data; nothing here drives a battle.

pub mod emotions;
pub mod fighter;
pub mod rng;
pub mod roster;
pub mod skills;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use emotions::{EmotionEffect, EmotionSpec, build_tracker, default_emotions};
pub use fighter::{Fighter, FighterTemplate, Passive};
pub use rng::{PcgRng, RngOracle, RollStream, compute_seed};
pub use roster::Roster;
pub use skills::{Skill, SkillEffect};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, RosterLoader};
