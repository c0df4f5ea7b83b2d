//! Decision provider implementations for the player side.

pub mod ai;

pub use ai::{AiPersona, UtilityAiProvider};
/// Replays a fixed queue of choices, then falls back to normal attacks.
pub use battle_core::ScriptedDecisions as ScriptedProvider;
