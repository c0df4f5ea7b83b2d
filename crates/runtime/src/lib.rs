//! Runtime orchestration for emotion-charged battle runs.
//!
//! This crate wires the deterministic `battle-core` engine to decision
//! providers and keeps the run-scoped state that outlives a single battle.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts [`BattleSession`], the owner of the charge tracker and
//!   the run ledger
//! - [`providers`] ships the scripted and utility-AI decision providers
//! - [`api`] exposes the error types downstream clients interact with
pub mod api;
pub mod providers;
pub mod session;

pub use api::{Result, RuntimeError};
pub use providers::{AiPersona, ScriptedProvider, UtilityAiProvider};
pub use session::{BattleSession, BattleSummary};
