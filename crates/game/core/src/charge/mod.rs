//! Charge accrual and auto-activation of emotion abilities.
//!
//! The [`ChargeTracker`] passively observes each turn through [`TurnFacts`]
//! submitted by the sequencer, adds one tick of charge per fired
//! [`ChargeTag`] to every active ability sharing it, and fires abilities once
//! they are fully charged and off cooldown.
//!
//! [`TurnFacts`]: crate::engine::TurnFacts

mod ability;
mod run;
mod tag;
mod tracker;

pub use ability::{AbilityId, ChargeAbility, ChargeEffect};
pub use run::RunLedger;
pub use tag::ChargeTag;
pub use tracker::{Activation, ChargeTracker};
