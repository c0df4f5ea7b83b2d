use std::fmt;
use std::sync::Arc;

use super::ChargeTag;
use crate::combatant::CombatantView;

/// Stable handle into the tracker's catalog. Assigned in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityId(pub u16);

impl AbilityId {
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Activation effect of a charge ability, opaque to the tracker.
pub trait ChargeEffect: Send + Sync {
    /// Fires the effect against `owner` and `opponent`.
    fn activate(&self, owner: &mut dyn CombatantView, opponent: &mut dyn CombatantView);

    /// Number of turns the effect keeps ticking after activation.
    fn lingering_turns(&self) -> u32 {
        0
    }

    /// Per-turn upkeep while the effect lingers.
    fn upkeep(&self, _owner: &mut dyn CombatantView) {}
}

/// A charge-bearing ability (emotion card).
///
/// `charge` never exceeds `max_charge_ticks`, and `max_charge_ticks` is
/// never below 1.
#[derive(Clone)]
pub struct ChargeAbility {
    name: String,
    description: String,
    tag: ChargeTag,
    charge: u32,
    max_charge_ticks: u32,
    cooldown: u32,
    cooldown_remaining: u32,
    unlocked: bool,
    lingering: u32,
    effect: Arc<dyn ChargeEffect>,
}

impl ChargeAbility {
    pub fn new(
        name: impl Into<String>,
        tag: ChargeTag,
        max_charge_ticks: u32,
        cooldown: u32,
        effect: Arc<dyn ChargeEffect>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tag,
            charge: 0,
            max_charge_ticks: max_charge_ticks.max(1),
            cooldown: cooldown.max(1),
            cooldown_remaining: 0,
            unlocked: false,
            lingering: 0,
            effect,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn unlocked(mut self) -> Self {
        self.unlocked = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tag(&self) -> ChargeTag {
        self.tag
    }

    pub fn charge(&self) -> u32 {
        self.charge
    }

    pub fn max_charge_ticks(&self) -> u32 {
        self.max_charge_ticks
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown_remaining
    }

    pub fn lingering_turns(&self) -> u32 {
        self.lingering
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn is_fully_charged(&self) -> bool {
        self.charge == self.max_charge_ticks
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining == 0
    }

    pub fn can_activate(&self) -> bool {
        self.is_fully_charged() && self.is_ready()
    }

    /// Adds charge, clamped to the maximum. Returns the new charge.
    pub fn add_charge(&mut self, amount: u32) -> u32 {
        self.charge = self
            .charge
            .saturating_add(amount)
            .min(self.max_charge_ticks);
        self.charge
    }

    /// Lowers the charge requirement, flooring at 1. Returns the new maximum.
    pub fn set_max_charge_ticks(&mut self, max_charge_ticks: u32) -> u32 {
        self.max_charge_ticks = max_charge_ticks.max(1);
        self.charge = self.charge.min(self.max_charge_ticks);
        self.max_charge_ticks
    }

    pub(crate) fn set_unlocked(&mut self, unlocked: bool) {
        self.unlocked = unlocked;
    }

    pub(crate) fn reset_charge(&mut self) {
        self.charge = 0;
        self.lingering = 0;
    }

    pub(crate) fn end_lingering(&mut self) {
        self.lingering = 0;
    }

    pub(crate) fn reset_cooldown(&mut self) {
        self.cooldown_remaining = 0;
    }

    /// Resets charge, starts the cooldown, then fires the effect.
    pub(crate) fn activate(
        &mut self,
        owner: &mut dyn CombatantView,
        opponent: &mut dyn CombatantView,
    ) {
        self.charge = 0;
        self.cooldown_remaining = self.cooldown;
        self.lingering = self.effect.lingering_turns();
        self.effect.activate(owner, opponent);
    }

    /// ChargeUpdate upkeep: ticks any lingering effect and the cooldown.
    pub(crate) fn tick(&mut self, owner: &mut dyn CombatantView) {
        if self.lingering > 0 {
            self.effect.upkeep(owner);
            self.lingering -= 1;
        }
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
    }
}

impl fmt::Debug for ChargeAbility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChargeAbility")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("charge", &self.charge)
            .field("max_charge_ticks", &self.max_charge_ticks)
            .field("cooldown", &self.cooldown)
            .field("cooldown_remaining", &self.cooldown_remaining)
            .field("unlocked", &self.unlocked)
            .field("lingering", &self.lingering)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Inert;

    impl ChargeEffect for Inert {
        fn activate(&self, _owner: &mut dyn CombatantView, _opponent: &mut dyn CombatantView) {}
    }

    fn ability(max: u32) -> ChargeAbility {
        ChargeAbility::new("Anger", ChargeTag::DamageTaken, max, 2, Arc::new(Inert))
    }

    #[test]
    fn charge_clamps_to_maximum() {
        let mut anger = ability(3);
        assert_eq!(anger.add_charge(2), 2);
        assert_eq!(anger.add_charge(5), 3);
        assert!(anger.is_fully_charged());
    }

    #[test]
    fn requirement_floors_at_one_and_clamps_charge() {
        let mut anger = ability(3);
        anger.add_charge(3);

        assert_eq!(anger.set_max_charge_ticks(2), 2);
        assert_eq!(anger.charge(), 2);

        assert_eq!(anger.set_max_charge_ticks(0), 1);
        assert_eq!(anger.charge(), 1);
    }

    #[test]
    fn zero_cooldown_is_raised_to_one() {
        let anger = ChargeAbility::new("Anger", ChargeTag::DamageTaken, 1, 0, Arc::new(Inert));
        assert_eq!(anger.cooldown(), 1);
    }
}
