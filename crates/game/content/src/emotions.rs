//! Emotion cards: charge abilities with concrete effects.

use std::sync::Arc;

use battle_core::{
    Attribution, BattleConfig, ChargeAbility, ChargeEffect, ChargeTag, ChargeTracker,
    CombatantView, RegistryError, Stat,
};

/// Activation effect of an emotion card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EmotionEffect {
    /// Attack buff on the owner.
    Rage { attack: u32, turns: u32 },
    /// Flat heal.
    Resolve { amount: u32 },
    /// Defense debuff on the opponent.
    Dread { defense: u32, turns: u32 },
    /// Heals a percentage of maximum health.
    Hope { percent: u32 },
    /// Grants the owner an extra action next turn.
    Frenzy,
    /// Heals `amount` every turn for `turns` turns.
    Calm { amount: u32, turns: u32 },
    /// Unmitigated damage to the opponent.
    Spite { damage: u32 },
}

fn magnitude(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl ChargeEffect for EmotionEffect {
    fn activate(&self, owner: &mut dyn CombatantView, opponent: &mut dyn CombatantView) {
        match *self {
            Self::Rage { attack, turns } => owner.apply_buff(Stat::Attack, magnitude(attack), turns),
            Self::Resolve { amount } => owner.heal(amount),
            Self::Dread { defense, turns } => {
                opponent.apply_buff(Stat::Defense, -magnitude(defense), turns)
            }
            Self::Hope { percent } => {
                let amount = owner.max_health().saturating_mul(percent) / 100;
                owner.heal(amount);
            }
            Self::Frenzy => owner.set_extra_turn(true),
            // Healing happens in upkeep.
            Self::Calm { .. } => {}
            Self::Spite { damage } => opponent.take_damage(damage, Attribution::Unattributed),
        }
    }

    fn lingering_turns(&self) -> u32 {
        match self {
            Self::Calm { turns, .. } => *turns,
            _ => 0,
        }
    }

    fn upkeep(&self, owner: &mut dyn CombatantView) {
        if let Self::Calm { amount, .. } = self {
            owner.heal(*amount);
        }
    }
}

/// Data form of an emotion card, as stored in rosters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmotionSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub tag: ChargeTag,
    pub max_charge_ticks: u32,
    /// Falls back to [`BattleConfig::default_ability_cooldown`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unlocked: bool,
    pub effect: EmotionEffect,
}

impl EmotionSpec {
    pub fn new(
        name: impl Into<String>,
        tag: ChargeTag,
        max_charge_ticks: u32,
        effect: EmotionEffect,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tag,
            max_charge_ticks,
            cooldown: None,
            unlocked: false,
            effect,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn unlocked(mut self) -> Self {
        self.unlocked = true;
        self
    }

    pub fn to_ability(&self, config: &BattleConfig) -> ChargeAbility {
        let cooldown = self.cooldown.unwrap_or(config.default_ability_cooldown);
        let ability = ChargeAbility::new(
            self.name.clone(),
            self.tag,
            self.max_charge_ticks,
            cooldown,
            Arc::new(self.effect),
        )
        .with_description(self.description.clone());

        if self.unlocked {
            ability.unlocked()
        } else {
            ability
        }
    }
}

/// Builds a tracker with every card registered in order.
pub fn build_tracker(
    config: &BattleConfig,
    emotions: &[EmotionSpec],
) -> Result<ChargeTracker, RegistryError> {
    let mut tracker = ChargeTracker::new(config.clone());
    for card in emotions {
        tracker.register(card.to_ability(config))?;
    }
    Ok(tracker)
}

/// Built-in emotion catalog. Only the first card starts unlocked.
pub fn default_emotions() -> Vec<EmotionSpec> {
    vec![
        EmotionSpec::new(
            "Anger",
            ChargeTag::DamageTaken,
            3,
            EmotionEffect::Rage {
                attack: 4,
                turns: 3,
            },
        )
        .describe("Getting hit fuels a surge of attack.")
        .unlocked(),
        EmotionSpec::new(
            "Ashamed",
            ChargeTag::BelowHalfHealth,
            2,
            EmotionEffect::Resolve { amount: 15 },
        )
        .describe("Falling below half health steels you for a recovery."),
        EmotionSpec::new("Bored", ChargeTag::NoDamageTaken, 4, EmotionEffect::Frenzy)
            .describe("Untouched turns build into a burst of action."),
        EmotionSpec::new(
            "Embarrassed",
            ChargeTag::MissAttack,
            2,
            EmotionEffect::Spite { damage: 12 },
        )
        .describe("Missed swings come back as raw damage."),
        EmotionSpec::new(
            "Sad",
            ChargeTag::NoDamageDealt,
            2,
            EmotionEffect::Calm {
                amount: 5,
                turns: 3,
            },
        )
        .describe("Fruitless turns settle into steady regeneration."),
        EmotionSpec::new(
            "Anxious",
            ChargeTag::NoCombatDamage,
            2,
            EmotionEffect::Dread {
                defense: 3,
                turns: 3,
            },
        )
        .describe("Tense standoffs crack the enemy's guard."),
        EmotionSpec::new(
            "Confused",
            ChargeTag::Debuffed,
            3,
            EmotionEffect::Resolve { amount: 10 },
        )
        .describe("Shaking off debuffs restores some health."),
        EmotionSpec::new("Goofy", ChargeTag::RngAction, 2, EmotionEffect::Frenzy)
            .describe("Gambles grant an extra action."),
        EmotionSpec::new(
            "Proud",
            ChargeTag::WinBattles,
            1,
            EmotionEffect::Rage {
                attack: 6,
                turns: 5,
            },
        )
        .describe("A winning streak carries into the next fight."),
        EmotionSpec::new(
            "Hopeful",
            ChargeTag::LosingBadly,
            1,
            EmotionEffect::Hope { percent: 40 },
        )
        .describe("On the brink of defeat, a large heal."),
    ]
}
