//! Skill definitions used by [`Fighter`](crate::Fighter).

use battle_core::{SkillCapability, SkillIntent, Stat};

/// What a skill does when used.
///
/// Magnitudes are unsigned; [`SkillEffect::Debuff`] applies its magnitude as
/// a negative stack on the opponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    /// Attack plus `power`, mitigated by the target.
    Strike { power: u32 },
    Heal { amount: u32 },
    Buff { stat: Stat, magnitude: u32, turns: u32 },
    Debuff { stat: Stat, magnitude: u32, turns: u32 },
    Freeze { turns: u32 },
    Stun { turns: u32 },
    /// Makes the user invisible.
    Vanish { turns: u32 },
    /// Grants the user an extra action this turn.
    Haste,
    /// Grants the user a crit boost.
    Focus { turns: u32 },
    /// Attack plus a roll in `[min, max]`.
    Gamble { min: u32, max: u32 },
}

impl SkillEffect {
    /// Capability tag, fixed by the effect kind.
    pub const fn capability(&self) -> SkillCapability {
        let intent = match self {
            Self::Strike { .. } | Self::Gamble { .. } => SkillIntent::Offense,
            Self::Heal { .. } | Self::Buff { .. } | Self::Vanish { .. } => SkillIntent::Defense,
            Self::Debuff { .. } | Self::Freeze { .. } | Self::Stun { .. } => SkillIntent::Control,
            Self::Haste | Self::Focus { .. } => SkillIntent::Support,
        };
        SkillCapability::new(intent, matches!(self, Self::Gamble { .. }))
    }
}

/// A named skill with its base cooldown.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub name: String,
    pub cooldown: u32,
    pub effect: SkillEffect,
}

impl Skill {
    pub fn new(name: impl Into<String>, cooldown: u32, effect: SkillEffect) -> Self {
        Self {
            name: name.into(),
            cooldown,
            effect,
        }
    }

    pub fn capability(&self) -> SkillCapability {
        self.effect.capability()
    }
}
