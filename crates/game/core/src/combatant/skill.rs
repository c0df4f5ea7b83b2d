/// Broad purpose of a skill, resolved when the skill is defined.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkillIntent {
    #[default]
    Offense,
    Defense,
    Control,
    Support,
}

/// Capability tag carried by every skill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillCapability {
    pub intent: SkillIntent,
    /// The skill's effect involves a random roll.
    pub randomized: bool,
}

impl SkillCapability {
    pub const fn new(intent: SkillIntent, randomized: bool) -> Self {
        Self { intent, randomized }
    }
}

/// Read-only view of one skill slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSummary {
    pub name: String,
    pub cooldown_remaining: u32,
    pub capability: SkillCapability,
}

impl SkillSummary {
    pub fn new(name: impl Into<String>, cooldown_remaining: u32, capability: SkillCapability) -> Self {
        Self {
            name: name.into(),
            cooldown_remaining,
            capability,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining == 0
    }
}
