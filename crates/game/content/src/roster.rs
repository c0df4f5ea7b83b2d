//! Rosters: the player, the enemy pool and the emotion catalog.

use crate::emotions::{EmotionSpec, default_emotions};
use crate::fighter::{FighterTemplate, Passive};
use crate::skills::{Skill, SkillEffect};

use battle_core::Stat;

/// Everything needed to stage a series of battles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Roster {
    pub player: FighterTemplate,
    pub enemies: Vec<FighterTemplate>,
    pub emotions: Vec<EmotionSpec>,
}

impl Roster {
    /// Enemy for the `index`-th battle, cycling through the pool.
    pub fn enemy(&self, index: usize) -> Option<&FighterTemplate> {
        if self.enemies.is_empty() {
            return None;
        }
        self.enemies.get(index % self.enemies.len())
    }

    /// Built-in roster used when no roster file is configured.
    pub fn builtin() -> Self {
        let player = FighterTemplate::new("Wanderer", 100, 12, 3)
            .with_regen(2)
            .with_skill(Skill::new("Power Strike", 2, SkillEffect::Strike { power: 8 }))
            .with_skill(Skill::new("Second Wind", 4, SkillEffect::Heal { amount: 20 }))
            .with_skill(Skill::new("Frost Bolt", 4, SkillEffect::Freeze { turns: 1 }))
            .with_skill(Skill::new("Quickstep", 5, SkillEffect::Haste))
            .with_skill(Skill::new(
                "Wild Swing",
                3,
                SkillEffect::Gamble { min: 0, max: 16 },
            ))
            .with_passive(Passive::Burn { damage: 1 });

        let enemies = vec![
            FighterTemplate::new("Slime", 45, 8, 1)
                .with_xp_reward(20)
                .with_skill(Skill::new(
                    "Acid Splash",
                    3,
                    SkillEffect::Debuff {
                        stat: Stat::Defense,
                        magnitude: 2,
                        turns: 2,
                    },
                )),
            FighterTemplate::new("Goblin", 55, 10, 2)
                .with_xp_reward(30)
                .with_skill(Skill::new("Stab", 2, SkillEffect::Strike { power: 5 })),
            FighterTemplate::new("Wraith", 60, 11, 1)
                .with_xp_reward(45)
                .with_skill(Skill::new("Fade", 5, SkillEffect::Vanish { turns: 1 }))
                .with_skill(Skill::new(
                    "Wail",
                    4,
                    SkillEffect::Debuff {
                        stat: Stat::Attack,
                        magnitude: 3,
                        turns: 2,
                    },
                )),
            FighterTemplate::new("Ogre", 90, 14, 4)
                .with_xp_reward(70)
                .with_skill(Skill::new("Slam", 4, SkillEffect::Stun { turns: 1 })),
        ];

        Self {
            player,
            enemies,
            emotions: default_emotions(),
        }
    }
}
