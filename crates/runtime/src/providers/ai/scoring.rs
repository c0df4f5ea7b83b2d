//! Utility scoring for player choices.
//!
//! Every candidate choice gets a [`Score`] with four explicit components:
//!
//! - **is_possible**: can the choice be taken at all?
//! - **situation**: how favorable the battle state is for it (0-100)
//! - **personality**: how much the persona likes it (0-100)
//! - **modifier**: contextual adjustment (0-200, typically 100)
//!
//! ```text
//! final_score = is_possible × situation × personality × modifier / 10000
//! ```

use battle_core::{DecisionContext, SkillIntent, SkillSummary};

use super::AiPersona;

/// Generic scoring result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub is_possible: bool,
    pub situation: u32,
    pub personality: u32,
    pub modifier: u32,
}

impl Score {
    pub const fn new(is_possible: bool, situation: u32, personality: u32, modifier: u32) -> Self {
        Self {
            is_possible,
            situation,
            personality,
            modifier,
        }
    }

    /// Creates an impossible score (all components zero).
    pub const fn impossible() -> Self {
        Self {
            is_possible: false,
            situation: 0,
            personality: 0,
            modifier: 0,
        }
    }

    /// Final score, 0 if impossible.
    pub const fn value(&self) -> u32 {
        if !self.is_possible {
            return 0;
        }
        (self.situation * self.personality * self.modifier) / 10000
    }
}

fn percent(current: u32, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    (u64::from(current) * 100 / u64::from(max)).min(100) as u32
}

/// Scores a plain attack. Crit boosts make it more attractive.
pub fn normal_attack(ctx: &DecisionContext<'_>, persona: &AiPersona) -> Score {
    let modifier = if ctx.crit_boost { 150 } else { 100 };
    Score::new(ctx.attack > 0, 60, persona.aggression, modifier)
}

/// Scores a ready skill by its declared intent.
pub fn skill(ctx: &DecisionContext<'_>, persona: &AiPersona, skill: &SkillSummary) -> Score {
    if !skill.is_ready() {
        return Score::impossible();
    }

    let own = percent(ctx.health, ctx.max_health);
    let foe = percent(ctx.opponent_health, ctx.opponent_max_health);

    match skill.capability.intent {
        SkillIntent::Offense => {
            let personality = if skill.capability.randomized {
                persona.whimsy
            } else {
                persona.aggression
            };
            Score::new(true, 80, personality, 100)
        }
        SkillIntent::Defense => Score::new(own < 100, 100 - own, persona.caution, 100),
        SkillIntent::Control => {
            let situation = if foe > 50 { 70 } else { 40 };
            Score::new(true, situation, persona.caution, 100)
        }
        // Chaining support skills inside an extra turn wastes it.
        SkillIntent::Support => Score::new(!ctx.extra_turn, 75, persona.whimsy, 100),
    }
}
