//! Utility-scoring AI for the player side.
//!
//! [`UtilityAiProvider`] scores the normal attack and every ready skill with
//! [`scoring`] and returns the best one. Scoring is pure and deterministic:
//! ties go to the earliest candidate, with the normal attack first.

pub mod scoring;

use battle_core::{DecisionContext, DecisionProvider, PlayerChoice, SelectionError};
use tracing::{debug, warn};

pub use scoring::Score;

/// Preference weights (0-100) applied as the personality component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AiPersona {
    /// Damage-dealing choices.
    pub aggression: u32,
    /// Healing, buffs and control.
    pub caution: u32,
    /// Randomized and support choices.
    pub whimsy: u32,
}

impl Default for AiPersona {
    fn default() -> Self {
        Self {
            aggression: 70,
            caution: 60,
            whimsy: 40,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct UtilityAiProvider {
    persona: AiPersona,
    decisions: u32,
}

impl UtilityAiProvider {
    pub fn new(persona: AiPersona) -> Self {
        Self {
            persona,
            decisions: 0,
        }
    }

    pub fn persona(&self) -> &AiPersona {
        &self.persona
    }

    /// Number of choices made so far.
    pub fn decisions(&self) -> u32 {
        self.decisions
    }

    /// Scores every candidate and returns the best with its score.
    pub fn evaluate(&self, ctx: &DecisionContext<'_>) -> (PlayerChoice, Score) {
        let mut best = (
            PlayerChoice::NormalAttack,
            scoring::normal_attack(ctx, &self.persona),
        );

        for (index, skill) in ctx.ready_skills() {
            let score = scoring::skill(ctx, &self.persona, skill);
            debug!(
                target: "runtime::ai",
                skill = %skill.name,
                score = score.value(),
                possible = score.is_possible,
                situation = score.situation,
                personality = score.personality,
                modifier = score.modifier,
                "skill scored"
            );
            if score.value() > best.1.value() {
                best = (PlayerChoice::Skill(index), score);
            }
        }
        best
    }
}

impl DecisionProvider for UtilityAiProvider {
    fn choose(&mut self, ctx: &DecisionContext<'_>) -> PlayerChoice {
        let (choice, score) = self.evaluate(ctx);
        self.decisions += 1;
        debug!(
            target: "runtime::ai",
            turn = ctx.turn,
            extra_turn = ctx.extra_turn,
            ?choice,
            score = score.value(),
            "choice made"
        );
        choice
    }

    fn on_rejected(&mut self, error: &SelectionError) {
        warn!(target: "runtime::ai", %error, "ai choice rejected");
    }
}
