//! Player decision providers.
//!
//! The sequencer never reads input itself. Each action phase asks an injected
//! [`DecisionProvider`] for a [`PlayerChoice`] and validates it against the
//! player's skill list; rejected choices are handed back through
//! [`DecisionProvider::on_rejected`] and the provider is asked again.

use std::collections::VecDeque;

use crate::combatant::SkillSummary;
use crate::error::SelectionError;

/// An action the player may take in an action phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerChoice {
    NormalAttack,
    /// Zero-based index into the player's skill list.
    Skill(usize),
}

/// Read-only snapshot handed to a provider when a choice is needed.
#[derive(Clone, Debug)]
pub struct DecisionContext<'a> {
    pub turn: u32,
    pub extra_turn: bool,
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub crit_boost: bool,
    pub opponent_health: u32,
    pub opponent_max_health: u32,
    pub skills: &'a [SkillSummary],
}

impl DecisionContext<'_> {
    pub fn ready_skills(&self) -> impl Iterator<Item = (usize, &SkillSummary)> {
        self.skills
            .iter()
            .enumerate()
            .filter(|(_, skill)| skill.is_ready())
    }

    /// Validates `choice` against the skill list.
    pub fn validate(&self, choice: PlayerChoice) -> Result<PlayerChoice, SelectionError> {
        match choice {
            PlayerChoice::NormalAttack => Ok(choice),
            PlayerChoice::Skill(index) => {
                let skill = self
                    .skills
                    .get(index)
                    .ok_or(SelectionError::IndexOutOfRange {
                        index,
                        len: self.skills.len(),
                    })?;
                if !skill.is_ready() {
                    return Err(SelectionError::SkillOnCooldown {
                        name: skill.name.clone(),
                        remaining: skill.cooldown_remaining,
                    });
                }
                Ok(choice)
            }
        }
    }
}

/// Source of player choices: human input, a script, or an AI policy.
///
/// Calls are synchronous and may block; the sequencer imposes no timeout.
pub trait DecisionProvider {
    fn choose(&mut self, ctx: &DecisionContext<'_>) -> PlayerChoice;

    /// Called when the previous choice was rejected, before asking again.
    fn on_rejected(&mut self, _error: &SelectionError) {}
}

/// Replays a fixed queue of choices, then falls back to normal attacks.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDecisions {
    queue: VecDeque<PlayerChoice>,
    rejected: Vec<SelectionError>,
}

impl ScriptedDecisions {
    pub fn new(choices: impl IntoIterator<Item = PlayerChoice>) -> Self {
        Self {
            queue: choices.into_iter().collect(),
            rejected: Vec::new(),
        }
    }

    pub fn push(&mut self, choice: PlayerChoice) {
        self.queue.push_back(choice);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Every rejection seen so far, oldest first.
    pub fn rejected(&self) -> &[SelectionError] {
        &self.rejected
    }
}

impl DecisionProvider for ScriptedDecisions {
    fn choose(&mut self, _ctx: &DecisionContext<'_>) -> PlayerChoice {
        self.queue.pop_front().unwrap_or(PlayerChoice::NormalAttack)
    }

    fn on_rejected(&mut self, error: &SelectionError) {
        self.rejected.push(error.clone());
    }
}
