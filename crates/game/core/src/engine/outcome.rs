use crate::charge::{Activation, ChargeTag};
use crate::config::BattleConfig;
use crate::engine::TurnFacts;

use arrayvec::ArrayVec;

/// Result of a finished battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

impl BattleOutcome {
    pub fn is_victory(self) -> bool {
        matches!(self, Self::Victory)
    }
}

/// One fully resolved turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnRecord {
    pub facts: TurnFacts,
    pub fired: ArrayVec<ChargeTag, { BattleConfig::MAX_TRIGGERS }>,
    pub activations: Vec<Activation>,
}

/// Per-turn record of a battle. Turns that ended during start-of-turn
/// resolution are not recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleReport {
    turns: Vec<TurnRecord>,
}

impl BattleReport {
    pub(crate) fn push(&mut self, record: TurnRecord) {
        self.turns.push(record);
    }

    pub fn turns(&self) -> &[TurnRecord] {
        &self.turns
    }

    pub fn last(&self) -> Option<&TurnRecord> {
        self.turns.last()
    }

    pub fn activations(&self) -> impl Iterator<Item = &Activation> {
        self.turns.iter().flat_map(|turn| turn.activations.iter())
    }

    pub fn total_player_damage_dealt(&self) -> u32 {
        self.turns.iter().map(|t| t.facts.player_damage_dealt).sum()
    }

    pub fn total_enemy_damage_dealt(&self) -> u32 {
        self.turns.iter().map(|t| t.facts.enemy_damage_dealt).sum()
    }
}
