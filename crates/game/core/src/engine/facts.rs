/// Battle-scoped zero-damage streaks, updated once per turn before triggers
/// are evaluated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageStreaks {
    /// Consecutive turns, including this one, in which the player dealt nothing.
    pub no_player_damage_dealt: u32,
    /// Consecutive turns, including this one, in which neither side dealt anything.
    pub no_combat_damage: u32,
}

impl DamageStreaks {
    pub fn advance(&mut self, player_damage_dealt: u32, enemy_damage_dealt: u32) {
        if player_damage_dealt == 0 {
            self.no_player_damage_dealt += 1;
        } else {
            self.no_player_damage_dealt = 0;
        }

        if player_damage_dealt == 0 && enemy_damage_dealt == 0 {
            self.no_combat_damage += 1;
        } else {
            self.no_combat_damage = 0;
        }
    }
}

/// Everything the charge tracker observes about one turn.
///
/// Damage values are health deltas measured around each action phase, never
/// values reported by the action itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnFacts {
    pub turn: u32,
    pub player_health_start: u32,
    pub player_health: u32,
    pub player_max_health: u32,
    pub enemy_health: u32,
    pub enemy_max_health: u32,
    /// Summed over the player phase and any extra turn.
    pub player_damage_dealt: u32,
    pub enemy_damage_dealt: u32,
    /// The player's action missed because the enemy was invisible.
    pub missed_attack: bool,
    /// A randomized skill was used in the player phase or the extra turn.
    pub randomized_action: bool,
    pub debuffed: bool,
    pub streaks: DamageStreaks,
}

impl TurnFacts {
    pub fn player_damage_taken(&self) -> u32 {
        self.player_health_start.saturating_sub(self.player_health)
    }

    pub fn both_alive(&self) -> bool {
        self.player_health > 0 && self.enemy_health > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combat_streak_resets_on_any_damage() {
        let mut streaks = DamageStreaks::default();
        streaks.advance(0, 0);
        streaks.advance(0, 0);
        assert_eq!(streaks.no_combat_damage, 2);

        streaks.advance(0, 3);
        assert_eq!(streaks.no_combat_damage, 0);
        assert_eq!(streaks.no_player_damage_dealt, 3);

        streaks.advance(4, 0);
        assert_eq!(streaks.no_player_damage_dealt, 0);
    }

    #[test]
    fn healing_is_not_negative_damage() {
        let facts = TurnFacts {
            player_health_start: 40,
            player_health: 55,
            ..TurnFacts::default()
        };
        assert_eq!(facts.player_damage_taken(), 0);
    }
}
