/// Fixed phase order of a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    TurnStart,
    BuffResolution,
    RegenAndPassives,
    ChargeUpdate,
    PlayerPhase,
    ExtraTurnPhase,
    EnemyPhase,
    ChargeAccrual,
    AutoActivation,
}

impl TurnPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnPhase::TurnStart => "turn_start",
            TurnPhase::BuffResolution => "buff_resolution",
            TurnPhase::RegenAndPassives => "regen_and_passives",
            TurnPhase::ChargeUpdate => "charge_update",
            TurnPhase::PlayerPhase => "player_phase",
            TurnPhase::ExtraTurnPhase => "extra_turn_phase",
            TurnPhase::EnemyPhase => "enemy_phase",
            TurnPhase::ChargeAccrual => "charge_accrual",
            TurnPhase::AutoActivation => "auto_activation",
        }
    }
}
