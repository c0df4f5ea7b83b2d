/// Run-scoped counters owned by the progression layer.
///
/// Passed into [`ChargeTracker::record_battle_result`](super::ChargeTracker::record_battle_result)
/// after every battle; nothing in a single battle reads or resets it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunLedger {
    /// Victories since the last defeat or the last `win_battles` firing.
    pub consecutive_battles_won: u32,
    pub battles_won: u32,
    pub battles_fought: u32,
}

impl RunLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn battles_lost(&self) -> u32 {
        self.battles_fought.saturating_sub(self.battles_won)
    }
}
