//! Run-scoped battle orchestration.
//!
//! A [`BattleSession`] owns the charge tracker and the [`RunLedger`] for a
//! whole run. Each call to [`BattleSession::fight`] drives one battle through
//! [`TurnSequencer`], records the outcome into the tracker and returns a
//! [`BattleSummary`]. A defeat ends the run.
use battle_content::{FighterTemplate, Roster, build_tracker};
use battle_core::{
    AbilityId, BattleConfig, BattleOutcome, BattleReport, ChargeTracker, CombatantView,
    DecisionProvider, EnemyPolicy, RegistryError, RunLedger, TurnSequencer,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::api::{Result, RuntimeError};

/// What one battle produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BattleSummary {
    /// 1-based index of the battle within the run.
    pub battle: u32,
    pub enemy: String,
    pub outcome: BattleOutcome,
    pub xp_reward: Option<u32>,
    pub turns: u32,
    /// Whether this victory completed a win streak.
    pub win_streak_fired: bool,
    pub report: BattleReport,
}

#[derive(Debug)]
pub struct BattleSession {
    config: BattleConfig,
    tracker: ChargeTracker,
    run: RunLedger,
    defeated: bool,
}

impl BattleSession {
    pub fn new(tracker: ChargeTracker) -> Self {
        Self {
            config: tracker.config().clone(),
            tracker,
            run: RunLedger::new(),
            defeated: false,
        }
    }

    /// Builds a session from a roster's emotion catalog and equips every
    /// unlocked card that fits.
    pub fn from_roster(config: &BattleConfig, roster: &Roster) -> Result<Self> {
        let tracker = build_tracker(config, &roster.emotions)?;
        let mut session = Self::new(tracker);
        session.equip_all_unlocked()?;
        Ok(session)
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn tracker(&self) -> &ChargeTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut ChargeTracker {
        &mut self.tracker
    }

    pub fn run(&self) -> &RunLedger {
        &self.run
    }

    pub fn is_over(&self) -> bool {
        self.defeated
    }

    /// Equips abilities by name (case-insensitive).
    pub fn equip(&mut self, names: &[&str]) -> Result<()> {
        let ids = names
            .iter()
            .map(|name| {
                self.tracker
                    .find(name)
                    .ok_or_else(|| RegistryError::UnknownAbility((*name).to_owned()))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.tracker.select_active(&ids)?;
        Ok(())
    }

    /// Equips unlocked abilities in catalog order, up to the active limit.
    pub fn equip_all_unlocked(&mut self) -> Result<Vec<AbilityId>> {
        let mut unlocked = self.tracker.unlocked();
        unlocked.truncate(self.config.max_active_abilities);
        self.tracker.select_active(&unlocked)?;
        Ok(unlocked)
    }

    /// Enemy template for the next battle.
    pub fn next_enemy<'r>(&self, roster: &'r Roster) -> Result<&'r FighterTemplate> {
        roster
            .enemy(self.run.battles_fought as usize)
            .ok_or(RuntimeError::NoEnemy)
    }

    /// Runs one battle to completion.
    ///
    /// Banked charge starts from zero; ability cooldowns carry over until the
    /// caller resets them through [`tracker_mut`](Self::tracker_mut). Fails
    /// with [`RuntimeError::RunOver`] once the player has been defeated.
    pub fn fight<P, E>(
        &mut self,
        player: &mut P,
        enemy: &mut E,
        provider: &mut dyn DecisionProvider,
    ) -> Result<BattleSummary>
    where
        P: CombatantView,
        E: EnemyPolicy,
    {
        if self.defeated {
            return Err(RuntimeError::RunOver {
                battles: self.run.battles_fought,
            });
        }

        let battle = self.run.battles_fought + 1;
        let enemy_name = enemy.name().to_owned();
        debug!(
            target: "runtime::session",
            battle,
            enemy = %enemy_name,
            active = ?self.tracker.active_names(),
            "battle prepared"
        );

        let mut sequencer = TurnSequencer::new(&self.config, provider);
        let outcome = sequencer.run_battle(player, enemy, &mut self.tracker);
        let xp_reward = sequencer.xp_reward();
        let turns = sequencer.turns();
        let report = sequencer.into_report();

        let win_streak_fired = self.tracker.record_battle_result(outcome, &mut self.run);
        if !outcome.is_victory() {
            self.defeated = true;
        }

        info!(
            target: "runtime::session",
            battle,
            enemy = %enemy_name,
            %outcome,
            turns,
            win_streak_fired,
            won = self.run.battles_won,
            streak = self.run.consecutive_battles_won,
            "battle recorded"
        );

        Ok(BattleSummary {
            battle,
            enemy: enemy_name,
            outcome,
            xp_reward,
            turns,
            win_streak_fired,
            report,
        })
    }
}
