//! Turn sequencing for a single battle.
//!
//! The [`TurnSequencer`] drives one battle between a player and an enemy in a
//! fixed per-turn phase order (see [`TurnPhase`]). It never owns either
//! combatant: mitigation, skills and statuses live behind
//! [`CombatantView`], and the sequencer derives every damage figure from
//! health deltas measured around each action phase. Those figures are
//! summarized into [`TurnFacts`] and fed to the [`ChargeTracker`], which may
//! fire abilities at the end of the turn.

mod decision;
mod facts;
mod outcome;
mod phase;

pub use decision::{DecisionContext, DecisionProvider, PlayerChoice, ScriptedDecisions};
pub use facts::{DamageStreaks, TurnFacts};
pub use outcome::{BattleOutcome, BattleReport, TurnRecord};
pub use phase::TurnPhase;

use tracing::{debug, info, warn};

use crate::charge::ChargeTracker;
use crate::combatant::{Attribution, CombatantView, EnemyPolicy};
use crate::config::BattleConfig;
use crate::error::BattleError;

/// Battle-scoped bookkeeping. Rebuilt at the start of every battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BattleState {
    pub turn: u32,
    pub player_health_at_turn_start: u32,
    pub player_damage_dealt: u32,
    pub enemy_damage_dealt: u32,
    pub streaks: DamageStreaks,
}

impl BattleState {
    fn begin_turn(&mut self, player_health: u32) {
        self.turn += 1;
        self.player_health_at_turn_start = player_health;
        self.player_damage_dealt = 0;
        self.enemy_damage_dealt = 0;
    }
}

/// What one player action phase produced.
#[derive(Clone, Copy, Debug, Default)]
struct PhaseResult {
    damage_dealt: u32,
    missed: bool,
    randomized: bool,
}

impl PhaseResult {
    fn merge(&mut self, other: PhaseResult) {
        self.damage_dealt = self.damage_dealt.saturating_add(other.damage_dealt);
        self.missed |= other.missed;
        self.randomized |= other.randomized;
    }
}

/// Orchestrates one battle at a time.
///
/// A sequencer can run several battles in a row; each call to
/// [`run_battle`](Self::run_battle) starts from fresh battle-scoped state.
pub struct TurnSequencer<'a> {
    config: &'a BattleConfig,
    provider: &'a mut dyn DecisionProvider,
    state: BattleState,
    report: BattleReport,
    xp_reward: Option<u32>,
}

impl<'a> TurnSequencer<'a> {
    pub fn new(config: &'a BattleConfig, provider: &'a mut dyn DecisionProvider) -> Self {
        Self {
            config,
            provider,
            state: BattleState::default(),
            report: BattleReport::default(),
            xp_reward: None,
        }
    }

    /// Experience reward of the last battle. `None` unless it was a victory.
    pub fn xp_reward(&self) -> Option<u32> {
        self.xp_reward
    }

    /// Number of turns started in the last battle.
    pub fn turns(&self) -> u32 {
        self.state.turn
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn report(&self) -> &BattleReport {
        &self.report
    }

    pub fn into_report(self) -> BattleReport {
        self.report
    }

    /// Runs a battle until either side reaches zero health.
    ///
    /// Banked charge is cleared first (see [`ChargeTracker::begin_battle`]);
    /// ability cooldowns carry over from the previous battle.
    ///
    /// The result is `Victory` only if the player is still alive, so a turn
    /// in which both sides fall is a `Defeat`.
    pub fn run_battle<P, E>(
        &mut self,
        player: &mut P,
        enemy: &mut E,
        tracker: &mut ChargeTracker,
    ) -> BattleOutcome
    where
        P: CombatantView,
        E: EnemyPolicy,
    {
        self.state = BattleState::default();
        self.report = BattleReport::default();
        self.xp_reward = None;
        tracker.begin_battle();

        info!(
            target: "battle_core::engine",
            player = player.name(),
            enemy = enemy.name(),
            active = ?tracker.active_names(),
            "battle started"
        );

        player.reset_all_cooldowns();
        enemy.reset_all_cooldowns();

        while player.is_alive() && enemy.is_alive() {
            self.run_turn(player, enemy, tracker);
        }

        let outcome = if player.is_alive() {
            BattleOutcome::Victory
        } else {
            BattleOutcome::Defeat
        };
        if outcome.is_victory() {
            self.xp_reward = Some(enemy.xp_reward());
        }

        info!(
            target: "battle_core::engine",
            %outcome,
            turns = self.state.turn,
            player_health = player.health(),
            enemy_health = enemy.health(),
            xp = ?self.xp_reward,
            "battle finished"
        );
        outcome
    }

    fn run_turn<P, E>(&mut self, player: &mut P, enemy: &mut E, tracker: &mut ChargeTracker)
    where
        P: CombatantView,
        E: EnemyPolicy,
    {
        self.state.begin_turn(player.health());
        self.trace_phase(TurnPhase::TurnStart);

        self.trace_phase(TurnPhase::BuffResolution);
        player.update_buffs();
        player.reduce_cooldowns();
        if !player.is_alive() {
            return;
        }
        enemy.update_buffs();
        enemy.reduce_cooldowns();
        if !enemy.is_alive() {
            return;
        }

        self.trace_phase(TurnPhase::RegenAndPassives);
        player.apply_regen();
        player.apply_passive_start(enemy);
        if !(player.is_alive() && enemy.is_alive()) {
            return;
        }

        self.trace_phase(TurnPhase::ChargeUpdate);
        tracker.update_effects(player);
        if !(player.is_alive() && enemy.is_alive()) {
            return;
        }

        self.trace_phase(TurnPhase::PlayerPhase);
        player.apply_status();
        player.cleanup_statuses();
        let mut action = self.player_action(player, enemy, false);

        self.trace_phase(TurnPhase::ExtraTurnPhase);
        if player.has_extra_turn() {
            if player.is_alive() && enemy.is_alive() {
                debug!(target: "battle_core::engine", player = player.name(), "extra turn");
                action.merge(self.player_action(player, enemy, true));
            }
            player.set_extra_turn(false);
        }
        self.state.player_damage_dealt = action.damage_dealt;

        self.trace_phase(TurnPhase::EnemyPhase);
        if player.is_alive() && enemy.is_alive() {
            self.state.enemy_damage_dealt = self.enemy_action(player, enemy);
        }

        self.trace_phase(TurnPhase::ChargeAccrual);
        self.state.streaks.advance(
            self.state.player_damage_dealt,
            self.state.enemy_damage_dealt,
        );
        let facts = TurnFacts {
            turn: self.state.turn,
            player_health_start: self.state.player_health_at_turn_start,
            player_health: player.health(),
            player_max_health: player.max_health(),
            enemy_health: enemy.health(),
            enemy_max_health: enemy.max_health(),
            player_damage_dealt: self.state.player_damage_dealt,
            enemy_damage_dealt: self.state.enemy_damage_dealt,
            missed_attack: action.missed,
            randomized_action: action.randomized,
            debuffed: player.is_debuffed(),
            streaks: self.state.streaks,
        };
        let fired = tracker.submit_turn_facts(&facts);

        self.trace_phase(TurnPhase::AutoActivation);
        let activations = tracker.check_auto_activate(player, enemy);

        debug!(
            target: "battle_core::engine",
            turn = facts.turn,
            player_dealt = facts.player_damage_dealt,
            enemy_dealt = facts.enemy_damage_dealt,
            player_health = player.health(),
            enemy_health = enemy.health(),
            activations = activations.len(),
            "turn resolved"
        );
        self.report.push(TurnRecord {
            facts,
            fired,
            activations,
        });
    }

    /// Resolves one player action phase, status overrides first.
    fn player_action<P, E>(&mut self, player: &mut P, enemy: &mut E, extra_turn: bool) -> PhaseResult
    where
        P: CombatantView,
        E: CombatantView,
    {
        let mut result = PhaseResult::default();
        let enemy_before = enemy.health();

        if player.is_frozen() {
            debug!(target: "battle_core::engine", combatant = player.name(), "frozen, action skipped");
            player.take_damage(self.config.frozen_self_damage, Attribution::Unattributed);
        } else if player.is_stunned() {
            debug!(target: "battle_core::engine", combatant = player.name(), "stunned, action skipped");
        } else if enemy.is_invisible() {
            debug!(target: "battle_core::engine", target_name = enemy.name(), "target invisible, attack missed");
            result.missed = true;
        } else {
            result.randomized = self.perform_choice(player, enemy, extra_turn);
        }

        result.damage_dealt = enemy_before.saturating_sub(enemy.health());
        result
    }

    /// Asks the provider until it returns a valid choice, then executes it.
    /// Returns whether the executed action was randomized.
    fn perform_choice<P, E>(&mut self, player: &mut P, enemy: &mut E, extra_turn: bool) -> bool
    where
        P: CombatantView,
        E: CombatantView,
    {
        let skills = player.skills();
        let ctx = DecisionContext {
            turn: self.state.turn,
            extra_turn,
            health: player.health(),
            max_health: player.max_health(),
            attack: player.attack(),
            crit_boost: player.has_crit_boost(),
            opponent_health: enemy.health(),
            opponent_max_health: enemy.max_health(),
            skills: &skills,
        };

        let choice = loop {
            let choice = self.provider.choose(&ctx);
            match ctx.validate(choice) {
                Ok(choice) => break choice,
                Err(error) => {
                    warn!(
                        target: "battle_core::engine",
                        code = error.error_code(),
                        %error,
                        "selection rejected, reprompting"
                    );
                    self.provider.on_rejected(&error);
                }
            }
        };

        match choice {
            PlayerChoice::NormalAttack => {
                let base = player.attack();
                let damage = if player.has_crit_boost() {
                    self.config.crit_damage(base)
                } else {
                    base
                };
                enemy.take_damage(damage, Attribution::Attacker(player.name()));
                false
            }
            PlayerChoice::Skill(index) => {
                let randomized = skills
                    .get(index)
                    .is_some_and(|skill| skill.capability.randomized);
                player.use_skill(index, enemy);
                randomized
            }
        }
    }

    /// Resolves the enemy phase and returns the damage dealt to the player.
    fn enemy_action<P, E>(&mut self, player: &mut P, enemy: &mut E) -> u32
    where
        P: CombatantView,
        E: EnemyPolicy,
    {
        let player_before = player.health();

        enemy.apply_status();
        enemy.cleanup_statuses();

        if enemy.is_frozen() {
            debug!(target: "battle_core::engine", combatant = enemy.name(), "frozen, action skipped");
            enemy.take_damage(self.config.frozen_self_damage, Attribution::Unattributed);
        } else if enemy.is_stunned() {
            debug!(target: "battle_core::engine", combatant = enemy.name(), "stunned, action skipped");
        } else if player.is_invisible() {
            debug!(target: "battle_core::engine", target_name = player.name(), "target invisible, attack missed");
        } else {
            enemy.take_turn(player);
        }

        player_before.saturating_sub(player.health())
    }

    fn trace_phase(&self, phase: TurnPhase) {
        debug!(
            target: "battle_core::engine",
            turn = self.state.turn,
            phase = phase.as_str(),
            "entering phase"
        );
    }
}

#[cfg(test)]
mod tests;
