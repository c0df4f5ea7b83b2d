use arrayvec::ArrayVec;
use tracing::{debug, info};

use super::{AbilityId, ChargeAbility, ChargeTag, RunLedger};
use crate::combatant::CombatantView;
use crate::config::BattleConfig;
use crate::engine::{BattleOutcome, TurnFacts};
use crate::error::RegistryError;

/// Record of one auto-activation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Activation {
    pub ability: AbilityId,
    pub name: String,
    pub tag: ChargeTag,
}

/// Registry of charge abilities and the per-battle active selection.
///
/// The catalog persists across battles (unlock state, cooldowns, charge
/// requirements). Banked charge is battle-scoped: it is cleared at the start
/// of every battle and whenever a new selection is made. Only run-scoped
/// tags (`win_battles`) keep their charge between battles.
#[derive(Clone, Debug)]
pub struct ChargeTracker {
    config: BattleConfig,
    catalog: Vec<ChargeAbility>,
    active: Vec<AbilityId>,
}

impl ChargeTracker {
    pub fn new(config: BattleConfig) -> Self {
        Self {
            config,
            catalog: Vec::new(),
            active: Vec::new(),
        }
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// Adds an ability to the catalog. Names are unique, ignoring case.
    pub fn register(&mut self, ability: ChargeAbility) -> Result<AbilityId, RegistryError> {
        if self.find(ability.name()).is_some() {
            return Err(RegistryError::DuplicateAbility(ability.name().to_owned()));
        }

        let id = u16::try_from(self.catalog.len())
            .map(AbilityId)
            .map_err(|_| RegistryError::TooManyActive {
                requested: self.catalog.len() + 1,
                max: usize::from(u16::MAX),
            })?;
        self.catalog.push(ability);
        Ok(id)
    }

    /// Looks an ability up by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<AbilityId> {
        self.catalog
            .iter()
            .position(|ability| ability.name().eq_ignore_ascii_case(name))
            .and_then(|index| u16::try_from(index).ok())
            .map(AbilityId)
    }

    pub fn ability(&self, id: AbilityId) -> Option<&ChargeAbility> {
        self.catalog.get(id.index())
    }

    fn ability_mut(&mut self, id: AbilityId) -> Result<&mut ChargeAbility, RegistryError> {
        self.catalog
            .get_mut(id.index())
            .ok_or_else(|| RegistryError::UnknownAbility(id.to_string()))
    }

    pub fn catalog(&self) -> &[ChargeAbility] {
        &self.catalog
    }

    pub fn ids(&self) -> impl Iterator<Item = AbilityId> + '_ {
        (0..self.catalog.len()).filter_map(|index| u16::try_from(index).ok().map(AbilityId))
    }

    pub fn unlocked(&self) -> Vec<AbilityId> {
        self.ids()
            .filter(|id| self.catalog[id.index()].is_unlocked())
            .collect()
    }

    pub fn unlocked_count(&self) -> usize {
        self.catalog.iter().filter(|a| a.is_unlocked()).count()
    }

    pub fn has_locked(&self) -> bool {
        self.catalog.iter().any(|a| !a.is_unlocked())
    }

    pub fn unlock(&mut self, id: AbilityId) -> Result<(), RegistryError> {
        self.ability_mut(id)?.set_unlocked(true);
        Ok(())
    }

    /// Unlocks the first locked ability in catalog order.
    pub fn unlock_next(&mut self) -> Option<AbilityId> {
        let id = self
            .ids()
            .find(|id| !self.catalog[id.index()].is_unlocked())?;
        self.catalog[id.index()].set_unlocked(true);
        info!(
            target: "battle_core::charge",
            ability = self.catalog[id.index()].name(),
            "ability unlocked"
        );
        Some(id)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Pins the abilities that accrue charge and auto-activate this battle.
    ///
    /// Replaces any previous selection and clears banked charge across the
    /// whole catalog. Duplicate ids are collapsed, keeping the first.
    pub fn select_active(&mut self, ids: &[AbilityId]) -> Result<(), RegistryError> {
        let mut selection: Vec<AbilityId> = Vec::with_capacity(ids.len());
        for &id in ids {
            let ability = self
                .ability(id)
                .ok_or_else(|| RegistryError::UnknownAbility(id.to_string()))?;
            if !ability.is_unlocked() {
                return Err(RegistryError::AbilityLocked(ability.name().to_owned()));
            }
            if !selection.contains(&id) {
                selection.push(id);
            }
        }

        if selection.len() > self.config.max_active_abilities {
            return Err(RegistryError::TooManyActive {
                requested: selection.len(),
                max: self.config.max_active_abilities,
            });
        }

        for ability in &mut self.catalog {
            ability.reset_charge();
        }
        self.active = selection;

        debug!(
            target: "battle_core::charge",
            active = ?self.active_names(),
            "active abilities selected"
        );
        Ok(())
    }

    pub fn active(&self) -> &[AbilityId] {
        &self.active
    }

    pub fn active_names(&self) -> Vec<&str> {
        self.active
            .iter()
            .filter_map(|id| self.ability(*id))
            .map(ChargeAbility::name)
            .collect()
    }

    /// Battle start: clears banked charge and lingering effects across the
    /// catalog, keeping charge on run-scoped tags. Cooldowns are untouched.
    pub fn begin_battle(&mut self) {
        for ability in &mut self.catalog {
            if ability.tag().is_run_scoped() {
                ability.end_lingering();
            } else {
                ability.reset_charge();
            }
        }
    }

    // ========================================================================
    // Per-turn hooks
    // ========================================================================

    /// ChargeUpdate: ticks lingering effects and cooldowns of active abilities.
    pub fn update_effects(&mut self, owner: &mut dyn CombatantView) {
        for id in &self.active {
            if let Some(ability) = self.catalog.get_mut(id.index()) {
                ability.tick(owner);
            }
        }
    }

    /// ChargeAccrual: evaluates every trigger against `facts` and adds one
    /// tick per fired tag to every active ability sharing it.
    pub fn submit_turn_facts(
        &mut self,
        facts: &TurnFacts,
    ) -> ArrayVec<ChargeTag, { BattleConfig::MAX_TRIGGERS }> {
        let fired = ChargeTag::triggered(facts, &self.config);
        for tag in &fired {
            self.accrue(*tag, 1);
        }

        debug!(
            target: "battle_core::charge",
            turn = facts.turn,
            fired = ?fired,
            "turn facts submitted"
        );
        fired
    }

    fn accrue(&mut self, tag: ChargeTag, amount: u32) {
        for id in &self.active {
            if let Some(ability) = self.catalog.get_mut(id.index())
                && ability.tag() == tag
            {
                ability.add_charge(amount);
            }
        }
    }

    /// AutoActivation: fires every active ability that is fully charged and
    /// off cooldown, in selection order.
    ///
    /// Eligibility is snapshotted before the first activation, so effects of
    /// one activation cannot reorder or suppress the others.
    pub fn check_auto_activate(
        &mut self,
        owner: &mut dyn CombatantView,
        opponent: &mut dyn CombatantView,
    ) -> Vec<Activation> {
        let eligible: Vec<AbilityId> = self
            .active
            .iter()
            .copied()
            .filter(|id| self.ability(*id).is_some_and(ChargeAbility::can_activate))
            .collect();

        let mut activations = Vec::with_capacity(eligible.len());
        for id in eligible {
            let Some(ability) = self.catalog.get_mut(id.index()) else {
                continue;
            };
            ability.activate(owner, opponent);

            info!(
                target: "battle_core::charge",
                ability = ability.name(),
                tag = %ability.tag(),
                cooldown = ability.cooldown_remaining(),
                "ability activated"
            );
            activations.push(Activation {
                ability: id,
                name: ability.name().to_owned(),
                tag: ability.tag(),
            });
        }
        activations
    }

    // ========================================================================
    // Between battles
    // ========================================================================

    /// Records a finished battle into `run`.
    ///
    /// Every `win_streak_threshold`-th consecutive victory accrues
    /// `win_battles` and restarts the streak; a defeat restarts it without
    /// firing. Returns whether `win_battles` fired.
    pub fn record_battle_result(&mut self, outcome: BattleOutcome, run: &mut RunLedger) -> bool {
        run.battles_fought += 1;

        match outcome {
            BattleOutcome::Victory => {
                run.battles_won += 1;
                run.consecutive_battles_won += 1;
                if run.consecutive_battles_won >= self.config.win_streak_threshold {
                    run.consecutive_battles_won = 0;
                    self.accrue(ChargeTag::WinBattles, 1);
                    debug!(target: "battle_core::charge", "win streak reached");
                    return true;
                }
                false
            }
            BattleOutcome::Defeat => {
                run.consecutive_battles_won = 0;
                false
            }
        }
    }

    /// Clears the cooldown of every ability in the catalog.
    pub fn reset_cooldowns(&mut self) {
        for ability in &mut self.catalog {
            ability.reset_cooldown();
        }
    }

    /// Lowers an ability's charge requirement by one (never below 1).
    /// Returns the new requirement.
    pub fn reduce_charge_requirement(&mut self, id: AbilityId) -> Result<u32, RegistryError> {
        let ability = self.ability_mut(id)?;
        let reduced = ability.max_charge_ticks().saturating_sub(1);
        Ok(ability.set_max_charge_ticks(reduced))
    }

    /// Adds charge to an ability outside of turn accrual. Returns the new charge.
    pub fn prime(&mut self, id: AbilityId, amount: u32) -> Result<u32, RegistryError> {
        Ok(self.ability_mut(id)?.add_charge(amount))
    }
}
