//! Minimal combatant used by unit tests in this crate.

use crate::combatant::{
    Attribution, CombatantView, EnemyPolicy, SkillCapability, SkillIntent, SkillSummary, Stat,
};
use crate::status::{StatusEffectLedger, StatusKind};

#[derive(Clone, Copy, Debug)]
pub(crate) enum DummyMove {
    /// Attack plus bonus damage.
    Strike(u32),
    /// Heals the opponent.
    Mend(u32),
    Pass,
    Haste,
    Freeze(u32),
    Vanish(u32),
    Weaken(i32),
}

#[derive(Clone, Debug)]
pub(crate) struct DummySkill {
    name: String,
    cooldown: u32,
    action: DummyMove,
    randomized: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct Dummy {
    name: String,
    health: u32,
    max_health: u32,
    attack: u32,
    defense: u32,
    xp: u32,
    ledger: StatusEffectLedger,
    skills: Vec<DummySkill>,
}

impl Dummy {
    pub(crate) fn new(name: &str, health: u32, max_health: u32) -> Self {
        Self {
            name: name.to_owned(),
            health,
            max_health,
            attack: 0,
            defense: 0,
            xp: 0,
            ledger: StatusEffectLedger::default(),
            skills: Vec::new(),
        }
    }

    pub(crate) fn with_attack(mut self, attack: u32) -> Self {
        self.attack = attack;
        self
    }

    pub(crate) fn with_defense(mut self, defense: u32) -> Self {
        self.defense = defense;
        self
    }

    pub(crate) fn with_xp(mut self, xp: u32) -> Self {
        self.xp = xp;
        self
    }

    pub(crate) fn with_skill(self, name: &str, cooldown: u32, action: DummyMove) -> Self {
        self.push_skill(name, cooldown, action, false)
    }

    pub(crate) fn with_random_skill(self, name: &str, cooldown: u32, action: DummyMove) -> Self {
        self.push_skill(name, cooldown, action, true)
    }

    fn push_skill(mut self, name: &str, cooldown: u32, action: DummyMove, randomized: bool) -> Self {
        self.skills.push(DummySkill {
            name: name.to_owned(),
            cooldown,
            action,
            randomized,
        });
        self.ledger = StatusEffectLedger::with_skill_slots(self.skills.len());
        self
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut StatusEffectLedger {
        &mut self.ledger
    }

    fn effective(base: u32, modifier: i32) -> u32 {
        u32::try_from((i64::from(base) + i64::from(modifier)).max(0)).unwrap_or(u32::MAX)
    }
}

impl CombatantView for Dummy {
    fn name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn max_health(&self) -> u32 {
        self.max_health
    }

    fn attack(&self) -> u32 {
        Self::effective(self.attack, self.ledger.modifier(Stat::Attack))
    }

    fn take_damage(&mut self, amount: u32, attacker: Attribution<'_>) {
        let damage = if attacker.is_attributed() {
            amount.saturating_sub(Self::effective(
                self.defense,
                self.ledger.modifier(Stat::Defense),
            ))
        } else {
            amount
        };
        self.health = self.health.saturating_sub(damage);
    }

    fn heal(&mut self, amount: u32) {
        if self.health > 0 {
            self.health = self.health.saturating_add(amount).min(self.max_health);
        }
    }

    fn apply_buff(&mut self, stat: Stat, magnitude: i32, duration: u32) {
        self.ledger.apply_buff(stat, magnitude, duration);
    }

    fn inflict_status(&mut self, status: StatusKind, turns: u32) {
        self.ledger.inflict(status, turns);
    }

    fn is_frozen(&self) -> bool {
        self.ledger.is_frozen()
    }

    fn is_stunned(&self) -> bool {
        self.ledger.is_stunned()
    }

    fn is_invisible(&self) -> bool {
        self.ledger.is_invisible()
    }

    fn has_extra_turn(&self) -> bool {
        self.ledger.has_extra_turn()
    }

    fn set_extra_turn(&mut self, granted: bool) {
        self.ledger.set_extra_turn(granted);
    }

    fn has_crit_boost(&self) -> bool {
        self.ledger.has_crit_boost()
    }

    fn grant_crit_boost(&mut self, turns: u32) {
        self.ledger.grant_crit_boost(turns);
    }

    fn attack_debuff(&self) -> u32 {
        self.ledger.debuff(Stat::Attack)
    }

    fn defense_debuff(&self) -> u32 {
        self.ledger.debuff(Stat::Defense)
    }

    fn skills(&self) -> Vec<SkillSummary> {
        self.skills
            .iter()
            .enumerate()
            .map(|(slot, skill)| {
                SkillSummary::new(
                    skill.name.clone(),
                    self.ledger.cooldown(slot),
                    SkillCapability::new(SkillIntent::Offense, skill.randomized),
                )
            })
            .collect()
    }

    fn use_skill(&mut self, index: usize, opponent: &mut dyn CombatantView) {
        let Some(skill) = self.skills.get(index).cloned() else {
            return;
        };
        if self.ledger.cooldown(index) > 0 {
            return;
        }

        match skill.action {
            DummyMove::Strike(bonus) => {
                let damage = self.attack() + bonus;
                opponent.take_damage(damage, Attribution::Attacker(&self.name));
            }
            DummyMove::Mend(amount) => opponent.heal(amount),
            DummyMove::Pass => {}
            DummyMove::Haste => self.ledger.set_extra_turn(true),
            DummyMove::Freeze(turns) => opponent.inflict_status(StatusKind::Frozen, turns),
            DummyMove::Vanish(turns) => self.ledger.inflict(StatusKind::Invisible, turns),
            DummyMove::Weaken(amount) => opponent.apply_buff(Stat::Attack, -amount, 3),
        }
        self.ledger.start_cooldown(index, skill.cooldown);
    }

    fn reset_all_cooldowns(&mut self) {
        self.ledger.reset_cooldowns();
    }

    fn reduce_cooldowns(&mut self) {
        self.ledger.reduce_cooldowns();
    }

    fn update_buffs(&mut self) {
        self.ledger.update_buffs();
    }

    fn apply_regen(&mut self) {}

    fn apply_passive_start(&mut self, _opponent: &mut dyn CombatantView) {}

    fn apply_status(&mut self) {
        self.ledger.apply_statuses();
    }

    fn cleanup_statuses(&mut self) {
        self.ledger.cleanup_statuses();
    }
}

impl EnemyPolicy for Dummy {
    fn take_turn(&mut self, opponent: &mut dyn CombatantView) {
        let ready = (0..self.skills.len()).find(|slot| self.ledger.cooldown(*slot) == 0);
        match ready {
            Some(slot) => self.use_skill(slot, opponent),
            None => {
                let damage = self.attack();
                opponent.take_damage(damage, Attribution::Attacker(&self.name));
            }
        }
    }

    fn xp_reward(&self) -> u32 {
        self.xp
    }
}
