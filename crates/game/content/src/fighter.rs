//! Concrete combatant used for both the player and enemies.

use battle_core::{
    Attribution, BattleConfig, CombatantView, EnemyPolicy, SkillSummary, Stat,
    StatusEffectLedger, StatusKind,
};
use tracing::debug;

use crate::rng::RollStream;
use crate::skills::{Skill, SkillEffect};

/// Turn-start passive applied by a fighter against its opponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Passive {
    /// Unmitigated damage every turn.
    Burn { damage: u32 },
    /// One-turn attack debuff, renewed every turn.
    Intimidate { attack: u32 },
}

/// Static description of a fighter, as stored in rosters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FighterTemplate {
    pub name: String,
    pub level: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub regen: u32,
    pub xp_reward: u32,
    pub skills: Vec<Skill>,
    pub passive: Option<Passive>,
}

impl FighterTemplate {
    pub fn new(name: impl Into<String>, max_health: u32, attack: u32, defense: u32) -> Self {
        Self {
            name: name.into(),
            level: 1,
            max_health,
            attack,
            defense,
            ..Self::default()
        }
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    pub fn with_regen(mut self, regen: u32) -> Self {
        self.regen = regen;
        self
    }

    pub fn with_xp_reward(mut self, xp_reward: u32) -> Self {
        self.xp_reward = xp_reward;
        self
    }

    pub fn with_passive(mut self, passive: Passive) -> Self {
        self.passive = Some(passive);
        self
    }

    /// Builds a fighter at full health. Skills beyond
    /// [`BattleConfig::MAX_SKILLS`] are dropped.
    pub fn spawn(&self, seed: u64) -> Fighter {
        let mut skills = self.skills.clone();
        skills.truncate(BattleConfig::MAX_SKILLS);

        Fighter {
            ledger: StatusEffectLedger::with_skill_slots(skills.len()),
            name: self.name.clone(),
            level: self.level,
            health: self.max_health,
            max_health: self.max_health,
            attack: self.attack,
            defense: self.defense,
            regen: self.regen,
            xp_reward: self.xp_reward,
            passive: self.passive,
            skills,
            rolls: RollStream::new(seed),
        }
    }
}

/// A live combatant with health, stats, skills and a status ledger.
#[derive(Clone, Debug)]
pub struct Fighter {
    name: String,
    level: u32,
    health: u32,
    max_health: u32,
    attack: u32,
    defense: u32,
    regen: u32,
    xp_reward: u32,
    passive: Option<Passive>,
    skills: Vec<Skill>,
    ledger: StatusEffectLedger,
    rolls: RollStream,
}

impl Fighter {
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn base_attack(&self) -> u32 {
        self.attack
    }

    pub fn defense(&self) -> u32 {
        apply_modifier(self.defense, self.ledger.modifier(Stat::Defense))
    }

    pub fn ledger(&self) -> &StatusEffectLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut StatusEffectLedger {
        &mut self.ledger
    }

    pub fn skill(&self, index: usize) -> Option<&Skill> {
        self.skills.get(index)
    }

    /// Heals to full and clears every buff, status and cooldown.
    pub fn restore(&mut self) {
        self.health = self.max_health;
        self.ledger.clear();
    }

    fn normal_attack(&self, opponent: &mut dyn CombatantView) {
        opponent.take_damage(self.attack(), Attribution::Attacker(&self.name));
    }

    fn resolve(&mut self, effect: SkillEffect, opponent: &mut dyn CombatantView) {
        match effect {
            SkillEffect::Strike { power } => {
                let damage = self.attack().saturating_add(power);
                opponent.take_damage(damage, Attribution::Attacker(&self.name));
            }
            SkillEffect::Heal { amount } => self.heal(amount),
            SkillEffect::Buff {
                stat,
                magnitude,
                turns,
            } => self.ledger.apply_buff(stat, to_magnitude(magnitude), turns),
            SkillEffect::Debuff {
                stat,
                magnitude,
                turns,
            } => opponent.apply_buff(stat, -to_magnitude(magnitude), turns),
            SkillEffect::Freeze { turns } => opponent.inflict_status(StatusKind::Frozen, turns),
            SkillEffect::Stun { turns } => opponent.inflict_status(StatusKind::Stunned, turns),
            SkillEffect::Vanish { turns } => self.ledger.inflict(StatusKind::Invisible, turns),
            SkillEffect::Haste => self.ledger.set_extra_turn(true),
            SkillEffect::Focus { turns } => self.ledger.grant_crit_boost(turns),
            SkillEffect::Gamble { min, max } => {
                let roll = self.rolls.roll(min, max);
                let damage = self.attack().saturating_add(roll);
                debug!(
                    target: "battle_content::fighter",
                    fighter = %self.name,
                    roll,
                    damage,
                    "gamble rolled"
                );
                opponent.take_damage(damage, Attribution::Attacker(&self.name));
            }
        }
    }
}

fn apply_modifier(base: u32, modifier: i32) -> u32 {
    let value = i64::from(base) + i64::from(modifier);
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

fn to_magnitude(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl CombatantView for Fighter {
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
        apply_modifier(self.attack, self.ledger.modifier(Stat::Attack))
    }

    fn take_damage(&mut self, amount: u32, attacker: Attribution<'_>) {
        let damage = match attacker {
            Attribution::Attacker(_) => amount.saturating_sub(self.defense()),
            Attribution::Unattributed => amount,
        };
        self.health = self.health.saturating_sub(damage);
    }

    fn heal(&mut self, amount: u32) {
        if self.is_alive() {
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
                    skill.capability(),
                )
            })
            .collect()
    }

    fn use_skill(&mut self, index: usize, opponent: &mut dyn CombatantView) {
        let Some(skill) = self.skills.get(index) else {
            return;
        };
        if self.ledger.cooldown(index) > 0 {
            return;
        }
        let (effect, cooldown) = (skill.effect, skill.cooldown);

        debug!(
            target: "battle_content::fighter",
            fighter = %self.name,
            skill = %skill.name,
            "skill used"
        );
        self.resolve(effect, opponent);
        self.ledger.start_cooldown(index, cooldown);
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

    fn apply_regen(&mut self) {
        if self.regen > 0 {
            self.heal(self.regen);
        }
    }

    fn apply_passive_start(&mut self, opponent: &mut dyn CombatantView) {
        match self.passive {
            Some(Passive::Burn { damage }) => {
                opponent.take_damage(damage, Attribution::Unattributed);
            }
            Some(Passive::Intimidate { attack }) => {
                opponent.apply_buff(Stat::Attack, -to_magnitude(attack), 1);
            }
            None => {}
        }
    }

    fn apply_status(&mut self) {
        self.ledger.apply_statuses();
    }

    fn cleanup_statuses(&mut self) {
        self.ledger.cleanup_statuses();
    }
}

impl EnemyPolicy for Fighter {
    /// Uses the first ready skill in list order, otherwise attacks.
    fn take_turn(&mut self, opponent: &mut dyn CombatantView) {
        let ready = (0..self.skills.len()).find(|slot| self.ledger.cooldown(*slot) == 0);
        match ready {
            Some(slot) => self.use_skill(slot, opponent),
            None => self.normal_attack(opponent),
        }
    }

    fn xp_reward(&self) -> u32 {
        self.xp_reward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn golem() -> Fighter {
        FighterTemplate::new("Golem", 40, 6, 2).spawn(1)
    }

    #[test]
    fn attributed_damage_is_reduced_by_defense() {
        let mut target = golem();
        target.take_damage(10, Attribution::Attacker("Hero"));
        assert_eq!(target.health(), 32);

        target.take_damage(1, Attribution::Attacker("Hero"));
        assert_eq!(target.health(), 32);
    }

    #[test]
    fn unattributed_damage_is_raw() {
        let mut target = golem();
        target.take_damage(8, Attribution::Unattributed);
        assert_eq!(target.health(), 32);
    }

    #[test]
    fn defense_debuff_lowers_mitigation() {
        let mut target = golem();
        target.apply_buff(Stat::Defense, -2, 2);
        assert_eq!(target.defense_debuff(), 2);
        assert!(target.is_debuffed());

        target.take_damage(10, Attribution::Attacker("Hero"));
        assert_eq!(target.health(), 30);
    }

    #[test]
    fn skills_start_their_cooldown() {
        let mut hero = FighterTemplate::new("Hero", 50, 5, 0)
            .with_skill(Skill::new("Smash", 2, SkillEffect::Strike { power: 3 }))
            .spawn(1);
        let mut target = FighterTemplate::new("Dummy", 50, 0, 0).spawn(2);

        hero.use_skill(0, &mut target);
        assert_eq!(target.health(), 42);
        assert_eq!(hero.skills()[0].cooldown_remaining, 2);

        // Ignored while cooling down.
        hero.use_skill(0, &mut target);
        assert_eq!(target.health(), 42);

        hero.reduce_cooldowns();
        hero.reduce_cooldowns();
        assert!(hero.skills()[0].is_ready());
    }

    #[test]
    fn enemy_prefers_first_ready_skill() {
        let mut enemy = FighterTemplate::new("Shade", 30, 4, 0)
            .with_skill(Skill::new("Chill", 3, SkillEffect::Freeze { turns: 1 }))
            .spawn(3);
        let mut hero = FighterTemplate::new("Hero", 50, 5, 0).spawn(1);

        enemy.take_turn(&mut hero);
        assert!(hero.is_frozen());
        assert_eq!(hero.health(), 50);

        enemy.take_turn(&mut hero);
        assert_eq!(hero.health(), 46);
    }

    #[test]
    fn heal_never_exceeds_max_or_revives() {
        let mut hero = FighterTemplate::new("Hero", 50, 5, 0).spawn(1);
        hero.take_damage(10, Attribution::Unattributed);
        hero.heal(100);
        assert_eq!(hero.health(), 50);

        hero.take_damage(50, Attribution::Unattributed);
        hero.heal(10);
        assert_eq!(hero.health(), 0);
    }

    #[test]
    fn gamble_is_deterministic_per_seed() {
        let template = FighterTemplate::new("Jester", 30, 2, 0)
            .with_skill(Skill::new("Dice", 0, SkillEffect::Gamble { min: 1, max: 10 }));

        let mut a = template.spawn(99);
        let mut b = template.spawn(99);
        let mut ta = FighterTemplate::new("Target", 100, 0, 0).spawn(0);
        let mut tb = FighterTemplate::new("Target", 100, 0, 0).spawn(0);

        for _ in 0..5 {
            a.use_skill(0, &mut ta);
            b.use_skill(0, &mut tb);
        }
        assert_eq!(ta.health(), tb.health());
        assert!(ta.health() <= 100 - 5 * 3);
    }
}
