use std::sync::Arc;

use super::*;
use crate::charge::{ChargeAbility, ChargeEffect, ChargeTag};
use crate::error::SelectionError;
use crate::status::StatusKind;
use crate::testing::{Dummy, DummyMove};

/// Unattributed damage to the opponent on activation.
struct Spite(u32);

impl ChargeEffect for Spite {
    fn activate(&self, _owner: &mut dyn CombatantView, opponent: &mut dyn CombatantView) {
        opponent.take_damage(self.0, Attribution::Unattributed);
    }
}

/// Grants the owner an extra action.
struct Frenzy;

impl ChargeEffect for Frenzy {
    fn activate(&self, owner: &mut dyn CombatantView, _opponent: &mut dyn CombatantView) {
        owner.set_extra_turn(true);
    }
}

fn tracker() -> ChargeTracker {
    ChargeTracker::new(BattleConfig::default())
}

fn run(
    player: &mut Dummy,
    enemy: &mut Dummy,
    tracker: &mut ChargeTracker,
    script: &mut ScriptedDecisions,
) -> (BattleOutcome, Option<u32>, BattleReport) {
    let config = BattleConfig::default();
    let mut sequencer = TurnSequencer::new(&config, script);
    let outcome = sequencer.run_battle(player, enemy, tracker);
    let xp = sequencer.xp_reward();
    (outcome, xp, sequencer.into_report())
}

#[test]
fn normal_attack_is_mitigated_by_enemy_defense() {
    let mut player = Dummy::new("Hero", 100, 100).with_attack(10);
    let mut enemy = Dummy::new("Golem", 16, 16).with_defense(2).with_xp(7);
    let mut script = ScriptedDecisions::default();

    let (outcome, xp, report) = run(&mut player, &mut enemy, &mut tracker(), &mut script);

    assert_eq!(outcome, BattleOutcome::Victory);
    assert_eq!(xp, Some(7));
    assert_eq!(report.turns().len(), 2);
    assert_eq!(report.turns()[0].facts.player_damage_dealt, 8);
    assert_eq!(report.turns()[0].facts.enemy_health, 8);
    assert_eq!(report.turns()[0].facts.enemy_damage_dealt, 0);
}

#[test]
fn crit_bonus_applies_before_mitigation() {
    let mut player = Dummy::new("Hero", 100, 100).with_attack(10);
    player.ledger_mut().grant_crit_boost(2);
    let mut enemy = Dummy::new("Golem", 30, 30).with_defense(2);
    let mut script = ScriptedDecisions::default();

    let (_, _, report) = run(&mut player, &mut enemy, &mut tracker(), &mut script);

    // 10 * 1.5 - 2, not (10 - 2) * 1.5.
    assert_eq!(report.turns()[0].facts.player_damage_dealt, 13);
    // The boost decays at the start of turn two.
    assert_eq!(report.turns()[1].facts.player_damage_dealt, 8);
}

#[test]
fn frozen_player_takes_raw_self_damage_and_enemy_deals_nothing() {
    let mut player = Dummy::new("Hero", 100, 100).with_attack(10).with_defense(50);
    player.ledger_mut().inflict(StatusKind::Frozen, 1);
    let mut enemy = Dummy::new("Slime", 10, 10).with_attack(3);
    let mut script = ScriptedDecisions::default();

    let (outcome, _, report) = run(&mut player, &mut enemy, &mut tracker(), &mut script);

    let first = &report.turns()[0].facts;
    assert_eq!(first.player_damage_dealt, 0);
    assert_eq!(first.player_damage_taken(), 8);
    assert_eq!(first.enemy_damage_dealt, 0);
    assert!(report.turns()[0].fired.contains(&ChargeTag::DamageTaken));

    // Thawed on turn two.
    assert_eq!(report.turns()[1].facts.player_damage_dealt, 10);
    assert_eq!(outcome, BattleOutcome::Victory);
}

#[test]
fn frozen_enemy_skips_exactly_one_phase() {
    let mut player = Dummy::new("Hero", 100, 100)
        .with_attack(1)
        .with_skill("Frostbite", 5, DummyMove::Freeze(1));
    let mut enemy = Dummy::new("Ogre", 40, 40).with_attack(4).with_defense(30);
    let mut script = ScriptedDecisions::new([PlayerChoice::Skill(0)]);

    let (_, _, report) = run(&mut player, &mut enemy, &mut tracker(), &mut script);

    let first = &report.turns()[0].facts;
    assert_eq!(first.enemy_damage_dealt, 0);
    // The frozen self-damage bypasses the ogre's defense but is not player damage.
    assert_eq!(first.enemy_health, 32);
    assert_eq!(first.player_damage_dealt, 0);

    assert_eq!(report.turns()[1].facts.enemy_damage_dealt, 4);
}

#[test]
fn both_falling_in_one_turn_is_a_defeat() {
    let mut tracker = tracker();
    let spite = tracker
        .register(
            ChargeAbility::new("Spite", ChargeTag::DamageTaken, 1, 2, Arc::new(Spite(100)))
                .unlocked(),
        )
        .unwrap();
    tracker.select_active(&[spite]).unwrap();

    let mut player = Dummy::new("Hero", 10, 10).with_attack(1);
    let mut enemy = Dummy::new("Wyrm", 50, 50).with_attack(10).with_xp(99);
    let mut script = ScriptedDecisions::default();

    let (outcome, xp, report) = run(&mut player, &mut enemy, &mut tracker, &mut script);

    assert_eq!(player.health(), 0);
    assert_eq!(enemy.health(), 0);
    assert_eq!(outcome, BattleOutcome::Defeat);
    assert_eq!(xp, None);
    assert_eq!(report.activations().count(), 1);
}

#[test]
fn invalid_selections_are_reprompted() {
    let mut player = Dummy::new("Hero", 100, 100)
        .with_attack(5)
        .with_skill("Cleave", 3, DummyMove::Strike(0));
    let mut enemy = Dummy::new("Rat", 30, 30).with_attack(1);
    let mut script = ScriptedDecisions::new([
        PlayerChoice::Skill(5),
        PlayerChoice::Skill(0),
        PlayerChoice::Skill(0),
    ]);

    let (outcome, _, report) = run(&mut player, &mut enemy, &mut tracker(), &mut script);

    assert_eq!(outcome, BattleOutcome::Victory);
    assert_eq!(
        script.rejected(),
        &[
            SelectionError::IndexOutOfRange { index: 5, len: 1 },
            SelectionError::SkillOnCooldown {
                name: "Cleave".into(),
                remaining: 2
            },
        ]
    );
    // Neither rejection consumed a phase: both turns still dealt damage.
    assert_eq!(report.turns()[0].facts.player_damage_dealt, 5);
    assert_eq!(report.turns()[1].facts.player_damage_dealt, 5);
}

#[test]
fn extra_turn_damage_is_summed_and_flag_cleared() {
    let mut player = Dummy::new("Hero", 100, 100)
        .with_attack(10)
        .with_skill("Haste", 4, DummyMove::Haste);
    let mut enemy = Dummy::new("Troll", 25, 25).with_attack(1);
    let mut script = ScriptedDecisions::new([PlayerChoice::Skill(0), PlayerChoice::NormalAttack]);

    let (_, _, report) = run(&mut player, &mut enemy, &mut tracker(), &mut script);

    assert_eq!(report.turns()[0].facts.player_damage_dealt, 10);
    assert!(!player.has_extra_turn());
    assert_eq!(report.total_player_damage_dealt(), 25);
}

#[test]
fn extra_turn_repeats_the_frozen_override() {
    let mut tracker = tracker();
    let frenzy = tracker
        .register(
            ChargeAbility::new("Frenzy", ChargeTag::NoDamageTaken, 1, 5, Arc::new(Frenzy))
                .unlocked(),
        )
        .unwrap();
    tracker.select_active(&[frenzy]).unwrap();

    let mut player = Dummy::new("Hero", 100, 100).with_attack(1);
    let mut enemy = Dummy::new("Yeti", 200, 200)
        .with_attack(2)
        .with_skill("Chill", 10, DummyMove::Freeze(1));
    let mut script = ScriptedDecisions::default();

    let (_, _, report) = run(&mut player, &mut enemy, &mut tracker, &mut script);
    let turns = report.turns();

    // Turn one: untouched, so Frenzy fires; the yeti freezes the hero.
    assert_eq!(turns[0].activations.len(), 1);
    assert_eq!(turns[0].facts.player_damage_taken(), 0);

    // Turn two: frozen in both the player phase and the extra turn.
    let second = &turns[1].facts;
    assert_eq!(second.player_damage_dealt, 0);
    assert_eq!(second.enemy_damage_dealt, 2);
    assert_eq!(second.player_damage_taken(), 2 * 8 + 2);
}

#[test]
fn healing_the_enemy_counts_as_zero_damage() {
    let mut player = Dummy::new("Hero", 100, 100)
        .with_attack(10)
        .with_skill("Mercy", 9, DummyMove::Mend(5));
    let mut enemy = Dummy::new("Imp", 20, 30).with_attack(1);
    let mut script = ScriptedDecisions::new([PlayerChoice::Skill(0)]);

    let (_, _, report) = run(&mut player, &mut enemy, &mut tracker(), &mut script);

    let first = &report.turns()[0].facts;
    assert_eq!(first.enemy_health, 25);
    assert_eq!(first.player_damage_dealt, 0);
}

#[test]
fn invisible_enemy_makes_the_player_miss() {
    let mut tracker = tracker();
    let shame = tracker
        .register(
            ChargeAbility::new("Shame", ChargeTag::MissAttack, 5, 2, Arc::new(Spite(0)))
                .unlocked(),
        )
        .unwrap();
    tracker.select_active(&[shame]).unwrap();

    let mut player = Dummy::new("Hero", 100, 100).with_attack(10);
    let mut enemy = Dummy::new("Wisp", 30, 30)
        .with_attack(1)
        .with_skill("Fade", 10, DummyMove::Vanish(1));
    let mut script = ScriptedDecisions::default();

    let (outcome, _, report) = run(&mut player, &mut enemy, &mut tracker, &mut script);

    let second = &report.turns()[1];
    assert!(second.facts.missed_attack);
    assert_eq!(second.facts.player_damage_dealt, 0);
    assert!(second.fired.contains(&ChargeTag::MissAttack));
    assert_eq!(outcome, BattleOutcome::Victory);
}

#[test]
fn no_combat_damage_needs_two_quiet_turns() {
    let mut player = Dummy::new("Hero", 100, 100)
        .with_attack(10)
        .with_skill("Wait", 0, DummyMove::Pass);
    let mut enemy = Dummy::new("Statue", 10, 10);
    let mut script = ScriptedDecisions::new([
        PlayerChoice::Skill(0),
        PlayerChoice::Skill(0),
        PlayerChoice::NormalAttack,
    ]);

    let (_, _, report) = run(&mut player, &mut enemy, &mut tracker(), &mut script);
    let turns = report.turns();

    assert_eq!(turns.len(), 3);
    assert!(!turns[0].fired.contains(&ChargeTag::NoCombatDamage));
    assert!(turns[1].fired.contains(&ChargeTag::NoCombatDamage));
    assert!(turns[1].fired.contains(&ChargeTag::NoDamageDealt));
    assert!(!turns[2].fired.contains(&ChargeTag::NoCombatDamage));
    assert_eq!(turns[2].facts.streaks.no_combat_damage, 0);
}

#[test]
fn randomized_skills_fire_rng_action() {
    let mut player = Dummy::new("Hero", 100, 100)
        .with_attack(4)
        .with_random_skill("Dice", 2, DummyMove::Strike(1));
    let mut enemy = Dummy::new("Crab", 9, 9);
    let mut script = ScriptedDecisions::new([PlayerChoice::Skill(0)]);

    let (_, _, report) = run(&mut player, &mut enemy, &mut tracker(), &mut script);

    assert!(report.turns()[0].facts.randomized_action);
    assert!(report.turns()[0].fired.contains(&ChargeTag::RngAction));
    assert!(!report.turns()[1].facts.randomized_action);
}

#[test]
fn debuffs_on_the_player_fire_debuffed() {
    let mut player = Dummy::new("Hero", 100, 100).with_attack(6);
    let mut enemy = Dummy::new("Hag", 12, 12)
        .with_attack(1)
        .with_skill("Hex", 10, DummyMove::Weaken(2));
    let mut script = ScriptedDecisions::default();

    let (_, _, report) = run(&mut player, &mut enemy, &mut tracker(), &mut script);

    assert!(report.turns()[0].facts.debuffed);
    assert!(report.turns()[0].fired.contains(&ChargeTag::Debuffed));
    // The debuff shrinks the second attack.
    assert_eq!(report.turns()[1].facts.player_damage_dealt, 4);
}

#[test]
fn sequencer_can_run_consecutive_battles() {
    let config = BattleConfig::default();
    let mut script = ScriptedDecisions::default();
    let mut tracker = tracker();
    let mut sequencer = TurnSequencer::new(&config, &mut script);

    let mut player = Dummy::new("Hero", 100, 100).with_attack(10);
    let mut first = Dummy::new("Bat", 10, 10).with_xp(3);
    let mut second = Dummy::new("Bat", 30, 30).with_xp(5);

    assert!(sequencer.run_battle(&mut player, &mut first, &mut tracker).is_victory());
    assert_eq!(sequencer.turns(), 1);
    assert!(sequencer.run_battle(&mut player, &mut second, &mut tracker).is_victory());
    assert_eq!(sequencer.turns(), 3);
    assert_eq!(sequencer.xp_reward(), Some(5));
}
