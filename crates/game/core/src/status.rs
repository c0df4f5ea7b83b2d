//! Status effect ledger for a single combatant.
//!
//! Tracks buff/debuff stacks, skill cooldown counters, timed statuses and the
//! transient flags the engine consults when resolving a phase. Everything is
//! counted in turns.
//!
//! # Status lifecycle
//!
//! A timed status raises its flag as soon as it is inflicted. The owner's
//! `apply_statuses` re-raises flags for every status still in the ledger and
//! lowers the rest; `cleanup_statuses` then ticks durations down and drops
//! expired entries. Flags are only recomputed by the next `apply_statuses`, so
//! a one-turn freeze inflicted during the opponent's phase skips exactly one of
//! the owner's phases.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::combatant::Stat;
use crate::config::BattleConfig;

bitflags! {
    /// Transient per-combatant flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StatusFlags: u8 {
        const FROZEN = 1 << 0;
        const STUNNED = 1 << 1;
        const INVISIBLE = 1 << 2;
        const EXTRA_TURN = 1 << 3;
    }
}

/// Timed statuses that override normal action resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    /// Skips the action and inflicts fixed self-damage.
    Frozen,
    /// Skips the action.
    Stunned,
    /// Attacks against this combatant miss.
    Invisible,
}

impl StatusKind {
    pub const fn flag(self) -> StatusFlags {
        match self {
            Self::Frozen => StatusFlags::FROZEN,
            Self::Stunned => StatusFlags::STUNNED,
            Self::Invisible => StatusFlags::INVISIBLE,
        }
    }
}

/// A single timed status with remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedStatus {
    pub kind: StatusKind,
    pub remaining: u32,
}

/// A buff (positive) or debuff (negative) stack on one stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffStack {
    pub stat: Stat,
    pub magnitude: i32,
    pub remaining: u32,
}

impl BuffStack {
    pub fn is_debuff(&self) -> bool {
        self.magnitude < 0
    }
}

/// Per-combatant buff stacks, cooldown counters, timed statuses and flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffectLedger {
    buffs: ArrayVec<BuffStack, { BattleConfig::MAX_BUFFS }>,
    statuses: ArrayVec<TimedStatus, { BattleConfig::MAX_STATUSES }>,
    cooldowns: ArrayVec<u32, { BattleConfig::MAX_SKILLS }>,
    flags: StatusFlags,
    crit_boost_turns: u32,
}

impl StatusEffectLedger {
    /// Creates an empty ledger with cooldown counters for `skill_slots` skills.
    ///
    /// Slots beyond [`BattleConfig::MAX_SKILLS`] are ignored.
    pub fn with_skill_slots(skill_slots: usize) -> Self {
        let mut ledger = Self::default();
        for _ in 0..skill_slots.min(BattleConfig::MAX_SKILLS) {
            ledger.cooldowns.push(0);
        }
        ledger
    }

    // ========================================================================
    // Buffs
    // ========================================================================

    /// Adds a buff stack. Zero-duration or zero-magnitude stacks are ignored,
    /// as are stacks beyond capacity.
    pub fn apply_buff(&mut self, stat: Stat, magnitude: i32, duration: u32) {
        if duration == 0 || magnitude == 0 || self.buffs.is_full() {
            return;
        }
        self.buffs.push(BuffStack {
            stat,
            magnitude,
            remaining: duration,
        });
    }

    /// Decays every buff stack and the crit boost by one turn.
    pub fn update_buffs(&mut self) {
        for stack in self.buffs.iter_mut() {
            stack.remaining = stack.remaining.saturating_sub(1);
        }
        self.buffs.retain(|stack| stack.remaining > 0);
        self.crit_boost_turns = self.crit_boost_turns.saturating_sub(1);
    }

    /// Net modifier for a stat across all stacks.
    pub fn modifier(&self, stat: Stat) -> i32 {
        self.buffs
            .iter()
            .filter(|stack| stack.stat == stat)
            .map(|stack| stack.magnitude)
            .sum()
    }

    /// Summed magnitude of debuff stacks on `stat`, as a positive number.
    pub fn debuff(&self, stat: Stat) -> u32 {
        self.buffs
            .iter()
            .filter(|stack| stack.stat == stat && stack.is_debuff())
            .map(|stack| stack.magnitude.unsigned_abs())
            .sum()
    }

    pub fn buffs(&self) -> impl Iterator<Item = &BuffStack> {
        self.buffs.iter()
    }

    // ========================================================================
    // Crit boost
    // ========================================================================

    /// Grants the crit boost for `turns`, extending to the longer duration.
    pub fn grant_crit_boost(&mut self, turns: u32) {
        self.crit_boost_turns = self.crit_boost_turns.max(turns);
    }

    pub fn has_crit_boost(&self) -> bool {
        self.crit_boost_turns > 0
    }

    // ========================================================================
    // Cooldowns
    // ========================================================================

    pub fn cooldown(&self, slot: usize) -> u32 {
        self.cooldowns.get(slot).copied().unwrap_or(0)
    }

    pub fn start_cooldown(&mut self, slot: usize, turns: u32) {
        if let Some(cooldown) = self.cooldowns.get_mut(slot) {
            *cooldown = turns;
        }
    }

    pub fn reduce_cooldowns(&mut self) {
        for cooldown in self.cooldowns.iter_mut() {
            *cooldown = cooldown.saturating_sub(1);
        }
    }

    pub fn reset_cooldowns(&mut self) {
        for cooldown in self.cooldowns.iter_mut() {
            *cooldown = 0;
        }
    }

    // ========================================================================
    // Timed statuses
    // ========================================================================

    /// Inflicts a timed status and raises its flag immediately.
    ///
    /// If the status already exists, extends to the longer duration.
    pub fn inflict(&mut self, kind: StatusKind, turns: u32) {
        if turns == 0 {
            return;
        }

        if let Some(existing) = self.statuses.iter_mut().find(|s| s.kind == kind) {
            existing.remaining = existing.remaining.max(turns);
        } else if !self.statuses.is_full() {
            self.statuses.push(TimedStatus {
                kind,
                remaining: turns,
            });
        }

        self.flags.insert(kind.flag());
    }

    /// Recomputes status flags from the statuses still in the ledger.
    pub fn apply_statuses(&mut self) {
        let mut active = StatusFlags::empty();
        for status in &self.statuses {
            active.insert(status.kind.flag());
        }

        let status_mask = StatusFlags::FROZEN | StatusFlags::STUNNED | StatusFlags::INVISIBLE;
        self.flags.remove(status_mask);
        self.flags.insert(active);
    }

    /// Ticks every timed status down and drops expired ones.
    pub fn cleanup_statuses(&mut self) {
        for status in self.statuses.iter_mut() {
            status.remaining = status.remaining.saturating_sub(1);
        }
        self.statuses.retain(|s| s.remaining > 0);
    }

    pub fn remaining(&self, kind: StatusKind) -> Option<u32> {
        self.statuses
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.remaining)
    }

    // ========================================================================
    // Flags
    // ========================================================================

    pub fn flags(&self) -> StatusFlags {
        self.flags
    }

    pub fn is_frozen(&self) -> bool {
        self.flags.contains(StatusFlags::FROZEN)
    }

    pub fn is_stunned(&self) -> bool {
        self.flags.contains(StatusFlags::STUNNED)
    }

    pub fn is_invisible(&self) -> bool {
        self.flags.contains(StatusFlags::INVISIBLE)
    }

    pub fn has_extra_turn(&self) -> bool {
        self.flags.contains(StatusFlags::EXTRA_TURN)
    }

    pub fn set_extra_turn(&mut self, granted: bool) {
        self.flags.set(StatusFlags::EXTRA_TURN, granted);
    }

    /// Drops every buff, status and flag. Cooldown slots are kept but zeroed.
    pub fn clear(&mut self) {
        self.buffs.clear();
        self.statuses.clear();
        self.flags = StatusFlags::empty();
        self.crit_boost_turns = 0;
        self.reset_cooldowns();
    }
}
