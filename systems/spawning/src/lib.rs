#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn-scheduled spawning system that releases attacker waves into the colony.

mod plan;

use std::collections::BTreeMap;

use lane_defence_core::{AttackerId, AttackerStats, Event, Location, RandomSource};
use lane_defence_world::{query, Colony};

pub use plan::{AssaultPlan, Wave};

/// Holds scheduled attackers until their turn arrives.
///
/// Attackers exist only as stat blocks while pending; the colony assigns their
/// identifiers when they are released.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Spawner {
    schedule: BTreeMap<u64, Vec<AttackerStats>>,
}

impl Spawner {
    /// Creates a spawner with nothing scheduled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a spawner preloaded with every wave of the plan.
    #[must_use]
    pub fn from_plan(plan: &AssaultPlan) -> Self {
        let mut spawner = Self::new();
        for wave in plan.waves() {
            spawner.schedule(wave.turn, wave.count, wave.stats);
        }
        spawner
    }

    /// Records `count` attackers with identical stats against `turn`.
    pub fn schedule(&mut self, turn: u64, count: u32, stats: AttackerStats) {
        if count == 0 {
            return;
        }
        let wave = self.schedule.entry(turn).or_default();
        wave.extend((0..count).map(|_| stats));
    }

    /// Releases every wave recorded for `turn` or earlier, placing each attacker
    /// on an entry cell chosen uniformly at random.
    ///
    /// Overdue waves go out first, in turn order. Returns the released attackers;
    /// empty when nothing is due. A board without entry cells keeps the waves pending.
    pub fn release(
        &mut self,
        colony: &mut Colony,
        turn: u64,
        random: &mut dyn RandomSource,
        out_events: &mut Vec<Event>,
    ) -> Vec<AttackerId> {
        let entries = query::entry_cells(colony);
        if entries.is_empty() {
            return Vec::new();
        }
        let due: Vec<u64> = self.schedule.range(..=turn).map(|(turn, _)| *turn).collect();
        let wave: Vec<AttackerStats> = due
            .into_iter()
            .filter_map(|turn| self.schedule.remove(&turn))
            .flatten()
            .collect();

        let mut released = Vec::with_capacity(wave.len());
        for stats in wave {
            let entry = entries[random.pick_index(entries.len())];
            if let Ok(id) = colony.release_attacker(stats, Location::Lane(entry), out_events) {
                released.push(id);
            }
        }
        released
    }

    /// Number of attackers still waiting to be released.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.schedule.values().map(Vec::len).sum()
    }

    /// Number of attackers waiting for the provided turn.
    #[must_use]
    pub fn pending_at(&self, turn: u64) -> usize {
        self.schedule.get(&turn).map_or(0, Vec::len)
    }

    /// Earliest turn that still has attackers scheduled.
    #[must_use]
    pub fn next_wave_turn(&self) -> Option<u64> {
        self.schedule.keys().next().copied()
    }
}
