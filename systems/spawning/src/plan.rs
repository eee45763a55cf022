//! Named assault plans.

use lane_defence_core::AttackerStats;
use serde::{Deserialize, Serialize};

/// One scheduled wave: `count` attackers with identical stats released on `turn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wave {
    /// Turn on which the wave enters the board.
    pub turn: u64,
    /// Number of attackers in the wave.
    pub count: u32,
    /// Armor and sting damage shared by every attacker in the wave.
    pub stats: AttackerStats,
}

impl Wave {
    /// Creates a wave description.
    #[must_use]
    pub const fn new(turn: u64, count: u32, stats: AttackerStats) -> Self {
        Self { turn, count, stats }
    }
}

/// Parameters of a graded plan: regular waves every other turn plus a heavy closing wave.
struct Difficulty {
    count: u32,
    armor: i32,
    closing_count: u32,
    closing_armor: i32,
}

const FIRST_TURN: u64 = 3;
const LAST_REGULAR_TURN: u64 = 15;
const CLOSING_TURN: u64 = 16;

/// Ordered collection of waves selected by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssaultPlan {
    waves: Vec<Wave>,
}

impl AssaultPlan {
    /// Names accepted by [`AssaultPlan::preset`].
    pub const PRESETS: [&'static str; 4] = ["test", "easy", "normal", "hard"];

    /// Creates a plan from explicit waves.
    #[must_use]
    pub fn new(waves: Vec<Wave>) -> Self {
        Self { waves }
    }

    /// Resolves a preset plan by name, ignoring ASCII case.
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        let plan = match name.to_ascii_lowercase().as_str() {
            "test" => Self::new(vec![
                Wave::new(2, 1, AttackerStats::new(3, 1)),
                Wave::new(3, 1, AttackerStats::new(3, 1)),
            ]),
            "easy" => Self::graded(&Difficulty {
                count: 1,
                armor: 3,
                closing_count: 1,
                closing_armor: 15,
            }),
            "normal" => Self::graded(&Difficulty {
                count: 2,
                armor: 3,
                closing_count: 2,
                closing_armor: 15,
            }),
            "hard" => Self::graded(&Difficulty {
                count: 3,
                armor: 4,
                closing_count: 3,
                closing_armor: 20,
            }),
            _ => return None,
        };
        Some(plan)
    }

    /// Regular waves grow by one attacker every third wave and by one armor every fourth.
    fn graded(difficulty: &Difficulty) -> Self {
        let mut waves: Vec<Wave> = (FIRST_TURN..=LAST_REGULAR_TURN)
            .step_by(2)
            .zip(0_u32..)
            .map(|(turn, index)| {
                let stats = AttackerStats::new(difficulty.armor + (index / 4) as i32, 1);
                Wave::new(turn, difficulty.count + index / 3, stats)
            })
            .collect();
        waves.push(Wave::new(
            CLOSING_TURN,
            difficulty.closing_count,
            AttackerStats::new(difficulty.closing_armor, 2),
        ));
        Self { waves }
    }

    /// Appends a wave to the plan.
    pub fn push(&mut self, wave: Wave) {
        self.waves.push(wave);
    }

    /// Waves in insertion order.
    #[must_use]
    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    /// Total attackers across every wave.
    #[must_use]
    pub fn attacker_total(&self) -> u64 {
        self.waves.iter().map(|wave| u64::from(wave.count)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_sends_two_single_attackers() {
        let plan = AssaultPlan::preset("TEST").expect("test preset");
        assert_eq!(
            plan.waves(),
            &[
                Wave::new(2, 1, AttackerStats::new(3, 1)),
                Wave::new(3, 1, AttackerStats::new(3, 1)),
            ]
        );
    }

    #[test]
    fn graded_plans_close_with_a_heavy_wave() {
        for name in ["easy", "normal", "hard"] {
            let plan = AssaultPlan::preset(name).expect("preset");
            let waves = plan.waves();
            assert_eq!(waves.len(), 8, "{name}: seven regular waves and a closer");
            assert_eq!(waves[0].turn, 3);
            assert_eq!(waves[6].turn, 15);
            let closing = waves[7];
            assert_eq!(closing.turn, 16);
            assert_eq!(closing.stats.damage, 2);
            assert!(waves[..7]
                .windows(2)
                .all(|pair| pair[0].count <= pair[1].count
                    && pair[0].stats.armor <= pair[1].stats.armor));
        }
    }

    #[test]
    fn harder_presets_send_more_attackers() {
        let totals: Vec<u64> = ["easy", "normal", "hard"]
            .into_iter()
            .map(|name| AssaultPlan::preset(name).expect("preset").attacker_total())
            .collect();
        assert!(totals[0] < totals[1] && totals[1] < totals[2]);
    }

    #[test]
    fn unknown_preset_is_rejected() {
        assert_eq!(AssaultPlan::preset("nightmare"), None);
        for name in AssaultPlan::PRESETS {
            assert!(AssaultPlan::preset(name).is_some());
        }
    }
}
