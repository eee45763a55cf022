//! Balance tables for grower outcomes and ranged targeting.

use lane_defence_core::{AttackerStatus, BoostKind};

/// Targeting range of an unboosted thrower, in hops.
pub(crate) const BASE_RANGE: u32 = 3;

/// Targeting range granted by the extended-range boost, in hops.
pub(crate) const EXTENDED_RANGE: u32 = 5;

/// What a ranged defender does on its turn, given its current boost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RangedProfile {
    /// Hit the closest attacker within `max_hops`, then inflict `effect`.
    Single {
        max_hops: u32,
        effect: Option<AttackerStatus>,
    },
    /// Sweep the thrower's own cell and self-destruct.
    Area,
}

pub(crate) const fn ranged_profile(boost: Option<BoostKind>) -> RangedProfile {
    match boost {
        None => RangedProfile::Single {
            max_hops: BASE_RANGE,
            effect: None,
        },
        Some(BoostKind::ExtendedRange) => RangedProfile::Single {
            max_hops: EXTENDED_RANGE,
            effect: None,
        },
        Some(BoostKind::Immobilize) => RangedProfile::Single {
            max_hops: BASE_RANGE,
            effect: Some(AttackerStatus::Immobilized),
        },
        Some(BoostKind::Disable) => RangedProfile::Single {
            max_hops: BASE_RANGE,
            effect: Some(AttackerStatus::Disabled),
        },
        Some(BoostKind::AreaDestroy) => RangedProfile::Area,
    }
}

/// Result of a grower's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Harvest {
    Food(u32),
    Boost(BoostKind),
    Nothing,
}

/// Cumulative upper bounds of each outcome over a `[0, 1)` sample.
const HARVEST_TABLE: [(f64, Harvest); 5] = [
    (0.60, Harvest::Food(1)),
    (0.70, Harvest::Boost(BoostKind::ExtendedRange)),
    (0.80, Harvest::Boost(BoostKind::Immobilize)),
    (0.90, Harvest::Boost(BoostKind::Disable)),
    (0.95, Harvest::Boost(BoostKind::AreaDestroy)),
];

pub(crate) fn harvest_for(sample: f64) -> Harvest {
    HARVEST_TABLE
        .iter()
        .find(|(bound, _)| sample < *bound)
        .map_or(Harvest::Nothing, |(_, harvest)| *harvest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harvest_table_covers_every_band() {
        assert_eq!(harvest_for(0.0), Harvest::Food(1));
        assert_eq!(harvest_for(0.5999), Harvest::Food(1));
        assert_eq!(
            harvest_for(0.60),
            Harvest::Boost(BoostKind::ExtendedRange)
        );
        assert_eq!(harvest_for(0.75), Harvest::Boost(BoostKind::Immobilize));
        assert_eq!(harvest_for(0.85), Harvest::Boost(BoostKind::Disable));
        assert_eq!(harvest_for(0.93), Harvest::Boost(BoostKind::AreaDestroy));
        assert_eq!(harvest_for(0.95), Harvest::Nothing);
        assert_eq!(harvest_for(0.999), Harvest::Nothing);
    }

    #[test]
    fn harvest_bands_match_expected_weights() {
        let samples = 10_000;
        let mut food = 0;
        let mut nothing = 0;
        for index in 0..samples {
            match harvest_for(f64::from(index) / f64::from(samples)) {
                Harvest::Food(_) => food += 1,
                Harvest::Nothing => nothing += 1,
                Harvest::Boost(_) => {}
            }
        }
        assert_eq!(food, 6_000);
        assert_eq!(nothing, 500);
    }

    #[test]
    fn ranged_profiles_follow_boost() {
        assert_eq!(
            ranged_profile(None),
            RangedProfile::Single {
                max_hops: 3,
                effect: None
            }
        );
        assert_eq!(
            ranged_profile(Some(BoostKind::ExtendedRange)),
            RangedProfile::Single {
                max_hops: 5,
                effect: None
            }
        );
        assert_eq!(
            ranged_profile(Some(BoostKind::Disable)),
            RangedProfile::Single {
                max_hops: 3,
                effect: Some(AttackerStatus::Disabled)
            }
        );
        assert_eq!(
            ranged_profile(Some(BoostKind::AreaDestroy)),
            RangedProfile::Area
        );
    }
}
