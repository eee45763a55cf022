//! Colony-wide boost inventory.

use std::collections::BTreeMap;

use lane_defence_core::BoostKind;

/// Non-negative boost counts keyed by kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BoostInventory {
    counts: BTreeMap<BoostKind, u32>,
}

impl BoostInventory {
    /// Starter set: one of each boost except area-destroy.
    pub(crate) fn starter() -> Self {
        let counts = BoostKind::ALL
            .into_iter()
            .map(|boost| {
                let count = match boost {
                    BoostKind::AreaDestroy => 0,
                    _ => 1,
                };
                (boost, count)
            })
            .collect();
        Self { counts }
    }

    pub(crate) fn count(&self, boost: BoostKind) -> u32 {
        self.counts.get(&boost).copied().unwrap_or(0)
    }

    pub(crate) fn credit(&mut self, boost: BoostKind) {
        let count = self.counts.entry(boost).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Removes one unit, refusing when none remain.
    pub(crate) fn take(&mut self, boost: BoostKind) -> bool {
        match self.counts.get_mut(&boost) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Boosts with a positive count, in inventory order.
    pub(crate) fn available(&self) -> Vec<BoostKind> {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(boost, _)| *boost)
            .collect()
    }
}
