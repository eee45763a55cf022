//! Insect records stored in the colony arenas.

use lane_defence_core::{
    AttackerId, AttackerSnapshot, AttackerStats, AttackerStatus, BoostKind, DefenderId,
    DefenderKind, DefenderSnapshot,
};

use crate::cell::CellIndex;

/// Result of applying damage to an insect's armor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ArmorOutcome {
    /// Armor remains positive.
    Standing,
    /// Armor reached zero for the first time; the insect left `cell`.
    Expired(CellIndex),
    /// The insect was already off the board, so only its armor changed.
    Detached,
}

/// Armor and cell back-reference shared by attackers and defenders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Insect {
    armor: i32,
    cell: Option<CellIndex>,
}

impl Insect {
    pub(crate) const fn new(armor: i32) -> Self {
        Self { armor, cell: None }
    }

    pub(crate) const fn armor(&self) -> i32 {
        self.armor
    }

    pub(crate) const fn cell(&self) -> Option<CellIndex> {
        self.cell
    }

    pub(crate) fn place(&mut self, cell: CellIndex) {
        self.cell = Some(cell);
    }

    pub(crate) fn detach(&mut self) -> Option<CellIndex> {
        self.cell.take()
    }

    /// Decrements armor; detaches exactly once, the first time armor reaches zero.
    pub(crate) fn reduce_armor(&mut self, amount: i32) -> ArmorOutcome {
        self.armor = self.armor.saturating_sub(amount);
        if self.armor > 0 {
            return ArmorOutcome::Standing;
        }
        match self.detach() {
            Some(cell) => ArmorOutcome::Expired(cell),
            None => ArmorOutcome::Detached,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Attacker {
    pub(crate) id: AttackerId,
    pub(crate) insect: Insect,
    pub(crate) damage: i32,
    pub(crate) status: AttackerStatus,
}

impl Attacker {
    pub(crate) fn new(id: AttackerId, stats: AttackerStats) -> Self {
        Self {
            id,
            insect: Insect::new(stats.armor),
            damage: stats.damage,
            status: AttackerStatus::Clear,
        }
    }

    pub(crate) fn snapshot(&self) -> AttackerSnapshot {
        AttackerSnapshot {
            id: self.id,
            armor: self.insect.armor(),
            damage: self.damage,
            status: self.status,
        }
    }
}

/// Digestion counter plus the private holding cell of an eater.
#[derive(Clone, Debug, Default)]
pub(crate) struct Stomach {
    pub(crate) counter: u8,
    pub(crate) held: Option<Attacker>,
}

/// Counter value at which the held attacker is digested.
pub(crate) const DIGESTION_TURNS: u8 = 4;

#[derive(Clone, Debug)]
pub(crate) struct Defender {
    pub(crate) id: DefenderId,
    pub(crate) kind: DefenderKind,
    pub(crate) insect: Insect,
    pub(crate) boost: Option<BoostKind>,
    pub(crate) stomach: Option<Stomach>,
}

impl Defender {
    pub(crate) fn new(id: DefenderId, kind: DefenderKind) -> Self {
        let stomach = match kind {
            DefenderKind::Eater => Some(Stomach::default()),
            _ => None,
        };
        Self {
            id,
            kind,
            insect: Insect::new(kind.armor()),
            boost: None,
            stomach,
        }
    }

    pub(crate) fn snapshot(&self) -> DefenderSnapshot {
        let (digestion, held) = self.stomach.as_ref().map_or((0, None), |stomach| {
            (
                stomach.counter,
                stomach.held.as_ref().map(|attacker| attacker.id),
            )
        });
        DefenderSnapshot {
            id: self.id,
            kind: self.kind,
            armor: self.insect.armor(),
            boost: self.boost,
            digestion,
            held,
        }
    }

    /// Attackers held in the eater's private cell.
    pub(crate) fn held_count(&self) -> usize {
        self.stomach
            .as_ref()
            .map_or(0, |stomach| usize::from(stomach.held.is_some()))
    }
}
