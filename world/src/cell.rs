//! Board topology: cells, their slots, and hop-distance targeting.

use lane_defence_core::{AttackerId, CommandError, DefenderId, Location, Terrain};

/// Dense index of a cell inside the colony's cell storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct CellIndex(usize);

impl CellIndex {
    pub(crate) const fn new(value: usize) -> Self {
        Self(value)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// Single board location.
///
/// The cell owns its slot contents by identifier only; the insects themselves
/// live in the colony arenas and point back at the cell through a
/// [`CellIndex`].
#[derive(Clone, Debug)]
pub(crate) struct Cell {
    location: Location,
    terrain: Terrain,
    retreat: Option<CellIndex>,
    forward: Option<CellIndex>,
    defender: Option<DefenderId>,
    guard: Option<DefenderId>,
    attackers: Vec<AttackerId>,
}

impl Cell {
    pub(crate) fn new(location: Location, terrain: Terrain) -> Self {
        Self {
            location,
            terrain,
            retreat: None,
            forward: None,
            defender: None,
            guard: None,
            attackers: Vec::new(),
        }
    }

    pub(crate) const fn location(&self) -> Location {
        self.location
    }

    pub(crate) const fn terrain(&self) -> Terrain {
        self.terrain
    }

    /// Next cell toward the goal, followed by advancing attackers.
    pub(crate) const fn retreat(&self) -> Option<CellIndex> {
        self.retreat
    }

    pub(crate) const fn defender(&self) -> Option<DefenderId> {
        self.defender
    }

    pub(crate) const fn guard(&self) -> Option<DefenderId> {
        self.guard
    }

    /// Occupant that receives stings and boosts: the guard when present.
    pub(crate) fn visible_occupant(&self) -> Option<DefenderId> {
        self.guard.or(self.defender)
    }

    pub(crate) fn attackers(&self) -> &[AttackerId] {
        &self.attackers
    }

    /// Places a defender into the guard slot or the base slot.
    pub(crate) fn place_defender(
        &mut self,
        defender: DefenderId,
        is_guard: bool,
    ) -> Result<(), CommandError> {
        let slot = if is_guard {
            &mut self.guard
        } else {
            &mut self.defender
        };
        if slot.is_some() {
            return Err(CommandError::LocationOccupied);
        }
        *slot = Some(defender);
        Ok(())
    }

    /// Removes the guard if present, otherwise the base defender.
    pub(crate) fn remove_defender(&mut self) -> Option<DefenderId> {
        self.guard.take().or_else(|| self.defender.take())
    }

    /// Clears whichever slot holds `defender`.
    pub(crate) fn detach_defender(&mut self, defender: DefenderId) {
        if self.guard == Some(defender) {
            self.guard = None;
        } else if self.defender == Some(defender) {
            self.defender = None;
        }
    }

    pub(crate) fn set_retreat(&mut self, inner: CellIndex) {
        self.retreat = Some(inner);
    }

    pub(crate) fn add_attacker(&mut self, attacker: AttackerId) {
        self.attackers.push(attacker);
    }

    pub(crate) fn remove_attacker(&mut self, attacker: AttackerId) -> bool {
        match self.attackers.iter().position(|id| *id == attacker) {
            Some(position) => {
                let _ = self.attackers.remove(position);
                true
            }
            None => false,
        }
    }
}

/// Wires `outer` to retreat into `inner`, and `inner` to look forward at `outer`.
pub(crate) fn link(cells: &mut [Cell], outer: CellIndex, inner: CellIndex) {
    if let Some(cell) = cells.get_mut(outer.get()) {
        cell.set_retreat(inner);
    }
    if let Some(cell) = cells.get_mut(inner.get()) {
        cell.forward = Some(outer);
    }
}

/// Walks forward from `start` and returns the first resident attacker whose
/// hop distance lies within `min_hops..=max_hops`.
///
/// Distance zero is `start` itself. Within a cell, earlier arrivals win.
pub(crate) fn closest_attacker(
    cells: &[Cell],
    start: CellIndex,
    max_hops: u32,
    min_hops: u32,
) -> Option<AttackerId> {
    let mut current = Some(start);
    let mut hops = 0_u32;
    while let Some(index) = current {
        if hops > max_hops {
            break;
        }
        let cell = cells.get(index.get())?;
        if hops >= min_hops {
            if let Some(attacker) = cell.attackers.first() {
                return Some(*attacker);
            }
        }
        current = cell.forward;
        hops = hops.saturating_add(1);
    }
    None
}
