#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative colony state for Lane Defence.
//!
//! The [`Colony`] owns the board, the insect arenas, food, and the boost
//! inventory. Shell commands enter through [`apply`]; the turn driver calls the
//! three phase methods in order. Every observable change is appended to the
//! caller's event sink.

mod cell;
mod insects;
mod inventory;
mod phases;
mod tables;

use std::collections::BTreeMap;

use lane_defence_core::{
    AttackerId, AttackerStats, BoostKind, CellCoord, Command, CommandError, DefenderId,
    DefenderKind, Event, InsectId, Location, Terrain,
};

use crate::{
    cell::{Cell, CellIndex},
    insects::{ArmorOutcome, Attacker, Defender},
    inventory::BoostInventory,
};

/// Board dimensions and starting resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColonyConfig {
    food: u32,
    lanes: u32,
    steps: u32,
    hazard_period: u32,
}

impl ColonyConfig {
    /// Creates a configuration with `lanes` lanes of `steps` cells each.
    ///
    /// Every `hazard_period`-th step (counting from one at the goal side) is
    /// hazardous; zero disables hazards.
    #[must_use]
    pub const fn new(food: u32, lanes: u32, steps: u32, hazard_period: u32) -> Self {
        Self {
            food,
            lanes,
            steps,
            hazard_period,
        }
    }

    /// Terrain assigned to the provided step.
    #[must_use]
    pub const fn terrain_for(&self, step: u32) -> Terrain {
        if self.hazard_period != 0 && (step + 1) % self.hazard_period == 0 {
            Terrain::Hazardous
        } else {
            Terrain::Normal
        }
    }
}

/// Represents the authoritative colony: board, insects and resources.
#[derive(Debug)]
pub struct Colony {
    food: u32,
    lanes: u32,
    steps: u32,
    cells: Vec<Cell>,
    goal: CellIndex,
    entries: Vec<CellIndex>,
    inventory: BoostInventory,
    attackers: BTreeMap<AttackerId, Attacker>,
    defenders: BTreeMap<DefenderId, Defender>,
    next_attacker_id: u32,
    next_defender_id: u32,
}

impl Colony {
    /// Builds the board: every lane chains from its entry cell down to the shared goal.
    #[must_use]
    pub fn new(config: ColonyConfig) -> Self {
        let goal = CellIndex::new(0);
        let mut cells = vec![Cell::new(Location::Goal, Terrain::Normal)];
        let mut entries = Vec::with_capacity(usize::try_from(config.lanes).unwrap_or(0));

        for lane in 0..config.lanes {
            let mut inner: Option<CellIndex> = None;
            for step in 0..config.steps {
                let index = CellIndex::new(cells.len());
                let mut lane_cell = Cell::new(
                    Location::Lane(CellCoord::new(lane, step)),
                    config.terrain_for(step),
                );
                if inner.is_none() {
                    lane_cell.set_retreat(goal);
                }
                cells.push(lane_cell);
                if let Some(inner) = inner {
                    cell::link(&mut cells, index, inner);
                }
                inner = Some(index);
            }
            if let Some(entry) = inner {
                entries.push(entry);
            }
        }

        Self {
            food: config.food,
            lanes: config.lanes,
            steps: config.steps,
            cells,
            goal,
            entries,
            inventory: BoostInventory::starter(),
            attackers: BTreeMap::new(),
            defenders: BTreeMap::new(),
            next_attacker_id: 0,
            next_defender_id: 0,
        }
    }

    /// Places a new attacker at `location`.
    ///
    /// The spawner releases waves through this entry point; it also lets callers
    /// stage arbitrary board states.
    pub fn release_attacker(
        &mut self,
        stats: AttackerStats,
        location: Location,
        out_events: &mut Vec<Event>,
    ) -> Result<AttackerId, CommandError> {
        let index = match location {
            Location::Goal => self.goal,
            Location::Lane(coord) => self.locate(coord)?,
        };
        let id = AttackerId::new(self.next_attacker_id);
        self.next_attacker_id = self.next_attacker_id.wrapping_add(1);

        let mut attacker = Attacker::new(id, stats);
        attacker.insect.place(index);
        self.cell_mut(index).add_attacker(id);
        let _ = self.attackers.insert(id, attacker);
        out_events.push(Event::AttackerReleased {
            attacker: id,
            cell: location,
        });
        Ok(id)
    }

    fn deploy(
        &mut self,
        kind: DefenderKind,
        coord: CellCoord,
        out_events: &mut Vec<Event>,
    ) -> Result<DefenderId, CommandError> {
        let index = self.locate(coord)?;
        let cost = kind.food_cost();
        if self.food < cost {
            return Err(CommandError::InsufficientFood {
                required: cost,
                available: self.food,
            });
        }

        let id = DefenderId::new(self.next_defender_id);
        self.cell_mut(index).place_defender(id, kind.is_guard())?;
        self.next_defender_id = self.next_defender_id.wrapping_add(1);
        self.food -= cost;

        let mut defender = Defender::new(id, kind);
        defender.insect.place(index);
        let _ = self.defenders.insert(id, defender);
        out_events.push(Event::DefenderDeployed {
            defender: id,
            kind,
            cell: coord,
        });
        Ok(id)
    }

    fn remove(
        &mut self,
        coord: CellCoord,
        out_events: &mut Vec<Event>,
    ) -> Result<DefenderId, CommandError> {
        let index = self.locate(coord)?;
        let id = self
            .cell_mut(index)
            .remove_defender()
            .ok_or(CommandError::NoDefenderPresent)?;

        if let Some(mut defender) = self.defenders.remove(&id) {
            let _ = defender.insect.detach();
            if let Some(held) = defender
                .stomach
                .as_mut()
                .and_then(|stomach| stomach.held.take())
            {
                self.regurgitate(id, held, index, out_events);
            }
            out_events.push(Event::DefenderRemoved {
                defender: id,
                kind: defender.kind,
                cell: coord,
            });
        }
        Ok(id)
    }

    fn apply_boost(
        &mut self,
        boost: BoostKind,
        coord: CellCoord,
        out_events: &mut Vec<Event>,
    ) -> Result<DefenderId, CommandError> {
        let index = self.locate(coord)?;
        if self.inventory.count(boost) == 0 {
            return Err(CommandError::UnknownBoost(boost.name().to_owned()));
        }
        let id = self
            .cell(index)
            .visible_occupant()
            .ok_or(CommandError::NoDefenderPresent)?;
        let defender = self
            .defenders
            .get_mut(&id)
            .ok_or(CommandError::NoDefenderPresent)?;
        if !self.inventory.take(boost) {
            return Err(CommandError::UnknownBoost(boost.name().to_owned()));
        }
        defender.boost = Some(boost);
        out_events.push(Event::BoostApplied {
            defender: id,
            boost,
        });
        Ok(id)
    }

    /// Applies damage to an attacker. Returns `true` when the attacker expired.
    pub(crate) fn damage_attacker(
        &mut self,
        id: AttackerId,
        amount: i32,
        out_events: &mut Vec<Event>,
    ) -> bool {
        let Some(attacker) = self.attackers.get_mut(&id) else {
            return false;
        };
        match attacker.insect.reduce_armor(amount) {
            ArmorOutcome::Expired(index) => {
                let _ = self.cell_mut(index).remove_attacker(id);
                let _ = self.attackers.remove(&id);
                out_events.push(Event::Expired {
                    insect: InsectId::Attacker(id),
                });
                true
            }
            ArmorOutcome::Standing | ArmorOutcome::Detached => false,
        }
    }

    /// Applies damage to a defender. Returns `true` when the defender expired.
    ///
    /// Eaters deviate from the plain rule: surviving a hit one turn into
    /// digestion ejects the held attacker and jumps the counter to three, and
    /// dying within the first two turns of digestion ejects it before the
    /// eater leaves the board.
    pub(crate) fn damage_defender(
        &mut self,
        id: DefenderId,
        amount: i32,
        out_events: &mut Vec<Event>,
    ) -> bool {
        let Some(defender) = self.defenders.get_mut(&id) else {
            return false;
        };
        let outcome = defender.insect.reduce_armor(amount);
        let field = defender.insect.cell();

        match outcome {
            ArmorOutcome::Standing => {
                let Some(stomach) = defender.stomach.as_mut() else {
                    return false;
                };
                if stomach.counter != 1 {
                    return false;
                }
                stomach.counter = 3;
                if let (Some(held), Some(index)) = (stomach.held.take(), field) {
                    self.regurgitate(id, held, index, out_events);
                }
                false
            }
            ArmorOutcome::Expired(index) => {
                let held = defender.stomach.as_mut().and_then(|stomach| {
                    let counter = stomach.counter;
                    stomach.counter = 0;
                    stomach.held.take().map(|held| (counter, held))
                });
                if let Some((counter, held)) = held {
                    if counter <= 2 {
                        self.regurgitate(id, held, index, out_events);
                    } else {
                        out_events.push(Event::Expired {
                            insect: InsectId::Attacker(held.id),
                        });
                    }
                }
                self.cell_mut(index).detach_defender(id);
                let _ = self.defenders.remove(&id);
                out_events.push(Event::Expired {
                    insect: InsectId::Defender(id),
                });
                true
            }
            ArmorOutcome::Detached => false,
        }
    }

    fn regurgitate(
        &mut self,
        eater: DefenderId,
        mut attacker: Attacker,
        index: CellIndex,
        out_events: &mut Vec<Event>,
    ) {
        let id = attacker.id;
        attacker.insect.place(index);
        self.cell_mut(index).add_attacker(id);
        let _ = self.attackers.insert(id, attacker);
        out_events.push(Event::Regurgitated {
            eater,
            attacker: id,
        });
    }

    fn index_of(&self, coord: CellCoord) -> Option<CellIndex> {
        if coord.lane() >= self.lanes || coord.step() >= self.steps {
            return None;
        }
        let lane = usize::try_from(coord.lane()).ok()?;
        let step = usize::try_from(coord.step()).ok()?;
        let steps = usize::try_from(self.steps).ok()?;
        Some(CellIndex::new(1 + lane * steps + step))
    }

    fn locate(&self, coord: CellCoord) -> Result<CellIndex, CommandError> {
        self.index_of(coord)
            .ok_or_else(|| CommandError::IllegalLocation(coord.to_string()))
    }

    fn cell(&self, index: CellIndex) -> &Cell {
        &self.cells[index.get()]
    }

    fn cell_mut(&mut self, index: CellIndex) -> &mut Cell {
        &mut self.cells[index.get()]
    }
}

/// Applies the provided command to the colony.
///
/// Rejected commands leave the colony untouched and emit no events.
pub fn apply(
    colony: &mut Colony,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), CommandError> {
    match command {
        Command::Deploy { kind, cell } => colony.deploy(kind, cell, out_events).map(|_| ()),
        Command::Remove { cell } => colony.remove(cell, out_events).map(|_| ()),
        Command::ApplyBoost { boost, cell } => {
            colony.apply_boost(boost, cell, out_events).map(|_| ())
        }
    }
}

/// Query functions that provide read-only access to the colony state.
pub mod query {
    use super::Colony;
    use lane_defence_core::{
        AttackerId, AttackerSnapshot, BoardSnapshot, BoostKind, CellCoord, CellSnapshot,
        DefenderId, DefenderSnapshot, Location, Terrain,
    };

    /// Food currently stored by the colony.
    #[must_use]
    pub fn food(colony: &Colony) -> u32 {
        colony.food
    }

    /// Number of lanes on the board.
    #[must_use]
    pub fn lanes(colony: &Colony) -> u32 {
        colony.lanes
    }

    /// Number of cells in every lane.
    #[must_use]
    pub fn lane_length(colony: &Colony) -> u32 {
        colony.steps
    }

    /// Entry cells in lane order; the spawner releases attackers here.
    #[must_use]
    pub fn entry_cells(colony: &Colony) -> Vec<CellCoord> {
        colony
            .entries
            .iter()
            .filter_map(|index| match colony.cell(*index).location() {
                Location::Lane(coord) => Some(coord),
                Location::Goal => None,
            })
            .collect()
    }

    /// Terrain of a lane cell, if the coordinate lies on the board.
    #[must_use]
    pub fn terrain_at(colony: &Colony, coord: CellCoord) -> Option<Terrain> {
        colony
            .index_of(coord)
            .map(|index| colony.cell(index).terrain())
    }

    /// Captures a per-lane summary of every cell.
    #[must_use]
    pub fn board(colony: &Colony) -> BoardSnapshot {
        let mut lanes = Vec::with_capacity(usize::try_from(colony.lanes).unwrap_or(0));
        for lane in 0..colony.lanes {
            let row: Vec<CellSnapshot> = (0..colony.steps)
                .filter_map(|step| {
                    let coord = CellCoord::new(lane, step);
                    let cell = colony.cell(colony.index_of(coord)?);
                    let kind_of = |id: Option<DefenderId>| {
                        id.and_then(|id| colony.defenders.get(&id))
                            .map(|defender| defender.kind)
                    };
                    Some(CellSnapshot {
                        coord,
                        terrain: cell.terrain(),
                        defender: kind_of(cell.defender()),
                        guard: kind_of(cell.guard()),
                        attackers: cell.attackers().len(),
                    })
                })
                .collect();
            lanes.push(row);
        }
        BoardSnapshot::new(lanes, goal_attackers(colony))
    }

    /// Number of attackers that reached the goal cell.
    #[must_use]
    pub fn goal_attackers(colony: &Colony) -> usize {
        colony.cell(colony.goal).attackers().len()
    }

    /// Attackers alive anywhere: on the board or held by an eater.
    #[must_use]
    pub fn attacker_count(colony: &Colony) -> usize {
        let held: usize = colony
            .defenders
            .values()
            .map(|defender| defender.held_count())
            .sum();
        colony.attackers.len() + held
    }

    /// Snapshots of the attackers resident at `location`, in arrival order.
    #[must_use]
    pub fn attackers_at(colony: &Colony, location: Location) -> Vec<AttackerSnapshot> {
        let index = match location {
            Location::Goal => Some(colony.goal),
            Location::Lane(coord) => colony.index_of(coord),
        };
        let Some(index) = index else {
            return Vec::new();
        };
        colony
            .cell(index)
            .attackers()
            .iter()
            .filter_map(|id| colony.attackers.get(id))
            .map(|attacker| attacker.snapshot())
            .collect()
    }

    /// Current location of an attacker on the board.
    ///
    /// Attackers held by an eater or already expired have no location.
    #[must_use]
    pub fn attacker_location(colony: &Colony, id: AttackerId) -> Option<Location> {
        let index = colony.attackers.get(&id)?.insect.cell()?;
        Some(colony.cell(index).location())
    }

    /// Defender occupying the base slot of a cell.
    #[must_use]
    pub fn defender_at(colony: &Colony, coord: CellCoord) -> Option<DefenderSnapshot> {
        let id = colony.cell(colony.index_of(coord)?).defender()?;
        colony.defenders.get(&id).map(|defender| defender.snapshot())
    }

    /// Defender occupying the guard slot of a cell.
    #[must_use]
    pub fn guard_at(colony: &Colony, coord: CellCoord) -> Option<DefenderSnapshot> {
        let id = colony.cell(colony.index_of(coord)?).guard()?;
        colony.defenders.get(&id).map(|defender| defender.snapshot())
    }

    /// Inventory count for a boost.
    #[must_use]
    pub fn boost_count(colony: &Colony, boost: BoostKind) -> u32 {
        colony.inventory.count(boost)
    }

    /// Boosts with a positive inventory count.
    #[must_use]
    pub fn available_boosts(colony: &Colony) -> Vec<BoostKind> {
        colony.inventory.available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::{AttackerStatus, ScriptedRandom};

    fn single_lane(food: u32, steps: u32) -> Colony {
        Colony::new(ColonyConfig::new(food, 1, steps, 0))
    }

    fn deploy(colony: &mut Colony, kind: DefenderKind, step: u32) -> DefenderId {
        let mut events = Vec::new();
        colony
            .deploy(kind, CellCoord::new(0, step), &mut events)
            .expect("deploy")
    }

    fn release(colony: &mut Colony, step: u32, armor: i32) -> AttackerId {
        let mut events = Vec::new();
        colony
            .release_attacker(
                AttackerStats::new(armor, 1),
                Location::Lane(CellCoord::new(0, step)),
                &mut events,
            )
            .expect("release")
    }

    #[test]
    fn lanes_share_the_goal_and_end_at_entries() {
        let colony = Colony::new(ColonyConfig::new(0, 3, 4, 0));
        assert_eq!(colony.cells.len(), 13);
        assert_eq!(
            query::entry_cells(&colony),
            vec![
                CellCoord::new(0, 3),
                CellCoord::new(1, 3),
                CellCoord::new(2, 3)
            ]
        );
        for lane in 0..3 {
            let first = colony
                .index_of(CellCoord::new(lane, 0))
                .expect("first step");
            assert_eq!(colony.cell(first).retreat(), Some(colony.goal));
        }
    }

    #[test]
    fn hazard_period_marks_every_nth_step() {
        let colony = Colony::new(ColonyConfig::new(0, 1, 6, 3));
        let hazards: Vec<u32> = (0..6)
            .filter(|step| {
                query::terrain_at(&colony, CellCoord::new(0, *step)) == Some(Terrain::Hazardous)
            })
            .collect();
        assert_eq!(hazards, vec![2, 5]);
    }

    #[test]
    fn deploy_rejects_out_of_range_coordinates() {
        let mut colony = single_lane(10, 3);
        let mut events = Vec::new();
        let result = apply(
            &mut colony,
            Command::Deploy {
                kind: DefenderKind::Thrower,
                cell: CellCoord::new(1, 0),
            },
            &mut events,
        );
        assert!(matches!(result, Err(CommandError::IllegalLocation(_))));
        assert_eq!(query::food(&colony), 10);
        assert!(events.is_empty());
    }

    #[test]
    fn attacker_stings_the_guard_before_the_shielded_defender() {
        let mut colony = single_lane(20, 2);
        let thrower = deploy(&mut colony, DefenderKind::Thrower, 0);
        let guard = deploy(&mut colony, DefenderKind::Guard, 0);
        let _ = release(&mut colony, 0, 5);

        let mut events = Vec::new();
        colony.attackers_act(&mut events);

        assert_eq!(colony.defenders[&guard].insect.armor(), 1);
        assert_eq!(colony.defenders[&thrower].insect.armor(), 1);
        assert!(events.contains(&Event::Stung {
            attacker: AttackerId::new(0),
            defender: guard,
            damage: 1,
        }));
    }

    #[test]
    fn removing_guard_leaves_shielded_defender() {
        let mut colony = single_lane(20, 2);
        let thrower = deploy(&mut colony, DefenderKind::Thrower, 1);
        let guard = deploy(&mut colony, DefenderKind::Guard, 1);

        let mut events = Vec::new();
        let removed = colony
            .remove(CellCoord::new(0, 1), &mut events)
            .expect("remove");
        assert_eq!(removed, guard);
        let base = query::defender_at(&colony, CellCoord::new(0, 1)).expect("thrower stays");
        assert_eq!(base.id, thrower);
        assert_eq!(base.armor, DefenderKind::Thrower.armor());
    }

    #[test]
    fn guard_hands_its_turn_to_the_shielded_thrower() {
        let mut colony = single_lane(20, 3);
        let _ = deploy(&mut colony, DefenderKind::Thrower, 0);
        let _ = deploy(&mut colony, DefenderKind::Guard, 0);
        let attacker = release(&mut colony, 2, 5);

        let mut random = ScriptedRandom::new(vec![0.99]);
        let mut events = Vec::new();
        colony.defenders_act(&mut random, &mut events);

        assert_eq!(colony.attackers[&attacker].insect.armor(), 4);
        let throws = events
            .iter()
            .filter(|event| matches!(event, Event::Thrown { .. }))
            .count();
        assert_eq!(throws, 1, "the shielded thrower acts exactly once");
    }

    #[test]
    fn eater_digests_four_cycles_after_capture() {
        let mut colony = single_lane(20, 2);
        let eater = deploy(&mut colony, DefenderKind::Eater, 1);
        let attacker = release(&mut colony, 1, 10);
        let mut random = ScriptedRandom::new(Vec::new());
        let mut events = Vec::new();

        colony.defenders_act(&mut random, &mut events);
        assert!(events.contains(&Event::Captured { eater, attacker }));
        assert_eq!(query::attacker_count(&colony), 1, "held attackers still count");

        for expected in [2, 3, 4] {
            colony.defenders_act(&mut random, &mut events);
            assert_eq!(colony.defenders[&eater].snapshot().digestion, expected);
            assert!(!events.contains(&Event::Digested { eater, attacker }));
        }

        colony.defenders_act(&mut random, &mut events);
        assert!(events.contains(&Event::Digested { eater, attacker }));
        let snapshot = colony.defenders[&eater].snapshot();
        assert_eq!(snapshot.digestion, 0);
        assert_eq!(snapshot.held, None);
        assert_eq!(query::attacker_count(&colony), 0);
    }

    #[test]
    fn surviving_hit_during_first_digestion_turn_regurgitates() {
        let mut colony = single_lane(20, 2);
        let eater = deploy(&mut colony, DefenderKind::Eater, 1);
        let attacker = release(&mut colony, 1, 10);
        let mut random = ScriptedRandom::new(Vec::new());
        let mut events = Vec::new();
        colony.defenders_act(&mut random, &mut events);

        let field = colony.index_of(CellCoord::new(0, 1)).expect("cell");
        let mut sturdy = insects::Insect::new(5);
        sturdy.place(field);
        colony.defenders.get_mut(&eater).expect("eater").insect = sturdy;

        assert!(!colony.damage_defender(eater, 1, &mut events));
        assert!(events.contains(&Event::Regurgitated { eater, attacker }));
        assert_eq!(colony.defenders[&eater].snapshot().digestion, 3);
        assert_eq!(
            query::attacker_location(&colony, attacker),
            Some(Location::Lane(CellCoord::new(0, 1)))
        );
    }

    #[test]
    fn lethal_hit_early_in_digestion_returns_the_attacker() {
        let mut colony = single_lane(20, 2);
        let eater = deploy(&mut colony, DefenderKind::Eater, 1);
        let attacker = release(&mut colony, 1, 10);
        let mut random = ScriptedRandom::new(Vec::new());
        let mut events = Vec::new();
        colony.defenders_act(&mut random, &mut events);
        colony.defenders_act(&mut random, &mut events);

        assert!(colony.damage_defender(eater, 1, &mut events));
        let regurgitated = events
            .iter()
            .position(|event| *event == Event::Regurgitated { eater, attacker })
            .expect("regurgitated");
        let expired = events
            .iter()
            .position(|event| {
                *event
                    == Event::Expired {
                        insect: InsectId::Defender(eater),
                    }
            })
            .expect("expired");
        assert!(regurgitated < expired);
        assert_eq!(query::attacker_count(&colony), 1);
        assert!(query::defender_at(&colony, CellCoord::new(0, 1)).is_none());
    }

    #[test]
    fn lethal_hit_late_in_digestion_destroys_the_attacker() {
        let mut colony = single_lane(20, 2);
        let eater = deploy(&mut colony, DefenderKind::Eater, 1);
        let _ = release(&mut colony, 1, 10);
        let mut random = ScriptedRandom::new(Vec::new());
        let mut events = Vec::new();
        for _ in 0..3 {
            colony.defenders_act(&mut random, &mut events);
        }

        assert!(colony.damage_defender(eater, 1, &mut events));
        assert_eq!(query::attacker_count(&colony), 0);
    }

    #[test]
    fn immobilize_boost_pins_the_target_for_one_action() {
        let mut colony = single_lane(20, 3);
        let _ = deploy(&mut colony, DefenderKind::Thrower, 0);
        let attacker = release(&mut colony, 2, 5);
        let mut events = Vec::new();
        apply(
            &mut colony,
            Command::ApplyBoost {
                boost: BoostKind::Immobilize,
                cell: CellCoord::new(0, 0),
            },
            &mut events,
        )
        .expect("boost");

        let mut random = ScriptedRandom::new(Vec::new());
        colony.defenders_act(&mut random, &mut events);
        assert_eq!(
            colony.attackers[&attacker].status,
            AttackerStatus::Immobilized
        );
        assert_eq!(
            query::defender_at(&colony, CellCoord::new(0, 0)).map(|d| d.boost),
            Some(None),
            "boosts are single use"
        );

        colony.attackers_act(&mut events);
        assert_eq!(
            query::attacker_location(&colony, attacker),
            Some(Location::Lane(CellCoord::new(0, 2)))
        );
        assert_eq!(colony.attackers[&attacker].status, AttackerStatus::Clear);

        colony.attackers_act(&mut events);
        assert_eq!(
            query::attacker_location(&colony, attacker),
            Some(Location::Lane(CellCoord::new(0, 1)))
        );
    }

    #[test]
    fn disabled_attacker_walks_past_the_defender() {
        let mut colony = single_lane(20, 3);
        let thrower = deploy(&mut colony, DefenderKind::Thrower, 1);
        let attacker = release(&mut colony, 1, 5);
        colony
            .attackers
            .get_mut(&attacker)
            .expect("attacker")
            .status = AttackerStatus::Disabled;

        let mut events = Vec::new();
        colony.attackers_act(&mut events);
        assert_eq!(colony.defenders[&thrower].insect.armor(), 1);
        assert_eq!(
            query::attacker_location(&colony, attacker),
            Some(Location::Lane(CellCoord::new(0, 0)))
        );
    }

    #[test]
    fn extended_range_reaches_five_hops() {
        let mut colony = single_lane(20, 6);
        let _ = deploy(&mut colony, DefenderKind::Thrower, 0);
        let attacker = release(&mut colony, 5, 5);
        let mut random = ScriptedRandom::new(Vec::new());
        let mut events = Vec::new();

        colony.defenders_act(&mut random, &mut events);
        assert_eq!(colony.attackers[&attacker].insect.armor(), 5, "out of base range");

        colony.inventory.credit(BoostKind::ExtendedRange);
        apply(
            &mut colony,
            Command::ApplyBoost {
                boost: BoostKind::ExtendedRange,
                cell: CellCoord::new(0, 0),
            },
            &mut events,
        )
        .expect("boost");
        colony.defenders_act(&mut random, &mut events);
        assert_eq!(colony.attackers[&attacker].insect.armor(), 4);
    }

    #[test]
    fn area_destroy_clears_the_cell_and_the_thrower() {
        let mut colony = single_lane(20, 3);
        let thrower = deploy(&mut colony, DefenderKind::Thrower, 1);
        let _ = release(&mut colony, 1, 3);
        let _ = release(&mut colony, 1, 7);
        let distant = release(&mut colony, 2, 3);
        colony.inventory.credit(BoostKind::AreaDestroy);
        let mut events = Vec::new();
        apply(
            &mut colony,
            Command::ApplyBoost {
                boost: BoostKind::AreaDestroy,
                cell: CellCoord::new(0, 1),
            },
            &mut events,
        )
        .expect("boost");

        let mut random = ScriptedRandom::new(Vec::new());
        colony.defenders_act(&mut random, &mut events);

        assert!(query::attackers_at(&colony, Location::Lane(CellCoord::new(0, 1))).is_empty());
        assert!(!colony.defenders.contains_key(&thrower));
        assert!(colony.attackers.contains_key(&distant));
    }

    #[test]
    fn area_destroy_keeps_hitting_until_the_cell_is_clear() {
        let mut colony = single_lane(20, 2);
        let thrower = deploy(&mut colony, DefenderKind::Thrower, 1);
        let heavy = release(&mut colony, 1, 150);
        colony.inventory.credit(BoostKind::AreaDestroy);
        let mut events = Vec::new();
        apply(
            &mut colony,
            Command::ApplyBoost {
                boost: BoostKind::AreaDestroy,
                cell: CellCoord::new(0, 1),
            },
            &mut events,
        )
        .expect("boost");

        colony.defenders_act(&mut ScriptedRandom::new(Vec::new()), &mut events);

        assert!(!colony.attackers.contains_key(&heavy));
        assert!(!colony.defenders.contains_key(&thrower));
        assert!(events.contains(&Event::Expired {
            insect: InsectId::Attacker(heavy),
        }));
    }

    #[test]
    fn grower_outcomes_follow_the_sample() {
        let mut colony = single_lane(2, 2);
        let _ = deploy(&mut colony, DefenderKind::Grower, 0);
        let mut random = ScriptedRandom::new(vec![0.1, 0.92, 0.97]);
        let mut events = Vec::new();

        colony.defenders_act(&mut random, &mut events);
        assert_eq!(query::food(&colony), 1);

        colony.defenders_act(&mut random, &mut events);
        assert_eq!(query::boost_count(&colony, BoostKind::AreaDestroy), 1);

        colony.defenders_act(&mut random, &mut events);
        assert_eq!(query::food(&colony), 1);
        assert_eq!(query::boost_count(&colony, BoostKind::AreaDestroy), 1);
    }

    #[test]
    fn hazard_expels_everything_but_amphibious_throwers() {
        let mut colony = Colony::new(ColonyConfig::new(30, 1, 2, 1));
        let amphibious = deploy(&mut colony, DefenderKind::AmphibiousThrower, 0);
        let guard = deploy(&mut colony, DefenderKind::Guard, 0);
        let thrower = deploy(&mut colony, DefenderKind::Thrower, 1);

        let mut events = Vec::new();
        colony.cells_act(&mut events);

        assert!(colony.defenders.contains_key(&amphibious));
        assert!(!colony.defenders.contains_key(&guard));
        assert!(!colony.defenders.contains_key(&thrower));
        assert!(events.contains(&Event::Expelled {
            defender: guard,
            cell: CellCoord::new(0, 0),
        }));
    }

    #[test]
    fn damage_to_expired_insects_is_ignored() {
        let mut colony = single_lane(20, 2);
        let attacker = release(&mut colony, 0, 1);
        let mut events = Vec::new();
        assert!(colony.damage_attacker(attacker, 1, &mut events));
        assert!(!colony.damage_attacker(attacker, 1, &mut events));
        let expirations = events
            .iter()
            .filter(|event| matches!(event, Event::Expired { .. }))
            .count();
        assert_eq!(expirations, 1);
    }
}
