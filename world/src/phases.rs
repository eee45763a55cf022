//! Per-turn actor phases of the colony.
//!
//! Each phase snapshots its actors before mutating anything so that insects
//! added or removed mid-phase are neither double-acted nor skipped.

use lane_defence_core::{
    AttackerId, AttackerStatus, CellCoord, DefenderId, DefenderKind, Event, InsectId, Location,
    RandomSource, AREA_DESTROY_DAMAGE, THROWER_DAMAGE,
};

use crate::{
    cell::{self, CellIndex},
    insects::DIGESTION_TURNS,
    tables::{self, Harvest, RangedProfile},
    Colony,
};

impl Colony {
    /// Runs one action for every defender on the board.
    ///
    /// A guard hands its turn to the defender it shields; the guard itself does nothing.
    pub fn defenders_act(&mut self, random: &mut dyn RandomSource, out_events: &mut Vec<Event>) {
        let actors: Vec<DefenderId> = self
            .cells
            .iter()
            .filter_map(|cell| {
                let occupant = cell.visible_occupant()?;
                if cell.guard() == Some(occupant) {
                    cell.defender()
                } else {
                    Some(occupant)
                }
            })
            .collect();

        for id in actors {
            let Some(defender) = self.defenders.get(&id) else {
                continue;
            };
            let kind = defender.kind;
            let Some(index) = defender.insect.cell() else {
                continue;
            };
            match kind {
                kind if kind.is_ranged() => self.throw(id, index, out_events),
                DefenderKind::Grower => self.grow(id, random, out_events),
                DefenderKind::Eater => self.eat(id, index, out_events),
                _ => {}
            }
        }
    }

    fn grow(&mut self, id: DefenderId, random: &mut dyn RandomSource, out_events: &mut Vec<Event>) {
        match tables::harvest_for(random.next_unit()) {
            Harvest::Food(amount) => {
                self.food = self.food.saturating_add(amount);
                out_events.push(Event::FoodHarvested {
                    grower: id,
                    amount,
                });
            }
            Harvest::Boost(boost) => {
                self.inventory.credit(boost);
                out_events.push(Event::BoostFound { grower: id, boost });
            }
            Harvest::Nothing => {}
        }
    }

    fn throw(&mut self, id: DefenderId, index: CellIndex, out_events: &mut Vec<Event>) {
        let boost = self.defenders.get(&id).and_then(|defender| defender.boost);
        match tables::ranged_profile(boost) {
            RangedProfile::Single { max_hops, effect } => {
                let Some(target) = cell::closest_attacker(&self.cells, index, max_hops, 0) else {
                    return;
                };
                out_events.push(Event::Thrown {
                    defender: id,
                    attacker: target,
                    damage: THROWER_DAMAGE,
                });
                let expired = self.damage_attacker(target, THROWER_DAMAGE, out_events);
                if let (Some(status), false) = (effect, expired) {
                    if let Some(attacker) = self.attackers.get_mut(&target) {
                        attacker.status = status;
                        out_events.push(Event::StatusInflicted {
                            attacker: target,
                            status,
                        });
                    }
                }
                if let Some(defender) = self.defenders.get_mut(&id) {
                    defender.boost = None;
                }
            }
            RangedProfile::Area => {
                out_events.push(Event::AreaDestroyed {
                    defender: id,
                    cell: self.cell(index).location(),
                });
                while let Some(target) = cell::closest_attacker(&self.cells, index, 0, 0) {
                    let _ = self.damage_attacker(target, AREA_DESTROY_DAMAGE, out_events);
                }
                let _ = self.damage_defender(id, AREA_DESTROY_DAMAGE, out_events);
            }
        }
    }

    fn eat(&mut self, id: DefenderId, index: CellIndex, out_events: &mut Vec<Event>) {
        let Some(counter) = self
            .defenders
            .get(&id)
            .and_then(|defender| defender.stomach.as_ref())
            .map(|stomach| stomach.counter)
        else {
            return;
        };

        if counter == 0 {
            let Some(target) = cell::closest_attacker(&self.cells, index, 0, 0) else {
                return;
            };
            let _ = self.cell_mut(index).remove_attacker(target);
            let Some(mut attacker) = self.attackers.remove(&target) else {
                return;
            };
            let _ = attacker.insect.detach();
            if let Some(stomach) = self
                .defenders
                .get_mut(&id)
                .and_then(|defender| defender.stomach.as_mut())
            {
                stomach.held = Some(attacker);
                stomach.counter = 1;
            }
            out_events.push(Event::Captured {
                eater: id,
                attacker: target,
            });
            return;
        }

        let Some(stomach) = self
            .defenders
            .get_mut(&id)
            .and_then(|defender| defender.stomach.as_mut())
        else {
            return;
        };
        if counter < DIGESTION_TURNS {
            stomach.counter = counter + 1;
            return;
        }
        stomach.counter = 0;
        if let Some(held) = stomach.held.take() {
            out_events.push(Event::Digested {
                eater: id,
                attacker: held.id,
            });
            out_events.push(Event::Expired {
                insect: InsectId::Attacker(held.id),
            });
        }
    }

    /// Runs one action for every attacker on the board.
    ///
    /// An attacker stings the cell's visible occupant unless disabled, otherwise it
    /// advances toward the goal unless immobilized. Status clears afterwards.
    pub fn attackers_act(&mut self, out_events: &mut Vec<Event>) {
        let actors: Vec<AttackerId> = self.attackers.keys().copied().collect();

        for id in actors {
            let Some(attacker) = self.attackers.get(&id) else {
                continue;
            };
            let Some(index) = attacker.insect.cell() else {
                continue;
            };
            let status = attacker.status;
            let damage = attacker.damage;

            match self.cell(index).visible_occupant() {
                Some(defender) if status != AttackerStatus::Disabled => {
                    out_events.push(Event::Stung {
                        attacker: id,
                        defender,
                        damage,
                    });
                    let _ = self.damage_defender(defender, damage, out_events);
                }
                _ if status != AttackerStatus::Immobilized => {
                    self.advance(id, index, out_events);
                }
                _ => {}
            }

            if let Some(attacker) = self.attackers.get_mut(&id) {
                attacker.status = AttackerStatus::Clear;
            }
        }
    }

    fn advance(&mut self, id: AttackerId, from: CellIndex, out_events: &mut Vec<Event>) {
        let Some(to) = self.cell(from).retreat() else {
            return;
        };
        let _ = self.cell_mut(from).remove_attacker(id);
        self.cell_mut(to).add_attacker(id);
        if let Some(attacker) = self.attackers.get_mut(&id) {
            attacker.insect.place(to);
        }
        out_events.push(Event::AttackerAdvanced {
            attacker: id,
            from: self.cell(from).location(),
            to: self.cell(to).location(),
        });
    }

    /// Applies the hazard rule to every hazardous cell.
    ///
    /// Guards are always expelled; the base defender survives only when amphibious.
    pub fn cells_act(&mut self, out_events: &mut Vec<Event>) {
        let hazardous: Vec<(CellCoord, Option<DefenderId>, Option<DefenderId>)> = self
            .cells
            .iter()
            .filter(|cell| cell.terrain().is_hazardous())
            .filter_map(|cell| match cell.location() {
                Location::Lane(coord) => Some((coord, cell.guard(), cell.defender())),
                Location::Goal => None,
            })
            .collect();

        for (coord, guard, base) in hazardous {
            if let Some(guard) = guard {
                self.expel(guard, coord, out_events);
            }
            let exposed = base.filter(|id| {
                self.defenders
                    .get(id)
                    .is_some_and(|defender| !defender.kind.is_amphibious())
            });
            if let Some(base) = exposed {
                self.expel(base, coord, out_events);
            }
        }
    }

    fn expel(&mut self, id: DefenderId, coord: CellCoord, out_events: &mut Vec<Event>) {
        let Some(armor) = self
            .defenders
            .get(&id)
            .map(|defender| defender.insect.armor())
        else {
            return;
        };
        out_events.push(Event::Expelled {
            defender: id,
            cell: coord,
        });
        let _ = self.damage_defender(id, armor.max(1), out_events);
    }
}
