#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Defence engine.
//!
//! This crate defines the message surface that connects the interactive
//! shell, the authoritative colony, and the wave spawner. The shell submits
//! [`Command`] values describing desired mutations, the colony executes those
//! commands through its `apply` entry point, and every observable change is
//! reported as an [`Event`] pushed into a caller-provided sink. Rejected
//! commands surface as [`CommandError`] values and never mutate state.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Damage dealt by a ranged defender on every successful throw.
pub const THROWER_DAMAGE: i32 = 1;

/// Damage dealt by the area-destroy boost to every attacker and to the thrower itself.
pub const AREA_DESTROY_DAMAGE: i32 = 100;

/// Unique identifier assigned to an attacker when it enters the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttackerId(u32);

impl AttackerId {
    /// Creates a new attacker identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a defender when it is deployed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DefenderId(u32);

impl DefenderId {
    /// Creates a new defender identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Either side of the board, used by events that apply to any insect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsectId {
    /// An attacker advancing toward the goal.
    Attacker(AttackerId),
    /// A stationary defender.
    Defender(DefenderId),
}

/// Addressable board cell expressed as a lane index and a step along that lane.
///
/// Step zero borders the goal cell; the highest step is the lane's entry cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    lane: u32,
    step: u32,
}

impl CellCoord {
    /// Creates a new board coordinate.
    #[must_use]
    pub const fn new(lane: u32, step: u32) -> Self {
        Self { lane, step }
    }

    /// Zero-based lane index of the cell.
    #[must_use]
    pub const fn lane(&self) -> u32 {
        self.lane
    }

    /// Zero-based step index of the cell within its lane.
    #[must_use]
    pub const fn step(&self) -> u32 {
        self.step
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lane, self.step)
    }
}

/// Any location an attacker can occupy: a lane cell or the shared goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// A cell inside one of the lanes.
    Lane(CellCoord),
    /// The goal cell shared by every lane.
    Goal,
}

/// Terrain applied to a lane cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    /// Regular ground that tolerates every defender.
    Normal,
    /// Ground that expels every non-amphibious defender at the end of a turn.
    Hazardous,
}

impl Terrain {
    /// Reports whether the terrain expels non-amphibious defenders.
    #[must_use]
    pub const fn is_hazardous(self) -> bool {
        matches!(self, Self::Hazardous)
    }
}

/// Closed set of defenders that can be deployed onto the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DefenderKind {
    /// Produces food or finds boosts each turn.
    Grower,
    /// Throws at the closest attacker within range.
    Thrower,
    /// Captures an attacker in its own cell and digests it over several turns.
    Eater,
    /// Thrower that survives on hazardous terrain.
    AmphibiousThrower,
    /// Occupies the guard slot and absorbs stings aimed at its cell.
    Guard,
}

impl DefenderKind {
    /// Every deployable defender kind in display order.
    pub const ALL: [Self; 5] = [
        Self::Grower,
        Self::Thrower,
        Self::Eater,
        Self::AmphibiousThrower,
        Self::Guard,
    ];

    /// Food debited from the colony when the defender is deployed.
    #[must_use]
    pub const fn food_cost(self) -> u32 {
        match self {
            Self::Grower => 2,
            Self::Thrower | Self::Eater | Self::Guard => 4,
            Self::AmphibiousThrower => 6,
        }
    }

    /// Armor the defender starts with.
    #[must_use]
    pub const fn armor(self) -> i32 {
        match self {
            Self::Guard => 2,
            Self::Grower | Self::Thrower | Self::Eater | Self::AmphibiousThrower => 1,
        }
    }

    /// Reports whether the defender tolerates hazardous terrain.
    #[must_use]
    pub const fn is_amphibious(self) -> bool {
        matches!(self, Self::AmphibiousThrower)
    }

    /// Reports whether the defender occupies the guard slot instead of the base slot.
    #[must_use]
    pub const fn is_guard(self) -> bool {
        matches!(self, Self::Guard)
    }

    /// Reports whether the defender uses the ranged targeting table.
    #[must_use]
    pub const fn is_ranged(self) -> bool {
        matches!(self, Self::Thrower | Self::AmphibiousThrower)
    }

    /// Canonical lowercase name accepted by [`DefenderKind::from_name`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grower => "grower",
            Self::Thrower => "thrower",
            Self::Eater => "eater",
            Self::AmphibiousThrower => "amphibiousthrower",
            Self::Guard => "guard",
        }
    }

    /// Resolves a defender kind from user input, ignoring ASCII case.
    ///
    /// `amphibious-thrower` is accepted as an alias for the amphibious variant.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        if trimmed.eq_ignore_ascii_case("amphibious-thrower") {
            return Some(Self::AmphibiousThrower);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
    }
}

/// Single-use consumables that modify a defender's next action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BoostKind {
    /// Extends ranged targeting to five hops.
    ExtendedRange,
    /// Prevents the struck attacker from advancing on its next action.
    Immobilize,
    /// Prevents the struck attacker from stinging on its next action.
    Disable,
    /// Destroys every attacker sharing the thrower's cell, along with the thrower.
    AreaDestroy,
}

impl BoostKind {
    /// Every boost kind in inventory order.
    pub const ALL: [Self; 4] = [
        Self::ExtendedRange,
        Self::Immobilize,
        Self::Disable,
        Self::AreaDestroy,
    ];

    /// Canonical name used by the inventory and accepted by [`BoostKind::from_name`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ExtendedRange => "extended-range",
            Self::Immobilize => "immobilize",
            Self::Disable => "disable",
            Self::AreaDestroy => "area-destroy",
        }
    }

    /// Resolves a boost from user input, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        Self::ALL
            .into_iter()
            .find(|boost| boost.name().eq_ignore_ascii_case(trimmed))
    }
}

/// Transient status inflicted on an attacker by a boosted throw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackerStatus {
    /// No status applied.
    #[default]
    Clear,
    /// The attacker may sting but cannot advance.
    Immobilized,
    /// The attacker cannot sting.
    Disabled,
}

/// Armor and sting damage shared by every attacker in a scheduled wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackerStats {
    /// Armor the attacker enters the board with.
    pub armor: i32,
    /// Damage applied to a defender on every sting.
    pub damage: i32,
}

impl AttackerStats {
    /// Creates a new stat block.
    #[must_use]
    pub const fn new(armor: i32, damage: i32) -> Self {
        Self { armor, damage }
    }
}

/// Commands that express all permissible colony mutations issued by the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Requests deployment of a defender onto a lane cell.
    Deploy {
        /// Kind of defender to deploy.
        kind: DefenderKind,
        /// Cell that receives the defender.
        cell: CellCoord,
    },
    /// Requests removal of the visible defender from a lane cell.
    Remove {
        /// Cell whose occupant should be removed.
        cell: CellCoord,
    },
    /// Requests that a boost from the inventory be assigned to a defender.
    ApplyBoost {
        /// Boost drawn from the colony inventory.
        boost: BoostKind,
        /// Cell whose visible occupant receives the boost.
        cell: CellCoord,
    },
}

/// Events reported by the colony while processing commands and turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A defender was deployed onto the board.
    DefenderDeployed {
        /// Identifier allocated to the defender.
        defender: DefenderId,
        /// Kind of defender deployed.
        kind: DefenderKind,
        /// Cell receiving the defender.
        cell: CellCoord,
    },
    /// A defender was removed by command.
    DefenderRemoved {
        /// Identifier of the removed defender.
        defender: DefenderId,
        /// Kind of defender removed.
        kind: DefenderKind,
        /// Cell the defender occupied.
        cell: CellCoord,
    },
    /// A boost was drawn from the inventory and assigned to a defender.
    BoostApplied {
        /// Defender receiving the boost.
        defender: DefenderId,
        /// Boost that was assigned.
        boost: BoostKind,
    },
    /// The spawner released an attacker into an entry cell.
    AttackerReleased {
        /// Identifier allocated to the attacker.
        attacker: AttackerId,
        /// Cell receiving the attacker.
        cell: Location,
    },
    /// An attacker moved one hop toward the goal.
    AttackerAdvanced {
        /// Identifier of the attacker that moved.
        attacker: AttackerId,
        /// Location before the move.
        from: Location,
        /// Location after the move.
        to: Location,
    },
    /// An attacker stung the visible occupant of its cell.
    Stung {
        /// Attacker delivering the sting.
        attacker: AttackerId,
        /// Defender receiving the sting.
        defender: DefenderId,
        /// Damage applied.
        damage: i32,
    },
    /// A ranged defender hit an attacker.
    Thrown {
        /// Defender throwing.
        defender: DefenderId,
        /// Attacker that was hit.
        attacker: AttackerId,
        /// Damage applied.
        damage: i32,
    },
    /// A boosted throw inflicted a status on its target.
    StatusInflicted {
        /// Attacker receiving the status.
        attacker: AttackerId,
        /// Status applied until the attacker's next action completes.
        status: AttackerStatus,
    },
    /// A thrower discharged an area-destroy boost in its own cell.
    AreaDestroyed {
        /// Defender that self-destructed.
        defender: DefenderId,
        /// Cell swept by the blast.
        cell: Location,
    },
    /// An insect ran out of armor and left the board.
    Expired {
        /// Insect that expired.
        insect: InsectId,
    },
    /// An eater swallowed an attacker from its own cell.
    Captured {
        /// Eater performing the capture.
        eater: DefenderId,
        /// Attacker moved into the eater's holding cell.
        attacker: AttackerId,
    },
    /// An eater returned its held attacker to the field.
    Regurgitated {
        /// Eater releasing the attacker.
        eater: DefenderId,
        /// Attacker returned to the eater's cell.
        attacker: AttackerId,
    },
    /// An eater finished digesting its held attacker.
    Digested {
        /// Eater completing digestion.
        eater: DefenderId,
        /// Attacker destroyed by digestion.
        attacker: AttackerId,
    },
    /// A grower added food to the colony.
    FoodHarvested {
        /// Grower that produced the food.
        grower: DefenderId,
        /// Food added.
        amount: u32,
    },
    /// A grower found a boost and credited it to the inventory.
    BoostFound {
        /// Grower that found the boost.
        grower: DefenderId,
        /// Boost credited to the inventory.
        boost: BoostKind,
    },
    /// Hazardous terrain expelled a defender at the end of a turn.
    Expelled {
        /// Defender expelled.
        defender: DefenderId,
        /// Hazardous cell the defender occupied.
        cell: CellCoord,
    },
    /// The turn counter advanced after a full turn resolved.
    TurnAdvanced {
        /// Turn counter after the increment.
        turn: u64,
    },
}

/// Reasons a command may be rejected. Rejections never mutate state.
///
/// The leading words of each message form the failure token shown to players.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The colony lacks the food required by the defender.
    #[error("insufficient resource: need {required} food, have {available}")]
    InsufficientFood {
        /// Food required by the defender kind.
        required: u32,
        /// Food available when the command was issued.
        available: u32,
    },
    /// The targeted slot already holds a defender.
    #[error("location occupied")]
    LocationOccupied,
    /// The boost name is unknown or its inventory count is zero.
    #[error("unknown boost: {0}")]
    UnknownBoost(String),
    /// The targeted cell holds no defender.
    #[error("no defender present")]
    NoDefenderPresent,
    /// The defender type name does not match any deployable kind.
    #[error("unknown type: {0}")]
    UnknownType(String),
    /// The coordinate is malformed or outside the board.
    #[error("illegal location: {0}")]
    IllegalLocation(String),
}

impl CommandError {
    /// Short failure token without contextual detail.
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match self {
            Self::InsufficientFood { .. } => "insufficient resource",
            Self::LocationOccupied => "location occupied",
            Self::UnknownBoost(_) => "unknown boost",
            Self::NoDefenderPresent => "no defender present",
            Self::UnknownType(_) => "unknown type",
            Self::IllegalLocation(_) => "illegal location",
        }
    }
}

/// Tri-state answer to the win query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No attacker remains on the board, in a holding cell, or in the spawner.
    Won,
    /// An attacker reached the goal cell.
    Lost,
    /// The game continues.
    Unresolved,
}

impl Outcome {
    /// Maps the outcome onto `Some(true)` for a win, `Some(false)` for a loss and `None` otherwise.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Won => Some(true),
            Self::Lost => Some(false),
            Self::Unresolved => None,
        }
    }
}

/// Immutable representation of a single attacker used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackerSnapshot {
    /// Identifier assigned to the attacker.
    pub id: AttackerId,
    /// Remaining armor.
    pub armor: i32,
    /// Damage per sting.
    pub damage: i32,
    /// Status carried into the attacker's next action.
    pub status: AttackerStatus,
}

/// Immutable representation of a single defender used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DefenderSnapshot {
    /// Identifier assigned to the defender.
    pub id: DefenderId,
    /// Kind of defender.
    pub kind: DefenderKind,
    /// Remaining armor.
    pub armor: i32,
    /// Boost waiting in the defender's single slot.
    pub boost: Option<BoostKind>,
    /// Digestion counter; always zero for kinds other than the eater.
    pub digestion: u8,
    /// Attacker held in the eater's private holding cell.
    pub held: Option<AttackerId>,
}

/// Summary of a single lane cell for rendering by the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSnapshot {
    /// Coordinate of the cell.
    pub coord: CellCoord,
    /// Terrain of the cell.
    pub terrain: Terrain,
    /// Kind occupying the base defender slot.
    pub defender: Option<DefenderKind>,
    /// Kind occupying the guard slot.
    pub guard: Option<DefenderKind>,
    /// Number of attackers resident in the cell.
    pub attackers: usize,
}

/// Read-only snapshot of the whole board, one row of cells per lane.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    lanes: Vec<Vec<CellSnapshot>>,
    goal_attackers: usize,
}

impl BoardSnapshot {
    /// Creates a board snapshot from per-lane rows ordered by step.
    #[must_use]
    pub fn new(lanes: Vec<Vec<CellSnapshot>>, goal_attackers: usize) -> Self {
        Self {
            lanes,
            goal_attackers,
        }
    }

    /// Rows of cells, indexed by lane then step.
    #[must_use]
    pub fn lanes(&self) -> &[Vec<CellSnapshot>] {
        &self.lanes
    }

    /// Looks up a single cell by coordinate.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&CellSnapshot> {
        let lane = usize::try_from(coord.lane()).ok()?;
        let step = usize::try_from(coord.step()).ok()?;
        self.lanes.get(lane)?.get(step)
    }

    /// Number of attackers that reached the goal cell.
    #[must_use]
    pub const fn goal_attackers(&self) -> usize {
        self.goal_attackers
    }
}

/// Uniform random source driving grower outcomes and entry-lane selection.
pub trait RandomSource: fmt::Debug {
    /// Draws a uniform sample from `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Picks a uniform index in `0..len`. Returns zero when `len` is zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Seedable random source backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// Creates a random source whose sequence is fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Random source that replays a fixed cycle of unit samples.
///
/// Index picks map the next sample onto `0..len`, so a sample of `0.0` always
/// selects the first entry.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    samples: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Creates a scripted source. An empty script behaves as a constant `0.0`.
    #[must_use]
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor = self.cursor.wrapping_add(1);
        sample.clamp(0.0, 1.0 - f64::EPSILON)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let scaled = self.next_unit() * len as f64;
        (scaled as usize).min(len - 1)
    }
}
