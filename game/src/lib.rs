#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn driver and string command surface for Lane Defence.
//!
//! [`Game`] wires the colony, the spawner, and the random source together and
//! runs the fixed per-turn phase order. The interactive shell talks to it only
//! through the query methods and the four commands.

mod config;
mod coordinate;

use anyhow::Result;
use lane_defence_core::{
    AttackerStats, BoardSnapshot, BoostKind, Command, CommandError, DefenderKind, Event, Outcome,
    RandomSource, SeededRandom,
};
use lane_defence_system_spawning::Spawner;
use lane_defence_world::{self as world, query, Colony, ColonyConfig};
use tracing::{debug, info};

pub use config::{GameConfig, WaveConfig};

/// Complete simulation state driven one turn at a time.
#[derive(Debug)]
pub struct Game {
    colony: Colony,
    spawner: Spawner,
    turn: u64,
    random: Box<dyn RandomSource>,
    events: Vec<Event>,
}

impl Game {
    /// Creates a game from an already built colony and spawner.
    #[must_use]
    pub fn new(colony: Colony, spawner: Spawner, random: Box<dyn RandomSource>) -> Self {
        Self {
            colony,
            spawner,
            turn: 0,
            random,
            events: Vec::new(),
        }
    }

    /// Builds the colony and schedules every configured wave.
    pub fn from_config(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        let colony = Colony::new(ColonyConfig::new(
            config.food,
            config.lanes,
            config.steps,
            config.hazard_period,
        ));
        let spawner = Spawner::from_plan(&config.assault_plan()?);
        info!(
            lanes = config.lanes,
            steps = config.steps,
            pending = spawner.pending(),
            "game configured"
        );
        Ok(Self::new(
            colony,
            spawner,
            Box::new(SeededRandom::new(config.seed)),
        ))
    }

    /// Deploys a defender by type name at a coordinate typed by the player.
    pub fn deploy(&mut self, type_name: &str, coordinate: &str) -> Result<(), CommandError> {
        let kind = DefenderKind::from_name(type_name.trim())
            .ok_or_else(|| CommandError::UnknownType(type_name.to_owned()));
        let command = kind.and_then(|kind| {
            Ok(Command::Deploy {
                kind,
                cell: coordinate::parse(coordinate)?,
            })
        });
        self.submit(command)
    }

    /// Removes whatever occupies the cell; the guard goes first.
    pub fn remove(&mut self, coordinate: &str) -> Result<(), CommandError> {
        let command = coordinate::parse(coordinate).map(|cell| Command::Remove { cell });
        self.submit(command)
    }

    /// Assigns a boost from the inventory to the cell's visible occupant.
    pub fn apply_boost(&mut self, boost_name: &str, coordinate: &str) -> Result<(), CommandError> {
        let boost = BoostKind::from_name(boost_name.trim())
            .ok_or_else(|| CommandError::UnknownBoost(boost_name.to_owned()));
        let command = boost.and_then(|boost| {
            Ok(Command::ApplyBoost {
                boost,
                cell: coordinate::parse(coordinate)?,
            })
        });
        self.submit(command)
    }

    /// Applies a typed command, as recorded from an earlier session.
    pub fn apply(&mut self, command: Command) -> Result<(), CommandError> {
        self.submit(Ok(command))
    }

    fn submit(&mut self, command: Result<Command, CommandError>) -> Result<(), CommandError> {
        let result =
            command.and_then(|command| world::apply(&mut self.colony, command, &mut self.events));
        if let Err(error) = &result {
            debug!(turn = self.turn, %error, "command rejected");
        }
        result
    }

    /// Runs one full turn: release, defenders, attackers, hazards, then the counter.
    pub fn advance_turn(&mut self) {
        let released = self.spawner.release(
            &mut self.colony,
            self.turn,
            self.random.as_mut(),
            &mut self.events,
        );
        self.colony
            .defenders_act(self.random.as_mut(), &mut self.events);
        self.colony.attackers_act(&mut self.events);
        self.colony.cells_act(&mut self.events);

        let outcome = self.outcome();
        self.turn = self.turn.saturating_add(1);
        self.events.push(Event::TurnAdvanced { turn: self.turn });
        debug!(
            turn = self.turn,
            released = released.len(),
            food = query::food(&self.colony),
            remaining = query::attacker_count(&self.colony),
            "turn advanced"
        );
        match outcome {
            Outcome::Won => info!(turn = self.turn, "colony defended"),
            Outcome::Lost => info!(turn = self.turn, "goal overrun"),
            Outcome::Unresolved => {}
        }
    }

    /// Tri-state result: lost once any attacker reaches the goal, won once none remain anywhere.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if query::goal_attackers(&self.colony) > 0 {
            Outcome::Lost
        } else if query::attacker_count(&self.colony) == 0 && self.spawner.pending() == 0 {
            Outcome::Won
        } else {
            Outcome::Unresolved
        }
    }

    /// `Some(true)` on a win, `Some(false)` on a loss, `None` while undecided.
    #[must_use]
    pub fn win_query(&self) -> Option<bool> {
        self.outcome().as_bool()
    }

    /// Per-lane summary of the board.
    #[must_use]
    pub fn board(&self) -> BoardSnapshot {
        query::board(&self.colony)
    }

    /// Cells per lane.
    #[must_use]
    pub fn lane_length(&self) -> u32 {
        query::lane_length(&self.colony)
    }

    /// Number of completed turns.
    #[must_use]
    pub const fn turn(&self) -> u64 {
        self.turn
    }

    /// Food currently stored.
    #[must_use]
    pub fn food(&self) -> u32 {
        query::food(&self.colony)
    }

    /// Attackers still waiting in the spawner.
    #[must_use]
    pub fn reservoir(&self) -> usize {
        self.spawner.pending()
    }

    /// Names of boosts with a positive inventory count.
    #[must_use]
    pub fn boosts(&self) -> Vec<&'static str> {
        query::available_boosts(&self.colony)
            .into_iter()
            .map(BoostKind::name)
            .collect()
    }

    /// Adds a wave to the spawner schedule.
    ///
    /// A wave for a turn that already passed goes out on the next advance.
    pub fn schedule(&mut self, turn: u64, count: u32, stats: AttackerStats) {
        self.spawner.schedule(turn, count, stats);
    }

    /// Read-only access to the colony for detailed queries.
    #[must_use]
    pub const fn colony(&self) -> &Colony {
        &self.colony
    }

    /// Every event recorded since the last drain.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Takes the recorded events, leaving the log empty.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
