#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Spice Defence simulation.
//!
//! This crate defines the entity model and the message surface that connects
//! the presentation layer, the authoritative world, and the pure systems.
//! Callers submit [`Command`] values describing desired mutations, the world
//! executes them via its `apply` entry point, and appends [`Event`] values the
//! caller drains after every call. Systems borrow the grid and the roster for
//! the duration of a single call and never retain them.

mod config;
mod error;
mod geometry;
mod grid;
mod stats;
mod tower;
mod unit;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use config::Config;
pub use error::SimError;
pub use geometry::{angle_toward, Direction, Vec2};
pub use grid::{Cell, Grid, PortalKind};
pub use stats::{SpeciesCounts, Statistics, TowerCounts};
pub use tower::{Armament, Tower, TowerKind, TowerProfile};
pub use unit::{HostileUnit, Slayer, Species, SpeciesProfile};

/// Top-level state of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Towers may be placed and removed; no units move.
    Build,
    /// Units spawn and fight; building is disabled.
    Wave,
    /// Player health was depleted. Terminal.
    Lost,
    /// The final wave was cleared. Terminal.
    Won,
}

impl Phase {
    /// Reports whether the game is over.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Lost | Self::Won)
    }
}

/// One notch up or down the discrete time-scale ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeScaleStep {
    /// Speed the simulation up by one notch.
    Faster,
    /// Slow the simulation down by one notch.
    Slower,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided real elapsed time.
    Tick {
        /// Duration of real time since the previous tick, before time scaling.
        dt: Duration,
    },
    /// Requests construction of a tower.
    BuildTower {
        /// Variant to construct.
        kind: TowerKind,
        /// Cell the tower should occupy.
        cell: CellCoord,
    },
    /// Requests removal of the tower on a cell.
    TearDownTower {
        /// Cell holding the tower.
        cell: CellCoord,
    },
    /// Places one of the two thumpers that summon the creature.
    PlaceThumper {
        /// Cell receiving the thumper.
        cell: CellCoord,
    },
    /// Clears thumpers that have not yet summoned the creature.
    CancelSummon,
    /// Interrupts an active creature; it cannot be summoned again this wave.
    DismissSummon,
    /// Pauses or resumes the simulation.
    SetPaused {
        /// Whether the simulation should be paused.
        paused: bool,
    },
    /// Moves the time scale one notch.
    StepTimeScale {
        /// Direction of the change.
        step: TimeScaleStep,
    },
    /// Ends the build phase immediately and starts the next wave.
    SkipBuildTimer,
}

/// Plain rotation and position payload carried by presentation events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in cell units.
    pub position: Vec2,
    /// Facing in radians.
    pub rotation: f32,
}

impl Transform {
    /// Creates a transform from its parts.
    #[must_use]
    pub const fn new(position: Vec2, rotation: f32) -> Self {
        Self { position, rotation }
    }
}

/// Events appended by the world, in simulation order, after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Scaled simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the game entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: Phase,
    },
    /// Announces the start of a wave.
    WaveStarted {
        /// One-based wave number.
        wave: u32,
        /// Number of units queued for the wave.
        units: u32,
    },
    /// Announces that every unit of a wave has been dealt with.
    WaveCompleted {
        /// One-based wave number.
        wave: u32,
    },
    /// Reports a new active path between the portals.
    PathChanged {
        /// Waypoints from the start portal to the end portal.
        waypoints: Vec<CellCoord>,
    },
    /// Reports the player's new spice balance.
    SpiceChanged {
        /// Spice after the change.
        spice: i32,
    },
    /// Reports the player's new health.
    PlayerHealthChanged {
        /// Health after the change.
        health: i32,
    },
    /// Reports the new time-scale multiplier.
    TimeScaleChanged {
        /// Multiplier applied to elapsed time.
        scale: f32,
    },
    /// Reports that the simulation was paused or resumed.
    PauseChanged {
        /// Whether the simulation is paused.
        paused: bool,
    },
    /// Confirms that a portal exists.
    PortalCreated {
        /// Which portal was created.
        portal: PortalKind,
        /// Cell occupied by the portal.
        cell: CellCoord,
    },
    /// Confirms that a tower was built.
    TowerCreated {
        /// Identifier assigned to the tower.
        tower: TowerId,
        /// Variant that was built.
        kind: TowerKind,
        /// Cell occupied by the tower.
        cell: CellCoord,
    },
    /// Reports a tower turning toward a target.
    TowerUpdated {
        /// Tower that turned.
        tower: TowerId,
        /// New placement of the tower.
        transform: Transform,
    },
    /// Reports a tower attack.
    TowerFired {
        /// Tower that attacked.
        tower: TowerId,
        /// Variant of the attacking tower.
        kind: TowerKind,
        /// Position of the unit the attack was aimed at.
        target: Vec2,
    },
    /// Reports a tower reduced to debris.
    TowerConvertedToDebris {
        /// Tower that was wrecked.
        tower: TowerId,
        /// Cell the rubble occupies.
        cell: CellCoord,
    },
    /// Reports a tower leaving the grid.
    TowerDestroyed {
        /// Tower that was removed.
        tower: TowerId,
        /// Cell the tower occupied.
        cell: CellCoord,
    },
    /// Confirms that a unit was queued for the current wave.
    UnitCreated {
        /// Identifier assigned to the unit.
        unit: UnitId,
        /// Species of the unit.
        species: Species,
    },
    /// Reports a queued unit entering the playfield.
    UnitShown {
        /// Unit that entered the playfield.
        unit: UnitId,
        /// Placement of the unit.
        transform: Transform,
    },
    /// Reports a unit moving along the path.
    UnitUpdated {
        /// Unit that moved.
        unit: UnitId,
        /// New placement of the unit.
        transform: Transform,
    },
    /// Reports a unit leaving the roster.
    UnitDestroyed {
        /// Unit that was removed.
        unit: UnitId,
        /// What finished the unit off.
        cause: Slayer,
    },
    /// Confirms a thumper placement.
    ThumperPlaced {
        /// Cell holding the thumper.
        cell: CellCoord,
    },
    /// Reports that every thumper was removed.
    ThumpersCleared,
    /// Reports the creature surfacing at the grid edge.
    SummonShown {
        /// Placement of the creature.
        transform: Transform,
    },
    /// Reports the creature moving.
    SummonUpdated {
        /// Placement of the creature.
        transform: Transform,
    },
    /// Reports the creature disappearing.
    SummonVanished,
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Variant requested.
        kind: TowerKind,
        /// Cell requested.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that a teardown request was rejected.
    TowerTeardownRejected {
        /// Cell requested.
        cell: CellCoord,
        /// Specific reason the teardown failed.
        reason: TeardownError,
    },
    /// Reports that a thumper placement was rejected.
    ThumperRejected {
        /// Cell requested.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: ThumperError,
    },
}

/// Unique identifier assigned to a hostile unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates a new unit identifier with the provided numeric value.
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

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Reports whether both cells lie in the same row or the same column.
    #[must_use]
    pub fn shares_line_with(self, other: CellCoord) -> bool {
        self.column == other.column || self.row == other.row
    }

    /// Centre of the cell in continuous coordinates.
    #[must_use]
    pub fn to_point(self) -> Vec2 {
        Vec2::new(self.column as f32, self.row as f32)
    }

    /// Cell whose centre is nearest to `point`, or `None` left of or above the grid.
    #[must_use]
    pub fn nearest(point: Vec2) -> Option<Self> {
        let column = point.x.round();
        let row = point.y.round();
        if column < 0.0 || row < 0.0 || column > u32::MAX as f32 || row > u32::MAX as f32 {
            return None;
        }
        Some(Self::new(column as u32, row as u32))
    }
}

/// Reasons a tower placement request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum PlacementError {
    /// The game is not in the build phase.
    #[error("towers can only be built during the build phase")]
    InvalidPhase,
    /// The requested cell lies outside the grid.
    #[error("cell lies outside the grid")]
    OutOfBounds,
    /// The requested cell already holds a portal or a tower.
    #[error("cell is occupied")]
    Occupied,
    /// The player cannot afford the tower.
    #[error("not enough spice")]
    InsufficientSpice,
    /// The tower would leave no path between the portals.
    #[error("tower would block the only path")]
    WouldBlockPath,
}

/// Reasons a tower teardown request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum TeardownError {
    /// The game is not in the build phase.
    #[error("towers can only be torn down during the build phase")]
    InvalidPhase,
    /// The requested cell lies outside the grid.
    #[error("cell lies outside the grid")]
    OutOfBounds,
    /// The requested cell holds no tower.
    #[error("no tower on cell")]
    NoTower,
}

/// Reasons a thumper placement may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum ThumperError {
    /// Thumpers are only accepted while a wave is running.
    #[error("thumpers can only be placed during a wave")]
    InvalidPhase,
    /// The requested cell lies outside the grid.
    #[error("cell lies outside the grid")]
    OutOfBounds,
    /// The creature is still cooling down.
    #[error("summon is cooling down")]
    CoolingDown,
    /// The creature is already travelling.
    #[error("summon is already active")]
    AlreadyActive,
    /// The creature was dismissed earlier this wave.
    #[error("summon already used this wave")]
    AlreadyUsed,
    /// The second thumper must not share the first one's cell.
    #[error("thumpers must occupy different cells")]
    SameCell,
    /// The second thumper must share a row or column with the first.
    #[error("thumpers must share a row or a column")]
    NotAligned,
}
