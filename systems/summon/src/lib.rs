#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Summonable creature that ploughs through one row or column of the grid.
//!
//! The player plants two thumpers on distinct cells that share a row or a
//! column. The second thumper calls the creature, which surfaces at the grid
//! edge on the first thumper's side and travels toward the second thumper and
//! beyond until it leaves the grid. Every tower it crosses becomes debris and
//! every hostile unit it brushes is swallowed.

use spice_defence_core::{
    CellCoord, Config, Direction, Event, Grid, HostileUnit, Slayer, Statistics, ThumperError,
    Transform, Vec2,
};

/// Longest distance the creature covers between two collision checks.
///
/// Half a cell guarantees that the rounded position visits every cell on the
/// line even when a large tick moves the creature several cells.
const MAX_STEP: f32 = 0.5;

/// Creature currently travelling across the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveSummon {
    /// Continuous position of the creature.
    pub position: Vec2,
    /// Direction of travel.
    pub direction: Direction,
}

impl ActiveSummon {
    fn transform(&self) -> Transform {
        Transform::new(self.position, self.direction.rotation())
    }
}

/// State machine of the summonable creature.
#[derive(Clone, Debug, PartialEq)]
pub struct Summon {
    thumpers: [Option<CellCoord>; 2],
    active: Option<ActiveSummon>,
    cooldown: f32,
    used_this_wave: bool,
    speed: f32,
    kill_radius: f32,
    cooldown_duration: f32,
}

impl Summon {
    /// Creates an idle creature tuned by `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            thumpers: [None; 2],
            active: None,
            cooldown: 0.0,
            used_this_wave: false,
            speed: config.summon_speed,
            kill_radius: config.summon_kill_radius,
            cooldown_duration: config.summon_cooldown,
        }
    }

    /// Thumpers placed so far, in placement order.
    #[must_use]
    pub const fn thumpers(&self) -> [Option<CellCoord>; 2] {
        self.thumpers
    }

    /// Creature currently travelling, if any.
    #[must_use]
    pub const fn active(&self) -> Option<ActiveSummon> {
        self.active
    }

    /// Seconds until thumpers are accepted again.
    #[must_use]
    pub const fn cooldown_remaining(&self) -> f32 {
        self.cooldown
    }

    /// Reports whether the creature was interrupted earlier this wave.
    #[must_use]
    pub const fn used_this_wave(&self) -> bool {
        self.used_this_wave
    }

    /// Clears the per-wave restriction at the start of a wave.
    pub fn begin_wave(&mut self) {
        self.used_this_wave = false;
    }

    /// Plants a thumper, summoning the creature once both are placed.
    pub fn place_thumper(
        &mut self,
        grid: &Grid,
        cell: CellCoord,
        out: &mut Vec<Event>,
    ) -> Result<(), ThumperError> {
        if !grid.contains(cell) {
            return Err(ThumperError::OutOfBounds);
        }
        if self.active.is_some() {
            return Err(ThumperError::AlreadyActive);
        }
        if self.used_this_wave {
            return Err(ThumperError::AlreadyUsed);
        }
        if self.cooldown > 0.0 {
            return Err(ThumperError::CoolingDown);
        }

        let Some(first) = self.thumpers[0] else {
            self.thumpers[0] = Some(cell);
            out.push(Event::ThumperPlaced { cell });
            return Ok(());
        };

        if !first.shares_line_with(cell) {
            return Err(ThumperError::NotAligned);
        }
        let Some(direction) = Direction::between(first, cell) else {
            return Err(ThumperError::SameCell);
        };

        self.thumpers[1] = Some(cell);
        out.push(Event::ThumperPlaced { cell });

        let summon = ActiveSummon {
            position: entry_point(grid, first, direction).to_point(),
            direction,
        };
        self.active = Some(summon);
        out.push(Event::SummonShown {
            transform: summon.transform(),
        });
        Ok(())
    }

    /// Removes thumpers that have not yet summoned the creature. No cooldown starts.
    ///
    /// Returns `false` when there was nothing to cancel.
    pub fn cancel_attack(&mut self, out: &mut Vec<Event>) -> bool {
        if self.active.is_some() || self.thumpers == [None; 2] {
            return false;
        }
        self.thumpers = [None; 2];
        out.push(Event::ThumpersCleared);
        true
    }

    /// Sends the creature away and clears both thumpers.
    ///
    /// A creature that was travelling starts its cooldown. Unless
    /// `resettable` is set it also cannot be summoned again this wave.
    pub fn reset(&mut self, resettable: bool, out: &mut Vec<Event>) {
        if self.active.take().is_some() {
            self.cooldown = self.cooldown_duration;
            out.push(Event::SummonVanished);
        }
        if self.thumpers != [None; 2] {
            self.thumpers = [None; 2];
            out.push(Event::ThumpersCleared);
        }
        if !resettable {
            self.used_this_wave = true;
        }
    }

    /// Advances the creature by `dt` seconds, or runs down its cooldown while idle.
    ///
    /// Every cell the creature crosses is struck: an intact tower there turns
    /// to debris and every living unit within the kill radius dies. Leaving
    /// the grid resets the creature.
    pub fn update(
        &mut self,
        grid: &mut Grid,
        units: &mut [HostileUnit],
        statistics: &mut Statistics,
        dt: f32,
        out: &mut Vec<Event>,
    ) {
        let Some(mut summon) = self.active else {
            self.cooldown = (self.cooldown - dt).max(0.0);
            return;
        };

        let mut remaining = self.speed * dt;
        loop {
            let Some(cell) = CellCoord::nearest(summon.position).filter(|cell| grid.contains(*cell))
            else {
                self.reset(true, out);
                return;
            };
            self.strike(grid, units, statistics, cell, summon.position, out);

            if remaining <= 0.0 {
                break;
            }
            let step = remaining.min(MAX_STEP);
            summon.position = summon.position + summon.direction.unit_vector() * step;
            remaining -= step;
        }

        self.active = Some(summon);
        out.push(Event::SummonUpdated {
            transform: summon.transform(),
        });
    }

    fn strike(
        &self,
        grid: &mut Grid,
        units: &mut [HostileUnit],
        statistics: &mut Statistics,
        cell: CellCoord,
        position: Vec2,
        out: &mut Vec<Event>,
    ) {
        if let Some(tower) = grid.tower_mut(cell) {
            if tower.convert_to_debris() {
                statistics.towers_destroyed_by_summon.increment(tower.kind());
                out.push(Event::TowerConvertedToDebris {
                    tower: tower.id(),
                    cell,
                });
            }
        }

        for unit in units.iter_mut() {
            if unit.position().within(position, self.kill_radius) && unit.kill(Slayer::Summon) {
                statistics.killed_by_summon.increment(unit.species());
            }
        }
    }
}

/// Edge cell on the first thumper's side of the line the creature travels.
fn entry_point(grid: &Grid, first: CellCoord, direction: Direction) -> CellCoord {
    match direction {
        Direction::East => CellCoord::new(0, first.row()),
        Direction::West => CellCoord::new(grid.width() - 1, first.row()),
        Direction::South => CellCoord::new(first.column(), 0),
        Direction::North => CellCoord::new(first.column(), grid.height() - 1),
    }
}
