#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Spice Defence.
//!
//! The world owns the grid, the active path, the hostile roster and the wave
//! economy. Adapters mutate it exclusively through [`apply`] (or the direct
//! `World` methods that mirror the fallible commands) and read it through
//! [`query`]. Every tick runs spawning, the summoned creature, towers, unit
//! movement and bookkeeping in that order.

mod navigation;
mod towers;

use std::time::Duration;

use spice_defence_core::{
    CellCoord, Command, Config, Event, Grid, HostileUnit, Phase, PlacementError, PortalKind,
    SimError, Slayer, Statistics, TeardownError, ThumperError, TimeScaleStep, Tower, TowerId,
    TowerKind,
};
use spice_defence_system_movement::Movement;
use spice_defence_system_spawning::Spawning;
use spice_defence_system_summon::Summon;
use spice_defence_system_tower_combat::TowerCombat;
use spice_defence_system_wave_generation::{WaveGeneration, WaveQueue};

use crate::{
    navigation::ActivePath,
    towers::{refund_for, TowerRegistry},
};

/// Discrete time-scale multipliers the caller may step through.
pub const TIME_SCALES: [f32; 7] = [0.25, 1.0 / 3.0, 0.5, 1.0, 2.0, 3.0, 4.0];

const NORMAL_TIME_SCALE: usize = 3;

/// Longest stretch of simulated time a single tick may cover, after scaling.
///
/// Reload countdowns are `f32`, so an unbounded tick would lose the reload
/// interval to rounding and never finish firing.
pub const MAX_TICK_SECONDS: f32 = 3600.0;

/// Represents the authoritative Spice Defence world state.
#[derive(Debug)]
pub struct World {
    config: Config,
    grid: Grid,
    path: ActivePath,
    phase: Phase,
    phase_timer: f32,
    game_started: bool,
    player_health: i32,
    spice: i32,
    wave: u32,
    time_scale: usize,
    paused: bool,
    statistics: Statistics,
    roster: Vec<HostileUnit>,
    queue: WaveQueue,
    towers: TowerRegistry,
    next_unit_id: u32,
    wave_generation: WaveGeneration,
    spawning: Spawning,
    summon: Summon,
    combat: TowerCombat,
    movement: Movement,
    tick_index: u64,
}

impl World {
    /// Creates a world in the build phase of wave one.
    ///
    /// The configuration is validated first. Both portals and the initial
    /// path are announced through `out`.
    pub fn new(config: Config, out: &mut Vec<Event>) -> Result<Self, SimError> {
        config.validate()?;
        let grid = Grid::new(config.grid_width, config.grid_height, config.max_grid_size)?;
        let path = ActivePath::compute(&grid);

        out.push(Event::PortalCreated {
            portal: PortalKind::Start,
            cell: grid.start(),
        });
        out.push(Event::PortalCreated {
            portal: PortalKind::End,
            cell: grid.end(),
        });
        out.push(Event::PathChanged {
            waypoints: path.path().waypoints().to_vec(),
        });

        tracing::info!(
            width = grid.width(),
            height = grid.height(),
            final_wave = config.final_wave,
            "world created"
        );

        Ok(Self {
            phase: Phase::Build,
            phase_timer: config.build_phase_seconds,
            game_started: false,
            player_health: config.player_health,
            spice: config.starting_spice,
            wave: 1,
            time_scale: NORMAL_TIME_SCALE,
            paused: false,
            statistics: Statistics::default(),
            roster: Vec::new(),
            queue: WaveQueue::new(),
            towers: TowerRegistry::new(),
            next_unit_id: 0,
            wave_generation: WaveGeneration::new(&config),
            spawning: Spawning::new(&config),
            summon: Summon::new(&config),
            combat: TowerCombat::new(),
            movement: Movement::new(),
            tick_index: 0,
            grid,
            path,
            config,
        })
    }

    /// Builds a tower of `kind` on `cell`.
    ///
    /// Rejections leave every piece of state untouched, including spice and
    /// the active path.
    pub fn build_tower(
        &mut self,
        kind: TowerKind,
        cell: CellCoord,
        out: &mut Vec<Event>,
    ) -> Result<TowerId, PlacementError> {
        if self.phase != Phase::Build {
            return Err(PlacementError::InvalidPhase);
        }
        if !self.grid.contains(cell) {
            return Err(PlacementError::OutOfBounds);
        }
        if !self.grid.is_free(cell) {
            return Err(PlacementError::Occupied);
        }
        let profile = self.config.tower_profile(kind);
        if self.spice < profile.cost {
            return Err(PlacementError::InsufficientSpice);
        }

        let id = self.towers.peek();
        if self
            .grid
            .place_tower(Tower::new(id, kind, cell, profile))
            .is_err()
        {
            return Err(PlacementError::Occupied);
        }

        let mut path_events = Vec::new();
        if !self.path.accommodate(&self.grid, cell, &mut path_events) {
            let _ = self.grid.remove_tower(cell);
            return Err(PlacementError::WouldBlockPath);
        }

        self.towers.commit();
        self.spice -= profile.cost;
        self.statistics.towers_built.increment(kind);
        out.push(Event::TowerCreated {
            tower: id,
            kind,
            cell,
        });
        out.push(Event::SpiceChanged { spice: self.spice });
        out.extend(path_events);

        if !self.game_started {
            self.game_started = true;
            self.phase_timer = self.config.build_phase_seconds;
            tracing::info!(
                seconds = self.phase_timer,
                "first tower built, build timer started"
            );
        }

        tracing::debug!(
            tower = id.get(),
            ?kind,
            column = cell.column(),
            row = cell.row(),
            spice = self.spice,
            "tower built"
        );
        Ok(id)
    }

    /// Removes the tower on `cell`, refunding part of its cost.
    ///
    /// The active path is only replaced when a strictly shorter route opened up.
    pub fn tear_down_tower(
        &mut self,
        cell: CellCoord,
        out: &mut Vec<Event>,
    ) -> Result<TowerId, TeardownError> {
        if self.phase != Phase::Build {
            return Err(TeardownError::InvalidPhase);
        }
        if !self.grid.contains(cell) {
            return Err(TeardownError::OutOfBounds);
        }
        let Some(tower) = self.grid.remove_tower(cell) else {
            return Err(TeardownError::NoTower);
        };

        let refund = refund_for(tower.profile().cost, self.config.refund_ratio);
        self.spice += refund;
        out.push(Event::TowerDestroyed {
            tower: tower.id(),
            cell,
        });
        out.push(Event::SpiceChanged { spice: self.spice });
        let _ = self.path.shorten(&self.grid, out);

        tracing::debug!(
            tower = tower.id().get(),
            column = cell.column(),
            row = cell.row(),
            refund,
            "tower torn down"
        );
        Ok(tower.id())
    }

    /// Plants a thumper on `cell`; the second one summons the creature.
    pub fn place_thumper(
        &mut self,
        cell: CellCoord,
        out: &mut Vec<Event>,
    ) -> Result<(), ThumperError> {
        if self.phase != Phase::Wave {
            return Err(ThumperError::InvalidPhase);
        }
        self.summon.place_thumper(&self.grid, cell, out)?;
        tracing::debug!(column = cell.column(), row = cell.row(), "thumper placed");
        Ok(())
    }

    fn tick(&mut self, dt: Duration, out: &mut Vec<Event>) {
        if self.paused || self.phase.is_terminal() {
            return;
        }

        let seconds = (dt.as_secs_f32() * TIME_SCALES[self.time_scale]).min(MAX_TICK_SECONDS);
        let scaled = Duration::try_from_secs_f32(seconds).unwrap_or(Duration::ZERO);
        self.tick_index = self.tick_index.saturating_add(1);
        out.push(Event::TimeAdvanced { dt: scaled });

        match self.phase {
            Phase::Build => {
                if self.game_started {
                    self.phase_timer -= seconds;
                    if self.phase_timer <= 0.0 {
                        self.start_wave(out);
                    }
                }
            }
            Phase::Wave => self.advance_wave(seconds, out),
            Phase::Lost | Phase::Won => {}
        }

        tracing::trace!(
            tick = self.tick_index,
            phase = ?self.phase,
            units = self.roster.len(),
            pending = self.queue.len(),
            "tick"
        );
    }

    fn start_wave(&mut self, out: &mut Vec<Event>) {
        self.phase = Phase::Wave;
        self.phase_timer = 0.0;
        self.set_time_scale(NORMAL_TIME_SCALE, out);
        self.summon.begin_wave();

        let mut created = Vec::new();
        self.queue = self.wave_generation.generate(
            &self.config,
            self.wave,
            self.grid.start().to_point(),
            &mut self.next_unit_id,
            &mut created,
        );
        let units = u32::try_from(self.queue.len()).unwrap_or(u32::MAX);

        out.push(Event::PhaseChanged { phase: Phase::Wave });
        out.push(Event::WaveStarted {
            wave: self.wave,
            units,
        });
        out.extend(created);
        tracing::info!(wave = self.wave, units, "wave started");

        self.spawning
            .begin_wave(&mut self.queue, &mut self.roster, out);
    }

    fn advance_wave(&mut self, dt: f32, out: &mut Vec<Event>) {
        self.spawning
            .handle(&mut self.queue, &mut self.roster, dt, out);
        self.summon.update(
            &mut self.grid,
            &mut self.roster,
            &mut self.statistics,
            dt,
            out,
        );
        if let Err(error) = self
            .combat
            .handle(&mut self.grid, &mut self.roster, dt, out)
        {
            panic!("tower combat rejected validated configuration: {error}");
        }
        let arrived = self
            .movement
            .handle(&mut self.roster, self.path.path(), dt, out);
        if arrived > 0 {
            tracing::debug!(wave = self.wave, arrived, "units reached the end portal");
        }
        self.settle_roster(out);

        if self.player_health <= 0 {
            self.lose(out);
            return;
        }
        if self.queue.is_empty() && self.roster.is_empty() {
            self.finish_wave(out);
        }
    }

    /// Removes dead units and units that reached the end portal.
    fn settle_roster(&mut self, out: &mut Vec<Event>) {
        let end = self.grid.end().to_point();
        let spice_before = self.spice;
        let health_before = self.player_health;

        let roster = std::mem::take(&mut self.roster);
        for mut unit in roster {
            let cause = if unit.is_dead() {
                self.spice += unit.reward();
                let slayer = unit.slayer().unwrap_or(Slayer::Tower);
                if slayer == Slayer::Tower {
                    self.statistics.killed_by_tower.increment(unit.species());
                }
                slayer
            } else if unit.position() == end {
                self.player_health -= unit.health();
                let _ = unit.kill(Slayer::EndPortal);
                self.statistics.reached_end.increment(unit.species());
                Slayer::EndPortal
            } else {
                self.roster.push(unit);
                continue;
            };

            out.push(Event::UnitDestroyed {
                unit: unit.id(),
                cause,
            });
        }

        if self.spice != spice_before {
            out.push(Event::SpiceChanged { spice: self.spice });
        }
        if self.player_health != health_before {
            out.push(Event::PlayerHealthChanged {
                health: self.player_health,
            });
        }
    }

    fn lose(&mut self, out: &mut Vec<Event>) {
        self.phase = Phase::Lost;
        self.paused = true;
        out.push(Event::PhaseChanged { phase: Phase::Lost });
        out.push(Event::PauseChanged { paused: true });
        tracing::info!(
            wave = self.wave,
            health = self.player_health,
            "player health depleted, game lost"
        );
    }

    fn finish_wave(&mut self, out: &mut Vec<Event>) {
        out.push(Event::WaveCompleted { wave: self.wave });
        tracing::info!(wave = self.wave, "wave completed");

        if self.summon.active().is_some() {
            self.summon.reset(false, out);
        } else {
            let _ = self.summon.cancel_attack(out);
        }

        for tower in self.grid.clear_debris() {
            out.push(Event::TowerDestroyed {
                tower: tower.id(),
                cell: tower.cell(),
            });
        }
        let _ = self.path.shorten(&self.grid, out);

        if self.wave >= self.config.final_wave {
            self.phase = Phase::Won;
            out.push(Event::PhaseChanged { phase: Phase::Won });
            tracing::info!(wave = self.wave, "final wave cleared, game won");
            return;
        }

        self.wave_generation.grow();
        self.spawning.shorten();
        self.wave += 1;
        self.phase = Phase::Build;
        self.phase_timer = self.config.build_phase_seconds;
        out.push(Event::PhaseChanged { phase: Phase::Build });
    }

    fn set_paused(&mut self, paused: bool, out: &mut Vec<Event>) {
        if self.phase.is_terminal() || self.paused == paused {
            return;
        }
        self.paused = paused;
        out.push(Event::PauseChanged { paused });
        tracing::debug!(paused, "pause toggled");
    }

    fn step_time_scale(&mut self, step: TimeScaleStep, out: &mut Vec<Event>) {
        let index = match step {
            TimeScaleStep::Faster => (self.time_scale + 1).min(TIME_SCALES.len() - 1),
            TimeScaleStep::Slower => self.time_scale.saturating_sub(1),
        };
        self.set_time_scale(index, out);
    }

    fn set_time_scale(&mut self, index: usize, out: &mut Vec<Event>) {
        if self.time_scale == index {
            return;
        }
        self.time_scale = index;
        out.push(Event::TimeScaleChanged {
            scale: TIME_SCALES[index],
        });
        tracing::debug!(scale = TIME_SCALES[index], "time scale changed");
    }

    fn skip_build_timer(&mut self, out: &mut Vec<Event>) {
        if self.phase != Phase::Build {
            tracing::debug!(phase = ?self.phase, "build timer skip ignored");
            return;
        }
        self.start_wave(out);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Rejected commands leave the world unchanged and are reported through a
/// rejection event.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::BuildTower { kind, cell } => {
            if let Err(reason) = world.build_tower(kind, cell, out_events) {
                tracing::debug!(?kind, ?cell, %reason, "tower placement rejected");
                out_events.push(Event::TowerPlacementRejected { kind, cell, reason });
            }
        }
        Command::TearDownTower { cell } => {
            if let Err(reason) = world.tear_down_tower(cell, out_events) {
                tracing::debug!(?cell, %reason, "tower teardown rejected");
                out_events.push(Event::TowerTeardownRejected { cell, reason });
            }
        }
        Command::PlaceThumper { cell } => {
            if let Err(reason) = world.place_thumper(cell, out_events) {
                tracing::debug!(?cell, %reason, "thumper rejected");
                out_events.push(Event::ThumperRejected { cell, reason });
            }
        }
        Command::CancelSummon => {
            let _ = world.summon.cancel_attack(out_events);
        }
        Command::DismissSummon => {
            if world.phase == Phase::Wave && world.summon.active().is_some() {
                world.summon.reset(false, out_events);
                tracing::debug!("summon dismissed");
            }
        }
        Command::SetPaused { paused } => world.set_paused(paused, out_events),
        Command::StepTimeScale { step } => world.step_time_scale(step, out_events),
        Command::SkipBuildTimer => world.skip_build_timer(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use spice_defence_core::{
        CellCoord, Config, Grid, HostileUnit, Phase, Statistics, Tower, Transform, UnitId,
    };
    use spice_defence_system_navigation::Path;
    use spice_defence_system_summon::ActiveSummon;

    use super::{World, TIME_SCALES};

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &Config {
        &world.config
    }

    /// Current grid contents.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Tower standing on `cell`, including debris.
    #[must_use]
    pub fn tower(world: &World, cell: CellCoord) -> Option<&Tower> {
        world.grid.tower(cell)
    }

    /// Active path hostile units follow.
    #[must_use]
    pub fn path(world: &World) -> &Path {
        world.path.path()
    }

    /// Waypoints of the active path.
    #[must_use]
    pub fn waypoints(world: &World) -> &[CellCoord] {
        world.path.path().waypoints()
    }

    /// Remaining player health.
    #[must_use]
    pub fn player_health(world: &World) -> i32 {
        world.player_health
    }

    /// Current spice balance.
    #[must_use]
    pub fn spice(world: &World) -> i32 {
        world.spice
    }

    /// One-based number of the current or upcoming wave.
    #[must_use]
    pub fn wave(world: &World) -> u32 {
        world.wave
    }

    /// Number of the wave whose completion wins the game.
    #[must_use]
    pub fn final_wave(world: &World) -> u32 {
        world.config.final_wave
    }

    /// Current phase.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Seconds left on the build timer.
    #[must_use]
    pub fn phase_timer(world: &World) -> f32 {
        world.phase_timer
    }

    /// Reports whether the first tower has been built.
    #[must_use]
    pub fn game_started(world: &World) -> bool {
        world.game_started
    }

    /// Seconds until the summon creature may be called again.
    #[must_use]
    pub fn summon_cooldown(world: &World) -> f32 {
        world.summon.cooldown_remaining()
    }

    /// Thumpers placed so far.
    #[must_use]
    pub fn thumpers(world: &World) -> [Option<CellCoord>; 2] {
        world.summon.thumpers()
    }

    /// Creature currently travelling, if any.
    #[must_use]
    pub fn active_summon(world: &World) -> Option<ActiveSummon> {
        world.summon.active()
    }

    /// Units on the playfield in release order.
    #[must_use]
    pub fn roster(world: &World) -> &[HostileUnit] {
        &world.roster
    }

    /// Units of the current wave not yet released.
    #[must_use]
    pub fn pending_units(world: &World) -> usize {
        world.queue.len()
    }

    /// Presentation data of a unit on the playfield.
    ///
    /// # Panics
    ///
    /// Panics if no unit with `unit` is on the playfield; the caller's view of
    /// the roster has fallen out of step with the world.
    #[must_use]
    pub fn unit_transform(world: &World, unit: UnitId) -> Transform {
        let Some(found) = world.roster.iter().find(|candidate| candidate.id() == unit) else {
            panic!("unit {} is not on the playfield", unit.get());
        };
        Transform::new(found.position(), found.facing().rotation())
    }

    /// Statistics accumulated since the world was created.
    #[must_use]
    pub fn statistics(world: &World) -> &Statistics {
        &world.statistics
    }

    /// Multiplier applied to elapsed time.
    #[must_use]
    pub fn time_scale(world: &World) -> f32 {
        TIME_SCALES[world.time_scale]
    }

    /// Reports whether ticks are currently ignored.
    #[must_use]
    pub fn is_paused(world: &World) -> bool {
        world.paused
    }
}
