//! Scripted player that drives a world from start to finish.

use std::time::Duration;

use anyhow::{Context, Result};
use spice_defence_core::{
    CellCoord, Command, Config, Event, Phase, PlacementError, Species, TowerKind,
};
use spice_defence_world::{self as world, query, World};

/// How a headless run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The final wave was cleared.
    Won,
    /// Player health ran out.
    Lost,
    /// The tick limit elapsed before either terminal phase.
    TickLimit,
}

/// Builds guard towers in row-major order and skips every build timer.
#[derive(Debug)]
pub(crate) struct Autopilot {
    world: World,
    events: Vec<Event>,
    towers_per_wave: u32,
    cursor: u32,
    ticks: u64,
}

impl Autopilot {
    pub(crate) fn new(config: Config, towers_per_wave: u32) -> Result<Self> {
        let mut events = Vec::new();
        let world = World::new(config, &mut events).context("failed to create world")?;
        Ok(Self {
            world,
            events,
            towers_per_wave,
            cursor: 0,
            ticks: 0,
        })
    }

    pub(crate) fn ticks(&self) -> u64 {
        self.ticks
    }

    pub(crate) fn run(&mut self, dt_ms: u64, max_ticks: u64) -> Outcome {
        let dt = Duration::from_millis(dt_ms);
        while self.ticks < max_ticks {
            match query::phase(&self.world) {
                Phase::Won => return Outcome::Won,
                Phase::Lost => return Outcome::Lost,
                Phase::Build => {
                    let built = self.build_round();
                    tracing::info!(
                        wave = query::wave(&self.world),
                        built,
                        spice = query::spice(&self.world),
                        "build phase"
                    );
                    self.apply(Command::SkipBuildTimer);
                }
                Phase::Wave => {
                    self.apply(Command::Tick { dt });
                    self.ticks += 1;
                }
            }
        }
        match query::phase(&self.world) {
            Phase::Won => Outcome::Won,
            Phase::Lost => Outcome::Lost,
            Phase::Build | Phase::Wave => Outcome::TickLimit,
        }
    }

    /// Places up to `towers_per_wave` guards, returning how many were built.
    fn build_round(&mut self) -> u32 {
        let width = query::grid(&self.world).width();
        let cells = width * query::grid(&self.world).height();
        let mut built = 0;
        while built < self.towers_per_wave && self.cursor < cells {
            let cell = CellCoord::new(self.cursor % width, self.cursor / width);
            match self
                .world
                .build_tower(TowerKind::Guard, cell, &mut self.events)
            {
                Ok(_) => built += 1,
                Err(PlacementError::InsufficientSpice) => break,
                Err(reason) => tracing::trace!(?cell, %reason, "skipping cell"),
            }
            self.cursor += 1;
        }
        self.events.clear();
        built
    }

    fn apply(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut self.events);
        for event in self.events.drain(..) {
            match event {
                Event::WaveCompleted { wave } => tracing::info!(wave, "wave completed"),
                Event::PhaseChanged { phase } if phase.is_terminal() => {
                    tracing::info!(?phase, "game over");
                }
                other => tracing::trace!(event = ?other),
            }
        }
    }

    /// Renders the end-of-run tallies.
    pub(crate) fn summary(&self) -> String {
        let statistics = query::statistics(&self.world);
        let mut lines = vec![
            format!("phase: {:?}", query::phase(&self.world)),
            format!(
                "wave: {} of {}",
                query::wave(&self.world),
                query::final_wave(&self.world)
            ),
            format!("health: {}", query::player_health(&self.world)),
            format!("spice: {}", query::spice(&self.world)),
        ];
        for kind in TowerKind::ALL {
            lines.push(format!(
                "{kind:?}: built {}, wrecked {}",
                statistics.towers_built.get(kind),
                statistics.towers_destroyed_by_summon.get(kind)
            ));
        }
        for species in Species::ALL {
            lines.push(format!(
                "{species:?}: killed by towers {}, swallowed {}, escaped {}",
                statistics.killed_by_tower.get(species),
                statistics.killed_by_summon.get(species),
                statistics.reached_end.get(species)
            ));
        }
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}
