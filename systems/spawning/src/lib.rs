#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system that releases queued units onto the playfield.

use spice_defence_core::{Config, Event, HostileUnit, Transform};
use spice_defence_system_wave_generation::WaveQueue;

/// Pure system that throttles the release of a wave's queue.
///
/// Units leave the queue one release delay apart. Elapsed time accumulates
/// across ticks, so an oversized tick releases every unit whose slot has
/// passed.
#[derive(Clone, Debug, PartialEq)]
pub struct Spawning {
    release_delay: f32,
    release_delay_factor: f32,
    accumulator: f32,
}

impl Spawning {
    /// Creates a new spawning system using the first wave's release delay.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            release_delay: config.spawn_release_delay,
            release_delay_factor: config.release_delay_factor,
            accumulator: 0.0,
        }
    }

    /// Seconds between two releases in the current wave.
    #[must_use]
    pub const fn release_delay(&self) -> f32 {
        self.release_delay
    }

    /// Starts a wave by releasing its first unit straight away.
    pub fn begin_wave(
        &mut self,
        queue: &mut WaveQueue,
        roster: &mut Vec<HostileUnit>,
        out: &mut Vec<Event>,
    ) {
        self.accumulator = self.release_delay;
        self.release(queue, roster, out);
    }

    /// Accumulates `dt` and releases every unit whose slot has been reached.
    pub fn handle(
        &mut self,
        queue: &mut WaveQueue,
        roster: &mut Vec<HostileUnit>,
        dt: f32,
        out: &mut Vec<Event>,
    ) {
        if queue.is_empty() {
            self.accumulator = 0.0;
            return;
        }

        self.accumulator += dt;
        self.release(queue, roster, out);
    }

    /// Shortens the release delay for the next wave.
    pub fn shorten(&mut self) {
        self.release_delay *= self.release_delay_factor;
    }

    fn release(
        &mut self,
        queue: &mut WaveQueue,
        roster: &mut Vec<HostileUnit>,
        out: &mut Vec<Event>,
    ) {
        while self.accumulator >= self.release_delay {
            let Some(unit) = queue.pop_front() else {
                self.accumulator = 0.0;
                return;
            };

            self.accumulator -= self.release_delay;
            out.push(Event::UnitShown {
                unit: unit.id(),
                transform: Transform::new(unit.position(), unit.facing().rotation()),
            });
            roster.push(unit);
        }
    }
}
