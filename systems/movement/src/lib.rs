#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that walks hostile units along the active path.
//!
//! Travel distance is consumed segment by segment, so a unit fast enough to
//! cross several waypoints in one tick visits each of them in order instead of
//! cutting corners. Units always snap exactly onto waypoints, which keeps every
//! position on the axis-aligned segments that [`next_waypoint`] understands.

use spice_defence_core::{Direction, Event, HostileUnit, Transform};
use spice_defence_system_navigation::{next_waypoint, Path};

/// Pure system that advances the live roster once per tick.
#[derive(Debug, Default)]
pub struct Movement;

impl Movement {
    /// Creates the movement system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Moves every living unit along `path` by `dt` seconds of travel and
    /// returns how many of them now stand on the final waypoint.
    ///
    /// Dead units stay where they fell so bookkeeping can credit the kill.
    ///
    /// # Panics
    ///
    /// Panics if a living unit stands anywhere that is not on `path`.
    pub fn handle(
        &mut self,
        units: &mut [HostileUnit],
        path: &Path,
        dt: f32,
        out: &mut Vec<Event>,
    ) -> usize {
        let mut arrived = 0;
        for unit in units.iter_mut().filter(|unit| !unit.is_dead()) {
            if move_unit(unit, path, dt, out) {
                arrived += 1;
            }
        }
        arrived
    }
}

/// Advances a single unit along `path`, returning `true` once it stands on the final waypoint.
///
/// An active slow runs down before the travel budget is computed, so a slow
/// that expires this tick no longer applies to it.
///
/// # Panics
///
/// Panics if the unit is not on `path`. Units only ever move along the path
/// they were released onto, so this signals desynchronised state.
pub fn move_unit(unit: &mut HostileUnit, path: &Path, dt: f32, out: &mut Vec<Event>) -> bool {
    unit.tick_slow(dt);

    let start = unit.position();
    let mut budget = unit.speed() * dt;
    let arrived = loop {
        let position = unit.position();
        let Some(next) = next_waypoint(path, position) else {
            panic!(
                "unit {} at ({}, {}) is not on the active path",
                unit.id().get(),
                position.x,
                position.y
            );
        };

        let target = next.to_point();
        let remaining = position.distance(target);
        if remaining <= 0.0 {
            break true;
        }

        let Some(direction) = Direction::from_vector(target - position) else {
            break true;
        };
        unit.set_facing(direction);

        if budget >= remaining {
            unit.set_position(target);
            budget -= remaining;
            if budget <= 0.0 {
                break path.last() == Some(next);
            }
        } else {
            unit.set_position(position + direction.unit_vector() * budget);
            break false;
        }
    };

    if unit.position() != start {
        out.push(Event::UnitUpdated {
            unit: unit.id(),
            transform: Transform::new(unit.position(), unit.facing().rotation()),
        });
    }
    arrived
}

#[cfg(test)]
mod tests {
    use super::*;
    use spice_defence_core::{CellCoord, Species, SpeciesProfile, UnitId, Vec2};

    fn runner(speed: f32) -> HostileUnit {
        HostileUnit::new(
            UnitId::new(3),
            Species::Infantry,
            &SpeciesProfile {
                speed,
                health: 5,
                reward: 1,
                price: 1,
                max_count: None,
                slow_resistance: 0.0,
            },
            Vec2::ZERO,
        )
    }

    fn corridor() -> Path {
        Path::new(vec![
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
            CellCoord::new(2, 0),
        ])
    }

    #[test]
    fn partial_step_stays_on_segment() {
        let mut unit = runner(1.0);
        let mut out = Vec::new();
        assert!(!move_unit(&mut unit, &corridor(), 0.25, &mut out));
        assert_eq!(unit.position(), Vec2::new(0.25, 0.0));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn standing_on_final_waypoint_is_idle() {
        let mut unit = runner(1.0);
        unit.set_position(Vec2::new(2.0, 0.0));
        let mut out = Vec::new();
        assert!(move_unit(&mut unit, &corridor(), 1.0, &mut out));
        assert!(out.is_empty());
    }

    #[test]
    #[should_panic(expected = "not on the active path")]
    fn off_path_unit_panics() {
        let mut unit = runner(1.0);
        unit.set_position(Vec2::new(0.5, 0.5));
        let _ = move_unit(&mut unit, &corridor(), 1.0, &mut Vec::new());
    }
}
