#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure range queries that let towers pick targets from the live roster.
//!
//! A unit is in range when its squared distance to the query centre is at
//! most the squared radius, so units sitting exactly on the boundary count.
//! Dead units are never returned.

use spice_defence_core::{HostileUnit, UnitId, Vec2};

/// Targeting helper that reuses a scratch buffer between queries.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    in_range: Vec<usize>,
}

impl TowerTargeting {
    /// Creates a targeting helper with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Roster indices of every living unit within `range` of `center`, in roster order.
    pub fn collect_in_range(&mut self, center: Vec2, range: f32, units: &[HostileUnit]) -> &[usize] {
        self.in_range.clear();
        self.in_range.extend(in_range(center, range, units));
        &self.in_range
    }
}

/// Iterates the roster indices of living units within `range` of `center`.
pub fn in_range(
    center: Vec2,
    range: f32,
    units: &[HostileUnit],
) -> impl Iterator<Item = usize> + '_ {
    units
        .iter()
        .enumerate()
        .filter(move |(_, unit)| !unit.is_dead() && unit.position().within(center, range))
        .map(|(index, _)| index)
}

/// First living unit discovered within range, in roster order.
#[must_use]
pub fn first_in_range(center: Vec2, range: f32, units: &[HostileUnit]) -> Option<usize> {
    in_range(center, range, units).next()
}

/// Closest living unit within range; equal distances prefer the smaller unit id.
#[must_use]
pub fn closest_in_range(center: Vec2, range: f32, units: &[HostileUnit]) -> Option<usize> {
    let mut best: Option<BestCandidate> = None;

    for index in in_range(center, range, units) {
        let unit = &units[index];
        let current = BestCandidate {
            distance_sq: unit.position().distance_squared(center),
            unit: unit.id(),
            index,
        };

        match &mut best {
            Some(existing) => {
                if current.precedes(existing) {
                    *existing = current;
                }
            }
            None => best = Some(current),
        }
    }

    best.map(|candidate| candidate.index)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BestCandidate {
    distance_sq: f32,
    unit: UnitId,
    index: usize,
}

impl BestCandidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.distance_sq != other.distance_sq {
            return self.distance_sq < other.distance_sq;
        }

        self.unit < other.unit
    }
}
