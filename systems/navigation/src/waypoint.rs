//! Waypoint path representation and path following.

use spice_defence_core::{CellCoord, Vec2};

/// Ordered waypoints from the start portal to the end portal.
///
/// Consecutive waypoints are orthogonally adjacent. An empty path means the
/// portals are disconnected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    waypoints: Vec<CellCoord>,
}

impl Path {
    /// Wraps an ordered waypoint list.
    #[must_use]
    pub fn new(waypoints: Vec<CellCoord>) -> Self {
        Self { waypoints }
    }

    /// Path signalling that no route exists.
    #[must_use]
    pub fn blocked() -> Self {
        Self::default()
    }

    /// Reports whether no route exists.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Number of waypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Alias of [`Path::is_blocked`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Waypoints in travel order.
    #[must_use]
    pub fn waypoints(&self) -> &[CellCoord] {
        &self.waypoints
    }

    /// First waypoint, the start portal.
    #[must_use]
    pub fn first(&self) -> Option<CellCoord> {
        self.waypoints.first().copied()
    }

    /// Final waypoint, the end portal.
    #[must_use]
    pub fn last(&self) -> Option<CellCoord> {
        self.waypoints.last().copied()
    }

    /// Reports whether `cell` is one of the waypoints.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.waypoints.contains(&cell)
    }
}

/// Finds the waypoint a traveller at `position` should head for next.
///
/// The position must sit exactly on a waypoint or on the axis-aligned segment
/// between two consecutive waypoints. The final waypoint answers itself so the
/// traveller knows to stop. Any other position, including one between a
/// diagonal pair, yields `None`.
#[must_use]
pub fn next_waypoint(path: &Path, position: Vec2) -> Option<CellCoord> {
    let waypoints = path.waypoints();

    for (index, waypoint) in waypoints.iter().enumerate() {
        if waypoint.to_point() == position {
            return waypoints.get(index + 1).or(Some(waypoint)).copied();
        }
    }

    waypoints
        .windows(2)
        .find(|pair| lies_between(pair[0].to_point(), pair[1].to_point(), position))
        .map(|pair| pair[1])
}

fn lies_between(from: Vec2, to: Vec2, position: Vec2) -> bool {
    let strictly_inside = |a: f32, b: f32, value: f32| a.min(b) < value && value < a.max(b);

    if from.x == to.x && position.x == from.x {
        return strictly_inside(from.y, to.y, position.y);
    }
    if from.y == to.y && position.y == from.y {
        return strictly_inside(from.x, to.x, position.x);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shaped() -> Path {
        Path::new(vec![
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
            CellCoord::new(1, 1),
            CellCoord::new(1, 2),
        ])
    }

    #[test]
    fn on_waypoint_heads_for_successor() {
        let path = l_shaped();
        assert_eq!(
            next_waypoint(&path, Vec2::new(1.0, 0.0)),
            Some(CellCoord::new(1, 1))
        );
    }

    #[test]
    fn between_waypoints_heads_for_later_one() {
        let path = l_shaped();
        assert_eq!(
            next_waypoint(&path, Vec2::new(0.25, 0.0)),
            Some(CellCoord::new(1, 0))
        );
        assert_eq!(
            next_waypoint(&path, Vec2::new(1.0, 1.5)),
            Some(CellCoord::new(1, 2))
        );
    }

    #[test]
    fn final_waypoint_answers_itself() {
        let path = l_shaped();
        assert_eq!(
            next_waypoint(&path, Vec2::new(1.0, 2.0)),
            Some(CellCoord::new(1, 2))
        );
    }

    #[test]
    fn off_path_positions_are_reported() {
        let path = l_shaped();
        assert_eq!(next_waypoint(&path, Vec2::new(0.5, 0.5)), None);
        assert_eq!(next_waypoint(&path, Vec2::new(1.0, 2.5)), None);
        assert_eq!(next_waypoint(&Path::blocked(), Vec2::ZERO), None);
    }

    #[test]
    fn diagonal_pairs_are_not_resolved() {
        let path = Path::new(vec![CellCoord::new(0, 0), CellCoord::new(1, 1)]);
        assert_eq!(next_waypoint(&path, Vec2::new(0.5, 0.5)), None);
    }
}
