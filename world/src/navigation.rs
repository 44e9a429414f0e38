//! Maintenance of the active path between the portals.

use spice_defence_core::{CellCoord, Event, Grid};
use spice_defence_system_navigation::{portal_path, Path};

/// Route hostile units currently follow.
#[derive(Clone, Debug)]
pub(crate) struct ActivePath {
    path: Path,
}

impl ActivePath {
    /// Searches the grid for its initial route.
    pub(crate) fn compute(grid: &Grid) -> Self {
        Self {
            path: portal_path(grid),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Re-checks connectivity after a tower went up on `cell`.
    ///
    /// A tower off the active path cannot invalidate it, so no search runs.
    /// Returns `false` when the grid no longer connects the portals; the
    /// active path is left untouched in that case.
    pub(crate) fn accommodate(&mut self, grid: &Grid, cell: CellCoord, out: &mut Vec<Event>) -> bool {
        if !self.path.contains(cell) {
            return true;
        }

        let candidate = portal_path(grid);
        if candidate.is_blocked() {
            return false;
        }
        self.replace(candidate, out);
        true
    }

    /// Adopts a fresh route only when it is strictly shorter than the active one.
    pub(crate) fn shorten(&mut self, grid: &Grid, out: &mut Vec<Event>) -> bool {
        let candidate = portal_path(grid);
        if candidate.is_blocked() {
            return false;
        }
        if !self.path.is_blocked() && candidate.len() >= self.path.len() {
            return false;
        }
        self.replace(candidate, out);
        true
    }

    fn replace(&mut self, path: Path, out: &mut Vec<Event>) {
        tracing::debug!(waypoints = path.len(), "active path changed");
        out.push(Event::PathChanged {
            waypoints: path.waypoints().to_vec(),
        });
        self.path = path;
    }
}
