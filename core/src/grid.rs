//! Dense playfield arena owned by the world.

use serde::{Deserialize, Serialize};

use crate::{CellCoord, SimError, Tower};

/// The two fixed portals connected by the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortalKind {
    /// Portal hostile units emerge from, fixed at `(0, 0)`.
    Start,
    /// Portal hostile units head for, fixed at the opposite corner.
    End,
}

/// Contents of a single grid cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    /// Nothing occupies the cell.
    Empty,
    /// One of the two permanent portals.
    Portal(PortalKind),
    /// A tower, possibly reduced to debris.
    Tower(Tower),
}

/// Width x height arena of cells stored in row-major order.
#[derive(Clone, Debug)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an empty grid with both portals in place.
    ///
    /// Each edge must lie within `2..=max_size`.
    pub fn new(width: u32, height: u32, max_size: u32) -> Result<Self, SimError> {
        let valid = |edge: u32| (2..=max_size).contains(&edge);
        if !valid(width) || !valid(height) {
            return Err(SimError::GridDimensions {
                width,
                height,
                max: max_size,
            });
        }

        let capacity = usize::try_from(u64::from(width) * u64::from(height)).map_err(|_| {
            SimError::GridDimensions {
                width,
                height,
                max: max_size,
            }
        })?;

        let mut grid = Self {
            width,
            height,
            cells: vec![Cell::Empty; capacity],
        };
        let start = grid.start();
        let end = grid.end();
        grid.set(start, Cell::Portal(PortalKind::Start));
        grid.set(end, Cell::Portal(PortalKind::End));
        Ok(grid)
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Cell holding the start portal.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        CellCoord::new(0, 0)
    }

    /// Cell holding the end portal.
    #[must_use]
    pub const fn end(&self) -> CellCoord {
        CellCoord::new(self.width - 1, self.height - 1)
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Row-major index of the cell, if it lies inside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        Some(row * width + column)
    }

    /// Coordinate of the cell stored at a row-major index.
    #[must_use]
    pub fn coord(&self, index: usize) -> Option<CellCoord> {
        if index >= self.cells.len() {
            return None;
        }
        let width = usize::try_from(self.width).ok()?;
        let column = u32::try_from(index % width).ok()?;
        let row = u32::try_from(index / width).ok()?;
        Some(CellCoord::new(column, row))
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Grids always hold at least four cells, so this is never `true`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Contents of the cell, if it lies inside the grid.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<&Cell> {
        self.index(cell).and_then(|index| self.cells.get(index))
    }

    /// Reports whether the cell is inside the grid and holds nothing.
    #[must_use]
    pub fn is_free(&self, cell: CellCoord) -> bool {
        matches!(self.cell(cell), Some(Cell::Empty))
    }

    /// Reports whether the cell holds a tower, intact or not.
    #[must_use]
    pub fn holds_tower(&self, cell: CellCoord) -> bool {
        matches!(self.cell(cell), Some(Cell::Tower(_)))
    }

    /// Tower standing on the cell, if any.
    #[must_use]
    pub fn tower(&self, cell: CellCoord) -> Option<&Tower> {
        match self.cell(cell) {
            Some(Cell::Tower(tower)) => Some(tower),
            _ => None,
        }
    }

    /// Mutable access to the tower standing on the cell, if any.
    pub fn tower_mut(&mut self, cell: CellCoord) -> Option<&mut Tower> {
        let index = self.index(cell)?;
        match self.cells.get_mut(index) {
            Some(Cell::Tower(tower)) => Some(tower),
            _ => None,
        }
    }

    /// Puts a tower on its cell. The tower is handed back if the cell is not free.
    pub fn place_tower(&mut self, tower: Tower) -> Result<(), Tower> {
        let cell = tower.cell();
        if !self.is_free(cell) {
            return Err(tower);
        }
        self.set(cell, Cell::Tower(tower));
        Ok(())
    }

    /// Removes and returns the tower standing on the cell.
    pub fn remove_tower(&mut self, cell: CellCoord) -> Option<Tower> {
        if !self.holds_tower(cell) {
            return None;
        }
        let index = self.index(cell)?;
        match std::mem::replace(&mut self.cells[index], Cell::Empty) {
            Cell::Tower(tower) => Some(tower),
            other => {
                self.cells[index] = other;
                None
            }
        }
    }

    /// Removes every debris tower, returning them in row-major order.
    pub fn clear_debris(&mut self) -> Vec<Tower> {
        let debris: Vec<CellCoord> = self
            .towers()
            .filter(|tower| tower.is_debris())
            .map(Tower::cell)
            .collect();
        debris
            .into_iter()
            .filter_map(|cell| self.remove_tower(cell))
            .collect()
    }

    /// Towers in row-major order.
    pub fn towers(&self) -> impl Iterator<Item = &Tower> {
        self.cells.iter().filter_map(|cell| match cell {
            Cell::Tower(tower) => Some(tower),
            _ => None,
        })
    }

    /// Mutable towers in row-major order.
    pub fn towers_mut(&mut self) -> impl Iterator<Item = &mut Tower> {
        self.cells.iter_mut().filter_map(|cell| match cell {
            Cell::Tower(tower) => Some(tower),
            _ => None,
        })
    }

    /// Every cell paired with its coordinate, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &Cell)> {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let index = index as u32;
            (CellCoord::new(index % width, index / width), cell)
        })
    }

    fn set(&mut self, cell: CellCoord, contents: Cell) {
        if let Some(index) = self.index(cell) {
            self.cells[index] = contents;
        }
    }
}
