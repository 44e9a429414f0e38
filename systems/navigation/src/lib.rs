#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Connectivity graph and shortest-path search between the two portals.
//!
//! The graph holds one node per cell and an undirected edge between every
//! pair of orthogonally adjacent cells, except where either endpoint holds a
//! tower. Portals never block. Because every edge costs the same, the A*
//! search below returns a path with the fewest possible steps.

mod waypoint;

use std::{cmp::Reverse, collections::BinaryHeap};

use spice_defence_core::{CellCoord, Grid, SimError};

pub use waypoint::{next_waypoint, Path};

/// Undirected 4-connected graph over the cells of a grid.
#[derive(Clone, Debug)]
pub struct Graph {
    width: u32,
    height: u32,
    edges: Vec<[Option<usize>; 4]>,
}

impl Graph {
    /// Builds a graph over a `width` x `height` field, omitting every edge that
    /// touches a cell for which `is_blocked` returns `true`.
    pub fn with_blocked<F>(width: u32, height: u32, is_blocked: F) -> Result<Self, SimError>
    where
        F: FnMut(CellCoord) -> bool,
    {
        if width == 0 || height == 0 {
            return Err(SimError::EmptyGrid);
        }
        Ok(assemble(width, height, is_blocked))
    }

    /// Number of columns covered by the graph.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows covered by the graph.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of nodes, one per cell.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    /// Cells joined to `cell` by an edge, in north, east, south, west order.
    pub fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        let edges = self
            .node(cell)
            .and_then(|node| self.edges.get(node))
            .copied()
            .unwrap_or([None; 4]);
        edges
            .into_iter()
            .flatten()
            .filter_map(move |node| self.coord(node))
    }

    /// Reports whether an edge joins the two cells.
    #[must_use]
    pub fn is_connected(&self, from: CellCoord, to: CellCoord) -> bool {
        self.neighbors(from).any(|neighbor| neighbor == to)
    }

    fn node(&self, cell: CellCoord) -> Option<usize> {
        node_index(self.width, self.height, cell)
    }

    fn coord(&self, node: usize) -> Option<CellCoord> {
        let width = usize::try_from(self.width).ok()?;
        let column = u32::try_from(node % width).ok()?;
        let row = u32::try_from(node / width).ok()?;
        Some(CellCoord::new(column, row))
    }
}

/// Builds the connectivity graph of the grid's current tower layout.
///
/// Debris still blocks: rubble occupies its cell until the end of the wave.
#[must_use]
pub fn build_graph(grid: &Grid) -> Graph {
    assemble(grid.width(), grid.height(), |cell| grid.holds_tower(cell))
}

/// Finds a path with the fewest edges from `start` to `end`.
///
/// Returns a blocked (empty) path when the endpoints are disconnected or lie
/// outside the graph, and a single waypoint when they coincide. Ties between
/// equally short routes are broken deterministically.
#[must_use]
pub fn find_path(graph: &Graph, start: CellCoord, end: CellCoord) -> Path {
    let (Some(start_node), Some(end_node)) = (graph.node(start), graph.node(end)) else {
        return Path::blocked();
    };

    if start_node == end_node {
        return Path::new(vec![start]);
    }

    let node_count = graph.node_count();
    let mut best_cost = vec![u32::MAX; node_count];
    let mut came_from: Vec<Option<usize>> = vec![None; node_count];
    let mut open = BinaryHeap::new();
    let mut sequence: u64 = 0;

    best_cost[start_node] = 0;
    open.push(Reverse((start.manhattan_distance(end), sequence, start_node)));

    while let Some(Reverse((_, _, node))) = open.pop() {
        if node == end_node {
            return reconstruct(graph, &came_from, end_node);
        }

        let cost = best_cost[node];
        for neighbor in graph.edges[node].into_iter().flatten() {
            let tentative = cost.saturating_add(1);
            if tentative >= best_cost[neighbor] {
                continue;
            }

            best_cost[neighbor] = tentative;
            came_from[neighbor] = Some(node);
            let Some(cell) = graph.coord(neighbor) else {
                continue;
            };
            sequence += 1;
            open.push(Reverse((
                tentative.saturating_add(cell.manhattan_distance(end)),
                sequence,
                neighbor,
            )));
        }
    }

    Path::blocked()
}

/// Rebuilds the graph and searches for a route between the grid's portals.
#[must_use]
pub fn portal_path(grid: &Grid) -> Path {
    find_path(&build_graph(grid), grid.start(), grid.end())
}

fn reconstruct(graph: &Graph, came_from: &[Option<usize>], end: usize) -> Path {
    let mut nodes = vec![end];
    let mut current = end;
    while let Some(previous) = came_from[current] {
        nodes.push(previous);
        current = previous;
    }
    nodes.reverse();
    Path::new(nodes.into_iter().filter_map(|node| graph.coord(node)).collect())
}

fn assemble<F>(width: u32, height: u32, mut is_blocked: F) -> Graph
where
    F: FnMut(CellCoord) -> bool,
{
    let cell_count = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
    let mut blocked = Vec::with_capacity(cell_count);
    for row in 0..height {
        for column in 0..width {
            blocked.push(is_blocked(CellCoord::new(column, row)));
        }
    }

    let mut edges = vec![[None; 4]; cell_count];
    for row in 0..height {
        for column in 0..width {
            let cell = CellCoord::new(column, row);
            let Some(node) = node_index(width, height, cell) else {
                continue;
            };
            if blocked[node] {
                continue;
            }

            for (slot, neighbor) in neighbors(cell, width, height).into_iter().enumerate() {
                let Some(neighbor) = neighbor.and_then(|n| node_index(width, height, n)) else {
                    continue;
                };
                if !blocked[neighbor] {
                    edges[node][slot] = Some(neighbor);
                }
            }
        }
    }

    Graph {
        width,
        height,
        edges,
    }
}

fn neighbors(cell: CellCoord, width: u32, height: u32) -> [Option<CellCoord>; 4] {
    let north = cell
        .row()
        .checked_sub(1)
        .map(|row| CellCoord::new(cell.column(), row));
    let east = cell
        .column()
        .checked_add(1)
        .filter(|column| *column < width)
        .map(|column| CellCoord::new(column, cell.row()));
    let south = cell
        .row()
        .checked_add(1)
        .filter(|row| *row < height)
        .map(|row| CellCoord::new(cell.column(), row));
    let west = cell
        .column()
        .checked_sub(1)
        .map(|column| CellCoord::new(column, cell.row()));
    [north, east, south, west]
}

fn node_index(width: u32, height: u32, cell: CellCoord) -> Option<usize> {
    if cell.column() >= width || cell.row() >= height {
        return None;
    }
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    let width = usize::try_from(width).ok()?;
    row.checked_mul(width)?.checked_add(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_area_is_rejected() {
        assert_eq!(
            Graph::with_blocked(0, 3, |_| false).err(),
            Some(SimError::EmptyGrid)
        );
    }

    #[test]
    fn blocked_cells_lose_every_edge() {
        let wall = CellCoord::new(1, 1);
        let graph = Graph::with_blocked(3, 3, |cell| cell == wall).expect("non-empty");

        assert_eq!(graph.neighbors(wall).count(), 0);
        assert!(!graph.is_connected(CellCoord::new(1, 0), wall));
        assert!(graph.is_connected(CellCoord::new(0, 0), CellCoord::new(1, 0)));
        assert_eq!(
            graph.neighbors(CellCoord::new(1, 0)).collect::<Vec<_>>(),
            vec![CellCoord::new(2, 0), CellCoord::new(0, 0)]
        );
    }

    #[test]
    fn open_field_path_has_manhattan_length() {
        let graph = Graph::with_blocked(4, 3, |_| false).expect("non-empty");
        let path = find_path(&graph, CellCoord::new(0, 0), CellCoord::new(3, 2));
        assert_eq!(path.len(), 6);
        assert_eq!(path.first(), Some(CellCoord::new(0, 0)));
        assert_eq!(path.last(), Some(CellCoord::new(3, 2)));
    }

    #[test]
    fn coincident_endpoints_yield_single_waypoint() {
        let graph = Graph::with_blocked(2, 2, |_| false).expect("non-empty");
        let cell = CellCoord::new(1, 0);
        assert_eq!(find_path(&graph, cell, cell).waypoints(), &[cell]);
    }

    #[test]
    fn detours_around_walls() {
        // . # .
        // . # .
        // . . .
        let walls = [CellCoord::new(1, 0), CellCoord::new(1, 1)];
        let graph = Graph::with_blocked(3, 3, |cell| walls.contains(&cell)).expect("non-empty");
        let path = find_path(&graph, CellCoord::new(0, 0), CellCoord::new(2, 0));
        assert_eq!(path.len(), 7);
        assert!(path.waypoints().iter().all(|cell| !walls.contains(cell)));
    }

    #[test]
    fn disconnected_endpoints_yield_blocked_path() {
        let graph =
            Graph::with_blocked(3, 3, |cell| cell.column() == 1).expect("non-empty");
        let path = find_path(&graph, CellCoord::new(0, 0), CellCoord::new(2, 2));
        assert!(path.is_blocked());
        assert!(find_path(&graph, CellCoord::new(9, 9), CellCoord::new(0, 0)).is_blocked());
    }

    #[test]
    fn search_is_deterministic() {
        let graph = Graph::with_blocked(6, 6, |cell| cell == CellCoord::new(2, 2))
            .expect("non-empty");
        let first = find_path(&graph, CellCoord::new(0, 0), CellCoord::new(5, 5));
        let second = find_path(&graph, CellCoord::new(0, 0), CellCoord::new(5, 5));
        assert_eq!(first, second);
    }
}
