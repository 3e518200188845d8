//! Ground-truth wall layout the agent explores.
//! The solver only ever reads it through `WallMap`; editing, persistence and generation live
//! here so drivers and tests can build layouts.

use sha2::{Digest, Sha256};

use crate::types::{Coord, EdgeId, Orientation};

mod file;
mod generator;

pub use file::{MazeFileError, MazeLayout};

/// Read-only wall queries the solver needs from the physical maze.
pub trait WallMap {
    fn cols(&self) -> usize;
    fn rows(&self) -> usize;
    /// Whether a wall stands on `edge`. Slots outside the grid read as walls.
    fn wall_at(&self, edge: EdgeId) -> bool;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    cols: usize,
    rows: usize,
    horizontal: Vec<bool>,
    vertical: Vec<bool>,
}

impl Maze {
    /// An open maze: only the outer boundary is walled.
    pub fn new(cols: usize, rows: usize) -> Self {
        let mut maze = Self {
            cols,
            rows,
            horizontal: vec![false; cols * (rows + 1)],
            vertical: vec![false; (cols + 1) * rows],
        };
        maze.clear();
        maze
    }

    /// Removes every wall except the outer boundary.
    pub fn clear(&mut self) {
        self.horizontal.fill(false);
        self.vertical.fill(false);
        self.wall_boundary();
    }

    pub fn set_wall(&mut self, edge: EdgeId, state: bool) -> bool {
        let Some(index) = self.index(edge) else {
            return false;
        };
        match edge.orientation {
            Orientation::Horizontal => self.horizontal[index] = state,
            Orientation::Vertical => self.vertical[index] = state,
        }
        true
    }

    /// A wall drawn between two corners must be axis-aligned, non-empty, inside the grid and
    /// not lie along the outer boundary.
    pub fn is_wall_valid(&self, from: Coord, to: Coord) -> bool {
        let corners_inside = [from, to].iter().all(|corner| {
            corner.x >= 0
                && corner.y >= 0
                && (corner.x as usize) <= self.cols
                && (corner.y as usize) <= self.rows
        });
        if !corners_inside {
            return false;
        }
        let horizontal =
            from.y == to.y && from.x != to.x && to.y != 0 && to.y as usize != self.rows;
        let vertical = from.x == to.x && from.y != to.y && to.x != 0 && to.x as usize != self.cols;
        horizontal || vertical
    }

    /// Sets every edge along an axis-aligned run of corners. Returns the number of edges set.
    pub fn set_walls(&mut self, from: Coord, to: Coord, state: bool) -> usize {
        let mut changed = 0;
        if from.y == to.y {
            for x in from.x.min(to.x)..from.x.max(to.x) {
                if self.set_wall(EdgeId::horizontal(x, to.y), state) {
                    changed += 1;
                }
            }
        } else if from.x == to.x {
            for y in from.y.min(to.y)..from.y.max(to.y) {
                if self.set_wall(EdgeId::vertical(to.x, y), state) {
                    changed += 1;
                }
            }
        }
        changed
    }

    pub fn wall_count(&self) -> usize {
        self.horizontal.iter().chain(self.vertical.iter()).filter(|wall| **wall).count()
    }

    pub fn contains_cell(&self, cell: Coord) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.cols && (cell.y as usize) < self.rows
    }

    /// Hex SHA-256 of the wall rows in `.maz` encoding. Independent of the start cell.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(file::encode_rows(self).as_bytes());
        let digest = hasher.finalize();
        format!("{digest:064x}")
    }

    /// Seeded perfect maze with the goal area opened up.
    pub fn generate(cols: usize, rows: usize, seed: u64) -> Self {
        generator::generate(cols, rows, seed, 0)
    }

    /// Like `generate`, then removes up to `extra_openings` interior walls to add loops.
    pub fn generate_with_loops(cols: usize, rows: usize, seed: u64, extra_openings: usize) -> Self {
        generator::generate(cols, rows, seed, extra_openings)
    }

    fn wall_boundary(&mut self) {
        for x in 0..self.cols as i32 {
            self.set_wall(EdgeId::horizontal(x, 0), true);
            self.set_wall(EdgeId::horizontal(x, self.rows as i32), true);
        }
        for y in 0..self.rows as i32 {
            self.set_wall(EdgeId::vertical(0, y), true);
            self.set_wall(EdgeId::vertical(self.cols as i32, y), true);
        }
    }

    fn index(&self, edge: EdgeId) -> Option<usize> {
        let Coord { x, y } = edge.corner;
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        match edge.orientation {
            Orientation::Horizontal if x < self.cols && y <= self.rows => Some(y * self.cols + x),
            Orientation::Vertical if x <= self.cols && y < self.rows => {
                Some(y * (self.cols + 1) + x)
            }
            _ => None,
        }
    }
}

impl WallMap for Maze {
    fn cols(&self) -> usize {
        self.cols
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn wall_at(&self, edge: EdgeId) -> bool {
        match (self.index(edge), edge.orientation) {
            (Some(index), Orientation::Horizontal) => self.horizontal[index],
            (Some(index), Orientation::Vertical) => self.vertical[index],
            (None, _) => true,
        }
    }
}

/// The central cells of a grid: 2×2 for even sizes, narrower along odd dimensions.
pub fn goal_cells(cols: usize, rows: usize) -> Vec<Coord> {
    let xs = [(cols.saturating_sub(1) / 2) as i32, (cols / 2) as i32];
    let ys = [(rows.saturating_sub(1) / 2) as i32, (rows / 2) as i32];
    let mut cells = Vec::with_capacity(4);
    for y in ys {
        for x in xs {
            let cell = Coord::new(x, y);
            if !cells.contains(&cell) {
                cells.push(cell);
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_maze_walls_only_the_boundary() {
        let maze = Maze::new(4, 3);
        assert_eq!(maze.wall_count(), 2 * 4 + 2 * 3);
        assert!(maze.wall_at(EdgeId::horizontal(2, 0)));
        assert!(maze.wall_at(EdgeId::horizontal(2, 3)));
        assert!(maze.wall_at(EdgeId::vertical(4, 1)));
        assert!(!maze.wall_at(EdgeId::vertical(2, 1)));
        assert!(maze.wall_at(EdgeId::vertical(9, 1)), "outside reads as wall");
    }

    #[test]
    fn set_walls_covers_the_corner_run_in_either_order() {
        let mut maze = Maze::new(6, 6);
        assert_eq!(maze.set_walls(Coord::new(4, 2), Coord::new(1, 2), true), 3);
        for x in 1..4 {
            assert!(maze.wall_at(EdgeId::horizontal(x, 2)));
        }
        assert_eq!(maze.set_walls(Coord::new(3, 1), Coord::new(3, 5), true), 4);
        assert!(maze.wall_at(EdgeId::vertical(3, 4)));
        assert_eq!(maze.set_walls(Coord::new(3, 1), Coord::new(3, 5), false), 4);
        assert!(!maze.wall_at(EdgeId::vertical(3, 4)));
        assert_eq!(maze.set_walls(Coord::new(0, 0), Coord::new(2, 2), true), 0);
    }

    #[test]
    fn wall_validity_rejects_diagonals_points_and_boundary_runs() {
        let maze = Maze::new(5, 5);
        assert!(maze.is_wall_valid(Coord::new(1, 2), Coord::new(3, 2)));
        assert!(maze.is_wall_valid(Coord::new(2, 1), Coord::new(2, 4)));
        assert!(!maze.is_wall_valid(Coord::new(1, 1), Coord::new(2, 2)));
        assert!(!maze.is_wall_valid(Coord::new(2, 2), Coord::new(2, 2)));
        assert!(!maze.is_wall_valid(Coord::new(0, 0), Coord::new(3, 0)));
        assert!(!maze.is_wall_valid(Coord::new(5, 1), Coord::new(5, 3)));
        assert!(!maze.is_wall_valid(Coord::new(1, 2), Coord::new(7, 2)));
    }

    #[test]
    fn clear_restores_boundary_only() {
        let mut maze = Maze::generate(6, 6, 7);
        assert!(maze.wall_count() > Maze::new(6, 6).wall_count());
        maze.clear();
        assert_eq!(maze, Maze::new(6, 6));
    }

    #[test]
    fn fingerprint_tracks_wall_layout() {
        let open = Maze::new(4, 4);
        let mut walled = open.clone();
        walled.set_wall(EdgeId::vertical(2, 2), true);
        assert_eq!(open.fingerprint(), Maze::new(4, 4).fingerprint());
        assert_ne!(open.fingerprint(), walled.fingerprint());
        assert_eq!(open.fingerprint().len(), 64);
    }

    #[test]
    fn goal_cells_center_on_even_and_odd_grids() {
        assert_eq!(
            goal_cells(16, 16),
            vec![Coord::new(7, 7), Coord::new(8, 7), Coord::new(7, 8), Coord::new(8, 8)]
        );
        assert_eq!(goal_cells(5, 4), vec![Coord::new(2, 1), Coord::new(2, 2)]);
        assert_eq!(goal_cells(1, 1), vec![Coord::new(0, 0)]);
    }
}
