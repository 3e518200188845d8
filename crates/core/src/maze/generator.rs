//! Seeded layout generation for drivers and property tests.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use super::{Maze, goal_cells};
use crate::graph::cell_edges;
use crate::types::{Coord, EdgeId};

pub(super) fn generate(cols: usize, rows: usize, seed: u64, extra_openings: usize) -> Maze {
    let mut maze = Maze::new(cols, rows);
    maze.horizontal.fill(true);
    maze.vertical.fill(true);
    if cols == 0 || rows == 0 {
        return maze;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    carve_spanning_tree(&mut maze, &mut rng);
    open_goal_area(&mut maze);

    let interior = interior_edges(cols, rows);
    for _ in 0..extra_openings {
        if interior.is_empty() {
            break;
        }
        let edge = interior[pick(&mut rng, interior.len())];
        maze.set_wall(edge, false);
    }
    maze
}

/// Randomized depth-first carving: every cell ends up reachable from every other.
fn carve_spanning_tree(maze: &mut Maze, rng: &mut ChaCha8Rng) {
    let (cols, rows) = (maze.cols, maze.rows);
    let mut seen = vec![false; cols * rows];
    let mut stack = vec![Coord::new(0, 0)];
    seen[0] = true;

    while let Some(&cell) = stack.last() {
        let [top, bottom, left, right] = cell_edges(cell);
        let exits = [
            (cell.offset(0, -1), top),
            (cell.offset(0, 1), bottom),
            (cell.offset(-1, 0), left),
            (cell.offset(1, 0), right),
        ];
        let unseen: Vec<(Coord, EdgeId)> = exits
            .into_iter()
            .filter(|(next, _)| {
                maze.contains_cell(*next) && !seen[next.y as usize * cols + next.x as usize]
            })
            .collect();

        if unseen.is_empty() {
            stack.pop();
            continue;
        }
        let (next, wall) = unseen[pick(rng, unseen.len())];
        maze.set_wall(wall, false);
        seen[next.y as usize * cols + next.x as usize] = true;
        stack.push(next);
    }
    debug_assert!(seen.iter().all(|cell| *cell) || rows * cols == 0);
}

fn open_goal_area(maze: &mut Maze) {
    let goal = goal_cells(maze.cols, maze.rows);
    for a in &goal {
        for b in &goal {
            let shared = cell_edges(*a).into_iter().find(|edge| cell_edges(*b).contains(edge));
            if a != b
                && let Some(edge) = shared
            {
                maze.set_wall(edge, false);
            }
        }
    }
}

fn interior_edges(cols: usize, rows: usize) -> Vec<EdgeId> {
    let mut edges = Vec::new();
    for y in 1..rows as i32 {
        for x in 0..cols as i32 {
            edges.push(EdgeId::horizontal(x, y));
        }
    }
    for y in 0..rows as i32 {
        for x in 1..cols as i32 {
            edges.push(EdgeId::vertical(x, y));
        }
    }
    edges
}

fn pick(rng: &mut ChaCha8Rng, len: usize) -> usize {
    (rng.next_u64() % len as u64) as usize
}
