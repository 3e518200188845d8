//! Shared fixtures and invariant checks for the unit test suites.
//! This module exists to avoid repeating maze setup and graph walks across many tests.
//! It does not own production solver logic.

use std::collections::{BTreeSet, VecDeque};

use crate::direction::candidate_edges;
use crate::graph::{EdgeGraph, cell_edges};
use crate::maze::{Maze, WallMap};
use crate::types::{Coord, EdgeId};

/// Knowledge graph that already knows every wall of `maze` and has observed every edge.
pub(crate) fn fully_known_graph(maze: &Maze) -> EdgeGraph {
    let mut graph = EdgeGraph::new(maze.cols(), maze.rows());
    let ids: Vec<EdgeId> = graph.iter().map(|(id, _)| id).collect();
    for id in ids {
        graph.mark_visited(id);
        if maze.wall_at(id) {
            graph.mark_wall(id);
        }
    }
    graph
}

/// 16×16 layout with only the outer boundary walled.
pub(crate) fn open_sixteen() -> Maze {
    Maze::new(16, 16)
}

/// A 6×4 layout whose only route from the left half to the right half runs through the
/// bottom row.
///
/// ```text
/// +---+---+---+---+---+---+
/// | S         |           |
/// +   +   +   +   +   +   +
/// |           |           |
/// +   +   +   +   +   +   +
/// |           |           |
/// +   +   +   +   +   +   +
/// |                       |
/// +---+---+---+---+---+---+
/// ```
pub(crate) fn dividing_wall_maze() -> Maze {
    let mut maze = Maze::new(6, 4);
    maze.set_walls(Coord::new(3, 0), Coord::new(3, 3), true);
    maze
}

fn is_open(graph: &EdgeGraph, id: EdgeId, visited_only: bool) -> bool {
    graph.edge(id).is_some_and(|edge| !edge.wall_known && (!visited_only || edge.visited))
}

/// Cells connected to `targets` through open edges under the same admission rules the
/// flood uses, computed with a plain cell-level breadth-first search.
pub(crate) fn reachable_cells(
    graph: &EdgeGraph,
    targets: &[Coord],
    visited_only: bool,
) -> BTreeSet<Coord> {
    let mut seen: BTreeSet<Coord> =
        targets.iter().copied().filter(|cell| graph.contains_cell(*cell)).collect();
    let mut queue: VecDeque<Coord> = seen.iter().copied().collect();
    while let Some(cell) = queue.pop_front() {
        for id in cell_edges(cell) {
            if !is_open(graph, id, visited_only) {
                continue;
            }
            for next in id.cells() {
                if graph.contains_cell(next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    seen
}

/// Every valued non-seed edge must have a neighbour holding exactly its value minus the
/// transition cost between them.
pub(crate) fn assert_monotone(graph: &EdgeGraph) {
    for (id, edge) in graph.iter() {
        let Some(value) = edge.flood_value else {
            continue;
        };
        if value == 0 {
            continue;
        }
        let back = edge.approach.normalize().expect("valued edges have a direction").reverse();
        let has_parent = candidate_edges(back).expect("cardinal").iter().any(|candidate| {
            let neighbour = candidate.edge_from(id);
            let cost = if neighbour.orientation == id.orientation { 3 } else { 2 };
            graph.flood_value(neighbour).is_some_and(|n| n + cost == value)
        });
        assert!(has_parent, "{id:?} with value {value} has no parent");
    }
}

/// Consecutive plan entries must be candidate-adjacent with strictly decreasing values.
pub(crate) fn assert_plan_valid(graph: &EdgeGraph, plan: &[EdgeId]) {
    for pair in plan.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let back = graph
            .edge(from)
            .and_then(|edge| edge.approach.normalize().ok())
            .expect("plan edges have a direction")
            .reverse();
        let adjacent = candidate_edges(back)
            .expect("cardinal")
            .iter()
            .any(|candidate| candidate.edge_from(from) == to);
        assert!(adjacent, "{from:?} -> {to:?} is not a candidate step");
        assert!(
            graph.flood_value(to) < graph.flood_value(from),
            "{from:?} -> {to:?} does not descend"
        );
    }
}
