//! Multi-source weighted flood over the known-open edges of the grid.
//! Costs grow outward from the target cells; straight runs are expanded depth-first so a
//! corridor is filled end to end before the breadth-first queue resumes.

use std::collections::VecDeque;

use crate::direction::candidate_edges;
use crate::graph::{EdgeGraph, outward_edges};
use crate::types::{Coord, EdgeId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FloodReport {
    /// Target-cell edges that received cost zero.
    pub seeded: usize,
    /// Edges that received any cost, seeds included.
    pub reached: usize,
    /// Valued edges whose approach direction could not be expanded.
    pub invalid: Vec<EdgeId>,
}

/// Recomputes `flood_value`, `approach` and `run_length` for every edge reachable from
/// `targets`. Every open target edge is seeded; with `visited_only` the flood never expands
/// into an edge the agent has not observed.
pub fn flood_fill(graph: &mut EdgeGraph, targets: &[Coord], visited_only: bool) -> FloodReport {
    graph.clear_flood();

    let mut report = FloodReport::default();
    let mut queue = VecDeque::new();

    for &cell in targets {
        if !graph.contains_cell(cell) {
            continue;
        }
        for (id, outward) in outward_edges(cell) {
            if !is_admissible(graph, id, false) {
                continue;
            }
            if let Some(edge) = graph.edge_mut(id) {
                edge.flood_value = Some(0);
                edge.approach = outward;
                edge.run_length = 0;
                report.seeded += 1;
                queue.push_back(id);
            }
        }
    }
    report.reached = report.seeded;

    while let Some(id) = queue.pop_front() {
        expand_run(graph, id, visited_only, &mut queue, &mut report);
    }

    report
}

/// Expands `origin`, following similar continuations immediately and deferring turns to
/// `queue`.
fn expand_run(
    graph: &mut EdgeGraph,
    origin: EdgeId,
    visited_only: bool,
    queue: &mut VecDeque<EdgeId>,
    report: &mut FloodReport,
) {
    let mut run = vec![origin];

    while let Some(id) = run.pop() {
        let Some(current) = graph.edge(id).copied() else {
            continue;
        };
        let Some(value) = current.flood_value else {
            continue;
        };
        let Ok(candidates) = candidate_edges(current.approach) else {
            report.invalid.push(id);
            continue;
        };

        for candidate in candidates {
            let next = candidate.edge_from(id);
            if !is_admissible(graph, next, visited_only) {
                continue;
            }
            let similar = candidate.direction.is_similar(current.approach);
            let Some(edge) = graph.edge_mut(next) else {
                continue;
            };
            edge.flood_value = Some(value + candidate.cost);
            edge.approach = candidate.direction;
            edge.run_length = if similar { current.run_length.saturating_add(1) } else { 1 };
            report.reached += 1;

            if similar {
                run.push(next);
            } else {
                queue.push_back(next);
            }
        }
    }
}

fn is_admissible(graph: &EdgeGraph, id: EdgeId, visited_only: bool) -> bool {
    match graph.edge(id) {
        Some(edge) => {
            edge.flood_value.is_none() && !edge.wall_known && (!visited_only || edge.visited)
        }
        None => false,
    }
}
