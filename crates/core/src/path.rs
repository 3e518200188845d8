//! Greedy descent through a finished flood, from the agent's cell toward a target.

use std::error::Error;
use std::fmt;

use crate::direction::candidate_edges;
use crate::graph::{Edge, EdgeGraph, cell_edges};
use crate::types::{Coord, EdgeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathError {
    /// A valued edge on the descent had no approach direction.
    InvalidDirection { edge: EdgeId },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDirection { edge } => {
                write!(f, "edge {edge:?} carries a flood value without a direction")
            }
        }
    }
}

impl Error for PathError {}

/// The cheapest valued edge around `cell`, first in `cell_edges` order on ties.
pub fn path_head(graph: &EdgeGraph, cell: Coord) -> Option<EdgeId> {
    let mut best: Option<(EdgeId, u32)> = None;
    for id in cell_edges(cell) {
        let Some(value) = graph.flood_value(id) else {
            continue;
        };
        if best.is_none_or(|(_, best_value)| value < best_value) {
            best = Some((id, value));
        }
    }
    best.map(|(id, _)| id)
}

/// Edges to cross from `cell`, head first, ending on a target-cell edge. Empty when the flood
/// never reached `cell`.
///
/// Each step first looks for a cheaper neighbour that continues the current heading, then
/// falls back to the cheapest neighbour overall, preferring the longer straight run on ties.
pub fn reconstruct_path(graph: &EdgeGraph, cell: Coord) -> Result<Vec<EdgeId>, PathError> {
    let Some(head) = path_head(graph, cell) else {
        return Ok(Vec::new());
    };

    let mut route = Vec::new();
    let mut current = head;
    while let Some(edge) = graph.edge(current).copied() {
        route.push(current);
        let Some(value) = edge.flood_value else {
            break;
        };
        match descend(graph, current, edge, value)? {
            Some(next) => current = next,
            None => break,
        }
    }
    Ok(route)
}

fn descend(
    graph: &EdgeGraph,
    id: EdgeId,
    edge: Edge,
    value: u32,
) -> Result<Option<EdgeId>, PathError> {
    let invalid = PathError::InvalidDirection { edge: id };
    let back = edge.approach.normalize().map_err(|_| invalid)?.reverse();
    let candidates = candidate_edges(back).map_err(|_| invalid)?;

    let cheaper: Vec<(EdgeId, Edge, u32)> = candidates
        .iter()
        .filter_map(|candidate| {
            let next = candidate.edge_from(id);
            let neighbour = graph.edge(next).copied()?;
            let next_value = neighbour.flood_value?;
            (next_value < value).then_some((next, neighbour, next_value))
        })
        .collect();

    if let Some((next, _, _)) =
        cheaper.iter().find(|(_, neighbour, _)| neighbour.approach.is_similar(edge.approach))
    {
        return Ok(Some(*next));
    }

    let mut best: Option<(EdgeId, u32, u16)> = None;
    for (next, neighbour, next_value) in cheaper {
        let better = match best {
            None => true,
            Some((_, best_value, best_run)) => {
                next_value < best_value
                    || (next_value == best_value && neighbour.run_length > best_run)
            }
        };
        if better {
            best = Some((next, next_value, neighbour.run_length));
        }
    }
    Ok(best.map(|(next, _, _)| next))
}
