//! Regression test module wiring for run controller behaviors.

mod diagnostics;

/// Shared imports for run controller regression tests.
mod support {
    pub(super) use super::super::*;
    pub(super) use crate::config::SolverConfig;
    pub(super) use crate::maze::Maze;
    pub(super) use crate::test_support::*;

    pub(super) const RUN_BUDGET: u32 = 20_000;

    pub(super) fn solver_at_origin(maze: &Maze, config: SolverConfig) -> Solver {
        Solver::new(maze, Coord::new(0, 0), config).expect("valid setup")
    }

    pub(super) fn crossed_edge(from: Coord, to: Coord) -> Option<EdgeId> {
        cell_edges(from).into_iter().find(|id| cell_edges(to).contains(id))
    }
}
