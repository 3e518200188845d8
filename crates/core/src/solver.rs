//! Run controller: sequences goal seeking, survey and return over a partially known maze.
//! This module exists to own the agent, its knowledge graph and its plan, and to advance them
//! one edge per step against a ground-truth `WallMap`.
//! It does not own the physical maze; callers pass it to every step.

use crate::config::{ConfigError, SolverConfig, in_grid};
use crate::graph::{EdgeGraph, cell_edges, landing_cell};
use crate::maze::WallMap;
use crate::types::*;

mod diag;
mod hash;
mod planning;
mod sensing;

/// Upper bound on replans inside one step before the plan is declared exhausted.
const MAX_REPLANS_PER_STEP: u32 = 8;

pub struct Solver {
    config: SolverConfig,
    graph: EdgeGraph,
    start: Coord,
    cell: Coord,
    goal: Vec<Coord>,
    targets: Vec<Coord>,
    visited_only: bool,
    phase: Phase,
    // Next edge to cross is last.
    plan: Vec<EdgeId>,
    survey_edges: Vec<EdgeId>,
    halted: Option<EngineFailure>,
    cycle: u32,
    stats: CycleStats,
    history: Vec<CycleStats>,
    steps: u64,
    log: Vec<SolverEvent>,
}

impl Solver {
    pub fn new<M: WallMap>(
        maze: &M,
        start: Coord,
        config: SolverConfig,
    ) -> Result<Self, ConfigError> {
        let (cols, rows) = (maze.cols(), maze.rows());
        config.validate(cols, rows)?;
        if !in_grid(start, cols, rows) {
            return Err(ConfigError::StartOutOfBounds { cell: start });
        }

        let goal = config.goal_cells(cols, rows);
        let mut solver = Self {
            config,
            graph: EdgeGraph::new(cols, rows),
            start,
            cell: start,
            goal: goal.clone(),
            targets: goal,
            visited_only: false,
            phase: Phase::SeekingGoal,
            plan: Vec::new(),
            survey_edges: Vec::new(),
            halted: None,
            cycle: 0,
            stats: CycleStats::default(),
            history: Vec::new(),
            steps: 0,
            log: Vec::new(),
        };
        solver.settle(Some(ReplanReason::Reset));
        Ok(solver)
    }

    /// Forgets every wall and observation and starts seeking again from `start`.
    pub fn reset(&mut self, start: Coord) -> Result<(), ConfigError> {
        if !self.graph.contains_cell(start) {
            return Err(ConfigError::StartOutOfBounds { cell: start });
        }
        self.graph.clear_knowledge();
        self.start = start;
        self.history.clear();
        self.log.clear();
        self.steps = 0;
        self.restart();
        Ok(())
    }

    /// Returns the agent to start and seeks again, keeping everything learned so far.
    pub fn soft_reset(&mut self) {
        self.restart();
    }

    fn restart(&mut self) {
        self.cell = self.start;
        self.cycle = 0;
        self.stats = CycleStats::default();
        self.halted = None;
        self.survey_edges.clear();
        self.plan.clear();
        self.enter_phase(Phase::SeekingGoal);
        self.settle(Some(ReplanReason::Reset));
    }

    /// Crosses one edge of the current plan, re-planning first if knowledge invalidated it.
    pub fn step<M: WallMap>(&mut self, maze: &M) -> StepOutcome {
        if let Some(reason) = self.halted {
            return StepOutcome::Halted(reason);
        }
        if self.phase == Phase::Finished {
            return StepOutcome::Finished;
        }

        if self.sense(maze) {
            self.settle(Some(ReplanReason::WallDiscovered));
        }

        let from = self.cell;
        let mut replans = 0;
        let (edge, to) = loop {
            if let Some(reason) = self.halted {
                return StepOutcome::Halted(reason);
            }
            if self.phase == Phase::Finished {
                return StepOutcome::Finished;
            }
            if replans > MAX_REPLANS_PER_STEP {
                return self.halt(EngineFailure::PlanExhausted);
            }
            let Some(edge) = self.plan.pop() else {
                return self.halt(EngineFailure::PlanExhausted);
            };

            if !cell_edges(self.cell).contains(&edge) {
                replans += 1;
                self.replan(ReplanReason::StalePlan);
                continue;
            }
            let Some(cardinal) = self.graph.edge(edge).and_then(|e| e.approach.normalize().ok())
            else {
                self.log.push(SolverEvent::InvalidDirection { edge });
                return self.halt(EngineFailure::InvalidDirection);
            };
            let Some(to) = landing_cell(edge, cardinal.reverse())
                .filter(|cell| *cell != from && self.graph.contains_cell(*cell))
            else {
                replans += 1;
                self.replan(ReplanReason::StalePlan);
                continue;
            };
            if maze.wall_at(edge) || self.graph.is_wall_known(edge) {
                self.record_wall(edge);
                replans += 1;
                self.replan(ReplanReason::WallDiscovered);
                continue;
            }
            break (edge, to);
        };

        self.graph.mark_visited(edge);
        self.cell = to;
        self.steps += 1;
        match self.phase {
            Phase::SeekingGoal => self.stats.seek_steps += 1,
            Phase::Surveying | Phase::Returning => self.stats.return_steps += 1,
            Phase::Finished => {}
        }

        let blocked = self.sense(maze);
        self.settle(blocked.then_some(ReplanReason::WallDiscovered));
        StepOutcome::Moved { from, to }
    }

    /// Steps until the run finishes, halts or `max_steps` moves have been made.
    pub fn advance<M: WallMap>(&mut self, maze: &M, max_steps: u32) -> AdvanceResult {
        let mut steps = 0;
        while steps < max_steps {
            match self.step(maze) {
                StepOutcome::Moved { .. } => steps += 1,
                StepOutcome::Finished => {
                    return AdvanceResult { steps, stop_reason: AdvanceStopReason::Finished };
                }
                StepOutcome::Halted(reason) => {
                    return AdvanceResult { steps, stop_reason: AdvanceStopReason::Halted(reason) };
                }
            }
        }
        let stop_reason = match (self.phase, self.halted) {
            (_, Some(reason)) => AdvanceStopReason::Halted(reason),
            (Phase::Finished, None) => AdvanceStopReason::Finished,
            _ => AdvanceStopReason::BudgetExhausted,
        };
        AdvanceResult { steps, stop_reason }
    }

    fn halt(&mut self, reason: EngineFailure) -> StepOutcome {
        if self.halted.is_none() {
            self.halted = Some(reason);
            self.plan.clear();
            self.log.push(SolverEvent::Halted { reason });
        }
        StepOutcome::Halted(reason)
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn halted(&self) -> Option<EngineFailure> {
        self.halted
    }

    pub fn cell(&self) -> Coord {
        self.cell
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn goal(&self) -> &[Coord] {
        &self.goal
    }

    pub fn targets(&self) -> &[Coord] {
        &self.targets
    }

    /// The remaining plan, next edge first.
    pub fn planned_route(&self) -> Vec<EdgeId> {
        self.plan.iter().rev().copied().collect()
    }

    /// Unobserved edges found on the route home when the last survey was planned.
    pub fn survey_edges(&self) -> &[EdgeId] {
        &self.survey_edges
    }

    pub fn graph(&self) -> &EdgeGraph {
        &self.graph
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Statistics of the cycle in progress.
    pub fn current_stats(&self) -> CycleStats {
        self.stats
    }

    /// Statistics of every completed cycle since the last hard reset.
    pub fn history(&self) -> &[CycleStats] {
        &self.history
    }

    pub fn total_steps(&self) -> u64 {
        self.steps
    }

    pub fn log(&self) -> &[SolverEvent] {
        &self.log
    }
}

#[cfg(test)]
mod tests;
