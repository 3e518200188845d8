//! Phase transitions, target bookkeeping and re-planning for the run controller.

use super::*;
use crate::flood::flood_fill;
use crate::path::{PathError, reconstruct_path};

impl Solver {
    /// Switches phase and installs its flood restriction. Seeking and returning pick their own
    /// targets; a survey expects `targets` to be filled in already.
    pub(super) fn enter_phase(&mut self, phase: Phase) {
        let from = self.phase;
        self.phase = phase;
        match phase {
            Phase::SeekingGoal => {
                self.targets = self.goal.clone();
                self.visited_only = false;
            }
            Phase::Surveying => self.visited_only = true,
            // Returning stays on observed edges; the agent's own trail always leads home.
            Phase::Returning => {
                self.targets = vec![self.start];
                self.visited_only = true;
            }
            Phase::Finished => {
                self.targets.clear();
                self.plan.clear();
                self.visited_only = false;
            }
        }
        if from != phase {
            self.log.push(SolverEvent::PhaseChanged { from, to: phase });
        }
    }

    /// Consumes targets at the agent's cell and moves through as many phases as that
    /// completes, then re-plans if anything changed or `reason` asks for it.
    pub(super) fn settle(&mut self, mut reason: Option<ReplanReason>) {
        loop {
            if self.halted.is_some() || self.phase == Phase::Finished {
                return;
            }
            if self.consume_targets() {
                reason = Some(ReplanReason::TargetReached);
            }
            if self.targets.is_empty() {
                self.advance_phase();
                reason = Some(ReplanReason::PhaseChanged);
                continue;
            }
            if let Some(reason) = reason {
                self.replan(reason);
            }
            return;
        }
    }

    /// Any goal cell ends the seek and the start cell ends the return. Survey targets are
    /// checked off one by one, along with any that other observations already covered.
    fn consume_targets(&mut self) -> bool {
        let before = self.targets.len();
        let cell = self.cell;
        let arrived = self.targets.contains(&cell);
        match self.phase {
            Phase::SeekingGoal | Phase::Returning if arrived => self.targets.clear(),
            Phase::Surveying => {
                let graph = &self.graph;
                self.targets.retain(|target| *target != cell && !graph.is_cell_explored(*target));
            }
            _ => {}
        }
        if arrived {
            self.log.push(SolverEvent::TargetReached { cell, remaining: self.targets.len() });
        }
        self.targets.len() < before
    }

    fn advance_phase(&mut self) {
        match self.phase {
            Phase::SeekingGoal if self.config.survey => self.begin_survey(),
            Phase::SeekingGoal | Phase::Surveying => self.enter_phase(Phase::Returning),
            Phase::Returning => self.complete_cycle(),
            Phase::Finished => {}
        }
    }

    /// Plans the way home under current knowledge and targets every unobserved cell on it, so
    /// the next seek can trust that route.
    fn begin_survey(&mut self) {
        self.survey_edges.clear();
        if self.cell == self.start {
            self.enter_phase(Phase::Returning);
            return;
        }
        flood_fill(&mut self.graph, &[self.start], false);
        let route = match reconstruct_path(&self.graph, self.cell) {
            Ok(route) => route,
            Err(PathError::InvalidDirection { edge }) => {
                self.log.push(SolverEvent::InvalidDirection { edge });
                Vec::new()
            }
        };

        let mut cells: Vec<Coord> = Vec::new();
        let mut cell = self.cell;
        for edge in route {
            let Some(next) = edge.cells().into_iter().find(|c| *c != cell) else {
                break;
            };
            if !self.graph.is_visited(edge) {
                self.survey_edges.push(edge);
                for candidate in [cell, next] {
                    if candidate != self.start
                        && !cells.contains(&candidate)
                        && !self.graph.is_cell_explored(candidate)
                    {
                        cells.push(candidate);
                    }
                }
            }
            cell = next;
        }

        if cells.is_empty() {
            self.enter_phase(Phase::Returning);
        } else {
            self.targets = cells;
            self.enter_phase(Phase::Surveying);
        }
    }

    fn complete_cycle(&mut self) {
        self.stats.proven_route = self.graph.proven_distance(self.start, &self.goal);
        let stats = self.stats;
        self.history.push(stats);
        self.log.push(SolverEvent::CycleCompleted { cycle: self.cycle, stats });
        self.cycle += 1;
        self.stats = CycleStats::default();

        // A cycle that never moved cannot learn anything, so repeating it would spin forever.
        let moved = stats.seek_steps + stats.return_steps > 0;
        if moved && self.cycle < self.config.max_cycles {
            self.enter_phase(Phase::SeekingGoal);
        } else {
            self.enter_phase(Phase::Finished);
        }
    }

    /// Floods from the current targets and rebuilds the plan from the agent's cell.
    pub(super) fn replan(&mut self, reason: ReplanReason) {
        if self.halted.is_some() || self.phase == Phase::Finished {
            return;
        }

        let report = flood_fill(&mut self.graph, &self.targets, self.visited_only);
        for edge in report.invalid {
            self.log.push(SolverEvent::InvalidDirection { edge });
        }
        let route = match reconstruct_path(&self.graph, self.cell) {
            Ok(route) => route,
            Err(PathError::InvalidDirection { edge }) => {
                self.log.push(SolverEvent::InvalidDirection { edge });
                self.halt(EngineFailure::InvalidDirection);
                return;
            }
        };

        if route.is_empty() {
            if self.phase == Phase::Surveying {
                self.log.push(SolverEvent::SurveyAbandoned { remaining: self.targets.len() });
                self.enter_phase(Phase::Returning);
                self.settle(Some(ReplanReason::PhaseChanged));
            } else {
                self.halt(EngineFailure::Unreachable);
            }
            return;
        }

        self.plan = route.into_iter().rev().collect();
        self.stats.replans += 1;
        self.log.push(SolverEvent::Replanned { reason, plan_len: self.plan.len() });
    }
}
