use serde::{Deserialize, Serialize};

/// A cell or corner on the maze grid. Cells span `0..cols` × `0..rows`,
/// corners span `0..=cols` × `0..=rows`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One wall slot of the grid. A horizontal edge at corner (x, y) is the top wall of
/// cell (x, y); a vertical edge at (x, y) is the left wall of cell (x, y).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId {
    pub orientation: Orientation,
    pub corner: Coord,
}

impl EdgeId {
    pub const fn horizontal(x: i32, y: i32) -> Self {
        Self { orientation: Orientation::Horizontal, corner: Coord::new(x, y) }
    }

    pub const fn vertical(x: i32, y: i32) -> Self {
        Self { orientation: Orientation::Vertical, corner: Coord::new(x, y) }
    }

    /// The two cells this edge separates (either may lie outside the grid).
    pub const fn cells(self) -> [Coord; 2] {
        let Coord { x, y } = self.corner;
        match self.orientation {
            Orientation::Horizontal => [Coord::new(x, y - 1), Coord::new(x, y)],
            Orientation::Vertical => [Coord::new(x - 1, y), Coord::new(x, y)],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    SeekingGoal,
    Surveying,
    Returning,
    Finished,
}

/// Conditions that end the current episode. Stepping halts until the next reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineFailure {
    /// The flood never reached any edge of the agent's cell.
    Unreachable,
    /// The plan ran out before the agent arrived at a target.
    PlanExhausted,
    /// A valued edge carried no approach direction, so no move could be derived from it.
    InvalidDirection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplanReason {
    Reset,
    PhaseChanged,
    TargetReached,
    WallDiscovered,
    StalePlan,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleStats {
    pub seek_steps: u32,
    /// Steps from leaving the goal area until arriving back at start (survey + return).
    pub return_steps: u32,
    pub replans: u32,
    pub walls_discovered: u32,
    /// Shortest start-to-goal route over observed open edges once the cycle ended.
    pub proven_route: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolverEvent {
    PhaseChanged { from: Phase, to: Phase },
    WallDiscovered { edge: EdgeId },
    Replanned { reason: ReplanReason, plan_len: usize },
    TargetReached { cell: Coord, remaining: usize },
    SurveyAbandoned { remaining: usize },
    CycleCompleted { cycle: u32, stats: CycleStats },
    InvalidDirection { edge: EdgeId },
    Halted { reason: EngineFailure },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved { from: Coord, to: Coord },
    Finished,
    Halted(EngineFailure),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    Finished,
    Halted(EngineFailure),
    BudgetExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub steps: u32,
    pub stop_reason: AdvanceStopReason,
}
