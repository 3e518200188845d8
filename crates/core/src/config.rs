//! Tunables for a solver run.
//! This module exists to keep run policy (cycle count, survey, goal override, step budget)
//! out of the controller so drivers can load it from files.
//! It does not own file I/O; drivers decide where settings come from.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::maze::goal_cells;
use crate::types::Coord;

pub const DEFAULT_STEP_BUDGET: u32 = 20_000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Full seek, survey and return cycles to run before finishing.
    pub max_cycles: u32,
    /// Revisit unobserved edges along the best known route before returning.
    pub survey: bool,
    /// Cells to seek instead of the centre of the grid.
    pub goal: Option<Vec<Coord>>,
    /// Upper bound on steps a driver should spend on one run.
    pub step_budget: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { max_cycles: 1, survey: true, goal: None, step_budget: DEFAULT_STEP_BUDGET }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    ZeroCycles,
    EmptyGoal,
    GoalOutOfBounds { cell: Coord },
    StartOutOfBounds { cell: Coord },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCycles => write!(f, "max_cycles must be at least 1"),
            Self::EmptyGoal => write!(f, "goal override lists no cells"),
            Self::GoalOutOfBounds { cell } => {
                write!(f, "goal cell ({}, {}) lies outside the maze", cell.x, cell.y)
            }
            Self::StartOutOfBounds { cell } => {
                write!(f, "start cell ({}, {}) lies outside the maze", cell.x, cell.y)
            }
        }
    }
}

impl Error for ConfigError {}

impl SolverConfig {
    /// The goal override, or the centre cells of a `cols` × `rows` grid.
    pub fn goal_cells(&self, cols: usize, rows: usize) -> Vec<Coord> {
        match &self.goal {
            Some(cells) => cells.clone(),
            None => goal_cells(cols, rows),
        }
    }

    pub fn validate(&self, cols: usize, rows: usize) -> Result<(), ConfigError> {
        if self.max_cycles == 0 {
            return Err(ConfigError::ZeroCycles);
        }
        let goal = self.goal_cells(cols, rows);
        if goal.is_empty() {
            return Err(ConfigError::EmptyGoal);
        }
        if let Some(cell) = goal.into_iter().find(|cell| !in_grid(*cell, cols, rows)) {
            return Err(ConfigError::GoalOutOfBounds { cell });
        }
        Ok(())
    }
}

pub(crate) fn in_grid(cell: Coord, cols: usize, rows: usize) -> bool {
    cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < cols && (cell.y as usize) < rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_fill_in_defaults() {
        let config: SolverConfig =
            serde_json::from_str(r#"{"max_cycles": 3}"#).expect("partial config parses");
        assert_eq!(config.max_cycles, 3);
        assert!(config.survey);
        assert_eq!(config.goal, None);
        assert_eq!(config.step_budget, DEFAULT_STEP_BUDGET);
    }

    #[test]
    fn goal_override_replaces_centre() {
        let config = SolverConfig { goal: Some(vec![Coord::new(2, 3)]), ..SolverConfig::default() };
        assert_eq!(config.goal_cells(16, 16), vec![Coord::new(2, 3)]);
        assert_eq!(SolverConfig::default().goal_cells(4, 4).len(), 4);
    }

    #[test]
    fn validation_rejects_degenerate_settings() {
        let zero = SolverConfig { max_cycles: 0, ..SolverConfig::default() };
        assert_eq!(zero.validate(8, 8), Err(ConfigError::ZeroCycles));

        let empty = SolverConfig { goal: Some(Vec::new()), ..SolverConfig::default() };
        assert_eq!(empty.validate(8, 8), Err(ConfigError::EmptyGoal));

        let outside =
            SolverConfig { goal: Some(vec![Coord::new(8, 0)]), ..SolverConfig::default() };
        assert_eq!(
            outside.validate(8, 8),
            Err(ConfigError::GoalOutOfBounds { cell: Coord::new(8, 0) })
        );
        assert_eq!(SolverConfig::default().validate(8, 8), Ok(()));
    }
}
