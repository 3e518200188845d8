pub mod config;
pub mod direction;
pub mod flood;
pub mod graph;
pub mod maze;
pub mod path;
pub mod solver;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, SolverConfig};
pub use direction::{Direction, DirectionError};
pub use flood::{FloodReport, flood_fill};
pub use graph::{Edge, EdgeGraph};
pub use maze::{Maze, MazeFileError, MazeLayout, WallMap, goal_cells};
pub use path::{PathError, reconstruct_path};
pub use solver::Solver;
pub use types::*;
