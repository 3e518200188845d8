//! Text layout files (`.maz`).
//!
//! One line per row, one character per cell:
//! - `0`: no left or top wall
//! - `1`: left wall only
//! - `2`: top wall only
//! - `3`: left and top walls
//!
//! Two trailing lines hold the start row and start column. Right and bottom walls of the grid
//! are implied, and every boundary wall is restored on load.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use super::{Maze, WallMap};
use crate::types::{Coord, EdgeId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeLayout {
    pub maze: Maze,
    pub start: Coord,
}

#[derive(Debug)]
pub enum MazeFileError {
    Io(io::Error),
    /// Fewer than one grid row plus the two start lines.
    Empty,
    RaggedRow { line: usize, expected: usize, found: usize },
    InvalidCell { line: usize, column: usize, found: char },
    MissingStart,
    InvalidStart { line: usize, message: String },
    StartOutOfBounds { start: Coord },
}

impl fmt::Display for MazeFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "maze file I/O error: {e}"),
            Self::Empty => write!(f, "maze file has no rows"),
            Self::RaggedRow { line, expected, found } => {
                write!(f, "row at line {line} has {found} cells, expected {expected}")
            }
            Self::InvalidCell { line, column, found } => {
                write!(f, "invalid cell state {found:?} at line {line}, column {column}")
            }
            Self::MissingStart => write!(f, "maze file has no starting coordinates"),
            Self::InvalidStart { line, message } => {
                write!(f, "invalid starting coordinate at line {line}: {message}")
            }
            Self::StartOutOfBounds { start } => {
                write!(f, "starting cell ({}, {}) lies outside the maze", start.x, start.y)
            }
        }
    }
}

impl Error for MazeFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl MazeLayout {
    pub fn parse(text: &str) -> Result<Self, MazeFileError> {
        let mut lines: Vec<&str> = text.lines().map(|line| line.trim_end_matches('\r')).collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return Err(MazeFileError::Empty);
        }
        if lines.len() < 3 {
            return Err(MazeFileError::MissingStart);
        }

        let split = lines.len() - 2;
        let grid = &lines[..split];
        let cols = grid[0].chars().count();
        if cols == 0 {
            return Err(MazeFileError::Empty);
        }

        let mut maze = Maze::new(cols, grid.len());
        for (row, line) in grid.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(MazeFileError::RaggedRow { line: row + 1, expected: cols, found });
            }
            for (col, c) in line.chars().enumerate() {
                let (left, top) = match c {
                    '0' => (false, false),
                    '1' => (true, false),
                    '2' => (false, true),
                    '3' => (true, true),
                    found => {
                        return Err(MazeFileError::InvalidCell {
                            line: row + 1,
                            column: col + 1,
                            found,
                        });
                    }
                };
                maze.set_wall(EdgeId::vertical(col as i32, row as i32), left);
                maze.set_wall(EdgeId::horizontal(col as i32, row as i32), top);
            }
        }
        maze.wall_boundary();

        let start_row = parse_start(lines[split], split + 1)?;
        let start_col = parse_start(lines[split + 1], split + 2)?;
        let start = Coord::new(start_col, start_row);
        if !maze.contains_cell(start) {
            return Err(MazeFileError::StartOutOfBounds { start });
        }

        Ok(Self { maze, start })
    }

    pub fn to_maz_string(&self) -> String {
        let mut text = encode_rows(&self.maze);
        text.push_str(&format!("{}\n{}\n", self.start.y, self.start.x));
        text
    }

    pub fn load(path: &Path) -> Result<Self, MazeFileError> {
        let content = fs::read_to_string(path).map_err(MazeFileError::Io)?;
        Self::parse(&content)
    }

    pub fn save_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("maz.tmp");
        fs::write(&tmp_path, self.to_maz_string())?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

fn parse_start(raw: &str, line: usize) -> Result<i32, MazeFileError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|e| MazeFileError::InvalidStart { line, message: e.to_string() })
}

pub(super) fn encode_rows(maze: &Maze) -> String {
    let mut text = String::with_capacity((maze.cols() + 1) * maze.rows());
    for y in 0..maze.rows() as i32 {
        for x in 0..maze.cols() as i32 {
            let left = maze.wall_at(EdgeId::vertical(x, y));
            let top = maze.wall_at(EdgeId::horizontal(x, y));
            text.push(match (left, top) {
                (false, false) => '0',
                (true, false) => '1',
                (false, true) => '2',
                (true, true) => '3',
            });
        }
        text.push('\n');
    }
    text
}
