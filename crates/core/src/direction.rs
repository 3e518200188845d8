//! Approach directions between edges and the fixed adjacency they induce.
//! A composite direction `FirstSecond` was approached moving `First` and then turned through a
//! cell corner onto an edge facing `Second`; it normalizes to `Second`.

use std::error::Error;
use std::fmt;

use crate::types::{EdgeId, Orientation};

/// Flood cost for crossing a cell straight from one edge to the opposite edge.
pub const STRAIGHT_COST: u32 = 3;
/// Flood cost for cutting a corner to a perpendicular edge of the same cell.
pub const TURN_COST: u32 = 2;
/// Divisor that turns flood costs back into cell lengths for display.
pub const FLOOD_SCALE: u32 = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    #[default]
    Unknown,

    // Reached on horizontal edges.
    Up,
    LeftUp,
    RightUp,
    Down,
    LeftDown,
    RightDown,

    // Reached on vertical edges.
    Left,
    UpLeft,
    DownLeft,
    Right,
    UpRight,
    DownRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionError {
    /// `Direction::Unknown` reached an operation that needs a concrete direction.
    Unknown,
}

impl fmt::Display for DirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "direction is unknown"),
        }
    }
}

impl Error for DirectionError {}

/// An edge reachable from the current one, relative to the current edge's corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub orientation: Orientation,
    pub dx: i32,
    pub dy: i32,
    pub direction: Direction,
    pub cost: u32,
}

impl Candidate {
    fn new(orientation: Orientation, dx: i32, dy: i32, direction: Direction) -> Self {
        let cost = if direction.is_cardinal() { STRAIGHT_COST } else { TURN_COST };
        Self { orientation, dx, dy, direction, cost }
    }

    pub const fn edge_from(self, edge: EdgeId) -> EdgeId {
        EdgeId { orientation: self.orientation, corner: edge.corner.offset(self.dx, self.dy) }
    }
}

impl Direction {
    pub const CARDINALS: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn normalize(self) -> Result<Direction, DirectionError> {
        match self {
            Self::Up | Self::LeftUp | Self::RightUp => Ok(Self::Up),
            Self::Down | Self::LeftDown | Self::RightDown => Ok(Self::Down),
            Self::Left | Self::UpLeft | Self::DownLeft => Ok(Self::Left),
            Self::Right | Self::UpRight | Self::DownRight => Ok(Self::Right),
            Self::Unknown => Err(DirectionError::Unknown),
        }
    }

    /// Point-symmetric opposite. The turn is replayed backwards, so `LeftUp` (arrived moving
    /// up after travelling left) reverses to `DownRight`.
    pub fn reverse(self) -> Direction {
        match self {
            Self::Up => Self::Down,
            Self::LeftUp => Self::DownRight,
            Self::RightUp => Self::DownLeft,
            Self::Down => Self::Up,
            Self::LeftDown => Self::UpRight,
            Self::RightDown => Self::UpLeft,
            Self::Left => Self::Right,
            Self::UpLeft => Self::RightDown,
            Self::DownLeft => Self::RightUp,
            Self::Right => Self::Left,
            Self::UpRight => Self::LeftDown,
            Self::DownRight => Self::LeftUp,
            Self::Unknown => Self::Unknown,
        }
    }

    /// Swaps the order of a composite's two legs. Cardinals map to themselves.
    pub fn complement(self) -> Direction {
        match self {
            Self::LeftUp => Self::UpLeft,
            Self::UpLeft => Self::LeftUp,
            Self::RightUp => Self::UpRight,
            Self::UpRight => Self::RightUp,
            Self::LeftDown => Self::DownLeft,
            Self::DownLeft => Self::LeftDown,
            Self::RightDown => Self::DownRight,
            Self::DownRight => Self::RightDown,
            other => other,
        }
    }

    /// True when `other` keeps the same heading: an identical cardinal, or the complementary
    /// half of a staircase (`UpLeft` followed by `LeftUp` and so on).
    pub fn is_similar(self, other: Direction) -> bool {
        match self {
            Self::Unknown => false,
            Self::Up | Self::Down | Self::Left | Self::Right => self == other,
            composite => composite.complement() == other,
        }
    }

    pub fn is_cardinal(self) -> bool {
        Self::CARDINALS.contains(&self)
    }

    /// The orientation of the edges this direction lands on.
    pub fn edge_orientation(self) -> Result<Orientation, DirectionError> {
        match self.normalize()? {
            Self::Up | Self::Down => Ok(Orientation::Horizontal),
            _ => Ok(Orientation::Vertical),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "U",
            Self::LeftUp => "LU",
            Self::RightUp => "RU",
            Self::Down => "D",
            Self::LeftDown => "LD",
            Self::RightDown => "RD",
            Self::Left => "L",
            Self::UpLeft => "UL",
            Self::DownLeft => "DL",
            Self::Right => "R",
            Self::UpRight => "UR",
            Self::DownRight => "DR",
            Self::Unknown => "_",
        }
    }
}

/// The three edges reachable from an edge travelled in `direction`: straight on, then the two
/// corner turns. Composite inputs are normalized first.
pub fn candidate_edges(direction: Direction) -> Result<[Candidate; 3], DirectionError> {
    use Orientation::{Horizontal, Vertical};

    let candidates = match direction.normalize()? {
        Direction::Up => [
            Candidate::new(Horizontal, 0, -1, Direction::Up),
            Candidate::new(Vertical, 0, -1, Direction::UpLeft),
            Candidate::new(Vertical, 1, -1, Direction::UpRight),
        ],
        Direction::Down => [
            Candidate::new(Horizontal, 0, 1, Direction::Down),
            Candidate::new(Vertical, 0, 0, Direction::DownLeft),
            Candidate::new(Vertical, 1, 0, Direction::DownRight),
        ],
        Direction::Left => [
            Candidate::new(Vertical, -1, 0, Direction::Left),
            Candidate::new(Horizontal, -1, 0, Direction::LeftUp),
            Candidate::new(Horizontal, -1, 1, Direction::LeftDown),
        ],
        _ => [
            Candidate::new(Vertical, 1, 0, Direction::Right),
            Candidate::new(Horizontal, 0, 0, Direction::RightUp),
            Candidate::new(Horizontal, 0, 1, Direction::RightDown),
        ],
    };
    Ok(candidates)
}
