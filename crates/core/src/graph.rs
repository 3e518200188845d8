//! Dense per-edge knowledge and flood state for the whole grid.
//! Adjacency is never stored; it is recomputed from `direction::candidate_edges`.

use std::collections::VecDeque;

use crate::direction::{Direction, FLOOD_SCALE};
use crate::types::{Coord, EdgeId, Orientation};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Edge {
    /// A wall has been confirmed on this edge.
    pub wall_known: bool,
    /// The agent has occupied a cell bordering this edge, so `wall_known` is exact here.
    pub visited: bool,
    pub flood_value: Option<u32>,
    pub approach: Direction,
    pub run_length: u16,
}

impl Edge {
    /// Flood cost in cell lengths, for overlays.
    pub fn flood_distance(&self) -> Option<f32> {
        self.flood_value.map(|value| value as f32 / FLOOD_SCALE as f32)
    }

    fn clear_flood(&mut self) {
        self.flood_value = None;
        self.approach = Direction::Unknown;
        self.run_length = 0;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeGraph {
    cols: usize,
    rows: usize,
    horizontal: Vec<Edge>,
    vertical: Vec<Edge>,
}

impl EdgeGraph {
    pub fn new(cols: usize, rows: usize) -> Self {
        let slots = (cols + 1) * (rows + 1);
        Self {
            cols,
            rows,
            horizontal: vec![Edge::default(); slots],
            vertical: vec![Edge::default(); slots],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn contains_cell(&self, cell: Coord) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.cols && (cell.y as usize) < self.rows
    }

    /// True for edge slots that bound at least one cell of the grid.
    pub fn contains(&self, id: EdgeId) -> bool {
        let Coord { x, y } = id.corner;
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        match id.orientation {
            Orientation::Horizontal => x < self.cols && y <= self.rows,
            Orientation::Vertical => x <= self.cols && y < self.rows,
        }
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        let index = self.index(id)?;
        match id.orientation {
            Orientation::Horizontal => self.horizontal.get(index),
            Orientation::Vertical => self.vertical.get(index),
        }
    }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        let index = self.index(id)?;
        match id.orientation {
            Orientation::Horizontal => self.horizontal.get_mut(index),
            Orientation::Vertical => self.vertical.get_mut(index),
        }
    }

    pub fn flood_value(&self, id: EdgeId) -> Option<u32> {
        self.edge(id).and_then(|edge| edge.flood_value)
    }

    pub fn is_wall_known(&self, id: EdgeId) -> bool {
        self.edge(id).is_some_and(|edge| edge.wall_known)
    }

    pub fn is_visited(&self, id: EdgeId) -> bool {
        self.edge(id).is_some_and(|edge| edge.visited)
    }

    /// Records a confirmed wall. Returns whether this is new knowledge.
    pub fn mark_wall(&mut self, id: EdgeId) -> bool {
        match self.edge_mut(id) {
            Some(edge) if !edge.wall_known => {
                edge.wall_known = true;
                true
            }
            _ => false,
        }
    }

    pub fn mark_visited(&mut self, id: EdgeId) {
        if let Some(edge) = self.edge_mut(id) {
            edge.visited = true;
        }
    }

    /// A cell is explored once all four of its edges have been observed.
    pub fn is_cell_explored(&self, cell: Coord) -> bool {
        cell_edges(cell).into_iter().all(|id| self.is_visited(id))
    }

    pub fn clear_flood(&mut self) {
        for edge in self.horizontal.iter_mut().chain(self.vertical.iter_mut()) {
            edge.clear_flood();
        }
    }

    pub fn clear_knowledge(&mut self) {
        self.horizontal.fill(Edge::default());
        self.vertical.fill(Edge::default());
    }

    /// Every real edge slot, horizontals first, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        let horizontals = (0..=self.rows).flat_map(move |y| {
            (0..self.cols).map(move |x| EdgeId::horizontal(x as i32, y as i32))
        });
        let verticals = (0..self.rows).flat_map(move |y| {
            (0..=self.cols).map(move |x| EdgeId::vertical(x as i32, y as i32))
        });
        horizontals.chain(verticals).filter_map(move |id| self.edge(id).map(|edge| (id, edge)))
    }

    /// Length in cells of the shortest route from `from` to any of `targets` that crosses
    /// only observed open edges. Observations never expire, so this can only shrink.
    pub fn proven_distance(&self, from: Coord, targets: &[Coord]) -> Option<u32> {
        if !self.contains_cell(from) {
            return None;
        }
        let slot = |cell: Coord| cell.y as usize * self.cols + cell.x as usize;
        let mut seen = vec![false; self.cols * self.rows];
        seen[slot(from)] = true;
        let mut queue = VecDeque::from([(from, 0)]);

        while let Some((cell, distance)) = queue.pop_front() {
            if targets.contains(&cell) {
                return Some(distance);
            }
            for id in cell_edges(cell) {
                if !self.edge(id).is_some_and(|edge| edge.visited && !edge.wall_known) {
                    continue;
                }
                for next in id.cells() {
                    if self.contains_cell(next) && !seen[slot(next)] {
                        seen[slot(next)] = true;
                        queue.push_back((next, distance + 1));
                    }
                }
            }
        }
        None
    }

    pub fn known_wall_count(&self) -> usize {
        self.iter().filter(|(_, edge)| edge.wall_known).count()
    }

    fn index(&self, id: EdgeId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        Some((id.corner.y as usize) * (self.cols + 1) + (id.corner.x as usize))
    }
}

/// The four edges of a cell in tie-break order: top, bottom, left, right.
pub fn cell_edges(cell: Coord) -> [EdgeId; 4] {
    [
        EdgeId::horizontal(cell.x, cell.y),
        EdgeId::horizontal(cell.x, cell.y + 1),
        EdgeId::vertical(cell.x, cell.y),
        EdgeId::vertical(cell.x + 1, cell.y),
    ]
}

/// The four edges of a cell paired with the direction that leaves the cell through each.
pub fn outward_edges(cell: Coord) -> [(EdgeId, Direction); 4] {
    let [top, bottom, left, right] = cell_edges(cell);
    [
        (top, Direction::Up),
        (bottom, Direction::Down),
        (left, Direction::Left),
        (right, Direction::Right),
    ]
}

/// The cell entered when crossing `edge` travelling in `cardinal`.
pub fn landing_cell(edge: EdgeId, cardinal: Direction) -> Option<Coord> {
    if cardinal.edge_orientation().ok()? != edge.orientation {
        return None;
    }
    let [before, after] = edge.cells();
    match cardinal {
        Direction::Up | Direction::Left => Some(before),
        Direction::Down | Direction::Right => Some(after),
        _ => None,
    }
}
