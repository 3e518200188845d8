//! Text overlays of the solver's knowledge for drivers and failing tests.

use super::*;

impl Solver {
    /// ASCII map of what the agent knows: `---` and `|` are discovered walls, `.` marks planned
    /// edges, `M` is the agent, `T` a target and `S` the start.
    pub fn draw_diag(&self) -> String {
        let (cols, rows) = (self.graph.cols() as i32, self.graph.rows() as i32);
        let mut text = String::new();
        for y in 0..=rows {
            for x in 0..cols {
                let id = EdgeId::horizontal(x, y);
                text.push('+');
                text.push_str(if self.graph.is_wall_known(id) {
                    "---"
                } else if self.plan.contains(&id) {
                    " . "
                } else {
                    "   "
                });
            }
            text.push_str("+\n");
            if y == rows {
                break;
            }

            for x in 0..=cols {
                let id = EdgeId::vertical(x, y);
                text.push(if self.graph.is_wall_known(id) {
                    '|'
                } else if self.plan.contains(&id) {
                    '.'
                } else {
                    ' '
                });
                if x == cols {
                    continue;
                }
                let cell = Coord::new(x, y);
                let mark = if cell == self.cell {
                    'M'
                } else if self.targets.contains(&cell) {
                    'T'
                } else if cell == self.start {
                    'S'
                } else {
                    ' '
                };
                text.push(' ');
                text.push(mark);
                text.push(' ');
            }
            text.push('\n');
        }
        text
    }

    /// One line per valued edge: slot, distance in cells, approach and straight-run length.
    pub fn describe_flood(&self) -> Vec<String> {
        self.graph
            .iter()
            .filter_map(|(id, edge)| {
                let distance = edge.flood_distance()?;
                let kind = match id.orientation {
                    Orientation::Horizontal => 'H',
                    Orientation::Vertical => 'V',
                };
                Some(format!(
                    "{kind}({},{}) {distance:.2} {} run {}",
                    id.corner.x,
                    id.corner.y,
                    edge.approach.label(),
                    edge.run_length
                ))
            })
            .collect()
    }
}
