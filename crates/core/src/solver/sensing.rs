//! Wall observation around the agent.

use super::*;

impl Solver {
    /// Reads the four walls of the agent's cell from ground truth and marks them observed.
    /// Returns whether a newly found wall lies on the remaining plan.
    pub(super) fn sense<M: WallMap>(&mut self, maze: &M) -> bool {
        let mut blocked = false;
        for id in cell_edges(self.cell) {
            self.graph.mark_visited(id);
            if maze.wall_at(id) && self.record_wall(id) {
                blocked |= self.plan.contains(&id);
            }
        }
        blocked
    }

    pub(super) fn record_wall(&mut self, id: EdgeId) -> bool {
        if !self.graph.mark_wall(id) {
            return false;
        }
        self.stats.walls_discovered += 1;
        self.log.push(SolverEvent::WallDiscovered { edge: id });
        true
    }
}
