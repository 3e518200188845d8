//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from stepping and planning code.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Solver {
    /// Digest of the agent, its plan and every edge's knowledge and flood state.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        write_coord(&mut hasher, self.cell);
        write_coord(&mut hasher, self.start);
        hasher.write_u8(match self.phase {
            Phase::SeekingGoal => 0,
            Phase::Surveying => 1,
            Phase::Returning => 2,
            Phase::Finished => 3,
        });
        hasher.write_u8(match self.halted {
            None => 0,
            Some(EngineFailure::Unreachable) => 1,
            Some(EngineFailure::PlanExhausted) => 2,
            Some(EngineFailure::InvalidDirection) => 3,
        });
        hasher.write_u32(self.cycle);
        hasher.write_u64(self.steps);

        hasher.write_usize(self.targets.len());
        for target in &self.targets {
            write_coord(&mut hasher, *target);
        }
        hasher.write_usize(self.plan.len());
        for edge in &self.plan {
            write_edge(&mut hasher, *edge);
        }
        for (_, edge) in self.graph.iter() {
            hasher.write_u8(u8::from(edge.wall_known) | (u8::from(edge.visited) << 1));
            hasher.write_u32(edge.flood_value.unwrap_or(u32::MAX));
        }
        hasher.finish()
    }
}

fn write_coord(hasher: &mut Xxh3, coord: Coord) {
    hasher.write_i32(coord.x);
    hasher.write_i32(coord.y);
}

fn write_edge(hasher: &mut Xxh3, edge: EdgeId) {
    hasher.write_u8(match edge.orientation {
        Orientation::Horizontal => 0,
        Orientation::Vertical => 1,
    });
    write_coord(hasher, edge.corner);
}
