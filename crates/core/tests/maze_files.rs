use micromouse::{
    AdvanceStopReason, Coord, Maze, MazeFileError, MazeLayout, Solver, SolverConfig, WallMap,
};
use std::fs;
use tempfile::tempdir;

// 4×3 whose right-hand corner cell is only entered from below.
const LAYOUT: &str = "3222\n1003\n1010\n2\n0\n";

fn solve(layout: &MazeLayout, config: SolverConfig) -> Solver {
    let mut solver = Solver::new(&layout.maze, layout.start, config).expect("valid settings");
    let result = solver.advance(&layout.maze, 5_000);
    assert_eq!(result.stop_reason, AdvanceStopReason::Finished);
    solver
}

#[test]
fn test_layout_file_solves_and_returns_to_start() {
    let layout = MazeLayout::parse(LAYOUT).expect("valid layout");
    assert_eq!(layout.start, Coord::new(0, 2));

    let solver = solve(&layout, SolverConfig::default());
    assert_eq!(solver.cell(), layout.start);
    assert_eq!(solver.goal(), &[Coord::new(1, 1), Coord::new(2, 1)]);
    for (id, edge) in solver.graph().iter() {
        if edge.wall_known {
            assert!(layout.maze.wall_at(id), "{id:?} learned but not in the layout");
        }
    }
}

#[test]
fn test_saved_layout_reloads_to_the_same_run() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("mazes").join("seed_5.maz");
    let layout =
        MazeLayout { maze: Maze::generate_with_loops(9, 7, 5, 6), start: Coord::new(8, 6) };

    layout.save_atomic(&path).expect("save");
    let loaded = MazeLayout::load(&path).expect("load");
    assert_eq!(loaded, layout);
    assert_eq!(loaded.maze.fingerprint(), layout.maze.fingerprint());

    let config = SolverConfig { max_cycles: 2, ..SolverConfig::default() };
    let original = solve(&layout, config.clone());
    let reloaded = solve(&loaded, config);
    assert_eq!(original.snapshot_hash(), reloaded.snapshot_hash());
    assert_eq!(original.history(), reloaded.history());
}

#[test]
fn test_goal_override_is_sought_instead_of_the_centre() {
    let layout = MazeLayout::parse(LAYOUT).expect("valid layout");
    let corner = Coord::new(3, 1);
    let config =
        SolverConfig { goal: Some(vec![corner]), survey: false, ..SolverConfig::default() };

    let solver = solve(&layout, config);
    assert_eq!(solver.goal(), &[corner]);
    let first = solver.history()[0];
    // The corner only opens downward; no route beats the Manhattan distance.
    assert!(first.seek_steps >= 4, "seek of {} steps is shorter than the route", first.seek_steps);
    assert!(first.return_steps >= 4);
}

#[test]
fn test_malformed_files_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.maz");
    fs::write(&path, "00\n0\n0\n0\n").expect("write");

    let err = MazeLayout::load(&path).expect_err("ragged rows");
    assert!(matches!(err, MazeFileError::RaggedRow { line: 2, .. }));
    assert!(err.to_string().contains("expected 2"));
}
