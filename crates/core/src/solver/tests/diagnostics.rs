//! Tests for text overlays and snapshot hashing.

use super::support::*;

#[test]
fn diag_shows_agent_targets_and_plan_before_any_step() {
    let maze = Maze::new(3, 3);
    let solver = solver_at_origin(&maze, SolverConfig::default());
    let diag = solver.draw_diag();
    let lines: Vec<&str> = diag.lines().collect();

    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "+   +   +   +");
    assert!(lines[1].starts_with("  M "));
    assert_eq!(lines[2], "+ . +   +   +");
    assert!(lines[3].contains(". T "));
}

#[test]
fn diag_draws_discovered_walls() {
    let maze = Maze::new(3, 3);
    let mut solver = solver_at_origin(&maze, SolverConfig::default());
    solver.step(&maze);
    let diag = solver.draw_diag();
    let lines: Vec<&str> = diag.lines().collect();

    assert_eq!(lines[0], "+---+   +   +");
    assert!(lines[1].starts_with("| S "));
    assert_eq!(lines[2], "+   +   +   +");
    assert!(lines[3].starts_with("| M . T "));
}

#[test]
fn flood_description_lists_distance_direction_and_run() {
    let maze = Maze::new(3, 3);
    let solver = solver_at_origin(&maze, SolverConfig::default());
    let lines = solver.describe_flood();

    assert!(lines.contains(&"H(1,1) 0.00 U run 0".to_string()));
    assert!(lines.contains(&"V(1,0) 0.67 UL run 1".to_string()));
}

#[test]
fn snapshot_hash_tracks_progress_and_is_reproducible() {
    let maze = Maze::generate(8, 8, 99);
    let mut a = solver_at_origin(&maze, SolverConfig::default());
    let mut b = solver_at_origin(&maze, SolverConfig::default());
    assert_eq!(a.snapshot_hash(), b.snapshot_hash());

    let before = a.snapshot_hash();
    a.step(&maze);
    assert_ne!(a.snapshot_hash(), before);
    b.step(&maze);
    assert_eq!(a.snapshot_hash(), b.snapshot_hash());
}
