use micromouse::graph::cell_edges;
use micromouse::{Coord, Maze, Solver, SolverConfig, StepOutcome, WallMap};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

fn run_fuzz_simulation(maze_seed: u64, setup_seed: u64, max_steps: u32) -> Result<(), String> {
    let mut rng = ChaCha8Rng::seed_from_u64(setup_seed);
    let cols = 2 + (rng.next_u64() % 11) as usize;
    let rows = 2 + (rng.next_u64() % 11) as usize;
    let loops = (rng.next_u64() % (cols * rows / 3 + 1) as u64) as usize;
    let maze = Maze::generate_with_loops(cols, rows, maze_seed, loops);
    let start = Coord::new(
        (rng.next_u64() % cols as u64) as i32,
        (rng.next_u64() % rows as u64) as i32,
    );
    let config = SolverConfig {
        max_cycles: 1 + (rng.next_u64() % 3) as u32,
        survey: rng.next_u64() % 2 == 0,
        ..SolverConfig::default()
    };
    let max_cycles = config.max_cycles as usize;

    let mut solver = Solver::new(&maze, start, config).map_err(|e| e.to_string())?;
    let mut moves = 0u64;
    for _ in 0..max_steps {
        match solver.step(&maze) {
            StepOutcome::Moved { from, to } => {
                moves += 1;
                let crossed = cell_edges(from).into_iter().find(|id| cell_edges(to).contains(id));
                match crossed {
                    Some(edge) if !maze.wall_at(edge) => {}
                    _ => {
                        return Err(format!(
                            "Invariant failed: illegal move {from:?} -> {to:?} on maze_seed {}",
                            maze_seed
                        ));
                    }
                }
            }
            StepOutcome::Finished => break,
            StepOutcome::Halted(reason) => {
                return Err(format!("Invariant failed: {reason:?} on maze_seed {}", maze_seed));
            }
        }

        for (id, edge) in solver.graph().iter() {
            if edge.wall_known && !maze.wall_at(id) {
                return Err(format!(
                    "Invariant failed: phantom wall {id:?} on maze_seed {}",
                    maze_seed
                ));
            }
        }
    }

    if !solver.is_finished() {
        return Err(format!("Invariant failed: run did not finish on maze_seed {}", maze_seed));
    }
    if solver.cell() != start {
        return Err(format!(
            "Invariant failed: finished away from start on maze_seed {}",
            maze_seed
        ));
    }
    let history = solver.history();
    if history.is_empty() || history.len() > max_cycles {
        return Err(format!("Invariant failed: {} cycles recorded", history.len()));
    }
    let accounted: u64 =
        history.iter().map(|stats| u64::from(stats.seek_steps + stats.return_steps)).sum();
    if accounted != moves || moves != solver.total_steps() {
        return Err(format!(
            "Invariant failed: {moves} moves but {accounted} accounted on maze_seed {}",
            maze_seed
        ));
    }

    Ok(())
}

#[test]
fn test_fuzz_solver_runs() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(24));
    let seeds = (any::<u64>(), any::<u64>());

    runner
        .run(&seeds, |(maze_seed, setup_seed)| {
            run_fuzz_simulation(maze_seed, setup_seed, 20_000).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("semantic fuzz simulation should preserve invariants");
}
