use anyhow::{Result, bail};
use clap::Parser;
use micromouse::graph::cell_edges;
use micromouse::{
    AdvanceStopReason, Coord, EdgeId, Maze, Solver, SolverConfig, StepOutcome, WallMap,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of random mazes to run
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
}

fn pick(rng: &mut ChaCha8Rng, low: u64, high: u64) -> u64 {
    low + rng.next_u64() % (high - low + 1)
}

fn shared_edge(from: Coord, to: Coord) -> Option<EdgeId> {
    cell_edges(from).into_iter().find(|id| cell_edges(to).contains(id))
}

fn check_run(maze: &Maze, solver: &mut Solver, budget: u32) -> Result<AdvanceStopReason> {
    for _ in 0..budget {
        match solver.step(maze) {
            StepOutcome::Moved { from, to } => {
                let Some(edge) = shared_edge(from, to) else {
                    bail!("Invariant failed: jumped from {from:?} to non-adjacent {to:?}");
                };
                if maze.wall_at(edge) {
                    bail!("Invariant failed: crossed wall {edge:?}");
                }
            }
            StepOutcome::Finished => return Ok(AdvanceStopReason::Finished),
            StepOutcome::Halted(reason) => return Ok(AdvanceStopReason::Halted(reason)),
        }

        let cell = solver.cell();
        if !maze.contains_cell(cell) {
            bail!("Invariant failed: agent left the grid at {cell:?}");
        }
        if let Some(next) = solver.planned_route().first()
            && !cell_edges(cell).contains(next)
        {
            bail!("Invariant failed: plan head {next:?} does not border {cell:?}");
        }
        for (id, edge) in solver.graph().iter() {
            if edge.wall_known && !maze.wall_at(id) {
                bail!("Invariant failed: phantom wall learned at {id:?}");
            }
        }
    }
    Ok(AdvanceStopReason::BudgetExhausted)
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for {} mazes...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for run in 0..args.runs {
        let cols = pick(&mut rng, 2, 16) as usize;
        let rows = pick(&mut rng, 2, 16) as usize;
        let loops = pick(&mut rng, 0, (cols * rows / 4) as u64) as usize;
        let maze = Maze::generate_with_loops(cols, rows, rng.next_u64(), loops);
        let start = Coord::new(
            pick(&mut rng, 0, cols as u64 - 1) as i32,
            pick(&mut rng, 0, rows as u64 - 1) as i32,
        );
        let config = SolverConfig {
            max_cycles: pick(&mut rng, 1, 3) as u32,
            survey: rng.next_u64() % 4 != 0,
            ..SolverConfig::default()
        };
        let budget = config.step_budget;

        let mut solver = Solver::new(&maze, start, config)?;
        match check_run(&maze, &mut solver, budget)? {
            AdvanceStopReason::Finished => {}
            other => bail!(
                "Run {run} ({cols}x{rows} from {start:?}, maze {}) stopped with {other:?}",
                maze.fingerprint()
            ),
        }
        if solver.cell() != start {
            bail!("Run {run} finished away from start at {:?}", solver.cell());
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
