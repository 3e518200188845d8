use anyhow::{Context, Result};
use clap::Parser;
use micromouse::{
    AdvanceStopReason, Coord, CycleStats, Maze, MazeLayout, Solver, SolverConfig, SolverEvent,
    WallMap,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a `.maz` layout to solve. Without it a maze is generated from `--seed`.
    #[arg(short, long)]
    maze: Option<PathBuf>,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Width and height of a generated maze
    #[arg(long, default_value_t = 16)]
    size: usize,
    /// Interior walls to knock out of a generated maze
    #[arg(long, default_value_t = 0)]
    loops: usize,
    /// TOML file with solver settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    max_cycles: Option<u32>,
    /// Write a JSON run report here
    #[arg(short, long)]
    report: Option<PathBuf>,
    /// Save the solved layout as `.maz`
    #[arg(long)]
    save_maze: Option<PathBuf>,
    /// Print the final knowledge map
    #[arg(long)]
    diag: bool,
}

#[derive(Serialize)]
struct RunReport {
    fingerprint: String,
    snapshot_hash: String,
    start: Coord,
    steps: u64,
    stop_reason: String,
    known_walls: usize,
    cycles: Vec<CycleStats>,
}

fn load_config(path: Option<&Path>) -> Result<SolverConfig> {
    let Some(path) = path else {
        return Ok(SolverConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report).context("Failed to serialize run report")?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)
        .with_context(|| format!("Failed to write report file: {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to move report into place: {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let layout = match &args.maze {
        Some(path) => MazeLayout::load(path)
            .with_context(|| format!("Failed to load maze file: {}", path.display()))?,
        None => MazeLayout {
            maze: Maze::generate_with_loops(args.size, args.size, args.seed, args.loops),
            start: Coord::new(0, 0),
        },
    };
    if let Some(path) = &args.save_maze {
        layout
            .save_atomic(path)
            .with_context(|| format!("Failed to save maze file: {}", path.display()))?;
    }

    let mut config = load_config(args.config.as_deref())?;
    if let Some(max_cycles) = args.max_cycles {
        config.max_cycles = max_cycles;
    }
    let budget = config.step_budget;

    let mut solver = Solver::new(&layout.maze, layout.start, config)
        .with_context(|| "Invalid solver settings for this maze")?;
    let result = solver.advance(&layout.maze, budget);

    let stop_reason = match result.stop_reason {
        AdvanceStopReason::Finished => "finished".to_string(),
        AdvanceStopReason::Halted(reason) => format!("halted: {reason:?}"),
        AdvanceStopReason::BudgetExhausted => format!("budget of {budget} steps exhausted"),
    };
    let walls_sensed =
        solver.log().iter().filter(|e| matches!(e, SolverEvent::WallDiscovered { .. })).count();

    println!("Run complete.");
    println!("Maze: {}x{} {}", layout.maze.cols(), layout.maze.rows(), layout.maze.fingerprint());
    println!("Steps: {}", solver.total_steps());
    println!("Stop: {stop_reason}");
    println!("Walls Sensed: {walls_sensed}");
    for (cycle, stats) in solver.history().iter().enumerate() {
        let proven = stats.proven_route.map_or("none".to_string(), |route| route.to_string());
        println!(
            "Cycle {cycle}: seek {} return {} replans {} walls {} proven route {proven}",
            stats.seek_steps, stats.return_steps, stats.replans, stats.walls_discovered
        );
    }
    println!("Snapshot Hash: 0x{:016x}", solver.snapshot_hash());
    if args.diag {
        println!("{}", solver.draw_diag());
    }

    if let Some(path) = &args.report {
        let report = RunReport {
            fingerprint: layout.maze.fingerprint(),
            snapshot_hash: format!("0x{:016x}", solver.snapshot_hash()),
            start: layout.start,
            steps: solver.total_steps(),
            stop_reason,
            known_walls: solver.graph().known_wall_count(),
            cycles: solver.history().to_vec(),
        };
        write_report(path, &report)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}
