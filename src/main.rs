use std::io::Write;
use std::thread;
use std::time::Duration;

use lifeline::{BoundaryPolicy, EngineError, Grid, RunRecord, RunStore, SimulationEngine};

const ROWS: usize = 24;
const COLS: usize = 48;
const GENERATIONS: usize = 60;
const STEP_INTERVAL: Duration = Duration::from_millis(50);

fn render(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.cols() + 1) * grid.rows());
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            out.push(if grid.get(r, c).unwrap_or(false) { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

fn sparkline(counts: &[usize]) -> String {
    const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let max = counts.iter().copied().max().unwrap_or(1).max(1);
    counts
        .iter()
        .map(|&n| BARS[(n * (BARS.len() - 1)) / max])
        .collect()
}

fn run() -> Result<(), EngineError> {
    let mut engine = SimulationEngine::new(ROWS, COLS, BoundaryPolicy::Wrap, 256);

    log::info!("lifeline demo: {ROWS}x{COLS} wrapped grid, {GENERATIONS} generations");

    // Seed from the noise field, then drop a glider gun into the corner.
    engine.randomize_by_noise(7, 6.0, 0.25);
    engine.stamp_pattern("gosper-gun", 6, 18)?;

    engine.set_running(true);
    for _ in 0..GENERATIONS {
        engine.step_forward();
        thread::sleep(STEP_INTERVAL);
    }
    engine.set_running(false);

    println!("{}", render(engine.grid()));
    let counts: Vec<usize> = engine.timeline().live_counts().collect();
    println!("population  {}", sparkline(&counts));
    println!(
        "generation {} of {}, population {}",
        engine.history().last().map_or(0, |e| e.generation),
        engine.history_length(),
        engine.live_count_now()
    );

    // Scrub back a quarter of the run, then replay to the frontier.
    for _ in 0..GENERATIONS / 4 {
        engine.step_backward();
    }
    log::info!(
        "rewound to index {:?}, population {}",
        engine.cursor_position(),
        engine.live_count_now()
    );
    while engine.cursor_position() != Some(engine.history_length() - 1) {
        engine.step_forward();
    }
    log::info!("replayed to the frontier, population {}", engine.live_count_now());

    let mut store = RunStore::load("lifeline_runs.json");
    if let Err(e) = store.add(RunRecord::capture(&engine)) {
        log::warn!("could not save run: {e}");
    } else {
        log::info!("run saved ({} total)", store.records().len());
    }

    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        let _ = writeln!(std::io::stderr(), "error: {e}");
        std::process::exit(1);
    }
}
