use std::io;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use board_grid::constants::MAX_GRID_DIMENSION;
use board_grid::{GridConfig, GridItem, GridLayoutService, GridPosition, ItemId, RejectReason};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "grid-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Drag-heavy benchmark for the merged cell switch engine"
)]
struct BenchCli {
    /// How long to run the benchmark.
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "SECONDS",
        default_value_t = 5.0
    )]
    duration_seconds: f64,

    /// Side length of the square grid.
    #[arg(short = 'g', long = "grid", value_name = "CELLS", default_value_t = 3)]
    grid: usize,

    /// Previews issued per committed drop, like pointer-move frames in a drag.
    #[arg(short = 'p', long = "previews", value_name = "COUNT", default_value_t = 8)]
    previews_per_drop: u32,
}

struct BenchConfig {
    duration: Duration,
    grid: GridConfig,
    previews_per_drop: u32,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(0.1..=600.0).contains(&cli.duration_seconds) {
            return Err("duration must be between 0.1 and 600 seconds".to_string());
        }
        if !(3..=MAX_GRID_DIMENSION).contains(&cli.grid) {
            return Err(format!("grid must be between 3 and {MAX_GRID_DIMENSION} cells"));
        }
        if cli.previews_per_drop > 1_000 {
            return Err("previews must be at most 1000 per drop".to_string());
        }
        Ok(Self {
            duration: Duration::from_secs_f64(cli.duration_seconds),
            grid: GridConfig::square(cli.grid),
            previews_per_drop: cli.previews_per_drop,
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    let stats = run_benchmark(&config).map_err(io::Error::other)?;
    println!("{}", stats.final_report(&config));
    Ok(())
}

/// A header spanning two columns, a sidebar spanning two rows, and simple
/// cells everywhere else.
fn bench_layout(config: GridConfig) -> Vec<GridItem> {
    let mut items = vec![
        GridItem::merged("header", 0, 0, 2, 1),
        GridItem::merged("sidebar", 1, 0, 1, 2),
    ];
    for cell in config.cells() {
        if items.iter().any(|item| item.covers(cell)) {
            continue;
        }
        items.push(GridItem::simple(
            format!("cell-{}-{}", cell.row, cell.col),
            cell.row,
            cell.col,
        ));
    }
    items
}

fn run_benchmark(config: &BenchConfig) -> Result<BenchStats, board_grid::GridError> {
    let mut grid = GridLayoutService::<()>::new(config.grid, bench_layout(config.grid))?;
    let movers: [ItemId; 2] = ["header".into(), "sidebar".into()];
    let mut stats = BenchStats::new();
    let mut rng = Lcg::seeded_from_clock();

    while stats.elapsed() < config.duration {
        let mover = &movers[rng.next() as usize % movers.len()];
        let zones = grid.valid_dropzones(mover)?;
        if zones.is_empty() {
            continue;
        }

        for _ in 0..config.previews_per_drop {
            let hover = zones[rng.next() as usize % zones.len()];
            let started = Instant::now();
            let preview = grid.preview(mover, hover)?;
            stats.record_preview(started.elapsed(), preview.valid);
        }

        let target: GridPosition = zones[rng.next() as usize % zones.len()];
        let started = Instant::now();
        let outcome = grid.try_move_merged_item(mover, target)?;
        stats.record_drop(started.elapsed(), outcome.rejection.as_ref());
    }

    stats.mark_completed();
    stats.generation = grid.generation();
    Ok(stats)
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    previews: u64,
    valid_previews: u64,
    drops: u64,
    rejected_blocked: u64,
    rejected_other: u64,
    total_engine_time: Duration,
    fastest_call: Duration,
    slowest_call: Duration,
    generation: u64,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            previews: 0,
            valid_previews: 0,
            drops: 0,
            rejected_blocked: 0,
            rejected_other: 0,
            total_engine_time: Duration::ZERO,
            fastest_call: Duration::MAX,
            slowest_call: Duration::ZERO,
            generation: 0,
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record_call(&mut self, took: Duration) {
        self.total_engine_time += took;
        if took < self.fastest_call {
            self.fastest_call = took;
        }
        if took > self.slowest_call {
            self.slowest_call = took;
        }
    }

    fn record_preview(&mut self, took: Duration, valid: bool) {
        self.previews = self.previews.saturating_add(1);
        if valid {
            self.valid_previews = self.valid_previews.saturating_add(1);
        }
        self.record_call(took);
    }

    fn record_drop(&mut self, took: Duration, rejection: Option<&RejectReason>) {
        self.drops = self.drops.saturating_add(1);
        match rejection {
            None => {}
            Some(RejectReason::BlockedByMerged { .. }) => self.rejected_blocked += 1,
            Some(_) => self.rejected_other += 1,
        }
        self.record_call(took);
    }

    fn calls(&self) -> u64 {
        self.previews + self.drops
    }

    fn average_call_us(&self) -> f64 {
        if self.calls() == 0 {
            return 0.0;
        }
        (self.total_engine_time.as_secs_f64() / self.calls() as f64) * 1_000_000.0
    }

    fn fastest_call_us(&self) -> f64 {
        if self.calls() == 0 {
            return 0.0;
        }
        self.fastest_call.as_secs_f64() * 1_000_000.0
    }

    fn slowest_call_us(&self) -> f64 {
        self.slowest_call.as_secs_f64() * 1_000_000.0
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let calls_per_second = if elapsed > 0.0 {
            self.calls() as f64 / elapsed
        } else {
            0.0
        };

        indoc::formatdoc!(
            r#"
            Grid bench completed on a {rows}x{cols} grid.
            Duration: {elapsed:.2}s (target {target:.2}s)
            Previews: {previews} ({valid} valid) | Drops: {drops} ({committed} committed)
            Rejected drops: {blocked} blocked by merged cells, {other} other
            Engine calls: ~{calls_per_sec:.0}/s
            Avg call: {avg:.2} us | Best: {best:.2} us | Worst: {worst:.2} us
            "#,
            rows = config.grid.rows,
            cols = config.grid.cols,
            elapsed = elapsed,
            target = config.duration.as_secs_f64(),
            previews = self.previews,
            valid = self.valid_previews,
            drops = self.drops,
            committed = self.generation,
            blocked = self.rejected_blocked,
            other = self.rejected_other,
            calls_per_sec = calls_per_second,
            avg = self.average_call_us(),
            best = self.fastest_call_us(),
            worst = self.slowest_call_us(),
        )
    }
}

struct Lcg {
    state: u64,
}

impl Lcg {
    fn seeded_from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
            ^ 0xA5A5_A5A5_1234_5678;
        Self { state: seed }
    }

    fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
}
