//! annulus — a swarm of bugs forming a ring.
//!
//! Bugs are dropped at random into a 100×100 domain.  About half are anchors
//! that know where they are; the rest localise by trilateration from anchor
//! neighbours and then walk into the annulus `400 < r² < 900` around (50, 50).
//! At tick 500 the target splits into its right half, at tick 700 it recovers.
//!
//! ```text
//! annulus [CONFIG.json] [OUTPUT_DIR]
//! ```
//!
//! Without a config file the default scenario runs (300 bugs, 1000 ticks).
//! Set `RUST_LOG=debug` to see every localisation and cull.

mod display;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sw_behavior::BugBehavior;
use sw_core::{ShapeTransition, SwarmConfig, Tick};
use sw_output::{CsvWriter, OutputWriter, SimOutputObserver};
use sw_sim::{SimBuilder, SimObserver, SwarmSnapshot, TickSummary};

use display::RingTally;

const DEFAULT_OUTPUT_DIR: &str = "output/annulus";

// ── Observer ──────────────────────────────────────────────────────────────────

/// Writes CSV output and prints a ring tally at every snapshot.
struct DemoObserver<W: OutputWriter> {
    inner:    SimOutputObserver<W>,
    deadline: Tick,
    tallies:  Vec<RingTally>,
    culled:   usize,
}

impl<W: OutputWriter> DemoObserver<W> {
    fn new(inner: SimOutputObserver<W>, deadline: Tick) -> Self {
        Self { inner, deadline, tallies: Vec::new(), culled: 0 }
    }
}

impl<W: OutputWriter> SimObserver for DemoObserver<W> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_transition(&mut self, transition: &ShapeTransition) {
        println!(
            "{:>6}  -- target becomes {} (outside policy: {})",
            transition.tick.0, transition.form, transition.policy
        );
        self.inner.on_transition(transition);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.culled += summary.culled;
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, snapshot: &SwarmSnapshot) {
        let tally = RingTally::from_snapshot(snapshot, self.deadline);
        println!(
            "{:>6}  {:>6} {:>10} {:>8} {:>8} {:>9}",
            tally.tick.0,
            tally.population(),
            tally.localized,
            tally.inside,
            tally.before_deadline,
            tally.after_deadline,
        );
        self.tallies.push(tally);
        self.inner.on_snapshot(snapshot);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SwarmConfig::from_json_file(Path::new(&path))
            .with_context(|| format!("loading config from {path}"))?,
        None => SwarmConfig::default(),
    };
    let output_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    println!("=== annulus — swarm shape formation ===");
    println!(
        "Bugs: {}  |  Ticks: {}  |  Seed: {}  |  Policy: {}",
        config.population_size, config.total_ticks, config.seed, config.outside_policy
    );
    println!();

    // 1. Place the swarm.
    let deadline = Tick(config.transition_tick_1);
    let mut sim = SimBuilder::new(config, BugBehavior)
        .build()
        .context("initialising swarm")?;
    info!(output = %output_dir.display(), "writing CSV output");

    // 2. Set up output.
    let writer = CsvWriter::new(&output_dir)
        .with_context(|| format!("opening output in {}", output_dir.display()))?;
    let mut obs = DemoObserver::new(SimOutputObserver::new(writer), deadline);

    // 3. Run.
    println!(
        "{:>6}  {:>6} {:>10} {:>8} {:>8} {:>9}",
        "tick", "bugs", "localized", "in ring", "outside", "overdue"
    );
    println!("{}", "-".repeat(52));
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 4. Summary.
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  snapshots written : {}", obs.tallies.len());
    println!("  bugs culled       : {}", obs.culled);
    if let Some(last) = obs.tallies.last() {
        let share = if last.population() == 0 {
            0.0
        } else {
            100.0 * last.inside as f64 / last.population() as f64
        };
        println!("  final ring share  : {share:.1}% ({} of {})", last.inside, last.population());
    }

    Ok(())
}
