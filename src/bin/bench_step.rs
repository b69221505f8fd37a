#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use life_engine::lifeengine::{CountBackend, LifeConfig, LifeEngine, Outcome};
use rand::RngCore;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Times `step()` on a seeded square soup and reports how the run was
/// classified along the way.
struct StepBench {
    config: LifeConfig,
    size: i64,
    density: f64,
    steps: u64,
    seed: u64,
}

fn parse_args() -> StepBench {
    let args: Vec<String> = std::env::args().collect();
    let mut bench = StepBench {
        config: LifeConfig::default().with_env_overrides(),
        size: 256,
        density: 0.42,
        steps: 50,
        seed: 0x5EED_1234_ABCD_EF01,
    };
    let value = |i: usize, flag: &str| -> &str {
        args.get(i)
            .map(String::as_str)
            .unwrap_or_else(|| panic!("{flag} requires a value"))
    };
    let mut i = 1;
    while i < args.len() {
        i += 1;
        match args[i - 1].as_str() {
            "--size" => bench.size = value(i, "--size").parse().expect("--size expects i64"),
            "--density" => {
                bench.density = value(i, "--density").parse().expect("--density expects f64")
            }
            "--steps" => bench.steps = value(i, "--steps").parse().expect("--steps expects u64"),
            "--seed" => bench.seed = value(i, "--seed").parse().expect("--seed expects u64"),
            "--history" => {
                let n = value(i, "--history").parse().expect("--history expects usize");
                bench.config = bench.config.history_limit(n);
            }
            "--backend" => {
                let backend = match value(i, "--backend") {
                    "serial" => CountBackend::Serial,
                    "parallel" => CountBackend::Parallel,
                    other => panic!("unknown backend: {other}"),
                };
                bench.config = bench.config.backend(backend);
            }
            other => panic!(
                "unknown argument: {other}\nusage: bench_step [--size N] [--density F] [--steps N] [--seed N] [--history N] [--backend serial|parallel]"
            ),
        }
        i += 1;
    }
    bench
}

fn soup(size: i64, density: f64, seed: u64) -> Vec<(i64, i64)> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let threshold = (u64::MAX as f64 * density.clamp(0.0, 1.0)) as u64;
    (0..size)
        .flat_map(|y| (0..size).map(move |x| (x, y)))
        .filter(|_| rng.next_u64() <= threshold)
        .collect()
}

/// Steps per outcome, plus where the run first settled.
#[derive(Default)]
struct Tally {
    advanced: u64,
    still: u64,
    cycled: u64,
    extinct: u64,
    first_terminal: Option<(u64, Outcome)>,
}

impl Tally {
    fn record(&mut self, generation: u64, outcome: Outcome) {
        match outcome {
            Outcome::Advanced => self.advanced += 1,
            Outcome::Static => self.still += 1,
            Outcome::Cycled { .. } => self.cycled += 1,
            Outcome::Extinct => self.extinct += 1,
        }
        if outcome.is_terminal() && self.first_terminal.is_none() {
            self.first_terminal = Some((generation, outcome));
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let bench = parse_args();
    let mut engine = LifeEngine::with_config(
        soup(bench.size, bench.density, bench.seed),
        bench.config.clone(),
    )
    .unwrap_or_else(|err| panic!("invalid bench configuration: {err}"));
    let seeded = engine.population();

    let mut tally = Tally::default();
    let mut elapsed = Duration::ZERO;
    for _ in 0..bench.steps {
        let start = Instant::now();
        let outcome = engine.step();
        elapsed += start.elapsed();
        tally.record(engine.generation(), outcome);
    }

    let total_ms = elapsed.as_secs_f64() * 1000.0;
    let avg_ms = total_ms / bench.steps.max(1) as f64;
    let first_terminal = match tally.first_terminal {
        Some((generation, outcome)) => format!("{outcome}@{generation}"),
        None => "none".to_string(),
    };
    println!(
        "size={} seeded={} steps={} total_ms={total_ms:.6} avg_ms={avg_ms:.6}",
        bench.size, seeded, bench.steps,
    );
    println!(
        "generation={} population={} history={}/{} outcome={}",
        engine.generation(),
        engine.population(),
        engine.history_len(),
        engine.history_limit(),
        engine.outcome(),
    );
    println!(
        "advanced={} static={} cycled={} extinct={} first_terminal={first_terminal}",
        tally.advanced, tally.still, tally.cycled, tally.extinct,
    );
}
