#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use life_engine::lifeengine::{CountBackend, LifeConfig, LifeEngine, Outcome};
use life_engine::{Coordinate, LifeError};
use rand::RngCore;
use rand::SeedableRng;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const DEFAULT_SEED: u64 = 0x5EED_1234_ABCD_EF01;

struct MainArgs {
    config: LifeConfig,
    side: i64,
    density: f64,
    seed: u64,
    steps: u64,
    check_interval: u64,
    auto_stop: bool,
}

fn parse_args() -> MainArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = MainArgs {
        config: LifeConfig::default().with_env_overrides(),
        side: 64,
        density: 0.35,
        seed: DEFAULT_SEED,
        steps: 1000,
        check_interval: 100,
        auto_stop: true,
    };
    let next_arg = |i: usize, flag: &str| -> &str {
        args.get(i)
            .map(String::as_str)
            .unwrap_or_else(|| panic!("{flag} requires a value"))
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--history" => {
                i += 1;
                let n: usize = next_arg(i, "--history")
                    .parse()
                    .expect("--history requires a non-negative integer");
                parsed.config = parsed.config.history_limit(n);
            }
            "--backend" => {
                i += 1;
                let backend = match next_arg(i, "--backend").to_ascii_lowercase().as_str() {
                    "serial" => CountBackend::Serial,
                    "parallel" => CountBackend::Parallel,
                    other => panic!("unknown backend: {other} (expected serial or parallel)"),
                };
                parsed.config = parsed.config.backend(backend);
            }
            "--side" => {
                i += 1;
                parsed.side = next_arg(i, "--side")
                    .parse()
                    .expect("--side requires an integer");
            }
            "--density" => {
                i += 1;
                parsed.density = next_arg(i, "--density")
                    .parse()
                    .expect("--density requires a number in [0, 1]");
            }
            "--seed" => {
                i += 1;
                let v = next_arg(i, "--seed");
                parsed.seed = if let Some(hex) = v.strip_prefix("0x") {
                    u64::from_str_radix(hex, 16).expect("--seed hex parse failed")
                } else {
                    v.parse().expect("--seed requires a u64")
                };
            }
            "--steps" => {
                i += 1;
                parsed.steps = next_arg(i, "--steps")
                    .parse()
                    .expect("--steps requires a non-negative integer");
            }
            "--check-interval" => {
                i += 1;
                let n: u64 = next_arg(i, "--check-interval")
                    .parse()
                    .expect("--check-interval requires a positive integer");
                parsed.check_interval = n.max(1);
            }
            "--no-auto-stop" => {
                parsed.auto_stop = false;
            }
            other => panic!(
                "unknown argument: {other}\nusage: life-engine [--history N] [--backend serial|parallel] [--side N] [--density F] [--seed N] [--steps N] [--check-interval N] [--no-auto-stop]"
            ),
        }
        i += 1;
    }
    parsed
}

fn random_soup(side: i64, density: f64, seed: u64) -> Vec<Coordinate> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let threshold = (u64::MAX as f64 * density.clamp(0.0, 1.0)) as u64;
    let half = side / 2;
    let mut cells = Vec::new();
    for y in -half..side - half {
        for x in -half..side - half {
            if rng.next_u64() <= threshold {
                cells.push(Coordinate::new(x, y));
            }
        }
    }
    cells
}

/// Step until `steps` run out or, with auto-stop, until an outcome is
/// terminal.
fn play(engine: &mut LifeEngine, args: &MainArgs) -> (Outcome, Duration) {
    let mut total = Duration::ZERO;
    let mut outcome = engine.outcome();
    let mut phase = Duration::ZERO;
    for step in 1..=args.steps {
        let start = Instant::now();
        outcome = engine.step();
        let elapsed = start.elapsed();
        total += elapsed;
        phase += elapsed;

        if step % args.check_interval == 0 {
            let phase_ms = phase.as_secs_f64() * 1000.0;
            let avg_ms = phase_ms / args.check_interval as f64;
            println!(
                "Generation {}: population = {}, outcome = {outcome} | {phase_ms:.3} ms, {avg_ms:.6} ms/step",
                engine.generation(),
                engine.population(),
            );
            phase = Duration::ZERO;
        }
        if args.auto_stop && outcome.is_terminal() {
            tracing::info!(generation = engine.generation(), %outcome, "auto-stop");
            break;
        }
    }
    (outcome, total)
}

fn run(args: MainArgs) -> Result<(), LifeError> {
    let soup = random_soup(args.side, args.density, args.seed);
    let mut engine = LifeEngine::with_config(soup, args.config.clone())?;
    tracing::info!(
        population = engine.population(),
        history_limit = engine.history_limit(),
        side = args.side,
        seed = args.seed,
        "seeded universe"
    );

    let (outcome, total) = play(&mut engine, &args);

    let generations = engine.generation();
    let total_ms = total.as_secs_f64() * 1000.0;
    let avg_ms = if generations > 0 {
        total_ms / generations as f64
    } else {
        0.0
    };
    println!("\n--- Summary ({generations} generations) ---");
    println!("Final outcome: {outcome}");
    println!("Population: {}", engine.population());
    match engine.bounds() {
        Some(b) => println!(
            "Bounds: x {}..={}, y {}..={} ({}x{})",
            b.min_x,
            b.max_x,
            b.min_y,
            b.max_y,
            b.width(),
            b.height()
        ),
        None => println!("Bounds: none"),
    }
    println!("Stepping: {total_ms:.3} ms total, {avg_ms:.6} ms/step");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = parse_args();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "cannot start simulation");
            ExitCode::FAILURE
        }
    }
}
