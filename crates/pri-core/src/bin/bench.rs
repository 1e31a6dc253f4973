/// Pure Rust core benchmarks for the PRI engine.
///
/// Uses std::time::Instant for timing, a deterministic LCG PRNG for data generation,
/// and std::hint::black_box to prevent dead-code elimination.
use std::hint::black_box;
use std::time::{Duration, Instant};

use pri_core::observation::{
    ParameterVector, AMMONIA, CHLOROPHYLL, COLIFORMS, PERMANGANATE_INDEX, PH, TURBIDITY,
    WATER_TEMP,
};
use pri_core::{Evaluator, ReferenceTables};

const REPEATS: usize = 7;

const POLLUTANTS: &[(&str, f64)] = &[
    ("F", 1.5),
    ("As", 0.08),
    ("Cd", 0.006),
    ("Cn_total", 0.3),
    ("V_phen", 0.01),
    ("Oils", 0.08),
    ("An_SAA", 0.3),
    ("SO4", 300.0),
    ("Cl", 300.0),
    ("NO3_n", 15.0),
    ("W_Fe", 0.5),
    ("W_Mn", 0.2),
];

/// Simple LCG PRNG for deterministic data generation.
fn make_data(n: usize, seed: u64) -> Vec<ParameterVector> {
    let mut state = seed;
    let mut next_f64 = || -> f64 {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    };

    (0..n)
        .map(|_| {
            let mut pv = ParameterVector::new()
                .with(TURBIDITY, Some(next_f64() * 60.0))
                .with(CHLOROPHYLL, Some(next_f64() * 40.0))
                .with(WATER_TEMP, Some(next_f64() * 30.0))
                .with(PH, Some(5.5 + next_f64() * 4.0))
                .with(COLIFORMS, Some(next_f64() * 20000.0))
                .with(AMMONIA, Some(next_f64() * 2.0))
                .with(PERMANGANATE_INDEX, Some(next_f64() * 10.0));
            for &(name, scale) in POLLUTANTS {
                pv = pv.with(name, Some(next_f64() * scale));
            }
            pv
        })
        .collect()
}

/// Run a closure `REPEATS` times, return the median duration.
fn median_time<F: FnMut()>(mut f: F) -> Duration {
    let mut times: Vec<Duration> = (0..REPEATS)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .collect();
    times.sort();
    times[REPEATS / 2]
}

fn main() -> pri_core::Result<()> {
    let tables = ReferenceTables::bundled()?;
    let evaluator = Evaluator::new(&tables)?;

    println!("{:>10} | {:>12} | {:>12}", "n", "median", "per obs");
    println!("-----------|--------------|-------------");
    for &n in &[1_000usize, 10_000, 100_000] {
        let data = make_data(n, 42);

        // Warmup
        black_box(evaluator.evaluate_batch(&data)?);

        let dur = median_time(|| {
            let _ = black_box(evaluator.evaluate_batch(black_box(&data)));
        });
        println!(
            "{:>10} | {:>10.3}ms | {:>10.1}ns",
            n,
            dur.as_secs_f64() * 1e3,
            dur.as_nanos() as f64 / n as f64
        );
    }
    Ok(())
}
