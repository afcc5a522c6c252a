//! Report the compiled-in barrier strategy and what it costs.
//!
//! Runs each reference workload twice, once discarding the result and once
//! through the barrier, and prints the per-iteration times. On an optimized
//! build (`--release`) the bare column is often near zero: that gap is the
//! dead code the barrier keeps alive.
//!
//! Set `OPTBAR_ITERATIONS` to change the iteration count.

use std::env;

use optbar::{BarrierStrategy, ACTIVE_STRATEGY};
use optbar_bench::workloads::{collatz_steps, fnv1a, mix_rounds, sum_of_squares};
use optbar_bench::{measure, measure_barriered, per_iteration};

const DEFAULT_ITERATIONS: u64 = 10_000;

fn iterations() -> u64 {
    match env::var("OPTBAR_ITERATIONS") {
        Ok(raw) => match raw.parse() {
            Ok(n) => n,
            Err(e) => {
                eprintln!("optbar: ignoring OPTBAR_ITERATIONS={raw:?}: {e}");
                DEFAULT_ITERATIONS
            }
        },
        Err(_) => DEFAULT_ITERATIONS,
    }
}

fn main() {
    println!("=== optbar strategy report ===\n");
    println!("active strategy: {ACTIVE_STRATEGY}");
    for s in BarrierStrategy::ALL {
        let mark = if s == ACTIVE_STRATEGY { "*" } else { " " };
        let avail = if s.is_available() { "available" } else { "unavailable" };
        println!("  {mark} {s:<12} {avail}");
    }

    let n = iterations();
    let data: Vec<u8> = (0..1024u32).map(|i| (i * 7) as u8).collect();
    println!("\n{n} iterations per workload\n");
    println!("{:<16} {:>12} {:>12}", "workload", "bare", "barriered");

    let rows: [(&str, _, _); 4] = [
        (
            "sum_of_squares",
            measure(n, |i| {
                let _ = sum_of_squares(1_000 + i % 7);
            }),
            measure_barriered(n, |i| sum_of_squares(1_000 + i % 7)),
        ),
        (
            "collatz_steps",
            measure(n, |i| {
                let _ = collatz_steps(i + 1);
            }),
            measure_barriered(n, |i| collatz_steps(i + 1)),
        ),
        (
            "fnv1a_1k",
            measure(n, |_| {
                let _ = fnv1a(&data);
            }),
            measure_barriered(n, |_| fnv1a(&data)),
        ),
        (
            "mix_rounds",
            measure(n, |i| {
                let _ = mix_rounds(i, 100);
            }),
            measure_barriered(n, |i| mix_rounds(i, 100)),
        ),
    ];

    for (name, bare, barriered) in rows {
        println!(
            "{:<16} {:>12?} {:>12?}",
            name,
            per_iteration(bare, n),
            per_iteration(barriered, n),
        );
    }
}
