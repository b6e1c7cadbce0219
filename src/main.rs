use std::{process::ExitCode, time::Instant};

use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use itertools::Itertools;
use rayon::prelude::*;
use serde::Serialize;
use slidemax::{generate_random_values, sliding_min, Algorithm, SlidingMaxExt};

#[derive(clap::Subcommand)]
enum Command {
    /// Print the maximum of every window of the given values.
    Run {
        /// Window width.
        #[arg(short, default_value_t = 3)]
        k: usize,
        /// Input values. When empty, `n` random values below `max` are used.
        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,
        /// Length of the generated input.
        #[arg(short, default_value_t = 20)]
        n: usize,
        /// Upper bound (exclusive) of generated values.
        #[arg(long, default_value_t = 100)]
        max: u64,
        #[arg(long, value_enum, default_value_t = Algorithm::Deque)]
        alg: Algorithm,
        /// Print window minima instead.
        #[arg(long)]
        min: bool,
        /// Print the position of each maximum as JSON.
        #[arg(long, conflicts_with = "min")]
        positions: bool,
    },
    /// Check that all algorithms agree on random inputs.
    Verify {
        /// Length of each random input.
        #[arg(short, default_value_t = 1000)]
        n: usize,
        #[arg(long, default_value_t = 100)]
        trials: u64,
        /// Small values give many ties.
        #[arg(long, default_value_t = 10)]
        max: u64,
    },
    /// Time every algorithm on one random input and print the timings as JSON.
    Compare {
        #[arg(short, default_value_t = 1000000)]
        n: usize,
        #[arg(short, default_value_t = 1000)]
        k: usize,
        #[arg(long, default_value_t = 1000)]
        max: u64,
        /// Skip the algorithms whose running time grows with k.
        #[arg(long)]
        linear_only: bool,
    },
}

/// Sliding window maximum with a monotone deque.
#[derive(clap::Parser)]
struct Args {
    /// Seed for generated inputs.
    #[clap(long, default_value_t = 213456)]
    seed: u64,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Serialize)]
struct Timing {
    alg: Algorithm,
    n: usize,
    k: usize,
    millis: f64,
}

fn main() -> ExitCode {
    color_backtrace::install();
    let args = Args::parse();
    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red());
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the command succeeded.
fn run(args: Args) -> Result<bool> {
    match args.command {
        Command::Run {
            k,
            values,
            n,
            max,
            alg,
            min,
            positions,
        } => {
            let input = if values.is_empty() {
                let input = generate_random_values(n, max, args.seed)
                    .into_iter()
                    .map(|x| x as i64)
                    .collect_vec();
                eprintln!("input: {input:?}");
                input
            } else {
                values
            };
            if positions {
                let maxima: Vec<_> = input.iter().copied().sliding_max(k)?.collect();
                if maxima.is_empty() {
                    bail!("window width {k} exceeds input length {}", input.len());
                }
                println!("{}", serde_json::to_string(&maxima)?);
            } else {
                let output = if min {
                    sliding_min(&input, k)?
                } else {
                    alg.run(&input, k)?
                };
                println!("{}", output.iter().join(" "));
            }
            Ok(true)
        }
        Command::Verify { n, trials, max } => {
            if n == 0 {
                bail!("input length must be positive");
            }
            // All widths for short inputs, about 20 spread-out widths for long ones.
            let ks = (1..=n)
                .step_by((n / 20).max(1))
                .chain([n])
                .dedup()
                .collect_vec();
            eprintln!("Verifying {trials} inputs of length {n} for k in {ks:?}");
            let failures: Vec<String> = (0..trials)
                .into_par_iter()
                .flat_map_iter(|trial| {
                    let input = generate_random_values(n, max, args.seed.wrapping_add(trial));
                    ks.iter()
                        .flat_map(|&k| verify_one(&input, k, trial))
                        .collect_vec()
                })
                .collect();
            for f in &failures {
                eprintln!("{} {f}", "MISMATCH".red());
            }
            if failures.is_empty() {
                eprintln!("{}", "ok".green());
            }
            Ok(failures.is_empty())
        }
        Command::Compare {
            n,
            k,
            max,
            linear_only,
        } => {
            let input = generate_random_values(n, max, args.seed);
            let mut timings = vec![];
            for alg in Algorithm::ALL {
                if linear_only && alg.is_quadratic() {
                    continue;
                }
                let start = Instant::now();
                let output = alg.run(&input, k)?;
                let millis = start.elapsed().as_secs_f64() * 1000.;
                eprintln!("{alg:?}: {millis:.1}ms ({} windows)", output.len());
                timings.push(Timing { alg, n, k, millis });
            }
            println!("{}", serde_json::to_string(&timings)?);
            Ok(true)
        }
    }
}

/// Compare every algorithm and the streaming iterator against brute force.
/// Returns a description of each disagreement.
fn verify_one(input: &[u64], k: usize, trial: u64) -> Vec<String> {
    let expected = match Algorithm::BruteForce.run(input, k) {
        Ok(expected) => expected,
        Err(e) => return vec![format!("trial {trial} k={k}: {e}")],
    };
    let mut failures = vec![];
    for alg in Algorithm::ALL {
        match alg.run(input, k) {
            Ok(output) if output == expected => {}
            Ok(_) => {
                failures.push(format!("trial {trial} k={k}: {alg:?} differs from brute force"))
            }
            Err(e) => failures.push(format!("trial {trial} k={k}: {alg:?} failed: {e}")),
        }
    }
    let streamed = input
        .iter()
        .copied()
        .sliding_max(k)
        .map(|it| it.map(|e| e.val).collect_vec());
    if streamed.as_ref() != Ok(&expected) {
        failures.push(format!(
            "trial {trial} k={k}: streaming maxima differ from brute force"
        ));
    }
    failures
}
