use std::{
    fmt::Display,
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::error;
use tracing_subscriber::{prelude::*, EnvFilter};

use aoc2025::{load_input, Part, ALL_SOLUTIONS, DAY12};

#[derive(Parser, Debug)]
#[command(about = "Advent of Code 2025 solutions")]
struct Args {
    /// Only run this day
    #[arg(short, long)]
    day: Option<usize>,

    /// Input file for the selected day
    #[arg(short, long, requires = "day")]
    input: Option<PathBuf>,

    /// Directory holding the `<day>.txt` inputs
    #[arg(long, env = "AOC_INPUTS", default_value = "inputs")]
    inputs_dir: PathBuf,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let input_for = |n: usize| -> Result<String> {
        match &args.input {
            Some(path) => load_input(path),
            None => load_input(&args.inputs_dir.join(format!("{}.txt", n))),
        }
    };

    if let Some(n) = args.day {
        match n {
            1..=11 => execute_day(n, ALL_SOLUTIONS[n - 1], &input_for(n)?)?,
            12 => execute_day(n, DAY12, &input_for(n)?)?,
            _ => bail!("no solution for day {}", n),
        };
        return Ok(());
    }

    let mut total = Duration::default();
    for (i, day) in ALL_SOLUTIONS.into_iter().enumerate() {
        total += execute_day(i + 1, day, &input_for(i + 1)?)?;
    }
    total += execute_day(12, DAY12, &input_for(12)?)?;
    println!("Total processing time: {}", format_duration(total));
    Ok(())
}

fn format_duration(dur: Duration) -> String {
    if dur.as_millis() != 0 {
        format!("{} ms", dur.as_millis())
    } else {
        format!("{} us", dur.as_micros())
    }
}

fn execute_day<S: Display, T: Display>(
    n: usize,
    (part1, part2): (Part<S>, Part<T>),
    input: &str,
) -> Result<Duration> {
    println!("Day {}:", n);
    // Both parts run even if the first one fails.
    let first = execute_part(n, 1, part1, input);
    let second = execute_part(n, 2, part2, input);
    println!("---------------------");
    Ok(first? + second?)
}

fn execute_part<T: Display>(day: usize, n: usize, f: Part<T>, input: &str) -> Result<Duration> {
    let start = Instant::now();
    let answer = f(input)
        .inspect_err(|e| error!(day, part = n, "{:#}", e))
        .with_context(|| format!("day {} part {} failed", day, n))?;
    let elapsed = start.elapsed();

    println!("{}", format_answer(n, answer, elapsed));
    Ok(elapsed)
}

/// Per-part times are always in microseconds.
fn format_answer<T: Display>(n: usize, answer: T, elapsed: Duration) -> String {
    format!("  Part {}: {} ({} us)", n, answer, elapsed.as_micros())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broken(_: &str) -> Result<u64> {
        bail!("broken part")
    }

    fn answer(input: &str) -> Result<u64> {
        Ok(input.len() as u64)
    }

    #[test]
    fn answers_in_microseconds() {
        assert_eq!(
            format_answer(1, 21, Duration::from_millis(3)),
            "  Part 1: 21 (3000 us)"
        );
        assert_eq!(
            format_answer(2, "*", Duration::from_micros(7)),
            "  Part 2: * (7 us)"
        );
    }

    #[test]
    fn parts_fail_independently() {
        let ok: Part<u64> = answer;
        let failing: Part<u64> = broken;
        assert!(execute_part(11, 1, ok, "abc").is_ok());
        assert!(execute_day(11, (failing, ok), "abc").is_err());
        assert!(execute_day(11, (ok, failing), "abc").is_err());
        assert!(execute_day(11, (ok, ok), "abc").is_ok());
    }
}
