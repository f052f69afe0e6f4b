pub mod solutions;
pub mod traversal;

use std::path::Path;

use anyhow::{Context, Result};

pub use solutions::*;

pub type Part<T> = fn(&str) -> Result<T>;
pub type Solution = (Part<u64>, Part<u64>);

/// Days 1 to 11. Day 12 only has a first part and is run on its own.
pub const ALL_SOLUTIONS: [Solution; 11] = [
    (day01::part1, day01::part2),
    (day02::part1, day02::part2),
    (day03::part1, day03::part2),
    (day04::part1, day04::part2),
    (day05::part1, day05::part2),
    (day06::part1, day06::part2),
    (day07::part1, day07::part2),
    (day08::part1, day08::part2),
    (day09::part1, day09::part2),
    (day10::part1, day10::part2),
    (day11::part1, day11::part2),
];

pub const DAY12: (Part<u64>, Part<&'static str>) = (day12::part1, day12::part2);

/// Result is only correct if bytes represents a valid positive number without any additional
/// characters! `None` if the number does not fit into a `u64`.
pub fn parse_u64_from_bytes(bytes: &[u8]) -> Option<u64> {
    let mut ret: u64 = 0;
    for b in bytes {
        ret = ret.checked_mul(10)?.checked_add((b - b'0') as u64)?;
    }
    Some(ret)
}

pub fn load_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file {}", path.display()))
}

pub fn default_input(n: usize) -> Result<String> {
    load_input(&Path::new("inputs").join(format!("{}.txt", n)))
}
