use anyhow::Result;

use crate::traversal::Grid;

pub fn part1(input: &str) -> Result<u64> {
    Ok(Grid::parse(input)?.count_splits())
}

pub fn part2(input: &str) -> Result<u64> {
    Ok(Grid::parse(input)?.count_paths())
}
