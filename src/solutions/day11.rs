use anyhow::{bail, Result};

use crate::traversal::Graph;

fn parse(input: &str) -> Result<Graph> {
    let graph = Graph::parse(input)?;
    if graph.is_empty() {
        bail!("no devices listed");
    }
    Ok(graph)
}

/// Paths from `you` to `out`.
pub fn part1(input: &str) -> Result<u64> {
    Ok(parse(input)?.count_paths("you", "out")?)
}

/// Paths from `svr` to `out` that visit both `dac` and `fft`.
pub fn part2(input: &str) -> Result<u64> {
    Ok(parse(input)?.targeted("out", &["dac", "fft"])?.count("svr")?)
}
