use std::ops::RangeInclusive;

use anyhow::{bail, Context, Result};

fn parse_range(line: &str) -> Result<RangeInclusive<u64>> {
    let (start, end) = line
        .split_once('-')
        .with_context(|| format!("invalid range line (no '-'): {:?}", line))?;
    let start: u64 = start.trim().parse().with_context(|| format!("invalid range {:?}", line))?;
    let end: u64 = end.trim().parse().with_context(|| format!("invalid range {:?}", line))?;
    if start > end {
        bail!("range start > end: {:?}", line);
    }
    Ok(start..=end)
}

/// Sorted, disjoint ranges covering the same ids as `ranges`.
fn merge(mut ranges: Vec<RangeInclusive<u64>>) -> Vec<RangeInclusive<u64>> {
    ranges.sort_unstable_by_key(|r| *r.start());
    let mut merged: Vec<RangeInclusive<u64>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start() <= last.end() => {
                if range.end() > last.end() {
                    *last = *last.start()..=*range.end();
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}

struct Inventory {
    fresh: Vec<RangeInclusive<u64>>,
    available: Vec<u64>,
}

impl Inventory {
    fn parse(input: &str) -> Result<Self> {
        let mut lines = input.lines().map(str::trim);
        let ranges = lines
            .by_ref()
            .take_while(|l| !l.is_empty())
            .map(parse_range)
            .collect::<Result<Vec<_>>>()?;
        let available = lines
            .filter(|l| !l.is_empty())
            .map(|line| -> Result<u64> {
                line.parse().with_context(|| format!("invalid id {:?}", line))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            fresh: merge(ranges),
            available,
        })
    }

    fn is_fresh(&self, id: u64) -> bool {
        let idx = self.fresh.partition_point(|r| r.end() < &id);
        self.fresh.get(idx).is_some_and(|r| r.contains(&id))
    }
}

/// Available ingredients that fall into a fresh range.
pub fn part1(input: &str) -> Result<u64> {
    let inventory = Inventory::parse(input)?;
    Ok(inventory
        .available
        .iter()
        .filter(|&&id| inventory.is_fresh(id))
        .count() as u64)
}

/// Ids covered by the fresh ranges.
pub fn part2(input: &str) -> Result<u64> {
    let inventory = Inventory::parse(input)?;
    Ok(inventory.fresh.iter().map(|r| r.end() - r.start() + 1).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_overlaps() {
        assert_eq!(merge(vec![10..=14, 3..=5, 16..=20, 12..=18]), vec![3..=5, 10..=20]);
        assert_eq!(merge(vec![1..=10, 2..=3]), vec![1..=10]);
        assert_eq!(merge(vec![]), vec![]);
    }
}
