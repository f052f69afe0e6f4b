use std::ops::RangeInclusive;

use anyhow::{bail, Context, Result};

fn parse_ranges(input: &str) -> Result<Vec<RangeInclusive<u64>>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| -> Result<RangeInclusive<u64>> {
            let (start, end) = r
                .split_once('-')
                .with_context(|| format!("invalid range {:?}", r))?;
            let start: u64 = start.parse().with_context(|| format!("invalid range {:?}", r))?;
            let end: u64 = end.parse().with_context(|| format!("invalid range {:?}", r))?;
            if start > end {
                bail!("range start > end: {:?}", r);
            }
            Ok(start..=end)
        })
        .collect()
}

fn digit_count(id: u64) -> u32 {
    id.checked_ilog10().unwrap_or(0) + 1
}

/// Whether the decimal digits of `id` are one block repeated exactly `times` times.
fn is_repeated(id: u64, times: u32) -> bool {
    let digits = digit_count(id);
    if digits % times != 0 {
        return false;
    }
    let modulus = 10u64.pow(digits / times);
    let block = id % modulus;
    let mut rest = id;
    while rest != 0 {
        if rest % modulus != block {
            return false;
        }
        rest /= modulus;
    }
    true
}

fn sum_ids(input: &str, invalid: impl Fn(u64) -> bool) -> Result<u64> {
    let mut sum = 0u64;
    for range in parse_ranges(input)? {
        for id in range.filter(|&id| invalid(id)) {
            sum = sum.checked_add(id).context("sum of invalid ids overflows")?;
        }
    }
    Ok(sum)
}

/// Sum of the ids made of one block repeated twice.
pub fn part1(input: &str) -> Result<u64> {
    sum_ids(input, |id| is_repeated(id, 2))
}

/// Sum of the ids made of one block repeated any number of times.
pub fn part2(input: &str) -> Result<u64> {
    sum_ids(input, |id| (2..=digit_count(id)).any(|times| is_repeated(id, times)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repetitions() {
        assert!(is_repeated(11, 2));
        assert!(is_repeated(1010, 2));
        assert!(!is_repeated(1001, 2));
        assert!(!is_repeated(101, 2));
        assert!(is_repeated(111, 3));
        assert!(is_repeated(12341234, 2));
        assert!(is_repeated(1212121212, 5));
        assert!(!is_repeated(7, 2));
    }
}
