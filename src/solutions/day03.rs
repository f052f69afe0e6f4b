use anyhow::{bail, Result};

/// Largest number formed by `k` digits of `bank`, keeping their order.
fn max_joltage(bank: &[u8], k: usize) -> u64 {
    let mut joltage = 0;
    let mut start = 0;
    for remaining in (0..k).rev() {
        let window = &bank[start..bank.len() - remaining];
        let Some(&best) = window.iter().max() else {
            break;
        };
        // First occurrence, so the most digits stay available for the rest.
        let offset = window.iter().position(|&d| d == best).unwrap_or_default();
        joltage = joltage * 10 + best as u64;
        start += offset + 1;
    }
    joltage
}

fn total_joltage(input: &str, k: usize) -> Result<u64> {
    let mut total = 0;
    for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !line.bytes().all(|b| b.is_ascii_digit()) {
            bail!("invalid battery bank {:?}", line);
        }
        if line.len() < 12 {
            bail!("battery bank {:?} has fewer than 12 batteries", line);
        }
        let bank: Vec<u8> = line.bytes().map(|b| b - b'0').collect();
        total += max_joltage(&bank, k);
    }
    Ok(total)
}

pub fn part1(input: &str) -> Result<u64> {
    total_joltage(input, 2)
}

pub fn part2(input: &str) -> Result<u64> {
    total_joltage(input, 12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_in_order() {
        assert_eq!(max_joltage(&[9, 8, 7, 6, 5, 4, 3, 2, 1, 1, 1, 1, 1, 1, 1], 2), 98);
        assert_eq!(max_joltage(&[8, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 9], 2), 89);
        assert_eq!(max_joltage(&[1, 2, 3], 3), 123);
        assert_eq!(max_joltage(&[3, 3, 1, 3], 2), 33);
    }
}
