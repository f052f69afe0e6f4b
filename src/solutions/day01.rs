use anyhow::{bail, Context, Result};
use num::Integer;

const DIAL_SIZE: i64 = 100;
const DIAL_START: i64 = 50;

fn parse_rotation(line: &str) -> Result<i64> {
    let amount = |digits: &str| -> Result<i64> {
        let clicks: u32 = digits
            .parse()
            .with_context(|| format!("invalid rotation {:?}", line))?;
        Ok(clicks.into())
    };
    if let Some(rest) = line.strip_prefix('L') {
        Ok(-amount(rest)?)
    } else if let Some(rest) = line.strip_prefix('R') {
        amount(rest)
    } else {
        bail!("invalid rotation {:?}", line)
    }
}

fn rotations(input: &str) -> Result<Vec<i64>> {
    input
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(parse_rotation)
        .collect()
}

/// Times the dial comes to rest on zero.
pub fn part1(input: &str) -> Result<u64> {
    let mut pos = DIAL_START;
    let mut stops = 0;
    for turn in rotations(input)? {
        pos = (pos + turn).mod_floor(&DIAL_SIZE);
        if pos == 0 {
            stops += 1;
        }
    }
    Ok(stops)
}

/// Times the dial points at zero, including while it is turning.
pub fn part2(input: &str) -> Result<u64> {
    let mut pos = DIAL_START;
    let mut clicks = 0;
    for turn in rotations(input)? {
        let end = pos + turn;
        // Count multiples of the dial size passed over, excluding the starting position.
        clicks += if turn >= 0 {
            Integer::div_floor(&end, &DIAL_SIZE) - Integer::div_floor(&pos, &DIAL_SIZE)
        } else {
            Integer::div_floor(&(pos - 1), &DIAL_SIZE) - Integer::div_floor(&(end - 1), &DIAL_SIZE)
        };
        pos = end.mod_floor(&DIAL_SIZE);
    }
    Ok(clicks as u64)
}
