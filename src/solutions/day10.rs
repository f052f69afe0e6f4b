use anyhow::{bail, Context, Result};
use regex::Regex;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Widest light panel or joltage list a machine may have.
const MAX_WIDTH: usize = 32;
/// Button subsets are enumerated exhaustively.
const MAX_BUTTONS: usize = 20;

struct Machine {
    lights: u32,
    buttons: Vec<Vec<usize>>,
    joltage: Vec<u16>,
}

fn parse_list<T: std::str::FromStr>(list: &str) -> Result<Vec<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<T>().with_context(|| format!("invalid number {:?}", s)))
        .collect()
}

struct MachineParser {
    lights: Regex,
    button: Regex,
    joltage: Regex,
}

impl MachineParser {
    fn new() -> Result<Self> {
        Ok(Self {
            lights: Regex::new(r"\[([.#]*)\]")?,
            button: Regex::new(r"\(([0-9,\s]*)\)")?,
            joltage: Regex::new(r"\{([0-9,\s]*)\}")?,
        })
    }

    fn parse(&self, line: &str) -> Result<Machine> {
        let lights_caps = self
            .lights
            .captures(line)
            .with_context(|| format!("missing light pattern in {:?}", line))?;
        let pattern = &lights_caps[1];
        let joltage_caps = self
            .joltage
            .captures(line)
            .with_context(|| format!("missing joltage in {:?}", line))?;
        let joltage: Vec<u16> = parse_list(&joltage_caps[1])?;
        let buttons = self
            .button
            .captures_iter(line)
            .map(|c| parse_list::<usize>(&c[1]))
            .collect::<Result<Vec<_>>>()?;

        if pattern.len() > MAX_WIDTH || joltage.len() > MAX_WIDTH {
            bail!("machine wider than {} lights: {:?}", MAX_WIDTH, line);
        }
        if pattern.len() != joltage.len() {
            bail!("light pattern and joltage disagree in width: {:?}", line);
        }
        if buttons.len() > MAX_BUTTONS {
            bail!("machine has more than {} buttons: {:?}", MAX_BUTTONS, line);
        }
        if buttons.iter().flatten().any(|&i| i >= pattern.len()) {
            bail!("button wired to a missing light: {:?}", line);
        }

        let lights = pattern
            .bytes()
            .enumerate()
            .filter(|&(_, b)| b == b'#')
            .fold(0, |acc, (i, _)| acc | 1 << i);

        Ok(Machine {
            lights,
            buttons,
            joltage,
        })
    }
}

impl Machine {
    fn button_mask(&self, button: usize) -> u32 {
        self.buttons[button].iter().fold(0, |acc, &i| acc | 1 << i)
    }

    /// Fewest presses toggling exactly the lit pattern. Pressing a button twice cancels out, so
    /// every button is pressed at most once.
    fn min_toggles(&self) -> Option<u32> {
        let masks: Vec<u32> = (0..self.buttons.len()).map(|b| self.button_mask(b)).collect();
        let mut lit = vec![0u32; 1 << masks.len()];
        let mut best = None;
        for subset in 0..lit.len() {
            if subset != 0 {
                let lowest = subset.trailing_zeros() as usize;
                lit[subset] = lit[subset & (subset - 1)] ^ masks[lowest];
            }
            if lit[subset] == self.lights {
                let presses = subset.count_ones();
                best = Some(best.map_or(presses, |b: u32| b.min(presses)));
            }
        }
        best
    }

    /// Fewest presses bringing every counter to its joltage.
    fn min_presses(&self) -> Option<u64> {
        let mut by_parity: FxHashMap<u32, Vec<(u64, Vec<u16>)>> = FxHashMap::default();
        for subset in 0..1usize << self.buttons.len() {
            let mut effect = vec![0u16; self.joltage.len()];
            for (b, wires) in self.buttons.iter().enumerate() {
                if subset & 1 << b != 0 {
                    for &i in wires {
                        effect[i] += 1;
                    }
                }
            }
            by_parity
                .entry(parity(&effect))
                .or_default()
                .push((subset.count_ones() as u64, effect));
        }
        JoltageSearch {
            by_parity: &by_parity,
            memo: FxHashMap::default(),
        }
        .min_presses(&self.joltage)
    }
}

fn parity(counters: &[u16]) -> u32 {
    counters
        .iter()
        .enumerate()
        .fold(0, |acc, (i, &c)| acc | (c as u32 & 1) << i)
}

/// Every solution splits into the buttons pressed an odd number of times plus twice some other
/// solution for the halved remainder. The odd part must match the target's parity.
struct JoltageSearch<'a> {
    by_parity: &'a FxHashMap<u32, Vec<(u64, Vec<u16>)>>,
    memo: FxHashMap<Vec<u16>, Option<u64>>,
}

impl JoltageSearch<'_> {
    fn min_presses(&mut self, target: &[u16]) -> Option<u64> {
        if target.iter().all(|&t| t == 0) {
            return Some(0);
        }
        if let Some(&known) = self.memo.get(target) {
            return known;
        }

        let by_parity = self.by_parity;
        let candidates = by_parity.get(&parity(target)).map(Vec::as_slice).unwrap_or_default();
        let mut best: Option<u64> = None;
        for (presses, effect) in candidates {
            if effect.iter().zip(target).any(|(e, t)| e > t) {
                continue;
            }
            let half: Vec<u16> = target.iter().zip(effect).map(|(t, e)| (t - e) / 2).collect();
            if let Some(rest) = self.min_presses(&half) {
                let total = presses + 2 * rest;
                best = Some(best.map_or(total, |b| b.min(total)));
            }
        }
        self.memo.insert(target.to_vec(), best);
        best
    }
}

fn total_presses(
    input: &str,
    goal: &str,
    fewest: impl Fn(&Machine) -> Option<u64>,
) -> Result<u64> {
    let parser = MachineParser::new()?;
    let mut total = 0;
    for (n, line) in input.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
        let machine = parser.parse(line)?;
        let presses = fewest(&machine)
            .with_context(|| format!("no button combination {} machine {}", goal, n + 1))?;
        debug!(machine = n + 1, presses, goal, "configured machine");
        total += presses;
    }
    Ok(total)
}

/// Fewest presses that switch every machine's lights into their pattern.
pub fn part1(input: &str) -> Result<u64> {
    total_presses(input, "lights", |machine| machine.min_toggles().map(u64::from))
}

/// Fewest presses that raise every machine's counters to their joltage levels.
pub fn part2(input: &str) -> Result<u64> {
    total_presses(input, "powers", Machine::min_presses)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(line: &str) -> Result<Machine> {
        MachineParser::new()?.parse(line)
    }

    #[test]
    fn single_machine() -> Result<()> {
        let m = machine("[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}")?;
        assert_eq!(m.lights, 0b0110);
        assert_eq!(m.buttons.len(), 6);
        assert_eq!(m.min_toggles(), Some(2));
        assert_eq!(m.min_presses(), Some(10));
        Ok(())
    }

    #[test]
    fn unreachable() -> Result<()> {
        let m = machine("[#.] (1) {1,1}")?;
        assert_eq!(m.min_toggles(), None);
        assert_eq!(m.min_presses(), None);
        Ok(())
    }

    #[test]
    fn rejects_bad_wiring() {
        assert!(machine("[#.] (2) {1,1}").is_err());
        assert!(machine("[#.] (0) {1}").is_err());
        assert!(machine("(0) {1}").is_err());
    }
}
