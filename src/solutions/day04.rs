use anyhow::{bail, Result};

const MAX_CROWD: usize = 3;

struct Rolls {
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl Rolls {
    fn parse(input: &str) -> Result<Self> {
        let mut cells = Vec::new();
        let mut width = 0;
        let mut height = 0;
        for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if height == 0 {
                width = line.len();
            } else if line.len() != width {
                bail!("row {} has width {}, expected {}", height, line.len(), width);
            }
            for b in line.bytes() {
                cells.push(match b {
                    b'@' => true,
                    b'.' => false,
                    _ => bail!("invalid cell {:?}", b as char),
                });
            }
            height += 1;
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    fn neighbours(&self, idx: usize) -> usize {
        let (row, col) = (idx / self.width, idx % self.width);
        let mut count = 0;
        for r in row.saturating_sub(1)..=(row + 1).min(self.height - 1) {
            for c in col.saturating_sub(1)..=(col + 1).min(self.width - 1) {
                if (r, c) != (row, col) && self.cells[r * self.width + c] {
                    count += 1;
                }
            }
        }
        count
    }

    fn accessible(&self) -> Vec<usize> {
        (0..self.cells.len())
            .filter(|&idx| self.cells[idx] && self.neighbours(idx) <= MAX_CROWD)
            .collect()
    }
}

/// Rolls reachable right away.
pub fn part1(input: &str) -> Result<u64> {
    Ok(Rolls::parse(input)?.accessible().len() as u64)
}

/// Rolls removed in total when accessible rolls are taken away round after round.
pub fn part2(input: &str) -> Result<u64> {
    let mut rolls = Rolls::parse(input)?;
    let mut removed = 0;
    let mut batch = rolls.accessible();
    while !batch.is_empty() {
        removed += batch.len() as u64;
        for idx in batch {
            rolls.cells[idx] = false;
        }
        batch = rolls.accessible();
    }
    Ok(removed)
}
