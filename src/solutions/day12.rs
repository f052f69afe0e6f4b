use anyhow::{bail, Context, Result};
use tracing::{debug, trace};

/// Presents are drawn on a grid this many cells wide and tall.
const SHAPE_SIZE: usize = 3;

/// Cells of one orientation relative to its first cell in reading order.
type Orientation = Vec<(usize, isize)>;

struct Shape {
    area: usize,
    orientations: Vec<Orientation>,
}

impl Shape {
    fn parse(rows: &[&str]) -> Result<Self> {
        if rows.len() > SHAPE_SIZE {
            bail!("present is taller than {} rows", SHAPE_SIZE);
        }
        let mut cells = Vec::new();
        for (r, row) in rows.iter().enumerate() {
            if row.len() > SHAPE_SIZE {
                bail!("present row {:?} is wider than {}", row, SHAPE_SIZE);
            }
            for (c, b) in row.bytes().enumerate() {
                match b {
                    b'#' => cells.push((r as i32, c as i32)),
                    b'.' => {}
                    _ => bail!("invalid char in present grid: {:?}", b as char),
                }
            }
        }
        if cells.is_empty() {
            bail!("present has no cells");
        }
        Ok(Self {
            area: cells.len(),
            orientations: orientations(&cells),
        })
    }
}

/// Distinct rotations and mirror images of `cells`.
fn orientations(cells: &[(i32, i32)]) -> Vec<Orientation> {
    let mut seen: Vec<Vec<(i32, i32)>> = Vec::with_capacity(8);
    for mirrored in [false, true] {
        let mut current: Vec<(i32, i32)> = cells
            .iter()
            .map(|&(r, c)| if mirrored { (r, -c) } else { (r, c) })
            .collect();
        for _ in 0..4 {
            current = current.iter().map(|&(r, c)| (c, -r)).collect();
            let min_r = current.iter().map(|p| p.0).min().unwrap_or(0);
            let min_c = current.iter().map(|p| p.1).min().unwrap_or(0);
            let mut normalized: Vec<(i32, i32)> =
                current.iter().map(|&(r, c)| (r - min_r, c - min_c)).collect();
            normalized.sort_unstable();
            if !seen.contains(&normalized) {
                seen.push(normalized);
            }
        }
    }
    seen.into_iter()
        .map(|cells| {
            let (r0, c0) = cells[0];
            cells
                .iter()
                .map(|&(r, c)| ((r - r0) as usize, (c - c0) as isize))
                .collect()
        })
        .collect()
}

struct Region {
    width: usize,
    height: usize,
    counts: Vec<usize>,
}

impl Region {
    fn parse(dims: &str, counts: &str, shapes: usize) -> Result<Self> {
        let (width, height) = dims
            .split_once('x')
            .with_context(|| format!("invalid region dims {:?}", dims))?;
        let counts = counts
            .split_whitespace()
            .map(|c| c.parse().with_context(|| format!("invalid present count {:?}", c)))
            .collect::<Result<Vec<usize>>>()?;
        if counts.len() != shapes {
            bail!("region {} lists {} counts for {} presents", dims, counts.len(), shapes);
        }
        Ok(Self {
            width: width.trim().parse().with_context(|| format!("invalid width {:?}", dims))?,
            height: height.trim().parse().with_context(|| format!("invalid height {:?}", dims))?,
            counts,
        })
    }

    fn fits(&self, shapes: &[Shape]) -> Result<bool> {
        let needed: usize = self.counts.iter().zip(shapes).map(|(n, s)| n * s.area).sum();
        let available = self.width * self.height;
        if needed > available {
            return Ok(false);
        }
        let presents: usize = self.counts.iter().sum();
        if (self.width / SHAPE_SIZE) * (self.height / SHAPE_SIZE) >= presents {
            return Ok(true);
        }

        debug!(
            width = self.width,
            height = self.height,
            presents,
            "region needs an exact packing search"
        );
        // Orientations are closed under transposition, so scan along the short side.
        let width = self.width.min(self.height);
        let height = self.width.max(self.height);
        if width > u64::BITS as usize {
            bail!("region {}x{} is too wide to search", self.width, self.height);
        }
        let mut packer = Packer {
            shapes,
            width,
            height,
            rows: vec![0; height],
            counts: self.counts.clone(),
            left: presents,
            nodes: 0,
        };
        let fits = packer.search(0, available - needed);
        trace!(nodes = packer.nodes, fits, "packing search finished");
        Ok(fits)
    }
}

/// Fills the region cell by cell in reading order. Each empty cell is either covered by a present
/// anchored there or left empty, and only `slack` cells may be left empty.
struct Packer<'a> {
    shapes: &'a [Shape],
    width: usize,
    height: usize,
    rows: Vec<u64>,
    counts: Vec<usize>,
    left: usize,
    nodes: u64,
}

impl Packer<'_> {
    fn filled(&self, row: usize, col: usize) -> bool {
        self.rows[row] & 1 << col != 0
    }

    fn placement(&self, orientation: &Orientation, row: usize, col: usize) -> bool {
        orientation.iter().all(|&(dr, dc)| {
            let (r, c) = (row + dr, col as isize + dc);
            r < self.height && (0..self.width as isize).contains(&c) && !self.filled(r, c as usize)
        })
    }

    fn toggle(&mut self, orientation: &Orientation, row: usize, col: usize) {
        for &(dr, dc) in orientation {
            self.rows[row + dr] ^= 1 << (col as isize + dc);
        }
    }

    fn search(&mut self, mut pos: usize, slack: usize) -> bool {
        self.nodes += 1;
        if self.left == 0 {
            return true;
        }
        let end = self.width * self.height;
        while pos < end && self.filled(pos / self.width, pos % self.width) {
            pos += 1;
        }
        if pos == end {
            return false;
        }
        let (row, col) = (pos / self.width, pos % self.width);

        let shapes = self.shapes;
        for (idx, shape) in shapes.iter().enumerate() {
            if self.counts[idx] == 0 {
                continue;
            }
            for orientation in &shape.orientations {
                if !self.placement(orientation, row, col) {
                    continue;
                }
                self.toggle(orientation, row, col);
                self.counts[idx] -= 1;
                self.left -= 1;
                let done = self.search(pos + 1, slack);
                self.counts[idx] += 1;
                self.left += 1;
                self.toggle(orientation, row, col);
                if done {
                    return true;
                }
            }
        }

        if slack > 0 {
            self.rows[row] |= 1 << col;
            let done = self.search(pos + 1, slack - 1);
            self.rows[row] &= !(1 << col);
            return done;
        }
        false
    }
}

/// Regions that can hold all of their listed presents.
pub fn part1(input: &str) -> Result<u64> {
    let mut shapes: Vec<Shape> = Vec::new();
    let mut fitting = 0;
    let mut lines = input.lines().map(str::trim);

    while let Some(line) = lines.next() {
        if line.is_empty() {
            continue;
        }
        let (head, rest) = line
            .split_once(':')
            .with_context(|| format!("expected a present header or region, got {:?}", line))?;

        if head.contains('x') {
            let region = Region::parse(head, rest, shapes.len())?;
            if region.fits(&shapes)? {
                fitting += 1;
            }
            continue;
        }

        let index: usize = head
            .trim()
            .parse()
            .with_context(|| format!("invalid present header {:?}", line))?;
        if index != shapes.len() {
            bail!("present {} listed out of order", index);
        }
        if !rest.trim().is_empty() {
            bail!("unexpected text after present header {:?}", line);
        }
        let rows: Vec<&str> = lines.by_ref().take_while(|l| !l.is_empty()).collect();
        shapes.push(Shape::parse(&rows)?);
    }

    Ok(fitting)
}

/// The last day has no second puzzle.
pub fn part2(_input: &str) -> Result<&'static str> {
    Ok("*")
}
