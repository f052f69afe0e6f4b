use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tile {
    x: i64,
    y: i64,
}

impl Tile {
    /// Tiles covered by the rectangle with `self` and `other` as opposite corners.
    fn area(self, other: Tile) -> u64 {
        (self.x.abs_diff(other.x) + 1) * (self.y.abs_diff(other.y) + 1)
    }
}

struct Rect {
    min_x: i64,
    max_x: i64,
    min_y: i64,
    max_y: i64,
}

impl Rect {
    fn new(a: Tile, b: Tile) -> Self {
        Self {
            min_x: a.x.min(b.x),
            max_x: a.x.max(b.x),
            min_y: a.y.min(b.y),
            max_y: a.y.max(b.y),
        }
    }

    /// Whether an axis-aligned polygon edge passes through the interior.
    fn crossed_by(&self, a: Tile, b: Tile) -> bool {
        if a.x == b.x {
            self.min_x < a.x
                && a.x < self.max_x
                && a.y.max(b.y) > self.min_y
                && a.y.min(b.y) < self.max_y
        } else {
            self.min_y < a.y
                && a.y < self.max_y
                && a.x.max(b.x) > self.min_x
                && a.x.min(b.x) < self.max_x
        }
    }
}

struct Polygon {
    corners: Vec<Tile>,
}

impl Polygon {
    fn parse(input: &str) -> Result<Self> {
        let corners = input
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|line| -> Result<Tile> {
                let (x, y) = line
                    .split_once(',')
                    .with_context(|| format!("invalid tile {:?}", line))?;
                Ok(Tile {
                    x: x.trim().parse().with_context(|| format!("invalid tile {:?}", line))?,
                    y: y.trim().parse().with_context(|| format!("invalid tile {:?}", line))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let polygon = Self { corners };
        for (a, b) in polygon.edges() {
            if a.x != b.x && a.y != b.y {
                bail!("diagonal edge from {:?} to {:?}", a, b);
            }
        }
        Ok(polygon)
    }

    fn edges(&self) -> impl Iterator<Item = (Tile, Tile)> + '_ {
        self.corners
            .iter()
            .zip(self.corners.iter().cycle().skip(1))
            .map(|(&a, &b)| (a, b))
    }

    /// Point in doubled coordinates, so rectangle centres stay integral. Boundary counts as
    /// inside.
    fn contains_doubled(&self, px: i64, py: i64) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            let (ax, ay, bx, by) = (a.x * 2, a.y * 2, b.x * 2, b.y * 2);
            let on_x = ax.min(bx) <= px && px <= ax.max(bx);
            let on_y = ay.min(by) <= py && py <= ay.max(by);
            if on_x && on_y {
                return true;
            }
            if ax == bx && px < ax && ay.min(by) <= py && py < ay.max(by) {
                inside = !inside;
            }
        }
        inside
    }

    fn encloses(&self, rect: &Rect) -> bool {
        !self.edges().any(|(a, b)| rect.crossed_by(a, b))
            && self.contains_doubled(rect.min_x + rect.max_x, rect.min_y + rect.max_y)
    }
}

fn largest_area(input: &str, inside_only: bool) -> Result<u64> {
    let polygon = Polygon::parse(input)?;
    let corners = &polygon.corners;

    let mut largest = 0;
    for (i, &a) in corners.iter().enumerate() {
        for &b in &corners[i..] {
            let area = a.area(b);
            if area > largest && (!inside_only || polygon.encloses(&Rect::new(a, b))) {
                largest = area;
            }
        }
    }
    Ok(largest)
}

/// Largest rectangle with red tiles in two opposite corners.
pub fn part1(input: &str) -> Result<u64> {
    largest_area(input, false)
}

/// Largest such rectangle that stays inside the loop of red and green tiles.
pub fn part2(input: &str) -> Result<u64> {
    largest_area(input, true)
}
