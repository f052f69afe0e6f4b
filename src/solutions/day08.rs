use anyhow::{bail, Context, Result};
use nalgebra::Vector3;
use petgraph::unionfind::UnionFind;
use rustc_hash::FxHashMap;
use tracing::debug;

const CONNECTIONS: usize = 1000;

fn parse_boxes(input: &str) -> Result<Vec<Vector3<i64>>> {
    input
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|line| -> Result<Vector3<i64>> {
            let coords = line
                .split(',')
                .map(|c| c.trim().parse::<i64>())
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("invalid junction box {:?}", line))?;
            match coords[..] {
                [x, y, z] => Ok(Vector3::new(x, y, z)),
                _ => bail!("expected three coordinates in {:?}", line),
            }
        })
        .collect()
}

fn largest_circuits(circuits: &UnionFind<usize>, boxes: usize) -> Result<u64> {
    let mut sizes: FxHashMap<usize, u64> = FxHashMap::default();
    for b in 0..boxes {
        *sizes.entry(circuits.find(b)).or_default() += 1;
    }
    let mut sizes: Vec<u64> = sizes.into_values().collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    match sizes[..] {
        [a, b, c, ..] => Ok(a * b * c),
        _ => bail!("fewer than three circuits"),
    }
}

/// Junction boxes and every pair of them, closest first.
struct Playground {
    boxes: Vec<Vector3<i64>>,
    pairs: Vec<(i64, usize, usize)>,
}

impl Playground {
    fn parse(input: &str) -> Result<Self> {
        let boxes = parse_boxes(input)?;
        if boxes.len() < 3 {
            bail!("need at least three junction boxes, got {}", boxes.len());
        }

        let mut pairs = Vec::with_capacity(boxes.len() * (boxes.len() - 1) / 2);
        for i in 0..boxes.len() {
            for j in i + 1..boxes.len() {
                let d = boxes[i] - boxes[j];
                pairs.push((d.dot(&d), i, j));
            }
        }
        pairs.sort_unstable();
        Ok(Self { boxes, pairs })
    }
}

/// Product of the three largest circuits after connecting the `connections` closest pairs.
pub fn part1_with_connections(input: &str, connections: usize) -> Result<u64> {
    let playground = Playground::parse(input)?;
    let mut circuits = UnionFind::new(playground.boxes.len());
    for &(_, i, j) in playground.pairs.iter().take(connections) {
        circuits.union(i, j);
    }
    largest_circuits(&circuits, playground.boxes.len())
}

pub fn part1(input: &str) -> Result<u64> {
    part1_with_connections(input, CONNECTIONS)
}

/// Product of the x coordinates of the pair that joins everything into one circuit.
pub fn part2(input: &str) -> Result<u64> {
    let playground = Playground::parse(input)?;
    let mut circuits = UnionFind::new(playground.boxes.len());
    let mut remaining = playground.boxes.len();

    for (n, &(_, i, j)) in playground.pairs.iter().enumerate() {
        if circuits.union(i, j) {
            remaining -= 1;
            if remaining == 1 {
                debug!(?i, ?j, connection = n, "all junction boxes connected");
                let product = playground.boxes[i].x * playground.boxes[j].x;
                return u64::try_from(product).context("negative x product");
            }
        }
    }
    bail!("junction boxes never formed a single circuit")
}
