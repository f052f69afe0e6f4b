use indexmap::IndexMap;
use petgraph::algo::toposort;
use rustc_hash::FxHashMap;
use thiserror::Error;

pub type NodeId = usize;
pub type Mask = u32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("malformed adjacency line: {0:?}")]
    MalformedLine(String),
    #[error("node {0} is defined twice")]
    DuplicateNode(String),
    #[error("graph contains a cycle through {0}")]
    Cycle(String),
    #[error("unknown node {0}")]
    UnknownNode(String),
    #[error("node {0} is referenced but never defined")]
    UndefinedNode(String),
    #[error("number of paths from {0} does not fit into 64 bits")]
    Overflow(String),
    #[error("{given} target nodes do not fit into a {max} bit mask")]
    TooManyTargets { given: usize, max: u32 },
}

#[derive(Debug, Default, Clone)]
struct Node {
    successors: Vec<NodeId>,
    defined: bool,
}

/// Directed acyclic graph keyed by node name.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: IndexMap<String, Node>,
}

impl Graph {
    /// Parses `name: child child ...` lines and rejects cyclic graphs.
    pub fn parse(input: &str) -> Result<Self, GraphError> {
        let mut nodes: IndexMap<String, Node> = IndexMap::new();

        for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let (name, children) = line
                .split_once(':')
                .ok_or_else(|| GraphError::MalformedLine(line.to_string()))?;
            let name = name.trim();
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(GraphError::MalformedLine(line.to_string()));
            }

            let successors: Vec<NodeId> = children
                .split_whitespace()
                .map(|child| {
                    let entry = nodes.entry(child.to_string());
                    let id = entry.index();
                    entry.or_default();
                    id
                })
                .collect();

            let node = nodes.entry(name.to_string()).or_default();
            if node.defined {
                return Err(GraphError::DuplicateNode(name.to_string()));
            }
            node.successors = successors;
            node.defined = true;
        }

        let graph = Self { nodes };
        graph.check_acyclic()?;
        Ok(graph)
    }

    fn check_acyclic(&self) -> Result<(), GraphError> {
        let edges = self.nodes.values().enumerate().flat_map(|(from, node)| {
            node.successors
                .iter()
                .map(move |&to| (from as u32, to as u32))
        });
        let dag = petgraph::Graph::<(), ()>::from_edges(edges);
        toposort(&dag, None)
            .map(|_| ())
            .map_err(|cycle| GraphError::Cycle(self.name(cycle.node_id().index()).to_string()))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn id(&self, name: &str) -> Option<NodeId> {
        self.nodes.get_index_of(name)
    }

    pub fn name(&self, id: NodeId) -> &str {
        self.nodes
            .get_index(id)
            .map(|(name, _)| name.as_str())
            .unwrap_or_default()
    }

    fn successors(&self, id: NodeId) -> Result<&[NodeId], GraphError> {
        match self.nodes.get_index(id) {
            Some((_, node)) if node.defined => Ok(&node.successors),
            Some((name, _)) => Err(GraphError::UndefinedNode(name.clone())),
            None => Err(GraphError::UnknownNode(id.to_string())),
        }
    }

    fn require(&self, name: &str) -> Result<NodeId, GraphError> {
        self.id(name).ok_or_else(|| GraphError::UnknownNode(name.to_string()))
    }

    /// Counts every path from `start` to `terminal` by walking each one.
    pub fn count_paths(&self, start: &str, terminal: &str) -> Result<u64, GraphError> {
        let start = self.require(start)?;
        let terminal = self.id(terminal);
        self.walk(start, terminal)
    }

    fn walk(&self, node: NodeId, terminal: Option<NodeId>) -> Result<u64, GraphError> {
        if Some(node) == terminal {
            return Ok(1);
        }
        let mut count: u64 = 0;
        for &next in self.successors(node)? {
            count = count
                .checked_add(self.walk(next, terminal)?)
                .ok_or_else(|| GraphError::Overflow(self.name(node).to_string()))?;
        }
        Ok(count)
    }

    /// Same answer as [`Graph::count_paths`], but each node is only expanded once.
    pub fn count_paths_memoized(&self, start: &str, terminal: &str) -> Result<u64, GraphError> {
        self.targeted(terminal, &[])?.count(start)
    }

    /// Prepares a search for paths to `terminal` that pass through all of `targets`.
    pub fn targeted(
        &self,
        terminal: &str,
        targets: &[&str],
    ) -> Result<TargetedSearch<'_>, GraphError> {
        let mut names: Vec<&str> = Vec::with_capacity(targets.len());
        for &target in targets {
            if !names.contains(&target) {
                names.push(target);
            }
        }
        if names.len() > Mask::BITS as usize {
            return Err(GraphError::TooManyTargets {
                given: names.len(),
                max: Mask::BITS,
            });
        }

        let mut bits = FxHashMap::default();
        let mut all: Mask = 0;
        for (bit, name) in names.into_iter().enumerate() {
            let flag: Mask = 1 << bit;
            all |= flag;
            // A target outside the graph keeps its bit forever, which rules out every path.
            if let Some(id) = self.id(name) {
                bits.insert(id, flag);
            }
        }

        Ok(TargetedSearch {
            graph: self,
            terminal: self.id(terminal),
            bits,
            all,
            memo: FxHashMap::default(),
        })
    }
}

/// Path count restricted to paths visiting a set of target nodes, memoized on the node and the
/// targets still outstanding.
pub struct TargetedSearch<'g> {
    graph: &'g Graph,
    terminal: Option<NodeId>,
    bits: FxHashMap<NodeId, Mask>,
    all: Mask,
    memo: FxHashMap<(NodeId, Mask), u64>,
}

impl TargetedSearch<'_> {
    pub fn count(&mut self, start: &str) -> Result<u64, GraphError> {
        let start = self.graph.require(start)?;
        self.count_from(start, self.all)
    }

    pub fn count_from(&mut self, node: NodeId, remaining: Mask) -> Result<u64, GraphError> {
        let remaining = remaining & !self.bits.get(&node).copied().unwrap_or(0);
        if Some(node) == self.terminal {
            return Ok(u64::from(remaining == 0));
        }
        if let Some(&count) = self.memo.get(&(node, remaining)) {
            return Ok(count);
        }

        let graph = self.graph;
        let mut count: u64 = 0;
        for &next in graph.successors(node)? {
            count = count
                .checked_add(self.count_from(next, remaining)?)
                .ok_or_else(|| GraphError::Overflow(graph.name(node).to_string()))?;
        }
        self.memo.insert((node, remaining), count);
        Ok(count)
    }

    pub fn cached(&self) -> usize {
        self.memo.len()
    }

    pub fn clear_memo(&mut self) {
        self.memo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    const YOU: &str = indoc! {"
        aaa: you hhh
        you: bbb ccc
        ddd: ggg
        bbb: ddd eee
        ccc: ddd eee fff
        eee: out
        fff: out
        ggg: out
        hhh: ccc fff iii
        iii: out
    "};

    const SVR: &str = indoc! {"
        svr: aaa bbb
        aaa: fft
        fft: ccc
        bbb: tty
        tty: ccc
        ccc: ddd eee
        ddd: hub
        hub: fff
        eee: dac
        dac: fff
        fff: ggg hhh
        ggg: out
        hhh: out
    "};

    #[test]
    fn diamond() -> Result<(), GraphError> {
        let graph = Graph::parse("A: B C\nB: out\nC: out\n")?;
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.count_paths("A", "out")?, 2);
        assert_eq!(graph.count_paths_memoized("A", "out")?, 2);
        assert_eq!(graph.count_paths("B", "out")?, 1);
        Ok(())
    }

    #[test]
    fn example_paths() -> Result<(), GraphError> {
        let graph = Graph::parse(YOU)?;
        assert_eq!(graph.count_paths("you", "out")?, 5);
        assert_eq!(graph.count_paths_memoized("you", "out")?, 5);
        Ok(())
    }

    #[test]
    fn example_targets() -> Result<(), GraphError> {
        let graph = Graph::parse(SVR)?;
        assert_eq!(graph.count_paths("svr", "out")?, 8);
        assert_eq!(graph.targeted("out", &["dac", "fft"])?.count("svr")?, 2);
        assert_eq!(graph.targeted("out", &["dac"])?.count("svr")?, 4);
        assert_eq!(graph.targeted("out", &["fft", "fft"])?.count("svr")?, 4);
        Ok(())
    }

    #[test]
    fn zero_targets_match_plain_count() -> Result<(), GraphError> {
        for input in [YOU, SVR] {
            let graph = Graph::parse(input)?;
            let start = graph.name(0).to_string();
            assert_eq!(
                graph.targeted("out", &[])?.count(&start)?,
                graph.count_paths(&start, "out")?
            );
        }
        Ok(())
    }

    #[test]
    fn unreachable_target() -> Result<(), GraphError> {
        let graph = Graph::parse(SVR)?;
        // aaa only leads forward, so nothing starting at ccc can visit it.
        assert_eq!(graph.targeted("out", &["aaa"])?.count("ccc")?, 0);
        assert_eq!(graph.targeted("out", &["zzz"])?.count("svr")?, 0);
        Ok(())
    }

    #[test]
    fn memo_is_transparent() -> Result<(), GraphError> {
        let graph = Graph::parse(SVR)?;
        let mut search = graph.targeted("out", &["dac", "fft"])?;
        assert_eq!(search.count("svr")?, 2);
        assert!(search.cached() > 0);
        for node in 0..graph.len() {
            if graph.name(node) == "out" {
                continue;
            }
            for remaining in 0..4 {
                let warm = search.count_from(node, remaining)?;
                search.clear_memo();
                assert_eq!(search.count_from(node, remaining)?, warm);
            }
        }
        Ok(())
    }

    #[test]
    fn no_route_is_zero() -> Result<(), GraphError> {
        let graph = Graph::parse("A: B\nB:\nC: out\n")?;
        assert_eq!(graph.count_paths("A", "out")?, 0);
        assert_eq!(graph.count_paths_memoized("A", "out")?, 0);
        Ok(())
    }

    #[test]
    fn overflowing_count() {
        // Every level doubles the number of routes, so the top of a 64 level ladder has 2^64.
        let mut input = String::new();
        for level in 0..64 {
            let next = level + 1;
            input += &format!("a{level}: a{next} b{next}\nb{level}: a{next} b{next}\n");
        }
        input += "a64: out\nb64: out\n";
        let graph = Graph::parse(&input).unwrap();

        assert_eq!(graph.count_paths_memoized("a1", "out").unwrap(), 1 << 63);
        assert_eq!(
            graph.count_paths_memoized("a0", "out").unwrap_err(),
            GraphError::Overflow("a0".to_string())
        );
    }

    #[test]
    fn empty() -> Result<(), GraphError> {
        let graph = Graph::parse("\n\n")?;
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        Ok(())
    }

    #[test]
    fn errors() {
        assert!(matches!(
            Graph::parse("A: B\nB: C\nC: A\n").unwrap_err(),
            GraphError::Cycle(_)
        ));
        assert_eq!(
            Graph::parse("A: A\n").unwrap_err(),
            GraphError::Cycle("A".to_string())
        );
        assert_eq!(
            Graph::parse("A B C\n").unwrap_err(),
            GraphError::MalformedLine("A B C".to_string())
        );
        assert_eq!(
            Graph::parse("A: B\nA: C\n").unwrap_err(),
            GraphError::DuplicateNode("A".to_string())
        );

        let graph = Graph::parse("A: B out\n").unwrap();
        assert_eq!(
            graph.count_paths("A", "out").unwrap_err(),
            GraphError::UndefinedNode("B".to_string())
        );
        assert_eq!(
            graph.count_paths("Q", "out").unwrap_err(),
            GraphError::UnknownNode("Q".to_string())
        );

        let names: Vec<String> = (0..33).map(|i| format!("n{i}")).collect();
        let targets: Vec<&str> = names.iter().map(String::as_str).collect();
        assert!(matches!(
            graph.targeted("out", &targets),
            Err(GraphError::TooManyTargets { given: 33, max: 32 })
        ));
    }
}
