//! Network
//!
//! The social network the game is played on. The engines only see the
//! [`Network`] trait; [`Graph`] is the adjacency-list provider shipped with
//! the runner, including a Barabási–Albert generator.

use rand::Rng;
use std::ops::Range;

use crate::agent::AgentId;
use crate::error::{SimError, SimResult};

/// Iterator over a network's dense node identifiers
pub type NodeIds = std::iter::Map<Range<usize>, fn(usize) -> AgentId>;

/// Read-only view of a fixed, undirected, simple graph.
///
/// Node identifiers are dense: `0..node_count()`.
pub trait Network {
    fn node_count(&self) -> usize;

    /// Neighbors of `id`. Unknown ids have no neighbors.
    fn neighbors(&self, id: AgentId) -> &[AgentId];

    fn node_ids(&self) -> NodeIds {
        (0..self.node_count()).map(AgentId as fn(usize) -> AgentId)
    }

    fn degree(&self, id: AgentId) -> usize {
        self.neighbors(id).len()
    }
}

impl<N: Network + ?Sized> Network for &N {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn neighbors(&self, id: AgentId) -> &[AgentId] {
        (**self).neighbors(id)
    }
}

/// Adjacency-list graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<AgentId>>,
    edge_count: usize,
}

impl Graph {
    /// Creates `node_count` isolated nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            edge_count: 0,
        }
    }

    /// Builds a graph from an undirected edge list.
    pub fn from_edges(
        node_count: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> SimResult<Self> {
        let mut graph = Self::new(node_count);
        for (a, b) in edges {
            graph.add_edge(AgentId(a), AgentId(b))?;
        }
        Ok(graph)
    }

    /// Adds the undirected edge {a, b}.
    ///
    /// Self loops and duplicate edges are ignored; returns whether the edge
    /// was new.
    pub fn add_edge(&mut self, a: AgentId, b: AgentId) -> SimResult<bool> {
        let node_count = self.adjacency.len();
        for id in [a, b] {
            if id.0 >= node_count {
                return Err(SimError::InvalidNetwork(format!(
                    "edge endpoint {} outside {} nodes",
                    id.0, node_count
                )));
            }
        }
        if a == b || self.adjacency[a.0].contains(&b) {
            return Ok(false);
        }
        self.adjacency[a.0].push(b);
        self.adjacency[b.0].push(a);
        self.edge_count += 1;
        Ok(true)
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn mean_degree(&self) -> f64 {
        if self.adjacency.is_empty() {
            return 0.0;
        }
        2.0 * self.edge_count as f64 / self.adjacency.len() as f64
    }

    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn isolated_count(&self) -> usize {
        self.adjacency.iter().filter(|n| n.is_empty()).count()
    }

    /// Scale-free graph grown by preferential attachment.
    ///
    /// Starts from a star on `m + 1` nodes; every later node attaches to `m`
    /// distinct existing nodes picked with probability proportional to their
    /// degree. The result has `(n - m) * m` edges. Requires `1 <= m < n`.
    pub fn barabasi_albert<R: Rng + ?Sized>(n: usize, m: usize, rng: &mut R) -> SimResult<Self> {
        if m < 1 || m >= n {
            return Err(SimError::InvalidNetwork(format!(
                "barabasi-albert needs 1 <= m < n, got n = {}, m = {}",
                n, m
            )));
        }

        let mut graph = Self::new(n);
        // Each node appears once per incident edge.
        let mut repeated: Vec<AgentId> = Vec::with_capacity(2 * (n - m) * m);

        for leaf in 1..=m {
            graph.add_edge(AgentId(0), AgentId(leaf))?;
            repeated.push(AgentId(0));
            repeated.push(AgentId(leaf));
        }

        for source in (m + 1)..n {
            let targets = random_subset(&repeated, m, rng);
            for &target in &targets {
                graph.add_edge(AgentId(source), target)?;
            }
            repeated.extend_from_slice(&targets);
            repeated.extend(std::iter::repeat(AgentId(source)).take(m));
        }

        Ok(graph)
    }
}

impl Network for Graph {
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn neighbors(&self, id: AgentId) -> &[AgentId] {
        self.adjacency.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Draws `count` distinct entries from `pool`, weighted by multiplicity.
fn random_subset<R: Rng + ?Sized>(pool: &[AgentId], count: usize, rng: &mut R) -> Vec<AgentId> {
    let mut chosen: Vec<AgentId> = Vec::with_capacity(count);
    while chosen.len() < count {
        let candidate = pool[rng.gen_range(0..pool.len())];
        if !chosen.contains(&candidate) {
            chosen.push(candidate);
        }
    }
    chosen
}
