// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Jungle Protocol Simulation Suite - Small-World Topology
//
// Watts–Strogatz construction: a ring lattice where every node links to its
// k/2 nearest neighbors on each side, then each lattice edge (u, u+j) is
// rewired to a uniformly chosen target with probability p. Rewiring walks
// distance-major (all j = 1 edges first) and never creates self-loops or
// parallel edges.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::rng::DrawSource;
use crate::types::NodeId;

/// Immutable undirected graph stored as per-node adjacency lists.
///
/// Neighbor lists keep insertion order, so rewired edges appear after the
/// surviving lattice edges of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmallWorld {
    adjacency: Vec<Vec<NodeId>>,
}

impl SmallWorld {
    pub fn empty(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
        }
    }

    /// Build a Watts–Strogatz graph. Callers validate `degree < node_count`
    /// and that `degree` is even.
    pub fn watts_strogatz<R: DrawSource>(
        node_count: usize,
        degree: usize,
        rewire_prob: f64,
        rng: &mut R,
    ) -> Self {
        let mut graph = Self::empty(node_count);
        let n = node_count;
        let half = degree / 2;

        for j in 1..=half {
            for u in 0..n {
                graph.add_edge(u as NodeId, ((u + j) % n) as NodeId);
            }
        }

        for j in 1..=half {
            for u in 0..n {
                let v = (u + j) % n;
                if rng.next_unit() >= rewire_prob {
                    continue;
                }
                let (u, v) = (u as NodeId, v as NodeId);
                let mut w = rng.below(n) as NodeId;
                let mut saturated = false;
                while w == u || graph.has_edge(u, w) {
                    w = rng.below(n) as NodeId;
                    if graph.degree(u) >= n - 1 {
                        saturated = true;
                        break;
                    }
                }
                if !saturated {
                    graph.remove_edge(u, v);
                    graph.add_edge(u, w);
                }
            }
        }

        graph
    }

    /// Adjacency built from an explicit edge list. Duplicate edges and
    /// self-loops are ignored.
    pub fn from_edges(node_count: usize, edges: &[(NodeId, NodeId)]) -> Self {
        let mut graph = Self::empty(node_count);
        for &(a, b) in edges {
            if a != b && !graph.has_edge(a, b) {
                graph.add_edge(a, b);
            }
        }
        graph
    }

    fn add_edge(&mut self, a: NodeId, b: NodeId) {
        self.adjacency[a as usize].push(b);
        self.adjacency[b as usize].push(a);
    }

    fn remove_edge(&mut self, a: NodeId, b: NodeId) {
        self.adjacency[a as usize].retain(|&x| x != b);
        self.adjacency[b as usize].retain(|&x| x != a);
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.adjacency[node as usize]
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node as usize].len()
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency[a as usize].contains(&b)
    }

    /// Every edge once, as `(low, high)` pairs in ascending order.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges: Vec<(NodeId, NodeId)> = self
            .adjacency
            .iter()
            .enumerate()
            .flat_map(|(a, nbrs)| {
                let a = a as NodeId;
                nbrs.iter().filter(move |&&b| a < b).map(move |&b| (a, b))
            })
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Local clustering of one node; 0 for nodes with fewer than two neighbors.
    pub fn clustering(&self, node: NodeId) -> f64 {
        let nbrs = self.neighbors(node);
        let d = nbrs.len();
        if d < 2 {
            return 0.0;
        }
        let mut links = 0usize;
        for (i, &a) in nbrs.iter().enumerate() {
            for &b in &nbrs[i + 1..] {
                if self.has_edge(a, b) {
                    links += 1;
                }
            }
        }
        (2 * links) as f64 / (d * (d - 1)) as f64
    }

    pub fn average_clustering(&self) -> f64 {
        let n = self.node_count();
        if n == 0 {
            return 0.0;
        }
        (0..n).map(|i| self.clustering(i as NodeId)).sum::<f64>() / n as f64
    }

    /// BFS hop distances from `origin`; `None` for unreachable nodes.
    pub fn distances_from(&self, origin: NodeId) -> Vec<Option<u32>> {
        let mut dist = vec![None; self.node_count()];
        dist[origin as usize] = Some(0);
        let mut queue = VecDeque::new();
        queue.push_back(origin);
        while let Some(current) = queue.pop_front() {
            let current_dist = dist[current as usize].unwrap_or(0);
            for &nb in self.neighbors(current) {
                if dist[nb as usize].is_none() {
                    dist[nb as usize] = Some(current_dist + 1);
                    queue.push_back(nb);
                }
            }
        }
        dist
    }

    /// Mean hop distance over all ordered reachable pairs of distinct nodes.
    pub fn average_path_length(&self) -> f64 {
        let mut total = 0u64;
        let mut pairs = 0u64;
        for origin in 0..self.node_count() {
            for d in self.distances_from(origin as NodeId).into_iter().flatten() {
                if d > 0 {
                    total += d as u64;
                    pairs += 1;
                }
            }
        }
        if pairs == 0 {
            return 0.0;
        }
        total as f64 / pairs as f64
    }

    pub fn is_connected(&self) -> bool {
        if self.node_count() == 0 {
            return true;
        }
        self.distances_from(0).iter().all(Option::is_some)
    }
}
