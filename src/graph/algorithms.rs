//! Graph algorithms for structural analysis

use crate::graph::CompressedGraph;
use log;
use rand::rngs::StdRng;
use rand::seq::index;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// Outcome of a metric that is computed on a best-effort basis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum MetricResult<T> {
    /// The metric was computed successfully
    Computed(T),
    /// The metric was skipped, with a human-readable reason
    Skipped(String),
}

impl<T> MetricResult<T> {
    /// Get the computed value, if any
    pub fn computed(&self) -> Option<&T> {
        match self {
            MetricResult::Computed(value) => Some(value),
            MetricResult::Skipped(_) => None,
        }
    }

    /// Whether the metric was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self, MetricResult::Skipped(_))
    }
}

/// Global structural properties of a graph
#[derive(Debug, Clone, Serialize)]
pub struct GlobalProperties {
    /// Number of nodes
    pub node_count: usize,

    /// Number of directed edges after duplicate collapsing
    pub edge_count: usize,

    /// Average total degree (2E / N)
    pub average_degree: f64,

    /// Maximum total degree over all nodes
    pub max_degree: usize,

    /// Exact diameter of the largest connected component, when feasible
    pub diameter: MetricResult<usize>,

    /// Average clustering coefficient over a node sample
    pub average_clustering: MetricResult<f64>,

    /// Number of connected components, ignoring edge direction
    pub component_count: usize,
}

/// Compute the global structural properties of a directed graph
///
/// The diameter and the clustering coefficient are best-effort: each is
/// skipped with a reason instead of failing when the graph is empty or too
/// large for an exact answer.
pub fn analyze_global_properties(
    graph: &CompressedGraph,
    clustering_sample: usize,
    diameter_limit: usize,
    rng: &mut StdRng,
) -> GlobalProperties {
    log::info!("Analyzing global network properties");

    let node_count = graph.node_count;
    let edge_count = graph.edge_count();
    let average_degree = if node_count == 0 {
        0.0
    } else {
        (2 * edge_count) as f64 / node_count as f64
    };
    let max_degree = (0..node_count).map(|node| graph.degree(node)).max().unwrap_or(0);

    let projection = undirected_projection(graph);
    let components = connected_components(&projection);

    log::info!("Calculating network diameter...");
    let diameter = largest_component_diameter(&projection, &components, diameter_limit);
    match &diameter {
        MetricResult::Computed(value) => log::info!("Network diameter: {}", value),
        MetricResult::Skipped(reason) => log::info!("Diameter calculation skipped: {}", reason),
    }

    log::info!("Calculating average clustering coefficient...");
    let average_clustering = sampled_average_clustering(graph, clustering_sample, rng);
    match &average_clustering {
        MetricResult::Computed(value) => {
            log::info!("Average clustering coefficient: {:.4}", value)
        }
        MetricResult::Skipped(reason) => {
            log::info!("Clustering coefficient skipped: {}", reason)
        }
    }

    GlobalProperties {
        node_count,
        edge_count,
        average_degree,
        max_degree,
        diameter,
        average_clustering,
        component_count: components.count,
    }
}

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<u32>,

    /// Size of each set (for union by size)
    rank: Vec<u32>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure
    pub fn new(size: usize) -> Self {
        let mut parent = Vec::with_capacity(size);
        let mut rank = Vec::with_capacity(size);

        // Initialize each node as its own set
        for i in 0..size {
            parent.push(i as u32);
            rank.push(1);
        }

        Self { parent, rank }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let px = self.parent[x as usize];
        if px != x {
            // Path compression: set parent to root
            self.parent[x as usize] = self.find(px);
        }
        self.parent[x as usize]
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return; // Already in the same set
        }

        // Union by size: attach smaller tree under root of larger tree
        let rank_x = self.rank[root_x as usize];
        let rank_y = self.rank[root_y as usize];

        if rank_x > rank_y {
            self.parent[root_y as usize] = root_x;
            self.rank[root_x as usize] += self.rank[root_y as usize];
        } else {
            self.parent[root_x as usize] = root_y;
            self.rank[root_y as usize] += self.rank[root_x as usize];
        }
    }

    /// Get the size of the set containing x
    pub fn size(&mut self, x: u32) -> u32 {
        let root = self.find(x);
        self.rank[root as usize]
    }
}

/// Census of the connected components of a graph, ignoring edge direction
#[derive(Debug, Clone)]
pub struct ComponentSummary {
    /// Number of components
    pub count: usize,

    /// Members of the largest component, ascending by node index
    pub largest: Vec<u32>,
}

/// Find the connected components of a graph, ignoring edge direction
pub fn connected_components(graph: &CompressedGraph) -> ComponentSummary {
    let node_count = graph.node_count;
    if node_count == 0 {
        return ComponentSummary { count: 0, largest: Vec::new() };
    }

    let mut sets = DisjointSets::new(node_count);
    for node in 0..node_count {
        for &target in graph.outgoing_edges(node) {
            sets.union(node as u32, target);
        }
    }

    // Group nodes by component root
    let mut members: HashMap<u32, Vec<u32>> = HashMap::new();
    for node in 0..node_count as u32 {
        let root = sets.find(node);
        members.entry(root).or_default().push(node);
    }

    let count = members.len();
    // Size ties resolve to the component containing the smallest node index,
    // keeping the result independent of hash iteration order
    let largest = members
        .into_values()
        .max_by(|a, b| a.len().cmp(&b.len()).then(b[0].cmp(&a[0])))
        .unwrap_or_default();

    ComponentSummary { count, largest }
}

/// Exact diameter of the largest connected component of an undirected graph
///
/// The graph must be an undirected projection. Components above `node_limit`
/// nodes are skipped: exact eccentricity needs one BFS per member node.
pub fn largest_component_diameter(
    undirected: &CompressedGraph,
    components: &ComponentSummary,
    node_limit: usize,
) -> MetricResult<usize> {
    if components.largest.is_empty() {
        return MetricResult::Skipped("graph has no nodes".to_string());
    }
    if components.largest.len() > node_limit {
        return MetricResult::Skipped(format!(
            "largest component has {} nodes, over the {}-node limit for exact eccentricity",
            components.largest.len(),
            node_limit
        ));
    }

    let mut diameter = 0;
    for &node in &components.largest {
        diameter = diameter.max(bfs_eccentricity(undirected, node));
    }

    MetricResult::Computed(diameter)
}

/// Longest shortest-path distance from start to any reachable node
fn bfs_eccentricity(graph: &CompressedGraph, start: u32) -> usize {
    let mut distance = vec![usize::MAX; graph.node_count];
    let mut queue = VecDeque::new();

    distance[start as usize] = 0;
    queue.push_back(start);

    let mut farthest = 0;
    while let Some(node) = queue.pop_front() {
        let next = distance[node as usize] + 1;
        for &target in graph.outgoing_edges(node as usize) {
            if distance[target as usize] == usize::MAX {
                distance[target as usize] = next;
                farthest = farthest.max(next);
                queue.push_back(target);
            }
        }
    }

    farthest
}

/// Average clustering coefficient over a random node sample
///
/// Samples up to `sample_size` nodes, induces their subgraph and averages the
/// local clustering coefficient of every sampled node in its undirected
/// projection. Nodes with fewer than two neighbors contribute zero.
pub fn sampled_average_clustering(
    graph: &CompressedGraph,
    sample_size: usize,
    rng: &mut StdRng,
) -> MetricResult<f64> {
    let node_count = graph.node_count;
    if node_count == 0 {
        return MetricResult::Skipped("graph has no nodes".to_string());
    }
    if sample_size == 0 {
        return MetricResult::Skipped("sample size is zero".to_string());
    }

    let subgraph = if sample_size >= node_count {
        undirected_projection(graph)
    } else {
        let mut selected: Vec<u32> = index::sample(rng, node_count, sample_size)
            .iter()
            .map(|i| i as u32)
            .collect();
        selected.sort_unstable();
        undirected_projection(&induce_subgraph(graph, &selected))
    };

    let mut total = 0.0;
    for node in 0..subgraph.node_count {
        let neighbors = subgraph.outgoing_edges(node);
        let k = neighbors.len();
        if k < 2 {
            continue;
        }

        // Count links between the node's neighbors
        let mut links = 0usize;
        for i in 0..k {
            for j in (i + 1)..k {
                if subgraph.has_edge(neighbors[i] as usize, neighbors[j]) {
                    links += 1;
                }
            }
        }
        total += (2 * links) as f64 / (k * (k - 1)) as f64;
    }

    MetricResult::Computed(total / subgraph.node_count as f64)
}

/// Undirected projection of a directed graph
///
/// Every directed edge becomes a symmetric adjacency. Self-loops are dropped
/// and anti-parallel pairs collapse, so each undirected edge is stored twice
/// (once per direction) and `edge_count` counts ordered pairs.
pub fn undirected_projection(graph: &CompressedGraph) -> CompressedGraph {
    let node_count = graph.node_count;
    let mut adjacency: Vec<Vec<u32>> = vec![Vec::new(); node_count];

    for node in 0..node_count {
        for &target in graph.outgoing_edges(node) {
            if target as usize == node {
                continue;
            }
            adjacency[node].push(target);
            adjacency[target as usize].push(node as u32);
        }
    }

    for list in &mut adjacency {
        list.sort_unstable();
        list.dedup();
    }

    let edge_count: usize = adjacency.iter().map(|list| list.len()).sum();
    let mut projection = CompressedGraph::with_capacity(node_count, edge_count);

    projection.offsets.push(0);
    let mut offset = 0u32;
    for list in &adjacency {
        projection.edges.extend_from_slice(list);
        offset += list.len() as u32;
        projection.offsets.push(offset);
    }

    projection.node_ids = graph.node_ids.clone();
    projection.in_degrees = adjacency.iter().map(|list| list.len() as u32).collect();

    projection
}

/// Induced subgraph on the given nodes
///
/// Keeps every edge whose endpoints are both selected and remaps them to the
/// positions of `nodes`, which must be distinct. Original IDs carry over.
pub fn induce_subgraph(graph: &CompressedGraph, nodes: &[u32]) -> CompressedGraph {
    let mut orig_to_sub = vec![u32::MAX; graph.node_count];
    for (sub, &orig) in nodes.iter().enumerate() {
        orig_to_sub[orig as usize] = sub as u32;
    }

    // First pass: count surviving edges
    let mut edge_count = 0usize;
    for &orig in nodes {
        for &target in graph.outgoing_edges(orig as usize) {
            if orig_to_sub[target as usize] != u32::MAX {
                edge_count += 1;
            }
        }
    }

    let mut subgraph = CompressedGraph::with_capacity(nodes.len(), edge_count);
    subgraph.offsets.push(0);

    // Second pass: remap and store
    let mut offset = 0u32;
    for &orig in nodes {
        let row_start = subgraph.edges.len();
        for &target in graph.outgoing_edges(orig as usize) {
            let mapped = orig_to_sub[target as usize];
            if mapped != u32::MAX {
                subgraph.edges.push(mapped);
                offset += 1;
            }
        }
        // Remapping breaks the source ordering, so re-sort the row
        subgraph.edges[row_start..].sort_unstable();
        subgraph.offsets.push(offset);
        subgraph.node_ids.push(graph.node_ids[orig as usize]);
    }

    let mut in_degrees = vec![0u32; nodes.len()];
    for &target in &subgraph.edges {
        in_degrees[target as usize] += 1;
    }
    subgraph.in_degrees = in_degrees;

    subgraph
}
