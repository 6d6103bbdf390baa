//! Memory-efficient graph representation

use std::mem;

/// Compressed sparse representation of a directed graph optimized for memory efficiency
#[derive(Debug, Clone)]
pub struct CompressedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Offset array: index where each node's edges begin
    /// offsets[i] to offsets[i+1] defines the edge range for node i
    pub offsets: Vec<u32>,

    /// Edge array: concatenated lists of target nodes, sorted within each list
    pub edges: Vec<u32>,

    /// Mapping from internal node indices to original numeric IDs
    pub node_ids: Vec<u64>,

    /// Number of incoming edges per node
    pub in_degrees: Vec<u32>,
}

impl CompressedGraph {
    /// Create a new graph with pre-allocated capacity
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            node_count,
            offsets: Vec::with_capacity(node_count + 1),
            edges: Vec::with_capacity(edge_count),
            node_ids: Vec::with_capacity(node_count),
            in_degrees: Vec::new(),
        }
    }

    /// Get outgoing edges for a node
    pub fn outgoing_edges(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.edges[start..end]
    }

    /// Check if there's an edge from src to dst
    pub fn has_edge(&self, src: usize, dst: u32) -> bool {
        let edges = self.outgoing_edges(src);
        edges.binary_search(&dst).is_ok()
    }

    /// Get out-degree of a node
    pub fn out_degree(&self, node: usize) -> usize {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        end - start
    }

    /// Get in-degree of a node
    pub fn in_degree(&self, node: usize) -> usize {
        self.in_degrees[node] as usize
    }

    /// Total degree of a node (incoming plus outgoing edges)
    pub fn degree(&self, node: usize) -> usize {
        self.out_degree(node) + self.in_degree(node)
    }

    /// Number of directed edges stored in the graph
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u32>();
        let edges = self.edges.capacity() * mem::size_of::<u32>();
        let ids = self.node_ids.capacity() * mem::size_of::<u64>();
        let in_degrees = self.in_degrees.capacity() * mem::size_of::<u32>();

        base + offsets + edges + ids + in_degrees
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::GraphBuilder;

    #[test]
    fn adjacency_access() {
        let mut builder = GraphBuilder::with_capacity(4);
        builder.add_edge(10, 20);
        builder.add_edge(10, 30);
        builder.add_edge(20, 30);
        let graph = builder.build();

        assert_eq!(graph.node_count, 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.outgoing_edges(0), &[1, 2]);
        assert_eq!(graph.outgoing_edges(1), &[2]);
        assert!(graph.outgoing_edges(2).is_empty());
    }

    #[test]
    fn has_edge_is_directed() {
        let mut builder = GraphBuilder::with_capacity(2);
        builder.add_edge(1, 2);
        let graph = builder.build();

        assert!(graph.has_edge(0, 1));
        assert!(!graph.has_edge(1, 0));
    }

    #[test]
    fn degrees_count_both_directions() {
        let mut builder = GraphBuilder::with_capacity(3);
        builder.add_edge(1, 2);
        builder.add_edge(3, 2);
        builder.add_edge(2, 1);
        let graph = builder.build();

        // node 2 (index 1): one outgoing, two incoming
        assert_eq!(graph.out_degree(1), 1);
        assert_eq!(graph.in_degree(1), 2);
        assert_eq!(graph.degree(1), 3);
        // node 3 (index 2): source only
        assert_eq!(graph.degree(2), 1);
    }
}
