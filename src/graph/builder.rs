//! Graph construction module

use crate::graph::CompressedGraph;
use std::collections::HashMap;

/// Builder for incrementally constructing a CompressedGraph
pub struct GraphBuilder {
    /// Number of nodes
    node_count: usize,

    /// Mapping from original numeric IDs to node indices
    id_to_index: HashMap<u64, u32>,

    /// Original node IDs in index order
    node_ids: Vec<u64>,

    /// Adjacency lists for each node
    adjacency_lists: Vec<Vec<u32>>,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            node_count: 0,
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
        }
    }

    /// Get or create a node index for the given original ID
    pub fn get_or_create_node(&mut self, id: u64) -> u32 {
        if let Some(&idx) = self.id_to_index.get(&id) {
            return idx;
        }

        // Create a new node
        let idx = self.node_count as u32;
        self.id_to_index.insert(id, idx);
        self.node_ids.push(id);
        self.adjacency_lists.push(Vec::new());
        self.node_count += 1;

        idx
    }

    /// Add a directed edge between two original IDs
    pub fn add_edge(&mut self, src_id: u64, dst_id: u64) {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);

        self.adjacency_lists[src_idx as usize].push(dst_idx);
    }

    /// Number of distinct nodes seen so far
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Build the compressed graph
    ///
    /// Repeated insertions of the same directed edge collapse to a single
    /// stored edge, so the resulting edge count can be lower than the number
    /// of `add_edge` calls.
    pub fn build(mut self) -> CompressedGraph {
        // Sort and deduplicate each adjacency list
        for list in &mut self.adjacency_lists {
            list.sort_unstable();
            list.dedup();
        }

        let edge_count: usize = self.adjacency_lists.iter()
            .map(|list| list.len())
            .sum();

        // Create offsets array
        let mut offsets = Vec::with_capacity(self.node_count + 1);
        offsets.push(0);

        let mut offset = 0;
        for list in &self.adjacency_lists {
            offset += list.len() as u32;
            offsets.push(offset);
        }

        // Create edges array
        let mut edges = Vec::with_capacity(edge_count);
        for list in &self.adjacency_lists {
            edges.extend_from_slice(list);
        }

        // Tally in-degrees from the final edge array
        let mut in_degrees = vec![0u32; self.node_count];
        for &dst in &edges {
            in_degrees[dst as usize] += 1;
        }

        CompressedGraph {
            node_count: self.node_count,
            offsets,
            edges,
            node_ids: self.node_ids,
            in_degrees,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interns_ids_in_first_seen_order() {
        let mut builder = GraphBuilder::with_capacity(4);
        builder.add_edge(500, 7);
        builder.add_edge(7, 500);
        builder.add_edge(500, 9);
        let graph = builder.build();

        assert_eq!(graph.node_ids, vec![500, 7, 9]);
        assert_eq!(graph.node_count, 3);
    }

    #[test]
    fn duplicate_edges_collapse() {
        let mut builder = GraphBuilder::with_capacity(2);
        builder.add_edge(1, 2);
        builder.add_edge(1, 2);
        builder.add_edge(1, 2);
        let graph = builder.build();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.out_degree(0), 1);
        assert_eq!(graph.in_degree(1), 1);
    }

    #[test]
    fn offsets_cover_all_nodes() {
        let mut builder = GraphBuilder::with_capacity(4);
        builder.add_edge(1, 2);
        builder.add_edge(3, 2);
        let graph = builder.build();

        assert_eq!(graph.offsets.len(), graph.node_count + 1);
        assert_eq!(*graph.offsets.last().unwrap() as usize, graph.edge_count());
        // node 2 (index 1) has no outgoing edges but still has a row
        assert_eq!(graph.out_degree(1), 0);
    }

    #[test]
    fn self_loops_are_kept_in_the_directed_graph() {
        let mut builder = GraphBuilder::with_capacity(1);
        builder.add_edge(4, 4);
        let graph = builder.build();

        assert_eq!(graph.node_count, 1);
        assert!(graph.has_edge(0, 0));
    }
}
