//! Community structure analysis module

pub mod detection;
pub mod metrics;

use serde::Serialize;
use std::collections::HashMap;

/// A detected community in the graph
#[derive(Debug, Clone, Serialize)]
pub struct Community {
    /// Unique identifier for this community
    pub id: u32,

    /// Members of this community (node indices, ascending)
    pub members: Vec<u32>,

    /// Size of the community
    pub size: usize,
}

/// Assignment of every node to exactly one community
///
/// Labels are contiguous and renumbered in first-seen node order, so a
/// partition with K communities uses labels 0..K.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    assignments: Vec<u32>,
    community_count: usize,
}

impl Partition {
    /// Create a partition from raw per-node labels
    pub fn new(mut assignments: Vec<u32>) -> Self {
        let community_count = renumber(&mut assignments);
        Self {
            assignments,
            community_count,
        }
    }

    /// Community label of a node, or None if the node is not covered
    pub fn community_of(&self, node: u32) -> Option<u32> {
        self.assignments.get(node as usize).copied()
    }

    /// Number of nodes covered by the partition
    pub fn node_count(&self) -> usize {
        self.assignments.len()
    }

    /// Number of communities
    pub fn community_count(&self) -> usize {
        self.community_count
    }

    /// Raw per-node labels
    pub fn assignments(&self) -> &[u32] {
        &self.assignments
    }

    /// Group the partition into communities with explicit member lists
    pub fn communities(&self) -> Vec<Community> {
        let mut members: Vec<Vec<u32>> = vec![Vec::new(); self.community_count];
        for (node, &label) in self.assignments.iter().enumerate() {
            members[label as usize].push(node as u32);
        }

        members
            .into_iter()
            .enumerate()
            .map(|(id, members)| Community {
                id: id as u32,
                size: members.len(),
                members,
            })
            .collect()
    }
}

/// Relabel to contiguous IDs in first-seen order; returns the label count
pub(crate) fn renumber(labels: &mut [u32]) -> usize {
    let mut remap: HashMap<u32, u32> = HashMap::new();
    for label in labels.iter_mut() {
        let next = remap.len() as u32;
        *label = *remap.entry(*label).or_insert(next);
    }
    remap.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_renumbered_in_first_seen_order() {
        let partition = Partition::new(vec![7, 7, 2, 7, 9]);
        assert_eq!(partition.assignments(), &[0, 0, 1, 0, 2]);
        assert_eq!(partition.community_count(), 3);
    }

    #[test]
    fn communities_group_members_ascending() {
        let partition = Partition::new(vec![0, 1, 0, 1, 0]);
        let communities = partition.communities();

        assert_eq!(communities.len(), 2);
        assert_eq!(communities[0].members, vec![0, 2, 4]);
        assert_eq!(communities[1].members, vec![1, 3]);
        assert_eq!(communities[0].size, 3);
    }

    #[test]
    fn nodes_outside_the_partition_are_uncovered() {
        let partition = Partition::new(vec![0, 0]);
        assert_eq!(partition.community_of(1), Some(0));
        assert_eq!(partition.community_of(2), None);
    }

    #[test]
    fn empty_partition() {
        let partition = Partition::new(Vec::new());
        assert_eq!(partition.node_count(), 0);
        assert_eq!(partition.community_count(), 0);
        assert!(partition.communities().is_empty());
    }
}
