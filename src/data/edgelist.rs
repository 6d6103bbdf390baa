//! Edge-list file handling for graph data

use anyhow::Result;
use crate::graph::{CompressedGraph, GraphBuilder};
use log;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Load a directed graph from a plain-text edge list
///
/// Each line holds two whitespace-separated non-negative integer IDs,
/// source then target. Lines that do not parse are skipped and counted.
/// Loading stops once `max_edges` lines have been accepted, even if more
/// data remains in the file.
pub fn load_edge_list(path: &str, max_edges: usize) -> Result<CompressedGraph> {
    log::info!("Reading edge list: {}", path);

    // Check if the file exists
    if !std::path::Path::new(path).exists() {
        return Err(anyhow::anyhow!("File not found: {}", path));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut builder = GraphBuilder::with_capacity(1024);
    let mut accepted = 0usize;
    let mut skipped = 0usize;

    for line in reader.lines() {
        if accepted >= max_edges {
            log::info!("Reached the cap of {} edges, stopping early", max_edges);
            break;
        }

        let line = line?;
        match parse_edge(&line) {
            Some((src, dst)) => {
                builder.add_edge(src, dst);
                accepted += 1;
                if accepted % 100_000 == 0 {
                    log::info!("Loaded {} edges...", accepted);
                }
            }
            None => skipped += 1,
        }
    }

    let graph = builder.build();
    log::info!(
        "Graph loaded: {} nodes, {} edges ({} lines accepted, {} skipped)",
        graph.node_count,
        graph.edge_count(),
        accepted,
        skipped
    );

    Ok(graph)
}

/// Parse one edge-list line into a (source, target) ID pair
///
/// Exactly two whitespace-separated integer tokens are required.
fn parse_edge(line: &str) -> Option<(u64, u64)> {
    let mut tokens = line.split_whitespace();
    let src = tokens.next()?;
    let dst = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }
    Some((src.parse().ok()?, dst.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_token_lines() {
        assert_eq!(parse_edge("12 34"), Some((12, 34)));
        assert_eq!(parse_edge("  7\t9  "), Some((7, 9)));
        assert_eq!(parse_edge("0 0"), Some((0, 0)));
    }

    #[test]
    fn rejects_wrong_token_counts() {
        assert_eq!(parse_edge(""), None);
        assert_eq!(parse_edge("12"), None);
        assert_eq!(parse_edge("1 2 3"), None);
    }

    #[test]
    fn rejects_non_integer_tokens() {
        assert_eq!(parse_edge("a b"), None);
        assert_eq!(parse_edge("1 x"), None);
        // negative IDs are outside the ID domain
        assert_eq!(parse_edge("-1 2"), None);
        assert_eq!(parse_edge("1.5 2"), None);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load_edge_list("/nonexistent/edges.txt", 100);
        assert!(result.is_err());
    }
}
