//! Visualization generation module

use anyhow::Result;
use crate::graph::CompressedGraph;
use crate::storage::AnalysisResults;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Generate visualization data files from analysis results
pub fn generate_visualizations(
    results: &AnalysisResults,
    sampled_graph: &CompressedGraph,
    output_dir: &str,
) -> Result<()> {
    log::info!("Generating visualization data");

    // Create visualizations directory
    let viz_dir = Path::new(output_dir).join("visualizations");
    fs::create_dir_all(&viz_dir)?;

    generate_degree_distribution(sampled_graph, &viz_dir)?;
    generate_community_sizes(results, &viz_dir)?;
    generate_spread_curves(results, &viz_dir)?;
    generate_cross_community(results, &viz_dir)?;
    generate_index_page(results, &viz_dir)?;

    log::info!("Visualizations generated successfully");

    Ok(())
}

/// Write the total-degree histogram of the sampled graph
fn generate_degree_distribution(graph: &CompressedGraph, viz_dir: &Path) -> Result<()> {
    let path = viz_dir.join("degree_distribution.csv");
    let mut file = File::create(path)?;

    // 0-100+ buckets
    let mut degree_dist = vec![0usize; 101];
    for node in 0..graph.node_count {
        let bucket = std::cmp::min(graph.degree(node), 100);
        degree_dist[bucket] += 1;
    }

    writeln!(file, "degree,node_count")?;
    for (degree, count) in degree_dist.iter().enumerate().take(100) {
        writeln!(file, "{},{}", degree, count)?;
    }
    writeln!(file, "100+,{}", degree_dist[100])?;

    Ok(())
}

/// Write community sizes, largest first
fn generate_community_sizes(results: &AnalysisResults, viz_dir: &Path) -> Result<()> {
    let path = viz_dir.join("community_sizes.csv");
    let mut file = File::create(path)?;

    let mut by_size: Vec<_> = results.communities.iter().collect();
    by_size.sort_by(|a, b| b.size.cmp(&a.size).then(a.id.cmp(&b.id)));

    writeln!(file, "community_id,size")?;
    for community in by_size {
        writeln!(file, "{},{}", community.id, community.size)?;
    }

    Ok(())
}

/// Write every spread scenario's activation curve in long format
fn generate_spread_curves(results: &AnalysisResults, viz_dir: &Path) -> Result<()> {
    let path = viz_dir.join("spread_curves.csv");
    let mut file = File::create(path)?;

    writeln!(file, "scenario,step,active_count")?;
    for scenario in &results.scenarios {
        for (step, count) in scenario.active_counts.iter().enumerate() {
            writeln!(file, "{},{},{}", scenario.label, step, count)?;
        }
    }

    Ok(())
}

/// Write the cross- versus intra-community edge split
fn generate_cross_community(results: &AnalysisResults, viz_dir: &Path) -> Result<()> {
    let path = viz_dir.join("cross_community.csv");
    let mut file = File::create(path)?;

    let stats = &results.cross_community;
    writeln!(file, "category,count,percentage")?;
    writeln!(
        file,
        "cross,{},{:.4}",
        stats.cross_edges, stats.cross_edge_percentage
    )?;
    writeln!(
        file,
        "intra,{},{:.4}",
        stats.intra_edges,
        100.0 - stats.cross_edge_percentage
    )?;

    Ok(())
}

/// Write a static HTML summary page
fn generate_index_page(results: &AnalysisResults, viz_dir: &Path) -> Result<()> {
    log::info!("Generating HTML summary");

    let index_path = viz_dir.join("index.html");
    let mut index_file = File::create(index_path)?;

    writeln!(index_file, "<!DOCTYPE html>")?;
    writeln!(index_file, "<html lang=\"en\">")?;
    writeln!(index_file, "<head>")?;
    writeln!(index_file, "  <meta charset=\"UTF-8\">")?;
    writeln!(index_file, "  <title>Graph Spread Analysis</title>")?;
    writeln!(index_file, "  <style>")?;
    writeln!(index_file, "    body {{ font-family: Arial, sans-serif; margin: 20px; }}")?;
    writeln!(index_file, "    h1, h2 {{ color: #333; }}")?;
    writeln!(index_file, "    .stats {{ background-color: #f9f9f9; padding: 15px; border-radius: 5px; }}")?;
    writeln!(index_file, "    table {{ border-collapse: collapse; }}")?;
    writeln!(index_file, "    td, th {{ border: 1px solid #ddd; padding: 6px 12px; }}")?;
    writeln!(index_file, "  </style>")?;
    writeln!(index_file, "</head>")?;
    writeln!(index_file, "<body>")?;
    writeln!(index_file, "  <h1>Graph Spread Analysis</h1>")?;

    let props = &results.sampled_properties;
    writeln!(index_file, "  <div class=\"stats\">")?;
    writeln!(index_file, "    <h2>Sampled Graph</h2>")?;
    writeln!(index_file, "    <p>Nodes: {}</p>", props.node_count)?;
    writeln!(index_file, "    <p>Edges: {}</p>", props.edge_count)?;
    writeln!(index_file, "    <p>Average Degree: {:.2}</p>", props.average_degree)?;
    writeln!(index_file, "    <p>Communities: {}</p>", results.communities.len())?;
    writeln!(
        index_file,
        "    <p>Cross-Community Edges: {:.2}%</p>",
        results.cross_community.cross_edge_percentage
    )?;
    writeln!(index_file, "  </div>")?;

    writeln!(index_file, "  <h2>Top Nodes by Degree Centrality</h2>")?;
    writeln!(index_file, "  <table>")?;
    writeln!(index_file, "    <tr><th>Node ID</th><th>Centrality</th></tr>")?;
    for ranked in &results.top_nodes {
        writeln!(
            index_file,
            "    <tr><td>{}</td><td>{:.6}</td></tr>",
            ranked.id, ranked.centrality
        )?;
    }
    writeln!(index_file, "  </table>")?;

    writeln!(index_file, "  <h2>Spread Scenarios</h2>")?;
    writeln!(index_file, "  <table>")?;
    writeln!(
        index_file,
        "    <tr><th>Scenario</th><th>Seeds</th><th>Final Active</th></tr>"
    )?;
    for scenario in &results.scenarios {
        writeln!(
            index_file,
            "    <tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            scenario.label,
            scenario.seed_ids.len(),
            scenario.active_counts.last().copied().unwrap_or(0)
        )?;
    }
    writeln!(index_file, "  </table>")?;

    writeln!(index_file, "</body>")?;
    writeln!(index_file, "</html>")?;

    Ok(())
}
