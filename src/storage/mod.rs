//! Results persistence module

use anyhow::Result;
use crate::centrality::RankedNode;
use crate::community::metrics::CrossCommunityStats;
use crate::community::Community;
use crate::config::Config;
use crate::graph::algorithms::GlobalProperties;
use crate::graph::CompressedGraph;
use crate::spread::SpreadScenario;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use serde_json::{json, to_string_pretty};

/// Everything one pipeline run produces
pub struct AnalysisResults {
    /// Global properties of the full loaded graph
    pub full_properties: GlobalProperties,

    /// Global properties of the sampled graph
    pub sampled_properties: GlobalProperties,

    /// Top nodes of the sampled graph by degree centrality
    pub top_nodes: Vec<RankedNode>,

    /// Communities of the sampled graph
    pub communities: Vec<Community>,

    /// Cross-community edge statistics of the sampled graph
    pub cross_community: CrossCommunityStats,

    /// Simulated spread scenarios
    pub scenarios: Vec<SpreadScenario>,
}

/// Save analysis results to the specified directory
pub fn save_results(
    results: &AnalysisResults,
    config: &Config,
    sampled_graph: &CompressedGraph,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving analysis results to {}", output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(results, config, output_dir)?;
    save_communities(results, sampled_graph, output_dir)?;
    save_spread(results, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save run parameters and headline statistics
fn save_summary(results: &AnalysisResults, config: &Config, output_dir: &str) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let community_sizes: Vec<usize> = results.communities.iter().map(|c| c.size).collect();

    let summary = json!({
        "parameters": config,
        "full_graph": results.full_properties,
        "sampled_graph": results.sampled_properties,
        "top_nodes": results.top_nodes,
        "community_stats": {
            "community_count": results.communities.len(),
            "largest_community_size": community_sizes.iter().max().copied().unwrap_or(0),
            "smallest_community_size": community_sizes.iter().min().copied().unwrap_or(0),
            "avg_community_size": community_sizes.iter().sum::<usize>() as f64 /
                                  if results.communities.is_empty() { 1.0 } else { results.communities.len() as f64 },
        },
        "cross_community": results.cross_community,
        "spread": results.scenarios.iter().map(|scenario| {
            json!({
                "label": scenario.label,
                "seed_count": scenario.seed_ids.len(),
                "final_active": scenario.active_counts.last().copied().unwrap_or(0),
            })
        }).collect::<Vec<_>>(),
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save community sizes plus member IDs for the largest communities
fn save_communities(
    results: &AnalysisResults,
    sampled_graph: &CompressedGraph,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving community information");

    let path = Path::new(output_dir).join("communities.json");
    let mut file = File::create(path)?;

    let mut by_size: Vec<&Community> = results.communities.iter().collect();
    by_size.sort_by(|a, b| b.size.cmp(&a.size).then(a.id.cmp(&b.id)));

    // Resolve member node indices back to original IDs
    let largest = by_size.iter().take(10).map(|community| {
        let member_ids: Vec<u64> = community.members.iter()
            .map(|&node| sampled_graph.node_ids[node as usize])
            .collect();
        json!({
            "id": community.id,
            "size": community.size,
            "members": member_ids,
        })
    }).collect::<Vec<_>>();

    let communities_json = json!({
        "communities": by_size.iter().map(|community| {
            json!({
                "id": community.id,
                "size": community.size,
            })
        }).collect::<Vec<_>>(),
        "largest": largest,
    });

    file.write_all(to_string_pretty(&communities_json)?.as_bytes())?;

    Ok(())
}

/// Save the full activation curve of every spread scenario
fn save_spread(results: &AnalysisResults, output_dir: &str) -> Result<()> {
    log::info!("Saving spread simulation curves");

    let path = Path::new(output_dir).join("spread.json");
    let mut file = File::create(path)?;

    let spread_json = json!({
        "scenarios": results.scenarios,
    });

    file.write_all(to_string_pretty(&spread_json)?.as_bytes())?;

    Ok(())
}
