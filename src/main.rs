use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod centrality;
mod community;
mod config;
mod data;
mod graph;
mod spread;
mod storage;
mod viz;

use community::Community;
use config::Config;
use graph::algorithms::{GlobalProperties, MetricResult};
use spread::{SpreadConfig, SpreadScenario};

#[derive(Parser, Debug)]
#[clap(
    name = "graph-spread-analyzer",
    about = "Structural and information-spread analysis of directed edge-list graphs"
)]
struct Cli {
    /// Path to input edge-list file (two integer IDs per line)
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "analysis_results")]
    output_dir: String,

    /// Maximum number of edges to ingest
    #[clap(long, default_value = "5000000")]
    max_edges: usize,

    /// Node sample ratio (0.0-1.0) for the per-node analyses
    #[clap(long, default_value = "0.5")]
    sample: f64,

    /// Seed-set sizes compared in the spread simulation
    #[clap(long, value_delimiter = ',', default_value = "1,3,5,10")]
    seed_sizes: Vec<usize>,

    /// Activation probability per adjacency trial
    #[clap(long, default_value = "0.1")]
    spread_probability: f64,

    /// Maximum number of cascade steps
    #[clap(long, default_value = "5")]
    max_steps: usize,

    /// Number of nodes sampled for the clustering-coefficient estimate
    #[clap(long, default_value = "10000")]
    clustering_sample: usize,

    /// Largest component size up to which the exact diameter is computed
    #[clap(long, default_value = "10000")]
    diameter_limit: usize,

    /// RNG seed for reproducible sampling and simulation
    #[clap(long)]
    rng_seed: Option<u64>,

    /// Skip visualizations
    #[clap(long)]
    skip_viz: bool,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    log::info!("Starting graph spread analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    // Create output directory
    std::fs::create_dir_all(&args.output_dir)?;

    let config = Config {
        max_edges: args.max_edges,
        sample_ratio: args.sample,
        seed_sizes: args.seed_sizes.clone(),
        spread_probability: args.spread_probability,
        max_steps: args.max_steps,
        clustering_sample: args.clustering_sample,
        diameter_limit: args.diameter_limit,
    };

    // One RNG drives sampling, community detection and the cascades
    let mut rng = match args.rng_seed {
        Some(seed) => {
            log::info!("Using RNG seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    // 1. Load data
    let full_graph = data::edgelist::load_edge_list(&args.input, config.max_edges)?;
    log::debug!("Graph memory footprint: {} bytes", full_graph.memory_usage());

    // 2. Analyze the full graph
    let full_properties = graph::algorithms::analyze_global_properties(
        &full_graph,
        config.clustering_sample,
        config.diameter_limit,
        &mut rng,
    );
    log_global_properties("full graph", &full_properties);

    // 3. Sample nodes for the per-node analyses
    let sampled = data::sampling::sample_graph(&full_graph, config.sample_ratio, &mut rng)?;

    // 4. Analyze the sampled graph
    let sampled_properties = graph::algorithms::analyze_global_properties(
        &sampled,
        config.clustering_sample,
        config.diameter_limit,
        &mut rng,
    );
    log_global_properties("sampled graph", &sampled_properties);

    // 5. Rank nodes by degree centrality
    let top_nodes = centrality::top_nodes(&sampled, 10);
    for ranked in &top_nodes {
        log::info!("Node {}: degree centrality {:.6}", ranked.id, ranked.centrality);
    }

    // 6. Detect communities
    let partition = community::detection::detect_communities(&sampled, &mut rng);
    let communities = partition.communities();

    let mut by_size: Vec<&Community> = communities.iter().collect();
    by_size.sort_by(|a, b| b.size.cmp(&a.size).then(a.id.cmp(&b.id)));
    for community in by_size.iter().take(5) {
        log::info!("Community {}: {} nodes", community.id, community.size);
    }

    // 7. Cross-community edges
    let cross_community = community::metrics::analyze_cross_community_edges(&sampled, &partition);

    // 8. Spread simulations
    let spread_config = SpreadConfig {
        probability: config.spread_probability,
        max_steps: config.max_steps,
    };
    let mut scenarios = Vec::new();

    for &size in &config.seed_sizes {
        let seeds: Vec<u32> = top_nodes.iter().take(size).map(|ranked| ranked.node).collect();
        log::info!("Simulating spread with {} seed nodes", size);
        let active_counts = spread::simulate_spread(&sampled, &seeds, &spread_config, &mut rng)?;
        scenarios.push(SpreadScenario {
            label: format!("top {}", size),
            seed_ids: seeds.iter().map(|&node| sampled.node_ids[node as usize]).collect(),
            active_counts,
        });
    }

    // Compare seeding inside the largest community against its runner-up
    if by_size.len() >= 2 {
        for (label, community) in [("largest community", by_size[0]), ("second community", by_size[1])] {
            let seeds: Vec<u32> = community.members.iter().take(3).copied().collect();
            log::info!("Simulating spread with seeds from the {}", label);
            let active_counts = spread::simulate_spread(&sampled, &seeds, &spread_config, &mut rng)?;
            scenarios.push(SpreadScenario {
                label: label.to_string(),
                seed_ids: seeds.iter().map(|&node| sampled.node_ids[node as usize]).collect(),
                active_counts,
            });
        }
    } else {
        log::info!("Fewer than two communities, skipping the community seed comparison");
    }

    // 9. Save results
    let results = storage::AnalysisResults {
        full_properties,
        sampled_properties,
        top_nodes,
        communities,
        cross_community,
        scenarios,
    };
    storage::save_results(&results, &config, &sampled, &args.output_dir)?;

    // 10. Generate visualizations if requested
    if !args.skip_viz {
        viz::generate_visualizations(&results, &sampled, &args.output_dir)?;
    }

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}

/// Log the headline numbers of one analysis pass
fn log_global_properties(label: &str, props: &GlobalProperties) {
    log::info!(
        "{}: {} nodes, {} edges",
        label,
        props.node_count,
        props.edge_count
    );
    log::info!("Average degree: {:.2}", props.average_degree);
    log::info!("Maximum degree: {}", props.max_degree);
    log::info!("Connected components: {}", props.component_count);
    if let MetricResult::Computed(diameter) = &props.diameter {
        log::info!("Network diameter: {}", diameter);
    }
    if let MetricResult::Computed(clustering) = &props.average_clustering {
        log::info!("Average clustering coefficient: {:.4}", clustering);
    }
}
