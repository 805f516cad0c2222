use std::fs;
use std::path::Path;
use std::time::Instant;

use pick_path::utils::init_map::init_warehouse;
use pick_path::utils::render::render_pick_path;
use pick_path::{
    GeneratorConfig, PickPathError, PickPathFile, PickPathGenerator, PickPathSettings, Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// Used when no configuration file is given on the command line
const DEFAULT_CONFIG_PATH: &str = "pick-path.json";

/// Value following a `--flag` argument
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn load_config(args: &[String]) -> Result<GeneratorConfig> {
    let mut config = if args.len() > 1 && !args[1].starts_with("--") {
        let config_path = Path::new(&args[1]);
        info!("Loading configuration from {:?}", config_path);
        GeneratorConfig::load(config_path)?
    } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
        info!("Loading configuration from {}", DEFAULT_CONFIG_PATH);
        GeneratorConfig::load(Path::new(DEFAULT_CONFIG_PATH))?
    } else {
        info!("Using default configuration");
        GeneratorConfig::default()
    };

    // Command line overrides
    if let Some(seed) = flag_value(args, "--seed") {
        config.seed = seed.parse().map_err(|_| {
            PickPathError::InvalidInput(format!("--seed expects a number, got {}", seed))
        })?;
    }
    if let Some(books) = flag_value(args, "--books") {
        config.books_per_pick_path = books.parse().map_err(|_| {
            PickPathError::InvalidInput(format!("--books expects a number, got {}", books))
        })?;
    }

    config.validate()?;
    Ok(config)
}

fn run(config: &GeneratorConfig) -> Result<()> {
    let warehouse = init_warehouse(
        Path::new(&config.warehouse_path),
        Path::new(&config.catalog_path),
    )?;

    let settings = PickPathSettings {
        books_per_pick_path: config.books_per_pick_path,
        source: config.source,
        clearance_radius: config.clearance_radius,
        unit_cost: config.unit_cost,
    };
    let generator = PickPathGenerator::new(&warehouse, settings)?;

    info!(
        "Generating {} training and {} testing paths of {} books from {} (seed {})",
        config.training_paths,
        config.testing_paths,
        config.books_per_pick_path,
        config.source,
        config.seed
    );
    let start_time = Instant::now();
    let records = generator.generate_batch(config.training_paths, config.testing_paths, config.seed)?;
    info!("Generated {} pick paths in {:.2?}", records.len(), start_time.elapsed());

    if let Some(render_dir) = &config.render_dir {
        fs::create_dir_all(render_dir)?;
        for record in &records {
            let output = Path::new(render_dir).join(format!("pick-path-{}.png", record.path_id));
            render_pick_path(&warehouse, &record.pick_path_information, &output)?;
        }
        info!("Rendered {} pick paths to {}", records.len(), render_dir);
    }

    let document = PickPathFile::new(records);
    fs::write(&config.output_path, serde_json::to_string_pretty(&document)?)?;
    info!("Pick paths written to {}", config.output_path);

    Ok(())
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pick_path=info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let result = load_config(&args).and_then(|config| run(&config));
    if let Err(e) = result {
        error!("Pick path generation failed: {}", e);
        std::process::exit(1);
    }
}
