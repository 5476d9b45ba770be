//! Nutrition Labels
//!
//! Generates a label per recipe, serving count and salt level.

use tracing_subscriber::EnvFilter;

use nutrition_labels::batch::{load_records, run_batch};
use nutrition_labels::config::Config;
use nutrition_labels::emit::LabelEmitter;
use nutrition_labels::render::LabelTemplate;
use nutrition_labels::variants::VariantExpander;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrition_labels=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    let records = load_records(&config.data_path)?;
    let template = LabelTemplate::from_file(&config.template_path)?;

    std::fs::create_dir_all(&config.output_dir)?;

    let emitter = LabelEmitter::new(
        template,
        &config.asset_dir,
        config.output_dir.clone(),
        config.format,
    );
    let expander = VariantExpander::default();

    let summary = run_batch(records, &expander, &emitter);

    println!(
        "Done! {} labels for {}/{} recipes written to {}/",
        summary.written.len(),
        summary.succeeded(),
        summary.recipes,
        config.output_dir.display()
    );

    Ok(())
}
