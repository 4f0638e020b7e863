mod predict;

use std::path::PathBuf;

use anipv_core::{FeatureDomain, DEFAULT_MODEL_PATH, FEATURE_SPECS};
use anipv_model::ModelState;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::predict::{run_predict, PredictArgs};

#[derive(Debug, Parser)]
#[command(name = "anipv-cli")]
#[command(about = "Predict an anime title's total views from its descriptors")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Predict total views (in ten-thousands) for one title
    Predict(PredictArgs),
    /// Print the feature columns in the order the model consumes them
    Schema,
    /// Show the model artifact's kind, size and fingerprint
    Inspect {
        /// Path to the model artifact
        #[arg(long, env = "ANIPV_MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
        model: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Predict(args)) => run_predict(&args)?,
        Some(Commands::Schema) => print_schema(),
        Some(Commands::Inspect { model }) => run_inspect(&model)?,
        None => println!("anipv-cli: run with --help to list commands"),
    }

    Ok(())
}

fn print_schema() {
    println!("{:<3} {:<14} {:<20} domain", "#", "name", "label");
    for (i, spec) in FEATURE_SPECS.iter().enumerate() {
        println!(
            "{:<3} {:<14} {:<20} {}",
            i,
            spec.name,
            spec.label,
            describe_domain(&spec.domain)
        );
    }
}

fn describe_domain(domain: &FeatureDomain) -> String {
    match domain {
        FeatureDomain::Choice { options, .. } => options
            .iter()
            .map(|c| format!("{}={}", c.value, c.label))
            .collect::<Vec<_>>()
            .join(", "),
        FeatureDomain::Integer { min, max, .. } => match max {
            Some(max) => format!("integer {min}..={max}"),
            None => format!("integer >= {min}"),
        },
        FeatureDomain::Weight { min, max, .. } => format!("float {min:.1}..={max:.1}"),
    }
}

fn run_inspect(path: &std::path::Path) -> anyhow::Result<()> {
    let state = ModelState::load(path);
    let Some(model) = state.model() else {
        anyhow::bail!(
            "model unavailable: {}",
            state
                .failure()
                .map_or_else(|| "not loaded".to_string(), ToString::to_string)
        );
    };

    let summary = model.summary();
    println!("path:        {}", path.display());
    println!("kind:        {}", summary.kind);
    println!("estimators:  {}", summary.estimators);
    println!("nodes:       {}", summary.nodes);
    println!("features:    {}", summary.n_features);
    println!("fingerprint: {}", summary.fingerprint);
    Ok(())
}
