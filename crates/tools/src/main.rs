use std::fs;
use std::path::PathBuf;

use clap::Parser;
use guides::GuidesConfig;
use tools::Scenario;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay a guides-on-map scenario and print the outcome")]
struct Args {
    /// Scenario JSON: downloaded guide ids plus a list of steps
    #[arg(long)]
    scenario: PathBuf,

    /// Controller config JSON; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the report
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GuidesConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => GuidesConfig::default(),
    };
    let scenario = Scenario::from_json_str(&fs::read_to_string(&args.scenario)?)?;
    info!(steps = scenario.steps.len(), "scenario loaded");

    let report = scenario.run(config)?;
    let out = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{out}");
    Ok(())
}
