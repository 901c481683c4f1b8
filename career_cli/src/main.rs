//! Career Agent - Main Entry Point
//!
//! Runs the profile → market → strategy pipeline once and prints the
//! roadmap report.

use anyhow::{Context, Result};
use career_core::{load_config, AgentConfig, CareerPipeline, RawProfile};
use clap::Parser;
use std::path::PathBuf;

const DEFAULT_SKILLS: &str =
    "Python, basic Excel, strong theoretical statistics, good communication.";
const DEFAULT_ROLE: &str = "Junior Data Analyst";
const DEFAULT_YEARS: &str = "2";

#[derive(Parser)]
#[command(name = "career-agent")]
#[command(version, about = "Career gap analysis and roadmap generator", long_about = None)]
struct Cli {
    /// Comma-separated list of current skills
    #[arg(short, long, default_value = DEFAULT_SKILLS)]
    skills: String,
    /// Target job title
    #[arg(short, long, default_value = DEFAULT_ROLE)]
    role: String,
    /// Total years of professional experience
    #[arg(short, long, default_value = DEFAULT_YEARS, allow_hyphen_values = true)]
    years: String,
    /// Path to a YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print every stage record as JSON instead of the Markdown report
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!();
        eprintln!("{}", "=".repeat(80));
        eprintln!("FATAL ERROR: the career pipeline did not complete.");
        eprintln!("Details: {:#}", e);
        eprintln!("{}", "=".repeat(80));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AgentConfig::default(),
    };

    if config.credential().is_none() {
        log::warn!(
            "{} is not set; continuing with the built-in pipeline",
            config.credential_env
        );
    }

    let lookup = config.build_lookup();
    let knowledge = config.build_knowledge_base();
    let pipeline = CareerPipeline::new(&*lookup, &knowledge, config.analyzer_config());

    let raw = RawProfile::new(&cli.skills, &cli.role, &cli.years);

    if !cli.json {
        println!("--- Starting the Career Guidance Agent ---");
    }

    let outcome = pipeline.run(&raw)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!();
    println!("{}", "=".repeat(80));
    println!("FINAL CAREER ROADMAP REPORT GENERATED:");
    println!("{}", "=".repeat(80));
    print!("{}", outcome.report.render());
    println!("{}", "=".repeat(80));
    Ok(())
}
