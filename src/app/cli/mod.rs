//! CLI Adapter.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::api::{self, ConfigOverrides, PublishOptions, RenderOptions};
use crate::domain::{AppError, RunReport};

/// Variable holding the tracing filter directive.
const LOG_ENV: &str = "PROMPTSITE_LOG";

#[derive(Parser)]
#[command(name = "promptsite")]
#[command(version)]
#[command(
    about = "Render prompt templates, optionally generate content, and publish to beta or prod",
    long_about = None
)]
struct Cli {
    /// Config file (default: ./promptsite.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every job and publish it to the selected environment
    #[clap(visible_alias = "p")]
    Publish {
        #[command(flatten)]
        trigger: TriggerArgs,
        #[command(flatten)]
        sources: SourceArgs,
        /// Write a JSON run report to this file
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,
    },
    /// Render every job into a local directory without publishing
    #[clap(visible_alias = "r")]
    Render {
        #[command(flatten)]
        sources: SourceArgs,
        /// Output directory
        #[arg(short, long, default_value = api::DEFAULT_OUTPUT_DIR)]
        out: PathBuf,
        /// Skip the text generator even when one is configured
        #[arg(long)]
        no_generate: bool,
    },
    /// Print the environment (beta or prod) this run would publish to
    Env {
        #[command(flatten)]
        trigger: TriggerArgs,
    },
}

#[derive(Args)]
struct TriggerArgs {
    /// Target environment, overriding branch-based selection
    #[arg(long, value_name = "beta|prod")]
    env: Option<String>,
    /// Branch that triggered the run
    #[arg(long)]
    branch: Option<String>,
}

#[derive(Args)]
struct SourceArgs {
    /// Directory containing <topic>_prompt.{json,yml,yaml} job files
    #[arg(long, value_name = "DIR")]
    jobs_dir: Option<PathBuf>,
    /// Directory containing templates
    #[arg(long, value_name = "DIR")]
    templates_dir: Option<PathBuf>,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_tracing();

    let config_file = cli.config;
    let result: Result<i32, AppError> = match cli.command {
        Commands::Publish { trigger, sources, report } => {
            let options = PublishOptions {
                overrides: overrides(config_file, Some(trigger), Some(sources)),
                report,
            };
            run_publish(&options)
        }
        Commands::Render { sources, out, no_generate } => {
            let options = RenderOptions {
                overrides: overrides(config_file, None, Some(sources)),
                out_dir: out,
                generate: !no_generate,
            };
            run_render(&options)
        }
        Commands::Env { trigger } => {
            run_env(&overrides(config_file, Some(trigger), None)).map(|_| 0)
        }
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn overrides(
    config_file: Option<PathBuf>,
    trigger: Option<TriggerArgs>,
    sources: Option<SourceArgs>,
) -> ConfigOverrides {
    let (env, branch) = trigger.map(|t| (t.env, t.branch)).unwrap_or_default();
    let (jobs_dir, templates_dir) =
        sources.map(|s| (s.jobs_dir, s.templates_dir)).unwrap_or_default();
    ConfigOverrides { config_file, env, branch, jobs_dir, templates_dir }
}

fn run_publish(options: &PublishOptions) -> Result<i32, AppError> {
    let report = api::publish(options)?;
    for artifact in &report.published {
        println!("Published ➜  {}", artifact.location);
    }
    print_failures(&report);

    let environment = report.environment.map(|env| env.to_string()).unwrap_or_default();
    println!(
        "{} artifact(s) published to {} ({})",
        report.published.len(),
        report.destination,
        environment
    );
    Ok(exit_code(&report))
}

fn run_render(options: &RenderOptions) -> Result<i32, AppError> {
    let report = api::render(options)?;
    for artifact in &report.published {
        println!("Rendered ➜  {}", artifact.location);
    }
    print_failures(&report);
    println!("{} artifact(s) written to {}", report.published.len(), report.destination);
    Ok(exit_code(&report))
}

fn run_env(overrides: &ConfigOverrides) -> Result<(), AppError> {
    let environment = api::select_env(overrides)?;
    println!("{}", environment);
    Ok(())
}

fn print_failures(report: &RunReport) {
    for failure in &report.failures {
        eprintln!("Failed ✗  {} [{}]: {}", failure.job, failure.kind, failure.message);
    }
    if !report.is_success() {
        eprintln!("Failed jobs: {}", report.failed_jobs().join(", "));
    }
}

fn exit_code(report: &RunReport) -> i32 {
    if report.is_success() { 0 } else { 1 }
}
