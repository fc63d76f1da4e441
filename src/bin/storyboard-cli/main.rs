//! CLI tool for storyboard project files.
//!
//! Usage:
//!   storyboard-cli new <NAME> [--output board.json] [--panels 6]
//!   storyboard-cli inspect <FILE> [--panels]
//!   storyboard-cli validate <FILE>
//!   storyboard-cli convert --input board.json [--output board.automerge] [--verify] [--stats]

mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storyboard_flow::storage::{self, ProjectFormat};
use storyboard_flow::{Project, StoryboardConfig};

#[derive(Parser, Debug)]
#[command(
    name = "storyboard-cli",
    about = "Create, inspect and convert storyboard project files",
    version
)]
struct Args {
    /// JSON config file with project defaults
    #[arg(long, global = true, env = "STORYBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for projects saved without an explicit path
    #[arg(long, global = true, env = "STORYBOARD_PROJECTS_DIR")]
    projects_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new project file with default panels
    New {
        /// Project name
        name: String,

        /// Output path (defaults to <projects-dir>/<name>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of blank panels (overrides the config)
        #[arg(long)]
        panels: Option<usize>,
    },

    /// Print a summary of a project file
    Inspect {
        file: PathBuf,

        /// List every panel
        #[arg(long, default_value = "false")]
        panels: bool,
    },

    /// Check panel ordering and ID uniqueness
    Validate { file: PathBuf },

    /// Convert between JSON and Automerge project files
    Convert {
        /// Input project file
        #[arg(short, long)]
        input: PathBuf,

        /// Output path (defaults to the input path with the other format's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reload the output and compare it with the input
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Print size statistics
        #[arg(long, default_value = "false")]
        stats: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    match args.command {
        Command::New {
            name,
            output,
            panels,
        } => new_project(&config, &name, output, panels),
        Command::Inspect { file, panels } => inspect(&file, panels),
        Command::Validate { file } => validate(&file),
        Command::Convert {
            input,
            output,
            verify,
            stats,
        } => convert(&input, output, verify, stats),
    }
}

fn load_config(args: &Args) -> Result<StoryboardConfig> {
    let mut config = match &args.config {
        Some(path) => StoryboardConfig::from_json_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => StoryboardConfig::default(),
    };
    if let Some(dir) = &args.projects_dir {
        config.projects_dir = dir.clone();
    }
    Ok(config)
}

fn load(path: &Path) -> Result<Project> {
    if !path.exists() {
        anyhow::bail!("Input file does not exist: {}", path.display());
    }
    storage::load_project(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn new_project(
    config: &StoryboardConfig,
    name: &str,
    output: Option<PathBuf>,
    panels: Option<usize>,
) -> Result<()> {
    let mut config = config.clone();
    if let Some(count) = panels {
        config.default_panel_count = count;
    }

    let project = Project::with_config(name, &config);
    let output = output.unwrap_or_else(|| config.default_project_path(name));
    if output.exists() {
        anyhow::bail!("Refusing to overwrite {}", output.display());
    }

    storage::save_project(&project, &output).context("Failed to write project")?;
    println!(
        "Created \"{}\" with {} panels at {}",
        project.name,
        project.panels.len(),
        output.display()
    );
    Ok(())
}

fn inspect(path: &Path, list_panels: bool) -> Result<()> {
    let project = load(path)?;
    report::print_summary(&project, ProjectFormat::from_path(path));
    if list_panels {
        println!();
        report::print_panels(&project);
    }
    Ok(())
}

fn validate(path: &Path) -> Result<()> {
    let project = load(path)?;
    let violations = project.order_violations();
    if violations.is_empty() {
        println!("✓ {} is consistent ({} panels)", path.display(), project.panels.len());
        return Ok(());
    }

    for violation in &violations {
        println!("  ✗ {}", violation);
    }
    anyhow::bail!(
        "{} invariant violation(s) in {}",
        violations.len(),
        path.display()
    )
}

fn convert(input: &Path, output: Option<PathBuf>, verify: bool, stats: bool) -> Result<()> {
    let project = load(input)?;

    let target = match ProjectFormat::from_path(input) {
        ProjectFormat::Json => ProjectFormat::Automerge,
        ProjectFormat::Automerge => ProjectFormat::Json,
    };
    let output = output.unwrap_or_else(|| input.with_extension(target.extension()));

    storage::save_project(&project, &output).context("Failed to write output file")?;

    if verify {
        let reloaded = storage::load_project(&output).context("Failed to reload output")?;
        if reloaded != project {
            anyhow::bail!("Verification failed: {} differs from input", output.display());
        }
        println!("✓ Verification passed!");
    }

    if stats {
        let input_bytes = std::fs::metadata(input)?.len();
        let output_bytes = std::fs::metadata(&output)?.len();
        report::print_conversion_stats(&project, input_bytes, output_bytes);
    }

    println!(
        "Successfully converted {} → {}",
        input.display(),
        output.display()
    );
    Ok(())
}
