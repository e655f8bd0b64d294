use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use walkdir::WalkDir;

use tmdlkit_core::Config;
use tmdlkit_erd::{render_mermaid, wrap_markdown};
use tmdlkit_parser::parse_file;
use tmdlkit_project::assemble;

/// tmdlkit - TMDL to JSON conversion and ERD generation for Power BI projects
#[derive(Parser)]
#[command(name = "tmdlkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: tmdlkit.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a .tmdl file, or a directory of them, to JSON
    Convert {
        /// TMDL file or directory
        input: PathBuf,

        /// Output file or directory (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Assemble the semantic model of a PBIP project folder into one JSON document
    Project {
        /// PBIP project folder
        folder: PathBuf,

        /// Output JSON file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a Mermaid ERD from an assembled semantic model
    Erd {
        /// Semantic model JSON produced by `project`
        input: PathBuf,

        /// Output file; `.md` files get a mermaid code fence
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Convert { input, output } => {
            convert_command(&input, output.as_deref(), cli.verbose)
        }
        Commands::Project { folder, output } => {
            project_command(&config, &folder, output.as_deref(), cli.verbose)
        }
        Commands::Erd { input, output } => {
            erd_command(&config, &input, output.as_deref(), cli.verbose)
        }
    }
}

/// Explicit path, else `tmdlkit.toml` in the working directory, else defaults
fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path,
        None if Path::new(Config::FILE_NAME).exists() => Path::new(Config::FILE_NAME),
        None => {
            tracing::debug!("no config file found, using defaults");
            return Ok(Config::default());
        }
    };

    tracing::debug!(path = %path.display(), "loading config");
    let config = Config::from_file(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    tracing::debug!(
        definition_folder = %config.definition_folder,
        "config loaded"
    );
    Ok(config)
}

/// Convert command - one JSON document per TMDL file
fn convert_command(input: &Path, output: Option<&Path>, verbose: bool) -> Result<()> {
    if input.is_dir() {
        let files = tmdl_files(input)?;
        if verbose {
            eprintln!(
                "{} {} TMDL files in {}",
                "Found".cyan(),
                files.len(),
                input.display()
            );
        }

        match output {
            Some(output_dir) => {
                if output_dir.is_file() {
                    anyhow::bail!(
                        "Output must be a directory when input is a directory: {}",
                        output_dir.display()
                    );
                }
                std::fs::create_dir_all(output_dir).with_context(|| {
                    format!("Failed to create output directory {}", output_dir.display())
                })?;

                for file in &files {
                    let target = output_dir.join(json_file_name(file));
                    write_json(file, &target, verbose)?;
                }
            }
            None => {
                for file in &files {
                    let name = file.file_name().unwrap_or_default().to_string_lossy();
                    println!("--- {} ---", name);
                    println!("{}", convert_file(file)?);
                }
            }
        }
    } else {
        match output {
            Some(output) if output.is_dir() => {
                write_json(input, &output.join(json_file_name(input)), verbose)?;
            }
            Some(output) => write_json(input, output, verbose)?,
            None => println!("{}", convert_file(input)?),
        }
    }

    Ok(())
}

/// `*.tmdl` files directly inside a directory, sorted by name
fn tmdl_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "tmdl") {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// `<stem>.json` for a TMDL file
fn json_file_name(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    PathBuf::from(format!("{}.json", stem))
}

fn convert_file(input: &Path) -> Result<String> {
    let root = parse_file(input)?;
    root.to_json()
        .with_context(|| format!("Failed to serialize {}", input.display()))
}

fn write_json(input: &Path, target: &Path, verbose: bool) -> Result<()> {
    if verbose {
        eprintln!("{} {}", "Converting".cyan(), input.display());
    }

    let json = convert_file(input)?;
    std::fs::write(target, json)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    eprintln!("{} {}", "Saved to:".green(), target.display());
    Ok(())
}

/// Project command - assemble a PBIP semantic model
fn project_command(
    config: &Config,
    folder: &Path,
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    if verbose {
        eprintln!("{} {}", "Assembling semantic model from:".cyan(), folder.display());
    }

    let model = assemble(folder, config)?;

    if verbose {
        let tables = model.tables.as_ref().map_or(0, Vec::len);
        let relationships = model
            .relationships
            .as_ref()
            .map_or(0, |relationships| relationships.entries().len());
        eprintln!(
            "  {} tables, {} relationships",
            tables.to_string().green(),
            relationships.to_string().green()
        );
    }

    let json = model.to_json().context("Failed to serialize semantic model")?;
    emit(&json, output)
}

/// ERD command - render a Mermaid diagram from semantic model JSON
fn erd_command(config: &Config, input: &Path, output: Option<&Path>, verbose: bool) -> Result<()> {
    if verbose {
        eprintln!("{} {}", "Loading semantic model from:".cyan(), input.display());
    }

    let contents = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let data: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse JSON in {}", input.display()))?;

    let diagram = render_mermaid(&data, &config.erd);

    let is_markdown = output.is_some_and(|path| path.extension().is_some_and(|ext| ext == "md"));
    let diagram = if is_markdown {
        wrap_markdown(&diagram)
    } else {
        diagram
    };

    emit(&diagram, output)
}

/// Write to the output file, or print when there is none
fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} {}", "Saved to:".green(), path.display());
        }
        None => println!("{}", text),
    }

    Ok(())
}
