use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use storypack::{assemble, util, Config, PackDescription};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "storypack", version, about = "Build story pack archives")]
struct Cli {
    /// Config file (defaults to ~/.storypack/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory for logs and config (defaults to ~/.storypack)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Also log to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write the pack archive described by a TOML file
    Build {
        #[command(flatten)]
        source: SourceArgs,

        /// Output archive path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the story.json manifest without writing an archive
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// Pack description file
    description: PathBuf,

    /// Override the pack title
    #[arg(long)]
    title: Option<String>,

    /// Only keep stories whose title matches this pattern
    #[arg(long)]
    filter: Option<String>,
}

impl SourceArgs {
    fn load(&self) -> Result<PackDescription> {
        let mut description = PackDescription::from_toml_file(&self.description)
            .with_context(|| format!("reading {}", self.description.display()))?;
        if let Some(title) = &self.title {
            description.title = title.clone();
        }
        if let Some(filter) = &self.filter {
            description.filter = Some(filter.clone());
        }
        Ok(description)
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    // Log to file (~/.storypack/logs/storypack.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    let stderr = verbose.then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(fmt::layer().with_writer(log_file).with_ansi(false))
        .with(stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    util::init_data_dir(cli.data_dir.clone());
    init_logging(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    match cli.command {
        Command::Build { source, output } => {
            let description = source.load()?;
            let config = match output {
                Some(output) => config.with_output(output),
                None => config,
            };
            let pack = assemble(&description, &config)?;
            let summary = pack
                .write_to(&config.output)
                .with_context(|| format!("writing {}", config.output.display()))?;
            println!(
                "{}: {} nodes, {} actions, {} assets",
                config.output.display(),
                summary.nodes,
                summary.actions,
                summary.assets
            );
        }
        Command::Inspect { source } => {
            let description = source.load()?;
            let manifest = assemble(&description, &config)?.manifest()?;
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
    }
    Ok(())
}
