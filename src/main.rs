//! autoindex - Generates barrel files that re-export every module under a directory.
//!
//! Usage:
//!   autoindex generate --filename src/index.ts --watched-dir src
//!   autoindex run [--config autoindex.toml]
//!   autoindex --help

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use autoindex_core::{IndexConfig, IndexManifest, IndexOptions, PathMode};
use autoindex_synth::{Generation, IndexPlugin};

#[derive(Parser)]
#[command(
    name = "autoindex",
    version,
    about = "Generate barrel files that re-export every module under a directory",
    long_about = "autoindex scans a directory and writes a single index file that \
                  re-exports every eligible module, so consumers can import from one \
                  entry point.\n\n\
                  Run it as a build step before bundling: `autoindex run` reads \
                  targets from autoindex.toml, `autoindex generate` takes one target \
                  on the command line."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one index file
    Generate {
        /// Index file to write
        #[arg(short, long)]
        filename: PathBuf,

        /// Directory to scan
        #[arg(short, long)]
        watched_dir: PathBuf,

        /// File to skip, relative to the watched directory (repeatable)
        #[arg(long = "exclude-file", value_name = "PATH")]
        exclude_files: Vec<String>,

        /// Directory whose direct contents are skipped (repeatable)
        #[arg(long = "exclude-dir", value_name = "DIR")]
        exclude_dirs: Vec<String>,

        /// Allowed extension without the dot (repeatable, default: ts tsx js jsx)
        #[arg(short = 'e', long = "ext", value_name = "EXT")]
        extensions: Vec<String>,

        /// Keep file extensions in generated module paths
        #[arg(long)]
        use_extension: bool,

        /// How paths relative to the watched directory are derived
        #[arg(long, default_value = "relative")]
        path_mode: PathModeArg,

        /// Follow symbolic links while scanning
        #[arg(long)]
        follow_symlinks: bool,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Generate every index listed in a manifest
    Run {
        /// Manifest file
        #[arg(short, long, default_value = IndexManifest::DEFAULT_FILE)]
        config: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args, Clone, Copy)]
struct RunArgs {
    /// Print the document instead of writing it
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Report format
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Fail if a target takes longer than this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PathModeArg {
    Relative,
    Legacy,
}

impl From<PathModeArg> for PathMode {
    fn from(arg: PathModeArg) -> Self {
        match arg {
            PathModeArg::Relative => PathMode::Relative,
            PathModeArg::Legacy => PathMode::Legacy,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Generate {
            filename,
            watched_dir,
            exclude_files,
            exclude_dirs,
            extensions,
            use_extension,
            path_mode,
            follow_symlinks,
            run,
        } => {
            let options = IndexOptions {
                exclude_files: Some(exclude_files),
                exclude_dirs: Some(exclude_dirs),
                allowed_extensions: (!extensions.is_empty()).then_some(extensions),
                use_extension: Some(use_extension),
                path_mode: Some(path_mode.into()),
                follow_symlinks: Some(follow_symlinks),
                ..IndexOptions::new(filename, watched_dir)
            };
            let config = options.into_config().context("Invalid options")?;
            run_targets(vec![config], run).await?;
        }
        Command::Run { config, run } => {
            let configs = load_manifest(&config)?;
            run_targets(configs, run).await?;
        }
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load and resolve every target of a manifest.
fn load_manifest(path: &Path) -> Result<Vec<IndexConfig>> {
    let manifest = IndexManifest::load(path)
        .with_context(|| format!("Failed to load manifest {}", path.display()))?;
    let configs = manifest.into_configs().context("Invalid manifest")?;
    Ok(configs)
}

/// Run targets one after another; the first failure aborts the rest.
async fn run_targets(configs: Vec<IndexConfig>, args: RunArgs) -> Result<()> {
    let mut reports = Vec::with_capacity(configs.len());

    for config in configs {
        let output = config.output.clone();
        let mut plugin = IndexPlugin::new(config).with_dry_run(args.dry_run);
        if let Some(secs) = args.timeout {
            plugin = plugin.with_deadline(Duration::from_secs(secs));
        }

        let generation = plugin
            .run()
            .await
            .with_context(|| format!("Failed to generate {}", output.display()))?;

        if args.dry_run && matches!(args.format, OutputFormat::Text) {
            print!("{}", generation.document);
        }
        reports.push(generation);
    }

    match args.format {
        OutputFormat::Text => {
            for generation in &reports {
                print_summary(generation, args.dry_run);
            }
        }
        OutputFormat::Json => {
            let json: Vec<_> = reports
                .iter()
                .map(|g| {
                    serde_json::json!({
                        "report": g.report,
                        "document": args.dry_run.then(|| g.document.as_str()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

/// Print a one-target summary to stderr.
fn print_summary(generation: &Generation, dry_run: bool) {
    let report = &generation.report;
    let verb = if dry_run { "Would write" } else { "Wrote" };

    eprintln!(
        "{} {} ({}, {} statements)",
        verb,
        report.output.display(),
        format_size(report.bytes as u64),
        report.statements()
    );
    eprintln!(
        "  {} files seen, {} eligible, {} skipped, {} without exports in {:.2}s",
        report.files_seen,
        report.eligible,
        report.total_skipped(),
        report.without_exports,
        report.duration.as_secs_f64()
    );
    for (reason, count) in &report.skipped {
        eprintln!("    {:<14} {}", reason.to_string(), count);
    }
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
