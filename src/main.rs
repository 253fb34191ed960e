use abc_index::{config, generate, output, scan};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "abc-index")]
#[command(about = "Alphabetical HTML indexes for ABC tune collections")]
#[command(long_about = "\
Alphabetical HTML indexes for ABC tune collections

Every .abc file under the source directory is scanned for tune headers. Each
title becomes an index entry, grouped by first letter:

  X:12                 tune number, starts a header
  T:The Kesh           title  → listed as \"Kesh, The\"
  T:Kesh Jig           alternate title → its own entry
  R:jig                rhythm
  M:6/8                meter
  K:G                  key, ends the header

A file whose first line is %!NOINDEX! is skipped. A rendered copy next to a
tune file (reels.abc.pdf beside reels.abc) is linked from its entries.

Settings are read from abc-index.toml in the source directory; command-line
flags override them. Run 'abc-index gen-config' for a documented stock file.")]
#[command(version)]
struct Cli {
    /// Directory to scan for tune files
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Directory the index pages are written to
    #[arg(long, default_value = ".", global = true)]
    output: PathBuf,

    /// Index title (also the page file name stem)
    #[arg(long, global = true)]
    title: Option<String>,

    /// URL prefix for links to tune files
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Write one page per letter plus a redirecting main page
    #[arg(long, global = true)]
    split: bool,

    /// Log each directory, file and tune as it is processed
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan tune files and write the index pages
    Build,
    /// Scan tune files and print the index without writing anything
    Scan {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock abc-index.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Command::Build => {
            let index_config = resolve_config(&cli)?;
            println!("==> Scanning {}", cli.source.display());
            let catalog = scan::scan(&cli.source, &index_config.scan)?;
            println!("{}", output::format_scan_summary(&catalog));

            println!("==> Generating → {}", cli.output.display());
            let pages = generate::generate(&catalog.index, &index_config, &cli.output)?;
            output::print_generate_output(&pages);
        }
        Command::Scan { json } => {
            let index_config = resolve_config(&cli)?;
            let catalog = scan::scan(&cli.source, &index_config.scan)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                output::print_scan_output(&catalog, &cli.source);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `abc-index.toml` from the source directory, then command-line flags.
fn resolve_config(cli: &Cli) -> Result<config::IndexConfig, config::ConfigError> {
    let overrides = config::ConfigOverrides {
        title: cli.title.clone(),
        base_url: cli.base_url.clone(),
        split: cli.split.then_some(true),
    };
    overrides.apply(config::load_config(&cli.source)?)
}

/// `RUST_LOG` wins; otherwise `--verbose` picks debug over info.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "abc_index=debug"
    } else {
        "abc_index=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
