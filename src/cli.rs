//! Command-line interface: load, merge, and print configuration targets.

use anyhow::{Context, Result};
use clap::Parser;
use figtree::{load_config, load_first_found_config, ConfigSource};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Merge YAML/JSON/INI/XML configuration sources into one tree
#[derive(Parser)]
#[command(name = "figtree")]
#[command(author, version, long_about = None)]
struct Cli {
    /// Configuration targets: local paths, http(s) URLs, or `@path` to
    /// force local-path semantics
    #[arg(required = true)]
    targets: Vec<String>,

    /// Explicit format hint applied to every target
    /// (yaml|yml|json|cfg|conf|cnf|config|ini|xml)
    #[arg(short, long)]
    format: Option<String>,

    /// Stop at the first target that yields data instead of merging all
    #[arg(long)]
    first_found: bool,

    /// Output rendering
    #[arg(short, long, value_parser = ["json", "yaml"], default_value = "json")]
    output: String,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls
    // back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let sources = cli
        .targets
        .iter()
        .map(|target| match &cli.format {
            Some(hint) => ConfigSource::file_with_hint(target, hint),
            None => ConfigSource::file(target),
        })
        .collect::<figtree::Result<Vec<_>>>()?;

    let merged = if cli.first_found { load_first_found_config(sources)? } else { load_config(sources)? };

    match cli.output.as_str() {
        "yaml" => {
            let rendered =
                merged.to_yaml_string().context("failed rendering merged config as YAML")?;
            print!("{rendered}");
        }
        _ => {
            let rendered = serde_json::to_string_pretty(&merged)
                .context("failed rendering merged config as JSON")?;
            println!("{rendered}");
        }
    }

    Ok(())
}
