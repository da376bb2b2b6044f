use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use feedscan::driver::{self, DriverOptions};
use feedscan::Config;

#[derive(Parser)]
#[command(name = "feedscan", about = "Parse RSS and Atom documents, however malformed")]
struct Args {
    /// Config file (defaults to ~/.config/feedscan/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print one JSON object per document
    #[arg(long)]
    json: bool,

    /// Documents parsed at the same time
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Per-document parse deadline in seconds
    #[arg(long, value_name = "N")]
    timeout_secs: Option<u64>,

    /// Feed documents to parse
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,
}

/// Get the config directory path (~/.config/feedscan/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("feedscan"))
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => match get_config_dir() {
            Ok(dir) => {
                let path = dir.join("config.toml");
                Config::load(&path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?
            }
            Err(e) => {
                tracing::debug!(error = %e, "No config directory, using defaults");
                Config::default()
            }
        },
    };

    if args.json {
        config.json = true;
    }
    if let Some(n) = args.concurrency {
        config.concurrency = n;
    }
    if let Some(secs) = args.timeout_secs {
        config.parse_timeout_secs = secs;
    }
    config.validate().context("Invalid command-line option")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let options = DriverOptions::from(&config);

    tracing::info!(
        documents = args.files.len(),
        concurrency = options.concurrency,
        "Parsing documents"
    );
    let results = driver::parse_all(args.files, &options).await;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for doc in &results {
        if config.json {
            writeln!(out, "{}", doc.to_json()).context("Failed to write report")?;
        } else {
            doc.write_summary(&mut out, config.title_width)
                .context("Failed to write report")?;
        }
    }
    out.flush().context("Failed to write report")?;

    let failed = results.iter().filter(|doc| doc.result.is_err()).count();
    if failed > 0 {
        tracing::warn!(failed, total = results.len(), "Some documents failed to parse");
        std::process::exit(1);
    }
    Ok(())
}
