//! wikisum CLI - save Wikipedia article summaries
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use wikisum::pipeline::{DirectorySink, FixedInput, InputSource, Prompt};
use wikisum::{Config, HttpProvider, Pipeline};

#[derive(Parser)]
#[command(name = "wikisum")]
#[command(author, version, about = "Save the summary of a Wikipedia article", long_about = None)]
struct Cli {
    /// Article URL or page title (prompted for when omitted)
    target: Option<String>,
    /// Stop collecting paragraphs once this many words are reached
    #[arg(long)]
    max_words: Option<usize>,
    /// Directory to write the summary file into
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Config file to use instead of wikisum.toml
    #[arg(long)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let max_words = cli.max_words.unwrap_or(config.summary.max_words);
    let output_dir = cli.output_dir.unwrap_or(config.output.dir);

    let provider = HttpProvider::with_timeout(Duration::from_secs(config.fetch.timeout_secs))?;
    let pipeline = Pipeline::new(
        provider,
        DirectorySink::new(output_dir),
        config.fetch.base_url,
        max_words,
    );

    let mut input: Box<dyn InputSource> = match cli.target {
        Some(target) => Box::new(FixedInput(target)),
        None => Box::new(Prompt),
    };
    pipeline.run(&mut *input, &mut std::io::stdout()).await?;

    Ok(())
}

/// Logs go to stderr so stdout carries only progress output
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match verbose {
        0 => "wikisum=warn",
        1 => "wikisum=info",
        2 => "wikisum=debug",
        _ => "wikisum=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
