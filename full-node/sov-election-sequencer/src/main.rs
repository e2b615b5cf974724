use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use sov_election_sequencer::{from_toml_path, read_transactions, Sequencer, SequencerConfig};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Runs a batch of election calls against a fresh election and prints the tallies.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the sequencer configuration.
    #[arg(long, default_value = "election_config.toml")]
    config: PathBuf,

    /// Path to a JSON array of transactions.
    #[arg(long)]
    txs: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Unable to set global default subscriber")?;

    let args = Args::parse();

    let config: SequencerConfig =
        from_toml_path(&args.config).context("Failed to read sequencer configuration")?;
    let txs = read_transactions(&args.txs).context("Failed to read transactions")?;

    let sequencer = Sequencer::new(&config)?;
    let report = sequencer.run_batch(txs).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
