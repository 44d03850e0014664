use anyhow::{Context, Result};
use clap::Parser;
use jita_anki::{AnkiConnectClient, Syncer};
use jita_app::cli::SyncArgs;
use jita_app::logging;
use jita_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let args = SyncArgs::parse();
    logging::init(args.verbose);

    let config = args.apply(Config::from_env());
    let client =
        AnkiConnectClient::new(&config.anki).context("Failed to set up AnkiConnect client")?;

    let url = config.anki.url.clone();
    let report = Syncer::new(client, config)
        .run()
        .await
        .with_context(|| format!("Anki sync failed (AnkiConnect at {url})"))?;

    tracing::info!(
        "Added: {}, updated: {}, duplicates: {}, failed: {}, total pairs: {}",
        report.added,
        report.updated,
        report.duplicates,
        report.failed,
        report.pairs
    );

    Ok(())
}
