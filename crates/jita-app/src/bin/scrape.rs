use anyhow::{Context, Result, bail};
use clap::Parser;
use jita_app::cli::ScrapeArgs;
use jita_app::logging;
use jita_config::Config;
use jita_scraper::{HttpFetcher, LevelOutcome, Scraper};

#[tokio::main]
async fn main() -> Result<()> {
    let args = ScrapeArgs::parse();
    logging::init(args.verbose);

    let config = args.apply(Config::from_env());
    tracing::info!(
        "Scraping into {} ({})",
        config.paths.root.display(),
        args.level().map_or("all levels".to_string(), |l| l.to_string())
    );

    let fetcher = HttpFetcher::new(&config.scraper).context("Failed to set up HTTP client")?;
    let scraper = Scraper::new(fetcher, config);
    let report = scraper
        .run()
        .await
        .context("Scrape aborted while writing output")?;

    for level in &report.levels {
        match &level.outcome {
            LevelOutcome::Scraped {
                found,
                saved,
                skipped,
            } => tracing::info!(
                "{}: {} saved, {} skipped of {} found",
                level.level,
                saved,
                skipped,
                found
            ),
            LevelOutcome::Failed(reason) => tracing::error!("{}: failed ({})", level.level, reason),
            LevelOutcome::NotConfigured => tracing::info!("{}: not configured", level.level),
        }
    }
    tracing::info!(
        "Scraping complete: {} saved this run, {} in {}",
        report.saved(),
        report.total,
        scraper.store().paths().all_file().display()
    );

    if report.all_failed() {
        bail!("every requested level failed to load its category index");
    }

    Ok(())
}
