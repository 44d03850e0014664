use std::collections::HashSet;

use jita_config::Config;
use jita_core::{DataStore, Error, Result};
use jita_types::{Level, VerbPair};
use url::Url;

use crate::article::parse_article;
use crate::fetch::Fetcher;
use crate::images::download_image;
use crate::index::parse_index;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelOutcome {
    Scraped {
        found: usize,
        saved: usize,
        skipped: usize,
    },
    /// The category index could not be fetched; nothing was written
    Failed(String),
    /// No category URL configured for this level
    NotConfigured,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelReport {
    pub level: Level,
    pub outcome: LevelOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct ScrapeReport {
    pub levels: Vec<LevelReport>,
    /// Records now in `all.json`
    pub total: usize,
}

impl ScrapeReport {
    /// True when at least one level was attempted and every attempt failed
    pub fn all_failed(&self) -> bool {
        let attempted: Vec<_> = self
            .levels
            .iter()
            .filter(|r| r.outcome != LevelOutcome::NotConfigured)
            .collect();

        !attempted.is_empty()
            && attempted
                .iter()
                .all(|r| matches!(r.outcome, LevelOutcome::Failed(_)))
    }

    pub fn saved(&self) -> usize {
        self.levels
            .iter()
            .map(|r| match r.outcome {
                LevelOutcome::Scraped { saved, .. } => saved,
                _ => 0,
            })
            .sum()
    }
}

/// Sequential scrape of the configured levels into the data store
pub struct Scraper<F: Fetcher> {
    fetcher: F,
    config: Config,
    store: DataStore,
}

impl<F: Fetcher> Scraper<F> {
    pub fn new(fetcher: F, config: Config) -> Self {
        let store = DataStore::new(config.paths.clone());
        Self {
            fetcher,
            config,
            store,
        }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Only file errors abort the run; network and parse failures are
    /// recorded per level or per pair.
    pub async fn run(&self) -> Result<ScrapeReport> {
        self.store.ensure_dirs()?;

        let mut report = ScrapeReport::default();
        for level in self.config.levels() {
            let outcome = self.scrape_level(level).await?;
            report.levels.push(LevelReport { level, outcome });
        }

        report.total = self.store.rebuild_all()?;
        Ok(report)
    }

    async fn scrape_level(&self, level: Level) -> Result<LevelOutcome> {
        let Some(category_url) = self.config.scraper.categories.get(level) else {
            tracing::info!("No category configured for {}, skipping", level);
            return Ok(LevelOutcome::NotConfigured);
        };

        tracing::info!("Scraping {} level from {}", level, category_url);

        let article_urls = match self.collect_article_urls(category_url).await {
            Ok(urls) => urls,
            Err(e) => {
                tracing::error!("Failed to scrape {} index: {}", level, e);
                return Ok(LevelOutcome::Failed(e.to_string()));
            }
        };
        tracing::info!("Found {} articles for {}", article_urls.len(), level);

        let mut pairs: Vec<VerbPair> = Vec::new();
        let mut skipped = 0;
        for url in &article_urls {
            match self.scrape_article(url, level).await {
                Ok(pair) => {
                    if pairs.iter().any(|p| p.id == pair.id) {
                        tracing::warn!("Duplicate pair {} at {}, keeping the first", pair.id, url);
                        skipped += 1;
                        continue;
                    }
                    self.store.write_pair(&pair)?;
                    tracing::info!("Saved {}", pair.id);
                    pairs.push(pair);
                }
                Err(e @ Error::FileIo { .. }) => return Err(e),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", url, e);
                    skipped += 1;
                }
            }
        }

        self.store.write_level(level, &pairs)?;

        Ok(LevelOutcome::Scraped {
            found: article_urls.len(),
            saved: pairs.len(),
            skipped,
        })
    }

    /// Article links across all pages of a category. The first page must load;
    /// a later page failing ends pagination with what was found so far.
    async fn collect_article_urls(&self, category_url: &str) -> Result<Vec<String>> {
        let mut urls: Vec<String> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut next = Some(category_url.to_string());

        while let Some(page_url) = next.take() {
            if !visited.insert(page_url.clone()) {
                tracing::warn!("Pagination loops back to {}, stopping", page_url);
                break;
            }

            tracing::info!("Fetching category page: {}", page_url);
            let parsed_url =
                Url::parse(&page_url).map_err(|e| Error::parse(&page_url, e.to_string()))?;

            let html = match self.fetcher.fetch_page(&page_url).await {
                Ok(html) => html,
                Err(e) if visited.len() == 1 => return Err(e),
                Err(e) => {
                    tracing::warn!("Stopping pagination: {}", e);
                    break;
                }
            };

            let page = parse_index(&html, &parsed_url);
            for url in page.articles {
                if !urls.contains(&url) {
                    urls.push(url);
                }
            }
            next = page.next_page;
        }

        Ok(urls)
    }

    async fn scrape_article(&self, url: &str, level: Level) -> Result<VerbPair> {
        tracing::info!("Parsing: {}", url);
        let page_url = Url::parse(url).map_err(|e| Error::parse(url, e.to_string()))?;
        let html = self.fetcher.fetch_page(url).await?;

        let mut pair = parse_article(&html, &page_url, level, &self.config.scraper)?;

        if let Some(image_url) = pair.image_url.clone() {
            let images_dir = self.config.paths.images_dir();
            match download_image(&self.fetcher, &image_url, &pair.id, &images_dir).await {
                Ok(path) => pair.image_path = Some(path),
                Err(e @ Error::FileIo { .. }) => return Err(e),
                Err(e) => tracing::warn!("Image for {} not downloaded: {}", pair.id, e),
            }
        }

        Ok(pair)
    }
}
