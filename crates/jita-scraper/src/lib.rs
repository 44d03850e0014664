//! Scrapes the edewakaru.com verb-pair categories into `data/*.json`.

pub mod article;
pub mod fetch;
mod html;
pub mod images;
pub mod index;
pub mod scrape;

pub use fetch::{Fetcher, HttpFetcher};
pub use scrape::{LevelOutcome, LevelReport, ScrapeReport, Scraper};

#[cfg(test)]
mod tests;
