use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use jita_config::Config;
use jita_config::paths::PathsConfig;
use jita_core::{Error, Result};

use crate::fetch::Fetcher;

/// In-memory site: unknown URLs fail like an unreachable host
#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<String, String>,
    images: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl FakeSite {
    pub fn page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    pub fn image(mut self, url: &str, bytes: &[u8]) -> Self {
        self.images.insert(url.to_string(), bytes.to_vec());
        self
    }

    pub fn requests_for(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.as_str() == url)
            .count()
    }
}

#[async_trait]
impl Fetcher for FakeSite {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| Error::network(url, "connection refused"))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        self.images
            .get(url)
            .cloned()
            .ok_or_else(|| Error::network(url, "HTTP 404 Not Found"))
    }
}

pub const BASE: &str = "https://www.edewakaru.com";

pub fn category(id: u32) -> String {
    format!("{BASE}/archives/cat_{id}.html")
}

pub fn article(id: u32) -> String {
    format!("{BASE}/archives/{id}.html")
}

pub fn index_html(ids: &[u32], next: Option<&str>) -> String {
    let mut html = String::from("<html><body>");
    for id in ids {
        html.push_str(&format!(
            r#"<h2 class="article-title"><a href="/archives/{id}.html">記事{id}</a></h2>"#
        ));
    }
    if let Some(next) = next {
        html.push_str(&format!(r#"<a rel="next" href="{next}">次へ</a>"#));
    }
    html.push_str("</body></html>");
    html
}

pub fn article_html(intransitive: &str, transitive: &str, image: Option<&str>) -> String {
    let img = image
        .map(|src| format!(r#"<p><img src="{src}"></p>"#))
        .unwrap_or_default();
    format!(
        r#"<html><body>
<h2 class="article-title"><a href="/archives/0.html">{intransitive}・{transitive}｜自動詞・他動詞</a></h2>
<div class="article-body">
{img}
<p>ドアが{intransitive}。</p>
<p>ドアを{transitive}。</p>
</div>
</body></html>"#
    )
}

/// Config rooted in a fresh temp dir, categories pointing at the fake site
pub fn test_config() -> Config {
    let root = std::env::temp_dir().join(format!("jita-scrape-{}", uuid::Uuid::new_v4()));
    let mut config = Config::new();
    config.paths = PathsConfig::at(root);
    config.scraper.base_url = BASE.to_string();
    config.scraper.categories.beginner = Some(category(1));
    config.scraper.categories.intermediate = Some(category(2));
    config.scraper.categories.advanced = Some(category(3));
    config.scraper.categories.other = None;
    config.scraper.request_delay_ms = 0;
    config.scraper.image_delay_ms = 0;
    config
}
