use scraper::{ElementRef, Html};
use url::Url;

use crate::html::{inline_text, resolve, root, select_all, select_first};

const ARTICLE_LINKS: &str = ".article-title a, h2.article-title a, .article-body a";
const NEXT_LINK: &str = "a[rel=\"next\"], .pager-next a";
const PAGER_CURRENT: &str = ".pager .current, .pagination .current";
const PAGER_LINKS: &str = ".pager a, .pagination a";

/// Links found on one category index page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexPage {
    /// Detail-page URLs in site order, without duplicates
    pub articles: Vec<String>,
    pub next_page: Option<String>,
}

pub fn parse_index(html: &str, page_url: &Url) -> IndexPage {
    let document = Html::parse_document(html);
    let root = root(&document);

    let mut articles: Vec<String> = Vec::new();
    for anchor in select_all(root, ARTICLE_LINKS) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !is_article_link(href) {
            continue;
        }
        if let Some(url) = resolve(page_url, href) {
            let url = url.to_string();
            if !articles.contains(&url) {
                articles.push(url);
            }
        }
    }

    IndexPage {
        articles,
        next_page: next_page(root, page_url),
    }
}

/// Detail pages live under `/archives/<id>.html`; category pages are `cat_<id>.html`
pub fn is_article_link(href: &str) -> bool {
    href.contains("/archives/") && href.ends_with(".html") && !href.contains("cat_")
}

fn next_page(root: ElementRef<'_>, page_url: &Url) -> Option<String> {
    let href_of = |anchor: ElementRef<'_>| {
        anchor
            .value()
            .attr("href")
            .and_then(|href| resolve(page_url, href))
    };

    if let Some(url) = select_first(root, NEXT_LINK).and_then(href_of) {
        return Some(url.to_string());
    }

    if let Some(url) = select_all(root, "a")
        .into_iter()
        .find(|a| inline_text(*a).contains("次のページ"))
        .and_then(href_of)
    {
        return Some(url.to_string());
    }

    // Numbered pager: the link right after the current page
    let current: u32 = select_all(root, PAGER_CURRENT)
        .into_iter()
        .find_map(|el| inline_text(el).parse().ok())?;
    let wanted = current.checked_add(1)?.to_string();

    select_all(root, PAGER_LINKS)
        .into_iter()
        .find(|a| inline_text(*a) == wanted)
        .and_then(href_of)
        .map(|url| url.to_string())
}
