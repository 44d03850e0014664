use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const BLOCK_TAGS: [&str; 19] = [
    "address", "article", "blockquote", "dd", "div", "dl", "dt", "h1", "h2", "h3", "h4", "h5",
    "h6", "li", "ol", "p", "section", "table", "tr",
];

/// Elements matching `css`, document order. An invalid selector matches nothing.
pub(crate) fn select_all<'a>(root: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => root.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

pub(crate) fn select_first<'a>(root: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    select_all(root, css).into_iter().next()
}

pub(crate) fn root(document: &Html) -> ElementRef<'_> {
    document.root_element()
}

/// Text of an element with each text node trimmed and concatenated
pub(crate) fn inline_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// Text of an element with line breaks at `<br>` and block boundaries
pub(crate) fn block_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_text(element, &mut out);
    out
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if matches!(name, "script" | "style" | "noscript") {
        return;
    }
    if name == "br" {
        out.push('\n');
        return;
    }

    let block = BLOCK_TAGS.contains(&name);
    if block {
        out.push('\n');
    }

    for child in element.children() {
        if let Some(child) = ElementRef::wrap(child) {
            push_text(child, out);
        } else if let Node::Text(text) = child.value() {
            out.push_str(text);
        }
    }

    if block {
        out.push('\n');
    }
}

/// `href`/`src` resolved against the page it appeared on
pub(crate) fn resolve(base: &Url, link: &str) -> Option<Url> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }
    base.join(link).ok()
}
