use unicode_normalization::UnicodeNormalization;

/// Characters that cannot appear in a file name on common filesystems
const RESERVED: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// NFKC-normalize and trim a scraped fragment, dropping line breaks
pub fn normalize(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let text: String = text.nfkc().collect();
    text.replace(['\n', '\r'], "").trim().to_string()
}

/// Trim and collapse inner runs of whitespace, keeping the original script
pub fn clean_line(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Stable file key for a pair: `<intransitive>_<transitive>`, NFKC-normalized,
/// whitespace removed, filesystem-reserved characters replaced by `-`
pub fn slug(intransitive: &str, transitive: &str) -> String {
    let raw = format!("{}_{}", normalize(intransitive), normalize(transitive));

    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if RESERVED.contains(&c) { '-' } else { c })
        .collect()
}
