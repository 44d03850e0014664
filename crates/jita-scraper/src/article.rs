use jita_config::scraper::ScraperConfig;
use jita_core::preprocess::{clean_line, slug};
use jita_core::{Error, Result};
use jita_types::{Example, ExampleSentences, Level, Verb, VerbPair};
use regex::Regex;
use scraper::Html;
use url::Url;

use crate::html::{block_text, inline_text, resolve, root, select_all, select_first};

const TITLE: &str = "h2.article-title a, h1.article-title, .article-title";
const TITLE_FALLBACK: &str = "h2 a, h1";
const CONTENT: &str = ".article-body, .article-content, .entry-content";

/// Hosts the site serves its illustrations from
const IMAGE_HOSTS: [&str; 2] = ["resize.blogsys.jp", "livedoor.blogimg.jp"];
/// Only the first few `<img>` tags are considered
const IMAGE_SCAN_LIMIT: usize = 5;
/// Longer lines are only taken as examples when explicitly tagged
const EXAMPLE_MAX_CHARS: usize = 100;

/// Parse one detail page into a record. `image_path` is left empty.
pub fn parse_article(
    html: &str,
    page_url: &Url,
    level: Level,
    config: &ScraperConfig,
) -> Result<VerbPair> {
    let document = Html::parse_document(html);
    let root = root(&document);
    let context = page_url.as_str();

    let title = select_first(root, TITLE)
        .or_else(|| select_first(root, TITLE_FALLBACK))
        .map(inline_text)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::parse(context, "no article title"))?;

    let (intransitive, transitive) = split_title(&title)
        .ok_or_else(|| Error::parse(context, format!("no verb pair in title '{title}'")))?;

    let content = select_first(root, CONTENT).unwrap_or(root);
    let text = block_text(content);
    let lines: Vec<String> = text
        .lines()
        .map(clean_line)
        .filter(|l| !l.is_empty())
        .collect();

    let page_text = block_text(root);
    let intransitive_verb = Verb {
        reading: find_reading(&page_text, &intransitive)?,
        text: intransitive,
    };
    let transitive_verb = Verb {
        reading: find_reading(&page_text, &transitive)?,
        text: transitive,
    };

    let intransitive_target = ExampleTarget {
        verb: &intransitive_verb.text,
        other: &transitive_verb.text,
        particle: 'が',
        tag: "自動詞",
    };
    let transitive_target = ExampleTarget {
        verb: &transitive_verb.text,
        other: &intransitive_verb.text,
        particle: 'を',
        tag: "他動詞",
    };
    let example_sentences = ExampleSentences {
        intransitive: find_examples(&lines, &intransitive_target, config.max_examples),
        transitive: find_examples(&lines, &transitive_target, config.max_examples),
    };

    let mut practice_questions = find_practice_questions(&text)?;
    practice_questions.truncate(config.max_practice_questions);

    let image_url = select_all(content, "img")
        .into_iter()
        .take(IMAGE_SCAN_LIMIT)
        .filter_map(|img| img.value().attr("src"))
        .find(|src| IMAGE_HOSTS.iter().any(|host| src.contains(host)))
        .and_then(|src| resolve(page_url, src))
        .map(|url| url.to_string());

    let pair = VerbPair {
        id: slug(&intransitive_verb.text, &transitive_verb.text),
        title,
        level,
        intransitive_verb,
        transitive_verb,
        example_sentences,
        practice_questions,
        answers: find_answers(&text)?,
        image_url,
        image_path: None,
        source_url: page_url.to_string(),
        attribution: config.attribution.clone(),
    };

    pair.validate().map_err(|reason| Error::parse(context, reason))?;
    Ok(pair)
}

/// `開く・開ける｜自動詞・他動詞` -> (`開く`, `開ける`)
pub fn split_title(title: &str) -> Option<(String, String)> {
    let head = title.split(['｜', '|']).next()?.trim();

    for sep in ["・", "／", "/"] {
        if !head.contains(sep) {
            continue;
        }
        let parts: Vec<&str> = head.split(sep).map(str::trim).collect();
        if let [first, second] = parts.as_slice()
            && !first.is_empty()
            && !second.is_empty()
        {
            return Some((first.to_string(), second.to_string()));
        }
    }

    None
}

/// Kana reading written right after the verb: `開く（あく）`, `開く(あく)` or `開く【あく】`
fn find_reading(text: &str, verb: &str) -> Result<Option<String>> {
    let verb = regex::escape(verb);
    let patterns = [
        format!("{verb}[（(]([ぁ-んァ-ンー]+)[）)]"),
        format!("{verb}【([ぁ-んァ-ンー]+)】"),
    ];

    for pattern in patterns {
        if let Some(caps) = compile(&pattern)?.captures(text) {
            return Ok(Some(caps[1].to_string()));
        }
    }

    Ok(None)
}

/// Drop the final kana so conjugated forms still match (`開ける` -> `開け`)
fn stem(verb: &str) -> &str {
    match verb.char_indices().last() {
        Some((idx, _)) if idx > 0 => &verb[..idx],
        _ => verb,
    }
}

/// Which verb of the pair an example line must illustrate
struct ExampleTarget<'a> {
    verb: &'a str,
    /// The partner verb; lines using it belong to the other list
    other: &'a str,
    particle: char,
    tag: &'a str,
}

impl ExampleTarget<'_> {
    fn matches(&self, line: &str) -> bool {
        let own_stem = stem(self.verb);
        let other_stem = stem(self.other);

        if !line.contains(self.particle) || !line.contains(own_stem) {
            return false;
        }
        // 開く vs 開ける: `開` matches both, so a line with `開け` is the partner's.
        // Not applied when our stem already contains the partner's.
        if !own_stem.contains(other_stem) && line.contains(other_stem) {
            return false;
        }
        line.contains(self.tag) || line.chars().count() < EXAMPLE_MAX_CHARS
    }
}

fn find_examples(lines: &[String], target: &ExampleTarget<'_>, limit: usize) -> Vec<Example> {
    let mut examples: Vec<Example> = Vec::new();

    for line in lines {
        if examples.len() >= limit {
            break;
        }
        if starts_with_circled_number(line) || !target.matches(line) {
            continue;
        }

        let example = split_translation(line);
        if !examples.contains(&example) {
            examples.push(example);
        }
    }

    examples
}

/// `ドアが開く。(The door opens.)` -> sentence + translation
fn split_translation(line: &str) -> Example {
    let trimmed = line.trim();
    let closes = trimmed.ends_with(')') || trimmed.ends_with('）');
    let open = trimmed.rfind(['(', '（']);

    if closes && let Some(open) = open {
        let inner = trimmed[open..]
            .trim_start_matches(['(', '（'])
            .trim_end_matches([')', '）'])
            .trim();
        let sentence = trimmed[..open].trim();
        if !sentence.is_empty() && inner.chars().any(|c| c.is_ascii_alphabetic()) {
            return Example {
                sentence: sentence.to_string(),
                translation: Some(inner.to_string()),
            };
        }
    }

    Example {
        sentence: trimmed.to_string(),
        translation: None,
    }
}

fn starts_with_circled_number(line: &str) -> bool {
    line.chars().next().is_some_and(|c| ('①'..='⑮').contains(&c))
}

/// Numbered exercise lines, `①ドアが（開く・開ける）【 】`
fn find_practice_questions(text: &str) -> Result<Vec<String>> {
    let pattern = compile("[①-⑮][^\n①-⑩]+")?;

    Ok(pattern
        .find_iter(text)
        .map(|m| {
            let mut question = m.as_str().trim().to_string();
            if question.contains('【') && !question.contains('】') {
                question.push('】');
            }
            question
        })
        .filter(|q| q.chars().count() > 5)
        .collect())
}

/// Items of the `【答え】` section
fn find_answers(text: &str) -> Result<Vec<String>> {
    let section = compile(r"(?s)【答え】(.*?)(?:【|\z)")?;
    let Some(caps) = section.captures(text) else {
        return Ok(Vec::new());
    };

    let item = compile("[①-⑮]([^①-⑩\n]+)")?;
    Ok(item
        .captures_iter(&caps[1])
        .map(|c| c[1].trim().to_string())
        .filter(|a| !a.is_empty())
        .collect())
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::parse("pattern", e.to_string()))
}
