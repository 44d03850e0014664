use std::collections::BTreeMap;

use jita_types::{Example, VerbPair};

/// Field order of every note type; the first is the duplicate key
pub const FIELD_NAMES: [&str; 13] = [
    "VerbPairID",
    "IntransitiveKanji",
    "IntransitiveReading",
    "TransitiveKanji",
    "TransitiveReading",
    "IntransitiveExamples",
    "TransitiveExamples",
    "Level",
    "Image",
    "PracticeQuestions",
    "Answers",
    "SourceURL",
    "Attribution",
];

const MAX_LISTED: usize = 5;

/// Field values for one pair. `image` is the stored media file name, if any.
pub fn note_fields(pair: &VerbPair, image: Option<&str>) -> BTreeMap<String, String> {
    let values = [
        escape(&pair.id),
        escape(&pair.intransitive_verb.text),
        escape(pair.intransitive_verb.reading.as_deref().unwrap_or_default()),
        escape(&pair.transitive_verb.text),
        escape(pair.transitive_verb.reading.as_deref().unwrap_or_default()),
        format_examples(&pair.example_sentences.intransitive),
        format_examples(&pair.example_sentences.transitive),
        pair.level.as_str().to_string(),
        image
            .map(|name| format!("<img src=\"{}\">", escape(name)))
            .unwrap_or_default(),
        format_practice_questions(&pair.practice_questions),
        join_lines(pair.answers.iter().take(MAX_LISTED)),
        escape(&pair.source_url),
        escape(&pair.attribution),
    ];

    FIELD_NAMES
        .iter()
        .map(|name| name.to_string())
        .zip(values)
        .collect()
}

fn format_examples(examples: &[Example]) -> String {
    join_lines(examples.iter().map(|e| match &e.translation {
        Some(translation) => format!("{} ({})", e.sentence, translation),
        None => e.sentence.clone(),
    }))
}

/// Prefer items that carry answer choices; otherwise the first few
fn format_practice_questions(questions: &[String]) -> String {
    let with_choices: Vec<&String> = questions
        .iter()
        .filter(|q| q.contains('［') || q.contains('【'))
        .collect();

    if with_choices.is_empty() {
        join_lines(questions.iter().take(MAX_LISTED))
    } else {
        join_lines(with_choices.into_iter().take(MAX_LISTED))
    }
}

fn join_lines<S: AsRef<str>>(items: impl Iterator<Item = S>) -> String {
    items
        .map(|s| escape(s.as_ref()))
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Field contents are HTML
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use jita_types::{ExampleSentences, Level, Verb};

    fn pair() -> VerbPair {
        VerbPair {
            id: "開く_開ける".into(),
            title: "開く・開ける".into(),
            level: Level::Beginner,
            intransitive_verb: Verb {
                text: "開く".into(),
                reading: Some("あく".into()),
            },
            transitive_verb: Verb::new("開ける"),
            example_sentences: ExampleSentences {
                intransitive: vec![Example {
                    sentence: "ドアが開いた。".into(),
                    translation: Some("The door opened.".into()),
                }],
                transitive: vec![],
            },
            practice_questions: vec!["①窓が（開く・開ける）【】".into(), "② a < b".into()],
            answers: vec!["開く".into()],
            image_url: None,
            image_path: Some("images/開く_開ける.jpg".into()),
            source_url: "https://www.edewakaru.com/archives/100.html".into(),
            attribution: "Source: edewakaru.com".into(),
        }
    }

    #[test]
    fn every_field_is_filled_in_order() {
        let fields = note_fields(&pair(), Some("開く_開ける.jpg"));
        assert_eq!(fields.len(), FIELD_NAMES.len());
        assert_eq!(fields["VerbPairID"], "開く_開ける");
        assert_eq!(fields["IntransitiveReading"], "あく");
        assert_eq!(fields["TransitiveReading"], "");
        assert_eq!(fields["IntransitiveExamples"], "ドアが開いた。 (The door opened.)");
        assert_eq!(fields["Level"], "beginner");
        assert_eq!(fields["Image"], "<img src=\"開く_開ける.jpg\">");
    }

    #[test]
    fn practice_questions_prefer_choices() {
        let fields = note_fields(&pair(), None);
        assert_eq!(fields["PracticeQuestions"], "①窓が（開く・開ける）【】");
        assert_eq!(fields["Image"], "");
    }

    #[test]
    fn values_are_html_escaped() {
        let mut pair = pair();
        pair.practice_questions = vec!["a < b & c".into()];
        let fields = note_fields(&pair, None);
        assert_eq!(fields["PracticeQuestions"], "a &lt; b &amp; c");
    }
}
