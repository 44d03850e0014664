use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::fields::FIELD_NAMES;

const CSS: &str = r#"
.card {
    font-family: "Hiragino Kaku Gothic Pro", "Yu Gothic", "Meiryo", sans-serif;
    font-size: 24px;
    text-align: center;
    color: #333;
    background-color: #fafafa;
    padding: 20px;
}
.verb-pair { font-size: 36px; font-weight: bold; margin: 20px 0; }
.intransitive { color: #2196F3; }
.transitive { color: #4CAF50; }
.particle { font-size: 18px; color: #666; margin: 10px 0; }
.image-container { margin: 20px 0; }
.image-container img { max-width: 100%; max-height: 400px; border-radius: 8px; }
.examples, .practice {
    text-align: left;
    font-size: 16px;
    line-height: 1.8;
    margin: 20px auto;
    max-width: 500px;
}
.practice { background: #f5f5f5; padding: 15px; border-radius: 8px; }
.level-tag { display: inline-block; padding: 4px 12px; border-radius: 12px; font-size: 12px; }
.level-beginner { background: #E8F5E9; color: #2E7D32; }
.level-intermediate { background: #FFF3E0; color: #E65100; }
.level-advanced { background: #FCE4EC; color: #C2185B; }
.level-other { background: #ECEFF1; color: #455A64; }
.attribution { font-size: 10px; color: #999; margin-top: 20px; }
"#;

const LEVEL_TAG: &str = r#"<div class="level-tag level-{{Level}}">{{Level}}</div>"#;

const INTRANSITIVE_WITH_READING: &str = r#"<span class="intransitive">{{IntransitiveKanji}}{{#IntransitiveReading}}（{{IntransitiveReading}}）{{/IntransitiveReading}}</span>"#;

const TRANSITIVE_WITH_READING: &str = r#"<span class="transitive">{{TransitiveKanji}}{{#TransitiveReading}}（{{TransitiveReading}}）{{/TransitiveReading}}</span>"#;

const FOOTER: &str = r#"<div class="attribution">{{Attribution}} | <a href="{{SourceURL}}">Source</a></div>"#;

/// One of the three note types the sync maintains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Recognition,
    IntransitiveToTransitive,
    TransitiveToIntransitive,
}

impl NoteKind {
    pub const ALL: [NoteKind; 3] = [
        NoteKind::Recognition,
        NoteKind::IntransitiveToTransitive,
        NoteKind::TransitiveToIntransitive,
    ];

    pub fn model_name(&self) -> &'static str {
        match self {
            NoteKind::Recognition => "Japanese Verb Pair (Recognition)",
            NoteKind::IntransitiveToTransitive => "Japanese Verb Pair (Intransitive → Transitive)",
            NoteKind::TransitiveToIntransitive => "Japanese Verb Pair (Transitive → Intransitive)",
        }
    }

    fn card(&self) -> CardTemplate {
        match self {
            NoteKind::Recognition => CardTemplate {
                name: "Verb Pair Recognition".to_string(),
                front: format!(
                    r#"{LEVEL_TAG}
<div class="image-container">{{{{Image}}}}</div>
<div class="verb-pair">
    <span class="intransitive">{{{{IntransitiveKanji}}}}</span> ・ <span class="transitive">{{{{TransitiveKanji}}}}</span>
</div>
<div class="particle">が (intransitive) vs を (transitive)</div>"#
                ),
                back: format!(
                    r#"{{{{FrontSide}}}}
<hr id="answer">
<div class="verb-pair">{INTRANSITIVE_WITH_READING} ・ {TRANSITIVE_WITH_READING}</div>
<div class="particle">
    <strong>自動詞</strong>: 〜が {{{{IntransitiveKanji}}}}<br>
    <strong>他動詞</strong>: 〜を {{{{TransitiveKanji}}}}
</div>
<div class="examples">{{{{IntransitiveExamples}}}}<br>{{{{TransitiveExamples}}}}</div>
<div class="practice"><strong>Practice:</strong><br>{{{{PracticeQuestions}}}}</div>
<div class="examples"><strong>Answers:</strong><br>{{{{Answers}}}}</div>
{FOOTER}"#
                ),
            },
            NoteKind::IntransitiveToTransitive => CardTemplate {
                name: "Intransitive → Transitive".to_string(),
                front: format!(
                    r#"{LEVEL_TAG}
<p>What is the <strong>transitive</strong> (他動詞) pair of:</p>
<div class="verb-pair"><span class="intransitive">{{{{IntransitiveKanji}}}}</span></div>
<div class="particle">(〜が {{{{IntransitiveKanji}}}})</div>"#
                ),
                back: format!(
                    r#"{{{{FrontSide}}}}
<hr id="answer">
<div class="verb-pair">{TRANSITIVE_WITH_READING}</div>
<div class="particle">〜を {{{{TransitiveKanji}}}}</div>
<div class="examples">{{{{TransitiveExamples}}}}</div>
<div class="image-container">{{{{Image}}}}</div>
{FOOTER}"#
                ),
            },
            NoteKind::TransitiveToIntransitive => CardTemplate {
                name: "Transitive → Intransitive".to_string(),
                front: format!(
                    r#"{LEVEL_TAG}
<p>What is the <strong>intransitive</strong> (自動詞) pair of:</p>
<div class="verb-pair"><span class="transitive">{{{{TransitiveKanji}}}}</span></div>
<div class="particle">(〜を {{{{TransitiveKanji}}}})</div>"#
                ),
                back: format!(
                    r#"{{{{FrontSide}}}}
<hr id="answer">
<div class="verb-pair">{INTRANSITIVE_WITH_READING}</div>
<div class="particle">〜が {{{{IntransitiveKanji}}}}</div>
<div class="examples">{{{{IntransitiveExamples}}}}</div>
<div class="image-container">{{{{Image}}}}</div>
{FOOTER}"#
                ),
            },
        }
    }

    pub fn note_type(&self) -> NoteType {
        NoteType {
            name: self.model_name().to_string(),
            fields: FIELD_NAMES.iter().map(|f| f.to_string()).collect(),
            css: CSS.to_string(),
            cards: vec![self.card()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardTemplate {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Front")]
    pub front: String,
    #[serde(rename = "Back")]
    pub back: String,
}

/// A note type definition as sent to `createModel`
#[derive(Debug, Clone)]
pub struct NoteType {
    pub name: String,
    /// First field is the duplicate-detection key
    pub fields: Vec<String>,
    pub css: String,
    pub cards: Vec<CardTemplate>,
}

impl NoteType {
    pub fn key_field(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or_default()
    }

    pub fn create_model_params(&self) -> serde_json::Value {
        json!({
            "modelName": self.name,
            "inOrderFields": self.fields,
            "css": self.css,
            "isCloze": false,
            "cardTemplates": self.cards,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_distinct_models() {
        let names: Vec<_> = NoteKind::ALL.iter().map(|k| k.model_name()).collect();
        assert_eq!(names.len(), 3);
        assert!(names.iter().all(|n| names.iter().filter(|m| *m == n).count() == 1));
    }

    #[test]
    fn key_field_comes_first() {
        for kind in NoteKind::ALL {
            assert_eq!(kind.note_type().key_field(), "VerbPairID");
        }
    }

    #[test]
    fn templates_only_reference_known_fields() {
        for kind in NoteKind::ALL {
            let card = kind.card();
            for side in [&card.front, &card.back] {
                let mut rest = side.as_str();
                while let Some(start) = rest.find("{{") {
                    let end = rest[start..].find("}}").unwrap() + start;
                    let name = rest[start + 2..end].trim_start_matches(['#', '/']);
                    assert!(
                        name == "FrontSide" || FIELD_NAMES.contains(&name),
                        "{} references unknown field {name}",
                        kind.model_name()
                    );
                    rest = &rest[end + 2..];
                }
            }
        }
    }

    #[test]
    fn create_model_params_shape() {
        let params = NoteKind::Recognition.note_type().create_model_params();
        assert_eq!(params["modelName"], "Japanese Verb Pair (Recognition)");
        assert_eq!(params["inOrderFields"][0], "VerbPairID");
        assert_eq!(params["cardTemplates"][0]["Name"], "Verb Pair Recognition");
        assert!(params["cardTemplates"][0]["Front"]
            .as_str()
            .unwrap()
            .contains("{{Image}}"));
    }
}
