//! Structured definitions.
//!
//! Definitions in the supported dictionaries use a small line-oriented markup, where the first
//! character of a line says what the line is:
//!
//! ```text
//! @hello/hə'ləʊ/              headword with optional pronunciation
//! *noun                       part of speech
//! -a greeting                 definition
//! =Hello there+Xin chào       example: phrase, `+`, meaning
//! !say hello                  idiom
//! -to greet someone           meaning of the idiom above
//! @Medicine                   specialized field (any `@` line after the headword)
//! -term                       term of the specialized field
//! ```
//!
//! The source data is uncurated, so parsing never fails: lines that are unknown or out of place
//! are skipped.
use serde::{Deserialize, Serialize};

/// A dictionary entry, as parsed from its definition text.
///
/// An empty `word` means nothing usable was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDictionaryEntry {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    pub parts_of_speech: Vec<PartOfSpeech>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specialized_fields: Vec<SpecializedField>,
}

impl ParsedDictionaryEntry {
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartOfSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub definitions: Vec<Definition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub idioms: Vec<Idiom>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
}

/// A usage example of a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub phrase: String,
    pub meaning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idiom {
    pub phrase: String,
    pub meaning: String,
}

/// Terminology of a domain (medicine, law, ...) attached to a headword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecializedField {
    pub field: String,
    pub terms: Vec<String>,
}

/// What the parser is currently adding to. Positions point into the entry being built.
#[derive(Debug, Default)]
struct State {
    part_of_speech: Option<usize>,
    definition: Option<usize>,
    field: Option<usize>,
    idiom: Option<String>,
}

/// Parse a raw definition into a [`ParsedDictionaryEntry`].
pub fn parse_definition(raw: &str) -> ParsedDictionaryEntry {
    let mut entry = ParsedDictionaryEntry::default();
    let mut state = State::default();

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let mut chars = line.chars();
        let Some(marker) = chars.next() else { continue };
        let rest = chars.as_str();

        match marker {
            '@' if entry.word.is_empty() => parse_headword(&mut entry, rest),
            '@' => {
                entry.specialized_fields.push(SpecializedField {
                    field: rest.trim().to_string(),
                    terms: Vec::new(),
                });
                state = State {
                    field: Some(entry.specialized_fields.len() - 1),
                    ..State::default()
                };
            }
            '*' => {
                entry.parts_of_speech.push(PartOfSpeech {
                    kind: rest.trim().to_string(),
                    ..PartOfSpeech::default()
                });
                state = State {
                    part_of_speech: Some(entry.parts_of_speech.len() - 1),
                    ..State::default()
                };
            }
            '-' => parse_dash(&mut entry, &mut state, rest.trim()),
            '=' => {
                let (Some(pos), Some(def)) = (state.part_of_speech, state.definition) else { continue };
                if let Some(example) = parse_example(rest) {
                    entry.parts_of_speech[pos].definitions[def].examples.push(example);
                }
            }
            '!' if state.part_of_speech.is_some() => {
                state.idiom = Some(rest.trim().to_string()).filter(|phrase| !phrase.is_empty());
            }
            _ => {}
        }
    }

    entry
}

// `@word` or `@word/pronunciation/`
fn parse_headword(entry: &mut ParsedDictionaryEntry, rest: &str) {
    let (word, tail) = match rest.split_once('/') {
        Some((word, tail)) => (word, Some(tail)),
        None => (rest, None),
    };
    let word = word.trim();
    if word.is_empty() {
        return;
    }

    entry.word = word.to_string();
    entry.pronunciation = tail
        .and_then(|t| t.split_once('/'))
        .map(|(pron, _)| pron.trim())
        .filter(|pron| !pron.is_empty())
        .map(String::from);
}

fn parse_dash(entry: &mut ParsedDictionaryEntry, state: &mut State, text: &str) {
    if let Some(field) = state.field {
        entry.specialized_fields[field].terms.push(text.to_string());
        return;
    }

    let Some(pos) = state.part_of_speech else { return };
    let part = &mut entry.parts_of_speech[pos];

    if let Some(phrase) = state.idiom.take() {
        part.idioms.push(Idiom { phrase, meaning: text.to_string() });
    } else {
        part.definitions.push(Definition { text: text.to_string(), examples: Vec::new() });
        state.definition = Some(part.definitions.len() - 1);
    }
}

// `phrase+meaning`, split at the first `+`
fn parse_example(rest: &str) -> Option<Example> {
    let (phrase, meaning) = rest.split_once('+')?;
    let (phrase, meaning) = (phrase.trim(), meaning.trim());
    if phrase.is_empty() || meaning.is_empty() {
        return None;
    }

    Some(Example {
        phrase: phrase.to_string(),
        meaning: meaning.to_string(),
    })
}
