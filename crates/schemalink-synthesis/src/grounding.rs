//! Grounding verification: every number, quoted literal and proper name in an
//! answer must come from the rows (or the question, the column names, or the
//! row count).

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static RE_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"-?\d[\d,]*(?:\.\d+)?").ok());

static RE_QUOTED: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#""([^"\n]{1,200})"|“([^”\n]{1,200})”"#).ok());

/// Runs of capitalised words on one line, e.g. `Alan Turing` or `Saint-Denis`.
static RE_NAME: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\b\p{Lu}[\p{L}\p{N}'’&-]*(?:[ \t]+\p{Lu}[\p{L}\p{N}'’&-]*)*").ok()
});

/// Most decimal places compared when matching a rounded number.
const MAX_DECIMALS: usize = 6;

/// Characters after which a capitalised word starts a sentence or item.
const SENTENCE_BREAKS: &[char] = &['.', '!', '?', ':', ';', '-', '*', '•'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    Quoted,
    /// A capitalised name or place.
    Name,
}

/// A literal in the answer with no source in the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UngroundedLiteral {
    pub kind: LiteralKind,
    pub text: String,
}

/// Result of checking one answer.
#[derive(Debug, Clone, Default)]
pub struct GroundingReport {
    /// Literals inspected.
    pub checked: usize,
    pub ungrounded: Vec<UngroundedLiteral>,
}

impl GroundingReport {
    pub fn is_grounded(&self) -> bool {
        self.ungrounded.is_empty()
    }

    /// 1.0 when every literal is grounded or there were none.
    pub fn score(&self) -> f64 {
        if self.checked == 0 {
            return 1.0;
        }
        (self.checked - self.ungrounded.len()) as f64 / self.checked as f64
    }
}

/// Values an answer may cite.
pub struct GroundingVerifier {
    numbers: Vec<f64>,
    texts: Vec<String>,
}

impl GroundingVerifier {
    pub fn new(question: &str, columns: &[String], rows: &[Vec<Value>], row_count: usize) -> Self {
        let mut numbers = vec![row_count as f64];
        let mut texts = vec![question.to_lowercase()];
        numbers.extend(numbers_in(question));

        for column in columns {
            numbers.extend(numbers_in(column));
            texts.push(column.to_lowercase());
        }
        for cell in rows.iter().flatten() {
            match cell {
                Value::Number(n) => {
                    if let Some(v) = n.as_f64() {
                        numbers.push(v);
                    }
                    texts.push(n.to_string());
                }
                Value::String(s) => {
                    numbers.extend(numbers_in(s));
                    texts.push(s.to_lowercase());
                }
                Value::Bool(b) => texts.push(b.to_string()),
                _ => {}
            }
        }
        Self { numbers, texts }
    }

    pub fn verify(&self, answer: &str) -> GroundingReport {
        let mut report = GroundingReport::default();

        if let Some(re) = RE_QUOTED.as_ref() {
            for caps in re.captures_iter(answer) {
                let Some(inner) = caps.get(1).or_else(|| caps.get(2)) else {
                    continue;
                };
                let literal = inner.as_str().trim();
                if literal.is_empty() {
                    continue;
                }
                report.checked += 1;
                let needle = literal.to_lowercase();
                if !self.texts.iter().any(|t| t.contains(&needle)) {
                    report.ungrounded.push(UngroundedLiteral {
                        kind: LiteralKind::Quoted,
                        text: literal.to_string(),
                    });
                }
            }
        }

        for (text, value, decimals) in number_tokens(answer) {
            report.checked += 1;
            if !self.numbers.iter().any(|&v| matches_rounded(value, v, decimals)) {
                report.ungrounded.push(UngroundedLiteral {
                    kind: LiteralKind::Number,
                    text: text.trim_end_matches(',').to_string(),
                });
            }
        }

        if let Some(re) = RE_NAME.as_ref() {
            for m in re.find_iter(answer) {
                let Some(candidates) = name_candidates(answer, m.start(), m.as_str()) else {
                    continue;
                };
                report.checked += 1;
                let grounded = candidates.iter().any(|name| {
                    let needle = name.to_lowercase();
                    self.texts.iter().any(|t| contains_phrase(t, &needle))
                });
                if !grounded {
                    report.ungrounded.push(UngroundedLiteral {
                        kind: LiteralKind::Name,
                        text: m.as_str().to_string(),
                    });
                }
            }
        }
        report
    }
}

fn numbers_in(text: &str) -> Vec<f64> {
    number_tokens(text).into_iter().map(|(_, v, _)| v).collect()
}

/// Numbers with their written precision. A `-` directly after a letter or
/// digit is a separator (`2024-01-10`, `10-20`), not a sign.
fn number_tokens(text: &str) -> Vec<(&str, f64, usize)> {
    let Some(re) = RE_NUMBER.as_ref() else {
        return Vec::new();
    };
    re.find_iter(text)
        .filter_map(|m| {
            let mut raw = m.as_str();
            let joined = text[..m.start()]
                .chars()
                .next_back()
                .is_some_and(char::is_alphanumeric);
            if joined {
                raw = raw.trim_start_matches('-');
            }
            parse_number(raw).map(|(v, decimals)| (raw, v, decimals))
        })
        .collect()
}

/// Spellings under which a capitalised run may be grounded, or `None` when
/// the run is not checked.
///
/// A sentence-initial word is capitalised by grammar alone: a single such
/// word is skipped, and a longer run may also match without it. Possessive
/// `'s` is dropped.
fn name_candidates(answer: &str, start: usize, run: &str) -> Option<Vec<String>> {
    let run = run
        .trim_end_matches(['-', '\'', '’'])
        .trim_end_matches("'s")
        .trim_end_matches("’s");
    let words: Vec<&str> = run.split_whitespace().collect();
    if words.len() == 1 && words[0].chars().count() < 2 {
        return None;
    }

    let before = &answer[..start];
    let sentence_start = match before.trim_end().chars().next_back() {
        None => true,
        Some(c) => {
            SENTENCE_BREAKS.contains(&c) || before.trim_end_matches([' ', '\t']).ends_with('\n')
        }
    };
    if !sentence_start {
        return Some(vec![words.join(" ")]);
    }
    match words.split_first() {
        Some((_, rest)) if !rest.is_empty() => Some(vec![words.join(" "), rest.join(" ")]),
        _ => None,
    }
}

/// `needle` occurs in `haystack` bounded by non-alphanumeric characters.
fn contains_phrase(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(idx, _)| {
        let left = haystack[..idx].chars().next_back();
        let right = haystack[idx + needle.len()..].chars().next();
        !left.is_some_and(char::is_alphanumeric) && !right.is_some_and(char::is_alphanumeric)
    })
}

/// Value and count of decimal places. Thousands separators are dropped.
fn parse_number(raw: &str) -> Option<(f64, usize)> {
    let cleaned: String = raw.trim_end_matches(',').chars().filter(|c| *c != ',').collect();
    let decimals = cleaned.split_once('.').map_or(0, |(_, frac)| frac.len());
    cleaned.parse::<f64>().ok().map(|v| (v, decimals.min(MAX_DECIMALS)))
}

/// `cited` equals `source` rounded to the precision `cited` was written in.
/// Signs must agree.
fn matches_rounded(cited: f64, source: f64, decimals: usize) -> bool {
    let scale = 10f64.powi(decimals as i32);
    (cited * scale).round() == (source * scale).round()
}
