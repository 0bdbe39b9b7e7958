//! CSV codec for the admin export/import flow.
//!
//! The format is RFC4180-like but row-oriented: a `Key,<lang...>` header,
//! one row per translation key, fields double-quote wrapped with `""`
//! escaping. Raw newlines inside values are out of scope for this format
//! (documented limitation of the row-per-line layout).
//!
//! Parsing uses an explicit state-machine tokenizer rather than splitting or
//! regexes, so embedded commas and quotes are handled exactly.

use std::collections::{
    BTreeMap,
    BTreeSet,
};

use thiserror::Error;

use crate::flatten::FlatMap;

/// Hard failures while parsing a CSV document.
///
/// Per-row shape problems (short rows, extra fields) are handled softly and
/// never reach this type; these variants mean the document as a whole is
/// unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsvError {
    /// The document has no header row at all.
    #[error("CSV document is empty (missing header row)")]
    MissingHeader,
    /// A quoted field was opened but never closed.
    #[error("unterminated quoted field on line {line}")]
    UnterminatedQuote {
        /// 1-based line number of the offending row.
        line: usize,
    },
}

/// Serialize per-language flat maps into CSV text.
///
/// Header is `Key,<lang...>` with language codes in sorted order. Rows are
/// the sorted union of keys across all languages; a language that lacks a
/// key renders as an empty quoted string `""`.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use i18n_kit::csv::export_csv;
/// use i18n_kit::flatten::FlatMap;
///
/// let mut maps = BTreeMap::new();
/// maps.insert("de".to_string(), FlatMap::from([("a.b".to_string(), "Hallo".to_string())]));
/// maps.insert("en".to_string(), FlatMap::from([("a.b".to_string(), "Hi".to_string())]));
///
/// assert_eq!(export_csv(&maps), "Key,de,en\n\"a.b\",\"Hallo\",\"Hi\"\n");
/// ```
#[must_use]
pub fn export_csv(maps: &BTreeMap<String, FlatMap>) -> String {
    let mut out = String::from("Key");
    for language in maps.keys() {
        out.push(',');
        out.push_str(language);
    }
    out.push('\n');

    let keys: BTreeSet<&str> =
        maps.values().flat_map(|map| map.keys().map(String::as_str)).collect();

    for key in keys {
        push_quoted(&mut out, key);
        for map in maps.values() {
            out.push(',');
            push_quoted(&mut out, map.get(key).map_or("", String::as_str));
        }
        out.push('\n');
    }

    out
}

fn push_quoted(out: &mut String, field: &str) {
    out.push('"');
    for ch in field.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
}

/// Parse CSV text back into per-language flat maps.
///
/// The first header column (the key column label) is discarded; remaining
/// header columns are language codes in column order. Rows shorter than the
/// header pad with empty fields, and an empty cell means "this language has
/// no value for the key", mirroring how [`export_csv`] renders absent
/// values. Blank lines are skipped.
pub fn import_csv(text: &str) -> Result<BTreeMap<String, FlatMap>, CsvError> {
    let mut lines = text.lines().enumerate();

    let Some((_, header_line)) = lines.next() else {
        return Err(CsvError::MissingHeader);
    };
    let mut header = parse_record(header_line, 1)?.into_iter();
    let _key_column = header.next();
    let languages: Vec<String> = header.collect();

    let mut maps: BTreeMap<String, FlatMap> =
        languages.iter().map(|language| (language.clone(), FlatMap::new())).collect();

    for (index, line) in lines {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = parse_record(line, line_number)?.into_iter();
        let Some(key) = fields.next() else {
            continue;
        };
        if key.is_empty() {
            tracing::warn!(line = line_number, "skipping CSV row with an empty key");
            continue;
        }

        for language in &languages {
            let value = fields.next().unwrap_or_default();
            if value.is_empty() {
                continue;
            }
            if let Some(map) = maps.get_mut(language) {
                map.insert(key.clone(), value);
            }
        }
        if fields.next().is_some() {
            tracing::warn!(line = line_number, "ignoring extra fields beyond declared languages");
        }
    }

    Ok(maps)
}

/// Tokenizer states for a single CSV record.
enum FieldState {
    /// At the beginning of a field, nothing consumed yet.
    Start,
    /// Inside an unquoted field.
    Unquoted,
    /// Inside a `"`-delimited field.
    Quoted,
    /// Just saw a `"` inside a quoted field: either an escape or the close.
    QuoteInQuoted,
}

/// Split one line into unescaped fields.
fn parse_record(line: &str, line_number: usize) -> Result<Vec<String>, CsvError> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut state = FieldState::Start;

    for ch in line.chars() {
        state = match state {
            FieldState::Start => match ch {
                '"' => FieldState::Quoted,
                ',' => {
                    fields.push(std::mem::take(&mut field));
                    FieldState::Start
                }
                _ => {
                    field.push(ch);
                    FieldState::Unquoted
                }
            },
            FieldState::Unquoted => match ch {
                ',' => {
                    fields.push(std::mem::take(&mut field));
                    FieldState::Start
                }
                _ => {
                    field.push(ch);
                    FieldState::Unquoted
                }
            },
            FieldState::Quoted => match ch {
                '"' => FieldState::QuoteInQuoted,
                _ => {
                    field.push(ch);
                    FieldState::Quoted
                }
            },
            FieldState::QuoteInQuoted => match ch {
                '"' => {
                    // Doubled quote: literal `"` inside the field.
                    field.push('"');
                    FieldState::Quoted
                }
                ',' => {
                    fields.push(std::mem::take(&mut field));
                    FieldState::Start
                }
                _ => {
                    // Stray text after a closing quote; keep it rather than
                    // dropping data from a hand-edited file.
                    field.push(ch);
                    FieldState::Unquoted
                }
            },
        };
    }

    if matches!(state, FieldState::Quoted) {
        return Err(CsvError::UnterminatedQuote { line: line_number });
    }

    fields.push(field);
    Ok(fields)
}
