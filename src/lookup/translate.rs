//! Glossary translation of contest records.

use super::{require, LookupError};
use crate::value::{Row, Value};

const CONTEST: &str = "contest";
const GLOSSARY: &str = "glossary";

/// Contest fields translated by matching `english_key` within the contest's
/// `group_type`.
pub const TRANSLATED_FIELDS: [&str; 6] = [
    "Ballot Title 1",
    "Ballot Title 2",
    "Ballot Title 3",
    "Banner",
    "Heading",
    "Concatenated Office Title",
];

/// Glossary field types resolved from the contest's `vote_for_num`.
pub const VOTE_FOR_FIELDS: [&str; 2] = ["Vote For", "sp_Vote For"];

/// Prefix of the field receiving a translation.
pub const TRANSLATION_PREFIX: &str = "sp_";

/// Returns a copy of `contest` with its Spanish translations filled in from
/// `glossary`.
///
/// Each non-empty field of [`TRANSLATED_FIELDS`] gets `sp_<field>` from the
/// first glossary entry with the same `english_key` and `group_type`. When
/// `vote_for_num` is set, each [`VOTE_FOR_FIELDS`] type is looked up by
/// `field_type` and `vote_for_num`; the entry's `english_key` lands in the
/// field itself and its `spanish_value` in the `sp_` prefixed field.
pub fn translate_contest(contest: &Row, glossary: &[Row]) -> Result<Row, LookupError> {
    let mut translated = contest.clone();

    for field in TRANSLATED_FIELDS {
        let text = require(contest, CONTEST, 0, field)?;
        if !text.is_truthy() {
            continue;
        }
        if let Some((index, entry)) = find_title_entry(contest, glossary, text)? {
            let spanish = require(entry, GLOSSARY, index, "spanish_value")?;
            translated.set(format!("{}{}", TRANSLATION_PREFIX, field), spanish.clone());
        }
    }

    let vote_for = require(contest, CONTEST, 0, "vote_for_num")?;
    if vote_for.is_truthy() {
        let count = vote_for
            .to_integer()
            .ok_or_else(|| LookupError::not_an_integer(CONTEST, 0, "vote_for_num", vote_for.to_string()))?;

        for field_type in VOTE_FOR_FIELDS {
            if let Some((index, entry)) = find_vote_for_entry(glossary, field_type, count)? {
                let english = require(entry, GLOSSARY, index, "english_key")?;
                let spanish = require(entry, GLOSSARY, index, "spanish_value")?;
                translated.set(field_type, english.clone());
                translated.set(format!("{}{}", TRANSLATION_PREFIX, field_type), spanish.clone());
            }
        }
    }

    Ok(translated)
}

fn find_title_entry<'a>(
    contest: &Row,
    glossary: &'a [Row],
    text: &Value,
) -> Result<Option<(usize, &'a Row)>, LookupError> {
    for (index, entry) in glossary.iter().enumerate() {
        if require(entry, GLOSSARY, index, "english_key")? != text {
            continue;
        }
        let group_type = require(contest, CONTEST, 0, "group_type")?;
        if require(entry, GLOSSARY, index, "group_type")? == group_type {
            return Ok(Some((index, entry)));
        }
    }
    Ok(None)
}

fn find_vote_for_entry<'a>(
    glossary: &'a [Row],
    field_type: &str,
    count: i64,
) -> Result<Option<(usize, &'a Row)>, LookupError> {
    let count = Value::Int(count);
    for (index, entry) in glossary.iter().enumerate() {
        if require(entry, GLOSSARY, index, "field_type")?.as_str() != Some(field_type) {
            continue;
        }
        if require(entry, GLOSSARY, index, "vote_for_num")? == &count {
            return Ok(Some((index, entry)));
        }
    }
    Ok(None)
}
