//! Office title assembly from ballot title templates.

use super::{require, LookupError};
use crate::value::{Row, Value};
use serde::Serialize;

const FORMULAS: &str = "office_title_formulas";
const CONTEST_SNAPSHOT: &str = "contest_snapshot";

/// Template placeholders and the contest fields substituted for them, in
/// substitution order.
const PLACEHOLDERS: [(&str, &str); 3] = [("<bt1>", "bt1"), ("<bt2>", "bt2"), ("<bt3>", "bt3")];

/// OfficeTitle is a contest entry whose office has a title formula.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfficeTitle {
    pub contest_snapshot_guid: Value,
    pub concat_office_title: String,
    pub concat_formula: String,
    pub office_id: Value,
}

/// UnmatchedEntry is a contest entry whose office has no title formula.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmatchedEntry {
    pub unmatched_contest_snapshot_guid: Value,
    pub unmatched_office_id: Value,
}

/// OfficeTitles partitions a contest snapshot by formula availability.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OfficeTitles {
    pub office_titles: Vec<OfficeTitle>,
    pub unmatched_entries: Vec<UnmatchedEntry>,
}

/// Builds the office title of every contest entry from the first formula
/// sharing its `office_id`.
///
/// `<bt1>`, `<bt2>` and `<bt3>` are replaced, in that order, with the entry's
/// `bt1`, `bt2` and `bt3` values; null values become empty text.
pub fn process_office_titles(
    formulas: &[Row],
    contest_snapshot: &[Row],
) -> Result<OfficeTitles, LookupError> {
    let mut titles = OfficeTitles::default();

    for (index, entry) in contest_snapshot.iter().enumerate() {
        let office_id = require(entry, CONTEST_SNAPSHOT, index, "office_id")?;

        let Some((formula_index, formula_row)) = find_formula(formulas, office_id)? else {
            titles.unmatched_entries.push(UnmatchedEntry {
                unmatched_contest_snapshot_guid: require(
                    entry,
                    CONTEST_SNAPSHOT,
                    index,
                    "contest_snapshot_guid",
                )?
                .clone(),
                unmatched_office_id: office_id.clone(),
            });
            continue;
        };

        let mut substitutions = Vec::with_capacity(PLACEHOLDERS.len());
        for (placeholder, field) in PLACEHOLDERS {
            let value = require(entry, CONTEST_SNAPSHOT, index, field)?;
            substitutions.push((placeholder, value.to_string()));
        }

        let formula = require(formula_row, FORMULAS, formula_index, "formula")?
            .as_str()
            .ok_or_else(|| LookupError::invalid_field(FORMULAS, formula_index, "formula", "a string"))?;

        let concat_office_title = substitutions
            .iter()
            .fold(formula.to_string(), |title, (placeholder, text)| {
                title.replace(placeholder, text)
            });

        titles.office_titles.push(OfficeTitle {
            contest_snapshot_guid: require(entry, CONTEST_SNAPSHOT, index, "contest_snapshot_guid")?
                .clone(),
            concat_office_title,
            concat_formula: formula.to_string(),
            office_id: office_id.clone(),
        });
    }

    Ok(titles)
}

fn find_formula<'a>(
    formulas: &'a [Row],
    office_id: &Value,
) -> Result<Option<(usize, &'a Row)>, LookupError> {
    for (index, formula) in formulas.iter().enumerate() {
        if require(formula, FORMULAS, index, "office_id")? == office_id {
            return Ok(Some((index, formula)));
        }
    }
    Ok(None)
}
