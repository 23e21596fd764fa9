//! Turn raw records into the working table.
//!
//! Cleaning is a pure function of the raw rows: it applies the missing-value
//! policy (drop, substitute, or mark absent) and computes the derived fields
//! every aggregate relies on. Nothing here fails — a row that cannot be
//! improved is kept with its absences made explicit.

use chrono::{Datelike, NaiveDate};
use log::{debug, info};

use crate::model::{Paper, PaperSet, RawRecord, UNKNOWN_JOURNAL};

/// Clean `raw` into the working table.
///
/// * Rows without a title are dropped.
/// * A missing abstract becomes the empty string (the row is kept).
/// * `publish_time` is parsed leniently; unparseable values leave
///   `publish_date` and `publication_year` absent rather than failing.
/// * `abstract_word_count` is the whitespace-token count of the abstract.
/// * The journal name is normalized (trim + title-case) with the
///   [`UNKNOWN_JOURNAL`] sentinel substituted for absence.
pub fn clean(raw: Vec<RawRecord>) -> PaperSet {
    let total = raw.len();
    let mut unparseable_dates = 0usize;

    let papers: Vec<Paper> = raw
        .into_iter()
        .filter_map(|record| {
            let title = record.title?;
            let abstract_text = record.abstract_text.unwrap_or_default();
            let publish_date = match record.publish_time.as_deref() {
                Some(raw_date) => {
                    let parsed = parse_publish_time(raw_date);
                    if parsed.is_none() {
                        unparseable_dates += 1;
                    }
                    parsed
                }
                None => None,
            };
            Some(Paper {
                abstract_word_count: abstract_text.split_whitespace().count(),
                journal: normalize_journal(record.journal.as_deref()),
                journal_raw: record.journal,
                source: record.source,
                publication_year: publish_date.map(|d| d.year()),
                publish_date,
                title,
                abstract_text,
            })
        })
        .collect();

    info!(
        "cleaned {} rows into {} papers ({} dropped for missing title)",
        total,
        papers.len(),
        total - papers.len()
    );
    if unparseable_dates > 0 {
        debug!("{unparseable_dates} publish dates could not be parsed");
    }

    PaperSet::new(papers)
}

/// Lenient parse of the export's `publish_time` field.
///
/// Accepts full dates (`2020-03-15`, `2020/03/15`, `2020 Mar 15`), a
/// year-month (`2020-03`, mapped to the first of the month), and a bare year
/// (mapped to January 1st). Anything else is absent.
pub fn parse_publish_time(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%Y %b %d", "%B %d, %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    if let Some((year, month)) = value.split_once('-') {
        if let (Ok(y), Ok(m)) = (year.parse::<i32>(), month.parse::<u32>()) {
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, 1) {
                return Some(date);
            }
        }
    }
    if let Ok(year) = value.parse::<i32>() {
        if (1000..=9999).contains(&year) {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
    }
    None
}

/// Normalize a journal name: trim, title-case, sentinel for absence.
///
/// This is a display normalization, not deduplication — names differing only
/// in case or surrounding whitespace collapse to one key, everything else
/// stays distinct.
pub fn normalize_journal(journal: Option<&str>) -> String {
    match journal.map(str::trim) {
        None | Some("") => UNKNOWN_JOURNAL.to_string(),
        Some(name) => title_case(name),
    }
}

/// Uppercase every letter that follows a non-letter, lowercase the rest.
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alphabetic = false;
    for c in name.chars() {
        if prev_alphabetic {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alphabetic = c.is_alphabetic();
    }
    out
}
