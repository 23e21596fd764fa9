//! Core data types: raw records as loaded, cleaned papers, the working
//! table, and filter criteria.
//!
//! Every field that can be missing in the source export is an `Option` on
//! [`RawRecord`]; cleaning resolves each absence into a typed state (dropped
//! row, empty string, sentinel journal, or `None` date) so downstream code
//! never has to ask "does this column exist".

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

/// Sentinel journal name substituted for papers without a journal so that
/// journal aggregation stays total.
pub const UNKNOWN_JOURNAL: &str = "Unknown";

/// One row of the metadata export, exactly as read. Empty cells and missing
/// columns both surface as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub journal: Option<String>,
    pub source: Option<String>,
    pub publish_time: Option<String>,
}

/// One cleaned paper in the working table.
///
/// Invariants upheld by [`crate::clean::clean`]:
/// * `title` is non-empty,
/// * `abstract_text` is never absent (empty string if the export had none),
/// * `journal` is the normalized name, never absent ([`UNKNOWN_JOURNAL`] if
///   the export had none),
/// * `abstract_word_count` equals the whitespace-token count of
///   `abstract_text`,
/// * `publication_year` is `Some` exactly when `publish_date` is.
#[derive(Debug, Clone, PartialEq)]
pub struct Paper {
    pub title: String,
    pub abstract_text: String,
    /// Journal name as it appeared in the export, if any.
    pub journal_raw: Option<String>,
    /// Normalized journal name: trimmed, title-cased, sentinel for absence.
    pub journal: String,
    pub source: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub publication_year: Option<i32>,
    pub abstract_word_count: usize,
}

/// The working table: cleaned papers in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaperSet {
    pub papers: Vec<Paper>,
}

impl PaperSet {
    pub fn new(papers: Vec<Paper>) -> Self {
        PaperSet { papers }
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Paper> {
        self.papers.iter()
    }
}

/// User-chosen filter criteria, applied by [`crate::filter::apply`].
///
/// The year range is always active: papers without a parseable publication
/// date never pass. An empty `journals` or `sources` set means "no filter on
/// that dimension" — matching the interactive behavior where an empty
/// multi-select only ever arises from an unpopulated option list.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub year_min: i32,
    pub year_max: i32,
    /// Accepted normalized journal names; empty = accept all.
    pub journals: BTreeSet<String>,
    /// Accepted raw source labels; empty = accept all.
    pub sources: BTreeSet<String>,
}

impl FilterCriteria {
    /// Criteria that only constrain the publication year.
    pub fn year_range(year_min: i32, year_max: i32) -> Self {
        FilterCriteria {
            year_min,
            year_max,
            journals: BTreeSet::new(),
            sources: BTreeSet::new(),
        }
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria::year_range(2019, 2023)
    }
}

/// Descriptive metrics over a (working or filtered) table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub total_papers: usize,
    pub distinct_journals: usize,
    /// Mean of `abstract_word_count`; 0.0 for an empty table.
    pub mean_abstract_words: f64,
    /// Papers whose abstract has at least one word.
    pub with_abstract: usize,
}

/// Non-null counts per recognized field, for data-quality reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldCoverage {
    pub total_papers: usize,
    pub with_journal: usize,
    pub with_source: usize,
    pub with_date: usize,
    pub with_abstract: usize,
}
