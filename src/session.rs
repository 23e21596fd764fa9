//! A session owns the cleaned working table for the lifetime of an
//! interactive run.
//!
//! There is no module-level state: the caller creates a [`Session`] once at
//! startup and passes it (or its filtered views) into every query. A session
//! can only be constructed from loaded data, so "query before the working
//! table exists" is unrepresentable rather than a runtime error. Filtered
//! views and aggregates are recomputed on demand and never cached.

use std::collections::HashSet;
use std::path::Path;

use crate::aggregate;
use crate::clean::clean;
use crate::filter;
use crate::loader::{self, LoadError};
use crate::model::{FieldCoverage, FilterCriteria, PaperSet, RawRecord, SummaryMetrics};
use crate::text::{self, TextColumn};

/// Tunables recognized by the core; every knob has the interactive default.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub top_n_journals: usize,
    pub top_n_sources: usize,
    pub top_n_words: usize,
    /// Inclusive bounds on years admitted into the year aggregation.
    pub year_bounds: (i32, i32),
    pub stop_words: HashSet<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            top_n_journals: 10,
            top_n_sources: 10,
            top_n_words: 15,
            year_bounds: (2019, 2023),
            stop_words: text::default_stop_words(),
        }
    }
}

/// One interactive session: the working table plus its options.
#[derive(Debug, Clone)]
pub struct Session {
    options: AnalysisOptions,
    working: PaperSet,
}

impl Session {
    /// Load and clean the export at `path`. The only fallible step is the
    /// load itself; cleaning is total.
    pub fn open(path: &Path, options: AnalysisOptions) -> Result<Self, LoadError> {
        let raw = loader::load_csv(path)?;
        Ok(Session::from_records(raw, options))
    }

    /// Build a session from already-loaded raw records.
    pub fn from_records(raw: Vec<RawRecord>, options: AnalysisOptions) -> Self {
        Session {
            options,
            working: clean(raw),
        }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// The full working table.
    pub fn working(&self) -> &PaperSet {
        &self.working
    }

    /// A filtered view of the working table; safe to call once per
    /// interaction.
    pub fn filtered(&self, criteria: &FilterCriteria) -> PaperSet {
        filter::apply(&self.working, criteria)
    }

    pub fn counts_by_year(&self, set: &PaperSet) -> Vec<(i32, usize)> {
        aggregate::counts_by_year(set, self.options.year_bounds)
    }

    pub fn counts_by_month(&self, set: &PaperSet) -> Vec<(String, usize)> {
        aggregate::counts_by_month(set)
    }

    pub fn top_journals(&self, set: &PaperSet) -> Vec<(String, usize)> {
        aggregate::top_journals(set, self.options.top_n_journals)
    }

    pub fn top_sources(&self, set: &PaperSet) -> Vec<(String, usize)> {
        aggregate::top_sources(set, self.options.top_n_sources)
    }

    pub fn summary_metrics(&self, set: &PaperSet) -> SummaryMetrics {
        aggregate::summary_metrics(set)
    }

    pub fn field_coverage(&self, set: &PaperSet) -> FieldCoverage {
        aggregate::field_coverage(set)
    }

    pub fn word_frequencies(&self, set: &PaperSet, column: TextColumn) -> Vec<(String, usize)> {
        text::word_frequencies(set, column, &self.options.stop_words, self.options.top_n_words)
    }
}
