//! Apply user-chosen criteria to the working table.
//!
//! Filtering is pure and order preserving: it never mutates its input and is
//! safe to re-run on every interaction. Running the same criteria twice
//! yields the same table (idempotence), which keeps the interactive path
//! from accumulating state.

use crate::model::{FilterCriteria, Paper, PaperSet};

/// Return the papers of `set` matching `criteria`, in their original order.
pub fn apply(set: &PaperSet, criteria: &FilterCriteria) -> PaperSet {
    PaperSet::new(
        set.iter()
            .filter(|paper| matches(paper, criteria))
            .cloned()
            .collect(),
    )
}

/// A paper matches iff every dimension accepts it.
///
/// The year range is always active, so papers without a parseable date never
/// match. The journal and source dimensions are inactive while their
/// accepted set is empty; a paper without a source fails the source
/// dimension only once that filter is active.
fn matches(paper: &Paper, criteria: &FilterCriteria) -> bool {
    let year_ok = paper
        .publication_year
        .is_some_and(|y| y >= criteria.year_min && y <= criteria.year_max);
    let journal_ok = criteria.journals.is_empty() || criteria.journals.contains(&paper.journal);
    let source_ok = criteria.sources.is_empty()
        || paper
            .source
            .as_deref()
            .is_some_and(|s| criteria.sources.contains(s));
    year_ok && journal_ok && source_ok
}
