//! Named summaries over a (working or filtered) table.
//!
//! Every query here is pure and total: an empty table, or a table where the
//! relevant field is absent everywhere, yields an empty or zero result — not
//! an error. Top-N rankings order by count descending with ties broken by
//! first occurrence in the table's natural order, so displayed rankings are
//! reproducible.

use std::collections::{BTreeMap, HashMap};

use crate::model::{FieldCoverage, PaperSet, SummaryMetrics};

/// Count occurrences and return the top `n` by count descending, ties broken
/// by first-seen order. Shared by the categorical rankings here and the
/// word-frequency tables in [`crate::text`].
pub fn rank_by_count<I, S>(items: I, n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // Value is (first-seen position, count); the position makes the
    // tie-break stable without a second pass over the input.
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, item) in items.into_iter().enumerate() {
        counts
            .entry(item.as_ref().to_string())
            .or_insert((position, 0))
            .1 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.1.cmp(&a.1.1).then(a.1.0.cmp(&b.1.0)));
    ranked.truncate(n);
    ranked
        .into_iter()
        .map(|(item, (_, count))| (item, count))
        .collect()
}

/// Papers per publication year, ascending, restricted to the inclusive
/// `year_bounds`. Papers without a year are excluded.
pub fn counts_by_year(set: &PaperSet, year_bounds: (i32, i32)) -> Vec<(i32, usize)> {
    let (min, max) = year_bounds;
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in set.iter().filter_map(|p| p.publication_year) {
        if year >= min && year <= max {
            *counts.entry(year).or_insert(0) += 1;
        }
    }
    counts.into_iter().collect()
}

/// Papers per calendar month (`YYYY-MM`), chronological. Papers without a
/// parseable date are excluded.
pub fn counts_by_month(set: &PaperSet) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for date in set.iter().filter_map(|p| p.publish_date) {
        *counts.entry(date.format("%Y-%m").to_string()).or_insert(0) += 1;
    }
    // Zero-padded keys sort lexicographically in chronological order.
    counts.into_iter().collect()
}

/// Top `n` normalized journal names by paper count.
pub fn top_journals(set: &PaperSet, n: usize) -> Vec<(String, usize)> {
    rank_by_count(set.iter().map(|p| p.journal.as_str()), n)
}

/// Top `n` source labels by paper count; papers without a source are
/// excluded.
pub fn top_sources(set: &PaperSet, n: usize) -> Vec<(String, usize)> {
    rank_by_count(set.iter().filter_map(|p| p.source.as_deref()), n)
}

/// Descriptive metrics; total on every table, including the empty one.
pub fn summary_metrics(set: &PaperSet) -> SummaryMetrics {
    let total_papers = set.len();
    let distinct_journals = set
        .iter()
        .map(|p| p.journal.as_str())
        .collect::<std::collections::HashSet<_>>()
        .len();
    let with_abstract = set.iter().filter(|p| p.abstract_word_count > 0).count();
    let mean_abstract_words = if total_papers == 0 {
        0.0
    } else {
        let word_sum: usize = set.iter().map(|p| p.abstract_word_count).sum();
        word_sum as f64 / total_papers as f64
    };
    SummaryMetrics {
        total_papers,
        distinct_journals,
        mean_abstract_words,
        with_abstract,
    }
}

/// How many papers actually carry each recognized field.
pub fn field_coverage(set: &PaperSet) -> FieldCoverage {
    FieldCoverage {
        total_papers: set.len(),
        with_journal: set.iter().filter(|p| p.journal_raw.is_some()).count(),
        with_source: set.iter().filter(|p| p.source.is_some()).count(),
        with_date: set.iter().filter(|p| p.publish_date.is_some()).count(),
        with_abstract: set.iter().filter(|p| p.abstract_word_count > 0).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::clean;
    use crate::model::{RawRecord, UNKNOWN_JOURNAL};

    fn record(
        title: &str,
        publish_time: Option<&str>,
        journal: Option<&str>,
        source: Option<&str>,
        abstract_text: Option<&str>,
    ) -> RawRecord {
        RawRecord {
            title: Some(title.into()),
            abstract_text: abstract_text.map(String::from),
            journal: journal.map(String::from),
            source: source.map(String::from),
            publish_time: publish_time.map(String::from),
        }
    }

    fn sample() -> PaperSet {
        clean(vec![
            record("a", Some("2020-01-10"), Some("Nature"), Some("PMC"), Some("one two")),
            record("b", Some("2020-03-05"), Some("The Lancet"), Some("WHO"), None),
            record("c", Some("2021-03-20"), Some("nature"), Some("PMC"), Some("three words here")),
            record("d", Some("not a date"), None, None, Some("x")),
            record("e", Some("2031-01-01"), Some("Future Journal"), Some("PMC"), None),
        ])
    }

    #[test]
    fn counts_by_year_respects_bounds_and_sorts_ascending() {
        let set = sample();
        let counts = counts_by_year(&set, (2019, 2023));
        // 2031 is outside the bounds, "not a date" has no year at all.
        assert_eq!(counts, vec![(2020, 2), (2021, 1)]);
        let with_year = set.iter().filter(|p| p.publication_year.is_some()).count();
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        assert!(total <= with_year);
    }

    #[test]
    fn counts_by_month_is_chronological() {
        let set = sample();
        let counts = counts_by_month(&set);
        assert_eq!(
            counts,
            vec![
                ("2020-01".to_string(), 1),
                ("2020-03".to_string(), 1),
                ("2021-03".to_string(), 1),
                ("2031-01".to_string(), 1),
            ]
        );
    }

    #[test]
    fn top_journals_counts_normalized_names() {
        let set = sample();
        let top = top_journals(&set, 10);
        // "Nature" and "nature" collapse to one normalized key.
        assert_eq!(top[0], ("Nature".to_string(), 2));
        assert!(top.iter().any(|(j, c)| j == UNKNOWN_JOURNAL && *c == 1));
    }

    #[test]
    fn top_n_never_exceeds_n_and_ties_break_by_first_seen() {
        let top = rank_by_count(["b", "a", "a", "c", "b"], 2);
        // a and b both count 2; b was seen first.
        assert_eq!(top, vec![("b".to_string(), 2), ("a".to_string(), 2)]);
    }

    #[test]
    fn top_sources_excludes_absent_sources() {
        let set = sample();
        let top = top_sources(&set, 10);
        assert_eq!(top[0], ("PMC".to_string(), 3));
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn summary_metrics_guard_empty_table() {
        let metrics = summary_metrics(&PaperSet::default());
        assert_eq!(metrics.total_papers, 0);
        assert_eq!(metrics.distinct_journals, 0);
        assert_eq!(metrics.mean_abstract_words, 0.0);
        assert_eq!(metrics.with_abstract, 0);
    }

    #[test]
    fn summary_metrics_counts_and_mean() {
        let set = sample();
        let metrics = summary_metrics(&set);
        assert_eq!(metrics.total_papers, 5);
        // Nature, The Lancet, Unknown, Future Journal
        assert_eq!(metrics.distinct_journals, 4);
        assert_eq!(metrics.with_abstract, 3);
        // word counts: 2 + 0 + 3 + 1 + 0 = 6 over 5 papers
        assert!((metrics.mean_abstract_words - 1.2).abs() < 1e-9);
    }

    #[test]
    fn field_coverage_counts_non_null_fields() {
        let set = sample();
        let coverage = field_coverage(&set);
        assert_eq!(coverage.total_papers, 5);
        assert_eq!(coverage.with_journal, 4);
        assert_eq!(coverage.with_source, 4);
        assert_eq!(coverage.with_date, 4);
        assert_eq!(coverage.with_abstract, 3);
    }
}
