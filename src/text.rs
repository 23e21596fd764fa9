//! Tokenization and word-frequency statistics over free-text columns.
//!
//! Tokens are maximal runs of ASCII letters, at least three characters long,
//! case-folded to lowercase. Digits, punctuation, and shorter runs are
//! discarded entirely — never merged into neighbouring tokens. A fixed stop
//! list of English function words is removed before counting; callers can
//! extend it from a file, one word per line.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use log::debug;

use crate::aggregate::rank_by_count;
use crate::model::PaperSet;

/// Which free-text column of the table to analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColumn {
    Title,
    Abstract,
}

/// The default stop list: common English function words, fixed by
/// configuration rather than derived from the corpus.
pub const DEFAULT_STOP_WORDS: [&str; 36] = [
    "the", "and", "of", "in", "to", "a", "for", "with", "on", "by", "as", "an", "from", "that",
    "this", "is", "are", "was", "were", "be", "has", "have", "had", "but", "not", "at", "which",
    "or", "it", "its", "their", "they", "them", "these", "those", "such",
];

/// The default stop list as an owned set.
pub fn default_stop_words() -> HashSet<String> {
    DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect()
}

/// Default stop list extended with the words in `path` (one per line,
/// case-insensitive, blank lines ignored).
pub fn stop_words_from_file(path: &Path) -> io::Result<HashSet<String>> {
    let mut stop = default_stop_words();
    let content = fs::read_to_string(path)?;
    let mut added = 0usize;
    for line in content.lines() {
        let word = line.trim().to_lowercase();
        if !word.is_empty() && stop.insert(word) {
            added += 1;
        }
    }
    debug!("added {added} stop words from {}", path.display());
    Ok(stop)
}

/// Split `text` into lowercase tokens: maximal ASCII-alphabetic runs of
/// length >= 3.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            current.push(c.to_ascii_lowercase());
        } else if !current.is_empty() {
            if current.len() >= 3 {
                tokens.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        }
    }
    if current.len() >= 3 {
        tokens.push(current);
    }
    tokens
}

/// Top `n` words of `column` across `set`, after tokenization and stop-word
/// removal. Rows contribute in table order, so the first-appearance
/// tie-break is deterministic. An empty table yields an empty result.
pub fn word_frequencies(
    set: &PaperSet,
    column: TextColumn,
    stop_words: &HashSet<String>,
    n: usize,
) -> Vec<(String, usize)> {
    let tokens = set
        .iter()
        .map(|p| match column {
            TextColumn::Title => p.title.as_str(),
            TextColumn::Abstract => p.abstract_text.as_str(),
        })
        .flat_map(tokenize)
        .filter(|token| !stop_words.contains(token));
    rank_by_count(tokens, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::clean;
    use crate::model::RawRecord;

    fn titled(titles: &[&str]) -> PaperSet {
        clean(
            titles
                .iter()
                .map(|t| RawRecord {
                    title: Some(t.to_string()),
                    ..RawRecord::default()
                })
                .collect(),
        )
    }

    #[test]
    fn tokenize_keeps_alphabetic_runs_of_three_or_more() {
        assert_eq!(
            tokenize("COVID-19 spread: 2 new R0 estimates!"),
            vec!["covid", "spread", "new", "estimates"]
        );
        // Digits split runs; fragments shorter than 3 are dropped, not merged.
        assert_eq!(tokenize("ab1cdef"), vec!["cdef"]);
        assert_eq!(tokenize(""), Vec::<String>::new());
    }

    #[test]
    fn stop_words_are_removed_regardless_of_case() {
        let stop = default_stop_words();
        let set = titled(&["The THE tHe virus AND the spread"]);
        let freq = word_frequencies(&set, TextColumn::Title, &stop, 10);
        assert!(freq.iter().all(|(w, _)| w != "the" && w != "and"));
        assert_eq!(freq, vec![("virus".to_string(), 1), ("spread".to_string(), 1)]);
    }

    #[test]
    fn frequencies_rank_by_count_then_first_appearance() {
        let stop = default_stop_words();
        let set = titled(&[
            "COVID vaccine trial",
            "vaccine efficacy and covid spread",
        ]);
        let freq = word_frequencies(&set, TextColumn::Title, &stop, 5);
        // covid and vaccine tie at 2; covid is the first token of row one.
        assert_eq!(
            freq,
            vec![
                ("covid".to_string(), 2),
                ("vaccine".to_string(), 2),
                ("trial".to_string(), 1),
                ("efficacy".to_string(), 1),
                ("spread".to_string(), 1),
            ]
        );
    }

    #[test]
    fn empty_table_yields_empty_frequency_table() {
        let stop = default_stop_words();
        let freq = word_frequencies(&PaperSet::default(), TextColumn::Abstract, &stop, 10);
        assert!(freq.is_empty());
    }

    #[test]
    fn n_limits_the_result() {
        let stop = default_stop_words();
        let set = titled(&["alpha beta gamma delta epsilon"]);
        let freq = word_frequencies(&set, TextColumn::Title, &stop, 2);
        assert_eq!(freq.len(), 2);
    }

    #[test]
    fn stop_word_file_extends_the_default_list() {
        use std::io::Write;
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "virus\n\nSPREAD").unwrap();
        let stop = stop_words_from_file(f.path()).unwrap();
        assert!(stop.contains("virus"));
        assert!(stop.contains("spread"));
        assert!(stop.contains("the"));
    }
}
