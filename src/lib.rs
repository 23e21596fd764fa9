#![forbid(unsafe_code)]
//! # Paper Analysis
//!
//! Data-preparation and aggregation pipeline for research-paper metadata
//! exports (one CSV with `title`, `abstract`, `journal`, `source_x`, and
//! `publish_time` columns).
//!
//! The pipeline is a chain of pure steps:
//!
//! ```text
//! loader → clean → (filter) → { aggregate, text }
//! ```
//!
//! * [`loader`] reads the export into raw records; only structural failures
//!   (unreadable file, missing `title` column) are errors.
//! * [`clean`] applies the missing-value policy and computes derived fields
//!   (publication year, abstract word count, normalized journal name).
//! * [`filter`] applies year/journal/source criteria without mutating the
//!   working table, so it can be re-run on every interaction.
//! * [`aggregate`] and [`text`] produce the named summaries: counts by year
//!   and month, top journals and sources, descriptive metrics, and
//!   word-frequency tables.
//! * [`session::Session`] ties the above together for one interactive run.
//! * [`export`] writes any summary as txt/csv/tsv/json.
//!
//! All rankings are deterministic: count descending, ties broken by first
//! occurrence in table order.
//!
//! ## Example
//!
//! ```no_run
//! use paper_analysis::{AnalysisOptions, FilterCriteria, Session, TextColumn};
//!
//! let session = Session::open("data/metadata.csv".as_ref(), AnalysisOptions::default())?;
//! let view = session.filtered(&FilterCriteria::year_range(2020, 2021));
//! for (year, count) in session.counts_by_year(&view) {
//!     println!("{year}: {count}");
//! }
//! for (word, count) in session.word_frequencies(&view, TextColumn::Title) {
//!     println!("{word}: {count}");
//! }
//! # Ok::<(), paper_analysis::LoadError>(())
//! ```

pub mod aggregate;
pub mod clean;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod session;
pub mod text;

pub use export::{ExportFormat, csv_safe_cell, export_counts, export_metrics};
pub use loader::{LoadError, load_csv};
pub use model::{
    FieldCoverage, FilterCriteria, Paper, PaperSet, RawRecord, SummaryMetrics, UNKNOWN_JOURNAL,
};
pub use session::{AnalysisOptions, Session};
pub use text::{DEFAULT_STOP_WORDS, TextColumn, default_stop_words, stop_words_from_file};
