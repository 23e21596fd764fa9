#![forbid(unsafe_code)]
//! # Paper Analysis CLI
//!
//! Command-line front end for the `paper_analysis` crate. It loads one
//! metadata export, applies the requested filters, prints a sectioned
//! summary report, and exports every aggregate as txt, csv, tsv, or json.
//!
//! ## Example
//! ```bash
//! cargo run --release -- data/metadata.csv --year-min 2020 --year-max 2021 \
//!     --source PMC --export-format json --out results/
//! ```
//!
//! See `--help` for all available options.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use paper_analysis::{
    AnalysisOptions, ExportFormat, FilterCriteria, PaperSet, Session, TextColumn,
    export_counts, export_metrics, stop_words_from_file,
};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Metadata CSV export to analyze
    path: PathBuf,

    /// Optional path to additional stopword file (.txt, one word per line)
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Lower bound of the publication-year filter (inclusive)
    #[arg(long, default_value_t = 2019)]
    year_min: i32,

    /// Upper bound of the publication-year filter (inclusive)
    #[arg(long, default_value_t = 2023)]
    year_max: i32,

    /// Restrict to a normalized journal name (repeatable; none = all)
    #[arg(long = "journal")]
    journals: Vec<String>,

    /// Restrict to a source label (repeatable; none = all)
    #[arg(long = "source")]
    sources: Vec<String>,

    /// Number of journals in the journal ranking
    #[arg(long, default_value_t = 10)]
    top_journals: usize,

    /// Number of sources in the source ranking
    #[arg(long, default_value_t = 10)]
    top_sources: usize,

    /// Number of words in the word-frequency tables
    #[arg(long, default_value_t = 15)]
    top_words: usize,

    /// Number of rows in the data-sample section
    #[arg(long, default_value_t = 5)]
    sample: usize,

    /// Output format for exported result files (txt, csv, tsv, json)
    #[arg(long, value_enum, default_value = "txt")]
    export_format: ExportFormat,

    /// Directory for exported result files (default: current directory)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let stop_words = match &cli.stopwords {
        Some(path) => stop_words_from_file(path)
            .with_context(|| format!("reading stopword file {}", path.display()))?,
        None => paper_analysis::default_stop_words(),
    };

    let options = AnalysisOptions {
        top_n_journals: cli.top_journals,
        top_n_sources: cli.top_sources,
        top_n_words: cli.top_words,
        year_bounds: (cli.year_min, cli.year_max),
        stop_words,
    };
    let session = Session::open(&cli.path, options)?;

    let criteria = FilterCriteria {
        year_min: cli.year_min,
        year_max: cli.year_max,
        journals: cli.journals.iter().cloned().collect::<BTreeSet<_>>(),
        sources: cli.sources.iter().cloned().collect::<BTreeSet<_>>(),
    };
    let view = session.filtered(&criteria);

    println!("{}", report(&session, &view, cli.sample));

    let out_dir = cli.out.clone().unwrap_or_else(|| PathBuf::from("."));
    let stem = cli
        .path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("metadata")
        .to_string();
    write_exports(&session, &view, &out_dir, &stem, cli.export_format)?;

    Ok(())
}

/// Build the sectioned stdout report over the filtered view.
fn report(session: &Session, view: &PaperSet, sample: usize) -> String {
    let metrics = session.summary_metrics(view);
    let coverage = session.field_coverage(view);
    let options = session.options();

    let mut out = String::new();
    out.push_str(&format!(
        "Papers after filters: {} (of {} in the working table)\n\n",
        view.len(),
        session.working().len()
    ));

    out.push_str("Summary:\n");
    out.push_str(&format!("  total papers\t{}\n", metrics.total_papers));
    out.push_str(&format!("  distinct journals\t{}\n", metrics.distinct_journals));
    out.push_str(&format!(
        "  mean abstract words\t{:.1}\n",
        metrics.mean_abstract_words
    ));
    out.push_str(&format!("  with abstract\t{}\n", metrics.with_abstract));
    out.push_str(&format!("  with journal\t{}\n", coverage.with_journal));
    out.push_str(&format!("  with source\t{}\n", coverage.with_source));
    out.push_str(&format!("  with date\t{}\n", coverage.with_date));

    out.push_str("\nPublications by year:\n");
    for (year, count) in session.counts_by_year(view) {
        out.push_str(&format!("  {year}\t{count}\n"));
    }

    out.push_str("\nPublications by month:\n");
    for (month, count) in session.counts_by_month(view) {
        out.push_str(&format!("  {month}\t{count}\n"));
    }

    out.push_str(&format!("\nTop {} journals:\n", options.top_n_journals));
    for (journal, count) in session.top_journals(view) {
        out.push_str(&format!("  {journal}\t{count}\n"));
    }

    out.push_str(&format!("\nTop {} sources:\n", options.top_n_sources));
    for (source, count) in session.top_sources(view) {
        out.push_str(&format!("  {source}\t{count}\n"));
    }

    out.push_str(&format!("\nTop {} words in titles:\n", options.top_n_words));
    for (word, count) in session.word_frequencies(view, TextColumn::Title) {
        out.push_str(&format!("  {word}\t{count}\n"));
    }

    out.push_str(&format!("\nTop {} words in abstracts:\n", options.top_n_words));
    for (word, count) in session.word_frequencies(view, TextColumn::Abstract) {
        out.push_str(&format!("  {word}\t{count}\n"));
    }

    if sample > 0 {
        out.push_str(&format!("\nSample (first {sample} rows):\n"));
        for paper in view.iter().take(sample) {
            let year = paper
                .publication_year
                .map_or_else(|| "----".to_string(), |y| y.to_string());
            out.push_str(&format!(
                "  {} | {} | {} | {} | {} words\n",
                paper.title,
                paper.journal,
                year,
                paper.source.as_deref().unwrap_or("-"),
                paper.abstract_word_count
            ));
        }
    }

    out
}

/// Export every aggregate of the filtered view as result files.
fn write_exports(
    session: &Session,
    view: &PaperSet,
    dir: &std::path::Path,
    stem: &str,
    format: ExportFormat,
) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let years: Vec<(String, usize)> = session
        .counts_by_year(view)
        .into_iter()
        .map(|(year, count)| (year.to_string(), count))
        .collect();
    export_counts(dir, stem, "years", &years, format)?;
    export_counts(dir, stem, "months", &session.counts_by_month(view), format)?;
    export_counts(dir, stem, "journals", &session.top_journals(view), format)?;
    export_counts(dir, stem, "sources", &session.top_sources(view), format)?;
    export_counts(
        dir,
        stem,
        "title_wordfreq",
        &session.word_frequencies(view, TextColumn::Title),
        format,
    )?;
    export_counts(
        dir,
        stem,
        "abstract_wordfreq",
        &session.word_frequencies(view, TextColumn::Abstract),
        format,
    )?;
    export_metrics(
        dir,
        stem,
        &session.summary_metrics(view),
        &session.field_coverage(view),
        format,
    )?;

    Ok(())
}
