//! Export summaries to timestamped txt/csv/tsv/json files.
//!
//! Every aggregate is exported as plain ordered item→count rows (or a flat
//! metrics object), carrying no coupling to any rendering mechanism.
//! Filenames are `<stem>_<YYYYMMDD>_<HHMMSS>_<suffix>.<ext>` so repeated runs
//! never clobber earlier results.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::ValueEnum;
use log::info;
use serde::Serialize;

use crate::model::{FieldCoverage, SummaryMetrics};

/// Output format for exported result files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Txt,
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }
}

/// One exported ranking row.
#[derive(Debug, Serialize)]
struct CountRow<'a> {
    item: &'a str,
    count: usize,
}

/// Neutralize spreadsheet formula injection: cells starting with `=`, `+`,
/// `-`, or `@` get a leading single quote, unless one is already there.
pub fn csv_safe_cell(cell: String) -> String {
    let dangerous = cell.starts_with(['=', '+', '-', '@']);
    if dangerous && !cell.starts_with('\'') {
        format!("'{cell}")
    } else {
        cell
    }
}

fn output_path(dir: &Path, stem: &str, suffix: &str, format: ExportFormat) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("{stem}_{timestamp}_{suffix}.{}", format.extension()))
}

/// Write ordered item→count rows to `dir` and return the created path.
pub fn export_counts(
    dir: &Path,
    stem: &str,
    suffix: &str,
    rows: &[(String, usize)],
    format: ExportFormat,
) -> Result<PathBuf> {
    let path = output_path(dir, stem, suffix, format);
    match format {
        ExportFormat::Txt => {
            let mut out = String::new();
            for (item, count) in rows {
                out.push_str(&format!("{item}\t{count}\n"));
            }
            fs::write(&path, out).with_context(|| format!("writing {}", path.display()))?;
        }
        ExportFormat::Csv | ExportFormat::Tsv => {
            let delimiter = if format == ExportFormat::Tsv { b'\t' } else { b',' };
            let mut writer = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_path(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            writer.write_record(["item", "count"])?;
            for (item, count) in rows {
                writer.write_record([csv_safe_cell(item.clone()), count.to_string()])?;
            }
            writer.flush()?;
        }
        ExportFormat::Json => {
            let rows: Vec<CountRow> = rows
                .iter()
                .map(|(item, count)| CountRow { item, count: *count })
                .collect();
            let json = serde_json::to_string_pretty(&rows)?;
            fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        }
    }
    info!("exported {} rows to {}", rows.len(), path.display());
    Ok(path)
}

/// Write the summary metrics and field coverage as one flat record.
pub fn export_metrics(
    dir: &Path,
    stem: &str,
    metrics: &SummaryMetrics,
    coverage: &FieldCoverage,
    format: ExportFormat,
) -> Result<PathBuf> {
    let path = output_path(dir, stem, "metrics", format);

    let pairs = [
        ("total_papers", metrics.total_papers.to_string()),
        ("distinct_journals", metrics.distinct_journals.to_string()),
        (
            "mean_abstract_words",
            format!("{:.2}", metrics.mean_abstract_words),
        ),
        ("with_abstract", metrics.with_abstract.to_string()),
        ("with_journal", coverage.with_journal.to_string()),
        ("with_source", coverage.with_source.to_string()),
        ("with_date", coverage.with_date.to_string()),
    ];

    match format {
        ExportFormat::Txt => {
            let mut out = String::new();
            for (metric, value) in &pairs {
                out.push_str(&format!("{metric}\t{value}\n"));
            }
            fs::write(&path, out).with_context(|| format!("writing {}", path.display()))?;
        }
        ExportFormat::Csv | ExportFormat::Tsv => {
            let delimiter = if format == ExportFormat::Tsv { b'\t' } else { b',' };
            let mut writer = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_path(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            writer.write_record(["metric", "value"])?;
            for (metric, value) in &pairs {
                writer.write_record([metric.to_string(), value.clone()])?;
            }
            writer.flush()?;
        }
        ExportFormat::Json => {
            #[derive(Serialize)]
            struct MetricsExport<'a> {
                #[serde(flatten)]
                metrics: &'a SummaryMetrics,
                with_journal: usize,
                with_source: usize,
                with_date: usize,
            }
            let json = serde_json::to_string_pretty(&MetricsExport {
                metrics,
                with_journal: coverage.with_journal,
                with_source: coverage.with_source,
                with_date: coverage.with_date,
            })?;
            fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        }
    }
    info!("exported metrics to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_safe_cell_neutralizes_leading_formula_chars() {
        assert_eq!(
            csv_safe_cell("=HYPERLINK(\"http://x\")".into()),
            "'=HYPERLINK(\"http://x\")"
        );
        assert_eq!(csv_safe_cell("@cmd".into()), "'@cmd");
        assert_eq!(csv_safe_cell("-2".into()), "'-2");
    }

    #[test]
    fn csv_safe_cell_leaves_safe_cells_alone() {
        assert_eq!(csv_safe_cell("'=already".into()), "'=already");
        assert_eq!(csv_safe_cell("normal".into()), "normal");
    }

    #[test]
    fn export_counts_json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let rows = vec![("covid".to_string(), 3), ("vaccine".to_string(), 2)];
        let path =
            export_counts(dir.path(), "meta", "wordfreq", &rows, ExportFormat::Json).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["item"], "covid");
        assert_eq!(arr[0]["count"], 3);
    }

    #[test]
    fn export_counts_csv_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let rows = vec![("Nature".to_string(), 5)];
        let path =
            export_counts(dir.path(), "meta", "journals", &rows, ExportFormat::Csv).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("item,count"));
        assert_eq!(lines.next(), Some("Nature,5"));
    }
}
