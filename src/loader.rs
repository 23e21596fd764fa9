//! Read a metadata export (CSV) into raw records.
//!
//! Recognized columns: `title`, `abstract`, `journal`, `source_x`,
//! `publish_time`. Anything else is ignored. A recognized column that is
//! missing from the header is treated as all-absent for every row — except
//! `title`, without which the export is useless and loading fails.

use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use crate::model::RawRecord;

/// Structural load failure. Data-quality problems (empty cells, unparseable
/// dates) are not errors; they are resolved during cleaning.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("{path} has no 'title' column")]
    MissingTitleColumn { path: String },
}

/// Column indices for the recognized fields, resolved once from the header.
struct ColumnMap {
    title: usize,
    abstract_text: Option<usize>,
    journal: Option<usize>,
    source: Option<usize>,
    publish_time: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord, path: &Path) -> Result<Self, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let title = find("title").ok_or_else(|| LoadError::MissingTitleColumn {
            path: path.display().to_string(),
        })?;
        Ok(ColumnMap {
            title,
            abstract_text: find("abstract"),
            journal: find("journal"),
            source: find("source_x"),
            publish_time: find("publish_time"),
        })
    }
}

/// Load the export at `path` into raw records, one per CSV row.
///
/// Never panics; every failure surfaces as a [`LoadError`]. Empty cells
/// become `None` so the cleaner can apply its missing-value policy uniformly.
pub fn load_csv(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let wrap = |source: csv::Error| LoadError::Read {
        path: path.display().to_string(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(wrap)?;
    let headers = reader.headers().map_err(wrap)?.clone();
    let columns = ColumnMap::from_headers(&headers, path)?;
    debug!("recognized columns resolved from {} headers", headers.len());

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(wrap)?;
        records.push(RawRecord {
            title: cell(&row, Some(columns.title)),
            abstract_text: cell(&row, columns.abstract_text),
            journal: cell(&row, columns.journal),
            source: cell(&row, columns.source),
            publish_time: cell(&row, columns.publish_time),
        });
    }

    info!("loaded {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// An absent column or an empty cell both mean "no value".
fn cell(row: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    let value = row.get(idx?)?;
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
