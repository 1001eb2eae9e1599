//! Reference label tables and the exact-match dataset shortcut.
//!
//! Tables are CSV files with at least an `essay` and a `score` column. Each
//! table is indexed by essay text once at load; lookups are exact string
//! matches, train table first.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::LabeledEssayRecord;

/// Which reference table a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Train,
    Validation,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Train => write!(f, "train"),
            TableKind::Validation => write!(f, "validation"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    essay: String,
    score: f64,
}

/// Load a label table from a CSV file.
///
/// Scores written as floats (`4.0`) are truncated to integers. Rows with an
/// empty essay cell are dropped; they never match a submission.
pub fn load_table(path: &Path) -> Result<Vec<LabeledEssayRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open dataset: {}", path.display()))?;

    let mut records = Vec::new();
    let mut empty = 0;
    for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row
            .with_context(|| format!("failed to parse row {} of {}", i + 1, path.display()))?;
        if row.essay.is_empty() {
            empty += 1;
            continue;
        }
        records.push(LabeledEssayRecord {
            essay: row.essay,
            score: row.score.trunc() as i64,
        });
    }

    if empty > 0 {
        tracing::debug!(empty, "dropped rows without an essay from {}", path.display());
    }
    Ok(records)
}

/// Exact-match index over one label table.
#[derive(Debug, Clone, Default)]
pub struct DatasetIndex {
    scores: HashMap<String, i64>,
    rows: usize,
}

impl DatasetIndex {
    /// Index `records`. When an essay appears more than once, the first
    /// occurrence in table order wins.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = LabeledEssayRecord>,
    {
        let mut scores = HashMap::new();
        let mut rows = 0;
        for record in records {
            rows += 1;
            scores.entry(record.essay).or_insert(record.score);
        }
        Self { scores, rows }
    }

    /// Score of the first row whose essay equals `essay` exactly.
    pub fn get(&self, essay: &str) -> Option<i64> {
        self.scores.get(essay).copied()
    }

    /// Number of rows the table had.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of distinct essays.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Rows shadowed by an earlier row with the same essay.
    pub fn duplicates(&self) -> usize {
        self.rows - self.scores.len()
    }
}

/// The dataset shortcut: train and validation indexes, either of which may be
/// absent if it failed to load.
#[derive(Debug, Clone, Default)]
pub struct DatasetLookup {
    train: Option<DatasetIndex>,
    validation: Option<DatasetIndex>,
}

impl DatasetLookup {
    /// Build from already-indexed tables.
    pub fn from_tables(train: Option<DatasetIndex>, validation: Option<DatasetIndex>) -> Self {
        Self { train, validation }
    }

    /// Load both tables from disk. A table that is not configured or fails to
    /// load is logged and treated as absent.
    pub fn load(train: Option<&Path>, validation: Option<&Path>) -> Self {
        Self {
            train: train.and_then(|p| load_index(TableKind::Train, p)),
            validation: validation.and_then(|p| load_index(TableKind::Validation, p)),
        }
    }

    /// The index for `kind`, if that table is loaded.
    pub fn table(&self, kind: TableKind) -> Option<&DatasetIndex> {
        match kind {
            TableKind::Train => self.train.as_ref(),
            TableKind::Validation => self.validation.as_ref(),
        }
    }

    /// Find the stored score for an already-normalized essay.
    pub fn lookup(&self, normalized_essay: &str) -> Option<i64> {
        [TableKind::Train, TableKind::Validation]
            .into_iter()
            .find_map(|kind| {
                let score = self.table(kind)?.get(normalized_essay)?;
                tracing::debug!(table = %kind, score, "dataset match");
                Some(score)
            })
    }
}

fn load_index(kind: TableKind, path: &Path) -> Option<DatasetIndex> {
    match load_table(path) {
        Ok(records) => {
            let index = DatasetIndex::from_records(records);
            tracing::info!(
                table = %kind,
                rows = index.rows(),
                distinct = index.len(),
                "loaded {}",
                path.display()
            );
            Some(index)
        }
        Err(e) => {
            tracing::warn!(table = %kind, "error loading {}: {e:#}", path.display());
            None
        }
    }
}
