//! The `essayscore dataset` command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use comfy_table::{Cell, Table};

use essayscore_core::dataset::{load_table, DatasetIndex, TableKind};
use essayscore_providers::config::load_config_from;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let mut table = Table::new();
    table.set_header(vec![
        "Table",
        "Path",
        "Status",
        "Rows",
        "Distinct",
        "Duplicates",
    ]);

    let tables = [
        (TableKind::Train, config.dataset.train.as_deref()),
        (TableKind::Validation, config.dataset.validation.as_deref()),
    ];
    for (kind, path) in tables {
        table.add_row(table_row(kind, path));
    }

    println!("{table}");
    Ok(())
}

fn table_row(kind: TableKind, path: Option<&Path>) -> Vec<Cell> {
    let Some(path) = path else {
        return vec![
            Cell::new(kind),
            Cell::new("-"),
            Cell::new("not configured"),
            Cell::new("-"),
            Cell::new("-"),
            Cell::new("-"),
        ];
    };

    match load_table(path) {
        Ok(records) => {
            let index = DatasetIndex::from_records(records);
            vec![
                Cell::new(kind),
                Cell::new(path.display()),
                Cell::new("loaded"),
                Cell::new(index.rows()),
                Cell::new(index.len()),
                Cell::new(index.duplicates()),
            ]
        }
        Err(e) => {
            tracing::warn!(table = %kind, "{e:#}");
            vec![
                Cell::new(kind),
                Cell::new(path.display()),
                Cell::new("absent"),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
            ]
        }
    }
}
