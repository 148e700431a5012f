//! Print the first rows of a CSV file the way the grid renders them.
//!
//! Usage: `datagrid <file.csv|file.tsv> [rows]`

use anyhow::{Context, Result};
use datagrid::data::{FramePages, PagedRowCache, RowSource, format_row_count};
use datagrid::grid::{DataGrid, DropdownAction, GridActions, GridProps, ModuleAction, letter_for};
use datagrid::logging;
use datagrid::settings::GridSettings;
use std::path::PathBuf;
use std::sync::Arc;

/// Logs intents instead of applying them
struct LogActions;

impl GridActions for LogActions {
    fn reorder_columns(&self, action: ModuleAction) {
        tracing::info!(?action, "reorder");
    }

    fn rename_column(&self, action: ModuleAction) {
        tracing::info!(?action, "rename");
    }

    fn set_dropdown_action(&self, action: DropdownAction) {
        tracing::info!(?action, "dropdown");
    }
}

fn main() -> Result<()> {
    logging::init_logging();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .map(PathBuf::from)
        .context("usage: datagrid <file.csv> [rows]")?;
    let limit: usize = match args.next() {
        Some(n) => n.parse().context("row count must be a number")?,
        None => 10,
    };

    let pages = FramePages::from_csv(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let columns = pages.column_keys();
    let column_types = pages.column_types();

    let cache = Arc::new(PagedRowCache::new(pages));
    let source: Arc<dyn RowSource> = cache.clone();
    let total_rows = source.total_rows();

    let grid = DataGrid::new(
        source,
        Arc::new(LogActions),
        GridSettings::load(),
        GridProps {
            total_rows,
            columns,
            column_types: Some(column_types),
            module_id: Some(1),
            show_letter: true,
            ..Default::default()
        },
    );

    let Some(frame) = grid.render() else {
        println!("(empty table)");
        return Ok(());
    };

    let shown = limit.min(total_rows);
    // First pass queues the pages, second pass finds them loaded
    for i in 0..shown {
        grid.get_row(i);
    }
    cache.resolve_pending()?;

    let data_columns = &frame.columns[1..];
    let letters: Vec<String> = (0..data_columns.len()).map(letter_for).collect();
    println!("\t{}", letters.join("\t"));
    let names: Vec<String> = data_columns
        .iter()
        .map(|c| format!("{} ({})", c.display_name, c.column_type.label()))
        .collect();
    println!("\t{}", names.join("\t"));

    for i in 0..shown {
        let Some(row) = grid.get_row(i) else {
            println!("(row {} not loaded)", i + 1);
            continue;
        };
        let cells: Vec<String> = frame
            .columns
            .iter()
            .map(|c| c.render_cell(&row).text().unwrap_or_default().to_string())
            .collect();
        println!("{}", cells.join("\t"));
    }

    println!("{}", format_row_count(total_rows));
    Ok(())
}
