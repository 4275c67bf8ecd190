// src/pipeline/list.rs

//! Catalog table.

use crate::error::Result;
use crate::models::{Config, DisplayConfig, Record};
use crate::pipeline::open_catalog;
use crate::utils::{log, pad, text_width, truncate};

/// Format records as a fixed-width text table.
///
/// Columns are ID, project, line range, then one column per configured
/// display field. Missing fields show as `-`.
pub fn format_table<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    display: &DisplayConfig,
) -> String {
    let mut header = vec!["ID".to_string(), "Project".to_string(), "Lines".to_string()];
    header.extend(display.table_fields.iter().cloned());

    let rows: Vec<Vec<String>> = records
        .into_iter()
        .map(|record| {
            let mut row = vec![
                record.id.to_string(),
                truncate(&record.project_name, display.cell_width),
                format!("{}-{}", record.start_line, record.end_line),
            ];
            for field in &display.table_fields {
                let value = record.display_field(field).unwrap_or_else(|| "-".to_string());
                row.push(truncate(&value, display.cell_width));
            }
            row
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| text_width(h)).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(text_width(cell));
        }
    }

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| pad(cell, width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = format_row(&header);
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out
}

/// Print the catalog, optionally narrowed to one project.
pub async fn run_list(config: &Config, project: Option<&str>, limit: Option<usize>) -> Result<()> {
    let catalog = open_catalog(config).await?;

    let shown: Vec<&Record> = catalog
        .iter()
        .filter(|r| project.is_none_or(|p| r.project_name.eq_ignore_ascii_case(p)))
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    print!("{}", format_table(shown.iter().copied(), &config.display));
    log::summary(
        "Catalog",
        &[
            ("Records", catalog.len().to_string()),
            ("Shown", shown.len().to_string()),
        ],
    );
    Ok(())
}
