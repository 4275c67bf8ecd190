// src/pipeline/show.rs

//! Show a single record's artifact with its defect region highlighted.

use crate::error::{AppError, Result};
use crate::models::{Config, DisplayedDocument, Record};
use crate::pipeline::build_controller;
use crate::services::{SelectionController, SelectionOutcome, TextSurface};
use crate::utils::log;

/// Status line describing what is on screen.
pub fn format_status(record: &Record, document: &DisplayedDocument) -> String {
    let highlight = match document.decoration {
        Some(range) => format!("highlight {}-{}", range.start, range.end),
        None => "no highlight".to_string(),
    };
    format!(
        "record {} · {} · lines {}-{} · {} · {} lines · fetched {}",
        record.id,
        record.project_name,
        record.start_line,
        record.end_line,
        highlight,
        document.line_count(),
        document.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Print the current view of `controller` for `record`.
pub async fn print_view(controller: &SelectionController<TextSurface>, record: &Record) {
    let Some(document) = controller.displayed().await else {
        return;
    };
    let viewport = controller.with_surface(|s| s.render_viewport()).await;

    log::header(&format!("Record {} ({})", record.id, record.project_name));
    print!("{viewport}");
    log::separator();
    println!("{}", format_status(record, &document));
}

/// Fetch and show one record.
pub async fn run_show(config: &Config, id: u64) -> Result<()> {
    let catalog = super::open_catalog(config).await?;
    let record = catalog
        .get(id)
        .ok_or_else(|| AppError::validation(format!("no record with id {id} in catalog")))?;

    let controller = build_controller(config)?;
    match controller.on_record_selected(record).await {
        SelectionOutcome::Rendered(_) => {
            print_view(&controller, record).await;
            Ok(())
        }
        // The controller has logged the cause already.
        SelectionOutcome::Failed(_) => Err(AppError::validation(format!(
            "record {id} could not be shown"
        ))),
        // Nothing can supersede the only selection.
        SelectionOutcome::Stale { id } => Err(AppError::validation(format!(
            "selection of record {id} was superseded"
        ))),
    }
}
