// src/pipeline/browse.rs

//! Interactive browsing.
//!
//! Each input line names a record id and counts as one selection. Fetches
//! run concurrently on the current task while input keeps being read; a
//! response superseded by a later selection is dropped.

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::Result;
use crate::models::{Catalog, Config, Record};
use crate::pipeline::show::print_view;
use crate::pipeline::{build_controller, open_catalog};
use crate::services::{SelectionController, SelectionOutcome, SelectionStats, TextSurface};
use crate::utils::log;

/// Resolve one input line to a record.
///
/// Blank lines and `#` comments select nothing; unknown or malformed ids
/// are logged and skipped.
pub fn parse_selection<'a>(catalog: &'a Catalog, line: &str) -> Option<&'a Record> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let id: u64 = match line.parse() {
        Ok(id) => id,
        Err(_) => {
            ::log::warn!("'{}' is not a record id", line);
            return None;
        }
    };
    let record = catalog.get(id);
    if record.is_none() {
        ::log::warn!("No record with id {} in catalog", id);
    }
    record
}

/// Feed selections read from `input` into `controller` until input ends and
/// every outstanding fetch has resolved.
pub async fn browse<R>(
    catalog: &Catalog,
    controller: &SelectionController<TextSurface>,
    input: R,
) -> Result<SelectionStats>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut pending = FuturesUnordered::new();
    let mut input_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line? {
                    Some(line) => {
                        if let Some(record) = parse_selection(catalog, &line) {
                            pending.push(async move {
                                (record, controller.on_record_selected(record).await)
                            });
                        }
                    }
                    None => input_open = false,
                }
            }
            Some((record, outcome)) = pending.next(), if !pending.is_empty() => {
                match outcome {
                    SelectionOutcome::Rendered(_) => print_view(controller, record).await,
                    SelectionOutcome::Stale { id } => {
                        ::log::debug!("Skipped outdated response for record {}", id);
                    }
                    // Already logged by the controller; the view stays as it was.
                    SelectionOutcome::Failed(_) => {}
                }
            }
            else => break,
        }
    }

    Ok(controller.stats().await)
}

/// Browse the configured catalog with selections from stdin.
pub async fn run_browse(config: &Config) -> Result<()> {
    let catalog = open_catalog(config).await?;
    let controller = build_controller(config)?;

    log::header("Browse");
    log::sub_item("Enter a record id per line; end input to quit.");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stats = browse(&catalog, &controller, stdin).await?;

    log::summary(
        "Browse",
        &[
            ("Rendered", stats.rendered.to_string()),
            ("Outdated", stats.stale.to_string()),
            ("Failed", stats.failed.to_string()),
        ],
    );
    Ok(())
}
