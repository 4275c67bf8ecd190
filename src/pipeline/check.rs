// src/pipeline/check.rs

//! Catalog consistency check.

use crate::error::{AppError, Result};
use crate::models::{Catalog, Config};
use crate::pipeline::open_catalog;
use crate::utils::log;

/// Describe every problem found in `catalog`, one line each.
pub fn find_problems(catalog: &Catalog) -> Vec<String> {
    let mut problems: Vec<String> = catalog
        .range_violations()
        .into_iter()
        .map(|r| {
            format!(
                "record {}: invalid line range {}-{}",
                r.id, r.start_line, r.end_line
            )
        })
        .collect();

    problems.extend(
        catalog
            .duplicate_ids()
            .into_iter()
            .map(|id| format!("record {id}: duplicate id, later entries ignored")),
    );
    problems
}

/// Validate the configured catalog. Fails when any problem is found.
pub async fn run_check(config: &Config) -> Result<()> {
    let catalog = open_catalog(config).await?;
    let problems = find_problems(&catalog);

    log::header(&format!("Checking {}", config.catalog.location()));
    for problem in &problems {
        log::sub_item(problem);
    }
    log::summary(
        "Check",
        &[
            ("Records", catalog.len().to_string()),
            ("Problems", problems.len().to_string()),
        ],
    );

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "{} problem(s) in {}",
            problems.len(),
            config.catalog.location()
        )))
    }
}
