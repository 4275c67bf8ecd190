// src/pipeline/docs.rs

//! Render a markdown document (README, usage notes) to HTML.

use std::path::Path;

use crate::error::Result;
use crate::services::{DocumentRenderer, MarkdownRenderer};

/// Render `input` to `output`, or to stdout when no output path is given.
pub async fn run_docs(input: &Path, output: Option<&Path>) -> Result<()> {
    let text = tokio::fs::read_to_string(input).await?;
    let html = MarkdownRenderer::new()?.render(&text);

    match output {
        Some(path) => {
            tokio::fs::write(path, &html).await?;
            log::info!(
                "Rendered {} to {} ({} bytes)",
                input.display(),
                path.display(),
                html.len()
            );
        }
        None => print!("{html}"),
    }
    Ok(())
}
