// src/services/annotate.rs

//! Annotation renderer.
//!
//! Puts fetched content on the code surface it owns, decorates the defect
//! region and scrolls it into view.

use crate::error::AppError;
use crate::models::LineRange;
use crate::services::surface::CodeSurface;

/// What a single render call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderReport {
    /// Lines in the displayed content
    pub line_count: usize,
    /// Range asked for by the record
    pub requested: LineRange,
    /// Range actually decorated, after clamping
    pub decoration: Option<LineRange>,
}

impl RenderReport {
    /// Whether the requested range was decorated unchanged.
    pub fn is_consistent(&self) -> bool {
        self.decoration == Some(self.requested)
    }

    /// The range mismatch as an error value, for reporting.
    pub fn inconsistency(&self, id: u64) -> Option<AppError> {
        if self.is_consistent() {
            return None;
        }
        Some(AppError::RangeInconsistency {
            id,
            start: self.requested.start,
            end: self.requested.end,
            line_count: self.line_count,
        })
    }
}

/// Owns the code surface and draws annotated documents on it.
pub struct AnnotationRenderer<S: CodeSurface> {
    surface: S,
}

impl<S: CodeSurface> AnnotationRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Show `content` with one whole-line decoration over
    /// `start_line..=end_line`.
    ///
    /// Never fails: a range reaching past the end is clamped, one that lies
    /// entirely outside the content (or is inverted) is skipped and the
    /// content is shown undecorated.
    pub fn render(&mut self, content: &str, start_line: usize, end_line: usize) -> RenderReport {
        let requested = LineRange::new(start_line, end_line);

        self.surface.set_text(content);
        let line_count = self.surface.line_count();

        let decoration = if requested.start <= requested.end {
            requested.clamp_to(line_count)
        } else {
            None
        };

        if let Some(range) = decoration {
            self.surface.add_line_decoration(range);
            self.surface.reveal_line(range.start);
        } else {
            self.surface.reveal_line(start_line);
        }

        RenderReport {
            line_count,
            requested,
            decoration,
        }
    }
}
