// src/services/surface.rs

//! Code-display surfaces.
//!
//! A surface holds one document, the whole-line decorations anchored to it,
//! and a scroll position. Replacing the text drops every decoration.

use crate::models::LineRange;

/// A display that can show a document and highlight whole lines.
pub trait CodeSurface: Send {
    /// Replace the full text, discarding all decorations.
    fn set_text(&mut self, text: &str);

    /// Number of lines in the current document.
    fn line_count(&self) -> usize;

    /// Highlight the given whole lines. The range is already within bounds.
    fn add_line_decoration(&mut self, range: LineRange);

    /// Scroll so that `line` (1-based) is visible.
    fn reveal_line(&mut self, line: usize);
}

/// In-memory surface that renders a fixed-height window as text.
#[derive(Debug, Clone)]
pub struct TextSurface {
    lines: Vec<String>,
    decorations: Vec<LineRange>,
    /// Index of the first visible line (0-based)
    scroll_top: usize,
    height: usize,
}

impl TextSurface {
    /// Create an empty surface showing `height` lines at a time.
    pub fn new(height: usize) -> Self {
        Self {
            lines: Vec::new(),
            decorations: Vec::new(),
            scroll_top: 0,
            height: height.max(1),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn decorations(&self) -> &[LineRange] {
        &self.decorations
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// First and last visible line, 1-based. `None` for an empty document.
    pub fn visible_range(&self) -> Option<LineRange> {
        if self.lines.is_empty() {
            return None;
        }
        let first = self.scroll_top + 1;
        let last = (self.scroll_top + self.height).min(self.lines.len());
        Some(LineRange::new(first, last))
    }

    pub fn is_line_visible(&self, line: usize) -> bool {
        self.visible_range().is_some_and(|r| r.contains(line))
    }

    fn is_decorated(&self, line: usize) -> bool {
        self.decorations.iter().any(|r| r.contains(line))
    }

    /// Render the visible window with a line-number gutter.
    ///
    /// Decorated lines carry a `▶` marker in front of the gutter.
    pub fn render_viewport(&self) -> String {
        let Some(visible) = self.visible_range() else {
            return "(empty document)".to_string();
        };
        let gutter = self.lines.len().to_string().len();

        let mut out = String::new();
        for line in visible.start..=visible.end {
            let marker = if self.is_decorated(line) { '▶' } else { ' ' };
            out.push_str(&format!(
                "{} {:>width$} │ {}\n",
                marker,
                line,
                self.lines[line - 1],
                width = gutter
            ));
        }
        out
    }
}

impl CodeSurface for TextSurface {
    fn set_text(&mut self, text: &str) {
        self.lines = text.lines().map(str::to_string).collect();
        self.decorations.clear();
        self.scroll_top = 0;
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn add_line_decoration(&mut self, range: LineRange) {
        self.decorations.push(range);
    }

    fn reveal_line(&mut self, line: usize) {
        if self.lines.is_empty() {
            self.scroll_top = 0;
            return;
        }
        let target = line.clamp(1, self.lines.len()) - 1;
        // Center the target line, without scrolling past the end.
        let max_top = self.lines.len().saturating_sub(self.height);
        self.scroll_top = target.saturating_sub(self.height / 2).min(max_top);
    }
}
