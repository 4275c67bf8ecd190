// src/services/document.rs

//! Document rendering.
//!
//! Converts a markdown document into HTML. All document text is escaped, so
//! raw HTML in the source never reaches the output. Fenced code blocks are
//! tokenized per language and wrapped in `hl-*` spans.

use regex::Regex;
use tree_sitter::{Language, Node, Parser};

use crate::error::Result;

/// Stateless conversion of a long-form document into HTML.
pub trait DocumentRenderer {
    fn render(&self, text: &str) -> String;
}

/// Named leaf nodes that read as keywords.
const KEYWORD_NODES: &[&str] = &["null_literal", "true", "false", "boolean_literal", "self"];

const STRING_NODES: &[&str] = &[
    "string_literal",
    "raw_string_literal",
    "char_literal",
    "character_literal",
    "text_block",
    "string",
    "raw_string",
    "ansi_c_string",
];

const NUMBER_NODES: &[&str] = &[
    "integer_literal",
    "float_literal",
    "decimal_integer_literal",
    "hex_integer_literal",
    "octal_integer_literal",
    "binary_integer_literal",
    "decimal_floating_point_literal",
    "hex_floating_point_literal",
    "number",
];

/// Highlight class of a syntax node, if it gets one.
fn classify(node: Node<'_>) -> Option<&'static str> {
    let kind = node.kind();
    if kind.contains("comment") {
        Some("hl-comment")
    } else if STRING_NODES.contains(&kind) {
        Some("hl-string")
    } else if NUMBER_NODES.contains(&kind) {
        Some("hl-number")
    } else if node.child_count() == 0
        && ((!node.is_named() && kind.chars().all(|c| c.is_ascii_alphabetic()))
            || KEYWORD_NODES.contains(&kind))
    {
        Some("hl-keyword")
    } else {
        None
    }
}

/// Collect highlighted byte ranges in document order.
fn collect_spans(node: Node<'_>, spans: &mut Vec<(usize, usize, &'static str)>) {
    if let Some(class) = classify(node) {
        spans.push((node.start_byte(), node.end_byte(), class));
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_spans(child, spans);
    }
}

/// Fenced-code grammar with the info-string names it answers to.
struct Grammar {
    names: &'static [&'static str],
    language: Language,
}

impl Grammar {
    fn new(names: &'static [&'static str], language: Language) -> Result<Self> {
        Parser::new().set_language(&language)?;
        Ok(Self { names, language })
    }

    /// Parse `code` and wrap comments, strings, numbers and keywords in
    /// `hl-*` spans. Falls back to plain escaping when parsing fails.
    fn highlight(&self, code: &str) -> String {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&self.language) {
            log::warn!("Grammar unavailable for {}: {}", self.names.join("/"), e);
            return escape_html(code);
        }
        let Some(tree) = parser.parse(code, None) else {
            return escape_html(code);
        };

        let mut spans = Vec::new();
        collect_spans(tree.root_node(), &mut spans);

        let mut out = String::with_capacity(code.len());
        let mut last = 0;
        for (start, end, class) in spans {
            if start < last {
                continue;
            }
            out.push_str(&escape_html(&code[last..start]));
            out.push_str(&format!(
                r#"<span class="{class}">{}</span>"#,
                escape_html(&code[start..end])
            ));
            last = end;
        }
        out.push_str(&escape_html(&code[last..]));
        out
    }
}

/// Markdown renderer covering the subset used by the corpus documentation:
/// ATX headings, paragraphs, `-`/`*` lists, inline code, bold text and
/// fenced code blocks.
pub struct MarkdownRenderer {
    grammars: Vec<Grammar>,
    code_span: Regex,
    bold: Regex,
}

impl MarkdownRenderer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            grammars: vec![
                Grammar::new(&["java"], tree_sitter_java::LANGUAGE.into())?,
                Grammar::new(&["rust", "rs"], tree_sitter_rust::LANGUAGE.into())?,
                Grammar::new(
                    &["sh", "bash", "shell", "console"],
                    tree_sitter_bash::LANGUAGE.into(),
                )?,
            ],
            code_span: Regex::new(r"`([^`]+)`")?,
            bold: Regex::new(r"\*\*([^*]+)\*\*")?,
        })
    }

    fn grammar(&self, name: &str) -> Option<&Grammar> {
        let name = name.to_ascii_lowercase();
        self.grammars
            .iter()
            .find(|grammar| grammar.names.contains(&name.as_str()))
    }

    fn render_inline(&self, text: &str) -> String {
        let mut out = String::new();
        let mut last = 0;
        for caps in self.code_span.captures_iter(text) {
            let (Some(whole), Some(code)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            out.push_str(&self.render_emphasis(&text[last..whole.start()]));
            out.push_str(&format!("<code>{}</code>", escape_html(code.as_str())));
            last = whole.end();
        }
        out.push_str(&self.render_emphasis(&text[last..]));
        out
    }

    fn render_emphasis(&self, text: &str) -> String {
        self.bold
            .replace_all(&escape_html(text), "<strong>$1</strong>")
            .into_owned()
    }

    fn render_code_block(&self, info: &str, body: &[&str]) -> String {
        let lang: String = info
            .split_whitespace()
            .next()
            .unwrap_or("")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();

        let code = body.join("\n");
        let highlighted = match self.grammar(&lang) {
            Some(grammar) => grammar.highlight(&code),
            None => escape_html(&code),
        };

        let class = if lang.is_empty() {
            String::new()
        } else {
            format!(r#" class="language-{lang}""#)
        };
        format!("<pre><code{class}>{highlighted}</code></pre>\n")
    }
}

impl DocumentRenderer for MarkdownRenderer {
    fn render(&self, text: &str) -> String {
        let mut out = String::new();
        let mut paragraph: Vec<&str> = Vec::new();
        let mut list: Vec<&str> = Vec::new();
        let mut lines = text.lines();

        fn flush_paragraph(r: &MarkdownRenderer, out: &mut String, paragraph: &mut Vec<&str>) {
            if !paragraph.is_empty() {
                let joined = paragraph.join(" ");
                out.push_str(&format!("<p>{}</p>\n", r.render_inline(joined.trim())));
                paragraph.clear();
            }
        }

        fn flush_list(r: &MarkdownRenderer, out: &mut String, list: &mut Vec<&str>) {
            if !list.is_empty() {
                out.push_str("<ul>\n");
                for item in list.iter() {
                    out.push_str(&format!("<li>{}</li>\n", r.render_inline(item)));
                }
                out.push_str("</ul>\n");
                list.clear();
            }
        }

        while let Some(line) = lines.next() {
            let trimmed = line.trim_start();

            if let Some(info) = trimmed.strip_prefix("```") {
                flush_paragraph(self, &mut out, &mut paragraph);
                flush_list(self, &mut out, &mut list);
                // An unterminated fence runs to the end of the document.
                let body: Vec<&str> = lines
                    .by_ref()
                    .take_while(|l| !l.trim_start().starts_with("```"))
                    .collect();
                out.push_str(&self.render_code_block(info, &body));
                continue;
            }

            if trimmed.is_empty() {
                flush_paragraph(self, &mut out, &mut paragraph);
                flush_list(self, &mut out, &mut list);
                continue;
            }

            let hashes = trimmed.chars().take_while(|&c| c == '#').count();
            if (1..=6).contains(&hashes) && trimmed[hashes..].starts_with(' ') {
                flush_paragraph(self, &mut out, &mut paragraph);
                flush_list(self, &mut out, &mut list);
                let title = self.render_inline(trimmed[hashes..].trim());
                out.push_str(&format!("<h{hashes}>{title}</h{hashes}>\n"));
                continue;
            }

            if let Some(item) = trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "))
            {
                flush_paragraph(self, &mut out, &mut paragraph);
                list.push(item.trim());
                continue;
            }

            flush_list(self, &mut out, &mut list);
            paragraph.push(trimmed);
        }

        flush_paragraph(self, &mut out, &mut paragraph);
        flush_list(self, &mut out, &mut list);
        out
    }
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
