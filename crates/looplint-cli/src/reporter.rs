use anyhow::Result;
use colored::Colorize;
use looplint_common::{Diagnostic, DiagnosticCategory, LineMap};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Analyzer name used as the key in JSON output.
pub const ANALYZER_NAME: &str = "gotestlooplint";

pub struct Reporter {
    color: bool,
    sources: FxHashMap<String, String>,
    line_maps: FxHashMap<String, LineMap>,
}

#[derive(Debug, Serialize)]
struct JsonFinding<'a> {
    posn: String,
    message: &'a str,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: FxHashMap::default(),
            line_maps: FxHashMap::default(),
        }
    }

    pub fn with_sources(color: bool, sources: FxHashMap<String, String>) -> Self {
        Reporter {
            color,
            sources,
            line_maps: FxHashMap::default(),
        }
    }

    /// One `file:line:col: message` line per diagnostic.
    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for diagnostic in diagnostics {
            out.push_str(&self.format_diagnostic(diagnostic));
            out.push('\n');
        }
        out
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let location = self.format_location(&diagnostic.file, diagnostic.start);
        let mut output = if self.color {
            location.bold().to_string()
        } else {
            location
        };
        output.push_str(": ");
        if diagnostic.category == DiagnosticCategory::Error && diagnostic.code >= 2000 {
            let label = if self.color {
                "syntax error".red().bold().to_string()
            } else {
                "syntax error".to_string()
            };
            output.push_str(&label);
            output.push_str(": ");
        }
        output.push_str(&diagnostic.message_text);

        if self.color
            && let Some(snippet) =
                self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }
        output
    }

    /// Findings grouped by file, in the shape Go analysis drivers print for
    /// `-json`: `{"file": {"gotestlooplint": [{"posn": ..., "message": ...}]}}`.
    pub fn render_json(&mut self, diagnostics: &[Diagnostic]) -> Result<String> {
        let mut grouped: BTreeMap<&str, BTreeMap<&str, Vec<JsonFinding<'_>>>> = BTreeMap::new();
        for diagnostic in diagnostics {
            let posn = self.format_location(&diagnostic.file, diagnostic.start);
            grouped
                .entry(diagnostic.file.as_str())
                .or_default()
                .entry(ANALYZER_NAME)
                .or_default()
                .push(JsonFinding {
                    posn,
                    message: &diagnostic.message_text,
                });
        }
        Ok(serde_json::to_string_pretty(&grouped)?)
    }

    /// Source line followed by a caret underline of the span.
    fn format_snippet(&mut self, file: &str, start: u32, length: u32) -> Option<String> {
        let (line, column) = self.position_for(file, start)?;
        let line_start = self.line_maps.get(file)?.line_start(line - 1)? as usize;
        let source = self.sources.get(file)?;
        let line_text = source.get(line_start..)?.lines().next()?;

        let mut underline: String = line_text
            .bytes()
            .take((column - 1) as usize)
            .map(|byte| if byte == b'\t' { '\t' } else { ' ' })
            .collect();
        underline.push_str(&"^".repeat(length.max(1) as usize));

        Some(format!(
            "\n  {:>4} | {}\n       | {}",
            line,
            line_text,
            underline.red()
        ))
    }

    fn format_location(&mut self, file: &str, offset: u32) -> String {
        match self.position_for(file, offset) {
            Some((line, column)) => format!("{file}:{line}:{column}"),
            None => file.to_string(),
        }
    }

    /// 1-based line and byte column.
    fn position_for(&mut self, file: &str, offset: u32) -> Option<(u32, u32)> {
        self.ensure_source(file)?;
        if !self.line_maps.contains_key(file) {
            let source = self.sources.get(file)?;
            self.line_maps.insert(file.to_string(), LineMap::build(source));
        }
        let position = self.line_maps.get(file)?.offset_to_position(offset);
        Some((position.line + 1, position.character + 1))
    }

    fn ensure_source(&mut self, file: &str) -> Option<()> {
        if !self.sources.contains_key(file) {
            let contents = std::fs::read_to_string(file).ok()?;
            self.sources.insert(file.to_string(), contents);
        }
        Some(())
    }
}
