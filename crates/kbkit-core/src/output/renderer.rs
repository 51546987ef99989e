//! Table renderers for console output
//!
//! A renderer turns column names plus extracted row values into the text of
//! a table. The variant is chosen at configuration time:
//!
//! - [`PlainRenderer`]: space-aligned columns under a dashed rule
//! - [`RichRenderer`]: pipe table, optionally with bold headers
//! - [`SilentRenderer`]: renders nothing

use crate::errors::KbError;
use nu_ansi_term::Style;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::io::IsTerminal;
use std::str::FromStr;

/// Presentation options for a single table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub title: Option<String>,
    pub show_header: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            title: None,
            show_header: true,
        }
    }
}

impl TableOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn without_header(mut self) -> Self {
        self.show_header = false;
        self
    }
}

/// Capability to render a table as text
pub trait TableRenderer: fmt::Debug + Send + Sync {
    /// Render `rows` under `columns`, or `None` when nothing should be shown
    ///
    /// A table without columns is never shown.
    fn render(
        &self,
        columns: &[&str],
        rows: &[Vec<String>],
        options: &TableOptions,
    ) -> Option<String>;

    /// Silent renderers let callers skip row extraction entirely
    fn is_silent(&self) -> bool {
        false
    }
}

/// Renderer variant selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    Plain,
    Rich,
    #[default]
    Silent,
}

impl RendererKind {
    /// Instantiate the renderer; rich tables are styled only on a terminal
    pub fn build(&self) -> Box<dyn TableRenderer> {
        match self {
            RendererKind::Plain => Box::new(PlainRenderer),
            RendererKind::Rich => {
                Box::new(RichRenderer::new().with_ansi(std::io::stderr().is_terminal()))
            }
            RendererKind::Silent => Box::new(SilentRenderer),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RendererKind::Plain => "plain",
            RendererKind::Rich => "rich",
            RendererKind::Silent => "silent",
        }
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RendererKind {
    type Err = KbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(RendererKind::Plain),
            "rich" => Ok(RendererKind::Rich),
            "silent" | "none" => Ok(RendererKind::Silent),
            _ => Err(KbError::InvalidRenderer {
                value: s.to_string(),
            }),
        }
    }
}

/// Space-aligned text table
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl TableRenderer for PlainRenderer {
    fn render(
        &self,
        columns: &[&str],
        rows: &[Vec<String>],
        options: &TableOptions,
    ) -> Option<String> {
        if columns.is_empty() {
            return None;
        }
        let columns = escape_cells(columns.iter().copied());
        let rows = normalize_rows(columns.len(), rows);
        let widths = column_widths(&columns, &rows);
        let mut lines = Vec::new();

        if let Some(title) = &options.title {
            lines.push(escape_control(title).into_owned());
        }

        if options.show_header {
            lines.push(join_padded(&columns, &widths, "  "));
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            lines.push(rule.join("  "));
        }

        for row in &rows {
            lines.push(join_padded(row, &widths, "  "));
        }

        Some(lines.join("\n"))
    }
}

/// Pipe-delimited table with optional ANSI styling
#[derive(Debug, Clone, Copy, Default)]
pub struct RichRenderer {
    ansi: bool,
}

impl RichRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    fn row_line(&self, cells: &[Cow<'_, str>], widths: &[usize], bold: bool) -> String {
        let mut line = String::from("|");
        for (cell, width) in cells.iter().zip(widths) {
            let padded = format!("{:<width$}", cell, width = width);
            if bold && self.ansi {
                line.push_str(&format!(" {} |", Style::new().bold().paint(padded)));
            } else {
                line.push_str(&format!(" {} |", padded));
            }
        }
        line
    }
}

impl TableRenderer for RichRenderer {
    fn render(
        &self,
        columns: &[&str],
        rows: &[Vec<String>],
        options: &TableOptions,
    ) -> Option<String> {
        if columns.is_empty() {
            return None;
        }
        let columns = escape_cells(columns.iter().copied());
        let rows = normalize_rows(columns.len(), rows);
        let widths = column_widths(&columns, &rows);
        let mut lines = Vec::new();

        if let Some(title) = &options.title {
            let title = escape_control(title);
            if self.ansi {
                lines.push(Style::new().bold().paint(title.as_ref()).to_string());
            } else {
                lines.push(title.into_owned());
            }
        }

        if options.show_header {
            lines.push(self.row_line(&columns, &widths, true));
            let mut separator = String::from("|");
            for width in &widths {
                separator.push_str(&"-".repeat(width + 2));
                separator.push('|');
            }
            lines.push(separator);
        }

        for row in &rows {
            lines.push(self.row_line(row, &widths, false));
        }

        Some(lines.join("\n"))
    }
}

/// Renders nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentRenderer;

impl TableRenderer for SilentRenderer {
    fn render(&self, _: &[&str], _: &[Vec<String>], _: &TableOptions) -> Option<String> {
        None
    }

    fn is_silent(&self) -> bool {
        true
    }
}

/// Escape control characters so every cell stays on one line
///
/// `"a\nb"` becomes `"a\\nb"`; cells without control characters are
/// borrowed unchanged.
fn escape_control(cell: &str) -> Cow<'_, str> {
    if !cell.chars().any(char::is_control) {
        return Cow::Borrowed(cell);
    }
    let mut escaped = String::with_capacity(cell.len() + 2);
    for c in cell.chars() {
        if c.is_control() {
            escaped.extend(c.escape_debug());
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}

fn escape_cells<'a>(cells: impl Iterator<Item = &'a str>) -> Vec<Cow<'a, str>> {
    cells.map(escape_control).collect()
}

/// Pad short rows with empty cells, drop cells beyond the last column and
/// escape control characters
fn normalize_rows(column_count: usize, rows: &[Vec<String>]) -> Vec<Vec<Cow<'_, str>>> {
    rows.iter()
        .map(|row| {
            escape_cells((0..column_count).map(|i| row.get(i).map(String::as_str).unwrap_or("")))
        })
        .collect()
}

fn column_widths(columns: &[Cow<'_, str>], rows: &[Vec<Cow<'_, str>>]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn join_padded(cells: &[Cow<'_, str>], widths: &[usize], sep: &str) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    padded.join(sep).trim_end().to_string()
}
