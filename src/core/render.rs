// LogTint - core/render.rs
//
// Text renderers: ANSI terminal colour, standalone HTML, and plain text.
// Core layer: writes to any Write trait object, never opens files.

use crate::core::model::{ClassificationResult, ClassifiedDocument, TokenKind};
use crate::core::segment::{flatten, Segment};
use crate::core::style::{Theme, TokenStyle};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

// =============================================================================
// Output selection
// =============================================================================

/// What the CLI writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Text with 24-bit ANSI colour codes.
    #[default]
    Ansi,
    /// Standalone HTML document.
    Html,
    /// Span list as JSON.
    Json,
    /// Span list as CSV.
    Csv,
    /// Text unchanged.
    Plain,
}

impl OutputFormat {
    pub fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Ansi,
            OutputFormat::Html,
            OutputFormat::Json,
            OutputFormat::Csv,
            OutputFormat::Plain,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Ansi => "ansi",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Plain => "plain",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|f| f.name() == lower)
            .ok_or_else(|| format!("unknown output format '{s}' (expected ansi, html, json, csv or plain)"))
    }
}

/// When ANSI colour is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColourMode {
    /// Only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColourMode {
    /// Resolve against whether the destination is a terminal.
    pub fn enabled(&self, is_terminal: bool) -> bool {
        match self {
            ColourMode::Auto => is_terminal,
            ColourMode::Always => true,
            ColourMode::Never => false,
        }
    }
}

impl FromStr for ColourMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ColourMode::Auto),
            "always" => Ok(ColourMode::Always),
            "never" => Ok(ColourMode::Never),
            _ => Err(format!(
                "unknown colour mode '{s}' (expected auto, always or never)"
            )),
        }
    }
}

// =============================================================================
// ANSI
// =============================================================================

const ANSI_RESET: &str = "\x1b[0m";

/// SGR sequence selecting `style`.
pub fn ansi_sequence(style: &TokenStyle) -> String {
    let mut params: Vec<String> = Vec::with_capacity(3);
    if style.bold {
        params.push("1".to_string());
    }
    if style.italic {
        params.push("3".to_string());
    }
    let c = style.colour;
    params.push(format!("38;2;{};{};{}", c.r, c.g, c.b));
    format!("\x1b[{}m", params.join(";"))
}

/// Write `text` with ANSI colour codes for every classified segment.
///
/// Styles are closed at each newline and reopened on the next line so
/// pagers that reset state per line (e.g. `less -R`) show them correctly.
pub fn render_ansi<W: Write>(
    text: &str,
    result: &ClassificationResult,
    theme: &Theme,
    writer: &mut W,
) -> io::Result<()> {
    for Segment { start, end, kind } in flatten(text.len(), result) {
        let piece = &text[start..end];
        let Some(kind) = kind else {
            writer.write_all(piece.as_bytes())?;
            continue;
        };

        let open = ansi_sequence(theme.style(kind));
        let mut lines = piece.split('\n').peekable();
        while let Some(line) = lines.next() {
            if !line.is_empty() {
                write!(writer, "{open}{line}{ANSI_RESET}")?;
            }
            if lines.peek().is_some() {
                writer.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

/// Write `text` unchanged.
pub fn render_plain<W: Write>(text: &str, writer: &mut W) -> io::Result<()> {
    writer.write_all(text.as_bytes())
}

// =============================================================================
// HTML
// =============================================================================

/// Escape text for HTML element content and attribute values.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn css_declarations(style: &TokenStyle) -> String {
    let mut css = format!("color:{}", style.colour);
    if style.bold {
        css.push_str(";font-weight:bold");
    }
    if style.italic {
        css.push_str(";font-style:italic");
    }
    css
}

/// Write a standalone HTML page with one `<pre>` block per document.
pub fn render_html<W: Write>(
    documents: &[ClassifiedDocument],
    theme: &Theme,
    title: &str,
    writer: &mut W,
) -> io::Result<()> {
    writeln!(writer, "<!DOCTYPE html>")?;
    writeln!(writer, "<html lang=\"en\">")?;
    writeln!(writer, "<head>")?;
    writeln!(writer, "<meta charset=\"utf-8\">")?;
    writeln!(writer, "<title>{}</title>", html_escape(title))?;
    writeln!(writer, "<style>")?;
    writeln!(
        writer,
        "body {{ background: #1E1E1E; color: #D4D4D4; font-family: sans-serif; }}"
    )?;
    writeln!(
        writer,
        "pre {{ font-family: Consolas, 'DejaVu Sans Mono', monospace; white-space: pre-wrap; }}"
    )?;
    for kind in TokenKind::all() {
        writeln!(
            writer,
            ".tok-{} {{ {}; }}",
            kind.config_key(),
            css_declarations(theme.style(*kind))
        )?;
    }
    writeln!(writer, "</style>")?;
    writeln!(writer, "</head>")?;
    writeln!(writer, "<body>")?;

    for doc in documents {
        if documents.len() > 1 {
            writeln!(writer, "<h2>{}</h2>", html_escape(&doc.source))?;
        }
        write!(writer, "<pre>")?;
        write_html_body(&doc.text, &doc.result, writer)?;
        writeln!(writer, "</pre>")?;
    }

    writeln!(writer, "</body>")?;
    writeln!(writer, "</html>")?;
    Ok(())
}

fn write_html_body<W: Write>(
    text: &str,
    result: &ClassificationResult,
    writer: &mut W,
) -> io::Result<()> {
    for Segment { start, end, kind } in flatten(text.len(), result) {
        let escaped = html_escape(&text[start..end]);
        match kind {
            Some(kind) => write!(
                writer,
                "<span class=\"tok-{}\">{escaped}</span>",
                kind.config_key()
            )?,
            None => writer.write_all(escaped.as_bytes())?,
        }
    }
    Ok(())
}
