//! Terminal colors and highlighting for xref.
//!
//! Provides syntax-highlighted TOML for `xref config`, styled headers and status messages,
//! and [`highlight_terms`] for marking matched words inside result cells.

#![warn(missing_docs)]

use std::collections::HashSet;

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};
use xref_query::normalize;

/// A syntax highlighter for terminal output.
pub struct Highlighter {
    /// Language definitions (including TOML from the two-face extras).
    syntax_set: SyntaxSet,
    /// Color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// The theme to use.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a new highlighter with the default theme (Dracula).
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML content for terminal output.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights content with the specified syntax for terminal output.
    ///
    /// Unknown syntaxes are rendered as plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self.theme_set.get(self.theme);
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (for headers).
    pub const CYAN: &str = "\x1b[36m";
    /// Green text (for success).
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text (for warnings).
    pub const YELLOW: &str = "\x1b[33m";
    /// Red text (for errors).
    pub const RED: &str = "\x1b[31m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    format!("{}{}{}{}", colors::BOLD, colors::CYAN, text, colors::RESET)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a success message (green).
pub fn success(text: &str) -> String {
    format!("{}{}{}", colors::GREEN, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}

/// Formats text as an error (red).
pub fn error(text: &str) -> String {
    format!("{}{}{}", colors::RED, text, colors::RESET)
}

/// Formats a matched term (bold yellow).
pub fn matched(text: &str) -> String {
    format!("{}{}{}{}", colors::BOLD, colors::YELLOW, text, colors::RESET)
}

/// Indents every line of `content` by three spaces.
pub fn indent_content(content: &str) -> String {
    content
        .lines()
        .map(|line| format!("   {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Marks every whitespace-delimited word of `text` whose normalized form is one of `terms`.
///
/// Terms are compared after normalization, so `Routér,` is marked for the term `ROUTER`. The
/// original spelling and spacing of `text` are kept.
pub fn highlight_terms<S: AsRef<str>>(text: &str, terms: &[S]) -> String {
    let wanted: HashSet<String> = terms
        .iter()
        .flat_map(|t| {
            normalize(t.as_ref())
                .words()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();
    if wanted.is_empty() {
        return text.to_string();
    }

    let mut output = String::with_capacity(text.len());
    let mut word_start = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(start) = word_start.take() {
                push_word(&mut output, &text[start..i], &wanted);
            }
            output.push(c);
        } else if word_start.is_none() {
            word_start = Some(i);
        }
    }
    if let Some(start) = word_start {
        push_word(&mut output, &text[start..], &wanted);
    }
    output
}

/// Appends one word, marked if its normalized form is wanted.
fn push_word(output: &mut String, word: &str, wanted: &HashSet<String>) {
    let normalized = normalize(word);
    if !normalized.is_empty() && wanted.contains(normalized.as_str()) {
        output.push_str(&matched(word));
    } else {
        output.push_str(word);
    }
}
