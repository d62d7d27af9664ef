//! Query decomposition.
//!
//! Splits a raw query string into its negated atoms and an OR-of-AND structure of positive
//! atoms:
//!
//! ```text
//! query       → or_segment (("|" | "/") or_segment)*
//! or_segment  → and_atom (" + " and_atom)*
//! and_atom    → negated | atom
//! negated     → "#" (PHRASE | WORD)
//! ```
//!
//! Negations are lifted out first, wherever they appear. `|` is the OR separator when present
//! outside quotes, otherwise `/`. Separators inside double quotes are ignored, so quoting keeps a
//! phrase intact.

use std::{iter::Peekable, str::CharIndices};

use crate::error::{QueryError, QueryErrorKind};

/// How the positive part of a query was split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// No OR separator was present: a single AND group.
    And,
    /// An OR separator was present: one AND group per segment.
    Or,
}

/// The structural pieces of a raw query.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    /// Negated atoms in order of appearance, quotes stripped, duplicates removed.
    pub negations: Vec<String>,
    /// The query with negations removed and dangling operators trimmed.
    pub positive: String,
    /// Whether the positive part was split on an OR separator.
    pub mode: SplitMode,
    /// OR segments, each a list of AND atoms with quotes stripped. Empty when `positive` is.
    pub segments: Vec<Vec<String>>,
    /// Problems found while scanning.
    pub diagnostics: Vec<QueryError>,
}

/// Scans a query, lifting `#` negations out of it.
struct NegationScanner<'a> {
    /// The original input string.
    input: &'a str,
    /// Character iterator with byte offsets and one-character lookahead.
    chars: Peekable<CharIndices<'a>>,
    /// Text left after removing negations.
    remainder: String,
    /// Negated atoms found so far.
    negations: Vec<String>,
    /// Problems found so far.
    diagnostics: Vec<QueryError>,
}

impl<'a> NegationScanner<'a> {
    /// Creates a scanner over `input`.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            remainder: String::with_capacity(input.len()),
            negations: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Records a diagnostic at a byte position.
    fn diagnose(&mut self, kind: QueryErrorKind, position: usize) {
        self.diagnostics
            .push(QueryError::new(kind, Some(position), self.input));
    }

    /// Runs the scan to completion.
    fn scan(mut self) -> (String, Vec<String>, Vec<QueryError>) {
        let mut in_quote: Option<usize> = None;
        let mut prev: Option<char> = None;

        while let Some((pos, ch)) = self.chars.next() {
            match ch {
                '"' => {
                    in_quote = match in_quote {
                        Some(_) => None,
                        None => Some(pos),
                    };
                    self.remainder.push(ch);
                }
                '#' if in_quote.is_none() && starts_token(prev) => {
                    self.read_negation(pos);
                    // Keep the splice point a token boundary.
                    self.remainder.push(' ');
                    prev = Some(' ');
                    continue;
                }
                _ => self.remainder.push(ch),
            }
            prev = Some(ch);
        }

        if let Some(pos) = in_quote {
            self.diagnose(QueryErrorKind::UnclosedQuote, pos);
        }

        (self.remainder, self.negations, self.diagnostics)
    }

    /// Reads the word or phrase following a `#` at `start`.
    fn read_negation(&mut self, start: usize) {
        let text = if self.chars.next_if(|&(_, c)| c == '"').is_some() {
            self.read_phrase(start)
        } else {
            self.read_word()
        };

        let text = text.trim();
        if text.is_empty() {
            self.diagnose(QueryErrorKind::EmptyNegation, start);
        } else if !self.negations.iter().any(|n| n == text) {
            self.negations.push(text.to_string());
        }
    }

    /// Reads a phrase up to the closing quote, or to the end of input if unclosed.
    fn read_phrase(&mut self, start: usize) -> String {
        let mut phrase = String::new();
        loop {
            match self.chars.next() {
                Some((_, '"')) => return phrase,
                Some((_, c)) => phrase.push(c),
                None => {
                    self.diagnose(QueryErrorKind::UnclosedQuote, start + 1);
                    return phrase;
                }
            }
        }
    }

    /// Reads a bare word up to whitespace, a quote or an OR separator.
    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some((_, c)) = self
            .chars
            .next_if(|&(_, c)| !c.is_whitespace() && !matches!(c, '"' | '|' | '/'))
        {
            word.push(c);
        }
        word
    }
}

/// Returns true if a `#` following `prev` begins a new token.
fn starts_token(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '|' | '/' | '+'),
    }
}

/// Splits `text` on every `sep` that is outside double quotes.
fn split_outside_quotes(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quote = false;
    let mut start = 0;
    for (pos, ch) in text.char_indices() {
        if ch == '"' {
            in_quote = !in_quote;
        } else if ch == sep && !in_quote {
            parts.push(&text[start..pos]);
            start = pos + ch.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Returns true if `sep` occurs outside double quotes.
fn contains_outside_quotes(text: &str, sep: char) -> bool {
    split_outside_quotes(text, sep).len() > 1
}

/// Splits `text` into whitespace-separated tokens, keeping quoted runs together.
fn tokens_outside_quotes(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut in_quote = false;
    let mut start: Option<usize> = None;
    for (pos, ch) in text.char_indices() {
        if ch == '"' {
            in_quote = !in_quote;
        }
        if ch.is_whitespace() && !in_quote {
            if let Some(s) = start.take() {
                tokens.push(&text[s..pos]);
            }
        } else if start.is_none() {
            start = Some(pos);
        }
    }
    if let Some(s) = start {
        tokens.push(&text[s..]);
    }
    tokens
}

/// Operator tokens that cannot stand at the edges of a query.
fn is_operator_token(token: &str) -> bool {
    matches!(token, "+" | "|" | "/")
}

/// Collapses whitespace outside quotes and trims operators left dangling at either end.
fn clean_positive(text: &str) -> String {
    let mut tokens = tokens_outside_quotes(text);
    while tokens.first().is_some_and(|t| is_operator_token(t)) {
        tokens.remove(0);
    }
    while tokens.last().is_some_and(|t| is_operator_token(t)) {
        tokens.pop();
    }
    tokens.join(" ")
}

/// Splits one OR segment into its AND atoms on standalone `+` tokens.
fn split_and(segment: &str) -> Vec<String> {
    let mut atoms = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for token in tokens_outside_quotes(segment) {
        if token == "+" {
            if !current.is_empty() {
                atoms.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(token);
        }
    }
    if !current.is_empty() {
        atoms.push(current.join(" "));
    }
    atoms.into_iter().map(|a| strip_quotes(&a)).collect()
}

/// Removes double quotes from an atom.
fn strip_quotes(atom: &str) -> String {
    atom.replace('"', "").trim().to_string()
}

/// Decomposes a raw query string.
pub fn decompose(input: &str) -> Decomposition {
    let (remainder, negations, diagnostics) = NegationScanner::new(input).scan();
    let positive = clean_positive(&remainder);

    let separator = if contains_outside_quotes(&positive, '|') {
        Some('|')
    } else if contains_outside_quotes(&positive, '/') {
        Some('/')
    } else {
        None
    };

    let (mode, raw_segments) = match separator {
        Some(sep) => (SplitMode::Or, split_outside_quotes(&positive, sep)),
        None => (SplitMode::And, vec![positive.as_str()]),
    };

    let segments = raw_segments
        .into_iter()
        .map(split_and)
        .filter(|atoms| !atoms.is_empty())
        .collect();

    Decomposition {
        negations,
        positive,
        mode,
        segments,
        diagnostics,
    }
}
