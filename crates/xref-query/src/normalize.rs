//! Text normalization.
//!
//! Every comparison in xref happens between normalized strings. Normalization folds case and
//! diacritics, drops characters outside a small safe set, and collapses whitespace, so that
//! `"Císco  router"` and `"CISCO ROUTER"` compare equal.

use std::{borrow::Borrow, fmt, ops::Deref};

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Text produced by [`normalize`].
///
/// Invariant: upper-case ASCII, accent-free, restricted to `[A-Z0-9 .\-_/]`, single spaces
/// between words, no leading or trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Returns the normalized text as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if normalization left nothing behind.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the space-separated words of the text.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|w| !w.is_empty())
    }
}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NormalizedText {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true for characters allowed to survive normalization.
fn is_allowed(ch: char) -> bool {
    ch.is_ascii_uppercase() || ch.is_ascii_digit() || matches!(ch, ' ' | '.' | '-' | '_' | '/')
}

/// Normalizes text for comparison.
///
/// Steps, in order:
/// 1. Unicode canonical decomposition, dropping combining marks (`É` → `E`)
/// 2. Upper-casing
/// 3. Whitespace of any kind becomes a plain space
/// 4. Characters outside `[A-Z0-9 .\-_/]` are removed
/// 5. Runs of spaces collapse to one; the result is trimmed
///
/// Total and idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> NormalizedText {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    let upper = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_uppercase);

    for ch in upper {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if !is_allowed(ch) {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }

    NormalizedText(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercases_and_strips_accents() {
        assert_eq!(normalize("Císco Routér").as_str(), "CISCO ROUTER");
        assert_eq!(normalize("ÇÃÕ àéîõü").as_str(), "CAO AEIOU");
    }

    #[test]
    fn collapses_and_trims_whitespace() {
        assert_eq!(normalize("  a \t\n  b   ").as_str(), "A B");
    }

    #[test]
    fn removes_disallowed_characters() {
        assert_eq!(normalize("48,5 V (max)!").as_str(), "485 V MAX");
        assert_eq!(normalize("tcp/ip-v4_x.y").as_str(), "TCP/IP-V4_X.Y");
    }

    #[test]
    fn space_left_by_removed_characters_collapses() {
        assert_eq!(normalize("a ( ) b").as_str(), "A B");
        assert_eq!(normalize("( a").as_str(), "A");
    }

    #[test]
    fn empty_and_symbol_only_inputs() {
        assert!(normalize("").is_empty());
        assert!(normalize("   ").is_empty());
        assert!(normalize("%%% ***").is_empty());
    }

    #[test]
    fn idempotent() {
        let samples = [
            "Císco Router 16 ports",
            "  ÁÉÍ óú  ",
            "48,5A >= 10-20",
            "ß straße",
            "tab\tseparated\nlines",
            "#\"quoted phrase\"",
        ];
        for sample in samples {
            let once = normalize(sample);
            let twice = normalize(&once);
            assert_eq!(once, twice, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn words_splits_on_spaces() {
        let text = normalize("Managed  Switch 24");
        assert_eq!(text.words().collect::<Vec<_>>(), vec!["MANAGED", "SWITCH", "24"]);
    }
}
