//! Term extraction from matched dictionary rows.

use std::collections::BTreeSet;

use xref_query::normalize;
use xref_table::Table;

/// Returns true if a word is worth searching for in the description stage.
///
/// Pure digits, words shorter than `min_len` characters and words with no letter or digit
/// are dropped.
fn keep_word(word: &str, min_len: usize) -> bool {
    word.chars().count() >= min_len.max(1)
        && !word.chars().all(|c| c.is_ascii_digit())
        && word.chars().any(|c| c.is_ascii_alphanumeric())
}

/// Collects the distinct normalized words of every cell in `rows`.
///
/// The result is sorted so the derived query is deterministic.
pub fn extract_terms(table: &Table, rows: &[usize], min_len: usize) -> BTreeSet<String> {
    let mut terms = BTreeSet::new();
    for &row in rows {
        let Some(cells) = table.row(row) else {
            continue;
        };
        for cell in cells {
            let normalized = normalize(cell);
            for word in normalized.words() {
                if keep_word(word, min_len) {
                    terms.insert(word.to_string());
                }
            }
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_filter() {
        assert!(keep_word("ROUTER", 2));
        assert!(keep_word("RJ-45", 2));
        assert!(keep_word("12V", 2));
        assert!(!keep_word("16", 2));
        assert!(!keep_word("A", 2));
        assert!(!keep_word("--", 2));
        assert!(!keep_word("AB", 3));
    }

    #[test]
    fn zero_min_length_still_drops_empty() {
        assert!(!keep_word("", 0));
        assert!(keep_word("A", 0));
    }

    #[test]
    fn extracts_distinct_words_from_all_cells() {
        let table = Table::from_rows(
            ["term", "note"],
            [
                vec!["Router", "Cisco 16 ports"],
                vec!["Switch", "ignored"],
                vec!["Roteador", "Cisco"],
            ],
        )
        .unwrap();

        let terms = extract_terms(&table, &[0, 2, 9], 2);
        assert_eq!(
            terms.into_iter().collect::<Vec<_>>(),
            vec!["CISCO", "PORTS", "ROTEADOR", "ROUTER"]
        );
    }

    #[test]
    fn no_rows_no_terms() {
        let table = Table::from_rows(["term"], [vec!["x"]]).unwrap();
        assert!(extract_terms(&table, &[], 2).is_empty());
        assert!(extract_terms(&table, &[0], 2).is_empty());
    }
}
