//! Boolean row masks.

use tracing::warn;

/// One boolean per table row.
///
/// Masks combine element-wise. When two masks of different lengths meet, the shorter one is
/// treated as `false` beyond its end and the result takes the longer length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowMask {
    /// Selection flags indexed by row.
    bits: Vec<bool>,
}

impl RowMask {
    /// A mask selecting every row.
    pub fn all(len: usize) -> Self {
        Self {
            bits: vec![true; len],
        }
    }

    /// A mask selecting no row.
    pub fn none(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    /// Builds a mask from a predicate over row indices.
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> bool) -> Self {
        Self {
            bits: (0..len).map(f).collect(),
        }
    }

    /// Number of rows covered.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns true if the mask covers no rows.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns whether `row` is selected.
    pub fn get(&self, row: usize) -> bool {
        self.bits.get(row).copied().unwrap_or(false)
    }

    /// Marks `row` as selected.
    pub fn set(&mut self, row: usize) {
        if let Some(bit) = self.bits.get_mut(row) {
            *bit = true;
        }
    }

    /// Number of selected rows.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Returns true if no row is selected.
    pub fn none_selected(&self) -> bool {
        !self.bits.iter().any(|b| *b)
    }

    /// Indices of selected rows, ascending.
    pub fn indices(&self) -> Vec<usize> {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.then_some(i))
            .collect()
    }

    /// Extends the mask with `false` so it covers at least `len` rows.
    fn align(&mut self, len: usize) {
        if self.bits.len() < len {
            warn!(
                from = self.bits.len(),
                to = len,
                "combining masks of different lengths"
            );
            self.bits.resize(len, false);
        }
    }

    /// Keeps only rows selected in both masks.
    pub fn and_assign(&mut self, other: &Self) {
        self.align(other.len());
        for (i, bit) in self.bits.iter_mut().enumerate() {
            *bit = *bit && other.get(i);
        }
    }

    /// Adds rows selected in `other`.
    pub fn or_assign(&mut self, other: &Self) {
        self.align(other.len());
        for (i, bit) in self.bits.iter_mut().enumerate() {
            *bit = *bit || other.get(i);
        }
    }

    /// Removes rows selected in `other`.
    pub fn subtract(&mut self, other: &Self) {
        for (i, bit) in self.bits.iter_mut().enumerate() {
            *bit = *bit && !other.get(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(bits: &[bool]) -> RowMask {
        RowMask {
            bits: bits.to_vec(),
        }
    }

    #[test]
    fn constructors() {
        assert_eq!(RowMask::all(3).count(), 3);
        assert!(RowMask::none(3).none_selected());
        assert_eq!(RowMask::from_fn(4, |i| i % 2 == 0).indices(), vec![0, 2]);
    }

    #[test]
    fn and_or_subtract() {
        let mut m = mask(&[true, true, false]);
        m.and_assign(&mask(&[true, false, true]));
        assert_eq!(m.indices(), vec![0]);

        m.or_assign(&mask(&[false, false, true]));
        assert_eq!(m.indices(), vec![0, 2]);

        m.subtract(&mask(&[true, false, false]));
        assert_eq!(m.indices(), vec![2]);
    }

    #[test]
    fn mismatched_lengths_pad_with_false() {
        let mut m = mask(&[true]);
        m.or_assign(&mask(&[false, false, true]));
        assert_eq!(m.len(), 3);
        assert_eq!(m.indices(), vec![0, 2]);

        let mut m = mask(&[true, true, true]);
        m.and_assign(&mask(&[true]));
        assert_eq!(m.indices(), vec![0]);

        let mut m = mask(&[true, true]);
        m.subtract(&mask(&[true]));
        assert_eq!(m.indices(), vec![1]);
    }

    #[test]
    fn set_and_get_out_of_range() {
        let mut m = RowMask::none(2);
        m.set(1);
        m.set(7);
        assert!(m.get(1));
        assert!(!m.get(7));
        assert_eq!(m.count(), 1);
    }
}
