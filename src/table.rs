//! Table data structures used by the engine.
//!
//! An [`IntervalTable`] maps each inclusive sub-range `[start, end]` of the
//! input to its optimal cell, stored flat at `start * n + end`. Only the upper
//! triangle (`start <= end`) is ever populated.

use std::fmt;

/// Inclusive sub-range `[start, end]` of the input sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Index of the first item covered.
    pub start: usize,
    /// Index of the last item covered (inclusive).
    pub end: usize,
}

#[allow(clippy::len_without_is_empty)]
impl Span {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} past end {end}");
        Self { start, end }
    }

    /// Number of original items covered by the span.
    #[inline]
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    /// True if the span covers a single original item.
    #[inline]
    pub fn is_base(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// One winning split: range `[start, end]` was built from `[start, split]`
/// and `[split + 1, end]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitDecision {
    pub start: usize,
    pub end: usize,
    pub split: usize,
}

/// A finalized table cell.
#[derive(Clone, Debug, PartialEq)]
pub struct TableEntry<C> {
    /// Optimal value for the range.
    pub cell: C,
    /// Winning split point, or `None` for a base (single-item) range.
    pub split: Option<usize>,
}

/// Write-once table of optimal cells, indexed by [`Span`].
#[derive(Clone, Debug)]
pub struct IntervalTable<C> {
    n: usize,
    entries: Vec<Option<TableEntry<C>>>,
}

impl<C> IntervalTable<C> {
    /// Allocate an empty `n x n` table.
    pub fn new(n: usize) -> Self {
        let mut entries = Vec::with_capacity(n * n);
        entries.resize_with(n * n, || None);
        Self { n, entries }
    }

    /// Number of items the table was sized for.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.n
    }

    #[inline]
    fn index(&self, span: Span) -> usize {
        assert!(
            span.start <= span.end && span.end < self.n,
            "span {span} out of bounds for {} items",
            self.n
        );
        span.start * self.n + span.end
    }

    /// Entry for `span`, if it has been computed.
    pub fn get(&self, span: Span) -> Option<&TableEntry<C>> {
        self.entries[self.index(span)].as_ref()
    }

    /// Cell for `span`, if it has been computed.
    pub fn cell(&self, span: Span) -> Option<&C> {
        self.get(span).map(|entry| &entry.cell)
    }

    /// Store the final entry for `span`.
    ///
    /// # Panics
    /// Panics if `span` was already written; every cell is computed exactly once.
    pub fn commit(&mut self, span: Span, entry: TableEntry<C>) {
        let idx = self.index(span);
        let slot = &mut self.entries[idx];
        assert!(slot.is_none(), "interval {span} written twice");
        *slot = Some(entry);
    }

    /// Entry for the whole sequence `[0, n - 1]`, once the table is complete.
    ///
    /// A zero-item table has no whole-sequence range and always returns `None`.
    pub fn root(&self) -> Option<&TableEntry<C>> {
        if self.n == 0 {
            return None;
        }
        self.get(Span::new(0, self.n - 1))
    }

    /// Number of cells written so far.
    pub fn filled(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Winning splits of the optimal structure for `span`, in pre-order
    /// (the range itself, then its left part, then its right part).
    ///
    /// # Panics
    /// Panics if a range reachable from `span` has not been computed.
    pub fn splits(&self, span: Span) -> Vec<SplitDecision> {
        let mut out = Vec::with_capacity(span.len().saturating_sub(1));
        let mut stack = vec![span];
        while let Some(current) = stack.pop() {
            let entry = self
                .get(current)
                .unwrap_or_else(|| panic!("interval {current} missing from table"));
            if let Some(k) = entry.split {
                out.push(SplitDecision {
                    start: current.start,
                    end: current.end,
                    split: k,
                });
                stack.push(Span::new(k + 1, current.end));
                stack.push(Span::new(current.start, k));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_lengths() {
        assert_eq!(Span::new(2, 2).len(), 1);
        assert!(Span::new(2, 2).is_base());
        assert_eq!(Span::new(2, 7).len(), 6);
        assert!(!Span::new(2, 7).is_base());
        assert_eq!(Span::new(0, 3).to_string(), "[0, 3]");
    }

    #[test]
    fn commit_then_read() {
        let mut t = IntervalTable::new(3);
        assert_eq!(t.filled(), 0);
        assert!(t.root().is_none());
        t.commit(Span::new(1, 1), TableEntry { cell: 'b', split: None });
        assert_eq!(t.cell(Span::new(1, 1)), Some(&'b'));
        assert!(t.get(Span::new(0, 1)).is_none());
        assert_eq!(t.filled(), 1);
    }

    #[test]
    fn zero_item_table_has_no_root() {
        let t: IntervalTable<u8> = IntervalTable::new(0);
        assert_eq!(t.num_items(), 0);
        assert_eq!(t.filled(), 0);
        assert!(t.root().is_none());
    }

    #[test]
    #[should_panic(expected = "written twice")]
    fn cells_are_write_once() {
        let mut t = IntervalTable::new(2);
        t.commit(Span::new(0, 0), TableEntry { cell: 1, split: None });
        t.commit(Span::new(0, 0), TableEntry { cell: 2, split: None });
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn rejects_spans_past_the_end() {
        let t: IntervalTable<u8> = IntervalTable::new(2);
        let _ = t.get(Span::new(1, 2));
    }

    #[test]
    fn splits_are_preorder() {
        // ((0 (1 2)) 3)
        let mut t = IntervalTable::new(4);
        for i in 0..4 {
            t.commit(Span::new(i, i), TableEntry { cell: (), split: None });
        }
        t.commit(Span::new(1, 2), TableEntry { cell: (), split: Some(1) });
        t.commit(Span::new(0, 2), TableEntry { cell: (), split: Some(0) });
        t.commit(Span::new(0, 3), TableEntry { cell: (), split: Some(2) });
        let s = t.splits(Span::new(0, 3));
        assert_eq!(
            s,
            vec![
                SplitDecision { start: 0, end: 3, split: 2 },
                SplitDecision { start: 0, end: 2, split: 0 },
                SplitDecision { start: 1, end: 2, split: 1 },
            ]
        );
        assert!(t.splits(Span::new(3, 3)).is_empty());
    }
}
