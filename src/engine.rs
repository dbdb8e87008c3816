//! Generic interval DP engine.
//!
//! The engine fills an [`IntervalTable`] tier by tier:
//! 1. Length 1: every `[i, i]` receives the problem's base cell.
//! 2. Lengths 2..=n: every `[i, j]` receives the best combination over all
//!    split points `k` in `i..j`, where "best" is the strictly greatest score
//!    and the lowest `k` wins ties.
//!
//! A tier only reads cells from strictly shorter tiers, so the cells of one
//! tier are independent of each other. With the `parallel` feature, wide tiers
//! are computed with rayon; the tiers themselves always run in order.
//!
//! The engine is completely generic over implementations of [`IntervalProblem`].

use crate::table::{IntervalTable, Span, SplitDecision, TableEntry};
use crate::traits::IntervalProblem;
use crate::utils::{default_parallel_threshold, tier_width};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Interval DP engine for a given problem instance `P`.
///
/// Typical usage:
/// ```
/// use fitmon_dp::{problems::fitmon::{Fitmon, FitmonFusion}, IntervalEngine};
///
/// let fitmons = [
///     Fitmon::new(0.0, 30, 0.6),
///     Fitmon::new(0.6, 20, 0.2),
///     Fitmon::new(0.2, 90, 0.9),
///     Fitmon::new(0.9, 50, 0.0),
/// ];
/// let problem = FitmonFusion::new(&fitmons).unwrap();
/// let engine = IntervalEngine::new(problem);
/// let (score, splits) = engine.run().unwrap();
/// assert_eq!(score, 72);
/// assert_eq!(splits.len(), fitmons.len() - 1);
/// ```
pub struct IntervalEngine<P: IntervalProblem> {
    problem: P,
    parallel_threshold: usize,
}

impl<P: IntervalProblem> IntervalEngine<P> {
    /// Create a new engine with the heuristic parallel threshold.
    pub fn new(problem: P) -> Self {
        let threshold = default_parallel_threshold(problem.num_items().get());
        Self::with_parallel_threshold(problem, threshold)
    }

    /// Create a new engine that parallelizes tiers at least `threshold` cells wide.
    ///
    /// Without the `parallel` feature the threshold is recorded but has no effect.
    ///
    /// # Panics
    /// Panics if `threshold == 0`.
    pub fn with_parallel_threshold(problem: P, threshold: usize) -> Self {
        assert!(threshold > 0, "parallel_threshold must be positive");
        Self {
            problem,
            parallel_threshold: threshold,
        }
    }

    /// Expose immutable reference to the underlying problem.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Expose mutable reference if callers need to adjust the instance.
    pub fn problem_mut(&mut self) -> &mut P {
        &mut self.problem
    }

    /// Return the configured parallel threshold.
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Table with every base range `[i, i]` filled and nothing else.
    fn seed_table(&self) -> IntervalTable<P::Cell> {
        let n = self.problem.num_items().get();
        let mut table = IntervalTable::new(n);
        for i in 0..n {
            table.commit(
                Span::new(i, i),
                TableEntry {
                    cell: self.problem.base_cell(i),
                    split: None,
                },
            );
        }
        table
    }

    /// Best candidate for `span` over every split point.
    ///
    /// `span` must cover at least two items and every shorter sub-range must
    /// already be in `table`.
    fn best_split(
        &self,
        table: &IntervalTable<P::Cell>,
        span: Span,
    ) -> Result<TableEntry<P::Cell>, P::Error> {
        debug_assert!(!span.is_base());
        let mut best_cell = self.combine_at(table, span, span.start)?;
        let mut best_score = self.problem.score(&best_cell);
        let mut best_k = span.start;

        for k in (span.start + 1)..span.end {
            let candidate = self.combine_at(table, span, k)?;
            let score = self.problem.score(&candidate);
            // Strict: an equal score never displaces an earlier split.
            if best_score < score {
                best_cell = candidate;
                best_score = score;
                best_k = k;
            }
        }

        Ok(TableEntry {
            cell: best_cell,
            split: Some(best_k),
        })
    }

    #[inline]
    fn combine_at(
        &self,
        table: &IntervalTable<P::Cell>,
        span: Span,
        k: usize,
    ) -> Result<P::Cell, P::Error> {
        let left = final_cell(table, Span::new(span.start, k));
        let right = final_cell(table, Span::new(k + 1, span.end));
        self.problem.combine(left, right)
    }

    /// Fill the whole table, computing each tier with `tier`.
    fn fill_with<F>(&self, tier: F) -> Result<IntervalTable<P::Cell>, P::Error>
    where
        F: Fn(&Self, &IntervalTable<P::Cell>, usize) -> Result<Vec<TableEntry<P::Cell>>, P::Error>,
    {
        let n = self.problem.num_items().get();
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("build_table", n);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut table = self.seed_table();
        for len in 2..=n {
            #[cfg(feature = "tracing")]
            let tier_span = tracing::trace_span!("fill_tier", len, width = tier_width(n, len));
            #[cfg(feature = "tracing")]
            let _tier_enter = tier_span.enter();

            let entries = tier(self, &table, len)?;
            debug_assert_eq!(entries.len(), tier_width(n, len));
            for (start, entry) in entries.into_iter().enumerate() {
                table.commit(Span::new(start, start + len - 1), entry);
            }
        }
        Ok(table)
    }

    /// Optimal score and pre-order split decisions of a completed table.
    fn extract(&self, table: &IntervalTable<P::Cell>) -> (P::Score, Vec<SplitDecision>) {
        let n = table.num_items();
        let root = table
            .root()
            .expect("a filled table always holds the full range");
        let score = self.problem.score(&root.cell);
        (score, table.splits(Span::new(0, n - 1)))
    }
}

#[inline]
fn final_cell<C>(table: &IntervalTable<C>, span: Span) -> &C {
    table
        .cell(span)
        .unwrap_or_else(|| panic!("interval {span} read before it was computed"))
}

#[cfg(feature = "parallel")]
fn compute_tier<P>(
    engine: &IntervalEngine<P>,
    table: &IntervalTable<P::Cell>,
    len: usize,
) -> Result<Vec<TableEntry<P::Cell>>, P::Error>
where
    P: IntervalProblem + Sync,
    P::Cell: Send + Sync,
    P::Error: Send,
{
    let width = tier_width(table.num_items(), len);
    let results: Vec<Result<TableEntry<P::Cell>, P::Error>> = if width >= engine.parallel_threshold
    {
        (0..width)
            .into_par_iter()
            .map(|start| engine.best_split(table, Span::new(start, start + len - 1)))
            .collect()
    } else {
        (0..width)
            .map(|start| engine.best_split(table, Span::new(start, start + len - 1)))
            .collect()
    };
    // First error by start index, independent of scheduling.
    results.into_iter().collect()
}

#[cfg(not(feature = "parallel"))]
fn compute_tier<P>(
    engine: &IntervalEngine<P>,
    table: &IntervalTable<P::Cell>,
    len: usize,
) -> Result<Vec<TableEntry<P::Cell>>, P::Error>
where
    P: IntervalProblem,
{
    let width = tier_width(table.num_items(), len);
    (0..width)
        .map(|start| engine.best_split(table, Span::new(start, start + len - 1)))
        .collect()
}

#[cfg(feature = "parallel")]
impl<P> IntervalEngine<P>
where
    P: IntervalProblem + Sync,
    P::Cell: Send + Sync,
    P::Error: Send,
{
    /// Fill the full interval table, fanning wide tiers out across the rayon pool.
    ///
    /// The result is identical to the serial build.
    pub fn build_table(&self) -> Result<IntervalTable<P::Cell>, P::Error> {
        self.fill_with(compute_tier::<P>)
    }

    /// Run the full interval DP.
    ///
    /// Returns `(optimal_score, split_decisions)`, with the splits of the
    /// optimal structure listed root first.
    pub fn run(&self) -> Result<(P::Score, Vec<SplitDecision>), P::Error> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("interval_run");
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let table = self.build_table()?;
        Ok(self.extract(&table))
    }
}

#[cfg(not(feature = "parallel"))]
impl<P: IntervalProblem> IntervalEngine<P> {
    /// Fill the full interval table (serial execution).
    pub fn build_table(&self) -> Result<IntervalTable<P::Cell>, P::Error> {
        self.fill_with(compute_tier::<P>)
    }

    /// Run the full interval DP (serial execution).
    ///
    /// Returns `(optimal_score, split_decisions)`, with the splits of the
    /// optimal structure listed root first.
    pub fn run(&self) -> Result<(P::Score, Vec<SplitDecision>), P::Error> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("interval_run");
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let table = self.build_table()?;
        Ok(self.extract(&table))
    }
}
