//! Fitmon fusion as an interval DP instance.
//!
//! A fitmon is a `(left_affinity, score, right_affinity)` record. Fusing two
//! adjacent fitmons keeps the outer affinities and scores
//! `trunc(left.score * left.right_affinity + right.score * right.left_affinity)`.
//! Truncation toward zero happens at every fusion, so later fusions consume
//! the integer score, never the real-valued one.
//!
//! The optimal fusion of the whole sequence is found by trying every split
//! point of every sub-range, shortest ranges first.

use std::fmt;
use std::num::NonZeroUsize;

use crate::engine::IntervalEngine;
use crate::error::{AffinitySide, FusionError};
use crate::table::{Span, SplitDecision};
use crate::traits::IntervalProblem;

/// One fusable unit: an input fitmon, or the optimal fusion of a sub-range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fitmon {
    /// Becomes the left affinity of a fusion where this fitmon is the left operand.
    pub left_affinity: f64,
    /// Cuteness score.
    pub score: i64,
    /// Becomes the right affinity of a fusion where this fitmon is the right operand.
    pub right_affinity: f64,
}

impl Fitmon {
    pub const fn new(left_affinity: f64, score: i64, right_affinity: f64) -> Self {
        Self {
            left_affinity,
            score,
            right_affinity,
        }
    }
}

impl From<(f64, i64, f64)> for Fitmon {
    fn from((left_affinity, score, right_affinity): (f64, i64, f64)) -> Self {
        Self::new(left_affinity, score, right_affinity)
    }
}

/// Fuse `left` with its right-hand neighbour `right`.
///
/// # Errors
/// [`FusionError::ScoreOverflow`] if the real-valued score is not finite or
/// does not fit in an `i64` after truncation.
pub fn fuse(left: &Fitmon, right: &Fitmon) -> Result<Fitmon, FusionError> {
    let raw =
        left.score as f64 * left.right_affinity + right.score as f64 * right.left_affinity;
    Ok(Fitmon {
        left_affinity: left.left_affinity,
        score: truncate_score(raw)?,
        right_affinity: right.right_affinity,
    })
}

/// Truncate toward zero into an `i64`, rejecting values with no `i64` image.
fn truncate_score(raw: f64) -> Result<i64, FusionError> {
    // 2^63, exactly representable as f64.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    let t = raw.trunc();
    if t.is_finite() && (-BOUND..BOUND).contains(&t) {
        Ok(t as i64)
    } else {
        Err(FusionError::ScoreOverflow { value: raw })
    }
}

/// Check the input contract: non-empty, finite affinities, non-negative scores.
///
/// Errors name the first offending record.
pub fn validate(fitmons: &[Fitmon]) -> Result<NonZeroUsize, FusionError> {
    let n = NonZeroUsize::new(fitmons.len()).ok_or(FusionError::EmptyInput)?;
    for (index, f) in fitmons.iter().enumerate() {
        if !f.left_affinity.is_finite() {
            return Err(FusionError::NonFiniteAffinity {
                index,
                side: AffinitySide::Left,
                value: f.left_affinity,
            });
        }
        if !f.right_affinity.is_finite() {
            return Err(FusionError::NonFiniteAffinity {
                index,
                side: AffinitySide::Right,
                value: f.right_affinity,
            });
        }
        if f.score < 0 {
            return Err(FusionError::NegativeScore {
                index,
                score: f.score,
            });
        }
    }
    Ok(n)
}

/// Fitmon fusion instance: a validated, owned copy of the input sequence.
#[derive(Clone, Debug)]
pub struct FitmonFusion {
    fitmons: Vec<Fitmon>,
    n: NonZeroUsize,
}

impl FitmonFusion {
    /// Validate `fitmons` and take a private copy; the caller's slice is untouched.
    pub fn new(fitmons: &[Fitmon]) -> Result<Self, FusionError> {
        let n = validate(fitmons)?;
        Ok(Self {
            fitmons: fitmons.to_vec(),
            n,
        })
    }

    pub fn fitmons(&self) -> &[Fitmon] {
        &self.fitmons
    }
}

impl IntervalProblem for FitmonFusion {
    type Cell = Fitmon;
    type Score = i64;
    type Error = FusionError;

    fn num_items(&self) -> NonZeroUsize {
        self.n
    }

    fn base_cell(&self, index: usize) -> Self::Cell {
        self.fitmons[index]
    }

    fn combine(&self, left: &Self::Cell, right: &Self::Cell) -> Result<Self::Cell, Self::Error> {
        fuse(left, right)
    }

    fn score(&self, cell: &Self::Cell) -> Self::Score {
        cell.score
    }
}

/// Optimal fusion of a whole sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct FusionPlan {
    /// Maximum cuteness score.
    pub score: i64,
    /// The single fitmon left after all fusions.
    pub fused: Fitmon,
    /// Winning splits, root first, then the left part, then the right part.
    pub splits: Vec<SplitDecision>,
    num_items: usize,
}

impl FusionPlan {
    /// Length of the input sequence.
    pub fn num_items(&self) -> usize {
        self.num_items
    }
}

/// Renders the fusion order as a parenthesization of input indices,
/// e.g. `((0 (1 2)) 3)`.
impl fmt::Display for FusionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut splits = self.splits.iter();
        render(f, Span::new(0, self.num_items - 1), &mut splits)
    }
}

fn render(
    f: &mut fmt::Formatter<'_>,
    span: Span,
    splits: &mut std::slice::Iter<'_, SplitDecision>,
) -> fmt::Result {
    if span.is_base() {
        return write!(f, "{}", span.start);
    }
    let k = match splits.next() {
        Some(d) if d.start == span.start && d.end == span.end => d.split,
        _ => return Err(fmt::Error),
    };
    f.write_str("(")?;
    render(f, Span::new(span.start, k), splits)?;
    f.write_str(" ")?;
    render(f, Span::new(k + 1, span.end), splits)?;
    f.write_str(")")
}

/// Maximum cuteness score reachable by fusing the whole sequence into one fitmon.
///
/// Each sub-range keeps only its highest-scoring fusion. With non-negative
/// affinities that is the optimum over every fusion order. Negative
/// affinities are accepted, but then the result can fall below that optimum:
/// a lower intermediate score multiplied by a negative affinity may have led
/// to a higher final score.
///
/// # Errors
/// [`FusionError::EmptyInput`] for an empty slice, the other invalid-input
/// variants for malformed records, and [`FusionError::ScoreOverflow`] if an
/// intermediate fusion leaves the `i64` range.
pub fn compute_max_fusion_score(fitmons: &[Fitmon]) -> Result<i64, FusionError> {
    let engine = IntervalEngine::new(FitmonFusion::new(fitmons)?);
    let (score, _splits) = engine.run()?;
    Ok(score)
}

/// Like [`compute_max_fusion_score`], but also returns the fused fitmon and
/// the fusion order that achieves the score.
///
/// The same caveat applies: the order is optimal over all fusion orders only
/// when every affinity is non-negative.
pub fn solve(fitmons: &[Fitmon]) -> Result<FusionPlan, FusionError> {
    let engine = IntervalEngine::new(FitmonFusion::new(fitmons)?);
    let table = engine.build_table()?;
    let whole = Span::new(0, fitmons.len() - 1);
    let fused = *table
        .cell(whole)
        .expect("a filled table always holds the full range");
    Ok(FusionPlan {
        score: fused.score,
        fused,
        splits: table.splits(whole),
        num_items: fitmons.len(),
    })
}
