//! Fitmon fusion by interval dynamic programming.
//!
//! Given an ordered sequence of fitmons, each a `(left_affinity, score,
//! right_affinity)` record, this crate computes the highest cuteness score
//! reachable by repeatedly fusing adjacent fitmons until one remains.
//!
//! ## Core idea
//! 1. Phrase the recurrence as an interval DP: the best value of `[i, j]` is
//!    the best combination of `[i, k]` and `[k + 1, j]` over all `k`.
//! 2. Implement the [`IntervalProblem`] trait for that recurrence.
//! 3. Let [`IntervalEngine`] fill the table by increasing range length and
//!    recover both the optimal score *and* the split structure.
//!
//! Every sub-range is considered at every split point, in O(n³) time and
//! O(n²) space. Each cell keeps only the highest-scoring fusion of its range,
//! so the answer equals the optimum over all fusion orders when every
//! affinity is non-negative: a fused score can then only grow with the scores
//! it is built from. A negative affinity breaks that, and a lower sub-range
//! score can lead to a higher final one, which the table never revisits.
//!
//! ## Quick start
//! ```
//! use fitmon_dp::{compute_max_fusion_score, solve, Fitmon};
//!
//! let fitmons = [
//!     Fitmon::new(0.0, 30, 0.6),
//!     Fitmon::new(0.6, 20, 0.2),
//!     Fitmon::new(0.2, 90, 0.9),
//!     Fitmon::new(0.9, 50, 0.0),
//! ];
//! assert_eq!(compute_max_fusion_score(&fitmons), Ok(72));
//!
//! let plan = solve(&fitmons).unwrap();
//! assert_eq!(plan.to_string(), "((0 (1 2)) 3)");
//! ```
//!
//! ## Edge cases
//! - An empty sequence is rejected with [`FusionError::EmptyInput`].
//! - A single fitmon is returned unfused; its own score is the answer.
//! - NaN or infinite affinities and negative input scores are rejected.
//! - A fusion whose real-valued score leaves the `i64` range fails with
//!   [`FusionError::ScoreOverflow`].
//!
//! ## Features
//! - `parallel`: compute the cells of wide length tiers on the rayon pool.
//! - `tracing`: emit spans for the run, the table build and each tier.

pub mod builder;
pub mod engine;
pub mod error;
pub mod problems;
pub mod table;
pub mod traits;
pub mod utils;

pub use crate::builder::IntervalEngineBuilder;
pub use crate::engine::IntervalEngine;
pub use crate::error::FusionError;
pub use crate::problems::fitmon::{compute_max_fusion_score, fuse, solve, Fitmon, FusionPlan};
pub use crate::traits::IntervalProblem;
