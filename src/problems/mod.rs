//! Problem implementations for the interval DP engine.
//!
//! These modules show how to implement [`IntervalProblem`](crate::traits::IntervalProblem)
//! for concrete recurrences:
//! - [`fitmon`] : maximum-cuteness fusion of adjacent fitmons.

pub mod fitmon;
