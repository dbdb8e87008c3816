use crate::utils::default_parallel_threshold;
use crate::{IntervalEngine, IntervalProblem};

/// Builder for [`IntervalEngine`]; the parallel threshold is the only knob.
pub struct IntervalEngineBuilder<P: IntervalProblem> {
    problem: P,
    parallel_threshold: Option<usize>,
}

impl<P: IntervalProblem> IntervalEngineBuilder<P> {
    pub fn new(problem: P) -> Self {
        Self {
            problem,
            parallel_threshold: None,
        }
    }

    /// Tiers at least this wide are split across threads when `parallel` is enabled.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = Some(threshold);
        self
    }

    /// Never split a tier, even with the `parallel` feature enabled.
    pub fn serial(mut self) -> Self {
        self.parallel_threshold = Some(usize::MAX);
        self
    }

    pub fn build(self) -> IntervalEngine<P> {
        match self.parallel_threshold {
            Some(t) => IntervalEngine::with_parallel_threshold(self.problem, t),
            None => {
                let n = self.problem.num_items().get();
                let t = default_parallel_threshold(n);
                IntervalEngine::with_parallel_threshold(self.problem, t)
            }
        }
    }
}
