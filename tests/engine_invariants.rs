use std::num::NonZeroUsize;

use fitmon_dp::{
    builder::IntervalEngineBuilder,
    problems::fitmon::{Fitmon, FitmonFusion},
    solve,
    table::{Span, SplitDecision},
    IntervalEngine, IntervalProblem,
};

#[test]
fn equal_scores_keep_the_lowest_split() {
    // Every order of four (1, 1, 1) fitmons scores 4.
    let chain = vec![Fitmon::new(1.0, 1, 1.0); 4];
    let plan = solve(&chain).unwrap();
    assert_eq!(plan.score, 4);
    assert_eq!(
        plan.splits,
        vec![
            SplitDecision { start: 0, end: 3, split: 0 },
            SplitDecision { start: 1, end: 3, split: 1 },
            SplitDecision { start: 2, end: 3, split: 2 },
        ]
    );
    assert_eq!(plan.to_string(), "(0 (1 (2 3)))");
}

#[test]
fn later_split_wins_only_when_strictly_better() {
    // (0 (1 2)) = trunc(5 * 1.0 + 10 * 0.0) = 5, ((0 1) 2) = trunc(5 * 1.0 + 10 * 1.0) = 15
    let chain = [
        Fitmon::new(1.0, 5, 1.0),
        Fitmon::new(0.0, 0, 1.0),
        Fitmon::new(1.0, 10, 1.0),
    ];
    let engine = IntervalEngine::new(FitmonFusion::new(&chain).unwrap());
    let table = engine.build_table().unwrap();
    let root = table.root().unwrap();
    assert_eq!(root.split, Some(1));
    assert_eq!(root.cell.score, 15);
}

#[test]
fn base_cells_are_the_inputs() {
    let chain = [
        Fitmon::new(0.1, 3, 0.2),
        Fitmon::new(0.3, 4, 0.4),
        Fitmon::new(0.5, 5, 0.6),
    ];
    let engine = IntervalEngine::new(FitmonFusion::new(&chain).unwrap());
    let table = engine.build_table().unwrap();
    for (i, f) in chain.iter().enumerate() {
        assert_eq!(table.cell(Span::new(i, i)), Some(f));
    }
    assert_eq!(table.filled(), 6);
}

#[test]
fn builder_and_new_agree() {
    let chain: Vec<Fitmon> = (0..20)
        .map(|i| Fitmon::new((i % 7) as f64 / 7.0, (i * 13 % 50) as i64, (i % 5) as f64 / 5.0))
        .collect();
    let a = IntervalEngine::new(FitmonFusion::new(&chain).unwrap())
        .run()
        .unwrap();
    let b = IntervalEngineBuilder::new(FitmonFusion::new(&chain).unwrap())
        .with_parallel_threshold(1)
        .build()
        .run()
        .unwrap();
    let c = IntervalEngineBuilder::new(FitmonFusion::new(&chain).unwrap())
        .serial()
        .build()
        .run()
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn single_item_problem_runs() {
    struct One;
    impl IntervalProblem for One {
        type Cell = i32;
        type Score = i32;
        type Error = ();
        fn num_items(&self) -> NonZeroUsize {
            NonZeroUsize::MIN
        }
        fn base_cell(&self, _index: usize) -> i32 {
            7
        }
        fn combine(&self, _left: &i32, _right: &i32) -> Result<i32, ()> {
            Err(())
        }
        fn score(&self, cell: &i32) -> i32 {
            *cell
        }
    }
    let (score, splits) = IntervalEngine::new(One).run().unwrap();
    assert_eq!(score, 7);
    assert!(splits.is_empty());
}
