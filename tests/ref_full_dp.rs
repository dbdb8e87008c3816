use fitmon_dp::{
    compute_max_fusion_score, fuse, solve,
    problems::fitmon::{Fitmon, FitmonFusion},
    table::Span,
    utils::catalan,
    IntervalEngine,
};
use proptest::prelude::*;

/// Every fused fitmon reachable from `[i, j]`, one per parenthesization.
fn all_fusions(chain: &[Fitmon], i: usize, j: usize) -> Vec<Fitmon> {
    if i == j {
        return vec![chain[i]];
    }
    let mut out = Vec::new();
    for k in i..j {
        let left = all_fusions(chain, i, k);
        let right = all_fusions(chain, k + 1, j);
        for l in &left {
            for r in &right {
                out.push(fuse(l, r).unwrap());
            }
        }
    }
    out
}

fn exhaustive_best(chain: &[Fitmon]) -> i64 {
    all_fusions(chain, 0, chain.len() - 1)
        .iter()
        .map(|f| f.score)
        .max()
        .unwrap()
}

/// Non-negative affinities only: there a fused score never decreases as
/// either input score grows, so keeping each range's best cell is exact.
fn fitmon() -> impl Strategy<Value = Fitmon> {
    (0.0f64..=1.0, 0i64..200, 0.0f64..=1.0).prop_map(Fitmon::from)
}

#[test]
fn negative_affinity_can_beat_the_table() {
    // Keeping only each range's best cell loses the order worth 10 here.
    let chain = [
        Fitmon::new(-0.5, 2, 2.0),
        Fitmon::new(-0.5, 0, -0.5),
        Fitmon::new(2.0, 8, -0.5),
        Fitmon::new(1.0, 8, 0.5),
    ];
    assert_eq!(compute_max_fusion_score(&chain), Ok(6));
    assert_eq!(exhaustive_best(&chain), 10);

    let plan = solve(&chain).unwrap();
    assert_eq!(plan.score, 6);
    assert_eq!(plan.to_string(), "((0 1) (2 3))");
}

proptest! {
    #[test]
    fn matches_every_parenthesization(chain in prop::collection::vec(fitmon(), 1..=6)) {
        let all = all_fusions(&chain, 0, chain.len() - 1);
        prop_assert_eq!(all.len() as u128, catalan(chain.len()).unwrap());
        prop_assert_eq!(compute_max_fusion_score(&chain).unwrap(), exhaustive_best(&chain));
    }

    #[test]
    fn single_fitmon_is_its_own_score(
        a in -10.0f64..10.0,
        s in 0i64..1_000_000,
        b in -10.0f64..10.0,
    ) {
        prop_assert_eq!(compute_max_fusion_score(&[Fitmon::new(a, s, b)]).unwrap(), s);
    }

    #[test]
    fn two_fitmons_follow_the_formula(l in fitmon(), r in fitmon()) {
        let expected = (l.score as f64 * l.right_affinity + r.score as f64 * r.left_affinity)
            .trunc() as i64;
        prop_assert_eq!(compute_max_fusion_score(&[l, r]).unwrap(), expected);
    }

    #[test]
    fn table_cells_are_optimal_and_first_found(chain in prop::collection::vec(fitmon(), 1..=8)) {
        let n = chain.len();
        let engine = IntervalEngine::new(FitmonFusion::new(&chain).unwrap());
        let table = engine.build_table().unwrap();
        prop_assert_eq!(table.filled(), n * (n + 1) / 2);

        for (i, f) in chain.iter().enumerate() {
            let entry = table.get(Span::new(i, i)).unwrap();
            prop_assert_eq!(&entry.cell, f);
            prop_assert_eq!(entry.split, None);
        }

        for len in 2..=n {
            for i in 0..=(n - len) {
                let j = i + len - 1;
                let entry = table.get(Span::new(i, j)).unwrap();
                let chosen = entry.split.unwrap();
                prop_assert!(chosen >= i && chosen < j);
                for k in i..j {
                    let l = table.cell(Span::new(i, k)).unwrap();
                    let r = table.cell(Span::new(k + 1, j)).unwrap();
                    let candidate = fuse(l, r).unwrap();
                    if k < chosen {
                        prop_assert!(candidate.score < entry.cell.score);
                    } else if k == chosen {
                        prop_assert_eq!(candidate, entry.cell);
                    } else {
                        prop_assert!(candidate.score <= entry.cell.score);
                    }
                }
            }
        }
    }

    #[test]
    fn split_list_covers_every_fusion(chain in prop::collection::vec(fitmon(), 1..=12)) {
        let engine = IntervalEngine::new(FitmonFusion::new(&chain).unwrap());
        let (score, splits) = engine.run().unwrap();
        prop_assert_eq!(splits.len(), chain.len() - 1);
        if let Some(root) = splits.first() {
            prop_assert_eq!((root.start, root.end), (0, chain.len() - 1));
        }
        prop_assert_eq!(score, compute_max_fusion_score(&chain).unwrap());
    }
}
