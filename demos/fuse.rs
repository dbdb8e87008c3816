//! Example: maximum-cuteness fitmon fusion.
//!
//! Run with:
//! `cargo run --example fuse`

use fitmon_dp::{solve, Fitmon};

fn main() {
    // Neighbouring affinities agree; both outer ends are 0.
    let fitmons = [
        Fitmon::new(0.0, 30, 0.6),
        Fitmon::new(0.6, 20, 0.2),
        Fitmon::new(0.2, 90, 0.9),
        Fitmon::new(0.9, 50, 0.0),
    ];

    let plan = match solve(&fitmons) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("fuse: {err}");
            std::process::exit(1);
        }
    };

    println!("Highest cuteness score: {}", plan.score);
    println!("Fusion order: {plan}");
    println!("Fusions (range -> split):");
    for s in &plan.splits {
        println!("  Fuse [{}..={}] at {}", s.start, s.end, s.split);
    }
}
