use std::env;
use std::time::Instant;

use fitmon_dp::problems::fitmon::{Fitmon, FitmonFusion};
use fitmon_dp::utils::catalan;
use fitmon_dp::{FusionError, IntervalEngine};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

/// Largest input for which every parenthesization is enumerated.
const EXHAUSTIVE_LIMIT: usize = 9;

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("fusion_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Fitmon Fusion Probe: Performance and Correctness Testing");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
    eprintln!("Runs the interval DP on deterministic fitmon chains and checks:");
    eprintln!(
        "  • Correctness: exhaustive enumeration (n <= {EXHAUSTIVE_LIMIT}) or a nested-Vec baseline (n <= {})",
        options.verify_limit
    );
    eprintln!("  • Performance: wall-clock time and memory growth with n (O(n³) time, O(n²) cells)");
    eprintln!();
    eprintln!("{}", "=".repeat(80));
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/2] Small chains against every fusion order...");
    measurements.extend(run_exhaustive(&mut sys));
    eprintln!();

    eprintln!("[2/2] Growing chains against the baseline table...");
    measurements.extend(run_scaling(&options, &mut sys));
    eprintln!();

    print_summary(&measurements, &options);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("fusion_probe output error: {err}");
        std::process::exit(1);
    }
    if measurements
        .iter()
        .any(|m| matches!(m.check, Check::Failed(_)))
    {
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 256usize;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --format".to_string())?
                    .into();
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--verify-limit=") {
                verify_limit = parse_limit(value)?;
            } else if arg == "--verify-limit" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --verify-limit".to_string())?
                    .into();
                verify_limit = parse_limit(&value)?;
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            format,
            verify_limit,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin fusion_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Largest chain checked against the baseline table (default: 256)
  -h, --help                    Print this help message

Examples:
  cargo run --release --bin fusion_probe
  cargo run --release --features parallel --bin fusion_probe -- --format table --verify-limit 128
"
        );
    }
}

fn parse_limit(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| "verify limit must be a non-negative integer".to_string())
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

struct Measurement {
    scenario: &'static str,
    n: usize,
    score: Option<i64>,
    wall_s: f64,
    rss_delta_kib: u64,
    check: Check,
}

enum Check {
    NotChecked,
    Passed,
    Failed(String),
}

impl Check {
    fn label(&self) -> &'static str {
        match self {
            Check::NotChecked => "not_checked",
            Check::Passed => "passed",
            Check::Failed(_) => "failed",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Check::Passed => "✓",
            Check::Failed(_) => "✗",
            Check::NotChecked => "○",
        }
    }

    fn detail(&self) -> &str {
        match self {
            Check::Failed(detail) => detail.as_str(),
            _ => "",
        }
    }
}

impl Measurement {
    fn score_text(&self) -> String {
        self.score
            .map_or_else(|| "error".to_string(), |s| s.to_string())
    }
}

fn run_exhaustive(sys: &mut System) -> Vec<Measurement> {
    (1..=EXHAUSTIVE_LIMIT)
        .map(|n| {
            eprint!("      [{n}/{EXHAUSTIVE_LIMIT}] n={n}, orders={}... ", catalan(n).unwrap_or(0));
            let m = measure("exhaustive", n, sys, || {
                let chain = deterministic_chain(n, 3);
                compare(run_engine(&chain), exhaustive_best(&chain))
            });
            report(&m);
            m
        })
        .collect()
}

fn run_scaling(options: &Options, sys: &mut System) -> Vec<Measurement> {
    const SIZES: &[usize] = &[16, 32, 64, 128, 256, 512, 1024];
    SIZES
        .iter()
        .enumerate()
        .map(|(idx, &n)| {
            eprint!("      [{}/{}] n={n}, cells={}... ", idx + 1, SIZES.len(), n * (n + 1) / 2);
            let m = measure("chain", n, sys, || {
                let chain = deterministic_chain(n, 0);
                let got = run_engine(&chain);
                if n <= options.verify_limit {
                    compare(got, baseline_best(&chain))
                } else {
                    match got {
                        Ok(score) => (Some(score), Check::NotChecked),
                        Err(err) => (None, Check::Failed(err.to_string())),
                    }
                }
            });
            report(&m);
            m
        })
        .collect()
}

fn report(m: &Measurement) {
    eprintln!(
        "{} score={}, time={:.3}s, status={}",
        m.check.icon(),
        m.score_text(),
        m.wall_s,
        m.check.label()
    );
}

fn run_engine(chain: &[Fitmon]) -> Result<i64, FusionError> {
    let engine = IntervalEngine::new(FitmonFusion::new(chain)?);
    engine.run().map(|(score, _splits)| score)
}

fn compare(got: Result<i64, FusionError>, expected: i64) -> (Option<i64>, Check) {
    match got {
        Ok(score) if score == expected => (Some(score), Check::Passed),
        Ok(score) => (
            Some(score),
            Check::Failed(format!("expected {expected}, got {score}")),
        ),
        Err(err) => (None, Check::Failed(err.to_string())),
    }
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    let count = |label: &str| measurements.iter().filter(|m| m.check.label() == label).count();
    let failed = count("failed");

    eprintln!("{}", "=".repeat(80));
    eprintln!(
        "Runs: {}  passed: {}  failed: {}  not checked (n > {}): {}",
        measurements.len(),
        count("passed"),
        failed,
        options.verify_limit,
        count("not_checked")
    );
    for m in measurements {
        if let Check::Failed(detail) = &m.check {
            eprintln!("  ✗ {} n={}: {}", m.scenario, m.n, detail);
        }
    }
    if failed == 0 {
        eprintln!("✓ Every checked run matched its reference score.");
    }
    eprintln!("{}", "=".repeat(80));
    eprintln!();
}

fn measure<F>(scenario: &'static str, n: usize, sys: &mut System, compute: F) -> Measurement
where
    F: FnOnce() -> (Option<i64>, Check),
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let (score, check) = compute();
    let wall_s = start.elapsed().as_secs_f64();
    let after = rss_kib(sys);

    Measurement {
        scenario,
        n,
        score,
        wall_s,
        rss_delta_kib: after.saturating_sub(before),
        check,
    }
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,n,score,wall_s,rss_delta_kib,status,detail");
    for m in measurements {
        println!(
            "{},{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.n,
            m.score_text(),
            m.wall_s,
            m.rss_delta_kib,
            m.check.label(),
            m.check.detail().replace('"', "'")
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    println!(
        "{:<10}  {:>5}  {:>10}  {:>9}  {:>13}  {:<11}  detail",
        "scenario", "n", "score", "wall_s", "rss_delta_kib", "status"
    );
    for m in measurements {
        println!(
            "{:<10}  {:>5}  {:>10}  {:>9.3}  {:>13}  {:<11}  {}",
            m.scenario,
            m.n,
            m.score_text(),
            m.wall_s,
            m.rss_delta_kib,
            m.check.label(),
            m.check.detail()
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    let rows: Vec<String> = measurements
        .iter()
        .map(|m| {
            let score = m.score.map_or_else(|| "null".to_string(), |s| s.to_string());
            format!(
                "  {{\"scenario\":\"{}\",\"n\":{},\"score\":{},\"wall_s\":{:.3},\"rss_delta_kib\":{},\"status\":\"{}\",\"detail\":\"{}\"}}",
                m.scenario,
                m.n,
                score,
                m.wall_s,
                m.rss_delta_kib,
                m.check.label(),
                m.check.detail().replace('"', "'")
            )
        })
        .collect();
    println!("[\n{}\n]", rows.join(",\n"));
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or(0, |process| process.memory() / 1024)
}

/// Chain of `n` fitmons whose neighbouring affinities agree, with zero
/// affinity at both outer ends. `salt` varies the pattern.
fn deterministic_chain(n: usize, salt: usize) -> Vec<Fitmon> {
    let boundary = |i: usize| -> f64 {
        if i == 0 || i == n {
            0.0
        } else {
            ((i * 37 + salt * 11 + 13) % 100) as f64 / 100.0
        }
    };
    (0..n)
        .map(|i| {
            let score = ((i * 53 + salt * 29 + 7) % 100) as i64;
            Fitmon::new(boundary(i), score, boundary(i + 1))
        })
        .collect()
}

fn fuse_raw(l: (f64, i64, f64), r: (f64, i64, f64)) -> (f64, i64, f64) {
    let s = (l.1 as f64 * l.2 + r.1 as f64 * r.0).trunc() as i64;
    (l.0, s, r.2)
}

/// Straightforward nested-Vec interval DP.
fn baseline_best(chain: &[Fitmon]) -> i64 {
    let n = chain.len();
    let mut memo = vec![vec![(0.0f64, 0i64, 0.0f64); n]; n];
    for (i, f) in chain.iter().enumerate() {
        memo[i][i] = (f.left_affinity, f.score, f.right_affinity);
    }
    for len in 2..=n {
        for i in 0..=(n - len) {
            let j = i + len - 1;
            let mut best = fuse_raw(memo[i][i], memo[i + 1][j]);
            for k in (i + 1)..j {
                let cand = fuse_raw(memo[i][k], memo[k + 1][j]);
                if best.1 < cand.1 {
                    best = cand;
                }
            }
            memo[i][j] = best;
        }
    }
    memo[0][n - 1].1
}

/// Best score over every full parenthesization, without reusing sub-optima.
fn exhaustive_best(chain: &[Fitmon]) -> i64 {
    fn all(chain: &[Fitmon], i: usize, j: usize) -> Vec<(f64, i64, f64)> {
        if i == j {
            let f = chain[i];
            return vec![(f.left_affinity, f.score, f.right_affinity)];
        }
        let mut out = Vec::new();
        for k in i..j {
            let left = all(chain, i, k);
            let right = all(chain, k + 1, j);
            for &l in &left {
                for &r in &right {
                    out.push(fuse_raw(l, r));
                }
            }
        }
        out
    }
    all(chain, 0, chain.len() - 1)
        .into_iter()
        .map(|f| f.1)
        .max()
        .unwrap_or(0)
}
