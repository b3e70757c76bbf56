// Jungle Benchmark Runner v1.0.0 — Critical-Mass Hypothesis Validation
// Reference regressions, Monte Carlo (N=30) over ChaCha8 seeds, stabilizer sweep
//
// Usage:
//   cargo run --release --bin bench                     # Run all scenarios (30 runs each)
//   cargo run --release --bin bench -- --runs 5         # Quick mode (5 runs each)
//   cargo run --release --bin bench -- STABLE_40        # Filter by name
//   cargo run --release --bin bench -- --time-series    # Enable JSONL output
//   cargo run --release --bin bench -- --seed 42        # Custom base seed
//   cargo run --release --bin bench -- --no-sweep       # Skip the critical-mass sweep

mod critical_mass;
mod monte_carlo;
mod report;
mod scenarios;
mod time_series;

use jungle_engine::JungleConfig;
use report::*;
use scenarios::*;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seed: u64,
    time_series: bool,
    sweep: bool,
    sweep_step: i32,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        runs: 30,
        seed: 0,
        time_series: false,
        sweep: true,
        sweep_step: 5,
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(30);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--sweep-step" => {
                i += 1;
                if i < args.len() {
                    cli.sweep_step = args[i].parse().unwrap_or(5);
                }
            }
            "--time-series" => {
                cli.time_series = true;
            }
            "--no-sweep" => {
                cli.sweep = false;
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                warn!(argument = %args[i], "unknown argument");
            }
        }
        i += 1;
    }

    cli
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jungle_engine=info,bench=info")),
        )
        .init();

    let cli = parse_args();
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios.iter()
                .filter(|s| s.name.to_lowercase().contains(&f_lower)
                          || s.label.to_lowercase().contains(&f_lower)
                          || s.category.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        error!(filter = ?cli.filter, "no scenarios match filter");
        std::process::exit(1);
    }

    let ts_dir = if cli.time_series {
        Some(std::path::Path::new("benchmark-results/time-series").to_path_buf())
    } else {
        None
    };

    info!(runs = cli.runs, base_seed = cli.seed, scenarios = to_run.len(), "starting jungle benchmark");
    println!("\n  Jungle Benchmark Runner v1.0.0");
    println!("  PRNG: MT19937 (reference) + ChaCha8Rng (Monte Carlo) | Runs/scenario: {} | Base seed: {}",
        cli.runs, cli.seed);
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!("  {:<30} {:>5} {:>10} {:>10} {:>13} {:>9} {:>9} {:>7}",
        "Scenario", "Tiger", "Reference", "Verdict", "MC Chaos", "Collapse", "Stable", "Time");
    println!("  {}", "-".repeat(102));

    let suite_start = Instant::now();
    let mut mc_reports = Vec::new();

    for scenario in &to_run {
        let report = match monte_carlo::run_monte_carlo(
            scenario,
            cli.runs,
            cli.seed,
            ts_dir.as_deref(),
        ) {
            Ok(report) => report,
            Err(e) => {
                error!(scenario = scenario.name, error = %e, "invalid scenario configuration");
                std::process::exit(1);
            }
        };

        let status = match (report.expected, report.reference_pass) {
            (None, _) => "----",
            (Some(_), true) => "PASS",
            (Some(_), false) => "FAIL",
        };

        println!("  {:<30} {:>4}% {:>10.2} {:>10} {:>7.1}±{:<5.1} {:>8.0}% {:>8.0}% {:>5.0}ms  {}",
            report.label,
            report.stabilizer_pct,
            report.reference_run.final_mean_chaos,
            report.reference_run.verdict.label(),
            report.final_mean_chaos.mean,
            report.final_mean_chaos.half_width(),
            report.collapse_rate * 100.0,
            report.stable_rate * 100.0,
            report.elapsed_ms.mean,
            status,
        );

        mc_reports.push(report);
    }

    // ─── Critical Mass Sweep ────────────────────────────────────────────

    let critical_mass = if cli.sweep {
        match critical_mass::sweep(&JungleConfig::default(), cli.sweep_step, cli.runs, cli.seed) {
            Ok(report) => {
                println!("\n  Critical mass sweep ({} runs per point):", report.runs_per_point);
                for p in &report.points {
                    println!("    {:>3}% Tigers  mean {:>6.2} ±{:<5.2}  stable {:>3.0}%  collapse {:>3.0}%",
                        p.stabilizer_pct,
                        p.final_mean_chaos.mean,
                        p.final_mean_chaos.half_width(),
                        p.stable_rate * 100.0,
                        p.collapse_rate * 100.0,
                    );
                }
                match report.critical_pct {
                    Some(pct) => println!("    Critical mass: {}% Tigers", pct),
                    None => println!("    Critical mass: not reached"),
                }
                Some(report)
            }
            Err(e) => {
                error!(error = %e, "critical mass sweep failed");
                None
            }
        }
    } else {
        None
    };

    let suite_elapsed = suite_start.elapsed();

    // ─── Summary ────────────────────────────────────────────────────────

    let total = mc_reports.len();
    let passed = mc_reports.iter().filter(|r| r.reference_pass).count();
    let failed = total - passed;

    println!("  {}", "-".repeat(102));
    println!("  Total: {}  Passed: {}  Failed: {}  Suite time: {:.1}s\n",
        total, passed, failed, suite_elapsed.as_secs_f64());

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let timestamp = format!("{}", ts);

    let report = BenchReport {
        timestamp: timestamp.clone(),
        version: "1.0.0",
        prng: "MT19937+ChaCha8Rng",
        n_runs_per_scenario: cli.runs,
        base_seed: cli.seed,
        summary: Summary {
            total,
            passed,
            failed,
            pass_rate: passed as f64 / total as f64,
        },
        critical_mass,
        scenarios: mc_reports,
    };

    let dir = std::path::Path::new("benchmark-results");
    match write_report(dir, &timestamp, &report) {
        Ok(path) => println!("  Results saved to: {}\n", path.display()),
        Err(e) => error!(error = %e, "failed to write benchmark report"),
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

fn write_report(
    dir: &std::path::Path,
    timestamp: &str,
    report: &BenchReport,
) -> std::io::Result<std::path::PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("bench-{}.json", timestamp));
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    std::fs::write(&path, json)?;
    Ok(path)
}
