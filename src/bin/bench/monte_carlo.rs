// Monte Carlo Infrastructure — N runs per scenario with statistical aggregation
// Each scenario runs N times with ChaCha8 seeds base..base+N-1, computing mean ± 95% CI,
// plus one reference-generator run at the scenario's own seed

use rand_chacha::ChaCha8Rng;
use jungle_engine::*;
use tracing::{debug, warn};

use crate::report::*;
use crate::scenarios::Scenario;
use crate::time_series::TimeSeriesRecorder;

use std::time::Instant;

/// Run a freshly built simulation to its configured step count.
pub fn run_single<R: DrawSource>(
    mut sim: JungleSimulation<R>,
    prng: &'static str,
    time_series_path: Option<&std::path::Path>,
) -> RunResult {
    let start = Instant::now();
    let seed = sim.config().seed;

    let mut time_series = time_series_path.map(|_| {
        let mut ts = TimeSeriesRecorder::new();
        ts.record_initial(sim.roles(), sim.chaos());
        ts
    });
    let mut panic_steps = 0;
    let mut first_panic_step = None;
    let mut final_saturated_nodes = 0;

    while !sim.is_done() {
        let summary = sim.step();
        if summary.panic_active {
            panic_steps += 1;
            first_panic_step.get_or_insert(summary.step);
        }
        final_saturated_nodes = summary.saturated_nodes;
        if let Some(ref mut ts) = time_series {
            ts.record(&summary, sim.roles(), sim.chaos());
        }
    }

    if let (Some(ts), Some(path)) = (&time_series, time_series_path) {
        if let Err(e) = ts.write_jsonl(path) {
            warn!(path = %path.display(), error = %e, "failed to write time series");
        }
    }

    let stats = sim.stats();
    debug!(seed, prng, final_mean = stats.final_mean_chaos, verdict = stats.verdict.label(), "run complete");

    RunResult {
        seed,
        prng,
        final_mean_chaos: stats.final_mean_chaos,
        peak_mean_chaos: stats.peak_mean_chaos,
        verdict: stats.verdict,
        panic_steps,
        final_saturated_nodes,
        first_panic_step,
        elapsed_ms: start.elapsed().as_millis(),
        stats,
    }
}

/// Run Monte Carlo: N ChaCha8 runs of a scenario plus its reference run.
pub fn run_monte_carlo(
    scenario: &Scenario,
    n_runs: usize,
    base_seed: u64,
    time_series_base: Option<&std::path::Path>,
) -> Result<MonteCarloReport, ConfigurationError> {
    let ts_dir = time_series_base.map(|base| base.join(scenario.name.to_lowercase()));

    let reference_path = ts_dir.as_ref().map(|dir| dir.join("reference.jsonl"));
    let reference = JungleSimulation::new(scenario.config.clone())?;
    let topology = TopologyReport::describe(reference.config(), reference.graph());
    let reference_run = run_single(reference, "MT19937", reference_path.as_deref());

    let mut results = Vec::with_capacity(n_runs);
    for i in 0..n_runs {
        let seed = base_seed + i as u64;
        let path = ts_dir.as_ref().map(|dir| dir.join(format!("seed-{}.jsonl", seed)));
        let sim = JungleSimulation::<ChaCha8Rng>::with_draw_source(scenario.config_for_seed(seed))?;
        results.push(run_single(sim, "ChaCha8Rng", path.as_deref()));
    }

    Ok(aggregate(scenario, topology, reference_run, results))
}

/// Aggregate individual runs into a MonteCarloReport.
fn aggregate(
    scenario: &Scenario,
    topology: TopologyReport,
    reference_run: RunResult,
    results: Vec<RunResult>,
) -> MonteCarloReport {
    let n = results.len();
    let rate = |verdict: Verdict| {
        if n == 0 {
            0.0
        } else {
            results.iter().filter(|r| r.verdict == verdict).count() as f64 / n as f64
        }
    };
    let collapse_rate = rate(Verdict::Collapse);
    let stable_rate = rate(Verdict::Stable);
    let agreement_rate = scenario.expected.map(rate);
    let reference_pass = scenario
        .expected
        .map_or(true, |expected| reference_run.verdict == expected);

    let final_mean_chaos = Stats::from_samples(
        &results.iter().map(|r| r.final_mean_chaos).collect::<Vec<_>>()
    );
    let peak_mean_chaos = Stats::from_samples(
        &results.iter().map(|r| r.peak_mean_chaos).collect::<Vec<_>>()
    );
    let panic_steps = Stats::from_samples(
        &results.iter().map(|r| r.panic_steps as f64).collect::<Vec<_>>()
    );
    let final_saturated_nodes = Stats::from_samples(
        &results.iter().map(|r| r.final_saturated_nodes as f64).collect::<Vec<_>>()
    );
    let elapsed_ms = Stats::from_samples(
        &results.iter().map(|r| r.elapsed_ms as f64).collect::<Vec<_>>()
    );

    MonteCarloReport {
        scenario_name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        category: scenario.category.to_string(),
        stabilizer_pct: scenario.config.stabilizer_pct,
        expected: scenario.expected,
        topology,
        reference_run,
        reference_pass,
        n_runs: n,
        agreement_rate,
        collapse_rate,
        stable_rate,
        final_mean_chaos,
        peak_mean_chaos,
        panic_steps,
        final_saturated_nodes,
        elapsed_ms,
        individual_runs: results,
    }
}
