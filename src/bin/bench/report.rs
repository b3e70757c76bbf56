// Benchmark Report Types
// Structured output for independent analysis of the critical-mass hypothesis

use jungle_engine::{JungleConfig, JungleStats, SmallWorld, Verdict};
use serde::Serialize;

// ─── Statistics (per-metric Monte Carlo aggregation) ────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }

    pub fn half_width(&self) -> f64 {
        (self.ci_upper - self.ci_lower) / 2.0
    }
}

// ─── Single-Run Result ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub seed: u64,
    pub prng: &'static str,
    pub final_mean_chaos: f64,
    pub peak_mean_chaos: f64,
    pub verdict: Verdict,
    pub panic_steps: usize,
    pub final_saturated_nodes: usize,
    pub first_panic_step: Option<usize>,
    pub elapsed_ms: u128,
    pub stats: JungleStats,
}

// ─── Topology Characterisation ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TopologyReport {
    pub node_count: usize,
    pub degree: usize,
    pub rewire_prob: f64,
    pub topology_seed: u64,
    pub edge_count: usize,
    pub average_clustering: f64,
    pub average_path_length: f64,
    pub connected: bool,
}

impl TopologyReport {
    pub fn describe(config: &JungleConfig, graph: &SmallWorld) -> Self {
        Self {
            node_count: config.node_count,
            degree: config.degree,
            rewire_prob: config.rewire_prob,
            topology_seed: config.topology_seed,
            edge_count: graph.edge_count(),
            average_clustering: graph.average_clustering(),
            average_path_length: graph.average_path_length(),
            connected: graph.is_connected(),
        }
    }
}

// ─── Monte Carlo Report (per-scenario aggregation) ──────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloReport {
    pub scenario_name: String,
    pub label: String,
    pub category: String,
    pub stabilizer_pct: i32,
    pub expected: Option<Verdict>,
    pub topology: TopologyReport,
    /// The reference-generator run at the scenario's own seed.
    pub reference_run: RunResult,
    /// Whether `reference_run` reached `expected` (true when nothing is expected).
    pub reference_pass: bool,
    pub n_runs: usize,
    /// Share of seeded runs reaching `expected`; `None` when nothing is expected.
    pub agreement_rate: Option<f64>,
    pub collapse_rate: f64,
    pub stable_rate: f64,
    pub final_mean_chaos: Stats,
    pub peak_mean_chaos: Stats,
    pub panic_steps: Stats,
    pub final_saturated_nodes: Stats,
    pub elapsed_ms: Stats,
    pub individual_runs: Vec<RunResult>,
}

// ─── Critical Mass Sweep ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub stabilizer_pct: i32,
    pub final_mean_chaos: Stats,
    pub stable_rate: f64,
    pub collapse_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CriticalMassReport {
    pub pct_step: i32,
    pub runs_per_point: usize,
    /// Lowest stabilizer share whose mean final chaos is below the stable threshold.
    pub critical_pct: Option<i32>,
    /// Highest stabilizer share whose mean final chaos is above the collapse threshold.
    pub last_collapse_pct: Option<i32>,
    pub points: Vec<SweepPoint>,
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub n_runs_per_scenario: usize,
    pub base_seed: u64,
    pub summary: Summary,
    pub critical_mass: Option<CriticalMassReport>,
    pub scenarios: Vec<MonteCarloReport>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
}
