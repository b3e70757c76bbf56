// Per-Step JSONL Time Series Recorder
// Outputs one JSON line per step for plotting and independent analysis

use jungle_engine::{mean_of, ChaosSnapshot, Role, StepSummary, CHAOS_MAX, CHAOS_MIN};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct StepSnapshot {
    pub step: usize,
    pub mean_before: f64,
    pub mean_after: f64,
    pub panic_active: bool,
    pub sources_fired: usize,
    pub peak_chaos: f64,
    pub saturated_nodes: usize,
    pub stabilizer_mean: f64,
    pub source_mean: f64,
    pub amplifier_mean: f64,
    pub chaos: ChaosSnapshot,
}

impl StepSnapshot {
    pub fn from_step(summary: &StepSummary, roles: &[Role], chaos: &[f64]) -> Self {
        Self {
            step: summary.step,
            mean_before: summary.mean_before,
            mean_after: summary.mean_after,
            panic_active: summary.panic_active,
            sources_fired: summary.sources_fired,
            peak_chaos: summary.peak_chaos,
            saturated_nodes: summary.saturated_nodes,
            stabilizer_mean: role_mean(roles, chaos, Role::Stabilizer),
            source_mean: role_mean(roles, chaos, Role::Source),
            amplifier_mean: role_mean(roles, chaos, Role::Amplifier),
            chaos: chaos.to_vec(),
        }
    }

    /// Step 0: the state before any tick has run.
    pub fn initial(roles: &[Role], chaos: &[f64]) -> Self {
        let mean = mean_of(chaos);
        Self::from_step(
            &StepSummary {
                step: 0,
                mean_before: mean,
                panic_active: false,
                sources_fired: 0,
                mean_after: mean,
                peak_chaos: chaos.iter().copied().fold(CHAOS_MIN, f64::max),
                saturated_nodes: chaos.iter().filter(|&&c| c >= CHAOS_MAX).count(),
            },
            roles,
            chaos,
        )
    }
}

fn role_mean(roles: &[Role], chaos: &[f64], role: Role) -> f64 {
    let (sum, n) = roles
        .iter()
        .zip(chaos)
        .filter(|(r, _)| **r == role)
        .fold((0.0_f64, 0usize), |(sum, n), (_, c)| (sum + *c, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Time series recorder that accumulates snapshots and writes JSONL
pub struct TimeSeriesRecorder {
    snapshots: Vec<StepSnapshot>,
}

impl TimeSeriesRecorder {
    pub fn new() -> Self {
        Self { snapshots: Vec::new() }
    }

    pub fn record_initial(&mut self, roles: &[Role], chaos: &[f64]) {
        self.snapshots.push(StepSnapshot::initial(roles, chaos));
    }

    pub fn record(&mut self, summary: &StepSummary, roles: &[Role], chaos: &[f64]) {
        self.snapshots.push(StepSnapshot::from_step(summary, roles, chaos));
    }

    /// Write all snapshots to a JSONL file
    pub fn write_jsonl(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        for snapshot in &self.snapshots {
            let line = serde_json::to_string(snapshot)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}
