// Critical Mass Sweep — final chaos as a function of stabilizer share
// Locates the smallest Tiger percentage that keeps the jungle stable

use jungle_engine::*;
use rand_chacha::ChaCha8Rng;

use crate::report::{CriticalMassReport, Stats, SweepPoint};

/// Sweep stabilizer shares `0, step, 2*step, ..., 100` on the reference
/// network, running `runs` ChaCha8 seeds per point.
pub fn sweep(
    base: &JungleConfig,
    pct_step: i32,
    runs: usize,
    base_seed: u64,
) -> Result<CriticalMassReport, ConfigurationError> {
    let pct_step = pct_step.max(1);
    let mut points = Vec::new();

    let mut pct = 0;
    while pct <= 100 {
        let mut finals = Vec::with_capacity(runs);
        for i in 0..runs {
            let config = JungleConfig {
                stabilizer_pct: pct,
                seed: base_seed + i as u64,
                ..base.clone()
            };
            let mut sim = JungleSimulation::<ChaCha8Rng>::with_draw_source(config)?;
            sim.run_configured();
            finals.push(sim.final_mean());
        }
        points.push(point(pct, &finals));
        pct += pct_step;
    }

    Ok(summarize(pct_step, runs, points))
}

fn point(stabilizer_pct: i32, finals: &[f64]) -> SweepPoint {
    let n = finals.len().max(1) as f64;
    let count = |verdict: Verdict| {
        finals.iter().filter(|&&m| Verdict::from_mean(m) == verdict).count() as f64 / n
    };
    SweepPoint {
        stabilizer_pct,
        final_mean_chaos: Stats::from_samples(finals),
        stable_rate: count(Verdict::Stable),
        collapse_rate: count(Verdict::Collapse),
    }
}

fn summarize(pct_step: i32, runs: usize, points: Vec<SweepPoint>) -> CriticalMassReport {
    let critical_pct = points
        .iter()
        .find(|p| p.final_mean_chaos.n > 0 && p.final_mean_chaos.mean < STABLE_THRESHOLD)
        .map(|p| p.stabilizer_pct);
    let last_collapse_pct = points
        .iter()
        .filter(|p| p.final_mean_chaos.n > 0 && p.final_mean_chaos.mean > COLLAPSE_THRESHOLD)
        .map(|p| p.stabilizer_pct)
        .max();

    CriticalMassReport {
        pct_step,
        runs_per_point: runs,
        critical_pct,
        last_collapse_pct,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_picks_first_stable_point() {
        let points = vec![
            point(0, &[90.0, 95.0]),
            point(10, &[70.0, 65.0]),
            point(20, &[40.0, 30.0]),
            point(30, &[10.0, 15.0]),
            point(40, &[2.0, 1.0]),
        ];
        let report = summarize(10, 2, points);
        assert_eq!(report.critical_pct, Some(30));
        assert_eq!(report.last_collapse_pct, Some(10));
    }

    #[test]
    fn rates_split_verdicts() {
        let p = point(25, &[70.0, 10.0, 30.0, 5.0]);
        assert_eq!(p.collapse_rate, 0.25);
        assert_eq!(p.stable_rate, 0.5);
    }

    #[test]
    fn sweep_covers_both_ends() {
        let base = JungleConfig::default().with_steps(20);
        let report = sweep(&base, 50, 2, 0).unwrap();
        let pcts: Vec<i32> = report.points.iter().map(|p| p.stabilizer_pct).collect();
        assert_eq!(pcts, vec![0, 50, 100]);
        // Nothing but stabilizers: chaos never leaves zero.
        assert_eq!(report.points[2].final_mean_chaos.max, 0.0);
    }
}
