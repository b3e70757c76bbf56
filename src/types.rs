// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Jungle Protocol Simulation Suite - Shared Types

use serde::{Deserialize, Serialize};

/// Dense node index into every per-node array of a simulation.
pub type NodeId = u32;

/// One full copy of the per-node chaos vector, indexed by [`NodeId`].
pub type ChaosSnapshot = Vec<f64>;

// ─── Chaos Constants ─────────────────────────────────────────────────────────

pub const CHAOS_MIN: f64 = 0.0;
pub const CHAOS_MAX: f64 = 100.0;

/// Mean chaos above which the network enters the panic regime.
pub const PANIC_THRESHOLD: f64 = 50.0;
/// Extra firing probability for every source while panic is active.
pub const PANIC_BOOST: f64 = 0.3;
/// Probability that a source injects noise in a calm step.
pub const BASE_FIRE_PROB: f64 = 0.5;

/// Chaos a firing source adds to an amplifier neighbor (mirror effect).
pub const AMPLIFIER_BOOST: f64 = 12.0;
/// Chaos a firing source adds to any other neighbor (buffer effect).
pub const BUFFERED_BOOST: f64 = 2.0;

/// Chaos a stabilizer removes from itself each step.
pub const SELF_DAMPING: f64 = 6.0;
/// Chaos a stabilizer removes from each neighbor each step.
pub const NEIGHBOR_DAMPING: f64 = 3.0;

/// Final mean chaos above which a run counts as a collapse.
pub const COLLAPSE_THRESHOLD: f64 = 60.0;
/// Final mean chaos below which a run counts as stable.
pub const STABLE_THRESHOLD: f64 = 20.0;

// ─── Roles ───────────────────────────────────────────────────────────────────

/// Behaviour of a node for the whole lifetime of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// "Tiger": damps its own and its neighbors' chaos.
    Stabilizer,
    /// "Human": probabilistically injects chaos into its neighbors.
    Source,
    /// "Simul": mirrors injected chaos, receiving the large boost.
    Amplifier,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Stabilizer, Role::Source, Role::Amplifier];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Stabilizer => "STABILIZER",
            Role::Source => "SOURCE",
            Role::Amplifier => "AMPLIFIER",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCounts {
    pub stabilizers: usize,
    pub sources: usize,
    pub amplifiers: usize,
}

impl RoleCounts {
    pub fn tally(roles: &[Role]) -> Self {
        let mut counts = Self::default();
        for role in roles {
            match role {
                Role::Stabilizer => counts.stabilizers += 1,
                Role::Source => counts.sources += 1,
                Role::Amplifier => counts.amplifiers += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.stabilizers + self.sources + self.amplifiers
    }

    pub fn get(&self, role: Role) -> usize {
        match role {
            Role::Stabilizer => self.stabilizers,
            Role::Source => self.sources,
            Role::Amplifier => self.amplifiers,
        }
    }
}

// ─── Verdict ─────────────────────────────────────────────────────────────────

/// Classification of a final mean chaos value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Collapse,
    Contested,
    Stable,
}

impl Verdict {
    pub fn from_mean(mean_chaos: f64) -> Self {
        if mean_chaos > COLLAPSE_THRESHOLD {
            Verdict::Collapse
        } else if mean_chaos < STABLE_THRESHOLD {
            Verdict::Stable
        } else {
            Verdict::Contested
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Collapse => "COLLAPSE",
            Verdict::Contested => "CONTESTED",
            Verdict::Stable => "STABLE",
        }
    }
}

// ─── Step & Run Results ──────────────────────────────────────────────────────

/// What happened during a single call to `step()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSummary {
    /// 1-based index of the step that produced this summary.
    pub step: usize,
    pub mean_before: f64,
    pub panic_active: bool,
    pub sources_fired: usize,
    pub mean_after: f64,
    pub peak_chaos: f64,
    pub saturated_nodes: usize,
}

/// Aggregate view of a simulation at its current history position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JungleStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub roles: RoleCounts,
    pub steps_elapsed: usize,
    pub final_mean_chaos: f64,
    pub peak_mean_chaos: f64,
    pub stabilizer_mean_chaos: f64,
    pub source_mean_chaos: f64,
    pub amplifier_mean_chaos: f64,
    pub verdict: Verdict,
}

/// Arithmetic mean of a chaos vector, `0.0` when empty.
pub fn mean_of(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_thresholds_are_strict() {
        assert_eq!(Verdict::from_mean(60.0), Verdict::Contested);
        assert_eq!(Verdict::from_mean(60.01), Verdict::Collapse);
        assert_eq!(Verdict::from_mean(20.0), Verdict::Contested);
        assert_eq!(Verdict::from_mean(19.99), Verdict::Stable);
    }

    #[test]
    fn tally_counts_each_role() {
        let roles = [
            Role::Source,
            Role::Amplifier,
            Role::Stabilizer,
            Role::Amplifier,
        ];
        let counts = RoleCounts::tally(&roles);
        assert_eq!(counts.stabilizers, 1);
        assert_eq!(counts.sources, 1);
        assert_eq!(counts.amplifiers, 2);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.get(Role::Amplifier), 2);
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean_of(&[]), 0.0);
        assert_eq!(mean_of(&[10.0, 20.0]), 15.0);
    }

    #[test]
    fn roles_serialize_screaming() {
        let json = serde_json::to_string(&Role::Stabilizer).unwrap();
        assert_eq!(json, "\"STABILIZER\"");
    }
}
