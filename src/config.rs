// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Jungle Protocol Simulation Suite - Construction Parameters

//! Construction parameters for a jungle simulation.
//!
//! Defaults reproduce the reference experiment: 60 agents on a k = 6,
//! p = 0.15 small world built from topology seed 99, dynamics seed 42,
//! 150 steps and 20% entropy sources.

use serde::{Deserialize, Serialize};

pub const DEFAULT_NODE_COUNT: usize = 60;
pub const DEFAULT_DEGREE: usize = 6;
pub const DEFAULT_REWIRE_PROB: f64 = 0.15;
pub const DEFAULT_STEPS: usize = 150;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TOPOLOGY_SEED: u64 = 99;
pub const DEFAULT_SOURCE_FRACTION: f64 = 0.20;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Invalid construction parameters. Nothing is built when one is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("stabilizer percentage {0} is outside 0..=100")]
    StabilizerPctOutOfRange(i32),
    #[error("network must contain at least one node")]
    EmptyNetwork,
    #[error("ring degree {degree} must be smaller than node count {node_count}")]
    DegreeTooLarge { degree: usize, node_count: usize },
    #[error("ring degree {0} must be even")]
    OddDegree(usize),
    #[error("rewire probability {0} is outside [0, 1]")]
    RewireProbOutOfRange(f64),
    #[error("source fraction {0} is outside [0, 1]")]
    SourceFractionOutOfRange(f64),
}

// ---------------------------------------------------------------------------
// JungleConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JungleConfig {
    /// Share of nodes acting as stabilizers, in percent.
    pub stabilizer_pct: i32,
    /// Seed for role assignment and per-step draws.
    pub seed: u64,
    /// Seed for graph construction, independent of the dynamics.
    pub topology_seed: u64,
    pub node_count: usize,
    /// Ring-lattice degree before rewiring. Must be even.
    pub degree: usize,
    pub rewire_prob: f64,
    /// Step count used by `run_configured`.
    pub steps: usize,
    /// Share of nodes acting as entropy sources.
    pub source_fraction: f64,
}

impl Default for JungleConfig {
    fn default() -> Self {
        Self {
            stabilizer_pct: 0,
            seed: DEFAULT_SEED,
            topology_seed: DEFAULT_TOPOLOGY_SEED,
            node_count: DEFAULT_NODE_COUNT,
            degree: DEFAULT_DEGREE,
            rewire_prob: DEFAULT_REWIRE_PROB,
            steps: DEFAULT_STEPS,
            source_fraction: DEFAULT_SOURCE_FRACTION,
        }
    }
}

impl JungleConfig {
    /// Reference parameters with the given stabilizer share.
    pub fn new(stabilizer_pct: i32) -> Self {
        Self {
            stabilizer_pct,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_topology_seed(mut self, topology_seed: u64) -> Self {
        self.topology_seed = topology_seed;
        self
    }

    pub fn with_network(mut self, node_count: usize, degree: usize, rewire_prob: f64) -> Self {
        self.node_count = node_count;
        self.degree = degree;
        self.rewire_prob = rewire_prob;
        self
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_source_fraction(mut self, source_fraction: f64) -> Self {
        self.source_fraction = source_fraction;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(0..=100).contains(&self.stabilizer_pct) {
            return Err(ConfigurationError::StabilizerPctOutOfRange(self.stabilizer_pct));
        }
        if self.node_count == 0 {
            return Err(ConfigurationError::EmptyNetwork);
        }
        if self.degree >= self.node_count {
            return Err(ConfigurationError::DegreeTooLarge {
                degree: self.degree,
                node_count: self.node_count,
            });
        }
        if self.degree % 2 != 0 {
            return Err(ConfigurationError::OddDegree(self.degree));
        }
        if !(0.0..=1.0).contains(&self.rewire_prob) {
            return Err(ConfigurationError::RewireProbOutOfRange(self.rewire_prob));
        }
        if !(0.0..=1.0).contains(&self.source_fraction) {
            return Err(ConfigurationError::SourceFractionOutOfRange(self.source_fraction));
        }
        Ok(())
    }

    /// `round(node_count * stabilizer_pct / 100)`.
    pub fn stabilizer_count(&self) -> usize {
        let pct = self.stabilizer_pct.clamp(0, 100) as f64;
        (self.node_count as f64 * pct / 100.0).round() as usize
    }

    /// `round(node_count * source_fraction)`, capped by the nodes left over
    /// after stabilizers are placed.
    pub fn source_count(&self) -> usize {
        let wanted = (self.node_count as f64 * self.source_fraction).round() as usize;
        wanted.min(self.node_count.saturating_sub(self.stabilizer_count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_experiment() {
        let cfg = JungleConfig::default();
        assert_eq!(cfg.node_count, 60);
        assert_eq!(cfg.degree, 6);
        assert_eq!(cfg.rewire_prob, 0.15);
        assert_eq!(cfg.steps, 150);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.topology_seed, 99);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_percentage() {
        assert_eq!(
            JungleConfig::new(101).validate(),
            Err(ConfigurationError::StabilizerPctOutOfRange(101))
        );
        assert_eq!(
            JungleConfig::new(-1).validate(),
            Err(ConfigurationError::StabilizerPctOutOfRange(-1))
        );
        assert!(JungleConfig::new(100).validate().is_ok());
    }

    #[test]
    fn rejects_bad_lattice() {
        let odd = JungleConfig::new(10).with_network(60, 5, 0.15);
        assert_eq!(odd.validate(), Err(ConfigurationError::OddDegree(5)));

        let dense = JungleConfig::new(10).with_network(6, 6, 0.15);
        assert_eq!(
            dense.validate(),
            Err(ConfigurationError::DegreeTooLarge { degree: 6, node_count: 6 })
        );

        let empty = JungleConfig::new(10).with_network(0, 0, 0.15);
        assert_eq!(empty.validate(), Err(ConfigurationError::EmptyNetwork));

        let bad_p = JungleConfig::new(10).with_network(60, 6, 1.5);
        assert_eq!(bad_p.validate(), Err(ConfigurationError::RewireProbOutOfRange(1.5)));
    }

    #[test]
    fn counts_round_to_nearest() {
        assert_eq!(JungleConfig::new(10).stabilizer_count(), 6);
        assert_eq!(JungleConfig::new(40).stabilizer_count(), 24);
        assert_eq!(JungleConfig::new(40).source_count(), 12);

        let odd = JungleConfig::new(33).with_network(10, 4, 0.1);
        assert_eq!(odd.stabilizer_count(), 3);
        assert_eq!(odd.source_count(), 2);
    }

    #[test]
    fn sources_fill_only_remaining_nodes() {
        let cfg = JungleConfig::new(90);
        assert_eq!(cfg.stabilizer_count(), 54);
        assert_eq!(cfg.source_count(), 6);
        assert_eq!(JungleConfig::new(100).source_count(), 0);
    }

    #[test]
    fn error_messages_name_the_parameter() {
        let msg = ConfigurationError::OddDegree(3).to_string();
        assert_eq!(msg, "ring degree 3 must be even");
    }
}
