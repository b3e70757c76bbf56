// Scenario Definitions — reference regressions plus topology variations
// Zero engine changes: every scenario is a JungleConfig and an expectation

use jungle_engine::{JungleConfig, Verdict};

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub config: JungleConfig,
    /// Verdict the reference-seed run must reach; `None` for exploratory runs.
    pub expected: Option<Verdict>,
}

impl Scenario {
    /// The scenario's configuration with the dynamics seed replaced.
    pub fn config_for_seed(&self, seed: u64) -> JungleConfig {
        self.config.clone().with_seed(seed)
    }
}

// ─── Scenario Table ─────────────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    vec![
        // ── Reference regressions ──
        Scenario {
            name: "COLLAPSE_10",
            label: "10% Tigers (collapse)",
            category: "REFERENCE",
            config: JungleConfig::new(10),
            expected: Some(Verdict::Collapse),
        },
        Scenario {
            name: "STABLE_40",
            label: "40% Tigers (stable)",
            category: "REFERENCE",
            config: JungleConfig::new(40),
            expected: Some(Verdict::Stable),
        },
        // ── Transition band ──
        Scenario {
            name: "TRANSITION_20",
            label: "20% Tigers",
            category: "TRANSITION",
            config: JungleConfig::new(20),
            expected: None,
        },
        Scenario {
            name: "TRANSITION_30",
            label: "30% Tigers",
            category: "TRANSITION",
            config: JungleConfig::new(30),
            expected: None,
        },
        // ── Topology variations ──
        Scenario {
            name: "LATTICE_40",
            label: "40% Tigers, ring lattice",
            category: "TOPOLOGY",
            config: JungleConfig::new(40).with_network(60, 6, 0.0),
            expected: None,
        },
        Scenario {
            name: "RANDOM_40",
            label: "40% Tigers, fully rewired",
            category: "TOPOLOGY",
            config: JungleConfig::new(40).with_network(60, 6, 1.0),
            expected: None,
        },
        Scenario {
            name: "DENSE_40",
            label: "40% Tigers, k=10",
            category: "TOPOLOGY",
            config: JungleConfig::new(40).with_network(60, 10, 0.15),
            expected: None,
        },
        Scenario {
            name: "LARGE_40",
            label: "40% Tigers, 600 agents",
            category: "SCALE",
            config: JungleConfig::new(40).with_network(600, 6, 0.15),
            expected: None,
        },
        Scenario {
            name: "LONG_RUN_10",
            label: "10% Tigers, 1000 steps",
            category: "SCALE",
            config: JungleConfig::new(10).with_steps(1000),
            expected: None,
        },
    ]
}
