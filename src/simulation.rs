// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Jungle Protocol Simulation Suite - Simulation Core

use tracing::{debug, trace};

use crate::config::{ConfigurationError, JungleConfig};
use crate::rng::{DrawSource, ReferenceRng};
use crate::roles::{assign_roles, members};
use crate::topology::SmallWorld;
use crate::types::*;

// ─── JungleSimulation struct ─────────────────────────────────────────────────

/// Chaos diffusion over a fixed small-world network.
///
/// Every per-node array is indexed by [`NodeId`]. The graph, role map and
/// generator are fixed at construction; only `chaos` and `history` change,
/// and only through [`JungleSimulation::step`].
#[derive(Debug, Clone)]
pub struct JungleSimulation<R: DrawSource = ReferenceRng> {
    config: JungleConfig,
    graph: SmallWorld,
    roles: Vec<Role>,
    // Id-ordered role members, the iteration order of each pass.
    sources: Vec<NodeId>,
    stabilizers: Vec<NodeId>,
    chaos: Vec<f64>,
    history: Vec<ChaosSnapshot>,
    rng: R,
    panic_active: bool,
    peak_mean: f64,
}

impl JungleSimulation<ReferenceRng> {
    /// Build a simulation driven by the reference generator.
    pub fn new(config: JungleConfig) -> Result<Self, ConfigurationError> {
        Self::with_draw_source(config)
    }
}

impl<R: DrawSource> JungleSimulation<R> {
    /// Build a simulation driven by any [`DrawSource`]. The topology is always
    /// built by a [`ReferenceRng`] seeded from `topology_seed`, so every
    /// generator type sees the same network. Roles and per-step draws share
    /// one `R` seeded from `seed`.
    pub fn with_draw_source(config: JungleConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let mut topology_rng = ReferenceRng::from_seed(config.topology_seed);
        let graph = SmallWorld::watts_strogatz(
            config.node_count,
            config.degree,
            config.rewire_prob,
            &mut topology_rng,
        );

        let mut rng = R::seeded(config.seed);
        let roles = assign_roles(
            config.node_count,
            config.stabilizer_count(),
            config.source_count(),
            &mut rng,
        );

        let sim = Self::from_parts(config, graph, roles, rng);
        let counts = sim.role_counts();
        debug!(
            nodes = sim.graph.node_count(),
            edges = sim.graph.edge_count(),
            stabilizers = counts.stabilizers,
            sources = counts.sources,
            amplifiers = counts.amplifiers,
            "jungle constructed"
        );
        Ok(sim)
    }

    fn from_parts(config: JungleConfig, graph: SmallWorld, roles: Vec<Role>, rng: R) -> Self {
        let node_count = graph.node_count();
        let sources = members(&roles, Role::Source);
        let stabilizers = members(&roles, Role::Stabilizer);
        let chaos = vec![CHAOS_MIN; node_count];
        Self {
            config,
            graph,
            roles,
            sources,
            stabilizers,
            history: vec![chaos.clone()],
            chaos,
            rng,
            panic_active: false,
            peak_mean: 0.0,
        }
    }

    /// Advance one tick: panic check, propagation pass, damping pass,
    /// snapshot. Both passes write into the same chaos vector in node-id
    /// order, so later nodes see earlier writes from the same step.
    pub fn step(&mut self) -> StepSummary {
        let step = self.history.len();
        let mean_before = mean_of(&self.chaos);
        let panic = mean_before > PANIC_THRESHOLD;
        if panic != self.panic_active {
            debug!(step, mean_chaos = mean_before, panic, "panic regime changed");
            self.panic_active = panic;
        }
        let fire_prob = BASE_FIRE_PROB + if panic { PANIC_BOOST } else { 0.0 };

        // Propagation: one draw per source, fired or not.
        let mut sources_fired = 0;
        for &source in &self.sources {
            if self.rng.next_unit() < fire_prob {
                sources_fired += 1;
                for &nb in self.graph.neighbors(source) {
                    let boost = if self.roles[nb as usize] == Role::Amplifier {
                        AMPLIFIER_BOOST
                    } else {
                        BUFFERED_BOOST
                    };
                    let slot = &mut self.chaos[nb as usize];
                    *slot = (*slot + boost).min(CHAOS_MAX);
                }
            }
        }

        // Damping: self first, then the neighborhood.
        for &tiger in &self.stabilizers {
            let own = &mut self.chaos[tiger as usize];
            *own = (*own - SELF_DAMPING).max(CHAOS_MIN);
            for &nb in self.graph.neighbors(tiger) {
                let slot = &mut self.chaos[nb as usize];
                *slot = (*slot - NEIGHBOR_DAMPING).max(CHAOS_MIN);
            }
        }

        self.history.push(self.chaos.clone());

        let mean_after = mean_of(&self.chaos);
        self.peak_mean = self.peak_mean.max(mean_after);
        let summary = StepSummary {
            step,
            mean_before,
            panic_active: panic,
            sources_fired,
            mean_after,
            peak_chaos: self.chaos.iter().copied().fold(CHAOS_MIN, f64::max),
            saturated_nodes: self.chaos.iter().filter(|&&c| c >= CHAOS_MAX).count(),
        };
        trace!(
            step,
            mean_after,
            sources_fired,
            saturated = summary.saturated_nodes,
            "step"
        );
        summary
    }

    /// Call [`step`](Self::step) `steps` times and return the full history.
    pub fn run(&mut self, steps: usize) -> &[ChaosSnapshot] {
        for _ in 0..steps {
            self.step();
        }
        &self.history
    }

    /// Run whatever remains of the configured step count.
    pub fn run_configured(&mut self) -> &[ChaosSnapshot] {
        let remaining = self.config.steps.saturating_sub(self.steps_elapsed());
        self.run(remaining)
    }

    /// Run the remaining configured steps, collecting each step's summary.
    pub fn run_with_summaries(&mut self) -> Vec<StepSummary> {
        let remaining = self.config.steps.saturating_sub(self.steps_elapsed());
        (0..remaining).map(|_| self.step()).collect()
    }

    // ─── Accessors ───────────────────────────────────────────────────────────

    pub fn config(&self) -> &JungleConfig {
        &self.config
    }

    pub fn graph(&self) -> &SmallWorld {
        &self.graph
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn role_counts(&self) -> RoleCounts {
        RoleCounts::tally(&self.roles)
    }

    pub fn chaos(&self) -> &[f64] {
        &self.chaos
    }

    /// Owned copy of the current chaos vector.
    pub fn snapshot(&self) -> ChaosSnapshot {
        self.chaos.clone()
    }

    /// Every recorded snapshot, starting with the all-zero initial state.
    pub fn history(&self) -> &[ChaosSnapshot] {
        &self.history
    }

    pub fn steps_elapsed(&self) -> usize {
        self.history.len() - 1
    }

    /// True once the configured step count has been reached.
    pub fn is_done(&self) -> bool {
        self.steps_elapsed() >= self.config.steps
    }

    pub fn mean_chaos(&self) -> f64 {
        mean_of(&self.chaos)
    }

    /// Mean chaos of the last history entry.
    pub fn final_mean(&self) -> f64 {
        self.history.last().map(|s| mean_of(s)).unwrap_or(0.0)
    }

    /// Mean chaos over the nodes holding `role`; 0 if there are none.
    pub fn role_mean(&self, role: Role) -> f64 {
        let values: Vec<f64> = self
            .roles
            .iter()
            .zip(&self.chaos)
            .filter(|(r, _)| **r == role)
            .map(|(_, c)| *c)
            .collect();
        mean_of(&values)
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_mean(self.final_mean())
    }

    pub fn stats(&self) -> JungleStats {
        JungleStats {
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            roles: self.role_counts(),
            steps_elapsed: self.steps_elapsed(),
            final_mean_chaos: self.final_mean(),
            peak_mean_chaos: self.peak_mean,
            stabilizer_mean_chaos: self.role_mean(Role::Stabilizer),
            source_mean_chaos: self.role_mean(Role::Source),
            amplifier_mean_chaos: self.role_mean(Role::Amplifier),
            verdict: self.verdict(),
        }
    }
}
