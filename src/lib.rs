// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Jungle Protocol Simulation Suite ("The Jungle")

pub mod config;
pub mod rng;
pub mod roles;
pub mod simulation;
pub mod topology;
pub mod types;

pub use config::{ConfigurationError, JungleConfig};
pub use rng::{DrawSource, ReferenceRng};
pub use simulation::JungleSimulation;
pub use topology::SmallWorld;
pub use types::*;

use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

/// Browser-facing handle around a reference-generator simulation.
#[wasm_bindgen]
pub struct JungleHandle {
    inner: JungleSimulation,
}

#[wasm_bindgen]
impl JungleHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(
        stabilizer_pct: i32,
        seed: u32,
        topology_seed: u32,
        node_count: u32,
        degree: u32,
        rewire_prob: f64,
        steps: u32,
    ) -> Result<JungleHandle, JsError> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let config = JungleConfig::new(stabilizer_pct)
            .with_seed(seed as u64)
            .with_topology_seed(topology_seed as u64)
            .with_network(node_count as usize, degree as usize, rewire_prob)
            .with_steps(steps as usize);
        let inner = JungleSimulation::new(config)?;
        Ok(Self { inner })
    }

    /// Reference experiment with the given stabilizer share.
    pub fn reference(stabilizer_pct: i32) -> Result<JungleHandle, JsError> {
        let inner = JungleSimulation::new(JungleConfig::new(stabilizer_pct))?;
        Ok(Self { inner })
    }

    pub fn step(&mut self) -> JsValue {
        let summary = self.inner.step();
        serde_wasm_bindgen::to_value(&summary).unwrap_or(JsValue::NULL)
    }

    /// Run N steps without returning per-step results.
    pub fn run(&mut self, steps: u32) {
        self.inner.run(steps as usize);
    }

    pub fn run_configured(&mut self) {
        self.inner.run_configured();
    }

    pub fn chaos(&self) -> Vec<f64> {
        self.inner.snapshot()
    }

    /// Snapshot at `index`, or an empty array past the end of history.
    pub fn history_entry(&self, index: u32) -> Vec<f64> {
        self.inner
            .history()
            .get(index as usize)
            .cloned()
            .unwrap_or_default()
    }

    pub fn history_len(&self) -> u32 {
        self.inner.history().len() as u32
    }

    pub fn roles(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.roles()).unwrap_or(JsValue::NULL)
    }

    pub fn edges(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.graph().edges()).unwrap_or(JsValue::NULL)
    }

    pub fn mean_chaos(&self) -> f64 {
        self.inner.mean_chaos()
    }

    pub fn stats(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.stats()).unwrap_or(JsValue::NULL)
    }

    pub fn is_done(&self) -> bool {
        self.inner.is_done()
    }

    /// Rebuild from the same configuration.
    pub fn reset(&mut self) -> Result<(), JsError> {
        self.inner = JungleSimulation::new(self.inner.config().clone())?;
        Ok(())
    }
}
