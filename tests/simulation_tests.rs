#[cfg(test)]
mod tests {
    use jungle_engine::*;

    fn reference(stabilizer_pct: i32) -> JungleSimulation {
        JungleSimulation::new(JungleConfig::new(stabilizer_pct)).unwrap()
    }

    // ========== Critical Mass Regressions ==========

    #[test]
    fn test_ten_percent_tigers_collapse() {
        let mut sim = reference(10);
        let history = sim.run(150);
        let final_chaos = mean_of(&history[150]);
        println!("10% Tigers: final chaos = {:.2}", final_chaos);
        assert!(final_chaos > 60.0, "Chaos too low for 10% tigers: {}", final_chaos);
        assert_eq!(sim.verdict(), Verdict::Collapse);
    }

    #[test]
    fn test_forty_percent_tigers_stable() {
        let mut sim = reference(40);
        let history = sim.run(150);
        let final_chaos = mean_of(&history[150]);
        println!("40% Tigers: final chaos = {:.2}", final_chaos);
        assert!(final_chaos < 20.0, "Chaos too high for 40% tigers: {}", final_chaos);
        assert_eq!(sim.verdict(), Verdict::Stable);
    }

    #[test]
    fn test_configured_run_matches_explicit_run() {
        let mut a = reference(10);
        let mut b = reference(10);
        a.run_configured();
        b.run(150);
        assert_eq!(a.final_mean(), b.final_mean());
        assert!(a.is_done());
    }

    // ========== Determinism ==========

    #[test]
    fn test_identical_parameters_identical_history() {
        let mut a = reference(25);
        let mut b = reference(25);
        let ha = a.run(150).to_vec();
        let hb = b.run(150).to_vec();
        assert_eq!(ha.len(), hb.len());
        for (sa, sb) in ha.iter().zip(&hb) {
            for (x, y) in sa.iter().zip(sb) {
                assert_eq!(x.to_bits(), y.to_bits());
            }
        }
    }

    #[test]
    fn test_dynamics_seed_changes_history() {
        let mut a = JungleSimulation::new(JungleConfig::new(25).with_seed(1)).unwrap();
        let mut b = JungleSimulation::new(JungleConfig::new(25).with_seed(2)).unwrap();
        assert_ne!(a.run(50), b.run(50));
    }

    #[test]
    fn test_topology_shared_across_dynamics_seeds() {
        let a = JungleSimulation::new(JungleConfig::new(25).with_seed(1)).unwrap();
        let b = JungleSimulation::new(JungleConfig::new(40).with_seed(7)).unwrap();
        assert_eq!(a.graph(), b.graph());

        let c = JungleSimulation::new(JungleConfig::new(25).with_topology_seed(5)).unwrap();
        assert_ne!(a.graph(), c.graph());
    }

    #[test]
    fn test_instances_do_not_share_randomness() {
        // Interleaving two instances must not perturb either stream.
        let mut solo = reference(20);
        solo.run(80);

        let mut left = reference(20);
        let mut right = reference(35);
        for _ in 0..80 {
            left.step();
            right.step();
        }
        assert_eq!(left.history(), solo.history());
    }

    // ========== Invariants ==========

    #[test]
    fn test_chaos_stays_in_bounds() {
        for pct in [0, 10, 25, 40, 80] {
            let mut sim = reference(pct);
            for snapshot in sim.run(150) {
                assert!(snapshot.iter().all(|&c| (0.0..=100.0).contains(&c)));
            }
        }
    }

    #[test]
    fn test_role_partition() {
        for pct in [0, 5, 10, 33, 40, 50, 80] {
            let sim = reference(pct);
            let counts = sim.role_counts();
            assert_eq!(counts.total(), 60);
            assert_eq!(counts.sources, 12);
            let expected = (60.0 * pct as f64 / 100.0).round() as usize;
            assert_eq!(counts.stabilizers, expected, "pct {}", pct);
        }
    }

    #[test]
    fn test_history_length() {
        let mut sim = reference(10);
        assert_eq!(sim.history().len(), 1);
        assert_eq!(sim.run(37).len(), 38);
        assert_eq!(sim.run(3).len(), 41);
        assert_eq!(sim.steps_elapsed(), 40);
    }

    #[test]
    fn test_zero_stabilizers_zero_sources_stays_silent() {
        let config = JungleConfig::new(0).with_source_fraction(0.0);
        let mut sim = JungleSimulation::new(config).unwrap();
        sim.run(20);
        assert_eq!(sim.final_mean(), 0.0);
        assert_eq!(sim.role_counts().amplifiers, 60);
    }

    #[test]
    fn test_all_stabilizers_stays_silent() {
        let mut sim = reference(100);
        assert_eq!(sim.role_counts().sources, 0);
        sim.run(30);
        assert_eq!(sim.final_mean(), 0.0);
    }

    // ========== Snapshots ==========

    #[test]
    fn test_mutating_snapshot_does_not_leak() {
        let mut sim = reference(10);
        let mut twin = reference(10);
        sim.run(30);
        twin.run(30);

        let mut history = sim.history().to_vec();
        history[30].iter_mut().for_each(|c| *c = 99.0);
        let mut now = sim.snapshot();
        now[0] = -1.0;

        sim.run(40);
        twin.run(40);
        assert_eq!(sim.history(), twin.history());
        assert_ne!(history[30], sim.history()[30]);
    }

    // ========== Configuration Errors ==========

    #[test]
    fn test_construction_rejects_bad_parameters() {
        let cases = [
            (JungleConfig::new(-5), ConfigurationError::StabilizerPctOutOfRange(-5)),
            (JungleConfig::new(101), ConfigurationError::StabilizerPctOutOfRange(101)),
            (JungleConfig::new(10).with_network(60, 7, 0.15), ConfigurationError::OddDegree(7)),
            (
                JungleConfig::new(10).with_network(6, 8, 0.15),
                ConfigurationError::DegreeTooLarge { degree: 8, node_count: 6 },
            ),
            (JungleConfig::new(10).with_network(0, 0, 0.15), ConfigurationError::EmptyNetwork),
        ];
        for (config, expected) in cases {
            match JungleSimulation::new(config) {
                Err(e) => assert_eq!(e, expected),
                Ok(_) => panic!("expected {:?}", expected),
            }
        }
    }

    // ========== Stats & Reporting ==========

    #[test]
    fn test_stats_reflect_final_state() {
        let mut sim = reference(40);
        let summaries = sim.run_with_summaries();
        assert_eq!(summaries.len(), 150);

        let stats = sim.stats();
        assert_eq!(stats.node_count, 60);
        assert_eq!(stats.edge_count, 180);
        assert_eq!(stats.steps_elapsed, 150);
        assert_eq!(stats.final_mean_chaos, sim.final_mean());
        let peak = summaries.iter().map(|s| s.mean_after).fold(0.0, f64::max);
        assert_eq!(stats.peak_mean_chaos, peak);
        assert_eq!(stats.verdict, Verdict::Stable);

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"verdict\":\"STABLE\""));
    }

    #[test]
    fn test_summary_chains_between_steps() {
        let mut sim = reference(10);
        let first = sim.step();
        let second = sim.step();
        assert_eq!(first.step, 1);
        assert_eq!(second.step, 2);
        assert_eq!(first.mean_before, 0.0);
        assert_eq!(second.mean_before, first.mean_after);
        assert!(first.sources_fired <= 12);
    }

    #[test]
    fn test_collapse_enters_panic() {
        let mut sim = reference(10);
        let summaries: Vec<StepSummary> = (0..150).map(|_| sim.step()).collect();
        assert!(summaries.iter().any(|s| s.panic_active));
        assert!(summaries.last().map_or(false, |s| s.peak_chaos > 60.0));
    }

    // ========== Alternative Generators ==========

    #[test]
    fn test_chacha_runs_respect_invariants() {
        use rand_chacha::ChaCha8Rng;
        let config = JungleConfig::new(30).with_seed(11);
        let mut a = JungleSimulation::<ChaCha8Rng>::with_draw_source(config.clone()).unwrap();
        let mut b = JungleSimulation::<ChaCha8Rng>::with_draw_source(config).unwrap();
        a.run(100);
        b.run(100);
        assert_eq!(a.history(), b.history());
        assert_eq!(a.role_counts().total(), 60);
        assert!(a.history().iter().flatten().all(|&c| (0.0..=100.0).contains(&c)));
    }

    #[test]
    fn test_chacha_runs_share_reference_network() {
        use rand_chacha::ChaCha8Rng;
        for topology_seed in [99, 5] {
            let config = JungleConfig::new(40).with_topology_seed(topology_seed);
            let reference = JungleSimulation::new(config.clone()).unwrap();
            let chacha = JungleSimulation::<ChaCha8Rng>::with_draw_source(config.with_seed(3)).unwrap();
            assert_eq!(chacha.graph(), reference.graph(), "topology seed {}", topology_seed);
        }
    }
}

#[cfg(test)]
mod properties {
    use jungle_engine::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_chaos_bounded(
            pct in 0i32..=100,
            seed in 0u64..10_000,
            topology_seed in 0u64..10_000,
        ) {
            let config = JungleConfig::new(pct)
                .with_seed(seed)
                .with_topology_seed(topology_seed);
            let mut sim = JungleSimulation::new(config).unwrap();
            for snapshot in sim.run(60) {
                prop_assert!(snapshot.iter().all(|&c| (0.0..=100.0).contains(&c)));
            }
        }

        #[test]
        fn prop_partition_covers_every_node(
            pct in 0i32..=80,
            half_degree in 1usize..5,
            extra_nodes in 1usize..120,
            seed in any::<u64>(),
        ) {
            let degree = half_degree * 2;
            let node_count = degree + extra_nodes;
            let config = JungleConfig::new(pct)
                .with_seed(seed)
                .with_network(node_count, degree, 0.2);
            let sim = JungleSimulation::new(config).unwrap();
            let counts = sim.role_counts();
            prop_assert_eq!(counts.total(), node_count);
            prop_assert_eq!(counts.sources, (node_count as f64 * 0.2).round() as usize);
            prop_assert_eq!(
                counts.stabilizers,
                (node_count as f64 * pct as f64 / 100.0).round() as usize
            );
            prop_assert_eq!(sim.graph().edge_count(), node_count * half_degree);
        }

        #[test]
        fn prop_runs_are_reproducible(pct in 0i32..=100, seed in any::<u64>()) {
            let config = JungleConfig::new(pct).with_seed(seed);
            let mut a = JungleSimulation::new(config.clone()).unwrap();
            let mut b = JungleSimulation::new(config).unwrap();
            prop_assert_eq!(a.run(40), b.run(40));
        }

        #[test]
        fn prop_history_grows_by_one_per_step(steps in 0usize..60) {
            let mut sim = JungleSimulation::new(JungleConfig::new(20)).unwrap();
            prop_assert_eq!(sim.run(steps).len(), steps + 1);
        }
    }
}
