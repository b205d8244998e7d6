//! Property-based tests for the pipe graph itself.

use std::collections::BTreeSet;

use irrigation_core::fixed::Fixed64;
use irrigation_core::grid::GridPosition;
use irrigation_network::{PipeClass, PipeNetwork, PressureConfig};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum GraphOp {
    Add(i32, i32),
    Remove(i32, i32),
}

fn arb_ops(max_ops: usize) -> impl Strategy<Value = Vec<GraphOp>> {
    proptest::collection::vec(
        prop_oneof![
            3 => (0..6i32, 0..6i32).prop_map(|(x, y)| GraphOp::Add(x, y)),
            1 => (0..6i32, 0..6i32).prop_map(|(x, y)| GraphOp::Remove(x, y)),
        ],
        1..=max_ops,
    )
}

/// Apply `ops`, tracking the expected occupied set alongside.
fn build(ops: &[GraphOp]) -> (PipeNetwork, BTreeSet<GridPosition>) {
    let mut net = PipeNetwork::new();
    let mut occupied = BTreeSet::new();
    for op in ops {
        match *op {
            GraphOp::Add(x, y) => {
                let p = GridPosition::new(x, y);
                assert_eq!(net.add_pipe(p, PipeClass::Pvc, 0), occupied.insert(p));
            }
            GraphOp::Remove(x, y) => {
                let p = GridPosition::new(x, y);
                assert_eq!(net.remove_pipe(p).is_some(), occupied.remove(&p));
            }
        }
    }
    (net, occupied)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every edge is listed on both sides, only between orthogonal
    /// neighbors, and adjacency lists stay sorted.
    #[test]
    fn edits_keep_graph_symmetric(ops in arb_ops(50)) {
        let (net, occupied) = build(&ops);
        prop_assert!(net.is_symmetric());
        prop_assert_eq!(net.positions().collect::<BTreeSet<_>>(), occupied);
        for pipe in net.pipes() {
            prop_assert!(pipe.connections().windows(2).all(|w| w[0] < w[1]));
        }
    }

    /// Reachability is an equivalence: if b is reachable from a, a is
    /// reachable from b, and hop counts agree in both directions.
    #[test]
    fn reachability_is_mutual(ops in arb_ops(50)) {
        let (net, _) = build(&ops);
        for a in net.positions() {
            let from_a = net.hop_distances(a);
            prop_assert_eq!(
                from_a.keys().copied().collect::<BTreeSet<_>>(),
                net.reachable_from(a)
            );
            for (&b, &hops) in &from_a {
                prop_assert_eq!(net.hop_distances(b).get(&a).copied(), Some(hops));
            }
        }
    }

    /// Pressure with a single source is positive exactly on the source's
    /// component and never rises with hop count.
    #[test]
    fn single_source_pressure_follows_hops(ops in arb_ops(50), sx in 0..6i32, sy in 0..6i32) {
        let (net, _) = build(&ops);
        let source = GridPosition::new(sx, sy);
        let config = PressureConfig::default();
        let pressures = net.compute_pressures([source], &config);
        let hops = net.hop_distances(source);

        for (pos, pressure) in &pressures {
            match hops.get(pos) {
                Some(&h) => prop_assert_eq!(*pressure, config.pressure_at_hops(h)),
                None => prop_assert_eq!(*pressure, Fixed64::ZERO),
            }
        }
        for h in 0..20u32 {
            prop_assert!(config.pressure_at_hops(h + 1) <= config.pressure_at_hops(h));
        }
    }
}
