use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vcg_paths::mechanism::NoopObserver;
use vcg_paths::{cheapest_path, DisconnectPolicy, PathGraph, PathPaymentCalculator, PaymentError, Weight};

const PAIRS: [(&str, &str); 6] = [("A", "B"), ("A", "C"), ("A", "D"), ("B", "C"), ("B", "D"), ("C", "D")];

fn complete_graph(weights: [Weight; 6]) -> PathGraph<&'static str> {
    PathGraph::from_edges(PAIRS.iter().zip(weights).map(|(&(u, v), w)| (u, v, w))).unwrap()
}

fn canonical_edges<N: Clone + Ord + std::hash::Hash + std::fmt::Display>(graph: &PathGraph<N>) -> Vec<(N, N, Weight)> {
    let mut edges: Vec<_> = graph
        .edges()
        .into_iter()
        .map(|(u, v, w)| if u <= v { (u, v, w) } else { (v, u, w) })
        .collect();
    edges.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
    edges
}

fn payments_for(weights: [Weight; 6]) -> Vec<((&'static str, &'static str), Weight)> {
    let mut graph = complete_graph(weights);
    PathPaymentCalculator::with_observer(NoopObserver)
        .compute_payments(&mut graph, &"A", &"D")
        .unwrap()
        .into_iter()
        .collect()
}

#[test]
fn test_three_hop_path() {
    assert_eq!(
        payments_for([3.0, 5.0, 10.0, 1.0, 4.0, 1.0]),
        vec![(("A", "B"), -4.0), (("B", "C"), -2.0), (("C", "D"), -3.0)]
    );
}

#[test]
fn test_two_hop_path() {
    assert_eq!(
        payments_for([10.0, 1.0, 7.0, 3.0, 2.0, 5.0]),
        vec![(("A", "C"), -2.0), (("C", "D"), -5.0)]
    );
}

#[test]
fn test_tied_paths_pick_smaller_labels() {
    assert_eq!(
        payments_for([5.0, 5.0, 12.0, 5.0, 5.0, 5.0]),
        vec![(("A", "B"), -5.0), (("B", "D"), -5.0)]
    );
}

#[test]
fn test_cheap_direct_edge_pays_large_externality() {
    assert_eq!(payments_for([5.0, 5.0, 3.0, 5.0, 5.0, 5.0]), vec![(("A", "D"), -10.0)]);
}

#[test]
fn test_graph_untouched_after_success() {
    let mut graph = complete_graph([3.0, 5.0, 10.0, 1.0, 4.0, 1.0]);
    let before = canonical_edges(&graph);

    PathPaymentCalculator::with_observer(NoopObserver)
        .compute_payments(&mut graph, &"A", &"D")
        .unwrap();

    assert_eq!(canonical_edges(&graph), before);
}

#[test]
fn test_graph_untouched_after_disconnect() {
    let mut graph = PathGraph::from_edges([("A", "B", 1.0), ("B", "C", 2.0)]).unwrap();
    let before = canonical_edges(&graph);

    let err = PathPaymentCalculator::with_observer(NoopObserver)
        .compute_payments(&mut graph, &"A", &"C")
        .unwrap_err();

    assert_eq!(
        err,
        PaymentError::UnreachableAfterRemoval {
            u: "A".to_string(),
            v: "B".to_string(),
        }
    );
    assert_eq!(canonical_edges(&graph), before);
}

#[test]
fn test_near_tied_detour_keeps_target_reachable() {
    // the detour T-b-c-P undercuts P-M-T by 1e-12 with one more hop
    let mut graph = PathGraph::from_edges([
        ("S", "P", 1.0),
        ("P", "M", 1.0),
        ("M", "T", 1.0),
        ("T", "b", 0.3),
        ("b", "c", 0.3),
        ("c", "P", 1.4 - 1e-12),
    ])
    .unwrap();

    let payments = PathPaymentCalculator::with_observer(NoopObserver)
        .with_policy(DisconnectPolicy::Infinite)
        .compute_payments(&mut graph, &"S", &"T")
        .unwrap();

    assert_eq!(payments.path(), &["S", "P", "M", "T"]);
    assert_eq!(payments.get(&"S", &"P"), Some(f64::NEG_INFINITY));
    for (u, v) in [("P", "M"), ("M", "T")] {
        let payment = payments.get(&u, &v).unwrap();
        assert!((payment + 1.0).abs() < 1e-9, "({u}, {v}) pays {payment}");
    }
}

/// Connected random graph on `n` nodes: a random spanning tree plus extra edges
fn random_graph(rng: &mut StdRng, n: usize) -> PathGraph<String> {
    let mut graph = PathGraph::new();
    for i in 1..n {
        let parent = rng.gen_range(0..i);
        graph
            .add_edge(format!("n{parent}"), format!("n{i}"), rng.gen_range(1..20) as Weight)
            .unwrap();
    }
    for _ in 0..n * 2 {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v {
            graph
                .add_edge(format!("n{u}"), format!("n{v}"), rng.gen_range(1..20) as Weight)
                .unwrap();
        }
    }
    graph
}

#[test]
fn test_random_graph_properties() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..50 {
        let n = rng.gen_range(3..12);
        let mut graph = random_graph(&mut rng, n);
        let source = format!("n{}", rng.gen_range(0..n));
        let target = format!("n{}", rng.gen_range(0..n));
        if source == target {
            continue;
        }

        let before = canonical_edges(&graph);
        let path = cheapest_path(&graph, &source, &target).expect("graph is connected");
        let mut calculator = PathPaymentCalculator::with_observer(NoopObserver);
        let first = calculator.compute_payments(&mut graph, &source, &target);

        // mutation is always undone
        assert_eq!(canonical_edges(&graph), before);

        // determinism, error or not
        let second = calculator.compute_payments(&mut graph, &source, &target);
        assert_eq!(first, second);

        match first {
            Ok(payments) => {
                // one entry per path edge, in path order
                let edges: Vec<_> = path.edges().map(|(u, v)| (u.clone(), v.clone())).collect();
                let keys: Vec<_> = payments.iter().map(|(edge, _)| edge.clone()).collect();
                assert_eq!(keys, edges);

                for (_, payment) in payments.iter() {
                    assert!(payment <= 0.0, "positive payment {payment}");
                }
            }
            Err(PaymentError::UnreachableAfterRemoval { .. }) => {}
            Err(other) => panic!("unexpected error {other}"),
        }
    }
}
