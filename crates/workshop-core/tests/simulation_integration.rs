//! Integration tests for the workshop simulation with MemorySink.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use workshop_core::fakes::MemorySink;
use workshop_core::{run_simulation, run_simulation_with_sink, SimConfig, StageId, STRATEGY};

/// Baseline workload scaled down to milliseconds so the suite stays fast.
fn fast_config() -> SimConfig {
    SimConfig {
        bays: 5,
        mechanics: 3,
        max_queue_arrival: 10,
        max_queue_mechanic: 10,
        max_queue_cleaning: 10,
        max_queue_delivery: 10,
        vehicles_a: 10,
        vehicles_b: 10,
        vehicles_c: 10,
        jitter_ms: 5,
        seed: 42,
        base_a_ms: 50,
        base_b_ms: 30,
        base_c_ms: 10,
    }
}

/// Test: 30-vehicle balanced workload runs to completion.
#[tokio::test(flavor = "multi_thread")]
async fn test_balanced_workload_completes() {
    let stats = run_simulation(fast_config(), false)
        .await
        .expect("simulation failed");

    assert_eq!(stats.total_vehicles, 30);
    assert!(stats.elapsed > Duration::ZERO);
    assert_eq!(stats.strategy, STRATEGY);
}

/// Test: empty population completes immediately with zero vehicles.
#[tokio::test]
async fn test_empty_population_completes_immediately() {
    let cfg = SimConfig {
        vehicles_a: 0,
        vehicles_b: 0,
        vehicles_c: 0,
        ..fast_config()
    };

    let stats = run_simulation(cfg, true).await.expect("simulation failed");

    assert_eq!(stats.total_vehicles, 0);
}

/// Test: exactly one ENTRA and one SALE per vehicle per stage, ENTRA first,
/// for a total of 2 x vehicles x 4 stages event lines.
#[tokio::test(flavor = "multi_thread")]
async fn test_event_lines_paired_per_vehicle_per_stage() {
    let cfg = fast_config();
    let total = cfg.total_vehicles();
    let sink = Arc::new(MemorySink::new());

    run_simulation_with_sink(cfg, true, sink.clone())
        .await
        .expect("simulation failed");

    let lines = sink.lines();
    assert_eq!(lines.len(), 2 * total * 4, "one ENTRA and one SALE per stage");

    // Count tokens per (vehicle, stage) and check ENTRA precedes SALE.
    let mut entries: HashMap<(u32, String), usize> = HashMap::new();
    let mut exits: HashMap<(u32, String), usize> = HashMap::new();

    for line in &lines {
        let parts: Vec<&str> = line.split(" | ").collect();
        assert_eq!(parts.len(), 6, "malformed line: {line}");

        let id: u32 = parts[1]
            .strip_prefix("Vehicle ")
            .expect("missing vehicle field")
            .parse()
            .expect("vehicle id not numeric");
        let stage = parts[3]
            .strip_prefix("Stage ")
            .expect("missing stage field")
            .to_string();
        let key = (id, stage);

        match parts[4] {
            "ENTRA" => *entries.entry(key).or_default() += 1,
            "SALE" => {
                assert_eq!(
                    entries.get(&key).copied().unwrap_or(0),
                    1,
                    "SALE before ENTRA for {key:?}"
                );
                *exits.entry(key).or_default() += 1;
            }
            other => panic!("unknown state token: {other}"),
        }
    }

    assert_eq!(entries.len(), total * 4);
    assert_eq!(exits.len(), total * 4);
    assert!(entries.values().all(|&n| n == 1));
    assert!(exits.values().all(|&n| n == 1));
}

/// Test: every vehicle visits the four stages in pipeline order.
#[tokio::test(flavor = "multi_thread")]
async fn test_vehicle_traverses_stages_in_order() {
    let cfg = SimConfig {
        vehicles_a: 2,
        vehicles_b: 2,
        vehicles_c: 2,
        ..fast_config()
    };
    let sink = Arc::new(MemorySink::new());

    run_simulation_with_sink(cfg, true, sink.clone())
        .await
        .expect("simulation failed");

    let expected: Vec<&str> = StageId::PIPELINE.iter().map(|s| s.name()).collect();

    let mut per_vehicle: HashMap<u32, Vec<String>> = HashMap::new();
    for line in sink.lines() {
        let parts: Vec<&str> = line.split(" | ").collect();
        if parts[4] != "ENTRA" {
            continue;
        }
        let id: u32 = parts[1].strip_prefix("Vehicle ").unwrap().parse().unwrap();
        let stage = parts[3].strip_prefix("Stage ").unwrap().to_string();
        per_vehicle.entry(id).or_default().push(stage);
    }

    assert_eq!(per_vehicle.len(), 6);
    for (id, visited) in per_vehicle {
        assert_eq!(visited, expected, "vehicle {id} visited stages out of order");
    }
}

/// Test: the same non-zero seed yields the same shuffled arrival order.
#[test]
fn test_seeded_arrival_order_is_deterministic() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use workshop_core::shuffled_population;

    let cfg = fast_config();

    let order_a: Vec<u32> = shuffled_population(&cfg, &mut StdRng::seed_from_u64(7))
        .iter()
        .map(|v| v.id)
        .collect();
    let order_b: Vec<u32> = shuffled_population(&cfg, &mut StdRng::seed_from_u64(7))
        .iter()
        .map(|v| v.id)
        .collect();
    let order_c: Vec<u32> = shuffled_population(&cfg, &mut StdRng::seed_from_u64(8))
        .iter()
        .map(|v| v.id)
        .collect();

    assert_eq!(order_a, order_b, "same seed must give same order");
    assert_ne!(order_a, order_c, "different seed should reorder 30 vehicles");
}

/// Test: capacity=1 / max_queue=1 everywhere with 5 contending vehicles
/// still completes (no deadlock at the tightest bounds).
#[tokio::test(flavor = "multi_thread")]
async fn test_single_slot_boundary_completes() {
    let cfg = SimConfig {
        bays: 1,
        mechanics: 1,
        max_queue_arrival: 1,
        max_queue_mechanic: 1,
        max_queue_cleaning: 1,
        max_queue_delivery: 1,
        vehicles_a: 2,
        vehicles_b: 2,
        vehicles_c: 1,
        ..fast_config()
    };

    let stats = tokio::time::timeout(Duration::from_secs(30), run_simulation(cfg, false))
        .await
        .expect("boundary run deadlocked")
        .expect("simulation failed");

    assert_eq!(stats.total_vehicles, 5);
}

/// Test: full-scale baseline (5 s / 3 s / 1 s bases, 500 ms jitter).
/// Ignored by default for runtime; run with `--ignored` to exercise it.
#[tokio::test(flavor = "multi_thread")]
#[ignore]
async fn test_full_scale_baseline_workload() {
    let cfg = SimConfig {
        seed: 42,
        ..SimConfig::default()
    };

    let stats = run_simulation(cfg, true).await.expect("simulation failed");

    assert_eq!(stats.total_vehicles, 30);
    assert!(stats.elapsed > Duration::from_secs(1));
}
