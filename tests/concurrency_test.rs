use kitchen_dispatch::lifecycle::Dispatcher;
use kitchen_dispatch::model::Order;
use kitchen_dispatch::pairing::StrategyKind;
use kitchen_dispatch::travel::{ScriptedTravelTime, SeededTravelTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::time::Duration;

fn random_orders(seed: u64, count: usize) -> Vec<Order> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| Order::new(format!("order-{i}"), format!("Dish {i}"), rng.gen_range(0..=15)))
        .collect()
}

async fn run(kind: StrategyKind, orders: Vec<Order>, seed: u64) -> Dispatcher {
    let dispatcher = Dispatcher::new(kind, SeededTravelTime::with_seed(seed));
    for order in orders {
        dispatcher.dispatch_order(order).unwrap();
    }
    dispatcher.wait().await;
    dispatcher
}

/// Exactly one completion per order, and the ledger agrees with the totals.
#[tokio::test(start_paused = true)]
async fn test_every_order_completes_once() {
    for kind in [StrategyKind::Matched, StrategyKind::Fifo] {
        for seed in 0..5 {
            let orders = random_orders(seed, 60);
            let dispatcher = run(kind, orders, seed).await;

            let stats = dispatcher.statistics();
            let pickups = dispatcher.pickups();
            assert_eq!(stats.total_pairs, 60, "{kind} seed {seed}");
            assert_eq!(dispatcher.pending(), 0);

            let orders: HashSet<_> = pickups.iter().map(|p| p.order_id.clone()).collect();
            let couriers: HashSet<_> = pickups.iter().map(|p| p.courier_id.clone()).collect();
            assert_eq!(orders.len(), 60, "{kind}: an order was paired twice");
            assert_eq!(couriers.len(), 60, "{kind}: a courier was paired twice");

            let food: u128 = pickups.iter().map(|p| p.food_wait.as_millis()).sum();
            let courier: u128 = pickups.iter().map(|p| p.courier_wait.as_millis()).sum();
            assert_eq!(food, u128::from(stats.total_food_wait_ms));
            assert_eq!(courier, u128::from(stats.total_courier_wait_ms));
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_matched_never_crosses_orders() {
    let dispatcher = run(StrategyKind::Matched, random_orders(11, 80), 11).await;
    for pickup in dispatcher.pickups() {
        assert_eq!(pickup.order_id, pickup.courier_order_id);
    }
}

/// The k-th order to become ready goes to the k-th courier to arrive.
#[tokio::test(start_paused = true)]
async fn test_fifo_preserves_readiness_order() {
    let dispatcher = run(StrategyKind::Fifo, random_orders(23, 80), 23).await;

    let mut pickups = dispatcher.pickups();
    pickups.sort_by_key(|p| p.order_ready_at);
    for pair in pickups.windows(2) {
        assert!(
            pair[0].courier_ready_at <= pair[1].courier_ready_at,
            "later order took an earlier courier: {:?} then {:?}",
            pair[0],
            pair[1]
        );
    }
}

/// Same seed, same timeline, same totals.
#[tokio::test(start_paused = true)]
async fn test_fixed_seed_runs_are_reproducible() {
    let first = run(StrategyKind::Fifo, random_orders(5, 30), 1).await.statistics();
    let second = run(StrategyKind::Fifo, random_orders(5, 30), 1).await.statistics();
    assert_eq!(first, second);
}

/// Zero delays on a multi-threaded runtime: both sides of every pair race
/// for the pairing lock at once. A lost wake-up would hang `wait()`.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_arrivals_never_deadlock() {
    for kind in [StrategyKind::Matched, StrategyKind::Fifo] {
        let dispatcher = Dispatcher::new(kind, ScriptedTravelTime::new([0]));
        for i in 0..500 {
            dispatcher.dispatch_order(Order::new(format!("{i}"), "Toast", 0)).unwrap();
        }
        tokio::time::timeout(Duration::from_secs(30), dispatcher.wait())
            .await
            .unwrap_or_else(|_| panic!("{kind}: dispatch run deadlocked"));

        assert_eq!(dispatcher.statistics().total_pairs, 500, "{kind}");
        assert_eq!(dispatcher.pickups().len(), 500, "{kind}");
    }
}
