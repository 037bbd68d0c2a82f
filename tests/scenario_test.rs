use kitchen_dispatch::lifecycle::Dispatcher;
use kitchen_dispatch::model::{Order, OrderId};
use kitchen_dispatch::pairing::StrategyKind;
use kitchen_dispatch::stats::{Statistics, StatsAggregator};
use kitchen_dispatch::travel::ScriptedTravelTime;
use std::collections::HashSet;

/// Prep times 2, 10, 4, 6 seconds against courier travel times 4, 5, 3, 8.
///
/// Matched:
/// - courier 1 arrives after food 1 (food waits 2s)
/// - courier 2 arrives before food 2 (courier waits 5s)
/// - courier 3 arrives before food 3 (courier waits 1s)
/// - courier 4 arrives after food 4 (food waits 2s)
///
/// FIFO:
/// - [2s] food 1 queued
/// - [3s] courier 3 takes food 1 (food waits 1s)
/// - [4s] food 3 and courier 1 meet (neither waits)
/// - [5s] courier 2 queued
/// - [6s] courier 2 takes food 4 (courier waits 1s)
/// - [8s] courier 4 queued
/// - [10s] courier 4 takes food 2 (courier waits 2s)
fn scenario_orders() -> Vec<Order> {
    vec![
        Order::new("1", "Food 1", 2),
        Order::new("2", "Food 2", 10),
        Order::new("3", "Food 3", 4),
        Order::new("4", "Food 4", 6),
    ]
}

fn scenario_travel_times() -> ScriptedTravelTime {
    ScriptedTravelTime::new([4, 5, 3, 8])
}

async fn run_scenario(kind: StrategyKind) -> Dispatcher {
    let dispatcher = Dispatcher::new(kind, scenario_travel_times());
    for order in scenario_orders() {
        dispatcher.dispatch_order(order).expect("dispatch should not fail");
    }
    dispatcher.wait().await;
    dispatcher
}

#[tokio::test(start_paused = true)]
async fn test_matched_scenario_totals() {
    let dispatcher = run_scenario(StrategyKind::Matched).await;

    let stats = dispatcher.report_statistics();
    assert_eq!(stats.total_pairs, 4);
    assert_eq!(stats.total_food_wait_ms, 4_000);
    assert_eq!(stats.total_courier_wait_ms, 6_000);
    assert_eq!(stats.average_food_wait_ms(), 1_000.0);
    assert_eq!(stats.average_courier_wait_ms(), 1_500.0);
    assert_eq!(dispatcher.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_matched_pairs_share_an_order_id() {
    let dispatcher = run_scenario(StrategyKind::Matched).await;

    let pickups = dispatcher.pickups();
    assert_eq!(pickups.len(), 4);
    for pickup in &pickups {
        assert_eq!(pickup.order_id, pickup.courier_order_id);
    }
    let ids: HashSet<_> = pickups.iter().map(|p| p.order_id.clone()).collect();
    assert_eq!(ids.len(), 4, "every order picked up exactly once");
}

#[tokio::test(start_paused = true)]
async fn test_fifo_scenario_totals() {
    let dispatcher = run_scenario(StrategyKind::Fifo).await;

    let stats = dispatcher.report_statistics();
    assert_eq!(stats.total_pairs, 4);
    assert_eq!(stats.total_food_wait_ms, 1_000);
    assert_eq!(stats.total_courier_wait_ms, 3_000);
}

#[tokio::test(start_paused = true)]
async fn test_fifo_pairs_by_readiness_not_identity() {
    let dispatcher = run_scenario(StrategyKind::Fifo).await;

    let pairs: HashSet<(OrderId, OrderId)> = dispatcher
        .pickups()
        .into_iter()
        .map(|p| (p.order_id, p.courier_order_id))
        .collect();
    let expected: HashSet<(OrderId, OrderId)> = [("1", "3"), ("3", "1"), ("4", "2"), ("2", "4")]
        .into_iter()
        .map(|(order, courier)| (OrderId::from(order), OrderId::from(courier)))
        .collect();
    assert_eq!(pairs, expected);
}

#[tokio::test(start_paused = true)]
async fn test_one_side_of_every_pair_waits_zero() {
    for kind in [StrategyKind::Matched, StrategyKind::Fifo] {
        let dispatcher = run_scenario(kind).await;
        for pickup in dispatcher.pickups() {
            assert!(
                pickup.food_wait.is_zero() || pickup.courier_wait.is_zero(),
                "{kind}: {pickup:?}"
            );
        }
    }
}

#[tokio::test]
async fn test_zero_orders_reports_zero_averages() {
    let dispatcher = Dispatcher::new(StrategyKind::Fifo, scenario_travel_times());
    dispatcher.wait().await;

    let stats = dispatcher.report_statistics();
    assert_eq!(stats, Statistics::default());
    assert_eq!(stats.average_food_wait_ms(), 0.0);
    assert_eq!(stats.average_courier_wait_ms(), 0.0);

    assert_eq!(StatsAggregator::new().report(), Statistics::default());
}
