//! History ring buffer behaviour over a long-running monitoring session.

mod helpers;

use std::time::Duration;

use net_status::{MonitorEngine, ScheduleSettings};

use helpers::{endpoints, wait_for_cycles, QueuedIdentity, ScriptedProbe};

#[tokio::test]
async fn test_history_holds_last_twenty_cycles_in_order() {
    let probe = ScriptedProbe::new(&[
        ("up.example", Some(Duration::from_millis(1))),
        ("down.example", None),
    ]);
    let engine = MonitorEngine::new(
        endpoints(&["up.example", "down.example"]),
        probe,
        QueuedIdentity::new(vec![Err("RateLimited")]),
        ScheduleSettings {
            batch_interval: Duration::from_millis(20),
            probe_timeout: Duration::from_millis(5),
            identity_refresh_min: Duration::from_secs(60),
            identity_refresh_max: Duration::from_secs(60),
        },
    )
    .unwrap();

    engine.start_monitoring().await;
    wait_for_cycles(&engine, 25).await;
    engine.stop_monitoring().await;
    // Let a cycle racing with the stop commit.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let completed = engine.cycles_completed();
    assert!(completed >= 25);

    let history = engine.history().await;
    assert_eq!(history.len(), 20);
    assert!(history.iter().all(|e| e.online_count == 1 && e.total == 2));
    assert!(history.windows(2).all(|w| w[0].time <= w[1].time));

    let metrics = engine.summarize().await;
    assert_eq!(history.last().map(|e| e.time), metrics.last_update);
    engine.shutdown().await;
}
