use chrono::NaiveDate;
use domain::{CapacityAggregate, Clock, ManualClock, Role};
use hr_cache::{AggregationCache, CacheStore, InMemoryCacheStore};
use std::sync::Arc;
use std::time::Duration;

fn setup(timeout_ms: u64) -> (Arc<ManualClock>, Arc<InMemoryCacheStore>, AggregationCache) {
    let clock = Arc::new(ManualClock::new(
        1_000_000,
        NaiveDate::from_ymd_opt(2024, 1, 11).expect("date"),
    ));
    let store = Arc::new(InMemoryCacheStore::new());
    let cache = AggregationCache::new(
        store.clone(),
        clock.clone(),
        Duration::from_millis(timeout_ms),
    );
    (clock, store, cache)
}

fn aggregate(total: usize) -> Arc<CapacityAggregate> {
    let mut aggregate = CapacityAggregate::default();
    aggregate.totals.total_employees = total;
    Arc::new(aggregate)
}

#[tokio::test]
async fn read_within_timeout_returns_same_object() {
    let (clock, _store, cache) = setup(60_000);
    let value = aggregate(10);
    cache.write(Role::Admin, value.clone()).await;

    clock.advance_ms(59_999);
    let hit = cache.read(Role::Admin).await.expect("hit");
    assert!(Arc::ptr_eq(&hit, &value));
}

#[tokio::test]
async fn read_after_timeout_misses() {
    let (clock, _store, cache) = setup(60_000);
    cache.write(Role::Admin, aggregate(10)).await;

    clock.advance_ms(60_000);
    assert!(cache.read(Role::Admin).await.is_none());
    // 过期条目仍可通过 peek 读取
    let stale = cache.peek(Role::Admin).await.expect("stale");
    assert_eq!(stale.totals.total_employees, 10);
}

#[tokio::test]
async fn different_role_misses() {
    let (_clock, _store, cache) = setup(60_000);
    cache.write(Role::Admin, aggregate(10)).await;

    assert!(cache.read(Role::Manager).await.is_none());
    assert!(cache.peek(Role::Manager).await.is_none());
}

#[tokio::test]
async fn single_slot_last_writer_wins() {
    let (_clock, store, cache) = setup(60_000);
    cache.write(Role::Admin, aggregate(10)).await;
    cache.write(Role::Manager, aggregate(3)).await;

    assert_eq!(store.current_key().as_deref(), Some("manager"));
    assert!(cache.read(Role::Admin).await.is_none());
    let hit = cache.read(Role::Manager).await.expect("hit");
    assert_eq!(hit.totals.total_employees, 3);
}

#[tokio::test]
async fn write_is_stamped_with_clock() {
    let (clock, store, cache) = setup(60_000);
    clock.advance_ms(250);
    cache.write(Role::Hr, aggregate(1)).await;

    let entry = store.get("hr").await.expect("get").expect("entry");
    assert_eq!(entry.written_at_ms, clock.now_ms());
}

#[tokio::test]
async fn read_within_uses_caller_timeout() {
    let (clock, _store, cache) = setup(60_000);
    cache.write(Role::Hr, aggregate(3)).await;

    clock.advance_ms(10_000);
    assert!(cache.read_within(Role::Hr, Duration::from_secs(5)).await.is_none());
    assert!(cache.read_within(Role::Hr, Duration::from_secs(20)).await.is_some());
    assert!(cache.read(Role::Hr).await.is_some());
}
