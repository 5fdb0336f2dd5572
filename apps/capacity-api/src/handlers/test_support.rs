use crate::AppState;
use api_contract::RawEmployee;
use chrono::NaiveDate;
use domain::{ManualClock, Role, ViewerContext};
use hr_aggregator::CapacityAggregator;
use hr_cache::AggregationCache;
use hr_events::EventBus;
use hr_feed::{CapacityFeed, FeedOptions};
use hr_gateway::InMemoryGateway;
use serde_json::json;
use std::sync::Arc;

pub fn employee(id: &str, department: &str) -> RawEmployee {
    serde_json::from_value(json!({ "id": id, "name": id, "department": department }))
        .expect("employee")
}

pub fn test_state(options: FeedOptions) -> (AppState, Arc<InMemoryGateway>) {
    test_state_for(Role::Admin, options)
}

pub fn test_state_for(role: Role, options: FeedOptions) -> (AppState, Arc<InMemoryGateway>) {
    let gateway = Arc::new(InMemoryGateway::new());
    gateway.set_employees(vec![
        employee("e-1", "Eng"),
        employee("e-2", "Eng"),
        employee("e-3", "Ops"),
    ]);
    let clock = Arc::new(ManualClock::new(
        1_700_000_000_000,
        NaiveDate::from_ymd_opt(2024, 1, 11).expect("date"),
    ));
    let cache = AggregationCache::in_memory(clock.clone(), options.cache_timeout);
    let aggregator = CapacityAggregator::new(gateway.clone(), cache);
    let feed = Arc::new(CapacityFeed::new(
        aggregator,
        ViewerContext::new("u-test", role),
        options,
    ));
    let state = AppState {
        feed,
        bus: EventBus::new(8),
        clock,
    };
    (state, gateway)
}
