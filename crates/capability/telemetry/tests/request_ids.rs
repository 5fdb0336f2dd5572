use hr_telemetry::{metrics, new_request_ids, record_aggregation_pass, record_cache_hit};

#[test]
fn request_ids_non_empty() {
    let ids = new_request_ids();
    assert!(!ids.request_id.is_empty());
    assert!(!ids.trace_id.is_empty());
    assert_ne!(ids.request_id, ids.trace_id);
}

#[test]
fn counters_accumulate() {
    let before = metrics().snapshot();
    record_aggregation_pass(12);
    record_cache_hit();
    let after = metrics().snapshot();

    assert!(after.aggregation_passes > before.aggregation_passes);
    assert!(after.aggregation_latency_ms_total >= before.aggregation_latency_ms_total + 12);
    assert!(after.cache_hits > before.cache_hits);
}
