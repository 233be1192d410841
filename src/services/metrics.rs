use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec};

lazy_static! {
    // ── Event counters (increment on each event) ────────────────────────────
    pub static ref SCHEDULE_UPDATES_COUNTER: CounterVec = register_counter_vec!(
        "schedule_updates_total",
        "Schedule updates by operation",
        &["operation"]
    ).unwrap();

    pub static ref SCHEDULE_QUERIES_COUNTER: CounterVec = register_counter_vec!(
        "schedule_queries_total",
        "Read-only schedule queries by kind",
        &["query"]
    ).unwrap();

    pub static ref CONFLICTS_COUNTER: CounterVec = register_counter_vec!(
        "schedule_conflicts_detected_total",
        "Conflicts returned by explicit conflict checks, by kind",
        &["kind"]
    ).unwrap();
}

/// Force registration so every family shows up on the first scrape.
pub fn init() {
    lazy_static::initialize(&SCHEDULE_UPDATES_COUNTER);
    lazy_static::initialize(&SCHEDULE_QUERIES_COUNTER);
    lazy_static::initialize(&CONFLICTS_COUNTER);
    tracing::info!("Metrics: schedule counters registered");
}
