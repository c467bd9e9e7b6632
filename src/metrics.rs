// Prometheus metrics definitions for the aimachine player.

use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // ── Gauges ───────────────────────────────────────────────────────

    /// Game sessions currently connected or connecting.
    pub static ref ACTIVE_SESSIONS: IntGauge =
        IntGauge::new("aimachine_active_sessions", "Game sessions currently running").unwrap();

    // ── Counters ─────────────────────────────────────────────────────

    /// Total sessions started, by game kind.
    pub static ref SESSIONS_STARTED_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("aimachine_sessions_started_total", "Total game sessions started"),
        &["game"],
    )
    .unwrap();

    /// Total sessions that ended, by game kind and outcome (closed, error).
    pub static ref SESSIONS_ENDED_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("aimachine_sessions_ended_total", "Total game sessions ended"),
        &["game", "outcome"],
    )
    .unwrap();

    /// Total moves sent to the game server, by game kind.
    pub static ref MOVES_SENT_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("aimachine_moves_sent_total", "Total moves sent"),
        &["game"],
    )
    .unwrap();

    /// Total soccer turn plans computed, by source (search, fallback).
    pub static ref TURN_PLANS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("aimachine_turn_plans_total", "Total soccer turn plans computed"),
        &["source"],
    )
    .unwrap();

    /// Inbound moves the local board rejected.
    pub static ref INVALID_MOVES_TOTAL: IntCounter = IntCounter::new(
        "aimachine_invalid_moves_total",
        "Inbound moves rejected by the local board",
    )
    .unwrap();

    // ── Histograms ───────────────────────────────────────────────────

    /// Number of moves in each searched soccer turn.
    pub static ref TURN_PLAN_MOVES: Histogram = Histogram::with_opts(
        HistogramOpts::new("aimachine_turn_plan_moves", "Moves per searched soccer turn")
            .buckets(vec![1.0, 2.0, 3.0, 4.0, 6.0, 8.0, 12.0, 16.0, 24.0]),
    )
    .unwrap();
}

/// Register all metrics with the custom registry. Call once at startup.
pub fn register_metrics() {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(ACTIVE_SESSIONS.clone()),
        Box::new(SESSIONS_STARTED_TOTAL.clone()),
        Box::new(SESSIONS_ENDED_TOTAL.clone()),
        Box::new(MOVES_SENT_TOTAL.clone()),
        Box::new(TURN_PLANS_TOTAL.clone()),
        Box::new(INVALID_MOVES_TOTAL.clone()),
        Box::new(TURN_PLAN_MOVES.clone()),
    ];

    for c in collectors {
        if let Err(e) = REGISTRY.register(c) {
            tracing::warn!("Metric registration skipped: {e}");
        }
    }
}

/// Serialize all registered metrics to the Prometheus text exposition format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {e}");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gather_metrics_returns_string() {
        register_metrics();
        // A second registration is reported and ignored
        register_metrics();
        let output = gather_metrics();
        assert!(output.is_empty() || output.contains("aimachine_"));
    }

    #[test]
    fn test_metric_increments() {
        ACTIVE_SESSIONS.inc();
        ACTIVE_SESSIONS.dec();

        SESSIONS_STARTED_TOTAL.with_label_values(&["soccer"]).inc();
        SESSIONS_ENDED_TOTAL
            .with_label_values(&["soccer", "closed"])
            .inc();
        MOVES_SENT_TOTAL.with_label_values(&["tictactoe"]).inc();
        TURN_PLANS_TOTAL.with_label_values(&["search"]).inc();
        INVALID_MOVES_TOTAL.inc();
        TURN_PLAN_MOVES.observe(2.0);

        assert!(TURN_PLANS_TOTAL.with_label_values(&["search"]).get() >= 1);
    }
}
