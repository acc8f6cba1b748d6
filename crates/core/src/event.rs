use crate::chart::{ChartKind, Granularity};
use crate::state::SourceSnapshot;

/// All messages (events) that can flow through the dashboard event bus.
///
/// Sources:
/// - Sample feed task      → `Sampled`
/// - Config watcher task   → `ConfigReloaded`
/// - Stdin command reader  → `GranularitySelected`, `ChartKindSelected`, `Shutdown`
/// - Timer                 → `Tick`
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ── Sample source ─────────────────────────────────────────────────────────
    /// Fresh reading plus history copy from the feed task.
    Sampled(SourceSnapshot),

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk — triggers a live reload.
    ConfigReloaded,

    // ── User actions ──────────────────────────────────────────────────────────
    /// User picked a chart bucketing.
    GranularitySelected(Granularity),
    /// User switched between the line and bar chart.
    ChartKindSelected(ChartKind),

    // ── Internal ──────────────────────────────────────────────────────────────
    /// One-second timer tick — used to update the clock.
    Tick,
    /// Graceful shutdown requested.
    Shutdown,
}
