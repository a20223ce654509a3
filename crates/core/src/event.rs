use crate::state::Readings;

/// All messages (events) that can flow through the dashboard event loop.
///
/// Sources:
/// - Sampler task        → `Readings`
/// - Config watcher task → `ConfigReloaded`
/// - Keyboard            → `Refresh`, `Toggle*`, `Shutdown`
#[derive(Debug, Clone)]
pub enum Message {
    // ── Sampler ───────────────────────────────────────────────────────────────
    /// Fresh readings from one acquisition pass.
    Readings(Readings),

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk — triggers a live reload.
    ConfigReloaded,

    // ── User actions ──────────────────────────────────────────────────────────
    /// Sample now instead of waiting for the next interval tick.
    Refresh,
    /// Switch every metric without a configured override between sparkline
    /// and grid rendering.
    ToggleDisplayMode,
    /// Show or hide the trend / average annotation.
    ToggleTrends,

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Graceful shutdown requested.
    Shutdown,
}
