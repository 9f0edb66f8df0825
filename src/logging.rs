use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide switch gating the `tracing` events emitted by the Book and
/// Engine layers. Defaults to enabled; callers that want a quiet run (bulk
/// replay, benchmarking) can flip it off without touching a `tracing`
/// subscriber's filter configuration.
static ENABLED: AtomicBool = AtomicBool::new(true);

/// Enables or disables engine logging.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

/// Whether engine logging is currently enabled.
pub fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_enabled_and_toggles() {
        assert!(enabled());
        set_enabled(false);
        assert!(!enabled());
        set_enabled(true);
        assert!(enabled());
    }
}
