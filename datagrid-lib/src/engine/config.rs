//! Engine configuration

use std::time::Duration;

use crate::query::FilterMode;

/// Configuration for the in-memory engine.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use datagrid_lib::engine::EngineConfig;
/// use datagrid_lib::query::FilterMode;
///
/// let config = EngineConfig::default()
///     .with_latency(Duration::from_millis(250))
///     .with_filter_mode(FilterMode::Fuzzy);
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Simulated server latency applied before every query.
    ///
    /// Default: 1.5 seconds
    pub latency: Duration,

    /// How filter values are matched.
    ///
    /// Default: exact
    pub filter_mode: FilterMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(1500),
            filter_mode: FilterMode::Exact,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that answers immediately.
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
            ..Default::default()
        }
    }

    /// Sets the simulated latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Sets the filter mode.
    pub fn with_filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self
    }
}
