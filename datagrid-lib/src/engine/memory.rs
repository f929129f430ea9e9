//! In-memory engine with simulated latency

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::EngineConfig;
use super::QueryEngine;
use super::execute;
use crate::error::QueryError;
use crate::model::Record;
use crate::query::Query;
use crate::query::QueryResult;

/// A query engine over a read-only dataset held in memory.
///
/// Each query first sleeps for the configured latency, standing in for a
/// server round trip, then runs [`execute`] over the full dataset. Clones
/// share the dataset.
///
/// # Example
///
/// ```
/// use datagrid_lib::engine::{EngineConfig, InMemoryEngine};
/// use datagrid_lib::model::Record;
///
/// let engine = InMemoryEngine::new(vec![Record::new(1, "Ada", "Lovelace")])
///     .with_config(EngineConfig::instant());
/// assert_eq!(engine.dataset().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryEngine {
    dataset: Arc<[Record]>,
    config: EngineConfig,
}

impl InMemoryEngine {
    /// Creates an engine with the default config.
    pub fn new(dataset: impl Into<Arc<[Record]>>) -> Self {
        Self {
            dataset: dataset.into(),
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn dataset(&self) -> &[Record] {
        &self.dataset
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[async_trait]
impl QueryEngine for InMemoryEngine {
    async fn execute(&self, query: &Query) -> Result<QueryResult, QueryError> {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        let result = execute(&self.dataset, query, self.config.filter_mode);
        debug!(
            "Query over {} rows matched {} (page {} of {})",
            self.dataset.len(),
            result.total_count(),
            query.page.page_index() + 1,
            result.page_count()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::query::Filter;

    #[tokio::test(start_paused = true)]
    async fn test_latency_delays_result() {
        let engine = InMemoryEngine::new(vec![Record::new(1, "Ada", "Lovelace")])
            .with_config(EngineConfig::default().with_latency(Duration::from_millis(1500)));

        let started = tokio::time::Instant::now();
        let result = engine.execute(&Query::new()).await.unwrap();

        assert_eq!(result.total_count(), 1);
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_instant_engine_filters() {
        let engine = InMemoryEngine::new(vec![
            Record::new(1, "Ada", "Lovelace"),
            Record::new(2, "Alan", "Turing"),
        ])
        .with_config(EngineConfig::instant());

        let query = Query::new().filter(Filter::eq("lastName", "Turing"));
        let result = engine.execute(&query).await.unwrap();

        assert_eq!(result.records()[0].first_name(), "Alan");
    }
}
