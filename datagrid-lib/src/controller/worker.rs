//! Background task that turns settled state changes into engine calls.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::ControllerConfig;
use super::Shared;
use crate::engine::QueryEngine;
use crate::error::QueryError;
use crate::query::Query;
use crate::query::QueryResult;

/// Drains the request slot until the controller shuts down.
///
/// Only one query runs at a time. Requests that arrive while one is in
/// flight wait in the slot (replacing each other) and are debounced again
/// once the current query completes or is cancelled.
pub(super) async fn run(
    shared: Arc<Shared>,
    engine: Arc<dyn QueryEngine>,
    mut requests: watch::Receiver<Option<Query>>,
    shutdown: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            changed = requests.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }

        if !debounce(&shared.config, &mut requests, &shutdown).await {
            break;
        }

        let token = shutdown.child_token();
        let Some(query) = shared.begin(&mut requests, &token) else {
            continue;
        };

        let outcome = tokio::select! {
            _ = token.cancelled() => None,
            outcome = dispatch(engine.as_ref(), &query, shared.config.query_timeout) => Some(outcome),
        };

        match outcome {
            Some(outcome) => shared.finish(&token, outcome),
            None => shared.discard(),
        }
    }

    debug!("Query worker stopped");
}

/// Waits until the request slot stays untouched for a full debounce window.
///
/// Returns `false` if the controller shut down while waiting.
async fn debounce(
    config: &ControllerConfig,
    requests: &mut watch::Receiver<Option<Query>>,
    shutdown: &CancellationToken,
) -> bool {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => return false,
            _ = tokio::time::sleep(config.debounce) => return true,
            changed = requests.changed() => {
                if changed.is_err() {
                    return false;
                }
                debug!("Request replaced within debounce window");
            }
        }
    }
}

async fn dispatch(
    engine: &dyn QueryEngine,
    query: &Query,
    timeout: Option<Duration>,
) -> Result<QueryResult, QueryError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, engine.execute(query))
            .await
            .unwrap_or(Err(QueryError::Timeout(limit))),
        None => engine.execute(query).await,
    }
}
