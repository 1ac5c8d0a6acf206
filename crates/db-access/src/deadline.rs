//! Per-operation deadlines.

use crate::error::StoreError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Deadline budgets by operation class.
///
/// Listing, counting and single-document calls use `short`; schema scans and
/// paginated reads use `medium`; multi-collection analysis and bulk updates
/// use `long`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadlines {
    pub short: Duration,
    pub medium: Duration,
    pub long: Duration,
}

impl Default for Deadlines {
    fn default() -> Self {
        Self {
            short: Duration::from_secs(10),
            medium: Duration::from_secs(30),
            long: Duration::from_secs(60),
        }
    }
}

/// Run `future` under `budget`, mapping expiry to [`StoreError::Timeout`].
pub async fn with_deadline<T, F>(
    operation: &'static str,
    budget: Duration,
    future: F,
) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(budget, future).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("{} exceeded its {:?} deadline", operation, budget);
            Err(StoreError::Timeout {
                operation,
                after: budget,
            })
        }
    }
}

/// Run `future` until the shared `deadline` instant.
///
/// Used when several calls draw from one `budget`; the budget only labels
/// the timeout error.
pub async fn with_deadline_at<T, F>(
    operation: &'static str,
    deadline: Instant,
    budget: Duration,
    future: F,
) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout_at(deadline, future).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("{} exceeded its shared {:?} deadline", operation, budget);
            Err(StoreError::Timeout {
                operation,
                after: budget,
            })
        }
    }
}
