//! Semaphore-gated parallel map
//!
//! Every item gets its own tokio task straight away; a shared semaphore decides
//! how many task bodies run at once. Separating the limit from the body keeps
//! both testable on their own.

use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Semaphore, SemaphorePermit};

/// Runs `body` once per item with at most `limit` bodies in flight
///
/// Returns after every body finished. Results come back in completion order.
/// A `limit` of zero is treated as one. A panicking body is re-raised here.
pub async fn bounded_map<I, T, R, F, Fut>(items: I, limit: usize, body: F) -> Vec<R>
where
    I: IntoIterator<Item = T>,
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let body = Arc::new(body);

    let mut units: FuturesUnordered<_> = items
        .into_iter()
        .map(|item| {
            let semaphore = Arc::clone(&semaphore);
            let body = Arc::clone(&body);
            tokio::spawn(async move {
                let _permit = acquire_semaphore_permit(&semaphore).await;
                body(item).await
            })
        })
        .collect();

    let mut results = Vec::with_capacity(units.len());
    while let Some(joined) = units.next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => tracing::warn!(error = %e, "unit of work was cancelled"),
        }
    }

    results
}

/// The semaphore is never closed, so acquiring cannot fail
pub(crate) async fn acquire_semaphore_permit(semaphore: &Semaphore) -> SemaphorePermit<'_> {
    semaphore
        .acquire()
        .await
        .expect("Failed to acquire semaphore permit for concurrent git operations")
}
