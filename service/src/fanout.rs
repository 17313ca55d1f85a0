//! Bounded concurrent fan-out with per-branch results.

use futures_util::future::join_all;
use std::future::Future;
use tokio::sync::Semaphore;

/// Run `task` for every key concurrently, at most `max_in_flight` at a time,
/// and wait for all of them.
///
/// Never fails fast: each branch's `Result` is returned next to its key, in
/// input order, whatever the other branches did.
pub async fn settle_all<K, T, E, F, Fut>(
    keys: impl IntoIterator<Item = K>,
    max_in_flight: usize,
    task: F,
) -> Vec<(K, Result<T, E>)>
where
    K: Copy,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let permits = Semaphore::new(max_in_flight.max(1));
    let permits = &permits;
    let task = &task;

    let branches = keys.into_iter().map(|key| async move {
        // The semaphore is never closed, so acquiring cannot fail.
        let _permit = permits.acquire().await.ok();
        (key, task(key).await)
    });

    join_all(branches).await
}
