//! Per-spec dispatch scheduling.
//!
//! The default is a plain sequential loop: one record, one pod, in input
//! order, no cluster API bursts. A bounded width can be configured for
//! throughput; correctness does not depend on ordering because every
//! execution is addressed by its own identity triple and provisioning is
//! idempotent.

use std::future::Future;

/// How the per-spec dispatch loop is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStrategy {
    /// One spec at a time, input order, stop at the first failure.
    Sequential,
    /// Up to `n` specs in flight at once.
    Bounded(usize),
}

impl DispatchStrategy {
    /// Pick a strategy for a configured width; `1` (or `0`) means
    /// sequential.
    pub fn for_parallelism(width: usize) -> Self {
        if width <= 1 {
            DispatchStrategy::Sequential
        } else {
            DispatchStrategy::Bounded(width)
        }
    }

    /// Run `f` over every item, honoring the strategy.
    ///
    /// Sequential mode never starts an item after a failure. Bounded mode
    /// stops issuing new work once a failure surfaces, but items already in
    /// flight run to completion; the first error observed is returned.
    pub async fn run_all<T, F, Fut, E>(&self, items: Vec<T>, f: F) -> Result<(), E>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        match self {
            DispatchStrategy::Sequential => {
                for item in items {
                    f(item).await?;
                }
                Ok(())
            }
            DispatchStrategy::Bounded(width) => {
                use futures::stream::StreamExt;

                let mut in_flight =
                    futures::stream::iter(items.into_iter().map(f)).buffer_unordered(*width);
                while let Some(result) = in_flight.next().await {
                    result?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn parallelism_of_one_is_sequential() {
        assert_eq!(DispatchStrategy::for_parallelism(0), DispatchStrategy::Sequential);
        assert_eq!(DispatchStrategy::for_parallelism(1), DispatchStrategy::Sequential);
        assert_eq!(DispatchStrategy::for_parallelism(4), DispatchStrategy::Bounded(4));
    }

    #[tokio::test]
    async fn sequential_visits_in_order_and_stops_on_error() {
        let visited = std::sync::Mutex::new(Vec::new());
        let result: Result<(), &str> = DispatchStrategy::Sequential
            .run_all(vec![1, 2, 3, 4], |n| {
                let visited = &visited;
                async move {
                    visited.lock().unwrap().push(n);
                    if n == 3 {
                        Err("boom")
                    } else {
                        Ok(())
                    }
                }
            })
            .await;

        assert_eq!(result, Err("boom"));
        assert_eq!(*visited.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn bounded_runs_everything_on_success() {
        let count = AtomicUsize::new(0);
        let result: Result<(), ()> = DispatchStrategy::Bounded(3)
            .run_all((0..10).collect(), |_: usize| {
                let count = &count;
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(count.load(Ordering::SeqCst), 10);
    }
}
