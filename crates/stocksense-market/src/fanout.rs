//! Bounded fan-out with per-operation timeouts.
//!
//! Every [`Operation`] carries its own timeout and a fallback value. Running
//! an operation never fails: a timeout, an error, or a panic substitutes the
//! fallback and logs a warning. At most `max_concurrent` operations hold a
//! permit at once; the rest queue on the semaphore.
//!
//! A timed-out task is dropped, which aborts any request it had in flight.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use tokio::sync::Semaphore;

/// One named unit of work for [`FanOut`].
pub struct Operation<'a, T> {
    name: &'static str,
    timeout: Duration,
    fallback: T,
    task: BoxFuture<'a, Result<T, String>>,
}

impl<'a, T> Operation<'a, T> {
    pub fn new<F, E>(name: &'static str, timeout: Duration, fallback: T, task: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'a,
        E: Display,
    {
        Self {
            name,
            timeout,
            fallback,
            task: Box::pin(async move { task.await.map_err(|e| e.to_string()) }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    TimedOut,
    Failed(String),
}

/// The value an operation settled on, real or fallback.
#[derive(Debug)]
pub struct Settled<T> {
    pub name: &'static str,
    pub value: T,
    pub outcome: Outcome,
}

impl<T> Settled<T> {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.outcome != Outcome::Completed
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

#[derive(Debug, Clone)]
pub struct FanOut {
    permits: Arc<Semaphore>,
    max_concurrent: usize,
}

impl FanOut {
    /// A zero cap is raised to one.
    #[must_use]
    pub fn new(max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    #[must_use]
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Run one operation under the shared concurrency cap.
    ///
    /// The timeout starts once a permit is held, so queueing time is not
    /// charged against the operation.
    pub async fn run<T>(&self, op: Operation<'_, T>) -> Settled<T> {
        let Operation {
            name,
            timeout,
            fallback,
            task,
        } = op;

        // The semaphore is never closed, so acquisition only fails on shutdown.
        let _permit = self.permits.acquire().await.ok();
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

        match tokio::time::timeout(timeout, AssertUnwindSafe(task).catch_unwind()).await {
            Ok(Ok(Ok(value))) => Settled {
                name,
                value,
                outcome: Outcome::Completed,
            },
            Ok(Ok(Err(error))) => {
                tracing::warn!(operation = name, error = %error, "operation failed, using fallback");
                Settled {
                    name,
                    value: fallback,
                    outcome: Outcome::Failed(error),
                }
            }
            Ok(Err(_)) => {
                tracing::warn!(operation = name, "operation panicked, using fallback");
                Settled {
                    name,
                    value: fallback,
                    outcome: Outcome::Failed("operation panicked".to_string()),
                }
            }
            Err(_) => {
                tracing::warn!(operation = name, timeout_ms, "operation timed out, using fallback");
                Settled {
                    name,
                    value: fallback,
                    outcome: Outcome::TimedOut,
                }
            }
        }
    }

    /// Run a homogeneous set of operations and key the results by name.
    pub async fn run_all<'a, T>(
        &self,
        operations: Vec<Operation<'a, T>>,
    ) -> BTreeMap<&'static str, Settled<T>> {
        join_all(operations.into_iter().map(|op| self.run(op)))
            .await
            .into_iter()
            .map(|settled| (settled.name, settled))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test]
    async fn one_slow_and_one_failing_operation_do_not_affect_the_third() {
        let fanout = FanOut::new(3);
        let ops = vec![
            Operation::new("news", ms(500), "fallback-news".to_string(), async {
                Ok::<_, String>("real-news".to_string())
            }),
            Operation::new("sentiment", ms(30), "fallback-sentiment".to_string(), async {
                tokio::time::sleep(ms(300)).await;
                Ok::<_, String>("real-sentiment".to_string())
            }),
            Operation::new("analyst", ms(500), "fallback-analyst".to_string(), async {
                Err::<String, _>("upstream 503")
            }),
        ];

        let results = fanout.run_all(ops).await;

        assert_eq!(results["news"].value, "real-news");
        assert_eq!(results["news"].outcome, Outcome::Completed);
        assert_eq!(results["sentiment"].value, "fallback-sentiment");
        assert_eq!(results["sentiment"].outcome, Outcome::TimedOut);
        assert_eq!(results["analyst"].value, "fallback-analyst");
        assert_eq!(
            results["analyst"].outcome,
            Outcome::Failed("upstream 503".to_string())
        );
    }

    #[tokio::test]
    async fn never_exceeds_the_worker_cap() {
        let fanout = FanOut::new(2);
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let ops = ["a", "b", "c", "d", "e"]
            .into_iter()
            .map(|name| {
                let in_flight = Arc::clone(&in_flight);
                let peak = Arc::clone(&peak);
                Operation::new(name, ms(1_000), 0_u8, async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(ms(20)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Ok::<u8, String>(1)
                })
            })
            .collect();

        let results = fanout.run_all(ops).await;

        assert_eq!(results.len(), 5);
        assert!(results.values().all(|s| !s.is_fallback()));
        assert_eq!(peak.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn timed_out_task_is_dropped() {
        let fanout = FanOut::new(1);
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);

        let settled = fanout
            .run(Operation::new("slow", ms(10), false, async move {
                tokio::time::sleep(ms(80)).await;
                flag.store(true, Ordering::SeqCst);
                Ok::<bool, String>(true)
            }))
            .await;
        tokio::time::sleep(ms(150)).await;

        assert_eq!(settled.outcome, Outcome::TimedOut);
        assert!(!settled.value);
        assert!(!finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn panicking_task_settles_on_fallback() {
        let fanout = FanOut::new(1);
        let settled = fanout
            .run(Operation::new("boom", ms(100), 7_u32, async {
                if fanout_should_panic() {
                    panic!("provider exploded");
                }
                Ok::<u32, String>(1)
            }))
            .await;

        assert_eq!(settled.value, 7);
        assert!(matches!(settled.outcome, Outcome::Failed(_)));
    }

    fn fanout_should_panic() -> bool {
        true
    }

    #[test]
    fn zero_cap_is_raised_to_one() {
        assert_eq!(FanOut::new(0).max_concurrent(), 1);
    }
}
