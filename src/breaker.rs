//! Failure-counting circuit guard with deadline-raced execution.
//!
//! Unlike the classic three-state breaker, this guard is a pure failure
//! counter: [`Breaker::trip`] increments, [`Breaker::reset`] zeroes, and the
//! open/closed predicates compare the count against a fixed threshold at
//! read time. There is no half-open probing and no cooldown clock — recovery
//! is entirely the caller's responsibility, driven by its own health checks.
//!
//! # Design
//!
//! The counter is a single `AtomicU64`; the threshold is immutable after
//! construction. Every operation takes `&self`, so a `Breaker` can be shared
//! across any number of tasks or threads (wrap it in `Arc`) with no external
//! locking.
//!
//! [`Breaker::execute`] races the supplied operation against a timer. Both
//! sides deliver their verdict into a buffered channel, the first verdict
//! received decides the call, and the loser finishes on its own and is
//! discarded — never double-counted, never blocked on delivery.
//!
//! # Example
//!
//! ```
//! use tripswitch::Breaker;
//!
//! let breaker = Breaker::new(3);
//! assert!(breaker.is_closed());
//!
//! // External failure detection drives the counter directly.
//! breaker.trip();
//! breaker.trip();
//! breaker.trip();
//! assert!(breaker.is_open());
//!
//! // Recovery is manual.
//! breaker.reset();
//! assert!(breaker.is_closed());
//! ```

use crate::error::GuardError;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, warn};

/// Verdict signalled by one of the two racing tasks in [`Breaker::execute`].
#[derive(Debug)]
enum Verdict<E> {
    /// The worker ran the operation to completion.
    Finished(Result<(), E>),

    /// The timer slept out the full deadline.
    Expired,
}

/// Failure-counting guard for calls to an unreliable dependency.
///
/// The breaker is open once `failures >= threshold` and closed below it;
/// the two predicates are complementary and there is no third state. A
/// threshold of zero makes the breaker permanently open, even after
/// [`reset`](Breaker::reset).
///
/// Thread-safe via atomic operations — no locking required.
#[derive(Debug)]
pub struct Breaker {
    /// Failure count at which the breaker opens. Immutable after construction.
    threshold: u64,

    /// Consecutive failures recorded so far.
    failures: AtomicU64,
}

impl Breaker {
    /// Create a new breaker that opens at the given failure threshold.
    ///
    /// A threshold of zero is accepted and yields a breaker that is open
    /// from the start.
    pub fn new(threshold: u64) -> Self {
        Self {
            threshold,
            failures: AtomicU64::new(0),
        }
    }

    /// Record one failure.
    ///
    /// N concurrent calls raise the count by exactly N — no lost updates.
    pub fn trip(&self) {
        let previous = self.failures.fetch_add(1, Ordering::Relaxed);
        if previous + 1 == self.threshold {
            warn!(
                "breaker opened after {} consecutive failures (threshold {})",
                previous + 1,
                self.threshold
            );
        }
    }

    /// Clear the failure count.
    ///
    /// Safe to call concurrently with [`trip`](Breaker::trip); the final
    /// count reflects whichever interleaving the scheduler produced.
    /// Calling it twice in a row is equivalent to calling it once.
    pub fn reset(&self) {
        let cleared = self.failures.swap(0, Ordering::Relaxed);
        if cleared != 0 {
            debug!("breaker reset, cleared {} recorded failures", cleared);
        }
    }

    /// Current failure count.
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// The failure threshold this breaker was constructed with.
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Check if the failure count has reached the threshold.
    ///
    /// An open breaker is a signal for the caller to short-circuit and fail
    /// fast instead of calling the dependency; the breaker itself never
    /// rejects anything.
    pub fn is_open(&self) -> bool {
        self.failures() >= self.threshold
    }

    /// Check if the failure count is still below the threshold.
    pub fn is_closed(&self) -> bool {
        self.failures() < self.threshold
    }

    /// Run `op` raced against a deadline, recording the outcome.
    ///
    /// The operation and a timer are spawned concurrently; whichever
    /// finishes first decides the call:
    ///
    /// - operation succeeds first → the breaker is [`reset`](Breaker::reset)
    ///   and `Ok(())` is returned;
    /// - operation fails first → the breaker is [`trip`](Breaker::trip)ped
    ///   and the operation's error is returned verbatim;
    /// - the deadline elapses first → the breaker is tripped and
    ///   [`GuardError::Timeout`] is returned.
    ///
    /// Exactly one of those side-effect/return pairs happens per call, and
    /// the trip or reset is applied before this method returns. The losing
    /// side keeps running to its natural end in the background — bounded by
    /// the longer of the deadline and the operation's own runtime — and its
    /// late verdict is discarded without being counted.
    ///
    /// A zero `timeout` expires immediately; against an equally instant
    /// operation the winner is scheduler-determined, but the call settles
    /// either way.
    ///
    /// # Undecided races
    ///
    /// If neither side ever delivers a verdict — possible only when the
    /// worker panicked *and* the timer task was torn down mid-sleep, as
    /// during runtime shutdown — the call returns `Ok(())` without touching
    /// the counter. A worker panic on a live runtime is instead resolved by
    /// the timer as a timeout once the deadline elapses.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::time::Duration;
    /// use tripswitch::{Breaker, GuardError};
    ///
    /// # async fn example() -> Result<(), GuardError<String>> {
    /// let breaker = Breaker::new(5);
    ///
    /// breaker
    ///     .execute(
    ///         || async {
    ///             // Your potentially failing operation
    ///             Ok::<(), String>(())
    ///         },
    ///         Duration::from_secs(1),
    ///     )
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute<F, Fut, E>(
        &self,
        op: F,
        timeout: Duration,
    ) -> Result<(), GuardError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Send + 'static,
    {
        // Capacity 2: both sides can deliver without blocking, so the loser
        // always runs to completion even though nobody is listening anymore.
        let (tx, mut rx) = mpsc::channel::<Verdict<E>>(2);

        let timer_tx = tx.clone();
        tokio::spawn(async move {
            time::sleep(timeout).await;
            let _ = timer_tx.send(Verdict::Expired).await;
        });

        let fut = op();
        tokio::spawn(async move {
            let result = fut.await;
            let _ = tx.send(Verdict::Finished(result)).await;
        });

        match rx.recv().await {
            Some(Verdict::Finished(Ok(()))) => {
                self.reset();
                Ok(())
            }
            Some(Verdict::Finished(Err(err))) => {
                self.trip();
                Err(GuardError::Operation(err))
            }
            Some(Verdict::Expired) => {
                debug!("guarded call exceeded its {:?} deadline", timeout);
                self.trip();
                Err(GuardError::Timeout)
            }
            None => {
                // Both senders dropped without a verdict. Deliberately a
                // no-op: the counter is left untouched and the call reports
                // success.
                debug!("guarded call ended with no verdict, breaker untouched");
                Ok(())
            }
        }
    }
}
