//! Tripswitch: concurrency-safe failure counting with deadline-raced execution
//!
//! # Overview
//!
//! This crate provides a single building block for callers that talk to an
//! unreliable dependency:
//!
//! - **Breaker**: a failure counter with a fixed threshold. `trip` and
//!   `reset` drive it, `is_open`/`is_closed` gate the caller's own
//!   short-circuit logic.
//! - **Guarded execution**: `Breaker::execute` races an arbitrary fallible
//!   operation against a deadline and maps the winner to a trip or a reset.
//!
//! This is deliberately not the classic three-state breaker. There is no
//! half-open state and no automatic recovery probing: the breaker opens when
//! the count reaches the threshold and closes only when somebody calls
//! `reset`.
//!
//! # Key Principles
//!
//! This crate is **pure logic** with zero knowledge of:
//! - Network protocols or transports
//! - The shape of the operations it guards
//! - Application-specific retry or health-check policy
//!
//! It never rejects a call on its own; an open breaker is advice the caller
//! acts on.
//!
//! # Architecture
//!
//! ```text
//!            Breaker::execute(op, timeout)
//!                        │
//!          ┌─────────────┴─────────────┐
//!          ▼                           ▼
//!   ┌─────────────┐            ┌──────────────┐
//!   │ worker task │            │  timer task  │
//!   │  op().await │            │ sleep(t_out) │
//!   └──────┬──────┘            └──────┬───────┘
//!          │     verdict channel      │
//!          └──────────┐  ┌────────────┘
//!                     ▼  ▼
//!              first verdict wins
//!                      │
//!        Ok  → reset   │   Err → trip,  Expired → trip
//!                      ▼
//!              returned to caller
//! ```
//!
//! The losing task keeps running to its natural end and its verdict is
//! dropped — it is never counted and never delivered.
//!
//! # Usage Example
//!
//! ```no_run
//! use std::time::Duration;
//! use tripswitch::{Breaker, GuardError};
//!
//! # async fn example() -> Result<(), GuardError<String>> {
//! let breaker = Breaker::new(5);
//!
//! if breaker.is_open() {
//!     // Fail fast instead of calling the remote dependency.
//!     return Err(GuardError::Operation("circuit open".to_string()));
//! }
//!
//! breaker
//!     .execute(
//!         || async {
//!             // Your potentially failing operation
//!             Ok::<(), String>(())
//!         },
//!         Duration::from_secs(1),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod breaker;
pub mod error;

// Re-export main types for convenience
pub use breaker::Breaker;
pub use error::GuardError;

/// Prelude module for convenient imports
///
/// # Example
/// ```
/// use tripswitch::prelude::*;
/// ```
pub mod prelude {
    pub use super::breaker::Breaker;
    pub use super::error::GuardError;
}
