//! Shutdown and cancellation signals.
//!
//! The core is single-threaded; these are the only values another
//! context (a console task, an ISR, a test) may touch while the main
//! loop runs.  Both flags are `const`-constructible so they can live in
//! a `static`.

use core::sync::atomic::{AtomicBool, Ordering};
use core::task::Poll;

use embassy_sync::waitqueue::AtomicWaker;
use futures_lite::future::poll_fn;

// ───────────────────────────────────────────────────────────────
// Shutdown
// ───────────────────────────────────────────────────────────────

/// Termination predicate for [`Controller::run`](crate::controller::Controller::run).
///
/// Checked once per poll iteration, never while a job is printing.
pub trait ShutdownSignal {
    fn requested(&mut self) -> bool;
}

/// Latching shutdown request settable from any context.
#[derive(Debug, Default)]
pub struct ShutdownFlag(AtomicBool);

impl ShutdownFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl ShutdownSignal for &ShutdownFlag {
    fn requested(&mut self) -> bool {
        self.is_requested()
    }
}

/// Stop after a fixed number of poll iterations.
#[derive(Debug, Clone, Copy)]
pub struct PollBudget {
    remaining: u32,
}

impl PollBudget {
    pub const fn new(polls: u32) -> Self {
        Self { remaining: polls }
    }
}

impl ShutdownSignal for PollBudget {
    fn requested(&mut self) -> bool {
        if self.remaining == 0 {
            return true;
        }
        self.remaining -= 1;
        false
    }
}

// ───────────────────────────────────────────────────────────────
// Job cancellation
// ───────────────────────────────────────────────────────────────

/// Cooperative cancel request for the job in progress.
///
/// The job processor polls it between sub-cycles only; a raised flag
/// never interrupts a head dwell or feed settle.  A host link blocked on
/// the next frame can await [`raised`](Self::raised) to give up the wait.
/// The processor clears the flag once it has acted on it.
pub struct CancelFlag {
    raised: AtomicBool,
    waker: AtomicWaker,
}

impl CancelFlag {
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
            waker: AtomicWaker::new(),
        }
    }

    pub fn cancel(&self) {
        self.raised.store(true, Ordering::Release);
        self.waker.wake();
    }

    /// Consume a pending request.  Returns `true` at most once per `cancel()`.
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::AcqRel)
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// Resolves once the flag is raised.  Does not consume the request.
    pub async fn raised(&self) {
        poll_fn(|cx| {
            self.waker.register(cx.waker());
            if self.is_raised() {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await;
    }
}

impl Default for CancelFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for CancelFlag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CancelFlag")
            .field("raised", &self.is_raised())
            .finish_non_exhaustive()
    }
}
