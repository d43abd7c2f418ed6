//! Gesture timer.
//!
//! The recognizer never sleeps. It asks a `TimerDriver` to schedule a token
//! and the host hands the token back through `LongPress::on_timer` once the
//! delay has elapsed. Whatever the driver does, a cancelled token must never
//! come back.

use crate::machine::TimerToken;

/// Schedules and cancels the deferred hold callback.
pub trait TimerDriver {
    /// Arrange for `token` to be delivered after `delay_ms`.
    fn schedule(&mut self, token: TimerToken, delay_ms: u32);

    /// Forget `token`. Cancelling an unknown or already-fired token is a no-op.
    fn cancel(&mut self, token: TimerToken);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Deadline {
    due_ms: u64,
    token: TimerToken,
}

/// Deterministic virtual clock.
///
/// Time only moves when `advance` is called, which makes it the driver of
/// choice for tests and for native hosts that already run a frame clock.
#[derive(Debug, Default)]
pub struct ManualTimers {
    now_ms: u64,
    queue: Vec<Deadline>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed since creation.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of scheduled, not yet delivered tokens.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_scheduled(&self, token: TimerToken) -> bool {
        self.queue.iter().any(|d| d.token == token)
    }

    /// Move the clock forward and return every token that came due, earliest
    /// deadline first. Returned tokens are removed from the queue.
    pub fn advance(&mut self, ms: u64) -> Vec<TimerToken> {
        self.now_ms = self.now_ms.saturating_add(ms);
        let now = self.now_ms;
        let mut due: Vec<Deadline> = Vec::new();
        self.queue.retain(|d| {
            if d.due_ms <= now {
                due.push(*d);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|d| (d.due_ms, d.token));
        due.into_iter().map(|d| d.token).collect()
    }
}

impl TimerDriver for ManualTimers {
    fn schedule(&mut self, token: TimerToken, delay_ms: u32) {
        let due_ms = self.now_ms.saturating_add(u64::from(delay_ms));
        self.queue.retain(|d| d.token != token);
        self.queue.push(Deadline { due_ms, token });
    }

    fn cancel(&mut self, token: TimerToken) {
        self.queue.retain(|d| d.token != token);
    }
}
