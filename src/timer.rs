//! Host-driven timer slots.
//!
//! The core never owns a real timer. Each logical timer (game tick, game
//! auto-stop, loading expiry, stats refresh) is a [`TimerSlot`] holding at most
//! one armed deadline, measured against the host's monotonic millisecond clock
//! (`performance.now()` in the browser). The host calls `poll(now)` from its
//! event loop; arming or cancelling replaces the previous deadline outright, so
//! a deadline from an earlier session can never fire after a state transition.

/// Repeating slots never tick faster than this.
const MIN_PERIOD_MS: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Deadline {
    due_ms: f64,
    period_ms: Option<f64>,
}

/// A single cancellable timer slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimerSlot {
    deadline: Option<Deadline>,
    generation: u64, // bumped on every arm / cancel
}

impl TimerSlot {
    pub const fn new() -> Self {
        Self { deadline: None, generation: 0 }
    }

    /// Arm a one-shot deadline `delay_ms` after `now_ms`, dropping any previous one.
    pub fn arm_once(&mut self, now_ms: f64, delay_ms: f64) -> u64 {
        self.arm(Deadline { due_ms: now_ms + delay_ms.max(0.0), period_ms: None })
    }

    /// Arm a repeating deadline firing every `period_ms`, first at `now_ms + period_ms`.
    pub fn arm_repeating(&mut self, now_ms: f64, period_ms: f64) -> u64 {
        let period = period_ms.max(MIN_PERIOD_MS);
        self.arm(Deadline { due_ms: now_ms + period, period_ms: Some(period) })
    }

    fn arm(&mut self, deadline: Deadline) -> u64 {
        self.generation += 1;
        self.deadline = Some(deadline);
        self.generation
    }

    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            self.generation += 1;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Token of the current arming; changes whenever the slot is re-armed or cancelled.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn due_ms(&self) -> Option<f64> {
        self.deadline.map(|d| d.due_ms)
    }

    /// Number of times the slot fires at or before `now_ms`.
    /// One-shot slots disarm after firing; repeating slots catch up missed periods.
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        self.drain(now_ms, true)
    }

    /// Like [`poll`](Self::poll) but only counts deadlines strictly before `limit_ms`.
    pub fn poll_before(&mut self, limit_ms: f64) -> u32 {
        self.drain(limit_ms, false)
    }

    fn drain(&mut self, horizon_ms: f64, inclusive: bool) -> u32 {
        let Some(deadline) = self.deadline else {
            return 0;
        };
        if !horizon_ms.is_finite() {
            return 0;
        }
        let due = |t: f64| if inclusive { t <= horizon_ms } else { t < horizon_ms };
        if !due(deadline.due_ms) {
            return 0;
        }
        match deadline.period_ms {
            None => {
                self.deadline = None;
                1
            }
            Some(period) => {
                // Counted in f64 so a long stall can't overflow; the deadline
                // always jumps past the horizon even when the count saturates.
                let skipped = ((horizon_ms - deadline.due_ms) / period).floor();
                let mut periods = skipped + 1.0;
                if !inclusive && deadline.due_ms + skipped * period >= horizon_ms {
                    periods -= 1.0;
                }
                let next = deadline.due_ms + periods * period;
                self.deadline = Some(Deadline { due_ms: next, period_ms: Some(period) });
                periods.min(f64::from(u32::MAX)) as u32
            }
        }
    }
}
