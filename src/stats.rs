//! Usage counters shown in the stats panel.

/// Upper end of the time-on-page progress bar.
const TIME_BAR_MAX_SECS: u64 = 300;

/// Clicks, animations and function calls since the counter was created.
/// Counters only ever grow; there is no reset.
#[derive(Clone, Debug, PartialEq)]
pub struct StatsCounter {
    clicks: u64,
    animations: u64,
    function_calls: u64,
    start_ms: f64,
}

impl StatsCounter {
    pub fn new(start_ms: f64) -> Self {
        Self { clicks: 0, animations: 0, function_calls: 0, start_ms }
    }

    pub fn record_click(&mut self) {
        self.clicks = self.clicks.saturating_add(1);
    }

    pub fn record_animation(&mut self) {
        self.animations = self.animations.saturating_add(1);
    }

    pub fn record_function_call(&mut self) {
        self.function_calls = self.function_calls.saturating_add(1);
    }

    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    pub fn animations(&self) -> u64 {
        self.animations
    }

    pub fn function_calls(&self) -> u64 {
        self.function_calls
    }

    /// Milliseconds since creation; never negative even if the host clock jumps back.
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.start_ms).max(0.0)
    }

    pub fn snapshot(&self, now_ms: f64) -> StatsSnapshot {
        StatsSnapshot {
            clicks: self.clicks,
            animations: self.animations,
            function_calls: self.function_calls,
            elapsed_secs: (self.elapsed_ms(now_ms) / 1000.0).floor() as u64,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub clicks: u64,
    pub animations: u64,
    pub function_calls: u64,
    pub elapsed_secs: u64,
}

/// Fill levels (0..=100) for the four stats bars.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatsProgress {
    pub clicks: f64,
    pub animations: f64,
    pub function_calls: f64,
    pub time: f64,
}

impl StatsSnapshot {
    /// Elapsed time as `MM:SS`.
    pub fn time_on_page(&self) -> String {
        format!("{:02}:{:02}", self.elapsed_secs / 60, self.elapsed_secs % 60)
    }

    /// Counter bars are relative to the largest counter, time to five minutes.
    pub fn progress(&self) -> StatsProgress {
        let max = self.clicks.max(self.animations).max(self.function_calls).max(1);
        StatsProgress {
            clicks: percentage(self.clicks, max),
            animations: percentage(self.animations, max),
            function_calls: percentage(self.function_calls, max),
            time: percentage(self.elapsed_secs, TIME_BAR_MAX_SECS),
        }
    }
}

fn percentage(value: u64, max: u64) -> f64 {
    (value as f64 / max as f64 * 100.0).min(100.0)
}
