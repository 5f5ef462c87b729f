//! Single-slot loading indicator lifecycle.
//!
//! ```text
//! start ─► Running ──(duration)──► Complete ──(complete grace)──► Idle
//!             │                                                    ▲
//!           stop ─────► Stopped ────────(stopped grace)────────────┘
//! ```
//!
//! Completion and the grace period back to idle share one [`TimerSlot`]: every
//! `start`/`stop` re-arms it, so a replaced session's completion can never fire.

use std::str::FromStr;

use log::{debug, info};

use crate::error::{PlaygroundError, Result};
use crate::timer::TimerSlot;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoadingKind {
    Spinner,
    Dots,
    Progress,
    Pulse,
}

impl LoadingKind {
    pub const ALL: [LoadingKind; 4] = [
        LoadingKind::Spinner,
        LoadingKind::Dots,
        LoadingKind::Progress,
        LoadingKind::Pulse,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LoadingKind::Spinner => "spinner",
            LoadingKind::Dots => "dots",
            LoadingKind::Progress => "progress",
            LoadingKind::Pulse => "pulse",
        }
    }
}

impl FromStr for LoadingKind {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self> {
        LoadingKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| PlaygroundError::InvalidOperation(s.to_string()))
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadingConfig {
    /// How long "complete" stays up before returning to idle.
    pub complete_grace_ms: f64,
    /// How long "stopped" stays up before returning to idle.
    pub stopped_grace_ms: f64,
}

impl LoadingConfig {
    /// Grace periods may be zero but must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("loading.complete_grace_ms", self.complete_grace_ms),
            ("loading.stopped_grace_ms", self.stopped_grace_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlaygroundError::InvalidConfig(format!("{field} must be finite and >= 0, got {value}")));
            }
        }
        Ok(())
    }
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self { complete_grace_ms: 3000.0, stopped_grace_ms: 2000.0 }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "phase", content = "kind", rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadingPhase {
    #[default]
    Idle,
    Running(LoadingKind),
    Complete(LoadingKind),
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingEvent {
    Completed(LoadingKind),
    /// Back to the idle prompt after a completion or a stop.
    Idle,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadingSnapshot {
    pub phase: LoadingPhase,
    /// Time until the next phase change, 0 when idle.
    pub remaining_ms: f64,
}

#[derive(Clone, Debug, Default)]
pub struct LoadingSession {
    config: LoadingConfig,
    phase: LoadingPhase,
    expiry: TimerSlot,
}

impl LoadingSession {
    pub fn new(config: LoadingConfig) -> Self {
        Self { config, phase: LoadingPhase::Idle, expiry: TimerSlot::new() }
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    /// Replace whatever is showing with a new `kind` session lasting `duration_ms`.
    pub fn start(&mut self, kind: LoadingKind, duration_ms: f64, now_ms: f64) -> Result<()> {
        if !duration_ms.is_finite() || duration_ms < 0.0 {
            return Err(PlaygroundError::InvalidInput);
        }
        self.expiry.cancel();
        self.phase = LoadingPhase::Running(kind);
        self.expiry.arm_once(now_ms, duration_ms);
        info!("started {} loading for {}ms", kind.name(), duration_ms);
        Ok(())
    }

    /// Drop any pending completion and show "stopped" until the grace period ends.
    pub fn stop(&mut self, now_ms: f64) {
        self.expiry.cancel();
        self.phase = LoadingPhase::Stopped;
        self.expiry.arm_once(now_ms, self.config.stopped_grace_ms);
        info!("loading stopped");
    }

    /// Advance through every phase change due at `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> Vec<LoadingEvent> {
        let mut events = Vec::new();
        while let Some(due) = self.expiry.due_ms() {
            if self.expiry.poll(now_ms) == 0 {
                break;
            }
            match self.phase {
                LoadingPhase::Running(kind) => {
                    debug!("{} loading complete", kind.name());
                    self.phase = LoadingPhase::Complete(kind);
                    self.expiry.arm_once(due, self.config.complete_grace_ms);
                    events.push(LoadingEvent::Completed(kind));
                }
                LoadingPhase::Complete(_) | LoadingPhase::Stopped => {
                    self.phase = LoadingPhase::Idle;
                    events.push(LoadingEvent::Idle);
                }
                LoadingPhase::Idle => {}
            }
        }
        events
    }

    pub fn snapshot(&self, now_ms: f64) -> LoadingSnapshot {
        LoadingSnapshot {
            phase: self.phase,
            remaining_ms: self.expiry.due_ms().map_or(0.0, |due| (due - now_ms).max(0.0)),
        }
    }
}
