//! Simulation configuration with documented constants
//!
//! The numbers that shape the simulated funnel are collected here with
//! explanations of their purpose and how they interact.

use std::time::Duration;

/// Number of activity log entries kept before the oldest are dropped.
pub const LOG_CAPACITY: usize = 50;

/// Default wall-clock period between ticks (one tick = one simulated day).
pub const DEFAULT_TICK_PERIOD_MS: u64 = 1500;

/// Configuration for the simulation engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Wall-clock period between timer fires
    ///
    /// Purely a pacing knob for watching the dashboard update. It has no
    /// effect on transition outcomes; one fire always advances exactly
    /// one simulated day.
    pub tick_period: Duration,

    /// Maximum retained activity log entries (newest first)
    pub log_capacity: usize,

    /// Funnel probabilities applied by the per-lead transition pass
    pub odds: TransitionOdds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(DEFAULT_TICK_PERIOD_MS),
            log_capacity: LOG_CAPACITY,
            odds: TransitionOdds::default(),
        }
    }
}

/// Probability thresholds for the outreach funnel
///
/// All thresholds are compared against a uniform roll in [0, 100) drawn
/// independently per lead per tick. Branches are evaluated top to bottom
/// and the intervals never overlap: an initial email is opened on
/// [0, open), bounces on (bounce, 100), and otherwise moves to the
/// follow-up queue.
///
/// The follow-up thresholds are deliberately asymmetric: a second touch
/// gets a better open chance (40 vs 30) and a smaller bounce window
/// (>95 vs >90), since an address that survived the first send is less
/// likely to be dead.
#[derive(Debug, Clone, Copy)]
pub struct TransitionOdds {
    /// Roll below this opens the initial email (default 30 -> 30%)
    pub open: f64,
    /// Roll above this bounces the initial email (default 90 -> ~10%)
    pub bounce: f64,
    /// Roll below this opens the follow-up (default 40 -> 40%)
    pub followup_open: f64,
    /// Roll above this bounces the follow-up (default 95 -> ~5%)
    pub followup_bounce: f64,
    /// Roll below this converts an open into a reply (default 20 -> 20%)
    pub reply: f64,
}

impl Default for TransitionOdds {
    fn default() -> Self {
        Self {
            open: 30.0,
            bounce: 90.0,
            followup_open: 40.0,
            followup_bounce: 95.0,
            reply: 20.0,
        }
    }
}

/// Named pacing presets for the tick timer
///
/// Realtime is too slow to watch a full campaign; Fast is the demo
/// default speed-up and Instant is for headless runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedPreset {
    /// 1 tick per second
    Realtime,
    /// 10 ticks per second
    Fast,
    /// 100 ticks per second
    Instant,
}

impl SpeedPreset {
    pub fn period(self) -> Duration {
        match self {
            SpeedPreset::Realtime => Duration::from_millis(1000),
            SpeedPreset::Fast => Duration::from_millis(100),
            SpeedPreset::Instant => Duration::from_millis(10),
        }
    }
}
