//! Tick driver
//!
//! Owns the engine behind a mutex and a cancellable repeating timer
//! task. Exactly one tick is in flight at a time: the timer task takes
//! the lock, runs the full synchronous lead pass, releases, and only
//! then awaits the next fire. Pause and reset abort the task at an
//! await point, so cancellation lands between ticks, never mid-pass.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::core::error::Result;
use crate::llm::client::LlmClient;
use crate::llm::insight;
use crate::simulation::engine::{EngineSnapshot, EngineState, SimulationEngine, TickOutcome};
use crate::simulation::stats::CampaignStats;

/// Shown while the analysis request is in flight
pub const ANALYZING_PLACEHOLDER: &str = "Analyzing campaign results...";

pub struct CampaignDriver {
    engine: Arc<Mutex<SimulationEngine>>,
    tick_period: Duration,
    analyst: Option<Arc<LlmClient>>,
    ticker: Option<JoinHandle<()>>,
}

impl CampaignDriver {
    pub fn new(
        engine: SimulationEngine,
        tick_period: Duration,
        analyst: Option<Arc<LlmClient>>,
    ) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            tick_period,
            analyst,
            ticker: None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SimulationEngine> {
        self.engine.lock().expect("engine lock poisoned")
    }

    pub fn state(&self) -> EngineState {
        self.lock().state()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        self.lock().snapshot()
    }

    /// Start or resume the timer
    ///
    /// Idempotent while running: an existing timer is reused, never
    /// duplicated. A finished engine stays finished (reset first).
    pub fn start(&mut self) -> Result<EngineState> {
        let state = self.lock().start()?;
        if state != EngineState::Running {
            return Ok(state);
        }

        let timer_alive = self.ticker.as_ref().is_some_and(|t| !t.is_finished());
        if !timer_alive {
            tracing::debug!(period_ms = self.tick_period.as_millis() as u64, "tick timer armed");
            self.ticker = Some(self.spawn_ticker());
        }
        Ok(EngineState::Running)
    }

    /// Cancel the timer, keeping day counter and lead states for resume
    pub fn pause(&mut self) -> EngineState {
        self.cancel_ticker();
        let mut engine = self.lock();
        engine.pause();
        engine.state()
    }

    /// Cancel the timer and restore the imported lead snapshot
    pub fn reset(&mut self) -> EngineState {
        self.cancel_ticker();
        let mut engine = self.lock();
        engine.reset();
        engine.state()
    }

    /// Advance one tick manually (paused engine, headless runs)
    ///
    /// Finishing a campaign this way fires the same one-shot analysis
    /// request as the timer path.
    pub fn step(&mut self) -> TickOutcome {
        let outcome = self.lock().tick();
        if outcome.finished {
            dispatch_analysis(
                Arc::clone(&self.engine),
                self.analyst.clone(),
                outcome.stats,
            );
        }
        outcome
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            tracing::debug!("tick timer cancelled");
        }
    }

    fn spawn_ticker(&self) -> JoinHandle<()> {
        let engine = Arc::clone(&self.engine);
        let analyst = self.analyst.clone();
        let period = self.tick_period;

        tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                timer.tick().await;

                let outcome = {
                    let mut engine = engine.lock().expect("engine lock poisoned");
                    if engine.state() != EngineState::Running {
                        break;
                    }
                    engine.tick()
                };

                if outcome.finished {
                    dispatch_analysis(engine, analyst, outcome.stats);
                    break;
                }
            }
        })
    }
}

impl Drop for CampaignDriver {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

/// Fire the one-shot analysis request without blocking the tick loop
///
/// The engine is already `Finished` and frozen; the result lands via
/// `set_summary`, which ignores the write if a reset raced it.
fn dispatch_analysis(
    engine: Arc<Mutex<SimulationEngine>>,
    analyst: Option<Arc<LlmClient>>,
    stats: CampaignStats,
) {
    {
        let mut engine = engine.lock().expect("engine lock poisoned");
        engine.set_summary(ANALYZING_PLACEHOLDER);
    }

    tokio::spawn(async move {
        let summary = insight::summarize_campaign(analyst.as_deref(), stats).await;
        let mut engine = engine.lock().expect("engine lock poisoned");
        engine.set_summary(summary);
    });
}
