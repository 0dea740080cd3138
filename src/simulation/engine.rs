//! Simulation engine
//!
//! Owns the working copy of the lead list and advances it tick by tick.
//! `tick()` is synchronous and scheduler-free; the timer lives in the
//! driver. Consumers only ever see read-only snapshots.

use chrono::Utc;
use serde::Serialize;

use crate::campaign::lead::Lead;
use crate::core::config::{EngineConfig, TransitionOdds};
use crate::core::error::{CampaignError, Result};
use crate::core::types::SimDay;
use crate::simulation::log::ActivityLog;
use crate::simulation::roll::RollSource;
use crate::simulation::stats::CampaignStats;
use crate::simulation::transition::advance_lead;

/// Lifecycle of the engine itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Idle,
    Running,
    Finished,
}

/// Result of one tick
#[derive(Debug, Clone, Copy)]
pub struct TickOutcome {
    /// True exactly when this tick moved the engine to `Finished`
    pub finished: bool,
    /// Aggregates after the tick's lead pass
    pub stats: CampaignStats,
}

/// Read-only view handed to display consumers
#[derive(Debug, Clone, Serialize)]
pub struct EngineSnapshot {
    pub sim_day: SimDay,
    pub state: EngineState,
    pub stats: CampaignStats,
    pub leads: Vec<Lead>,
    /// Newest first, at most the configured capacity
    pub logs: Vec<String>,
    pub summary: Option<String>,
}

impl EngineSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub struct SimulationEngine {
    leads: Vec<Lead>,
    /// Pristine import snapshot restored on reset
    baseline: Vec<Lead>,
    sim_day: SimDay,
    state: EngineState,
    log: ActivityLog,
    summary: Option<String>,
    odds: TransitionOdds,
    rolls: Box<dyn RollSource + Send>,
}

impl SimulationEngine {
    /// Build an engine over an imported lead snapshot
    pub fn new(leads: Vec<Lead>, config: &EngineConfig, rolls: Box<dyn RollSource + Send>) -> Self {
        Self {
            baseline: leads.clone(),
            leads,
            sim_day: 0,
            state: EngineState::Idle,
            log: ActivityLog::new(config.log_capacity),
            summary: None,
            odds: config.odds,
            rolls,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn sim_day(&self) -> SimDay {
        self.sim_day
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Recompute aggregates from the current lead list
    pub fn stats(&self) -> CampaignStats {
        CampaignStats::collect(&self.leads)
    }

    /// Enter `Running` from `Idle`
    ///
    /// Starting an already-running engine is a no-op, as is starting a
    /// finished one (reset first). Refuses an empty lead list.
    pub fn start(&mut self) -> Result<EngineState> {
        match self.state {
            EngineState::Running | EngineState::Finished => Ok(self.state),
            EngineState::Idle => {
                if self.leads.is_empty() {
                    return Err(CampaignError::NoLeads);
                }
                self.state = EngineState::Running;
                tracing::info!(leads = self.leads.len(), "campaign started");
                Ok(self.state)
            }
        }
    }

    /// Leave `Running`, preserving day counter and lead states
    pub fn pause(&mut self) {
        if self.state == EngineState::Running {
            self.state = EngineState::Idle;
            tracing::info!(day = self.sim_day, "campaign paused");
        }
    }

    /// Discard everything and restore the import snapshot
    pub fn reset(&mut self) {
        self.leads = self.baseline.clone();
        self.sim_day = 0;
        self.state = EngineState::Idle;
        self.log.clear();
        self.summary = None;
        tracing::info!("campaign reset to imported leads");
    }

    /// Advance the simulation one day
    ///
    /// Runs the transition pass over every lead, then evaluates the
    /// termination predicate: no active lead remains and this tick sent
    /// no initial email. Callable directly (manual stepping, tests) or
    /// from the driver's timer; a finished engine no-ops.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state == EngineState::Finished {
            return TickOutcome {
                finished: false,
                stats: self.stats(),
            };
        }

        self.sim_day += 1;
        let day = self.sim_day;
        let now = Utc::now();
        let mut initial_sends = 0usize;

        for lead in &mut self.leads {
            let roll = self.rolls.roll();
            let effect = advance_lead(lead, roll, &self.odds, now);
            if effect.initial_send {
                initial_sends += 1;
            }
            if let Some(line) = effect.log_line {
                self.log.push(day, line);
            }
        }

        let active = self.leads.iter().filter(|l| l.status.is_active()).count();
        let finished = active == 0 && initial_sends == 0;
        if finished {
            self.state = EngineState::Finished;
            self.log.push(day, "Campaign Simulation Finished.");
            tracing::info!(day, "campaign simulation finished");
        }

        TickOutcome {
            finished,
            stats: self.stats(),
        }
    }

    /// Attach the post-campaign analysis text
    ///
    /// Only meaningful once finished; ignored otherwise so a late
    /// in-flight result cannot leak into a reset engine.
    pub fn set_summary(&mut self, text: impl Into<String>) {
        if self.state == EngineState::Finished {
            self.summary = Some(text.into());
        }
    }

    /// Read-only view for the dashboard
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            sim_day: self.sim_day,
            state: self.state,
            stats: self.stats(),
            leads: self.leads.clone(),
            logs: self.log.to_vec(),
            summary: self.summary.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::import::sample_leads;
    use crate::campaign::lead::LeadStatus;
    use crate::simulation::roll::ScriptedRolls;

    fn engine_with(leads: Vec<Lead>, rolls: ScriptedRolls) -> SimulationEngine {
        SimulationEngine::new(leads, &EngineConfig::default(), Box::new(rolls))
    }

    #[test]
    fn start_refuses_empty_lead_list() {
        let mut engine = engine_with(Vec::new(), ScriptedRolls::repeat(50.0));
        assert!(matches!(engine.start(), Err(CampaignError::NoLeads)));
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn start_is_idempotent() {
        let mut engine = engine_with(sample_leads(), ScriptedRolls::repeat(50.0));
        assert_eq!(engine.start().unwrap(), EngineState::Running);
        assert_eq!(engine.start().unwrap(), EngineState::Running);
    }

    #[test]
    fn first_tick_sends_every_pending_lead() {
        let mut engine = engine_with(sample_leads(), ScriptedRolls::repeat(50.0));
        let outcome = engine.tick();
        assert_eq!(engine.sim_day(), 1);
        assert!(!outcome.finished);
        assert_eq!(outcome.stats.sent, 5);
        assert!(engine.leads().iter().all(|l| l.status == LeadStatus::Sent));
        // One "Sent initial email" line per lead
        assert_eq!(engine.snapshot().logs.len(), 5);
    }

    #[test]
    fn mid_range_rolls_stall_in_followup_sent() {
        // Roll 50 never opens, bounces or replies: the funnel walks
        // pending -> sent -> waiting -> followup_sent and then stalls.
        let mut engine = engine_with(sample_leads(), ScriptedRolls::repeat(50.0));
        engine.tick();
        assert!(engine.leads().iter().all(|l| l.status == LeadStatus::Sent));
        engine.tick();
        assert!(engine
            .leads()
            .iter()
            .all(|l| l.status == LeadStatus::WaitingFollowup));
        engine.tick();
        assert!(engine
            .leads()
            .iter()
            .all(|l| l.status == LeadStatus::FollowupSent));
        let outcome = engine.tick();
        assert!(engine
            .leads()
            .iter()
            .all(|l| l.status == LeadStatus::FollowupSent));
        // Never terminates under this roll sequence
        assert!(!outcome.finished);
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn bounce_path_finishes_in_two_ticks() {
        let lead = Lead::new("Bob Jones", "bob@example.com", "BizInc");
        let mut engine = engine_with(vec![lead], ScriptedRolls::repeat(95.0));
        engine.start().unwrap();

        let first = engine.tick();
        assert!(!first.finished);
        assert_eq!(engine.leads()[0].status, LeadStatus::Sent);

        let second = engine.tick();
        assert!(second.finished);
        assert_eq!(engine.leads()[0].status, LeadStatus::Bounced);
        assert_eq!(engine.state(), EngineState::Finished);
        assert_eq!(second.stats.bounced, 1);

        // Finished log line is the newest entry
        assert_eq!(engine.snapshot().logs[0], "[Day 2] Campaign Simulation Finished.");
    }

    #[test]
    fn finished_engine_ticks_are_noops() {
        let lead = Lead::new("Bob Jones", "bob@example.com", "BizInc");
        let mut engine = engine_with(vec![lead], ScriptedRolls::repeat(95.0));
        engine.tick();
        engine.tick();
        assert_eq!(engine.state(), EngineState::Finished);

        let day = engine.sim_day();
        let outcome = engine.tick();
        assert!(!outcome.finished);
        assert_eq!(engine.sim_day(), day);
    }

    #[test]
    fn pause_preserves_state_for_resume() {
        // 3 ticks, pause, resume, 2 ticks == 5 straight ticks
        let rolls = vec![10.0, 80.0, 95.0, 15.0, 50.0, 70.0, 25.0];
        let mut paused = engine_with(sample_leads(), ScriptedRolls::cycle(rolls.clone()));
        let mut straight = engine_with(sample_leads(), ScriptedRolls::cycle(rolls));

        paused.start().unwrap();
        straight.start().unwrap();

        for _ in 0..3 {
            paused.tick();
        }
        paused.pause();
        assert_eq!(paused.state(), EngineState::Idle);
        paused.start().unwrap();
        for _ in 0..2 {
            paused.tick();
        }

        for _ in 0..5 {
            straight.tick();
        }

        assert_eq!(paused.sim_day(), straight.sim_day());
        let paused_statuses: Vec<_> = paused.leads().iter().map(|l| l.status).collect();
        let straight_statuses: Vec<_> = straight.leads().iter().map(|l| l.status).collect();
        assert_eq!(paused_statuses, straight_statuses);
    }

    #[test]
    fn reset_restores_import_snapshot() {
        let mut engine = engine_with(sample_leads(), ScriptedRolls::repeat(95.0));
        let before = engine.snapshot();
        engine.start().unwrap();
        for _ in 0..4 {
            engine.tick();
        }
        assert_ne!(engine.sim_day(), 0);

        engine.reset();
        let after = engine.snapshot();
        assert_eq!(after.sim_day, 0);
        assert_eq!(after.state, EngineState::Idle);
        assert!(after.logs.is_empty());
        assert_eq!(after.summary, None);
        assert_eq!(after.leads, before.leads);
        assert_eq!(after.stats, before.stats);
    }

    #[test]
    fn summary_is_ignored_unless_finished() {
        let mut engine = engine_with(sample_leads(), ScriptedRolls::repeat(95.0));
        engine.set_summary("too early");
        assert_eq!(engine.summary(), None);

        engine.tick();
        engine.tick();
        engine.tick();
        assert_eq!(engine.state(), EngineState::Finished);
        engine.set_summary("final analysis");
        assert_eq!(engine.summary(), Some("final analysis"));

        engine.reset();
        assert_eq!(engine.summary(), None);
    }

    #[test]
    fn log_stays_bounded_over_long_runs() {
        let leads: Vec<Lead> = (0..30)
            .map(|i| Lead::new(format!("Lead {}", i), format!("l{}@x.com", i), "X"))
            .collect();
        let mut engine = engine_with(leads, ScriptedRolls::repeat(10.0));
        for _ in 0..40 {
            engine.tick();
        }
        assert!(engine.snapshot().logs.len() <= 50);
    }

    #[test]
    fn stats_stay_consistent_every_tick() {
        let mut engine = engine_with(sample_leads(), ScriptedRolls::cycle(vec![5.0, 35.0, 92.0, 50.0]));
        for _ in 0..20 {
            let stats = engine.tick().stats;
            assert!(stats.replied <= stats.opened);
            assert!(stats.opened <= stats.sent);
            assert!(stats.sent <= stats.total);
            assert_eq!(stats.total, 5);
        }
    }
}
