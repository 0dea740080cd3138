//! Per-lead transition function
//!
//! One call advances one lead by one tick given its roll. Branches are
//! evaluated top to bottom; the first matching condition wins, and the
//! roll intervals within a state never overlap. `Replied`, `Completed`
//! and `Bounced` absorb every roll.
//!
//! The follow-up wait configured in the campaign plan is not consulted:
//! the fast-forward clock assumes enough time passes every tick, so an
//! unopened email waits exactly one tick before its single follow-up.

use chrono::{DateTime, Utc};

use crate::campaign::lead::{Lead, LeadStatus};
use crate::core::config::TransitionOdds;

/// What one lead's tick produced, for the caller's log and bookkeeping
#[derive(Debug, Clone, Default)]
pub struct TickEffect {
    /// Human-readable activity line, when the transition is worth showing
    pub log_line: Option<String>,
    /// True when this tick sent the lead's initial email
    pub initial_send: bool,
}

/// Advance one lead by one tick
///
/// Mutates the lead's status and history per the funnel and returns the
/// side effects as data. Deterministic in `(lead.status, roll)`.
pub fn advance_lead(
    lead: &mut Lead,
    roll: f64,
    odds: &TransitionOdds,
    now: DateTime<Utc>,
) -> TickEffect {
    match lead.status {
        LeadStatus::Pending => {
            lead.status = LeadStatus::Sent;
            lead.record("Initial Email Sent", now);
            TickEffect {
                log_line: Some(format!("Sent initial email to {}", lead.email)),
                initial_send: true,
            }
        }
        LeadStatus::Sent => {
            if roll < odds.open {
                lead.status = LeadStatus::Opened;
                lead.record("Email Opened", now);
                TickEffect {
                    log_line: Some(format!("{} opened the email", lead.email)),
                    ..Default::default()
                }
            } else if roll > odds.bounce {
                lead.status = LeadStatus::Bounced;
                TickEffect {
                    log_line: Some(format!("Email to {} bounced", lead.email)),
                    ..Default::default()
                }
            } else {
                lead.status = LeadStatus::WaitingFollowup;
                TickEffect::default()
            }
        }
        LeadStatus::WaitingFollowup => {
            lead.status = LeadStatus::FollowupSent;
            lead.record("Follow-up Sent", now);
            TickEffect {
                log_line: Some(format!("Sent follow-up to {}", lead.email)),
                ..Default::default()
            }
        }
        LeadStatus::FollowupSent => {
            if roll < odds.followup_open {
                lead.status = LeadStatus::Opened;
                TickEffect {
                    log_line: Some(format!("{} opened the follow-up", lead.email)),
                    ..Default::default()
                }
            } else if roll > odds.followup_bounce {
                lead.status = LeadStatus::Bounced;
                TickEffect::default()
            } else {
                // Still waiting on the follow-up; try again next tick
                TickEffect::default()
            }
        }
        LeadStatus::Opened => {
            if roll < odds.reply {
                lead.status = LeadStatus::Replied;
                lead.record("Replied", now);
                TickEffect {
                    log_line: Some(format!("Reply received from {}!", lead.email)),
                    ..Default::default()
                }
            } else {
                // Opened but never replied; end of the flow
                lead.status = LeadStatus::Completed;
                TickEffect::default()
            }
        }
        LeadStatus::Replied | LeadStatus::Completed | LeadStatus::Bounced => TickEffect::default(),
    }
}
