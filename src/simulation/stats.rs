//! Aggregate campaign statistics
//!
//! Derived, never stored: every read recomputes the counts from the
//! current lead list, so the numbers cannot drift from lead state.

use serde::Serialize;

use crate::campaign::lead::{Lead, LeadStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CampaignStats {
    pub total: usize,
    /// Leads whose initial email has gone out (anything past `Pending`)
    pub sent: usize,
    /// Leads that opened at some point (`Opened`, `Replied`, `Completed`)
    pub opened: usize,
    pub replied: usize,
    pub bounced: usize,
}

impl CampaignStats {
    /// Recompute all counts from the lead list
    pub fn collect(leads: &[Lead]) -> Self {
        let mut stats = Self {
            total: leads.len(),
            ..Default::default()
        };
        for lead in leads {
            if lead.status != LeadStatus::Pending {
                stats.sent += 1;
            }
            match lead.status {
                LeadStatus::Opened | LeadStatus::Replied | LeadStatus::Completed => {
                    stats.opened += 1
                }
                _ => {}
            }
            if lead.status == LeadStatus::Replied {
                stats.replied += 1;
            }
            if lead.status == LeadStatus::Bounced {
                stats.bounced += 1;
            }
        }
        stats
    }

    /// Fraction of sent emails that were opened, 0 before anything sent
    pub fn open_rate(&self) -> f64 {
        if self.sent == 0 {
            0.0
        } else {
            self.opened as f64 / self.sent as f64
        }
    }

    /// Fraction of sent emails that drew a reply, 0 before anything sent
    pub fn reply_rate(&self) -> f64 {
        if self.sent == 0 {
            0.0
        } else {
            self.replied as f64 / self.sent as f64
        }
    }
}
