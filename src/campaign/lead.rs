//! Lead data model
//!
//! A lead is one outreach target: identity fields, a single mutable
//! status drawn from the closed [`LeadStatus`] enumeration, and an
//! append-only history of notable events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::LeadId;

/// Outreach status of a single lead
///
/// `Pending` is the sole initial state. `Replied`, `Completed` and
/// `Bounced` are terminal: the simulation never moves a lead out of
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Pending,
    Sent,
    Opened,
    WaitingFollowup,
    FollowupSent,
    Replied,
    Completed,
    Bounced,
}

impl LeadStatus {
    /// True for states the simulation never leaves
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LeadStatus::Replied | LeadStatus::Completed | LeadStatus::Bounced
        )
    }

    /// True for leads still subject to future transitions
    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }

    /// Human-readable label for tables and log lines
    pub fn label(self) -> &'static str {
        match self {
            LeadStatus::Pending => "pending",
            LeadStatus::Sent => "sent",
            LeadStatus::Opened => "opened",
            LeadStatus::WaitingFollowup => "waiting followup",
            LeadStatus::FollowupSent => "followup sent",
            LeadStatus::Replied => "replied",
            LeadStatus::Completed => "completed",
            LeadStatus::Bounced => "bounced",
        }
    }
}

/// One entry in a lead's append-only history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub event: String,
}

/// An outreach target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub email: String,
    pub name: String,
    pub company: String,
    pub status: LeadStatus,
    /// Only grows; never reordered or truncated
    pub history: Vec<HistoryEntry>,
}

impl Lead {
    /// Create a fresh lead in the initial `Pending` state
    pub fn new(name: impl Into<String>, email: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            id: LeadId::new(),
            email: email.into(),
            name: name.into(),
            company: company.into(),
            status: LeadStatus::Pending,
            history: Vec::new(),
        }
    }

    /// Record an event in the lead's history
    pub fn record(&mut self, event: impl Into<String>, timestamp: DateTime<Utc>) {
        self.history.push(HistoryEntry {
            timestamp,
            event: event.into(),
        });
    }

    /// The most recent history event, if any
    pub fn last_event(&self) -> Option<&str> {
        self.history.last().map(|h| h.event.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lead_is_pending_with_empty_history() {
        let lead = Lead::new("Alice Smith", "alice@example.com", "TechCorp");
        assert_eq!(lead.status, LeadStatus::Pending);
        assert!(lead.history.is_empty());
        assert_eq!(lead.last_event(), None);
    }

    #[test]
    fn terminal_and_active_partition_the_enum() {
        let all = [
            LeadStatus::Pending,
            LeadStatus::Sent,
            LeadStatus::Opened,
            LeadStatus::WaitingFollowup,
            LeadStatus::FollowupSent,
            LeadStatus::Replied,
            LeadStatus::Completed,
            LeadStatus::Bounced,
        ];
        for status in all {
            assert_ne!(status.is_terminal(), status.is_active());
        }
        assert_eq!(all.iter().filter(|s| s.is_terminal()).count(), 3);
    }

    #[test]
    fn history_only_grows() {
        let mut lead = Lead::new("Bob Jones", "bob@example.com", "BizInc");
        let now = Utc::now();
        lead.record("Initial Email Sent", now);
        lead.record("Email Opened", now);
        assert_eq!(lead.history.len(), 2);
        assert_eq!(lead.last_event(), Some("Email Opened"));
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&LeadStatus::WaitingFollowup).unwrap();
        assert_eq!(json, "\"waiting_followup\"");
        let back: LeadStatus = serde_json::from_str("\"followup_sent\"").unwrap();
        assert_eq!(back, LeadStatus::FollowupSent);
    }
}
