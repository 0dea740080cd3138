//! Campaign plan: SMTP settings, email templates and follow-up rules
//!
//! Collected by the wizard and loadable from a TOML file. The plan is
//! configuration only; the simulation engine reads none of it except
//! through the snapshot of imported leads.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::campaign::lead::Lead;
use crate::core::error::{CampaignError, Result};

/// Outgoing mail server settings
///
/// Stored verbatim from the wizard form. The simulator never connects
/// to the server; credentials are carried so a campaign plan round-trips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: String,
    pub user: String,
    pub pass: String,
}

impl SmtpConfig {
    /// Minimum fields the wizard requires before advancing
    pub fn is_complete(&self) -> bool {
        !self.host.trim().is_empty() && !self.user.trim().is_empty()
    }
}

/// An email subject/body pair with `{name}` and `{company}` variables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub subject: String,
    pub body: String,
}

impl EmailTemplate {
    pub fn is_empty(&self) -> bool {
        self.subject.trim().is_empty() && self.body.trim().is_empty()
    }

    /// Substitute `{name}` and `{company}` for one lead
    pub fn render(&self, lead: &Lead) -> EmailTemplate {
        let fill = |text: &str| {
            text.replace("{name}", &lead.name)
                .replace("{company}", &lead.company)
        };
        EmailTemplate {
            subject: fill(&self.subject),
            body: fill(&self.body),
        }
    }
}

/// Follow-up rules collected in the wizard
///
/// The delay and retry count are recorded in the plan but the
/// simulation's fast-forward clock does not honor them: an unopened
/// email always waits exactly one tick before its single follow-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpPolicy {
    /// Days to wait before a follow-up when the email was not opened (1..=30)
    pub wait_days: u32,
    /// Retry attempts (0..=5)
    pub max_followups: u32,
    /// Stop contacting a lead once it replies
    pub stop_on_reply: bool,
}

impl Default for FollowUpPolicy {
    fn default() -> Self {
        Self {
            wait_days: 2,
            max_followups: 1,
            stop_on_reply: true,
        }
    }
}

impl FollowUpPolicy {
    /// Clamp out-of-range form input to the wizard's bounds
    pub fn clamped(self) -> Self {
        Self {
            wait_days: self.wait_days.clamp(1, 30),
            max_followups: self.max_followups.min(5),
            stop_on_reply: self.stop_on_reply,
        }
    }
}

/// Everything the wizard collects, minus the lead list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub template: EmailTemplate,
    #[serde(default)]
    pub followup_template: EmailTemplate,
    #[serde(default = "FollowUpPolicy::default")]
    pub policy: FollowUpPolicy,
}

impl CampaignPlan {
    /// Load a plan from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CampaignError::Plan(e.to_string()))
    }

    /// Serialize the plan back to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CampaignError::Plan(e.to_string()))
    }
}
