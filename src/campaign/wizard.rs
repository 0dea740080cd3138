//! Step wizard for campaign setup
//!
//! Forward navigation is gated on each step's form being usable;
//! backward navigation is always allowed. The wizard owns the draft
//! plan and lead list until the simulation step takes a snapshot.

use crate::campaign::lead::Lead;
use crate::campaign::plan::CampaignPlan;

/// Ordered configuration steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Smtp,
    Leads,
    Template,
    Logic,
    Review,
    Simulation,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::Smtp,
        WizardStep::Leads,
        WizardStep::Template,
        WizardStep::Logic,
        WizardStep::Review,
        WizardStep::Simulation,
    ];

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Smtp => "SMTP Config",
            WizardStep::Leads => "Leads",
            WizardStep::Template => "Templates",
            WizardStep::Logic => "Follow-up Rules",
            WizardStep::Review => "Review",
            WizardStep::Simulation => "Simulation",
        }
    }

    fn next(self) -> Option<WizardStep> {
        let idx = WizardStep::ALL.iter().position(|s| *s == self)?;
        WizardStep::ALL.get(idx + 1).copied()
    }

    fn prev(self) -> Option<WizardStep> {
        let idx = WizardStep::ALL.iter().position(|s| *s == self)?;
        idx.checked_sub(1).map(|i| WizardStep::ALL[i])
    }
}

/// Draft campaign being edited step by step
#[derive(Debug, Clone)]
pub struct CampaignDraft {
    pub plan: CampaignPlan,
    pub leads: Vec<Lead>,
    step: WizardStep,
}

impl Default for CampaignDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl CampaignDraft {
    pub fn new() -> Self {
        Self {
            plan: CampaignPlan::default(),
            leads: Vec::new(),
            step: WizardStep::Smtp,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Whether the current step's form allows advancing
    pub fn can_advance(&self) -> bool {
        match self.step() {
            WizardStep::Smtp => self.plan.smtp.is_complete(),
            WizardStep::Leads => !self.leads.is_empty(),
            WizardStep::Template => !self.plan.template.is_empty(),
            WizardStep::Logic | WizardStep::Review => true,
            WizardStep::Simulation => false,
        }
    }

    /// Advance to the next step; returns the new step if the gate passed
    pub fn advance(&mut self) -> Option<WizardStep> {
        if !self.can_advance() {
            return None;
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Some(self.step)
    }

    /// Go back one step (always allowed)
    pub fn back(&mut self) -> WizardStep {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::import::sample_leads;
    use crate::campaign::plan::{EmailTemplate, SmtpConfig};

    fn filled_draft() -> CampaignDraft {
        let mut draft = CampaignDraft::new();
        draft.plan.smtp = SmtpConfig {
            host: "smtp.example.com".into(),
            port: "587".into(),
            user: "outreach".into(),
            pass: "hunter2".into(),
        };
        draft.leads = sample_leads();
        draft.plan.template = EmailTemplate {
            subject: "Hi {name}".into(),
            body: "Quick question about {company}.".into(),
        };
        draft
    }

    #[test]
    fn starts_at_smtp() {
        assert_eq!(CampaignDraft::new().step(), WizardStep::Smtp);
    }

    #[test]
    fn gates_block_incomplete_forms() {
        let mut draft = CampaignDraft::new();
        // Empty SMTP form blocks the first gate
        assert_eq!(draft.advance(), None);
        assert_eq!(draft.step(), WizardStep::Smtp);

        draft.plan.smtp.host = "smtp.example.com".into();
        draft.plan.smtp.user = "me".into();
        assert_eq!(draft.advance(), Some(WizardStep::Leads));

        // No leads imported yet
        assert_eq!(draft.advance(), None);
    }

    #[test]
    fn walks_all_steps_when_filled() {
        let mut draft = filled_draft();
        let mut visited = vec![draft.step()];
        while let Some(step) = draft.advance() {
            visited.push(step);
            if step == WizardStep::Simulation {
                break;
            }
        }
        assert_eq!(visited, WizardStep::ALL.to_vec());
    }

    #[test]
    fn back_is_always_allowed() {
        let mut draft = filled_draft();
        draft.advance();
        draft.advance();
        assert_eq!(draft.step(), WizardStep::Template);
        assert_eq!(draft.back(), WizardStep::Leads);
        assert_eq!(draft.back(), WizardStep::Smtp);
        // Already at the first step
        assert_eq!(draft.back(), WizardStep::Smtp);
    }
}
