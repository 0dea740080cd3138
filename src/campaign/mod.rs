pub mod import;
pub mod lead;
pub mod plan;
pub mod wizard;

pub use lead::{HistoryEntry, Lead, LeadStatus};
pub use plan::{CampaignPlan, EmailTemplate, FollowUpPolicy, SmtpConfig};
pub use wizard::{CampaignDraft, WizardStep};
