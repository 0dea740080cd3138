use thiserror::Error;

#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("no leads loaded - import leads before starting the campaign")]
    NoLeads,

    #[error("invalid lead record: {0}")]
    InvalidLead(String),

    #[error("campaign plan error: {0}")]
    Plan(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CampaignError>;
