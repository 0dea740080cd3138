pub mod client;
pub mod copywriter;
pub mod insight;

pub use client::LlmClient;
pub use copywriter::{draft_email, DraftRequest};
pub use insight::summarize_campaign;
