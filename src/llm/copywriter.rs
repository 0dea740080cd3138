//! AI-assisted email drafting
//!
//! Asks the LLM for a subject/body pair as strict JSON. Without a
//! configured client the drafter returns a deterministic mock template
//! so the wizard works offline.

use serde::Deserialize;

use crate::campaign::plan::EmailTemplate;
use crate::core::error::{CampaignError, Result};
use crate::llm::client::LlmClient;

/// Inputs collected on the template step
#[derive(Debug, Clone)]
pub struct DraftRequest {
    pub topic: String,
    pub audience: String,
    pub tone: String,
}

const DRAFT_SYSTEM_PROMPT: &str = r#"You write cold outreach emails.
The email body must use the variables {name} and {company} for personalization.
Respond with a single JSON object with keys "subject" and "body".
Do not include markdown code fences or any text outside the JSON."#;

/// Draft an email template for the given topic, audience and tone
///
/// No client configured -> deterministic mock template. A configured
/// client that fails -> error for the caller to surface; the wizard can
/// always fall back to hand-written copy.
pub async fn draft_email(client: Option<&LlmClient>, request: &DraftRequest) -> Result<EmailTemplate> {
    let Some(client) = client else {
        return Ok(mock_template(&request.topic));
    };

    let user_prompt = format!(
        "Write a cold email subject line and body.\nTopic: {}\nAudience: {}\nTone: {}",
        request.topic, request.audience, request.tone
    );

    let response = client.complete(DRAFT_SYSTEM_PROMPT, &user_prompt).await?;
    let json_str = extract_json(&response)?;

    let draft: DraftedTemplate = serde_json::from_str(json_str).map_err(|e| {
        CampaignError::Llm(format!(
            "Failed to parse drafted template: {} - Response: {}",
            e, response
        ))
    })?;

    Ok(EmailTemplate {
        subject: draft.subject,
        body: draft.body,
    })
}

#[derive(Deserialize)]
struct DraftedTemplate {
    subject: String,
    body: String,
}

/// Offline template mentioning the topic, with variables left in place
fn mock_template(topic: &str) -> EmailTemplate {
    EmailTemplate {
        subject: format!("Opportunity regarding {}", topic),
        body: format!(
            "Hi {{name}},\n\nI noticed you work at {{company}} and wanted to reach out regarding {}.\n\nWe specialize in helping companies like yours succeed.\n\nBest,\n[Your Name]",
            topic
        ),
    }
}

/// Extract the JSON object from an LLM response (tolerates fences and prose)
fn extract_json(response: &str) -> Result<&str> {
    let start = response
        .find('{')
        .ok_or_else(|| CampaignError::Llm("No JSON found in response".into()))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| CampaignError::Llm("No closing brace found in response".into()))?;
    Ok(&response[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_template_keeps_variables() {
        let template = mock_template("cloud costs");
        assert_eq!(template.subject, "Opportunity regarding cloud costs");
        assert!(template.body.contains("{name}"));
        assert!(template.body.contains("{company}"));
        assert!(template.body.contains("cloud costs"));
    }

    #[tokio::test]
    async fn drafts_offline_without_a_client() {
        let request = DraftRequest {
            topic: "developer tooling".into(),
            audience: "CTOs".into(),
            tone: "casual".into(),
        };
        let template = draft_email(None, &request).await.unwrap();
        assert!(template.subject.contains("developer tooling"));
    }

    #[test]
    fn extracts_json_from_fenced_response() {
        let response = "```json\n{\"subject\": \"Hi\", \"body\": \"Hello {name}\"}\n```";
        let json = extract_json(response).unwrap();
        let parsed: DraftedTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.subject, "Hi");
    }

    #[test]
    fn extracts_json_with_surrounding_prose() {
        let response = "Here you go:\n{\"subject\": \"S\", \"body\": \"B\"}\nHope that helps.";
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{') && json.ends_with('}'));
    }

    #[test]
    fn extract_json_rejects_plain_text() {
        assert!(extract_json("no json here").is_err());
    }
}
