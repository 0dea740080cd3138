//! Lead import boundary
//!
//! Produces the initial lead list handed to the simulation engine. Real
//! mailbox integrations are out of scope: the importer reads simple
//! `name,email,company` lines or injects the built-in sample fixture.

use std::fs;
use std::path::Path;

use crate::campaign::lead::Lead;
use crate::core::error::{CampaignError, Result};

/// Built-in sample leads for demo runs
pub fn sample_leads() -> Vec<Lead> {
    vec![
        Lead::new("Alice Smith", "alice@example.com", "TechCorp"),
        Lead::new("Bob Jones", "bob@example.com", "BizInc"),
        Lead::new("Charlie Day", "charlie@startup.io", "StartupIO"),
        Lead::new("Diana Prince", "diana@enterprise.net", "Enterprise"),
        Lead::new("Evan Wright", "evan@dev.co", "DevCo"),
    ]
}

/// Load leads from a `name,email,company` file
///
/// Blank lines and a leading `name,email,company` header are skipped.
pub fn load_leads(path: &Path) -> Result<Vec<Lead>> {
    let content = fs::read_to_string(path)?;
    parse_leads(&content)
}

/// Parse `name,email,company` lines into pending leads
pub fn parse_leads(content: &str) -> Result<Vec<Lead>> {
    let mut leads = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line_no == 0 && line.eq_ignore_ascii_case("name,email,company") {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 3 || fields.iter().any(|f| f.is_empty()) {
            return Err(CampaignError::InvalidLead(format!(
                "line {}: expected 'name,email,company', got '{}'",
                line_no + 1,
                line
            )));
        }
        if !fields[1].contains('@') {
            return Err(CampaignError::InvalidLead(format!(
                "line {}: '{}' is not an email address",
                line_no + 1,
                fields[1]
            )));
        }

        leads.push(Lead::new(fields[0], fields[1], fields[2]));
    }

    Ok(leads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::lead::LeadStatus;

    #[test]
    fn sample_leads_are_pending() {
        let leads = sample_leads();
        assert_eq!(leads.len(), 5);
        for lead in &leads {
            assert_eq!(lead.status, LeadStatus::Pending);
            assert!(lead.history.is_empty());
            assert!(lead.email.contains('@'));
        }
    }

    #[test]
    fn parses_simple_records() {
        let leads = parse_leads("Jane Doe, jane@corp.com, Corp\nJoe Roe, joe@co.io, Co\n").unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].name, "Jane Doe");
        assert_eq!(leads[1].company, "Co");
    }

    #[test]
    fn skips_header_and_blank_lines() {
        let leads = parse_leads("name,email,company\n\nJane Doe, jane@corp.com, Corp\n").unwrap();
        assert_eq!(leads.len(), 1);
    }

    #[test]
    fn rejects_malformed_lines_by_number() {
        let err = parse_leads("Jane Doe, jane@corp.com, Corp\nnot a record\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn rejects_bad_email() {
        let err = parse_leads("Jane Doe, not-an-email, Corp\n").unwrap_err();
        assert!(err.to_string().contains("not an email address"));
    }
}
