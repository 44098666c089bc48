//! Moderation log records for contract reviews
//!
//! Every extraction the application serves is stored as a [`ReviewLogEntry`].
//! Admins later approve or reject entries; approved ones become fine-tuning
//! examples for the review prompt.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::types::{Clause, Issue, ParsedReport};

/// Prompt version recorded when the caller does not supply one
pub const DEFAULT_PROMPT_VERSION: &str = "v1.0";

/// Moderation state of a logged review
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Issue as stored in the moderation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedIssue {
    pub title: String,
    pub explanation: String,
}

/// One stored contract review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewLogEntry {
    pub id: String,
    pub user_id: String,
    pub prompt_version: String,
    pub contract_type_detected: String,
    pub input_contract: String,
    pub input_hash: String,
    pub output_issues: Vec<LoggedIssue>,
    pub output_recommendations: Vec<Clause>,
    pub output_improved_contract: String,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(default)]
    pub admin_notes: String,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<String>,
    pub created_at: String,
}

impl ReviewLogEntry {
    /// Build a pending log entry for an extracted report
    pub fn new(user_id: &str, input_contract: &str, report: &ParsedReport) -> Self {
        Self::with_prompt_version(user_id, DEFAULT_PROMPT_VERSION, input_contract, report)
    }

    pub fn with_prompt_version(
        user_id: &str,
        prompt_version: &str,
        input_contract: &str,
        report: &ParsedReport,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            prompt_version: prompt_version.to_string(),
            contract_type_detected: report.contract_type.clone(),
            input_contract: input_contract.to_string(),
            input_hash: hash_contract(input_contract),
            output_issues: report
                .issues
                .iter()
                .map(|issue| LoggedIssue {
                    title: issue.short_title().to_string(),
                    explanation: issue.explanation.clone(),
                })
                .collect(),
            output_recommendations: report.recommended_clauses.clone(),
            output_improved_contract: report.improved_draft.clone(),
            status: ReviewStatus::Pending,
            admin_notes: String::new(),
            reviewed_by: None,
            reviewed_at: None,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Mark the entry approved by `reviewer`
    pub fn approve(&mut self, reviewer: &str, notes: &str) {
        self.review(ReviewStatus::Approved, reviewer, notes);
    }

    /// Mark the entry rejected by `reviewer`
    pub fn reject(&mut self, reviewer: &str, notes: &str) {
        self.review(ReviewStatus::Rejected, reviewer, notes);
    }

    fn review(&mut self, status: ReviewStatus, reviewer: &str, notes: &str) {
        self.status = status;
        self.admin_notes = notes.to_string();
        self.reviewed_by = Some(reviewer.to_string());
        self.reviewed_at = Some(Utc::now().to_rfc3339());
    }

    pub fn is_approved(&self) -> bool {
        self.status == ReviewStatus::Approved
    }

    /// Reassemble the stored output as a report record
    pub fn to_report(&self) -> ParsedReport {
        ParsedReport {
            contract_type: self.contract_type_detected.clone(),
            issues: self
                .output_issues
                .iter()
                .map(|issue| Issue::from_text(&issue.explanation))
                .collect(),
            recommended_clauses: self.output_recommendations.clone(),
            improved_draft: self.output_improved_contract.clone(),
            disclaimer: String::new(),
        }
    }

    /// Chat-style fine-tuning example for this entry
    pub fn to_training_example(&self, system_prompt: &str) -> TrainingExample {
        TrainingExample {
            messages: vec![
                ChatMessage::new(ChatRole::System, system_prompt),
                ChatMessage::new(ChatRole::User, &self.input_contract),
                ChatMessage::new(ChatRole::Assistant, self.to_report().to_canonical_text().trim_end()),
            ],
        }
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize review log entry: {}", e))
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json)
            .map_err(|e| format!("Failed to deserialize review log entry: {}", e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    fn new(role: ChatRole, content: &str) -> Self {
        Self {
            role,
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub messages: Vec<ChatMessage>,
}

/// Training examples for every approved entry, newest first
pub fn export_training_data(
    entries: &[ReviewLogEntry],
    system_prompt: &str,
) -> Vec<TrainingExample> {
    let mut approved: Vec<&ReviewLogEntry> = entries.iter().filter(|e| e.is_approved()).collect();
    // RFC 3339 timestamps from the same clock sort lexically
    approved.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    approved
        .into_iter()
        .map(|entry| entry.to_training_example(system_prompt))
        .collect()
}

/// SHA-256 of the submitted contract text, hex encoded
pub fn hash_contract(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
