//! Audit report rendering.
//!
//! One line per audited subject. Failures sit alongside successful results
//! in the same report; "not found" and "unset" are ordinary outcomes, not
//! failures.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub lines: Vec<AuditLine>,
}

impl AuditReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            generated_at: Utc::now(),
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: AuditLine) {
        self.lines.push(line);
    }

    /// True when any line failed outright (as opposed to "unset"/"missing").
    pub fn has_failures(&self) -> bool {
        self.lines
            .iter()
            .any(|l| matches!(l.outcome, LineOutcome::Failed { .. }))
    }

    pub fn render_text(&self) -> String {
        let mut out = format!("== {} ==\n", self.title);
        for line in &self.lines {
            out.push_str(&line.to_string());
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditLine {
    pub subject: String,
    #[serde(flatten)]
    pub outcome: LineOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LineOutcome {
    /// The slot holds a value, rendered for display.
    Found { value: String },
    /// The slot exists in metadata but holds nothing.
    Unset,
    /// The pallet or item is not declared on this chain.
    Missing { reason: String },
    /// The request for this subject failed; sibling audits still ran.
    Failed { error: String },
}

impl AuditLine {
    pub fn found(subject: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            outcome: LineOutcome::Found {
                value: value.into(),
            },
        }
    }

    pub fn unset(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            outcome: LineOutcome::Unset,
        }
    }

    pub fn missing(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            outcome: LineOutcome::Missing {
                reason: reason.into(),
            },
        }
    }

    pub fn failed(subject: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            subject: subject.into(),
            outcome: LineOutcome::Failed {
                error: error.to_string(),
            },
        }
    }
}

impl fmt::Display for AuditLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            LineOutcome::Found { value } => write!(f, "{}: {}", self.subject, value),
            LineOutcome::Unset => write!(f, "{}: unset", self.subject),
            LineOutcome::Missing { reason } => {
                write!(f, "{}: not found ({})", self.subject, reason)
            }
            LineOutcome::Failed { error } => write!(f, "{}: FAILED ({})", self.subject, error),
        }
    }
}
