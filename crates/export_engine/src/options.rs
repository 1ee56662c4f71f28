//! Export options

use capture::QualityTier;
use serde::{Deserialize, Serialize};

/// Creator string stamped into every exported document.
pub const PDF_CREATOR: &str = "Report Studio PDF Export";

/// Subject used when an export doesn't provide one.
pub const DEFAULT_SUBJECT: &str = "Student Progress Report";

/// Options for one report export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    /// Student the report belongs to; drives the filename and keywords.
    pub student_name: String,
    /// Rasterization quality tier.
    #[serde(default)]
    pub tier: QualityTier,
    /// Document title. Defaults to "{student} Progress Report".
    #[serde(default)]
    pub title: Option<String>,
    /// Document author. Defaults to the configured organization name.
    #[serde(default)]
    pub author: Option<String>,
    /// Document subject.
    #[serde(default)]
    pub subject: Option<String>,
}

impl ExportOptions {
    pub fn new(student_name: impl Into<String>) -> Self {
        Self {
            student_name: student_name.into(),
            tier: QualityTier::default(),
            title: None,
            author: None,
            subject: None,
        }
    }

    pub fn with_tier(mut self, tier: QualityTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Comma-joined keyword list for the document metadata.
    pub fn keywords(&self) -> Vec<String> {
        vec![
            "student".to_string(),
            "report".to_string(),
            self.tier.label().to_string(),
            self.student_name.clone(),
        ]
    }
}
