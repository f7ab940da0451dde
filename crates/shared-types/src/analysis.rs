//! Payloads returned by `POST /api/upload`

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::terms::count_terms;

/// Categorized legal findings for a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalAnalysis {
    #[serde(default)]
    pub key_clauses: Option<Vec<String>>,
    #[serde(default)]
    pub obligations: Option<Vec<String>>,
    #[serde(default)]
    pub risks: Option<Vec<String>>,
}

/// Document analysis as rendered in the preview pane.
///
/// Every field may be missing; the accessors below collapse missing,
/// `null` and empty values so the view can fall back to placeholder copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub simplified_text: Option<String>,
    #[serde(default)]
    pub analysis: Option<LegalAnalysis>,
}

/// Counters shown in the statistics block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisStats {
    pub key_clauses: usize,
    pub obligations: usize,
    pub risks: usize,
    pub terms_simplified: usize,
}

impl AnalysisResult {
    pub fn summary(&self) -> Option<&str> {
        non_empty(self.summary.as_deref())
    }

    pub fn simplified_text(&self) -> Option<&str> {
        non_empty(self.simplified_text.as_deref())
    }

    pub fn key_clauses(&self) -> &[String] {
        self.analysis
            .as_ref()
            .and_then(|a| a.key_clauses.as_deref())
            .unwrap_or(&[])
    }

    pub fn obligations(&self) -> &[String] {
        self.analysis
            .as_ref()
            .and_then(|a| a.obligations.as_deref())
            .unwrap_or(&[])
    }

    pub fn risks(&self) -> &[String] {
        self.analysis
            .as_ref()
            .and_then(|a| a.risks.as_deref())
            .unwrap_or(&[])
    }

    pub fn stats(&self) -> AnalysisStats {
        AnalysisStats {
            key_clauses: self.key_clauses().len(),
            obligations: self.obligations().len(),
            risks: self.risks().len(),
            terms_simplified: self.simplified_text().map(count_terms).unwrap_or(0),
        }
    }
}

/// Full upload response envelope: either an analysis or an `error`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

impl UploadResponse {
    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Split the envelope into the analysis or the backend's error message.
    /// An empty `error` string does not count as an error.
    pub fn into_result(self) -> Result<AnalysisResult, ApiError> {
        match self.error {
            Some(message) if !message.is_empty() => Err(ApiError::Server(message)),
            _ => Ok(self.result),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
