// recycleme Data Models
// Documents, detection results and the detector wire format

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============ Source Document ============

/// The file handed to the tool, loaded once and never written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Absolute path of the input file.
    pub path: PathBuf,
    pub content: String,
}

impl SourceDocument {
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

// ============ Detection Results ============

/// Verdict for a single chunk.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Phrases flagged as AI-generated, in the order the detector returned them.
    pub phrases: Vec<String>,
    /// Estimated AI-generated share of the chunk, 0-100.
    pub ai_percentage: f64,
}

/// Verdict for the whole document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub phrases: Vec<String>,
    /// Unweighted mean of the chunk percentages.
    pub ai_percentage: f64,
    pub chunk_count: usize,
}

// ============ Rewrite Summary ============

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RewriteSummary {
    /// Phrases the user was prompted for.
    pub prompted: usize,
    /// Phrases whose replacement was written to the working copy.
    pub applied: usize,
    /// Total occurrences replaced across all phrases.
    pub occurrences: usize,
    /// Stdin closed before every phrase was handled.
    pub input_exhausted: bool,
}

// ============ Detector Wire Format ============

#[derive(Debug, Clone, Serialize)]
pub struct DetectRequest<'a> {
    pub input_text: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetectResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<DetectResponseData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectResponseData {
    /// Sentences the service wants humanized.
    #[serde(default, rename = "h")]
    pub phrases: Option<Vec<String>>,
    #[serde(default)]
    pub fake_percentage: Option<f64>,
}

impl From<DetectResponse> for DetectionResult {
    fn from(response: DetectResponse) -> Self {
        let data = response.data.unwrap_or_default();
        Self {
            phrases: data.phrases.unwrap_or_default(),
            ai_percentage: data.fake_percentage.unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let body = serde_json::to_value(DetectRequest { input_text: "hello" }).unwrap();
        assert_eq!(body, serde_json::json!({ "input_text": "hello" }));
    }

    #[test]
    fn test_response_into_result() {
        let raw = r#"{"success":true,"data":{"h":["AI wrote this."],"fakePercentage":80.5,"isHuman":19}}"#;
        let response: DetectResponse = serde_json::from_str(raw).unwrap();
        let result = DetectionResult::from(response);
        assert_eq!(result.phrases, vec!["AI wrote this.".to_string()]);
        assert_eq!(result.ai_percentage, 80.5);
    }

    #[test]
    fn test_null_fields_become_zero() {
        let raw = r#"{"data":{"h":null,"fakePercentage":null}}"#;
        let response: DetectResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(DetectionResult::from(response), DetectionResult::default());
    }
}
