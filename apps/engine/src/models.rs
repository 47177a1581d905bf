//! Decoded result models, one per generation task.
//!
//! These mirror the catalog descriptors: the client validates the raw payload
//! against the descriptor first, then deserializes into the typed model, so
//! deserialization failures here indicate a descriptor/model mismatch rather
//! than a misbehaving model.

use serde::{Deserialize, Serialize};

/// Tag on analysis advice entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceKind {
    Improvement,
    Strength,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceEntry {
    #[serde(rename = "type")]
    pub kind: AdviceKind,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisFeedback {
    pub keyword_gaps: Vec<String>,
    pub keyword_strengths: Vec<String>,
    pub content_improvements: Vec<AdviceEntry>,
    pub formatting_advice: Vec<AdviceEntry>,
}

/// Full resume-vs-job-description comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// ATS/keyword match, 1-100.
    pub ats_score: u32,
    pub feedback: AnalysisFeedback,
}

/// Bullet points generated from a job title plus a task description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletPoints {
    pub job_title: String,
    pub generated_bullets: Vec<String>,
}

/// One suggested bullet covering one missing skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillSuggestion {
    pub skill: String,
    pub bullet: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateCandidate {
    pub template_name: String,
    /// 1-100.
    pub compatibility_score: u32,
    pub reason: String,
}

/// Template recommendation against the fixed option set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRecommendation {
    pub best_template_type: String,
    pub justification: String,
    pub available_templates: Vec<TemplateCandidate>,
}

/// Full-document rewrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialDraft {
    pub modified_draft: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteSuggestion {
    pub original_text_snippet: String,
    pub suggested_bullet: String,
}

/// Section-level rewrite suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRefinement {
    pub section_title: String,
    pub suggested_rewrites: Vec<RewriteSuggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analysis_report_deserializes_from_wire_shape() {
        let report: AnalysisReport = serde_json::from_value(json!({
            "ats_score": 82,
            "feedback": {
                "keyword_gaps": ["Terraform"],
                "keyword_strengths": ["Rust"],
                "content_improvements": [
                    {"type": "improvement", "detail": "Quantify outcomes."}
                ],
                "formatting_advice": [
                    {"type": "strength", "detail": "Consistent headers."}
                ]
            }
        }))
        .unwrap();
        assert_eq!(report.ats_score, 82);
        assert_eq!(report.feedback.content_improvements[0].kind, AdviceKind::Improvement);
    }

    #[test]
    fn test_advice_kind_uses_lowercase_wire_tags() {
        assert_eq!(
            serde_json::to_string(&AdviceKind::Strength).unwrap(),
            r#""strength""#
        );
        let kind: AdviceKind = serde_json::from_str(r#""improvement""#).unwrap();
        assert_eq!(kind, AdviceKind::Improvement);
    }

    #[test]
    fn test_advice_entry_rejects_unknown_kind() {
        let result: Result<AdviceEntry, _> =
            serde_json::from_value(json!({"type": "praise", "detail": "nope"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_template_recommendation_round_trips() {
        let rec = TemplateRecommendation {
            best_template_type: "Hybrid/Combination (Best balance of skills and experience depth)"
                .to_string(),
            justification: "Balances a deep skills section with solid tenure.".to_string(),
            available_templates: vec![TemplateCandidate {
                template_name: "Chronological/Traditional (Best for steady career progression)"
                    .to_string(),
                compatibility_score: 61,
                reason: "Linear history fits, but skills deserve more room.".to_string(),
            }],
        };
        let json = serde_json::to_string(&rec).unwrap();
        let recovered: TemplateRecommendation = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered.best_template_type, rec.best_template_type);
        assert_eq!(recovered.available_templates.len(), 1);
    }
}
