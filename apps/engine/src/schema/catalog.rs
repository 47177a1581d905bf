//! The fixed descriptor catalog: one response shape per generation task.
//!
//! Shapes are data, not behavior — built once on first use and shared
//! read-only for the life of the process.

use std::sync::LazyLock;

use crate::schema::Schema;
use crate::tasks::TaskKind;

/// The closed set of resume templates the recommender chooses from.
pub const TEMPLATE_OPTIONS: [&str; 4] = [
    "Chronological/Traditional (Best for steady career progression)",
    "Functional/Skills-Based (Best for career changers or gap coverage)",
    "Hybrid/Combination (Best balance of skills and experience depth)",
    "Technical/Project-Focused (Best for engineers/developers)",
];

/// Returns the response descriptor for `kind`.
pub fn descriptor(kind: TaskKind) -> &'static Schema {
    match kind {
        TaskKind::Analysis => &ANALYSIS,
        TaskKind::BulletPoints => &BULLET_POINTS,
        TaskKind::SkillSuggestions => &SKILL_SUGGESTIONS,
        TaskKind::TemplateRecommendation => &TEMPLATE_RECOMMENDATION,
        TaskKind::InitialDraft => &INITIAL_DRAFT,
        TaskKind::SectionRefinement => &SECTION_REFINEMENT,
    }
}

fn object(properties: Vec<(&'static str, Schema)>) -> Schema {
    Schema::Object {
        description: None,
        properties,
    }
}

fn array(description: &'static str, items: Schema) -> Schema {
    Schema::Array {
        description: Some(description),
        items: Box::new(items),
    }
}

fn string(description: &'static str) -> Schema {
    Schema::String {
        description: Some(description),
        allowed: None,
    }
}

fn integer(description: &'static str) -> Schema {
    Schema::Integer {
        description: Some(description),
    }
}

/// `{type: improvement|strength, detail}` — shared by both feedback lists.
fn advice_entry() -> Schema {
    object(vec![
        (
            "type",
            Schema::String {
                description: None,
                allowed: Some(vec!["improvement", "strength"]),
            },
        ),
        ("detail", string("The specific advice or observation.")),
    ])
}

static ANALYSIS: LazyLock<Schema> = LazyLock::new(|| {
    object(vec![
        (
            "ats_score",
            integer(
                "A score from 1 to 100 representing the ATS and keyword match between \
                 the resume and the job description. Higher is better.",
            ),
        ),
        (
            "feedback",
            object(vec![
                (
                    "keyword_gaps",
                    array(
                        "A list of critical skills or keywords from the job description \
                         that are missing or weakly present in the resume.",
                        Schema::String {
                            description: None,
                            allowed: None,
                        },
                    ),
                ),
                (
                    "keyword_strengths",
                    array(
                        "A list of skills or experiences from the resume that perfectly \
                         match the job description's requirements.",
                        Schema::String {
                            description: None,
                            allowed: None,
                        },
                    ),
                ),
                (
                    "content_improvements",
                    array(
                        "Actionable advice on improving the content and style (e.g., \
                         replace passive voice, quantify a specific bullet point, use \
                         stronger action verbs).",
                        advice_entry(),
                    ),
                ),
                (
                    "formatting_advice",
                    array(
                        "Suggestions on readability, length, and formatting (e.g., font \
                         consistency, section hierarchy, removing non-ATS friendly \
                         elements).",
                        advice_entry(),
                    ),
                ),
            ]),
        ),
    ])
});

static BULLET_POINTS: LazyLock<Schema> = LazyLock::new(|| {
    object(vec![
        (
            "job_title",
            string("The professional job title used for context."),
        ),
        (
            "generated_bullets",
            array(
                "A list of three highly-polished, quantifiable, and action-oriented \
                 resume bullet points.",
                Schema::String {
                    description: None,
                    allowed: None,
                },
            ),
        ),
    ])
});

static SKILL_SUGGESTIONS: LazyLock<Schema> = LazyLock::new(|| {
    array(
        "A list of suggested bullet points, one for each skill gap.",
        object(vec![
            (
                "skill",
                string("The specific missing keyword/skill that this bullet addresses."),
            ),
            (
                "bullet",
                string(
                    "A strong, quantifiable, and action-oriented bullet point suggestion \
                     on how to integrate this skill into the user's resume, based on \
                     common experience for the target job.",
                ),
            ),
        ]),
    )
});

// `best_template_type` is pinned to the closed option set, so a validated
// recommendation can never name a template the product does not ship.
static TEMPLATE_RECOMMENDATION: LazyLock<Schema> = LazyLock::new(|| {
    object(vec![
        (
            "best_template_type",
            Schema::String {
                description: Some("The single best-suited template from the options provided."),
                allowed: Some(TEMPLATE_OPTIONS.to_vec()),
            },
        ),
        (
            "justification",
            string(
                "A 1-2 sentence explanation of why this template is the best match for \
                 the user's resume and the target job.",
            ),
        ),
        (
            "available_templates",
            array(
                "The list of available templates, with a score and brief compatibility \
                 reason for each.",
                object(vec![
                    (
                        "template_name",
                        Schema::String {
                            description: None,
                            allowed: Some(TEMPLATE_OPTIONS.to_vec()),
                        },
                    ),
                    ("compatibility_score", integer("Score from 1 to 100.")),
                    (
                        "reason",
                        string("1 sentence on why this template is a good/bad match."),
                    ),
                ]),
            ),
        ),
    ])
});

static INITIAL_DRAFT: LazyLock<Schema> = LazyLock::new(|| {
    object(vec![(
        "modified_draft",
        Schema::String {
            description: None,
            allowed: None,
        },
    )])
});

static SECTION_REFINEMENT: LazyLock<Schema> = LazyLock::new(|| {
    object(vec![
        (
            "section_title",
            string("The title of the section being refined (e.g., 'Experience', 'Summary')."),
        ),
        (
            "suggested_rewrites",
            array(
                "A list of suggested changes for the section.",
                object(vec![
                    (
                        "original_text_snippet",
                        string("A short snippet (5-10 words) of the text being replaced/modified."),
                    ),
                    (
                        "suggested_bullet",
                        string(
                            "The new, refined, quantifiable, and keyword-rich bullet point \
                             or sentence.",
                        ),
                    ),
                ]),
            ),
        ),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_task_kind_has_a_descriptor() {
        for kind in TaskKind::ALL {
            // Forces each LazyLock and proves the lookup is total.
            let _ = descriptor(kind);
        }
    }

    #[test]
    fn test_analysis_descriptor_accepts_a_full_report() {
        let payload = json!({
            "ats_score": 74,
            "feedback": {
                "keyword_gaps": ["Kubernetes"],
                "keyword_strengths": ["Rust", "distributed systems"],
                "content_improvements": [
                    {"type": "improvement", "detail": "Quantify the caching bullet."}
                ],
                "formatting_advice": [
                    {"type": "strength", "detail": "Clean single-column layout."}
                ]
            }
        });
        assert!(descriptor(TaskKind::Analysis).validate(&payload).is_ok());
    }

    #[test]
    fn test_analysis_descriptor_rejects_bad_advice_tag() {
        let payload = json!({
            "ats_score": 74,
            "feedback": {
                "keyword_gaps": [],
                "keyword_strengths": [],
                "content_improvements": [{"type": "criticism", "detail": "..."}],
                "formatting_advice": []
            }
        });
        let err = descriptor(TaskKind::Analysis).validate(&payload).unwrap_err();
        assert!(err.contains("content_improvements[0].type"));
    }

    #[test]
    fn test_skill_suggestions_descriptor_is_a_top_level_array() {
        let payload = json!([
            {"skill": "Python", "bullet": "Automated ETL pipelines in Python."},
            {"skill": "Kubernetes", "bullet": "Deployed services to Kubernetes."}
        ]);
        assert!(descriptor(TaskKind::SkillSuggestions)
            .validate(&payload)
            .is_ok());
        assert!(descriptor(TaskKind::SkillSuggestions)
            .validate(&json!({"skill": "Python"}))
            .is_err());
    }

    #[test]
    fn test_template_descriptor_pins_best_template_to_the_option_set() {
        let conformant = json!({
            "best_template_type": TEMPLATE_OPTIONS[3],
            "justification": "Project depth matters most for this role.",
            "available_templates": [
                {
                    "template_name": TEMPLATE_OPTIONS[0],
                    "compatibility_score": 55,
                    "reason": "Steady history, but projects carry the resume."
                }
            ]
        });
        let schema = descriptor(TaskKind::TemplateRecommendation);
        assert!(schema.validate(&conformant).is_ok());

        let off_catalog = json!({
            "best_template_type": "Creative/Freeform",
            "justification": "…",
            "available_templates": []
        });
        let err = schema.validate(&off_catalog).unwrap_err();
        assert!(err.contains("best_template_type"));
    }

    #[test]
    fn test_initial_draft_descriptor_requires_the_draft_field() {
        let schema = descriptor(TaskKind::InitialDraft);
        assert!(schema.validate(&json!({"modified_draft": "text"})).is_ok());
        assert!(schema.validate(&json!({"draft": "text"})).is_err());
    }

    #[test]
    fn test_section_refinement_descriptor_shape() {
        let payload = json!({
            "section_title": "Experience",
            "suggested_rewrites": [
                {
                    "original_text_snippet": "worked on backend services",
                    "suggested_bullet": "Built 3 backend services handling 10k rps."
                }
            ]
        });
        assert!(descriptor(TaskKind::SectionRefinement)
            .validate(&payload)
            .is_ok());
    }

    #[test]
    fn test_wire_form_carries_property_ordering() {
        let wire = serde_json::to_string(descriptor(TaskKind::Analysis)).unwrap();
        assert!(wire.contains(r#""propertyOrdering":["ats_score","feedback"]"#));
        assert!(wire.contains(
            r#""propertyOrdering":["keyword_gaps","keyword_strengths","content_improvements","formatting_advice"]"#
        ));
    }
}
