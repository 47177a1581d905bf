//! Task kinds and their typed inputs.
//!
//! The six generation tasks form a closed set. `TaskRequest` carries each
//! kind's inputs as a tagged variant so every match site stays exhaustive
//! when a task is added.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::errors::EngineError;

pub mod prompts;

/// The closed set of generation tasks the engine performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Analysis,
    BulletPoints,
    SkillSuggestions,
    TemplateRecommendation,
    InitialDraft,
    SectionRefinement,
}

impl TaskKind {
    pub const ALL: [TaskKind; 6] = [
        TaskKind::Analysis,
        TaskKind::BulletPoints,
        TaskKind::SkillSuggestions,
        TaskKind::TemplateRecommendation,
        TaskKind::InitialDraft,
        TaskKind::SectionRefinement,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::Analysis => "analysis",
            TaskKind::BulletPoints => "bullet_points",
            TaskKind::SkillSuggestions => "skill_suggestions",
            TaskKind::TemplateRecommendation => "template_recommendation",
            TaskKind::InitialDraft => "initial_draft",
            TaskKind::SectionRefinement => "section_refinement",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EngineError::UnknownTaskKind(s.to_string()))
    }
}

/// Optional sampling knobs forwarded as `generationConfig`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SamplingParams {
    pub temperature: Option<f32>,
}

/// One fully-specified generation call: a task plus its typed inputs.
///
/// A request is built per call, owned by that call, and dropped when it
/// returns.
#[derive(Debug, Clone)]
pub enum TaskRequest {
    /// Compare a resume against a job description.
    Analysis {
        resume_text: String,
        job_description: String,
    },
    /// Generate bullet points from a job title plus a task description.
    BulletPoints {
        job_title: String,
        task_description: String,
    },
    /// One suggested bullet per missing skill.
    SkillSuggestions {
        resume_text: String,
        job_description: String,
        keyword_gaps: Vec<String>,
    },
    /// Pick the best template from the fixed option set.
    TemplateRecommendation {
        resume_text: String,
        job_description: String,
    },
    /// Full-document rewrite incorporating prior analysis feedback.
    InitialDraft {
        resume_text: String,
        job_description: String,
        feedback: Value,
    },
    /// 2-3 rewrite suggestions for one resume section.
    SectionRefinement {
        section_text: String,
        job_description: String,
    },
}

impl TaskRequest {
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskRequest::Analysis { .. } => TaskKind::Analysis,
            TaskRequest::BulletPoints { .. } => TaskKind::BulletPoints,
            TaskRequest::SkillSuggestions { .. } => TaskKind::SkillSuggestions,
            TaskRequest::TemplateRecommendation { .. } => TaskKind::TemplateRecommendation,
            TaskRequest::InitialDraft { .. } => TaskKind::InitialDraft,
            TaskRequest::SectionRefinement { .. } => TaskKind::SectionRefinement,
        }
    }

    /// Fail-fast input validation. Runs before any network I/O.
    pub fn validate(&self) -> Result<(), EngineError> {
        match self {
            TaskRequest::Analysis {
                resume_text,
                job_description,
            }
            | TaskRequest::TemplateRecommendation {
                resume_text,
                job_description,
            } => {
                require(resume_text, "resume_text")?;
                require(job_description, "job_description")
            }
            TaskRequest::BulletPoints {
                job_title,
                task_description,
            } => {
                require(job_title, "job_title")?;
                require(task_description, "task_description")
            }
            TaskRequest::SkillSuggestions {
                resume_text,
                job_description,
                keyword_gaps,
            } => {
                require(resume_text, "resume_text")?;
                require(job_description, "job_description")?;
                if keyword_gaps.is_empty() {
                    return Err(EngineError::InvalidInput(
                        "'keyword_gaps' must contain at least one skill".to_string(),
                    ));
                }
                if keyword_gaps.iter().any(|gap| gap.trim().is_empty()) {
                    return Err(EngineError::InvalidInput(
                        "'keyword_gaps' must not contain blank entries".to_string(),
                    ));
                }
                Ok(())
            }
            TaskRequest::InitialDraft {
                resume_text,
                job_description,
                feedback,
            } => {
                require(resume_text, "resume_text")?;
                require(job_description, "job_description")?;
                if feedback.is_null() {
                    return Err(EngineError::InvalidInput(
                        "'feedback' from a prior analysis is required".to_string(),
                    ));
                }
                Ok(())
            }
            TaskRequest::SectionRefinement {
                section_text,
                job_description,
            } => {
                require(section_text, "section_text")?;
                require(job_description, "job_description")
            }
        }
    }

    /// Default sampling for this task. Recommendation runs near-deterministic;
    /// the rewrites run progressively warmer.
    pub fn sampling(&self) -> SamplingParams {
        match self {
            TaskRequest::TemplateRecommendation { .. } => SamplingParams {
                temperature: Some(0.1),
            },
            TaskRequest::InitialDraft { .. } => SamplingParams {
                temperature: Some(0.3),
            },
            TaskRequest::SectionRefinement { .. } => SamplingParams {
                temperature: Some(0.5),
            },
            _ => SamplingParams::default(),
        }
    }
}

fn require(field: &str, name: &str) -> Result<(), EngineError> {
    if field.trim().is_empty() {
        Err(EngineError::InvalidInput(format!("'{name}' is required")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_kind_round_trips_through_strings() {
        for kind in TaskKind::ALL {
            let recovered: TaskKind = kind.as_str().parse().unwrap();
            assert_eq!(recovered, kind);
        }
    }

    #[test]
    fn test_unrecognized_name_is_unknown_task_kind() {
        let err = "resume_roast".parse::<TaskKind>().unwrap_err();
        assert!(matches!(err, EngineError::UnknownTaskKind(name) if name == "resume_roast"));
    }

    #[test]
    fn test_analysis_requires_both_texts() {
        let request = TaskRequest::Analysis {
            resume_text: "  ".to_string(),
            job_description: "Rust engineer".to_string(),
        };
        let err = request.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(msg) if msg.contains("resume_text")));

        let request = TaskRequest::Analysis {
            resume_text: "10 years of Rust".to_string(),
            job_description: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_bullet_points_requires_title_and_task() {
        let request = TaskRequest::BulletPoints {
            job_title: "Backend Engineer".to_string(),
            task_description: String::new(),
        };
        let err = request.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(msg) if msg.contains("task_description")));
    }

    #[test]
    fn test_skill_suggestions_rejects_empty_and_blank_gap_lists() {
        let base = |gaps: Vec<String>| TaskRequest::SkillSuggestions {
            resume_text: "resume".to_string(),
            job_description: "jd".to_string(),
            keyword_gaps: gaps,
        };
        assert!(base(vec![]).validate().is_err());
        assert!(base(vec!["Python".to_string(), " ".to_string()])
            .validate()
            .is_err());
        assert!(base(vec!["Python".to_string(), "Kubernetes".to_string()])
            .validate()
            .is_ok());
    }

    #[test]
    fn test_initial_draft_requires_feedback() {
        let request = TaskRequest::InitialDraft {
            resume_text: "resume".to_string(),
            job_description: "jd".to_string(),
            feedback: Value::Null,
        };
        assert!(request.validate().is_err());

        let request = TaskRequest::InitialDraft {
            resume_text: "resume".to_string(),
            job_description: "jd".to_string(),
            feedback: json!({"keyword_gaps": []}),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_sampling_defaults_per_task() {
        let analysis = TaskRequest::Analysis {
            resume_text: "r".to_string(),
            job_description: "j".to_string(),
        };
        assert_eq!(analysis.sampling().temperature, None);

        let template = TaskRequest::TemplateRecommendation {
            resume_text: "r".to_string(),
            job_description: "j".to_string(),
        };
        assert_eq!(template.sampling().temperature, Some(0.1));

        let refine = TaskRequest::SectionRefinement {
            section_text: "s".to_string(),
            job_description: "j".to_string(),
        };
        assert_eq!(refine.sampling().temperature, Some(0.5));
    }
}
