// Prompt templates for the six generation tasks.
// Each builder is a pure function from typed inputs to a
// (system instruction, user content) pair — fixed templates, substitution only.

use crate::schema::catalog::TEMPLATE_OPTIONS;
use crate::tasks::TaskRequest;

const ANALYSIS_SYSTEM: &str = "You are a world-class resume analyzer and Applicant Tracking \
    System (ATS). Your task is to compare the provided resume text against the target job \
    description. Generate a structured JSON response based ONLY on the provided schema. \
    The analysis must focus on ATS compatibility, keyword matching, and content quality \
    (using action verbs and quantifiable results). Be critical, specific, and actionable.";

const ANALYSIS_USER_TEMPLATE: &str = "Analyze the following resume against the job description. \
Resume: ```{resume_text}```

Job Description: ```{job_description}```

Provide a structured analysis and an ATS score (1-100).";

const BULLET_POINTS_SYSTEM: &str = "You are a professional resume writer specializing in \
    generating impactful, quantifiable, and results-oriented bullet points. Use strong \
    action verbs and metrics. Your response MUST adhere strictly to the provided schema.";

const BULLET_POINTS_USER_TEMPLATE: &str = "Generate three unique, powerful resume bullet \
points for a candidate with the Job Title: '{job_title}' who performed the Task: \
'{task_description}'. Each bullet point should start with a strong action verb and include \
a quantifiable result.";

const SKILL_SUGGESTIONS_SYSTEM: &str = "You are a strategic career advisor. For each skill \
    listed in the missing-skills list, generate one highly-polished, quantifiable, and \
    action-oriented bullet point that the user could plausibly add to their resume to cover \
    that specific skill, based on the general context of the target job description. You \
    MUST return a JSON array conforming to the provided schema. Each bullet must clearly \
    demonstrate how a project or experience could show that skill. Do NOT use bullet points \
    that are already present in the user's resume.";

const SKILL_SUGGESTIONS_USER_TEMPLATE: &str = "Target Job Description: ```{job_description}```

User's Current Resume (for context/to avoid duplication): ```{resume_text}```

CRITICAL MISSING SKILLS TO PROVIDE BULLET POINTS FOR: {keyword_gaps}

For each missing skill, provide ONE suggested bullet point.";

const TEMPLATE_RECOMMENDATION_SYSTEM: &str = "You are a professional resume strategist. \
    Recommend the best template structure from the list provided that maximizes the user's \
    appeal to an ATS and a recruiter for the target job.";

const TEMPLATE_RECOMMENDATION_USER_TEMPLATE: &str = "Available Templates:
{template_list}

Analyze the User's Resume:
```{resume_text}```

Against the Target Job Description:
```{job_description}```

Provide your structured recommendation based ONLY on the schema.";

const INITIAL_DRAFT_SYSTEM: &str = "You are an expert resume editor. Your task is to take \
    the user's raw resume text and the analysis feedback and produce a single, CLEAN, \
    slightly optimized text draft. Integrate the 'keyword_gaps' subtly, enhance the \
    'content_improvements' where possible, and retain the overall structure. Do NOT add \
    extra formatting (like HTML tags). Return ONLY the modified resume text as a string \
    inside the JSON object described by the schema.";

const INITIAL_DRAFT_USER_TEMPLATE: &str = "Raw Resume Text:
```{resume_text}```

Target Job Description:
```{job_description}```

Analysis Feedback to Incorporate:
{feedback}

Produce the single, clean, modified resume text.";

const SECTION_REFINEMENT_SYSTEM: &str = "You are a hyper-specific resume refinement tool. \
    For the provided resume section, generate 2-3 precise, quantifiable, and keyword-rich \
    rewrite suggestions for the existing bullet points or sentences, focusing entirely on \
    the target job description. Ensure the suggestions are action-verb focused and \
    metric-driven. Return ONLY the structured JSON object.";

const SECTION_REFINEMENT_USER_TEMPLATE: &str = "Target Job Description (for context):
```{job_description}```

Resume Section Text to Refine:
```{section_text}```

Generate structured rewrite suggestions.";

/// Builds the (system instruction, user content) pair for a request.
pub fn build(request: &TaskRequest) -> (String, String) {
    match request {
        TaskRequest::Analysis {
            resume_text,
            job_description,
        } => (
            ANALYSIS_SYSTEM.to_string(),
            ANALYSIS_USER_TEMPLATE
                .replace("{resume_text}", resume_text)
                .replace("{job_description}", job_description),
        ),
        TaskRequest::BulletPoints {
            job_title,
            task_description,
        } => (
            BULLET_POINTS_SYSTEM.to_string(),
            BULLET_POINTS_USER_TEMPLATE
                .replace("{job_title}", job_title)
                .replace("{task_description}", task_description),
        ),
        TaskRequest::SkillSuggestions {
            resume_text,
            job_description,
            keyword_gaps,
        } => (
            SKILL_SUGGESTIONS_SYSTEM.to_string(),
            SKILL_SUGGESTIONS_USER_TEMPLATE
                .replace("{job_description}", job_description)
                .replace("{resume_text}", resume_text)
                .replace("{keyword_gaps}", &keyword_gaps.join(", ")),
        ),
        TaskRequest::TemplateRecommendation {
            resume_text,
            job_description,
        } => {
            let template_list = TEMPLATE_OPTIONS
                .iter()
                .map(|option| format!("- {option}"))
                .collect::<Vec<_>>()
                .join("\n");
            (
                TEMPLATE_RECOMMENDATION_SYSTEM.to_string(),
                TEMPLATE_RECOMMENDATION_USER_TEMPLATE
                    .replace("{template_list}", &template_list)
                    .replace("{resume_text}", resume_text)
                    .replace("{job_description}", job_description),
            )
        }
        TaskRequest::InitialDraft {
            resume_text,
            job_description,
            feedback,
        } => (
            INITIAL_DRAFT_SYSTEM.to_string(),
            INITIAL_DRAFT_USER_TEMPLATE
                .replace("{resume_text}", resume_text)
                .replace("{job_description}", job_description)
                .replace("{feedback}", &feedback.to_string()),
        ),
        TaskRequest::SectionRefinement {
            section_text,
            job_description,
        } => (
            SECTION_REFINEMENT_SYSTEM.to_string(),
            SECTION_REFINEMENT_USER_TEMPLATE
                .replace("{job_description}", job_description)
                .replace("{section_text}", section_text),
        ),
    }
}
