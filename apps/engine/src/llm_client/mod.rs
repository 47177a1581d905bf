//! Gemini client — the single point of entry for all generative calls in
//! HireReady.
//!
//! ARCHITECTURAL RULE: no other module may call the generative-language API
//! directly. Every call goes through [`GeminiClient`], which owns the retry
//! policy and the structured-output contract: a value returned from
//! [`GeminiClient::generate`] has always been validated against the catalog
//! descriptor for its task.

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::{EngineError, TransportError};
use crate::models::{
    AnalysisFeedback, AnalysisReport, BulletPoints, InitialDraft, SectionRefinement,
    SkillSuggestion, TemplateRecommendation,
};
use crate::schema::{catalog, Schema};
use crate::tasks::{prompts, SamplingParams, TaskKind, TaskRequest};

const RESPONSE_MIME_TYPE: &str = "application/json";
/// Attempts per call. Only transport failures consume attempts.
const MAX_ATTEMPTS: u32 = 5;
/// Base unit for exponential backoff: 1, 2, 4, 8 units between attempts.
const BACKOFF_UNIT: Duration = Duration::from_secs(1);
/// Per-attempt timeout.
const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);
/// Wall-clock cap across all attempts: 5 full timeouts plus total backoff.
const OVERALL_DEADLINE: Duration = Duration::from_secs(165);

// ────────────────────────────────────────────────────────────────────────────
// Wire types (generateContent)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Schema,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text payload of the first candidate part, if any.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.as_deref())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single Gemini client used by all callers.
///
/// Each call is independent: retry state lives on the stack of the call that
/// created it, so concurrent invocations need no coordination.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    backoff_unit: Duration,
    attempt_timeout: Duration,
    overall_deadline: Duration,
}

impl GeminiClient {
    /// A missing key is accepted here; calls fail with `NotConfigured`.
    pub fn new(api_key: Option<String>, endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            endpoint: endpoint.into(),
            backoff_unit: BACKOFF_UNIT,
            attempt_timeout: ATTEMPT_TIMEOUT,
            overall_deadline: OVERALL_DEADLINE,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.gemini_api_key.clone(), config.gemini_api_url.clone())
    }

    /// Overrides the retry clock. Tests drive this with millisecond units;
    /// production keeps the 1s backoff unit and 30s attempt timeout.
    pub fn with_timing(
        mut self,
        backoff_unit: Duration,
        attempt_timeout: Duration,
        overall_deadline: Duration,
    ) -> Self {
        self.backoff_unit = backoff_unit;
        self.attempt_timeout = attempt_timeout;
        self.overall_deadline = overall_deadline;
        self
    }

    /// Runs a generation task with its default sampling parameters and
    /// returns the validated structured payload.
    pub async fn generate(&self, request: &TaskRequest) -> Result<Value, EngineError> {
        self.generate_with(request, request.sampling()).await
    }

    /// Runs a generation task with explicit sampling parameters.
    ///
    /// Inputs are validated before any network I/O; the returned value is
    /// guaranteed to conform to the catalog descriptor for the task.
    pub async fn generate_with(
        &self,
        request: &TaskRequest,
        sampling: SamplingParams,
    ) -> Result<Value, EngineError> {
        request.validate()?;
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(EngineError::NotConfigured)?;

        let kind = request.kind();
        let schema = catalog::descriptor(kind);
        let (system, user) = prompts::build(request);

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: &user }],
            }],
            system_instruction: Content {
                parts: vec![Part { text: &system }],
            },
            generation_config: GenerationConfig {
                response_mime_type: RESPONSE_MIME_TYPE,
                response_schema: schema,
                temperature: sampling.temperature,
            },
        };

        self.send_with_retry(kind, api_key, &body, schema).await
    }

    async fn send_with_retry(
        &self,
        kind: TaskKind,
        api_key: &str,
        body: &GenerateContentRequest<'_>,
        schema: &Schema,
    ) -> Result<Value, EngineError> {
        let deadline = Instant::now() + self.overall_deadline;
        let mut last_error: Option<TransportError> = None;
        let mut attempts = 0;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                // Exponential backoff: 1, 2, 4, 8 units after attempts 0-3.
                let delay = self.backoff_unit * (1u32 << (attempt - 1));
                if Instant::now() + delay >= deadline {
                    warn!("{kind}: overall deadline reached, abandoning retries");
                    break;
                }
                warn!("{kind}: attempt {attempt} failed, retrying after {delay:?}");
                tokio::time::sleep(delay).await;
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            attempts += 1;

            match self
                .attempt(api_key, body, self.attempt_timeout.min(remaining))
                .await
            {
                // A response arrived. Decode failures are terminal — a
                // schema-constrained request that came back malformed will
                // not improve on retry.
                Ok(raw) => return decode(kind, schema, &raw),
                Err(error) => {
                    warn!(
                        "{kind}: transport failure on attempt {}/{MAX_ATTEMPTS}: {error}",
                        attempt + 1
                    );
                    last_error = Some(error);
                }
            }
        }

        Err(EngineError::UpstreamUnavailable {
            attempts,
            source: last_error.unwrap_or(TransportError::Deadline {
                after: self.overall_deadline,
            }),
        })
    }

    /// One POST to the endpoint. Connect errors, timeouts, and non-2xx
    /// statuses come back as `TransportError`; a 2xx body is returned raw.
    async fn attempt(
        &self,
        api_key: &str,
        body: &GenerateContentRequest<'_>,
        timeout: Duration,
    ) -> Result<String, TransportError> {
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .timeout(timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.text().await.map_err(TransportError::Http)
    }

    async fn call<T: DeserializeOwned>(&self, request: TaskRequest) -> Result<T, EngineError> {
        let kind = request.kind();
        let value = self.generate(&request).await?;
        serde_json::from_value(value).map_err(|e| {
            EngineError::MalformedResponse(format!(
                "validated {kind} payload did not fit its model: {e}"
            ))
        })
    }

    // ── Caller-facing task surface ──────────────────────────────────────────

    /// Compares a resume against a job description.
    pub async fn analyze_resume(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisReport, EngineError> {
        self.call(TaskRequest::Analysis {
            resume_text: resume_text.to_string(),
            job_description: job_description.to_string(),
        })
        .await
    }

    /// Generates bullet points for a job title plus a task description.
    pub async fn generate_bullet_points(
        &self,
        job_title: &str,
        task_description: &str,
    ) -> Result<BulletPoints, EngineError> {
        self.call(TaskRequest::BulletPoints {
            job_title: job_title.to_string(),
            task_description: task_description.to_string(),
        })
        .await
    }

    /// One suggested bullet per missing skill. The response must cover each
    /// requested gap exactly once or it is rejected as malformed.
    pub async fn suggest_skill_bullets(
        &self,
        resume_text: &str,
        job_description: &str,
        keyword_gaps: &[String],
    ) -> Result<Vec<SkillSuggestion>, EngineError> {
        let suggestions: Vec<SkillSuggestion> = self
            .call(TaskRequest::SkillSuggestions {
                resume_text: resume_text.to_string(),
                job_description: job_description.to_string(),
                keyword_gaps: keyword_gaps.to_vec(),
            })
            .await?;

        if suggestions.len() != keyword_gaps.len() {
            return Err(EngineError::MalformedResponse(format!(
                "expected {} suggestions (one per skill gap), got {}",
                keyword_gaps.len(),
                suggestions.len()
            )));
        }
        for gap in keyword_gaps {
            let hits = suggestions
                .iter()
                .filter(|suggestion| suggestion.skill.eq_ignore_ascii_case(gap))
                .count();
            if hits != 1 {
                return Err(EngineError::MalformedResponse(format!(
                    "skill '{gap}' covered {hits} times, expected exactly once"
                )));
            }
        }
        Ok(suggestions)
    }

    /// Recommends a template from the fixed option set.
    pub async fn recommend_template(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<TemplateRecommendation, EngineError> {
        self.call(TaskRequest::TemplateRecommendation {
            resume_text: resume_text.to_string(),
            job_description: job_description.to_string(),
        })
        .await
    }

    /// Produces a clean rewritten draft incorporating analysis feedback.
    pub async fn generate_initial_draft(
        &self,
        resume_text: &str,
        job_description: &str,
        feedback: &AnalysisFeedback,
    ) -> Result<InitialDraft, EngineError> {
        let feedback = serde_json::to_value(feedback).map_err(|e| {
            EngineError::InvalidInput(format!("analysis feedback could not be serialized: {e}"))
        })?;
        self.call(TaskRequest::InitialDraft {
            resume_text: resume_text.to_string(),
            job_description: job_description.to_string(),
            feedback,
        })
        .await
    }

    /// 2-3 rewrite suggestions for one resume section.
    pub async fn refine_section(
        &self,
        section_text: &str,
        job_description: &str,
    ) -> Result<SectionRefinement, EngineError> {
        self.call(TaskRequest::SectionRefinement {
            section_text: section_text.to_string(),
            job_description: job_description.to_string(),
        })
        .await
    }
}

/// Extracts, parses, and validates the structured payload from a raw 2xx
/// body. Every failure here is `MalformedResponse` — never retried.
fn decode(kind: TaskKind, schema: &Schema, raw: &str) -> Result<Value, EngineError> {
    let envelope: GenerateContentResponse = serde_json::from_str(raw).map_err(|e| {
        EngineError::MalformedResponse(format!("unparseable response envelope: {e}"))
    })?;

    let text = envelope.text().ok_or_else(|| {
        EngineError::MalformedResponse("response carried no candidate text".to_string())
    })?;

    let text = strip_json_fences(text);

    let value: Value = serde_json::from_str(text).map_err(|e| {
        EngineError::MalformedResponse(format!("candidate text is not valid JSON: {e}"))
    })?;

    schema
        .validate(&value)
        .map_err(|violation| EngineError::MalformedResponse(format!("schema violation: {violation}")))?;

    debug!("{kind}: call succeeded ({} byte payload)", text.len());
    Ok(value)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
