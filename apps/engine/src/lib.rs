//! HireReady generation engine.
//!
//! Turns (task kind, text inputs) into schema-validated structured results
//! from the Gemini generateContent API: resume analysis, bullet generation,
//! skill-gap suggestions, template recommendation, draft rewrites, and
//! section refinement. The HTTP surface, account storage, and document text
//! extraction live outside this crate and consume [`GeminiClient`]'s typed
//! methods.

pub mod config;
pub mod errors;
pub mod llm_client;
pub mod models;
pub mod schema;
pub mod tasks;

pub use config::Config;
pub use errors::{EngineError, TransportError};
pub use llm_client::GeminiClient;
pub use models::{
    AdviceEntry, AdviceKind, AnalysisFeedback, AnalysisReport, BulletPoints, InitialDraft,
    RewriteSuggestion, SectionRefinement, SkillSuggestion, TemplateCandidate,
    TemplateRecommendation,
};
pub use tasks::{SamplingParams, TaskKind, TaskRequest};
