pub mod checklist;
pub mod client;
pub mod credential;
pub mod criteria;
pub mod dispatch;
pub mod error;
pub mod extract;
#[cfg(feature = "fetch")]
pub mod fetch;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod guide;
pub mod models;
pub mod parse;
pub mod prompt;
pub mod store;

pub use checklist::{Answers, Assessment, Checklist, ChecklistResult, ReadinessChecker, Thresholds, Tier};
pub use client::{Generation, GenerationHook, ModelClient, TextGenerator, Usage, UsageSnapshot, UsageTally};
pub use credential::Credential;
pub use criteria::{CriteriaSet, Criterion, CriterionDef, default_criteria_path};
pub use dispatch::{Analysis, AnalysisDispatcher, Readiness};
pub use error::{AnalysisError, CallError, CallErrorKind, ConfigError, Error, FetchError, NotReady, Result, TemplateError};
pub use extract::{ExtractedContent, extract_paragraphs};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, fetch_content, fetch_text, fetch_url, parse_http_url};
#[cfg(feature = "gemini")]
pub use gemini::{GeminiBackend, GeminiConfig};
pub use models::{ModelCatalog, ModelOption, ModelSelection};
pub use parse::Document;
pub use prompt::PromptTemplate;
pub use store::{ContentInput, ContentStore};
