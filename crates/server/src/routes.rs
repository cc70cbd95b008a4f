//! JSON API handlers.
//!
//! Session-bound handlers resolve the cookie first and return the jar with
//! the response so new sessions get their cookie even when the action fails.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::cookie::CookieJar;
use overview_core::checklist::DISCLAIMER;
use overview_core::guide::{self, GuideSection};
use overview_core::{
    Analysis, AnalysisError, Answers, Assessment, Checklist, ChecklistResult, ContentInput, Criterion, ModelOption,
    NotReady, Readiness, Tier, UsageSnapshot, fetch_content,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::notice::{ApiError, Notice, Reply};
use crate::session::Session;
use crate::state::AppState;

type ApiResult<T> = Result<Reply<T>, ApiError>;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    sessions: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok", sessions: state.sessions.len().await })
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub readiness: Readiness,
    pub model: ModelOption,
    pub content_chars: usize,
    pub preview: String,
}

impl SessionView {
    fn of(session: &Session) -> Self {
        Self {
            readiness: session.readiness(),
            model: session.model.option().clone(),
            content_chars: session.content.get().chars().count(),
            preview: session.content.preview(),
        }
    }
}

/// Readiness report plus a warning for the first unmet precondition.
pub async fn session(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (jar, handle) = state.sessions.resolve(jar).await;
    let session = handle.lock().await;
    let view = SessionView::of(&session);
    let reply = match view.readiness.blocker() {
        Some(blocker) => Reply::new(view).notice(Notice::warning(blocker.to_string())),
        None => Reply::new(view),
    };
    (jar, reply)
}

#[derive(Debug, Serialize)]
pub struct ModelsView {
    pub options: Vec<ModelOption>,
    pub selected: String,
}

pub async fn models(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (jar, handle) = state.sessions.resolve(jar).await;
    let selected = handle.lock().await.model.id().to_string();
    (jar, Json(ModelsView { options: state.catalog.options().to_vec(), selected }))
}

#[derive(Debug, Deserialize)]
pub struct CredentialRequest {
    pub api_key: String,
}

pub async fn set_credential(
    State(state): State<AppState>, jar: CookieJar, Json(req): Json<CredentialRequest>,
) -> impl IntoResponse {
    let (jar, handle) = state.sessions.resolve(jar).await;
    let mut session = handle.lock().await;
    (jar, configure(&mut session, &req.api_key))
}

fn configure(session: &mut Session, api_key: &str) -> ApiResult<Readiness> {
    match session.client.configure(api_key) {
        Ok(()) => Ok(Reply::new(session.readiness())
            .notice(Notice::success("Google AI Configured!"))
            .notice(Notice::info(format!("Selected Model: {}", session.model.label())))),
        Err(e) => {
            warn!(error = %e, "credential not accepted");
            Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                Notice::error(format!("Invalid API Key or configuration error: {e}")),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ModelRequest {
    pub model: String,
}

pub async fn select_model(
    State(state): State<AppState>, jar: CookieJar, Json(req): Json<ModelRequest>,
) -> impl IntoResponse {
    let (jar, handle) = state.sessions.resolve(jar).await;
    let mut session = handle.lock().await;
    let outcome = state.catalog.select(&req.model).map_err(ApiError::from).map(|selection| {
        let notice = Notice::info(format!("Selected Model: {}", selection.label()));
        session.model = selection;
        Reply::new(session.model.option().clone()).notice(notice)
    });
    (jar, outcome)
}

#[derive(Debug, Serialize)]
pub struct ContentView {
    pub mode: &'static str,
    pub chars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub preview: String,
}

pub async fn set_content(
    State(state): State<AppState>, jar: CookieJar, Json(input): Json<ContentInput>,
) -> impl IntoResponse {
    let (jar, handle) = state.sessions.resolve(jar).await;
    let mut session = handle.lock().await;
    (jar, acquire(&state, &mut session, input).await)
}

async fn acquire(state: &AppState, session: &mut Session, input: ContentInput) -> ApiResult<ContentView> {
    let ContentInput::Url(url) = &input else {
        if !session.content.apply_direct(&input) {
            return Err(NotReady::MissingContent.into());
        }
        let view = ContentView {
            mode: input.mode(),
            chars: session.content.get().chars().count(),
            paragraphs: None,
            title: None,
            preview: session.content.preview(),
        };
        return Ok(Reply::new(view).notice(Notice::success("Content ready for analysis.")));
    };

    let outcome = fetch_content(url, &state.fetch).await;
    session.content.record_fetch(&outcome.as_ref().map(|extracted| extracted.text.clone()));

    let extracted = outcome.map_err(|e| {
        warn!(url = %url, error = %e, "fetch failed");
        ApiError::from(e)
    })?;
    info!(url = %url, paragraphs = extracted.paragraphs, chars = extracted.text.len(), "content fetched");

    let notice = if extracted.is_empty() {
        Notice::warning("No paragraph text was found at that URL.")
    } else {
        Notice::success("Content fetched successfully!")
    };
    let view = ContentView {
        mode: input.mode(),
        chars: extracted.text.chars().count(),
        paragraphs: Some(extracted.paragraphs),
        title: extracted.title,
        preview: session.content.preview(),
    };
    Ok(Reply::new(view).notice(notice))
}

pub async fn analyze(
    State(state): State<AppState>, Path(criterion): Path<String>, jar: CookieJar,
) -> impl IntoResponse {
    let (jar, handle) = state.sessions.resolve(jar).await;
    let mut session = handle.lock().await;
    (jar, run_analysis(&state, &mut session, &criterion).await)
}

async fn run_analysis(state: &AppState, session: &mut Session, criterion: &str) -> ApiResult<Analysis> {
    let model = session.model.id().to_string();
    let outcome = state
        .dispatcher
        .analyze(&session.client, criterion, session.content.get(), &model)
        .await;

    match outcome {
        Ok(analysis) => {
            info!(criterion = %analysis.criterion, model = %model, chars = analysis.text.len(), "analysis complete");
            let notice = Notice::info(format!("Using model: {} for {}", model, analysis.name));
            Ok(Reply::new(analysis).notice(notice))
        }
        Err(err) => {
            let rejected = matches!(&err, AnalysisError::Call { source, .. } if source.rejection().is_some());
            let api_error = ApiError::from(err);
            if rejected {
                warn!(model = %model, "credential rejected; session unconfigured");
                session.client.clear();
                return Err(api_error.with(Notice::warning(NotReady::MissingCredential.to_string())));
            }
            Err(api_error)
        }
    }
}

pub async fn criteria(State(state): State<AppState>) -> Json<Vec<Criterion>> {
    Json(state.dispatcher.criteria().iter().cloned().collect())
}

#[derive(Serialize)]
pub struct GuideView {
    pub intro: &'static str,
    pub sections: Vec<GuideSection>,
}

pub async fn guide() -> Json<GuideView> {
    Json(GuideView { intro: guide::INTRO, sections: guide::sections() })
}

#[derive(Serialize)]
pub struct ChecklistsView {
    pub checklists: Vec<Checklist>,
    pub disclaimer: &'static str,
}

pub async fn checklists(State(state): State<AppState>) -> Json<ChecklistsView> {
    Json(ChecklistsView {
        checklists: vec![state.checker.query.clone(), state.checker.content.clone()],
        disclaimer: DISCLAIMER,
    })
}

#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    pub topic: String,
    #[serde(default)]
    pub when: Answers,
    #[serde(default)]
    pub content: Answers,
}

pub async fn assess(State(state): State<AppState>, Json(req): Json<AssessRequest>) -> ApiResult<Assessment> {
    let assessment = state.checker.assess(&req.topic, &req.when, &req.content)?;
    let notices = [&assessment.query, &assessment.content].into_iter().map(tier_notice).collect();
    Ok(Reply { notices, data: Some(assessment) })
}

fn tier_notice(result: &ChecklistResult) -> Notice {
    match result.tier {
        Tier::High => Notice::success(&result.message),
        Tier::Medium => Notice::info(&result.message),
        Tier::Low => Notice::warning(&result.message),
    }
}

pub async fn usage(State(state): State<AppState>) -> Json<UsageSnapshot> {
    Json(state.usage.snapshot())
}
