use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::Caller;
use crate::errors::AppError;
use crate::parser::adapter::AutofillForm;
use crate::parser::{self, StructuredResume};
use crate::resumes::extract::{extract_text, DocumentKind};
use crate::resumes::improve::merge_context;
use crate::state::AppState;
use crate::usage::{enforce_limit, UsageSnapshot};

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    /// Missing or blank text yields the all-empty resume, not an error.
    #[serde(default)]
    pub resume_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub resume: StructuredResume,
    pub autofill: AutofillForm,
}

impl From<StructuredResume> for ParseResponse {
    fn from(resume: StructuredResume) -> Self {
        let autofill = AutofillForm::from(&resume);
        Self { resume, autofill }
    }
}

#[derive(Debug, Deserialize)]
pub struct ImproveRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
    /// Profile the caller already has on file. Non-empty fields here win
    /// over anything parsed from `resume_text`.
    #[serde(default)]
    pub stored_profile: Option<StructuredResume>,
    /// When present the resume is tailored to this posting.
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImproveResponse {
    pub resume: StructuredResume,
    pub usage: UsageSnapshot,
    pub generated_at: DateTime<Utc>,
}

/// POST /api/v1/resumes/parse
pub async fn handle_parse(Json(req): Json<ParseRequest>) -> Json<ParseResponse> {
    Json(parser::parse(req.resume_text.as_deref()).into())
}

/// POST /api/v1/resumes/upload
///
/// Multipart upload with the document in the `file` field.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseResponse>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        if bytes.len() > state.config.max_upload_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "upload exceeds {} bytes",
                state.config.max_upload_bytes
            )));
        }

        let kind = DocumentKind::detect(content_type.as_deref(), file_name.as_deref(), &bytes)?;
        let text = extract_text(kind, bytes).await?;
        let resume = parser::parse(Some(&text));
        info!(
            ?kind,
            work_entries = resume.work_experience.len(),
            education_entries = resume.education.len(),
            "parsed uploaded resume"
        );
        return Ok(Json(resume.into()));
    }

    Err(AppError::Validation(format!(
        "multipart field '{UPLOAD_FIELD}' is required"
    )))
}

/// POST /api/v1/resumes/improve
///
/// Metered per caller: "improve" without a job description, "tailor" with one.
pub async fn handle_improve(
    State(state): State<AppState>,
    caller: Caller,
    Json(req): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    let improver = state.improver.clone().ok_or_else(|| {
        AppError::Unavailable("resume improvement is not configured".to_string())
    })?;

    let job_description = req
        .job_description
        .as_deref()
        .map(str::trim)
        .filter(|jd| !jd.is_empty());

    let parsed = parser::parse(req.resume_text.as_deref());
    let context = merge_context(req.stored_profile, parsed);
    if context == StructuredResume::default() {
        return Err(AppError::Validation(
            "resume_text or stored_profile must contain resume content".to_string(),
        ));
    }

    let action = if job_description.is_some() { "tailor" } else { "improve" };
    let usage = enforce_limit(state.usage.as_ref(), &state.limits, &caller, action).await?;

    let resume = improver.improve(&context, job_description).await?;
    info!(user_id = %caller.user_id, action, remaining = usage.remaining, "resume {action} complete");

    Ok(Json(ImproveResponse {
        resume,
        usage,
        generated_at: Utc::now(),
    }))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(err.body_text())
    }
}
