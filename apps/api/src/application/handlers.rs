//! Axum route handlers for job applications.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::application::attachment::Attachment;
use crate::application::pipeline::{ApplicationForm, SubmissionReceipt};
use crate::application::questions::{build_questions, ApplicationAnswers};
use crate::catalog::handlers::job_at;
use crate::errors::AppError;
use crate::state::AppState;

/// Multipart field carrying the resume file.
pub const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub job_title: String,
    pub questions: Vec<String>,
}

/// GET /api/v1/jobs/:index/questions
///
/// The full, ordered question list for a job's application form.
pub async fn handle_get_questions(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let job = job_at(&state, index).await?;
    Ok(Json(QuestionsResponse {
        questions: build_questions(&job),
        job_title: job.title,
    }))
}

/// Fields collected from the application multipart body.
#[derive(Debug, Default)]
struct ApplicationUpload {
    answers: ApplicationAnswers,
    attachment: Option<Attachment>,
    /// Title the client saw; guards against the catalog shifting between fetches.
    job_title: Option<String>,
}

async fn read_upload(mut multipart: Multipart) -> Result<ApplicationUpload, AppError> {
    let mut upload = ApplicationUpload::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            RESUME_FIELD => {
                if upload.attachment.is_some() {
                    return Err(AppError::Validation(
                        "Only one attachment may be uploaded".to_string(),
                    ));
                }
                let filename = field
                    .file_name()
                    .map(String::from)
                    .unwrap_or_else(|| "resume.pdf".to_string());
                let content_type = field.content_type().map(String::from);
                let data = field.bytes().await?;
                // An empty file input still posts a part; treat it as no attachment.
                if !data.is_empty() {
                    let attachment =
                        Attachment::from_bytes(filename, content_type.as_deref(), data);
                    if !attachment.looks_like_pdf() {
                        tracing::debug!(
                            filename = %attachment.filename,
                            "Attachment is not a PDF; forwarding as-is"
                        );
                    }
                    upload.attachment = Some(attachment);
                }
            }
            "name" => upload.answers.name = field.text().await?,
            "email" => upload.answers.email = field.text().await?,
            "answer" => upload.answers.screening_answers.push(field.text().await?),
            "job_title" => upload.job_title = Some(field.text().await?),
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(upload)
}

/// POST /api/v1/jobs/:index/applications
///
/// Multipart body: `name`, `email`, one `answer` per screening question in
/// order, the `resume` file and optionally the `job_title` the applicant saw.
pub async fn handle_submit_application(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SubmissionReceipt>), AppError> {
    let upload = read_upload(multipart).await?;
    let job = job_at(&state, index).await?;

    if let Some(seen) = upload.job_title.as_deref() {
        if !seen.trim().eq_ignore_ascii_case(job.title.trim()) {
            return Err(AppError::Conflict(format!(
                "Job {index} is now '{}'; the listing changed since the form was opened",
                job.title
            )));
        }
    }

    let mut form = ApplicationForm::new(job, state.config.max_attachment_bytes);
    form.set_answers(upload.answers);
    if let Some(attachment) = upload.attachment {
        form.attach(attachment);
    }

    let job_title = form.job().title.clone();
    let receipt = form.submit(state.relay.as_ref(), &state.routing).await?;

    info!(
        submission_id = %receipt.submission_id,
        job_index = index,
        job = %job_title,
        "Application submitted"
    );

    Ok((StatusCode::CREATED, Json(receipt)))
}
