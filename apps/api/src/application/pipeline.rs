#![allow(dead_code)]

//! Application Submission Pipeline.
//!
//! `ApplicationForm` owns one applicant's in-progress application for one job
//! and drives it through
//! `Editing → Validating → Encoding → Submitting → Succeeded | Failed`.
//! `submit` takes `&mut self`, so a form can never have two submissions in
//! flight at once.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::attachment::Attachment;
use crate::application::encoding::encode_attachment;
use crate::application::error::{ApplicationError, SubmissionError};
use crate::application::notification::render_application;
use crate::application::questions::{build_questions, ApplicationAnswers};
use crate::application::relay::{EmailPayload, MailRelay};
use crate::application::validation::validate_submission;
use crate::models::job::JobPosting;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Editing,
    Validating,
    Encoding,
    Submitting,
    Succeeded,
    Failed(SubmissionError),
}

/// Sender and fixed recipients for notifications. Comes from configuration.
#[derive(Debug, Clone)]
pub struct MailRouting {
    pub from: String,
    pub recruiters: Vec<String>,
}

impl MailRouting {
    /// Recruiters plus `extra`, skipping blanks and case-insensitive duplicates.
    pub fn recipients_with(&self, extra: &str) -> Vec<String> {
        let mut recipients = self.recruiters.clone();
        let extra = extra.trim();
        if !extra.is_empty() && !recipients.iter().any(|r| r.eq_ignore_ascii_case(extra)) {
            recipients.push(extra.to_string());
        }
        recipients
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    /// Log correlation id. Not an idempotency key.
    pub submission_id: Uuid,
    pub relay_message_id: Option<String>,
    pub recipients: Vec<String>,
}

pub struct ApplicationForm {
    job: JobPosting,
    questions: Vec<String>,
    answers: ApplicationAnswers,
    attachment: Option<Attachment>,
    state: SubmissionState,
    max_attachment_bytes: usize,
}

impl ApplicationForm {
    pub fn new(job: JobPosting, max_attachment_bytes: usize) -> Self {
        let questions = build_questions(&job);
        ApplicationForm {
            job,
            questions,
            answers: ApplicationAnswers::default(),
            attachment: None,
            state: SubmissionState::Editing,
            max_attachment_bytes,
        }
    }

    pub fn job(&self) -> &JobPosting {
        &self.job
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self) -> &ApplicationAnswers {
        &self.answers
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn set_answers(&mut self, answers: ApplicationAnswers) {
        self.answers = answers;
        self.state = SubmissionState::Editing;
    }

    pub fn attach(&mut self, attachment: Attachment) {
        self.attachment = Some(attachment);
        self.state = SubmissionState::Editing;
    }

    /// Validates, encodes and sends the application.
    ///
    /// Validation and encoding failures return the form to `Editing` without
    /// touching the network. A relay failure leaves the form in `Failed` with
    /// all input preserved, so the caller can resubmit. On success the answers
    /// and attachment are cleared.
    pub async fn submit(
        &mut self,
        relay: &dyn MailRelay,
        routing: &MailRouting,
    ) -> Result<SubmissionReceipt, ApplicationError> {
        self.state = SubmissionState::Validating;
        let attachment = match validate_submission(
            &self.questions,
            &self.answers,
            self.attachment.as_ref(),
            self.max_attachment_bytes,
        ) {
            Ok(attachment) => attachment,
            Err(e) => {
                self.state = SubmissionState::Editing;
                return Err(e.into());
            }
        };

        self.state = SubmissionState::Encoding;
        let encoded = match encode_attachment(attachment).await {
            Ok(encoded) => encoded,
            Err(e) => {
                self.state = SubmissionState::Editing;
                return Err(e.into());
            }
        };

        let submission_id = Uuid::new_v4();
        let document = render_application(
            &self.job,
            &self.questions,
            &self.answers,
            &encoded.filename,
            Utc::now(),
        );
        let applicant_email = self.answers.email.trim().to_string();
        let recipients = routing.recipients_with(&applicant_email);
        let payload = EmailPayload {
            from: routing.from.clone(),
            to: recipients.clone(),
            reply_to: Some(applicant_email),
            subject: document.subject,
            html: document.html,
            attachments: vec![encoded.into()],
        };

        self.state = SubmissionState::Submitting;
        info!(
            %submission_id,
            job = %self.job.title,
            recipients = recipients.len(),
            "Submitting application"
        );

        match relay.send(&payload).await {
            Ok(receipt) => {
                self.state = SubmissionState::Succeeded;
                self.answers.clear();
                self.attachment = None;
                info!(%submission_id, "Application delivered");
                Ok(SubmissionReceipt {
                    submission_id,
                    relay_message_id: receipt.message_id,
                    recipients,
                })
            }
            Err(e) => {
                warn!(%submission_id, error = %e, "Application delivery failed");
                self.state = SubmissionState::Failed(e.clone());
                Err(e.into())
            }
        }
    }
}
