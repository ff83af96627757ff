use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::notification::{escape_html, render_row, NotificationDocument};
use crate::application::pipeline::MailRouting;
use crate::application::relay::EmailPayload;
use crate::application::templates::{CONTACT_DOCUMENT_TEMPLATE, CONTACT_SUBJECT_TEMPLATE};

/// Longest message accepted from the contact form.
pub const MAX_MESSAGE_CHARS: usize = 5000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEnquiry {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    /// Service the visitor is asking about.
    #[serde(default)]
    pub service: Option<String>,
    pub message: String,
}

/// Returns every problem with the enquiry; empty means valid.
pub fn validate_enquiry(enquiry: &ContactEnquiry) -> Vec<String> {
    let mut problems = Vec::new();

    if enquiry.name.trim().is_empty() {
        problems.push("name is required".to_string());
    }
    let email = enquiry.email.trim();
    if email.is_empty() {
        problems.push("email is required".to_string());
    } else if !looks_like_email(email) {
        problems.push(format!("'{email}' is not a valid email address"));
    }
    if enquiry.message.trim().is_empty() {
        problems.push("message is required".to_string());
    } else if enquiry.message.chars().count() > MAX_MESSAGE_CHARS {
        problems.push(format!("message must be at most {MAX_MESSAGE_CHARS} characters"));
    }

    problems
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

pub fn render_enquiry(enquiry: &ContactEnquiry, submitted_at: DateTime<Utc>) -> NotificationDocument {
    let optional = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or("Not provided")
            .to_string()
    };

    let rows = [
        ("Name", enquiry.name.trim().to_string()),
        ("Email", enquiry.email.trim().to_string()),
        ("Phone", optional(&enquiry.phone)),
        ("Company", optional(&enquiry.company)),
        ("Service", optional(&enquiry.service)),
    ]
    .iter()
    .map(|(label, value)| render_row(label, value))
    .collect::<Vec<_>>()
    .join("\n");

    let subject = CONTACT_SUBJECT_TEMPLATE
        .replace("{name}", enquiry.name.trim())
        .replace(['\r', '\n'], " ");

    let html = CONTACT_DOCUMENT_TEMPLATE
        .replace("{rows}", &rows)
        .replace("{submitted_at}", &submitted_at.format("%Y-%m-%d %H:%M UTC").to_string())
        .replace("{message}", &escape_html(enquiry.message.trim()));

    NotificationDocument { subject, html }
}

/// Builds the relay payload: recruiters receive it, replies go to the visitor.
pub fn build_enquiry_payload(
    enquiry: &ContactEnquiry,
    routing: &MailRouting,
    submitted_at: DateTime<Utc>,
) -> EmailPayload {
    let document = render_enquiry(enquiry, submitted_at);
    EmailPayload {
        from: routing.from.clone(),
        to: routing.recruiters.clone(),
        reply_to: Some(enquiry.email.trim().to_string()),
        subject: document.subject,
        html: document.html,
        attachments: vec![],
    }
}
