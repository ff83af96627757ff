//! Renders the notification documents sent through the mail relay.

use chrono::{DateTime, Utc};

use crate::application::questions::ApplicationAnswers;
use crate::application::templates::{
    APPLICATION_DOCUMENT_TEMPLATE, APPLICATION_SUBJECT_TEMPLATE, MISSING_ANSWER_PLACEHOLDER,
    ROW_TEMPLATE,
};
use crate::models::job::JobPosting;

/// Subject and HTML body of one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDocument {
    pub subject: String,
    pub html: String,
}

/// Escapes text for HTML element content and attribute values. Braces are
/// escaped too so user text can never form a template placeholder.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a label/value table row. Both are escaped here.
pub fn render_row(label: &str, value: &str) -> String {
    ROW_TEMPLATE
        .replace("{label}", &escape_html(label))
        .replace("{value}", &escape_html(value))
}

fn or_unspecified(value: &str) -> &str {
    if value.trim().is_empty() {
        "Not specified"
    } else {
        value
    }
}

fn job_rows(job: &JobPosting) -> String {
    let years = job
        .years_of_experience
        .map(|y| {
            if y.min == y.max {
                format!("{} years", y.min)
            } else {
                format!("{}-{} years", y.min, y.max)
            }
        })
        .unwrap_or_else(|| "Not specified".to_string());
    let salary = job
        .salary_range
        .as_ref()
        .map(|s| format!("{} {:.0} - {:.0}", s.currency, s.min, s.max))
        .unwrap_or_else(|| "Not specified".to_string());

    [
        ("Title", job.title.as_str()),
        ("Location", or_unspecified(&job.job_location)),
        ("Employment type", or_unspecified(&job.employment_type)),
        ("Work mode", or_unspecified(&job.work_mode)),
        ("Experience level", or_unspecified(&job.experience_level)),
        ("Experience required", years.as_str()),
        ("Salary", salary.as_str()),
        ("Industry", or_unspecified(&job.client_industry)),
    ]
    .iter()
    .map(|(label, value)| render_row(label, value))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Zips questions with answers positionally. A missing or blank answer is
/// rendered as a placeholder rather than dropped.
fn qa_rows(questions: &[String], answers: &ApplicationAnswers) -> String {
    let answers: Vec<&str> = answers.iter().collect();
    questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let answer = answers
                .get(i)
                .map(|a| a.trim())
                .filter(|a| !a.is_empty())
                .unwrap_or(MISSING_ANSWER_PLACEHOLDER);
            render_row(question, answer)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the application notification sent to recruiters and the applicant.
pub fn render_application(
    job: &JobPosting,
    questions: &[String],
    answers: &ApplicationAnswers,
    attachment_name: &str,
    submitted_at: DateTime<Utc>,
) -> NotificationDocument {
    let applicant = if answers.name.trim().is_empty() {
        "an applicant"
    } else {
        answers.name.trim()
    };

    // Subjects are plain text; strip line breaks so they cannot inject headers.
    let subject = APPLICATION_SUBJECT_TEMPLATE
        .replace("{job_title}", &job.title)
        .replace("{applicant}", applicant)
        .replace(['\r', '\n'], " ");

    let html = APPLICATION_DOCUMENT_TEMPLATE
        .replace("{job_rows}", &job_rows(job))
        .replace("{qa_rows}", &qa_rows(questions, answers))
        .replace("{submitted_at}", &submitted_at.format("%Y-%m-%d %H:%M UTC").to_string())
        .replace("{attachment_name}", &escape_html(attachment_name))
        .replace("{job_title}", &escape_html(&job.title));

    NotificationDocument { subject, html }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::questions::build_questions;
    use crate::models::job::{SalaryRange, YearsRange};
    use chrono::TimeZone;

    fn job() -> JobPosting {
        JobPosting {
            title: "Site Reliability Engineer".to_string(),
            required_skills: vec!["Linux".to_string()],
            experience_level: "Senior".to_string(),
            employment_type: "Full-Time".to_string(),
            work_mode: "Hybrid".to_string(),
            job_location: "Hyderabad".to_string(),
            years_of_experience: Some(YearsRange { min: 5, max: 8 }),
            salary_range: Some(SalaryRange {
                min: 50_000.0,
                max: 70_000.0,
                currency: "USD".to_string(),
            }),
            client_industry: String::new(),
            number_of_openings: 2,
            questions: vec!["On-call experience?".to_string()],
        }
    }

    fn submitted_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>"a" & 'b' {x}</script>"#),
            "&lt;script&gt;&quot;a&quot; &amp; &#39;b&#39; &#123;x&#125;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_document_contains_job_metadata_and_answers() {
        let job = job();
        let questions = build_questions(&job);
        let answers = ApplicationAnswers {
            name: "Meera".to_string(),
            email: "meera@example.com".to_string(),
            screening_answers: vec!["Three years of PagerDuty rotations".to_string()],
        };
        let doc = render_application(&job, &questions, &answers, "meera.pdf", submitted_at());

        assert_eq!(
            doc.subject,
            "New application: Site Reliability Engineer from Meera"
        );
        assert!(doc.html.contains("New application for Site Reliability Engineer"));
        assert!(doc.html.contains("5-8 years"));
        assert!(doc.html.contains("USD 50000 - 70000"));
        assert!(doc.html.contains("On-call experience?"));
        assert!(doc.html.contains("Three years of PagerDuty rotations"));
        assert!(doc.html.contains("meera.pdf"));
        assert!(doc.html.contains("2024-03-01 09:30 UTC"));
        assert!(doc.html.contains("Not specified"));
    }

    #[test]
    fn test_missing_answers_get_placeholder() {
        let job = job();
        let questions = build_questions(&job);
        let answers = ApplicationAnswers {
            name: "Meera".to_string(),
            email: "meera@example.com".to_string(),
            screening_answers: vec![],
        };
        let doc = render_application(&job, &questions, &answers, "cv.pdf", submitted_at());
        assert!(doc.html.contains(MISSING_ANSWER_PLACEHOLDER));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let job = job();
        let questions = build_questions(&job);
        let answers = ApplicationAnswers {
            name: "<b>Eve</b>".to_string(),
            email: "eve@example.com".to_string(),
            screening_answers: vec!["{qa_rows}".to_string()],
        };
        let doc = render_application(&job, &questions, &answers, "cv.pdf", submitted_at());
        assert!(!doc.html.contains("<b>Eve</b>"));
        assert!(doc.html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(doc.html.contains("&#123;qa_rows&#125;"));
    }

    #[test]
    fn test_subject_strips_newlines() {
        let job = job();
        let answers = ApplicationAnswers {
            name: "Mallory\r\nBcc: x@example.com".to_string(),
            ..Default::default()
        };
        let doc = render_application(&job, &[], &answers, "cv.pdf", submitted_at());
        assert!(!doc.subject.contains('\n'));
        assert!(!doc.subject.contains('\r'));
    }
}
