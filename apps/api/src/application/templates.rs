// HTML templates for relay notifications.
// Placeholders are `{name}` tokens; values must be HTML-escaped before substitution.

/// Subject line for a job application. Replace `{job_title}` and `{applicant}`.
pub const APPLICATION_SUBJECT_TEMPLATE: &str = "New application: {job_title} from {applicant}";

/// Shown in place of an answer that is somehow still missing at render time.
pub const MISSING_ANSWER_PLACEHOLDER: &str = "Not answered";

/// Full application document. Replace `{job_title}`, `{job_rows}`, `{qa_rows}`,
/// `{attachment_name}` and `{submitted_at}`.
pub const APPLICATION_DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; color: #1f2933;">
  <h2 style="margin-bottom: 4px;">New application for {job_title}</h2>
  <p style="margin-top: 0; color: #616e7c;">Submitted {submitted_at}</p>
  <h3>Position</h3>
  <table cellpadding="6" style="border-collapse: collapse;">
{job_rows}
  </table>
  <h3>Responses</h3>
  <table cellpadding="6" style="border-collapse: collapse;">
{qa_rows}
  </table>
  <p>Resume attached: <strong>{attachment_name}</strong></p>
</body>
</html>"#;

/// One labelled row. Replace `{label}` and `{value}`.
pub const ROW_TEMPLATE: &str = r#"    <tr><td style="font-weight: bold; vertical-align: top; border-bottom: 1px solid #e4e7eb;">{label}</td><td style="border-bottom: 1px solid #e4e7eb;">{value}</td></tr>"#;

/// Subject line for a contact enquiry. Replace `{name}`.
pub const CONTACT_SUBJECT_TEMPLATE: &str = "New enquiry from {name}";

/// Contact enquiry document. Replace `{rows}`, `{message}` and `{submitted_at}`.
pub const CONTACT_DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; color: #1f2933;">
  <h2 style="margin-bottom: 4px;">New website enquiry</h2>
  <p style="margin-top: 0; color: #616e7c;">Submitted {submitted_at}</p>
  <table cellpadding="6" style="border-collapse: collapse;">
{rows}
  </table>
  <h3>Message</h3>
  <p style="white-space: pre-wrap;">{message}</p>
</body>
</html>"#;
