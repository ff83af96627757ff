use crate::application::attachment::Attachment;
use crate::application::error::ValidationError;
use crate::application::questions::ApplicationAnswers;

/// Validates a submission before anything is read or sent.
///
/// Checks, in order, stopping at the first failure:
/// 1. an attachment is present
/// 2. the attachment is within `max_attachment_bytes` (when its size is known)
/// 3. the answer count equals the question count
/// 4. no answer is blank after trimming
///
/// Returns the attachment that passed, so callers need not re-check presence.
pub fn validate_submission<'a>(
    questions: &[String],
    answers: &ApplicationAnswers,
    attachment: Option<&'a Attachment>,
    max_attachment_bytes: usize,
) -> Result<&'a Attachment, ValidationError> {
    let attachment = attachment.ok_or(ValidationError::MissingAttachment)?;

    if let Some(size) = attachment.known_size() {
        if size > max_attachment_bytes {
            return Err(ValidationError::AttachmentTooLarge {
                size,
                limit: max_attachment_bytes,
            });
        }
    }

    let expected = questions.len();
    let answered_total = answers.answered_count();
    let answered_non_blank = answers.iter().filter(|a| !a.trim().is_empty()).count();

    if answered_total != expected || answered_non_blank != expected {
        return Err(ValidationError::IncompleteAnswers {
            expected,
            answered: answered_non_blank.min(expected),
        });
    }

    Ok(attachment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn questions(n_screening: usize) -> Vec<String> {
        let mut q = vec!["name".to_string(), "email".to_string()];
        q.extend((0..n_screening).map(|i| format!("screening {i}")));
        q
    }

    fn resume(size: usize) -> Attachment {
        Attachment::from_bytes("resume.pdf", None, Bytes::from(vec![0u8; size]))
    }

    fn complete_answers(n_screening: usize) -> ApplicationAnswers {
        ApplicationAnswers {
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            screening_answers: (0..n_screening).map(|i| format!("answer {i}")).collect(),
        }
    }

    #[test]
    fn test_pass_complete_submission() {
        let a = resume(10);
        assert!(validate_submission(&questions(2), &complete_answers(2), Some(&a), 100).is_ok());
    }

    #[test]
    fn test_pass_returns_the_validated_attachment() {
        let a = resume(10);
        let validated =
            validate_submission(&questions(0), &complete_answers(0), Some(&a), 100).unwrap();
        assert!(std::ptr::eq(validated, &a));
        assert_eq!(validated.filename, "resume.pdf");
    }

    #[test]
    fn test_fail_missing_attachment_even_with_complete_answers() {
        assert_eq!(
            validate_submission(&questions(1), &complete_answers(1), None, 100).unwrap_err(),
            ValidationError::MissingAttachment
        );
    }

    #[test]
    fn test_missing_attachment_reported_before_incomplete_answers() {
        assert_eq!(
            validate_submission(&questions(3), &ApplicationAnswers::default(), None, 100)
                .unwrap_err(),
            ValidationError::MissingAttachment
        );
    }

    #[test]
    fn test_fail_zero_answers() {
        let a = resume(10);
        let err = validate_submission(&questions(3), &ApplicationAnswers::default(), Some(&a), 100)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::IncompleteAnswers {
                expected: 5,
                answered: 0
            }
        );
    }

    #[test]
    fn test_fail_too_few_screening_answers() {
        let a = resume(10);
        let result = validate_submission(&questions(3), &complete_answers(2), Some(&a), 100);
        assert!(matches!(
            result,
            Err(ValidationError::IncompleteAnswers { expected: 5, .. })
        ));
    }

    #[test]
    fn test_fail_too_many_answers() {
        let a = resume(10);
        let result = validate_submission(&questions(1), &complete_answers(2), Some(&a), 100);
        assert!(matches!(result, Err(ValidationError::IncompleteAnswers { .. })));
    }

    #[test]
    fn test_fail_whitespace_only_answer() {
        let a = resume(10);
        let mut answers = complete_answers(1);
        answers.screening_answers[0] = "   \n".to_string();
        let err = validate_submission(&questions(1), &answers, Some(&a), 100).unwrap_err();
        assert_eq!(
            err,
            ValidationError::IncompleteAnswers {
                expected: 3,
                answered: 2
            }
        );
    }

    #[test]
    fn test_fail_blank_email() {
        let a = resume(10);
        let mut answers = complete_answers(0);
        answers.email = String::new();
        assert!(validate_submission(&questions(0), &answers, Some(&a), 100).is_err());
    }

    #[test]
    fn test_fail_attachment_over_limit() {
        let a = resume(101);
        assert_eq!(
            validate_submission(&questions(0), &complete_answers(0), Some(&a), 100).unwrap_err(),
            ValidationError::AttachmentTooLarge {
                size: 101,
                limit: 100
            }
        );
    }

    #[test]
    fn test_attachment_at_limit_passes() {
        let a = resume(100);
        assert!(validate_submission(&questions(0), &complete_answers(0), Some(&a), 100).is_ok());
    }
}
