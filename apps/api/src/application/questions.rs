#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::models::job::JobPosting;

pub const NAME_QUESTION: &str = "What is your Name?";
pub const EMAIL_QUESTION: &str = "What is Your Email?";

/// Number of fixed questions that precede a job's screening questions.
pub const FIXED_QUESTION_COUNT: usize = 2;

/// The full question list shown to an applicant: the two fixed questions
/// followed by the job's screening questions, in that order.
pub fn build_questions(job: &JobPosting) -> Vec<String> {
    let mut questions = Vec::with_capacity(FIXED_QUESTION_COUNT + job.questions.len());
    questions.push(NAME_QUESTION.to_string());
    questions.push(EMAIL_QUESTION.to_string());
    questions.extend(job.questions.iter().cloned());
    questions
}

/// An applicant's answers, keyed by what they answer rather than by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationAnswers {
    pub name: String,
    pub email: String,
    /// Aligned with `JobPosting::questions`.
    #[serde(default)]
    pub screening_answers: Vec<String>,
}

impl ApplicationAnswers {
    /// Converts a positional answer list (`[name, email, ...screening]`) as
    /// produced by forms that render [`build_questions`] in order.
    pub fn from_positional(answers: &[String]) -> Self {
        let mut iter = answers.iter().cloned();
        ApplicationAnswers {
            name: iter.next().unwrap_or_default(),
            email: iter.next().unwrap_or_default(),
            screening_answers: iter.collect(),
        }
    }

    /// How many of the question slots this record fills.
    pub fn answered_count(&self) -> usize {
        FIXED_QUESTION_COUNT + self.screening_answers.len()
    }

    /// Answers in question order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [self.name.as_str(), self.email.as_str()]
            .into_iter()
            .chain(self.screening_answers.iter().map(String::as_str))
    }

    pub fn clear(&mut self) {
        *self = ApplicationAnswers::default();
    }
}
