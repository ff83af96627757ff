#![allow(dead_code)]

//! Job Catalog Filter — pure, order-preserving selection of postings.
//!
//! A posting is kept iff every active predicate passes. An inactive predicate
//! (empty string, empty skill set, `0` year bound, `All Ranges`) never excludes.
//! Postings with malformed years or salary are excluded only by the predicate
//! that needs the missing field.

use serde::{Deserialize, Serialize};

use crate::models::job::JobPosting;

// ────────────────────────────────────────────────────────────────────────────
// Salary buckets
// ────────────────────────────────────────────────────────────────────────────

/// Named salary buckets offered by the job board. Not a free numeric range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalaryBucket {
    #[default]
    AllRanges,
    UpTo30k,
    From30kTo50k,
    From50kTo80k,
    Above80k,
}

impl SalaryBucket {
    pub const ALL: [SalaryBucket; 5] = [
        SalaryBucket::AllRanges,
        SalaryBucket::UpTo30k,
        SalaryBucket::From30kTo50k,
        SalaryBucket::From50kTo80k,
        SalaryBucket::Above80k,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SalaryBucket::AllRanges => "All Ranges",
            SalaryBucket::UpTo30k => "0-30,000",
            SalaryBucket::From30kTo50k => "30,000-50,000",
            SalaryBucket::From50kTo80k => "50,000-80,000",
            SalaryBucket::Above80k => "80,000+",
        }
    }

    /// Inclusive bounds, or `None` when the bucket does not constrain.
    pub fn bounds(self) -> Option<(f64, f64)> {
        match self {
            SalaryBucket::AllRanges => None,
            SalaryBucket::UpTo30k => Some((0.0, 30_000.0)),
            SalaryBucket::From30kTo50k => Some((30_000.0, 50_000.0)),
            SalaryBucket::From50kTo80k => Some((50_000.0, 80_000.0)),
            SalaryBucket::Above80k => Some((80_000.0, f64::INFINITY)),
        }
    }

    /// Parses a UI label. Accepts en-dashes and ignores surrounding whitespace;
    /// a blank label means `All Ranges`.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .chars()
            .map(|c| if c == '–' || c == '—' { '-' } else { c })
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        if normalized.is_empty() {
            return Some(SalaryBucket::AllRanges);
        }

        Self::ALL.into_iter().find(|bucket| {
            bucket
                .label()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_lowercase()
                == normalized
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Filter specification
// ────────────────────────────────────────────────────────────────────────────

/// The active search constraints. `FilterSpec::default()` constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// AND-combined: every selected skill must appear in the posting.
    pub skills: Vec<String>,
    pub position: Option<String>,
    pub experience_level: Option<String>,
    pub employment_type: Option<String>,
    pub work_mode: Option<String>,
    pub job_location: Option<String>,
    pub industry: Option<String>,
    /// `0` on either side means unbounded on that side. A user who genuinely
    /// picks "0 years" is indistinguishable from no filter.
    pub years_min: u32,
    pub years_max: u32,
    pub salary_bucket: SalaryBucket,
}

impl FilterSpec {
    /// Restores the all-empty defaults.
    pub fn reset(&mut self) {
        *self = FilterSpec::default();
    }

    pub fn years_active(&self) -> bool {
        self.years_min != 0 || self.years_max != 0
    }

    /// Whether any predicate is active.
    pub fn is_active(&self) -> bool {
        self.skills.iter().any(|s| !s.trim().is_empty())
            || [
                &self.position,
                &self.experience_level,
                &self.employment_type,
                &self.work_mode,
                &self.job_location,
                &self.industry,
            ]
            .into_iter()
            .any(|f| active(f).is_some())
            || self.years_active()
            || self.salary_bucket != SalaryBucket::AllRanges
    }
}

/// Returns the trimmed, lowercased constraint when it is non-blank.
fn active(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn eq_ignore_case(candidate: &str, wanted: &str) -> bool {
    candidate.trim().to_lowercase() == wanted
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

// ────────────────────────────────────────────────────────────────────────────
// Predicates
// ────────────────────────────────────────────────────────────────────────────

fn salary_matches(posting: &JobPosting, bucket: SalaryBucket) -> bool {
    let Some((low, high)) = bucket.bounds() else {
        return true;
    };
    // Full containment: the whole posted range must sit inside the bucket.
    posting
        .salary_range
        .as_ref()
        .map(|range| range.min >= low && range.max <= high && range.min <= range.max)
        .unwrap_or(false)
}

fn skills_match(posting: &JobPosting, skills: &[String]) -> bool {
    let posting_skills: Vec<String> = posting
        .required_skills
        .iter()
        .map(|s| s.to_lowercase())
        .collect();

    skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .all(|wanted| posting_skills.iter().any(|s| s.contains(&wanted)))
}

fn years_match(posting: &JobPosting, min: u32, max: u32) -> bool {
    if min == 0 && max == 0 {
        return true;
    }
    let Some(years) = posting.years_of_experience else {
        return false;
    };
    (min == 0 || years.min >= min) && (max == 0 || years.max <= max)
}

/// Evaluates every active predicate of `spec` against one posting.
pub fn matches(posting: &JobPosting, spec: &FilterSpec) -> bool {
    if !salary_matches(posting, spec.salary_bucket) {
        return false;
    }
    if !skills_match(posting, &spec.skills) {
        return false;
    }
    if let Some(position) = active(&spec.position) {
        if !contains_ignore_case(&posting.title, &position) {
            return false;
        }
    }
    if let Some(level) = active(&spec.experience_level) {
        if !eq_ignore_case(&posting.experience_level, &level) {
            return false;
        }
    }
    if let Some(kind) = active(&spec.employment_type) {
        if !eq_ignore_case(&posting.employment_type, &kind) {
            return false;
        }
    }
    if let Some(mode) = active(&spec.work_mode) {
        if !eq_ignore_case(&posting.work_mode, &mode) {
            return false;
        }
    }
    if let Some(location) = active(&spec.job_location) {
        if !contains_ignore_case(&posting.job_location, &location) {
            return false;
        }
    }
    if !years_match(posting, spec.years_min, spec.years_max) {
        return false;
    }
    if let Some(industry) = active(&spec.industry) {
        if !eq_ignore_case(&posting.client_industry, &industry) {
            return false;
        }
    }
    true
}

/// Returns the postings that satisfy `spec`, in catalog order.
pub fn filter_jobs<'a>(postings: &'a [JobPosting], spec: &FilterSpec) -> Vec<&'a JobPosting> {
    postings.iter().filter(|p| matches(p, spec)).collect()
}

/// Like [`filter_jobs`] but keeps each posting's catalog index, which is the
/// only identity a posting has within one fetch.
pub fn filter_indexed<'a>(
    postings: &'a [JobPosting],
    spec: &FilterSpec,
) -> Vec<(usize, &'a JobPosting)> {
    postings
        .iter()
        .enumerate()
        .filter(|(_, p)| matches(p, spec))
        .collect()
}
