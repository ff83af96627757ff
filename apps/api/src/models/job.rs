//! Job postings as served by the external catalog, and their normalized form.
//!
//! The catalog is loosely typed: years of experience arrive either as a
//! `[min, max]` pair or a bare number, salary either as a pair or an object.
//! Everything is normalized here so the filter only ever sees
//! `Option<YearsRange>` / `Option<SalaryRange>`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Currency assumed when the catalog gives a bare `[min, max]` salary pair.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Inclusive years-of-experience requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearsRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
    pub currency: String,
}

/// A normalized posting. Identity is the posting's index in one fetched catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub required_skills: Vec<String>,
    pub experience_level: String,
    pub employment_type: String,
    pub work_mode: String,
    pub job_location: String,
    /// `None` when the catalog supplied something that is neither a number nor a pair.
    pub years_of_experience: Option<YearsRange>,
    pub salary_range: Option<SalaryRange>,
    pub client_industry: String,
    pub number_of_openings: u32,
    pub questions: Vec<String>,
}

/// Posting exactly as the catalog API serializes it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawJobPosting {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string_list")]
    pub required_skills: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub experience_level: String,
    #[serde(deserialize_with = "lenient_string")]
    pub employment_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub work_mode: String,
    #[serde(deserialize_with = "lenient_string")]
    pub job_location: String,
    pub years_of_experience_required: Value,
    pub salary_range: Value,
    #[serde(deserialize_with = "lenient_string")]
    pub client_industry: String,
    pub number_of_openings: Value,
    #[serde(deserialize_with = "lenient_string_list")]
    pub questions: Vec<String>,
}

/// Envelope returned by `GET {JOBS_API_URL}`. Entries stay untyped until
/// normalization so one bad entry cannot fail the whole catalog.
#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub job_listings: Vec<Value>,
}

/// Strings pass through, numbers are stringified, anything else is empty.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Arrays keep their string items, a bare string becomes a one-item list,
/// anything else is empty.
fn lenient_string_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) => vec![s],
        _ => Vec::new(),
    })
}

impl RawJobPosting {
    /// Normalizes the posting. Returns `None` for postings with no open positions,
    /// which must never reach the filter.
    pub fn normalize(self) -> Option<JobPosting> {
        let number_of_openings = parse_openings(&self.number_of_openings);
        if number_of_openings == 0 {
            return None;
        }

        Some(JobPosting {
            title: self.title.trim().to_string(),
            required_skills: self
                .required_skills
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            experience_level: self.experience_level.trim().to_string(),
            employment_type: self.employment_type.trim().to_string(),
            work_mode: self.work_mode.trim().to_string(),
            job_location: self.job_location.trim().to_string(),
            years_of_experience: parse_years(&self.years_of_experience_required),
            salary_range: parse_salary(&self.salary_range),
            client_industry: self.client_industry.trim().to_string(),
            number_of_openings,
            questions: self
                .questions
                .into_iter()
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty())
                .collect(),
        })
    }
}

/// Normalizes a whole fetched catalog, preserving the order of surviving postings.
/// Entries that are not JSON objects are skipped.
pub fn normalize_catalog(raw: Vec<Value>) -> Vec<JobPosting> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value::<RawJobPosting>(entry) {
            Ok(posting) => posting.normalize(),
            Err(e) => {
                warn!(entry = i, "Skipping malformed catalog entry: {e}");
                None
            }
        })
        .collect()
}

fn parse_openings(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .map(|n| n.min(u32::MAX as u64) as u32)
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    }
}

fn as_non_negative_int(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    }
}

/// A scalar `n` is read as an exact requirement (`min == max == n`).
fn parse_years(value: &Value) -> Option<YearsRange> {
    match value {
        Value::Array(items) if items.len() == 2 => {
            let min = as_non_negative_int(&items[0])?;
            let max = as_non_negative_int(&items[1])?;
            Some(YearsRange { min, max })
        }
        Value::Number(_) => as_non_negative_int(value).map(|n| YearsRange { min: n, max: n }),
        _ => None,
    }
}

fn as_non_negative_amount(value: &Value) -> Option<f64> {
    value.as_f64().filter(|f| f.is_finite() && *f >= 0.0)
}

fn parse_salary(value: &Value) -> Option<SalaryRange> {
    match value {
        Value::Array(items) if items.len() == 2 => Some(SalaryRange {
            min: as_non_negative_amount(&items[0])?,
            max: as_non_negative_amount(&items[1])?,
            currency: DEFAULT_CURRENCY.to_string(),
        }),
        Value::Object(map) => Some(SalaryRange {
            min: as_non_negative_amount(map.get("min")?)?,
            max: as_non_negative_amount(map.get("max")?)?,
            currency: map
                .get("currency")
                .and_then(|c| c.as_str())
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .unwrap_or(DEFAULT_CURRENCY)
                .to_string(),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawJobPosting {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_camel_case_wire_format_deserializes() {
        let posting = raw(json!({
            "title": " Backend Engineer ",
            "requiredSkills": ["Rust", " ", "PostgreSQL"],
            "experienceLevel": "Mid-level",
            "employmentType": "Full-Time",
            "workMode": "Remote",
            "jobLocation": "Bengaluru",
            "yearsOfExperienceRequired": [2, 5],
            "salaryRange": {"min": 40000, "max": 60000, "currency": "USD"},
            "clientIndustry": "Fintech",
            "numberOfOpenings": 3,
            "questions": ["Notice period?"]
        }))
        .normalize()
        .unwrap();

        assert_eq!(posting.title, "Backend Engineer");
        assert_eq!(posting.required_skills, vec!["Rust", "PostgreSQL"]);
        assert_eq!(posting.years_of_experience, Some(YearsRange { min: 2, max: 5 }));
        let salary = posting.salary_range.unwrap();
        assert_eq!(salary.currency, "USD");
        assert!((salary.max - 60000.0).abs() < f64::EPSILON);
        assert_eq!(posting.number_of_openings, 3);
        assert_eq!(posting.questions.len(), 1);
    }

    #[test]
    fn test_scalar_years_is_exact_requirement() {
        assert_eq!(parse_years(&json!(4)), Some(YearsRange { min: 4, max: 4 }));
    }

    #[test]
    fn test_malformed_years_become_none() {
        assert_eq!(parse_years(&json!("3-5")), None);
        assert_eq!(parse_years(&json!([1, 2, 3])), None);
        assert_eq!(parse_years(&json!([-1, 2])), None);
        assert_eq!(parse_years(&json!(null)), None);
    }

    #[test]
    fn test_salary_pair_defaults_currency() {
        let salary = parse_salary(&json!([10000, 20000])).unwrap();
        assert_eq!(salary.currency, DEFAULT_CURRENCY);
    }

    #[test]
    fn test_salary_object_missing_bound_is_none() {
        assert!(parse_salary(&json!({"min": 100})).is_none());
    }

    #[test]
    fn test_zero_openings_dropped() {
        let postings = normalize_catalog(vec![
            json!({"title": "A", "numberOfOpenings": 0}),
            json!({"title": "B", "numberOfOpenings": 2}),
            json!({"title": "C"}),
            json!({"title": "D", "numberOfOpenings": "1"}),
        ]);
        let titles: Vec<_> = postings.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "D"]);
    }

    #[test]
    fn test_malformed_entries_do_not_fail_the_catalog() {
        let postings = normalize_catalog(vec![
            json!("not an object"),
            json!({"title": null, "requiredSkills": "Go", "questions": 7, "numberOfOpenings": 1}),
            json!({"title": "Ok", "numberOfOpenings": 1}),
        ]);
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].title, "");
        assert_eq!(postings[0].required_skills, vec!["Go"]);
        assert!(postings[0].questions.is_empty());
        assert_eq!(postings[1].title, "Ok");
    }

    #[test]
    fn test_negative_openings_dropped() {
        assert!(raw(json!({"title": "A", "numberOfOpenings": -2}))
            .normalize()
            .is_none());
    }
}
