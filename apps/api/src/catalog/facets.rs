use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::filter::SalaryBucket;
use crate::models::job::JobPosting;

pub const EXPERIENCE_LEVELS: &[&str] = &[
    "Entry-level",
    "Junior",
    "Mid-level",
    "Senior",
    "Lead",
    "Manager",
    "Director",
    "Leadership/CXO",
];

pub const EMPLOYMENT_TYPES: &[&str] = &["Full-Time", "Part-Time", "Contract", "Freelance"];

pub const WORK_MODES: &[&str] = &["On-site", "Remote", "Hybrid"];

/// Option lists for the job board's filter menus.
///
/// Always derived from the unfiltered catalog so the menus do not shrink as
/// the result set narrows.
#[derive(Debug, Clone, Serialize)]
pub struct Facets {
    pub skills: Vec<String>,
    pub titles: Vec<String>,
    pub locations: Vec<String>,
    pub industries: Vec<String>,
    pub experience_levels: Vec<&'static str>,
    pub employment_types: Vec<&'static str>,
    pub work_modes: Vec<&'static str>,
    pub salary_ranges: Vec<&'static str>,
}

impl Facets {
    pub fn from_catalog(postings: &[JobPosting]) -> Self {
        Facets {
            skills: unique(postings.iter().flat_map(|p| p.required_skills.iter())),
            titles: unique(postings.iter().map(|p| &p.title)),
            locations: unique(postings.iter().map(|p| &p.job_location)),
            industries: unique(postings.iter().map(|p| &p.client_industry)),
            experience_levels: EXPERIENCE_LEVELS.to_vec(),
            employment_types: EMPLOYMENT_TYPES.to_vec(),
            work_modes: WORK_MODES.to_vec(),
            salary_ranges: SalaryBucket::ALL.iter().map(|b| b.label()).collect(),
        }
    }
}

/// Case-insensitive dedup; the first spelling seen wins. Sorted for stable menus.
fn unique<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        seen.entry(trimmed.to_lowercase())
            .or_insert_with(|| trimmed.to_string());
    }
    seen.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(title: &str, skills: &[&str], location: &str, industry: &str) -> JobPosting {
        JobPosting {
            title: title.to_string(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            experience_level: String::new(),
            employment_type: String::new(),
            work_mode: String::new(),
            job_location: location.to_string(),
            years_of_experience: None,
            salary_range: None,
            client_industry: industry.to_string(),
            number_of_openings: 1,
            questions: vec![],
        }
    }

    #[test]
    fn test_facets_deduplicate_case_insensitively() {
        let jobs = vec![
            posting("Data Engineer", &["Python", "SQL"], "Mumbai", "Retail"),
            posting("data engineer", &["python", "Spark"], "Remote", ""),
        ];
        let facets = Facets::from_catalog(&jobs);
        assert_eq!(facets.skills, vec!["Python", "Spark", "SQL"]);
        assert_eq!(facets.titles, vec!["Data Engineer"]);
        assert_eq!(facets.locations, vec!["Mumbai", "Remote"]);
        assert_eq!(facets.industries, vec!["Retail"]);
    }

    #[test]
    fn test_fixed_option_lists_present() {
        let facets = Facets::from_catalog(&[]);
        assert!(facets.skills.is_empty());
        assert_eq!(facets.salary_ranges.first(), Some(&"All Ranges"));
        assert_eq!(facets.work_modes.len(), 3);
        assert!(facets.employment_types.contains(&"Freelance"));
    }
}
