//! Output-shape adapter for the profile auto-fill form. The parser has one
//! output; differences in field naming are handled here at the boundary.

use serde::{Deserialize, Serialize};

use crate::parser::models::{EducationEntry, Profile, StructuredResume, WorkExperienceEntry};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutofillExperience {
    pub position: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    /// Description bullets recovered from the `|`-joined description.
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutofillEducation {
    pub degree: String,
    pub school: String,
    pub location: String,
    pub graduation_date: String,
    pub current: bool,
}

/// Editable form state seeded from a parsed resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutofillForm {
    pub profile: Profile,
    /// Skills split back into individual chips.
    pub skills: Vec<String>,
    pub experience: Vec<AutofillExperience>,
    pub education: Vec<AutofillEducation>,
}

impl From<&WorkExperienceEntry> for AutofillExperience {
    fn from(entry: &WorkExperienceEntry) -> Self {
        Self {
            position: entry.position.clone(),
            company: entry.company.clone(),
            location: entry.location.clone(),
            start_date: entry.start_date.clone(),
            end_date: entry.end_date.clone(),
            current: entry.current,
            bullets: entry.bullets(),
        }
    }
}

impl From<&EducationEntry> for AutofillEducation {
    fn from(entry: &EducationEntry) -> Self {
        Self {
            degree: entry.degree.clone(),
            school: entry.institution.clone(),
            location: entry.location.clone(),
            graduation_date: entry.graduation_date.clone(),
            current: entry.current,
        }
    }
}

impl From<&StructuredResume> for AutofillForm {
    fn from(resume: &StructuredResume) -> Self {
        Self {
            profile: resume.profile.clone(),
            skills: resume
                .profile
                .skills
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            experience: resume.work_experience.iter().map(Into::into).collect(),
            education: resume.education.iter().map(Into::into).collect(),
        }
    }
}
