//! AI resume improvement.
//!
//! The parser output is the fallback context: fields the caller already has
//! in a stored profile win, and parsed values fill the gaps. The merged resume
//! is then handed to a [`ResumeImprover`].

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{render, IMPROVE_PROMPT, JSON_ONLY_SYSTEM, TAILOR_PROMPT};
use crate::llm_client::LlmClient;
use crate::parser::models::{Profile, StructuredResume};

/// Rewrites a resume, optionally toward a job description.
///
/// Implementations:
/// - `LlmResumeImprover`: prompts the Anthropic API for a JSON resume.
#[async_trait]
pub trait ResumeImprover: Send + Sync {
    async fn improve(
        &self,
        resume: &StructuredResume,
        job_description: Option<&str>,
    ) -> Result<StructuredResume, AppError>;
}

pub struct LlmResumeImprover {
    llm: LlmClient,
}

impl LlmResumeImprover {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeImprover for LlmResumeImprover {
    async fn improve(
        &self,
        resume: &StructuredResume,
        job_description: Option<&str>,
    ) -> Result<StructuredResume, AppError> {
        let template = if job_description.is_some() {
            TAILOR_PROMPT
        } else {
            IMPROVE_PROMPT
        };
        let prompt = render(template, &render_resume(resume), job_description);

        let improved: StructuredResume = self
            .llm
            .complete_json(&prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(e.to_string()))?;

        info!(
            model = self.llm.model(),
            tailored = job_description.is_some(),
            work_entries = improved.work_experience.len(),
            "resume improved"
        );
        Ok(improved)
    }
}

/// Stored values win field by field; empty stored values fall back to the
/// parsed ones. Entry lists are taken whole from whichever side has any.
pub fn merge_context(stored: Option<StructuredResume>, parsed: StructuredResume) -> StructuredResume {
    let Some(stored) = stored else {
        return parsed;
    };

    StructuredResume {
        profile: merge_profile(stored.profile, parsed.profile),
        work_experience: prefer_non_empty(stored.work_experience, parsed.work_experience),
        education: prefer_non_empty(stored.education, parsed.education),
        projects: prefer_non_empty(stored.projects, parsed.projects),
    }
}

fn merge_profile(stored: Profile, parsed: Profile) -> Profile {
    Profile {
        full_name: prefer_text(stored.full_name, parsed.full_name),
        email: prefer_text(stored.email, parsed.email),
        phone: prefer_text(stored.phone, parsed.phone),
        location: prefer_text(stored.location, parsed.location),
        linkedin: prefer_text(stored.linkedin, parsed.linkedin),
        professional_summary: prefer_text(stored.professional_summary, parsed.professional_summary),
        skills: prefer_text(stored.skills, parsed.skills),
        volunteering: prefer_text(stored.volunteering, parsed.volunteering),
    }
}

fn prefer_text(stored: String, parsed: String) -> String {
    if stored.trim().is_empty() {
        parsed
    } else {
        stored
    }
}

fn prefer_non_empty<T>(stored: Vec<T>, parsed: Vec<T>) -> Vec<T> {
    if stored.is_empty() {
        parsed
    } else {
        stored
    }
}

/// Plain-text rendering used as prompt context. Empty fields are skipped.
pub fn render_resume(resume: &StructuredResume) -> String {
    let p = &resume.profile;
    let mut out = String::new();

    for (label, value) in [
        ("Name", &p.full_name),
        ("Email", &p.email),
        ("Phone", &p.phone),
        ("Location", &p.location),
        ("LinkedIn", &p.linkedin),
    ] {
        push_field(&mut out, label, value);
    }
    if !p.professional_summary.is_empty() {
        out.push_str(&format!("\nSUMMARY\n{}\n", p.professional_summary));
    }
    if !p.skills.is_empty() {
        out.push_str(&format!("\nSKILLS\n{}\n", p.skills));
    }

    if !resume.work_experience.is_empty() {
        out.push_str("\nEXPERIENCE\n");
        for entry in &resume.work_experience {
            let end = if entry.current { "Present" } else { entry.end_date.as_str() };
            out.push_str(&format!(
                "{} | {} | {} | {} - {}\n",
                entry.position, entry.company, entry.location, entry.start_date, end
            ));
            for bullet in entry.bullets() {
                out.push_str(&format!("- {bullet}\n"));
            }
        }
    }

    if !resume.education.is_empty() {
        out.push_str("\nEDUCATION\n");
        for entry in &resume.education {
            let date = if entry.current { "Present" } else { entry.graduation_date.as_str() };
            out.push_str(&format!(
                "{} | {} | {} | {}\n",
                entry.degree, entry.institution, entry.location, date
            ));
        }
    }

    if !resume.projects.is_empty() {
        out.push_str("\nPROJECTS\n");
        for project in &resume.projects {
            out.push_str(&format!("{}: {}\n", project.name, project.description));
        }
    }

    if !p.volunteering.is_empty() {
        out.push_str(&format!("\nVOLUNTEERING\n{}\n", p.volunteering));
    }
    out
}

fn push_field(out: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        out.push_str(&format!("{label}: {value}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::models::{EducationEntry, WorkExperienceEntry};

    fn parsed() -> StructuredResume {
        StructuredResume {
            profile: Profile {
                full_name: "Jane Smith".into(),
                email: "jane@example.com".into(),
                skills: "Rust, Go".into(),
                ..Profile::default()
            },
            work_experience: vec![WorkExperienceEntry {
                position: "Software Engineer".into(),
                company: "Acme".into(),
                start_date: "Jan 2020".into(),
                current: true,
                description: "Built X | Led Y".into(),
                ..WorkExperienceEntry::default()
            }],
            education: vec![EducationEntry {
                degree: "BSc".into(),
                institution: "MIT".into(),
                graduation_date: "2016".into(),
                ..EducationEntry::default()
            }],
            projects: Vec::new(),
        }
    }

    #[test]
    fn test_no_stored_profile_uses_parsed() {
        assert_eq!(merge_context(None, parsed()), parsed());
    }

    #[test]
    fn test_stored_fields_win_and_gaps_are_filled() {
        let stored = StructuredResume {
            profile: Profile {
                full_name: "Jane A. Smith".into(),
                email: "  ".into(),
                ..Profile::default()
            },
            ..StructuredResume::default()
        };
        let merged = merge_context(Some(stored), parsed());
        assert_eq!(merged.profile.full_name, "Jane A. Smith");
        assert_eq!(merged.profile.email, "jane@example.com");
        assert_eq!(merged.profile.skills, "Rust, Go");
        assert_eq!(merged.work_experience.len(), 1);
        assert_eq!(merged.education[0].institution, "MIT");
    }

    #[test]
    fn test_stored_entries_replace_parsed_entries() {
        let stored = StructuredResume {
            work_experience: vec![WorkExperienceEntry {
                position: "Staff Engineer".into(),
                ..WorkExperienceEntry::default()
            }],
            ..StructuredResume::default()
        };
        let merged = merge_context(Some(stored), parsed());
        assert_eq!(merged.work_experience.len(), 1);
        assert_eq!(merged.work_experience[0].position, "Staff Engineer");
    }

    #[test]
    fn test_render_resume_lists_bullets() {
        let text = render_resume(&parsed());
        assert!(text.contains("Name: Jane Smith\n"));
        assert!(!text.contains("Phone:"));
        assert!(text.contains("Software Engineer | Acme |  | Jan 2020 - Present\n"));
        assert!(text.contains("- Built X\n- Led Y\n"));
        assert!(text.contains("\nEDUCATION\nBSc | MIT |  | 2016\n"));
        assert!(!text.contains("PROJECTS"));
    }

    #[test]
    fn test_render_empty_resume_is_empty() {
        assert_eq!(render_resume(&StructuredResume::default()), "");
    }
}
