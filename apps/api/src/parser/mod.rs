//! Heuristic resume parser. Turns free-form resume text into a
//! [`StructuredResume`] without any learned model.
//!
//! Pipeline: segment lines → contact extraction + section location →
//! field cleaners and entry parsers → assembly. Every stage is pure; a field
//! the heuristics miss is left empty and nothing here returns an error.

pub mod adapter;
pub mod cleaners;
pub mod contact;
pub mod dates;
pub mod education;
pub mod experience;
pub mod lines;
pub mod models;
pub mod sections;

use tracing::debug;

use crate::parser::cleaners::{clean_paragraph, clean_skills};
use crate::parser::contact::extract_contact;
use crate::parser::education::parse_education;
use crate::parser::experience::parse_experience;
use crate::parser::lines::{segment_lines, strip_code_fences};
use crate::parser::sections::{
    locate_section, BlankLineCapsBoundary, CapsHeadingBoundary, SectionBoundary, SectionKind,
};

use crate::parser::models::Profile;

pub use crate::parser::models::StructuredResume;

/// Resume parser with swappable section-boundary strategies.
pub struct ResumeParser {
    /// Ends the summary, skills and volunteering spans.
    text_boundary: Box<dyn SectionBoundary + Send + Sync>,
    /// Ends the experience and education spans fed to the entry parsers.
    entry_boundary: Box<dyn SectionBoundary + Send + Sync>,
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::with_boundaries(BlankLineCapsBoundary, CapsHeadingBoundary)
    }
}

impl ResumeParser {
    pub fn with_boundaries(
        text_boundary: impl SectionBoundary + Send + Sync + 'static,
        entry_boundary: impl SectionBoundary + Send + Sync + 'static,
    ) -> Self {
        Self {
            text_boundary: Box::new(text_boundary),
            entry_boundary: Box::new(entry_boundary),
        }
    }

    pub fn parse(&self, resume_text: Option<&str>) -> StructuredResume {
        let Some(raw) = resume_text.filter(|t| !t.trim().is_empty()) else {
            return StructuredResume::default();
        };

        let text = strip_code_fences(raw);
        let text = text.as_ref();
        let lines = segment_lines(text);
        if lines.is_empty() {
            return StructuredResume::default();
        }

        let contact = extract_contact(text, &lines);
        let text_span = |kind| locate_section(text, kind, self.text_boundary.as_ref());
        let entry_span = |kind| locate_section(text, kind, self.entry_boundary.as_ref());

        let profile = Profile {
            full_name: contact.full_name,
            email: contact.email,
            phone: contact.phone,
            location: contact.location,
            linkedin: contact.linkedin,
            professional_summary: text_span(SectionKind::Summary)
                .map(clean_paragraph)
                .unwrap_or_default(),
            skills: text_span(SectionKind::Skills)
                .map(clean_skills)
                .unwrap_or_default(),
            volunteering: text_span(SectionKind::Volunteering)
                .map(clean_paragraph)
                .unwrap_or_default(),
        };
        let work_experience = entry_span(SectionKind::Experience)
            .map(parse_experience)
            .unwrap_or_default();
        let education = entry_span(SectionKind::Education)
            .map(parse_education)
            .unwrap_or_default();

        debug!(
            lines = lines.len(),
            work_entries = work_experience.len(),
            education_entries = education.len(),
            "parsed resume text"
        );

        StructuredResume {
            profile,
            work_experience,
            education,
            projects: Vec::new(),
        }
    }
}

/// Parses resume text with the default boundary strategies. Total: returns
/// the all-empty shape for `None`, empty or unrecognisable input.
pub fn parse(resume_text: Option<&str>) -> StructuredResume {
    ResumeParser::default().parse(resume_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
Jane Smith
Austin, TX | jane.smith@example.com | (512) 555-0142
linkedin.com/in/janesmith

PROFESSIONAL SUMMARY
Backend engineer with eight years building payment
and data platforms.

SKILLS
• Rust  • Go
• PostgreSQL
- Kubernetes

EXPERIENCE
Senior Software Engineer at Stripe, San Francisco, CA
Jan 2020 - Present
• Built X
• Led Y team of five

Software Developer at Initech, Austin, TX
Jun 2016 - Dec 2019
- Rebuilt the invoicing pipeline in Rust

EDUCATION
Bachelor of Science in Computer Science from MIT
2012 - 2016

VOLUNTEERING
Mentor at Code2040,
  weekend workshops.
"#;

    #[test]
    fn test_full_resume() {
        let resume = parse(Some(SAMPLE));
        let p = &resume.profile;
        assert_eq!(p.full_name, "Jane Smith");
        assert_eq!(p.email, "jane.smith@example.com");
        assert_eq!(p.phone, "(512) 555-0142");
        assert_eq!(p.location, "Austin, TX");
        assert_eq!(p.linkedin, "https://linkedin.com/in/janesmith");
        assert_eq!(
            p.professional_summary,
            "Backend engineer with eight years building payment and data platforms."
        );
        assert_eq!(p.skills, "Rust, Go, PostgreSQL, Kubernetes");
        assert_eq!(p.volunteering, "Mentor at Code2040, weekend workshops.");

        assert_eq!(resume.work_experience.len(), 2);
        let first = &resume.work_experience[0];
        assert_eq!(first.position, "Senior Software Engineer");
        assert_eq!(first.company, "Stripe");
        assert_eq!(first.location, "San Francisco, CA");
        assert!(first.current);
        assert_eq!(first.end_date, "");
        assert_eq!(first.description, "Built X | Led Y team of five");

        let second = &resume.work_experience[1];
        assert_eq!(second.company, "Initech");
        assert_eq!(second.start_date, "Jun 2016");
        assert_eq!(second.end_date, "Dec 2019");
        assert!(!second.current);

        assert_eq!(resume.education.len(), 1);
        assert_eq!(
            resume.education[0].degree,
            "Bachelor of Science in Computer Science"
        );
        assert_eq!(resume.education[0].institution, "MIT");
        assert_eq!(resume.education[0].graduation_date, "2016");
        assert!(resume.projects.is_empty());
    }

    #[test]
    fn test_empty_inputs_return_defaults() {
        assert_eq!(parse(None), StructuredResume::default());
        assert_eq!(parse(Some("")), StructuredResume::default());
        assert_eq!(parse(Some(" \n\t ")), StructuredResume::default());
        assert_eq!(parse(Some("```\n```")), StructuredResume::default());
    }

    #[test]
    fn test_email_only() {
        let resume = parse(Some("Contact: jane.doe@example.com or call"));
        assert_eq!(resume.profile.email, "jane.doe@example.com");
        assert!(resume.work_experience.is_empty());
    }

    #[test]
    fn test_name_after_heading_line() {
        let resume = parse(Some("PROFESSIONAL SUMMARY\nJane Smith"));
        assert_eq!(resume.profile.full_name, "Jane Smith");
    }

    #[test]
    fn test_current_job_normalisation() {
        let resume = parse(Some(
            "EXPERIENCE\nSoftware Engineer at Acme\nJan 2020 - Present\n",
        ));
        let job = &resume.work_experience[0];
        assert!(job.current);
        assert_eq!(job.end_date, "");
    }

    #[test]
    fn test_code_fences_are_stripped() {
        let resume = parse(Some("```markdown\nJane Smith\njane@x.io\n```"));
        assert_eq!(resume.profile.full_name, "Jane Smith");
        assert_eq!(resume.profile.email, "jane@x.io");
    }

    #[test]
    fn test_totality_on_garbage() {
        let long = "EXPERIENCE\n".to_string() + &"Senior Engineer at X\n2001 - 2002\n- a\n".repeat(2000);
        let inputs = [
            "\u{0}\u{1}\u{fffd}\u{fffd}",
            "@@@@ ,,,, ----",
            "EXPERIENCE",
            "EDUCATION:\n\n\n",
            "SKILLS\n•\n-\n*",
            "Bachelor\nBachelor\nBachelor",
            long.as_str(),
        ];
        for input in inputs {
            let resume = parse(Some(input));
            assert!(resume.projects.is_empty());
        }
        assert_eq!(parse(Some(long.as_str())).work_experience.len(), 2000);
    }

    #[test]
    fn test_inline_heading_ends_experience() {
        let resume = parse(Some(
            "EXPERIENCE\nPlatform engineer at Acme\n2019 - 2020\n• Built the thing\nSKILLS: Rust, Go, Kubernetes",
        ));
        assert_eq!(resume.work_experience.len(), 1);
        assert_eq!(resume.work_experience[0].position, "Platform engineer");
        assert_eq!(resume.work_experience[0].description, "Built the thing");
        assert_eq!(resume.profile.skills, "Rust, Go, Kubernetes");
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse(Some(SAMPLE)), parse(Some(SAMPLE)));
    }

    struct NeverEnds;

    impl SectionBoundary for NeverEnds {
        fn section_end(&self, body: &str, _kind: SectionKind) -> usize {
            body.len()
        }
    }

    #[test]
    fn test_custom_boundaries_are_used() {
        let parser = ResumeParser::with_boundaries(NeverEnds, NeverEnds);
        let resume = parser.parse(Some("SKILLS\nRust\n\nEDUCATION\nBachelor of Arts"));
        assert_eq!(resume.profile.skills, "Rust, EDUCATION, Bachelor of Arts");
    }
}
