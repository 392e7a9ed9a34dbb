use serde::{Deserialize, Serialize};

/// Identity and free-text fields. Every field is an empty string when the
/// heuristics found nothing; absence is never a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub professional_summary: String,
    /// Comma-joined skill list, e.g. `Rust, Go, SQL`.
    pub skills: String,
    pub volunteering: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkExperienceEntry {
    pub position: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    /// Always empty when `current` is true.
    pub end_date: String,
    /// Bullet points joined by [`DESCRIPTION_DELIMITER`].
    pub description: String,
    pub current: bool,
}

/// Separator between description bullets. Consumers split on `|` to get the
/// individual bullets back.
pub const DESCRIPTION_DELIMITER: &str = " | ";

impl WorkExperienceEntry {
    /// Description bullets in source order.
    pub fn bullets(&self) -> Vec<String> {
        self.description
            .split('|')
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(String::from)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub graduation_date: String,
    pub current: bool,
}

/// Project record. The text heuristics never produce these; the type exists
/// so the output shape matches what the improvement flow sends back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: String,
    pub link: String,
}

/// Full parser output. Created fresh on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredResume {
    pub profile: Profile,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_serializes_every_field() {
        let json = serde_json::to_value(StructuredResume::default()).unwrap();
        let profile = json["profile"].as_object().unwrap();
        for key in [
            "full_name",
            "email",
            "phone",
            "location",
            "linkedin",
            "professional_summary",
            "skills",
            "volunteering",
        ] {
            assert_eq!(profile[key], "", "field {key} should be an empty string");
        }
        assert_eq!(json["work_experience"], serde_json::json!([]));
        assert_eq!(json["education"], serde_json::json!([]));
        assert_eq!(json["projects"], serde_json::json!([]));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let parsed: StructuredResume =
            serde_json::from_str(r#"{"profile": {"email": "a@b.io"}}"#).unwrap();
        assert_eq!(parsed.profile.email, "a@b.io");
        assert_eq!(parsed.profile.full_name, "");
        assert!(parsed.work_experience.is_empty());
    }

    #[test]
    fn test_bullets_split_on_pipe() {
        let entry = WorkExperienceEntry {
            description: "Built X | Led Y team of five".to_string(),
            ..Default::default()
        };
        assert_eq!(entry.bullets(), vec!["Built X", "Led Y team of five"]);
    }

    #[test]
    fn test_bullets_empty_description() {
        assert!(WorkExperienceEntry::default().bullets().is_empty());
    }
}
