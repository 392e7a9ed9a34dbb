//! Contact and identity extraction.
//!
//! Email, phone, location and LinkedIn are searched over the whole text; the
//! full name only over the first [`NAME_SCAN_LINES`] lines. Each extractor is
//! independent and a miss leaves its field empty.

use std::sync::LazyLock;

use regex::Regex;

/// How many leading lines are considered when looking for the full name.
pub const NAME_SCAN_LINES: usize = 10;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("valid email regex"));

/// Optional `+CC`, then 3-3-4 digits with `-`, `.` or space separators and
/// optional parentheses around the area code.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-. ]?)?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}").expect("valid phone regex")
});

/// `City, ST` with optional multi-word city and optional middle region. The
/// trailing delimiter keeps `ST` from being a prefix of a longer word.
static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b([A-Z][a-z]+(?: [A-Z][a-z]+)*(?:, [A-Z][a-z]+(?: [A-Z][a-z]+)*)?, [A-Z]{2})(?:[\s•·|]|\z)",
    )
    .expect("valid location regex")
});

static LINKEDIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)linkedin\.com/in/([\w-]+)").expect("valid linkedin regex")
});

static NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3}$").expect("valid name regex")
});

static STATE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2}\b").expect("valid state code regex"));

static HEADING_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:PROFESSIONAL|EXPERIENCE|EDUCATION|SKILLS|SUMMARY|OBJECTIVE|CONTACT|RESUME|CV)\b",
    )
    .expect("valid heading keyword regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
}

pub fn extract_contact(text: &str, lines: &[&str]) -> ContactDetails {
    ContactDetails {
        full_name: extract_full_name(lines),
        email: first_match(&EMAIL, text),
        phone: first_match(&PHONE, text),
        location: extract_location(text),
        linkedin: extract_linkedin(text),
    }
}

fn first_match(re: &Regex, text: &str) -> String {
    re.find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn extract_location(text: &str) -> String {
    LOCATION
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn extract_linkedin(text: &str) -> String {
    LINKEDIN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|handle| format!("https://linkedin.com/in/{}", handle.as_str()))
        .unwrap_or_default()
}

/// First line among the leading lines that reads like a person's name.
pub fn extract_full_name(lines: &[&str]) -> String {
    lines
        .iter()
        .take(NAME_SCAN_LINES)
        .copied()
        .filter(|line| !is_rejected_name_line(line))
        .find(|line| NAME.is_match(line))
        .map(String::from)
        .unwrap_or_default()
}

fn is_rejected_name_line(line: &str) -> bool {
    line.contains('@')
        || line.to_lowercase().contains("linkedin")
        || PHONE.is_match(line)
        || line.contains(',')
        || STATE_CODE.is_match(line)
        || HEADING_KEYWORD.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lines::segment_lines;

    fn contact(text: &str) -> ContactDetails {
        extract_contact(text, &segment_lines(text))
    }

    #[test]
    fn test_email_first_match() {
        let c = contact("Contact: jane.doe@example.com or call; alt jd@other.org");
        assert_eq!(c.email, "jane.doe@example.com");
    }

    #[test]
    fn test_email_with_hyphenated_domain() {
        assert_eq!(contact("mail: a-b@my-site.co.uk").email, "a-b@my-site.co.uk");
    }

    #[test]
    fn test_phone_plain() {
        assert_eq!(contact("Phone: 555-123-4567").phone, "555-123-4567");
    }

    #[test]
    fn test_phone_parenthesised_area_code() {
        assert_eq!(contact("Tel (555) 123-4567").phone, "(555) 123-4567");
    }

    #[test]
    fn test_phone_with_country_code() {
        assert_eq!(contact("+1 555.123.4567 (mobile)").phone, "+1 555.123.4567");
    }

    #[test]
    fn test_phone_ignores_year_ranges() {
        assert_eq!(contact("2018 - 2020").phone, "");
    }

    #[test]
    fn test_location_city_state() {
        assert_eq!(contact("Jane Smith\nAustin, TX 78701").location, "Austin, TX");
    }

    #[test]
    fn test_location_multi_word_city() {
        let c = contact("San Francisco, CA | jane@x.io");
        assert_eq!(c.location, "San Francisco, CA");
    }

    #[test]
    fn test_location_at_end_of_text() {
        assert_eq!(contact("Based in New York, NY").location, "New York, NY");
    }

    #[test]
    fn test_location_rejects_longer_caps_word() {
        assert_eq!(contact("Skills: Rust, GRPC").location, "");
    }

    #[test]
    fn test_linkedin_gets_https_prefix() {
        let c = contact("www.LinkedIn.com/in/jane-smith-42 | github.com/jane");
        assert_eq!(c.linkedin, "https://linkedin.com/in/jane-smith-42");
    }

    #[test]
    fn test_name_first_line() {
        assert_eq!(contact("Jane Smith\njane@x.io").full_name, "Jane Smith");
    }

    #[test]
    fn test_name_skips_heading_line() {
        let c = contact("PROFESSIONAL SUMMARY\nJane Smith\nEngineer");
        assert_eq!(c.full_name, "Jane Smith");
    }

    #[test]
    fn test_name_skips_contact_lines() {
        let text = "jane@x.io\nlinkedin.com/in/jane\n555-123-4567\nAustin, TX\nMary Ann Jones";
        assert_eq!(contact(text).full_name, "Mary Ann Jones");
    }

    #[test]
    fn test_name_skips_heading_keyword_in_title_case() {
        assert_eq!(contact("Resume Draft\nJohn Doe").full_name, "John Doe");
    }

    #[test]
    fn test_name_rejects_five_words() {
        assert_eq!(contact("One Two Three Four Five").full_name, "");
    }

    #[test]
    fn test_name_only_scans_first_ten_lines() {
        let mut text = "x\n".repeat(NAME_SCAN_LINES);
        text.push_str("Jane Smith");
        assert_eq!(contact(&text).full_name, "");
    }

    #[test]
    fn test_all_empty_on_noise() {
        assert_eq!(contact("%%% ??? ###"), ContactDetails::default());
    }
}
