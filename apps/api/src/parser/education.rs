//! Education section parser. One entry is open at a time; a degree line
//! always closes the previous entry, even a half-filled one.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::dates::{last_date, DateRange};
use crate::parser::lines::segment_lines;
use crate::parser::models::EducationEntry;

static DEGREE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:bachelor|master|doctor|ph\.?\s?d|associate|certificate|diploma)")
        .expect("valid degree regex")
});

static FROM_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+from\s+").expect("valid from split regex"));

static IN_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+in\s+").expect("valid in split regex"));

static INSTITUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:[A-Z][\w.&'’-]*\s+)+(?i:university|college|institute|school)\b|(?i:university|college|institute)\s+of\s+[A-Z])",
    )
    .expect("valid institution regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationState {
    ScanningForDegree,
    InEntry,
}

#[derive(Debug)]
pub struct EducationParser {
    state: EducationState,
    current: EducationEntry,
    entries: Vec<EducationEntry>,
}

impl Default for EducationParser {
    fn default() -> Self {
        Self::new()
    }
}

impl EducationParser {
    pub fn new() -> Self {
        Self {
            state: EducationState::ScanningForDegree,
            current: EducationEntry::default(),
            entries: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> EducationState {
        self.state
    }

    pub fn feed(&mut self, line: &str) {
        if DEGREE.is_match(line) {
            self.open_entry(line);
            return;
        }
        if self.state != EducationState::InEntry {
            return;
        }

        if let Some(range) = DateRange::find(line) {
            if range.is_present() {
                self.current.current = true;
                self.current.graduation_date.clear();
            } else {
                self.current.current = false;
                self.current.graduation_date = range.end;
            }
        } else if let Some(date) = last_date(line) {
            self.current.current = false;
            self.current.graduation_date = date;
        }

        if self.current.institution.is_empty() && INSTITUTION.is_match(line) {
            let mut parts = line.split(',').map(str::trim).filter(|p| !p.is_empty());
            self.current.institution = parts.next().unwrap_or_default().to_string();
            self.current.location = parts
                .filter(|p| !p.chars().any(|c| c.is_ascii_digit()))
                .collect::<Vec<_>>()
                .join(", ");
        }
    }

    pub fn finish(mut self) -> Vec<EducationEntry> {
        if self.state == EducationState::InEntry {
            self.entries.push(std::mem::take(&mut self.current));
        }
        self.entries
    }

    fn open_entry(&mut self, line: &str) {
        if self.state == EducationState::InEntry {
            self.entries.push(std::mem::take(&mut self.current));
        }

        let (degree, institution) = split_degree_line(line);
        self.current = EducationEntry {
            degree,
            institution,
            ..Default::default()
        };
        self.state = EducationState::InEntry;
    }
}

/// `X from Y` splits at the last "from"; otherwise `X in Y` at the first
/// "in". Without either, the whole line is the degree.
fn split_degree_line(line: &str) -> (String, String) {
    let separator = FROM_SPLIT
        .find_iter(line)
        .last()
        .or_else(|| IN_SPLIT.find(line));
    match separator {
        Some(sep) => (
            line[..sep.start()].trim().to_string(),
            line[sep.end()..].trim().to_string(),
        ),
        None => (line.trim().to_string(), String::new()),
    }
}

/// Parses the lines of an isolated education section.
pub fn parse_education(section: &str) -> Vec<EducationEntry> {
    let mut parser = EducationParser::new();
    for line in segment_lines(section) {
        parser.feed(line);
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_split_keeps_field_in_degree() {
        let entries = parse_education("Bachelor of Science in Computer Science from MIT");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].degree, "Bachelor of Science in Computer Science");
        assert_eq!(entries[0].institution, "MIT");
    }

    #[test]
    fn test_in_split() {
        let entries = parse_education("Master in Data Science");
        assert_eq!(entries[0].degree, "Master");
        assert_eq!(entries[0].institution, "Data Science");
    }

    #[test]
    fn test_whole_line_degree_then_institution_line() {
        let section = "Bachelor of Arts\nStanford University, Stanford, CA\n2012 - 2016";
        let entry = &parse_education(section)[0];
        assert_eq!(entry.degree, "Bachelor of Arts");
        assert_eq!(entry.institution, "Stanford University");
        assert_eq!(entry.location, "Stanford, CA");
        assert_eq!(entry.graduation_date, "2016");
        assert!(!entry.current);
    }

    #[test]
    fn test_university_of_line() {
        let entry = &parse_education("PhD\nUniversity of Washington\nMay 2020")[0];
        assert_eq!(entry.institution, "University of Washington");
        assert_eq!(entry.graduation_date, "May 2020");
    }

    #[test]
    fn test_institution_from_degree_line_is_not_overwritten() {
        let entry = &parse_education("Diploma from Lycee Henri\nBoston College")[0];
        assert_eq!(entry.institution, "Lycee Henri");
    }

    #[test]
    fn test_last_date_line_wins() {
        let entry = &parse_education("Master of Arts\n2015\nGraduated 2017")[0];
        assert_eq!(entry.graduation_date, "2017");
    }

    #[test]
    fn test_present_range_marks_current() {
        let entry = &parse_education("Doctor of Philosophy\nSep 2021 - Present")[0];
        assert!(entry.current);
        assert_eq!(entry.graduation_date, "");
    }

    #[test]
    fn test_multiple_entries_pushed_unconditionally() {
        let section = "Certificate\nAssociate of Science from Foothill College\n2010";
        let entries = parse_education(section);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].degree, "Certificate");
        assert_eq!(entries[0].institution, "");
        assert_eq!(entries[1].institution, "Foothill College");
        assert_eq!(entries[1].graduation_date, "2010");
    }

    #[test]
    fn test_lines_before_first_degree_are_ignored() {
        let section = "Harvard University\n2001\nBachelor of Laws";
        let entries = parse_education(section);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].institution, "");
        assert_eq!(entries[0].graduation_date, "");
    }

    #[test]
    fn test_state_transitions() {
        let mut parser = EducationParser::new();
        assert_eq!(parser.state(), EducationState::ScanningForDegree);
        parser.feed("Some University");
        assert_eq!(parser.state(), EducationState::ScanningForDegree);
        parser.feed("Bachelor of Engineering");
        assert_eq!(parser.state(), EducationState::InEntry);
        assert_eq!(parser.finish().len(), 1);
    }
}
