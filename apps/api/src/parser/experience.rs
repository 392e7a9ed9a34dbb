//! Work-experience section parser.
//!
//! A finite-state scanner fed one line at a time:
//!
//! ```text
//! ScanningForTitle --title--> AwaitingDates --date range--> CollectingDescription
//!        ^                        |   ^                            |
//!        +------ (never) ---------+   +----------title-------------+
//! ```
//!
//! - A title line always opens a new entry, finalising the previous one.
//! - A date-range line sets the dates of the open entry and starts
//!   description collection.
//! - In `AwaitingDates` a plain line fills an empty `company`.
//! - In `CollectingDescription` bullet or capitalised lines become
//!   description bullets joined by `" | "`.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::cleaners::{strip_bullet, BULLET_GLYPHS};
use crate::parser::dates::DateRange;
use crate::parser::lines::segment_lines;
use crate::parser::models::{WorkExperienceEntry, DESCRIPTION_DELIMITER};

/// Words that mark a line as a job title.
pub const ROLE_KEYWORDS: &[&str] = &[
    "Software",
    "Senior",
    "Junior",
    "Lead",
    "Manager",
    "Engineer",
    "Developer",
    "Analyst",
    "Specialist",
    "Coordinator",
    "Director",
    "VP",
    "President",
    "Designer",
    "Consultant",
    "Architect",
    "Scientist",
    "Researcher",
    "Intern",
    "Assistant",
    "Executive",
    "Administrator",
    "Supervisor",
    "Technician",
];

/// Plain (unbulleted) description lines must be longer than this.
const MIN_PLAIN_DESCRIPTION_CHARS: usize = 10;

/// A title phrase: capitalised words, role keywords (any case) and connectors
/// around at least one role keyword, ending at the line end or at a separator
/// (`at`, `@`, `,`, `|`, a dash, `(` or a date). Sentences such as
/// `Developed software for internal teams` fail because a lower-case word
/// follows the keyword.
static TITLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    let keywords = ROLE_KEYWORDS.join("|");
    let word = format!(r"(?:[A-Z][\w&/.'’-]*|(?i:{keywords})\b|of|and|the|for|&)");
    Regex::new(&format!(
        r"^(?:{word}[ \t]+)*(?i:{keywords})\b(?:[ \t]+{word})*(?:[ \t]*$|[ \t]*[,@|(–—-]|[ \t]+(?i:at)[ \t]|[ \t]+\d)"
    ))
    .expect("valid title line regex")
});

static AT_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<position>.+?)(?:\s+(?i:at)\s+|\s*@\s*)(?P<rest>.+)$")
        .expect("valid at split regex")
});

static COMMA_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<position>.+?)\s*,\s*(?P<rest>.+)$").expect("valid comma split regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceState {
    /// No entry open yet.
    ScanningForTitle,
    /// Title seen, waiting for the date line.
    AwaitingDates,
    /// Dates seen, collecting description bullets.
    CollectingDescription,
}

#[derive(Debug)]
pub struct ExperienceParser {
    state: ExperienceState,
    current: WorkExperienceEntry,
    entries: Vec<WorkExperienceEntry>,
}

impl Default for ExperienceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceParser {
    pub fn new() -> Self {
        Self {
            state: ExperienceState::ScanningForTitle,
            current: WorkExperienceEntry::default(),
            entries: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> ExperienceState {
        self.state
    }

    /// Consumes one trimmed, non-blank line.
    pub fn feed(&mut self, line: &str) {
        if is_title_line(line) {
            self.open_entry(line);
            return;
        }

        if let Some(range) = DateRange::find(line) {
            let dates_entry = match self.state {
                ExperienceState::ScanningForTitle => return,
                ExperienceState::AwaitingDates => true,
                // A bullet mentioning years is description, not new dates.
                ExperienceState::CollectingDescription => {
                    !line.starts_with(BULLET_GLYPHS) && is_bare_date_line(line, &range)
                }
            };
            if dates_entry {
                apply_dates(&mut self.current, &range);
                self.state = ExperienceState::CollectingDescription;
                return;
            }
        }

        match self.state {
            ExperienceState::ScanningForTitle => {}
            ExperienceState::AwaitingDates => {
                if self.current.company.is_empty() && !line.starts_with(BULLET_GLYPHS) {
                    let (company, location) = split_company_location(line);
                    self.current.company = company;
                    self.current.location = location;
                }
            }
            ExperienceState::CollectingDescription => {
                if let Some(bullet) = description_bullet(line) {
                    if !self.current.description.is_empty() {
                        self.current.description.push_str(DESCRIPTION_DELIMITER);
                    }
                    self.current.description.push_str(bullet);
                }
            }
        }
    }

    /// Finalises the open entry and returns every entry in document order.
    pub fn finish(mut self) -> Vec<WorkExperienceEntry> {
        self.flush();
        self.entries
    }

    fn open_entry(&mut self, line: &str) {
        self.flush();

        let mut entry = WorkExperienceEntry::default();
        let mut state = ExperienceState::AwaitingDates;
        let mut title = line.to_string();

        if let Some(range) = DateRange::find(line) {
            apply_dates(&mut entry, &range);
            state = ExperienceState::CollectingDescription;
            title.replace_range(range.span, " ");
            title = trim_separators(&title.replace("( )", " ")).to_string();
        }

        let split = AT_SPLIT
            .captures(&title)
            .or_else(|| COMMA_SPLIT.captures(&title))
            .and_then(|caps| Some((caps.name("position")?, caps.name("rest")?)));
        match split {
            Some((position, rest)) => {
                entry.position = trim_separators(position.as_str()).to_string();
                let (company, location) = split_company_location(rest.as_str());
                entry.company = company;
                entry.location = location;
            }
            None => entry.position = trim_separators(&title).to_string(),
        }

        self.current = entry;
        self.state = state;
    }

    fn flush(&mut self) {
        let entry = std::mem::take(&mut self.current);
        if !entry.position.is_empty() {
            self.entries.push(entry);
        }
    }
}

/// Parses the lines of an isolated experience section.
pub fn parse_experience(section: &str) -> Vec<WorkExperienceEntry> {
    let mut parser = ExperienceParser::new();
    for line in segment_lines(section) {
        parser.feed(line);
    }
    parser.finish()
}

pub fn is_title_line(line: &str) -> bool {
    TITLE_LINE.is_match(line)
}

/// True when nothing but separators surrounds the date range.
fn is_bare_date_line(line: &str, range: &DateRange) -> bool {
    trim_separators(&line[..range.span.start]).is_empty()
        && trim_separators(&line[range.span.end..]).is_empty()
}

fn apply_dates(entry: &mut WorkExperienceEntry, range: &DateRange) {
    entry.start_date = range.start.clone();
    if range.is_present() {
        entry.current = true;
        entry.end_date.clear();
    } else {
        entry.current = false;
        entry.end_date = range.end.clone();
    }
}

/// `Acme Corp, Austin, TX` -> (`Acme Corp`, `Austin, TX`).
fn split_company_location(text: &str) -> (String, String) {
    let mut parts = text
        .split(',')
        .map(trim_separators)
        .filter(|part| !part.is_empty());
    let company = parts.next().unwrap_or_default().to_string();
    let location = parts.collect::<Vec<_>>().join(", ");
    (company, location)
}

fn description_bullet(line: &str) -> Option<&str> {
    let content = strip_bullet(line);
    if content.is_empty() {
        return None;
    }
    if line.starts_with(BULLET_GLYPHS) {
        return Some(content);
    }
    let capitalised = line.chars().next().is_some_and(char::is_uppercase);
    (capitalised && content.chars().count() > MIN_PLAIN_DESCRIPTION_CHARS).then_some(content)
}

fn trim_separators(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || matches!(c, '|' | ',' | '-' | '–' | '—'))
}
