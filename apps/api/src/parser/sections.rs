//! Section locator. Finds a named section by its heading and returns the
//! text span up to the next section boundary.
//!
//! Where a section ends is decided by a [`SectionBoundary`] strategy so the
//! entry parsers can use a more permissive rule than the free-text fields.

use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Skills,
    Experience,
    Education,
    Volunteering,
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Summary,
        SectionKind::Skills,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Volunteering,
    ];

    /// Heading alternatives, longest first.
    pub fn headings(self) -> &'static str {
        match self {
            SectionKind::Summary => "PROFESSIONAL SUMMARY|SUMMARY|OBJECTIVE|PROFILE|ABOUT ME",
            SectionKind::Skills => "TECHNICAL SKILLS|CORE COMPETENCIES|SKILLS",
            SectionKind::Experience => {
                "WORK EXPERIENCE|PROFESSIONAL EXPERIENCE|EMPLOYMENT HISTORY|WORK HISTORY|EXPERIENCE"
            }
            SectionKind::Education => "EDUCATION|ACADEMIC BACKGROUND",
            SectionKind::Volunteering => {
                "VOLUNTEER EXPERIENCE|VOLUNTEERING|VOLUNTEER WORK|COMMUNITY INVOLVEMENT|VOLUNTEER"
            }
        }
    }

    fn index(self) -> usize {
        match self {
            SectionKind::Summary => 0,
            SectionKind::Skills => 1,
            SectionKind::Experience => 2,
            SectionKind::Education => 3,
            SectionKind::Volunteering => 4,
        }
    }

    fn patterns(self) -> &'static HeadingPatterns {
        &HEADING_PATTERNS[self.index()]
    }
}

struct HeadingPatterns {
    /// Heading at the start of a line, optional `:`, trailing blanks.
    opener: Regex,
    /// The same alternation anywhere in the body.
    restated: Regex,
}

static HEADING_PATTERNS: LazyLock<Vec<HeadingPatterns>> = LazyLock::new(|| {
    SectionKind::ALL
        .iter()
        .map(|kind| {
            let alternation = kind.headings();
            HeadingPatterns {
                opener: Regex::new(&format!(r"(?im)^[ \t]*(?:{alternation})\b[ \t]*:?[ \t]*"))
                    .expect("valid section opener regex"),
                restated: Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
                    .expect("valid restated heading regex"),
            }
        })
        .collect()
});

/// Decides where a located section stops.
pub trait SectionBoundary {
    /// Byte offset into `body` at which the section ends. `body` starts at
    /// the first non-blank character after the heading.
    fn section_end(&self, body: &str, kind: SectionKind) -> usize;
}

/// Default boundary for free-text sections: a blank line followed by an
/// ALL-CAPS word, a restatement of the section's own heading, or end of text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankLineCapsBoundary;

static BLANK_LINE_CAPS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n[ \t]*\n\s*[A-Z]{2,}\b").expect("valid blank line caps regex")
});

impl SectionBoundary for BlankLineCapsBoundary {
    fn section_end(&self, body: &str, kind: SectionKind) -> usize {
        let next_heading = BLANK_LINE_CAPS.find(body).map(|m| m.start());
        let restated = kind.patterns().restated.find(body).map(|m| m.start());
        [next_heading, restated]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(body.len())
    }
}

/// Boundary for multi-entry sections: the next line that opens with two or
/// more upper-case letters, whether the heading stands alone (`SKILLS`) or
/// carries inline content (`SKILLS: Rust, Go`), or end of text. Blank lines
/// between jobs do not end the section.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapsHeadingBoundary;

static CAPS_HEADING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*[A-Z]{2,}\b").expect("valid caps heading regex")
});

impl SectionBoundary for CapsHeadingBoundary {
    fn section_end(&self, body: &str, _kind: SectionKind) -> usize {
        CAPS_HEADING_LINE
            .find(body)
            .map(|m| m.start())
            .unwrap_or(body.len())
    }
}

/// Returns the span of `kind` in `text`, or `None` when its heading never
/// appears. The span may be empty.
pub fn locate_section<'a>(
    text: &'a str,
    kind: SectionKind,
    boundary: &dyn SectionBoundary,
) -> Option<&'a str> {
    let heading = kind.patterns().opener.find(text)?;
    let body = text[heading.end()..].trim_start();
    let end = boundary.section_end(body, kind);
    Some(&body[..end])
}
