//! Date-range and single-date patterns shared by the entry parsers.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";
const YEAR: &str = r"(?:19|20)\d{2}";

/// `2018 - 2020`, `Jan 2020 – Present`, `March 2019 to Dec 2021`, ...
static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?P<start>{MONTH}\s+{YEAR}|{YEAR})\s*(?:[-–—]|\bto\b)\s*(?P<end>{MONTH}\s+{YEAR}|{YEAR}|present)\b",
        MONTH = MONTH,
        YEAR = YEAR,
    ))
    .expect("valid date range regex")
});

/// A year, optionally preceded by a month name.
static SINGLE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:{MONTH}\s+)?{YEAR}\b",
        MONTH = MONTH,
        YEAR = YEAR
    ))
    .expect("valid single date regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
    /// Byte span of the whole range within the searched line.
    pub span: Range<usize>,
}

impl DateRange {
    /// First date range in `line`.
    pub fn find(line: &str) -> Option<Self> {
        let caps = DATE_RANGE.captures(line)?;
        let whole = caps.get(0)?;
        Some(Self {
            start: normalize(caps.name("start")?.as_str()),
            end: normalize(caps.name("end")?.as_str()),
            span: whole.range(),
        })
    }

    /// True when the range ends with "present" in any casing.
    pub fn is_present(&self) -> bool {
        self.end.eq_ignore_ascii_case("present")
    }
}

/// Last year or month-and-year mentioned in `line`.
pub fn last_date(line: &str) -> Option<String> {
    SINGLE_DATE
        .find_iter(line)
        .last()
        .map(|m| normalize(m.as_str()))
}

fn normalize(token: &str) -> String {
    token.split_whitespace().collect::<Vec<_>>().join(" ")
}
