//! Date ranges in experience lines ("Jan 2019 - Present", "2016 – 2018",
//! "03/2017 to 11/2019") and the total span they cover.

use chrono::{Datelike, NaiveDate};

const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

const RANGE_SEPARATORS: &[&str] = &["-", "–", "—", "to", "till", "until"];
const OPEN_ENDED: &[&str] = &["present", "current", "now", "date", "today"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPoint {
    pub year: i32,
    pub month: u32,
    /// False when only the year was written.
    pub has_month: bool,
}

impl MonthPoint {
    fn index(&self) -> i32 {
        self.year * 12 + self.month as i32 - 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: MonthPoint,
    pub end: MonthPoint,
}

impl DateRange {
    /// Months covered, counting the start month when both ends name a month.
    /// `None` when the range runs backwards.
    pub fn months(&self) -> Option<i32> {
        let diff = self.end.index() - self.start.index();
        if diff < 0 {
            return None;
        }
        let inclusive = self.start.has_month && self.end.has_month;
        Some(diff + i32::from(inclusive))
    }
}

/// Finds every date range written in `line`. `today` resolves "Present".
pub fn find_ranges(line: &str, today: NaiveDate) -> Vec<DateRange> {
    let tokens = split_tokens(line);
    let mut ranges = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let Some((start, used)) = parse_point(&tokens, i, None) else {
            i += 1;
            continue;
        };
        let sep = i + used;
        let is_separator = tokens
            .get(sep)
            .is_some_and(|t| RANGE_SEPARATORS.contains(&t.to_lowercase().as_str()));
        if is_separator {
            if let Some((end, used_end)) = parse_point(&tokens, sep + 1, Some(today)) {
                ranges.push(DateRange { start, end });
                i = sep + 1 + used_end;
                continue;
            }
        }
        i += used;
    }

    ranges
}

/// Years of experience across all ranges in `lines`, unrounded.
pub fn total_experience_years<'a>(lines: impl IntoIterator<Item = &'a str>, today: NaiveDate) -> f64 {
    let months: i32 = lines
        .into_iter()
        .flat_map(|line| find_ranges(line, today))
        .filter_map(|r| r.months())
        .sum();
    months as f64 / 12.0
}

/// Whitespace/punctuation split that keeps dashes as standalone tokens.
fn split_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in line.chars() {
        match c {
            '-' | '–' | '—' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(c.to_string());
            }
            c if c.is_whitespace() || matches!(c, ',' | '(' | ')' | '[' | ']' | '|' | ';') => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Parses one date point at `tokens[i]`, returning it and the number of tokens used.
/// Open-ended words are accepted only when `today` is given (range ends).
fn parse_point(tokens: &[String], i: usize, today: Option<NaiveDate>) -> Option<(MonthPoint, usize)> {
    let token = tokens.get(i)?;
    let lower = token.trim_end_matches('.').to_lowercase();

    if let Some(today) = today {
        if OPEN_ENDED.contains(&lower.as_str()) {
            return Some((
                MonthPoint {
                    year: today.year(),
                    month: today.month(),
                    has_month: true,
                },
                1,
            ));
        }
    }

    if let Some(month) = month_number(&lower) {
        let year = tokens.get(i + 1).and_then(|t| parse_year(t))?;
        return Some((
            MonthPoint {
                year,
                month,
                has_month: true,
            },
            2,
        ));
    }

    if let Some((m, y)) = lower.split_once('/') {
        let month: u32 = m.parse().ok().filter(|m| (1..=12).contains(m))?;
        let year = parse_year(y)?;
        return Some((
            MonthPoint {
                year,
                month,
                has_month: true,
            },
            1,
        ));
    }

    parse_year(&lower).map(|year| {
        (
            MonthPoint {
                year,
                month: 1,
                has_month: false,
            },
            1,
        )
    })
}

fn month_number(word: &str) -> Option<u32> {
    if word.len() < 3 || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| m.starts_with(word))
        .map(|idx| idx as u32 + 1)
}

pub(crate) fn parse_year(token: &str) -> Option<i32> {
    let token = token.trim_end_matches(['.', ':', '\'']);
    if token.len() != 4 {
        return None;
    }
    token
        .parse::<i32>()
        .ok()
        .filter(|y| (1950..=2100).contains(y))
}
