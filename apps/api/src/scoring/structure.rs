//! Structural analyzers: section headers, contact details, date ranges, length.
//!
//! All patterns are compiled once. The `regex` crate matches in linear time, so
//! long or adversarial resume text cannot trigger catastrophic backtracking.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scoring::text::{ascii_word_boundaries, tokenize_words};

const SECTION_POINTS: u32 = 20;
const EMAIL_POINTS: u32 = 60;
const PHONE_POINTS: u32 = 40;

const SHORT_RESUME_WORDS: usize = 200;
const LONG_RESUME_WORDS: usize = 1500;

static SECTION_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("summary", r"(?i)\b(summary|profile|objective)\b"),
        ("experience", r"(?i)\b(experience|employment|work history)\b"),
        ("skills", r"(?i)\b(skills|technical skills)\b"),
        ("education", r"(?i)\b(education|certifications?)\b"),
    ]
    .into_iter()
    .map(|(key, pattern)| {
        let re = Regex::new(&ascii_word_boundaries(pattern)).expect("static section regex");
        (key, re)
    })
    .collect()
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").expect("static email regex")
});

// At least 9 characters: a digit, 7+ digits/separators, a digit.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?[0-9][0-9(). -]{7,}[0-9]").expect("static phone regex"));

static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    const MONTH: &str = r"(jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*";
    const YEAR: &str = r"\b(19|20)[0-9]{2}\b";
    let pattern = format!(
        r"(?i)({YEAR}\s*[-–]\s*{YEAR})|({YEAR}\s*[-–]\s*present\b)|(\b{MONTH}\s+[0-9]{{4}}\b\s*[-–]\s*(present|\b{MONTH}\s+[0-9]{{4}}\b))"
    );
    Regex::new(&ascii_word_boundaries(&pattern)).expect("static date range regex")
});

/// Result of a points-based check plus the keys that were not found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureCheck {
    pub score: u32,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthBucket {
    Low,
    Ok,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthCheck {
    pub score: u32,
    pub word_count: usize,
    pub bucket: LengthBucket,
}

/// 20 points per detected section header. Tops out at 80: there are four
/// checks and no bonus for having all of them.
pub fn section_check(resume_text: &str) -> StructureCheck {
    let mut score = 0;
    let mut missing = Vec::new();
    for (key, re) in SECTION_PATTERNS.iter() {
        if re.is_match(resume_text) {
            score += SECTION_POINTS;
        } else {
            missing.push(key.to_string());
        }
    }
    StructureCheck { score, missing }
}

/// Email is worth 60, phone 40. Missing items are reported as `email` / `phone`.
pub fn contact_check(resume_text: &str) -> StructureCheck {
    let mut score = 0;
    let mut missing = Vec::new();

    if EMAIL_RE.is_match(resume_text) {
        score += EMAIL_POINTS;
    } else {
        missing.push("email".to_string());
    }

    if PHONE_RE.is_match(resume_text) {
        score += PHONE_POINTS;
    } else {
        missing.push("phone".to_string());
    }

    StructureCheck { score, missing }
}

/// Counts non-overlapping `2019-2021`, `2019 – Present` and
/// `Jan 2019 - Mar 2021` style ranges.
pub fn count_date_ranges(resume_text: &str) -> usize {
    DATE_RANGE_RE.find_iter(resume_text).count()
}

pub fn tenure_score(resume_text: &str) -> u32 {
    match count_date_ranges(resume_text) {
        0 => 10,
        1 => 45,
        2 => 75,
        _ => 100,
    }
}

pub fn length_check(resume_text: &str) -> LengthCheck {
    let word_count = tokenize_words(resume_text).len();
    let (score, bucket) = if word_count < SHORT_RESUME_WORDS {
        (25, LengthBucket::Low)
    } else if word_count > LONG_RESUME_WORDS {
        (35, LengthBucket::High)
    } else {
        (100, LengthBucket::Ok)
    };
    LengthCheck {
        score,
        word_count,
        bucket,
    }
}
