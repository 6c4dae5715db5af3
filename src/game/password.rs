//! Password strength scoring
//!
//! Seven independent criteria are checked against the raw password. The
//! number satisfied drives the label and the XP reward.

use serde::Serialize;

/// Symbols that count towards the "contains symbols" criterion
pub const SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Case-insensitive substrings that fail the "no common patterns" criterion
pub const COMMON_PATTERNS: [&str; 4] = ["123", "abc", "password", "qwerty"];

/// Number of criteria a password is scored against
pub const CRITERIA_COUNT: u8 = 7;

/// The fixed criteria, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Criterion {
    MinLength,
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
    NoCommonPatterns,
    LongLength,
}

impl Criterion {
    pub const ALL: [Criterion; 7] = [
        Criterion::MinLength,
        Criterion::Lowercase,
        Criterion::Uppercase,
        Criterion::Digit,
        Criterion::Symbol,
        Criterion::NoCommonPatterns,
        Criterion::LongLength,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Criterion::MinLength => "Minimum 8 characters",
            Criterion::Lowercase => "Contains lowercase",
            Criterion::Uppercase => "Contains uppercase",
            Criterion::Digit => "Contains numbers",
            Criterion::Symbol => "Contains symbols",
            Criterion::NoCommonPatterns => "No common patterns",
            Criterion::LongLength => "Minimum 12 characters",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Criterion::MinLength => "Longer passwords are harder to crack",
            Criterion::Lowercase => "Mix of cases increases complexity",
            Criterion::Uppercase => "Capital letters add security",
            Criterion::Digit => "Numbers make passwords stronger",
            Criterion::Symbol => "Special characters boost security",
            Criterion::NoCommonPatterns => "Avoid predictable sequences",
            Criterion::LongLength => "12+ characters provide excellent protection",
        }
    }
}

/// Outcome of one criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriterionResult {
    pub criterion: Criterion,
    pub name: &'static str,
    pub met: bool,
    pub description: &'static str,
}

/// Strength labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum StrengthLabel {
    VeryWeak,
    Weak,
    Fair,
    Strong,
    VeryStrong,
}

impl StrengthLabel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => StrengthLabel::VeryWeak,
            3..=4 => StrengthLabel::Weak,
            5 => StrengthLabel::Fair,
            6 => StrengthLabel::Strong,
            _ => StrengthLabel::VeryStrong,
        }
    }

    pub fn xp(&self) -> u32 {
        match self {
            StrengthLabel::VeryWeak => 0,
            StrengthLabel::Weak => 25,
            StrengthLabel::Fair => 50,
            StrengthLabel::Strong => 100,
            StrengthLabel::VeryStrong => 150,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            StrengthLabel::VeryWeak | StrengthLabel::Weak => "red",
            StrengthLabel::Fair => "yellow",
            StrengthLabel::Strong | StrengthLabel::VeryStrong => "green",
        }
    }
}

impl std::fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrengthLabel::VeryWeak => write!(f, "Very Weak"),
            StrengthLabel::Weak => write!(f, "Weak"),
            StrengthLabel::Fair => write!(f, "Fair"),
            StrengthLabel::Strong => write!(f, "Strong"),
            StrengthLabel::VeryStrong => write!(f, "Very Strong"),
        }
    }
}

/// Full evaluation of a password
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrengthResult {
    pub criteria: Vec<CriterionResult>,
    /// Criteria satisfied, 0-7
    pub score: u8,
    pub percentage: f64,
    pub label: StrengthLabel,
    pub xp: u32,
}

/// Score a password. Total and pure: any input, including the empty
/// string, produces a result.
pub fn evaluate(password: &str) -> StrengthResult {
    let length = password.chars().count();
    let lowered = password.to_lowercase();

    let criteria: Vec<CriterionResult> = Criterion::ALL
        .iter()
        .map(|&criterion| {
            let met = match criterion {
                Criterion::MinLength => length >= 8,
                Criterion::Lowercase => password.chars().any(|c| c.is_ascii_lowercase()),
                Criterion::Uppercase => password.chars().any(|c| c.is_ascii_uppercase()),
                Criterion::Digit => password.chars().any(|c| c.is_ascii_digit()),
                Criterion::Symbol => password.chars().any(|c| SYMBOLS.contains(c)),
                Criterion::NoCommonPatterns => {
                    !COMMON_PATTERNS.iter().any(|p| lowered.contains(p))
                }
                Criterion::LongLength => length >= 12,
            };
            CriterionResult {
                criterion,
                name: criterion.name(),
                met,
                description: criterion.description(),
            }
        })
        .collect();

    let score = criteria.iter().filter(|c| c.met).count() as u8;
    let label = StrengthLabel::from_score(score);

    StrengthResult {
        criteria,
        score,
        percentage: score as f64 / CRITERIA_COUNT as f64 * 100.0,
        label,
        xp: label.xp(),
    }
}
