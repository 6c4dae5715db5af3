//! Phishing drills
//!
//! [`judge`] is a plain comparison against the labeled dataset.
//! [`PhishingSession`] keeps score and walks through the emails.

use crate::data::{phishing_cases, PhishingCase};
use crate::AcademyError;
use serde::Serialize;

/// Outcome of a single decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Judgement {
    pub correct: bool,
}

/// Was the player right to call case `case_index` safe (or not)?
pub fn judge(case_index: usize, user_says_safe: bool) -> Result<Judgement, AcademyError> {
    let case = phishing_cases()
        .get(case_index)
        .ok_or(AcademyError::UnknownCase(case_index))?;
    Ok(Judgement {
        correct: user_says_safe == !case.is_phishing,
    })
}

/// Score keeping across a run through the dataset
#[derive(Debug, Clone, Default, Serialize)]
pub struct PhishingSession {
    pub current: usize,
    pub score: u32,
    pub attempts: u32,
    /// Correct calls since the last miss
    pub streak: u32,
    pub last_result: Option<Judgement>,
}

impl PhishingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The email being shown
    pub fn current_case(&self) -> &'static PhishingCase {
        let cases = phishing_cases();
        &cases[self.current % cases.len()]
    }

    /// Judge the current email, then move on, wrapping to the first email
    /// after the last one.
    pub fn decide(&mut self, user_says_safe: bool) -> Result<Judgement, AcademyError> {
        let cases = phishing_cases().len();
        let index = self.current % cases;
        let judgement = judge(index, user_says_safe)?;

        self.attempts += 1;
        if judgement.correct {
            self.score += 1;
            self.streak += 1;
        } else {
            self.streak = 0;
        }
        self.last_result = Some(judgement);
        tracing::debug!(case = self.current_case().id, correct = judgement.correct, "Phishing decision");

        self.current = (index + 1) % cases;
        Ok(judgement)
    }

    /// Rounded percentage of correct calls; 0 before the first attempt
    pub fn accuracy(&self) -> u32 {
        if self.attempts == 0 {
            0
        } else {
            (self.score as f64 / self.attempts as f64 * 100.0).round() as u32
        }
    }

    /// True once the last run of correct calls covers every email in the dataset
    pub fn is_perfect_round(&self) -> bool {
        self.streak as usize >= phishing_cases().len()
    }
}
