//! Labeled email dataset for the phishing drills

use serde::Serialize;

/// One labeled email
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhishingCase {
    pub id: u32,
    pub sender: &'static str,
    pub subject: &'static str,
    pub body: &'static str,
    pub is_phishing: bool,
    /// Red flags (or reassurances) in the order they are shown
    pub indicators: &'static [&'static str],
}

impl PhishingCase {
    pub fn verdict(&self) -> &'static str {
        if self.is_phishing {
            "PHISHING"
        } else {
            "SAFE"
        }
    }
}

/// The fixed dataset. Index 0 is phishing, index 1 is legitimate.
pub static PHISHING_CASES: [PhishingCase; 4] = [
    PhishingCase {
        id: 1,
        sender: "security@payp4l.com",
        subject: "Urgent: Verify Your Account Now!",
        body: "Your account has been suspended due to suspicious activity. Click here to verify: http://payp4l-security.com/verify",
        is_phishing: true,
        indicators: &["Suspicious domain (payp4l vs paypal)", "Urgent language", "Suspicious URL"],
    },
    PhishingCase {
        id: 2,
        sender: "notifications@github.com",
        subject: "Weekly repository digest",
        body: "Here's your weekly summary of activity on your repositories. View your dashboard for more details.",
        is_phishing: false,
        indicators: &["Legitimate sender", "Normal content", "No suspicious links"],
    },
    PhishingCase {
        id: 3,
        sender: "winner@lottery-prizes.net",
        subject: "🎉 Congratulations! You've Won $1,000,000!",
        body: "You've been selected as our lucky winner! Send us your bank details to claim your prize immediately!",
        is_phishing: true,
        indicators: &["Too good to be true", "Requests personal info", "Unknown sender"],
    },
    PhishingCase {
        id: 4,
        sender: "admin@company.com",
        subject: "IT Security Update",
        body: "Please update your password as part of our monthly security routine. Use the company portal as usual.",
        is_phishing: false,
        indicators: &["Internal sender", "Routine security", "No suspicious requests"],
    },
];

/// The whole dataset as a slice
pub fn phishing_cases() -> &'static [PhishingCase] {
    &PHISHING_CASES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_alternates_labels() {
        let labels: Vec<bool> = phishing_cases().iter().map(|c| c.is_phishing).collect();
        assert_eq!(labels, vec![true, false, true, false]);
    }

    #[test]
    fn every_case_has_three_indicators() {
        assert!(phishing_cases().iter().all(|c| c.indicators.len() == 3));
        assert_eq!(PHISHING_CASES[0].verdict(), "PHISHING");
        assert_eq!(PHISHING_CASES[1].verdict(), "SAFE");
    }
}
