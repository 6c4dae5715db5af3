//! Player state and progression

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// XP added to the level-up threshold every time the player levels up
pub const THRESHOLD_STEP: u32 = 500;

/// Achievement IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    FirstPassword,      // Score a first password
    SecurityNovice,     // Finish onboarding
    PhishingExpert,     // Spot every email in the dataset
    CryptoMaster,       // Round-trip a message through the lab
}

impl Achievement {
    pub const ALL: [Achievement; 4] = [
        Achievement::FirstPassword,
        Achievement::SecurityNovice,
        Achievement::PhishingExpert,
        Achievement::CryptoMaster,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Achievement::FirstPassword => "First Password",
            Achievement::SecurityNovice => "Security Novice",
            Achievement::PhishingExpert => "Phishing Expert",
            Achievement::CryptoMaster => "Crypto Master",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Achievement::FirstPassword => "🔐",
            Achievement::SecurityNovice => "🛡️",
            Achievement::PhishingExpert => "🎣",
            Achievement::CryptoMaster => "🔒",
        }
    }
}

/// The player profile shown on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub level: u32,
    pub xp: u32,
    pub next_level_xp: u32,
    pub achievements: HashSet<Achievement>,
}

impl Player {
    pub fn new(name: &str, level: u32, xp: u32, next_level_xp: u32) -> Self {
        let mut achievements = HashSet::new();
        achievements.insert(Achievement::FirstPassword);
        achievements.insert(Achievement::SecurityNovice);

        Self {
            name: name.to_string(),
            level: level.max(1),
            xp,
            next_level_xp: next_level_xp.max(1),
            achievements,
        }
    }

    /// Add XP, levelling up as many times as the total allows.
    /// Returns the number of levels gained.
    /// The threshold stops rising once another step would overflow.
    pub fn award_xp(&mut self, amount: u32) -> u32 {
        self.xp = self.xp.saturating_add(amount);
        if self.xp < self.next_level_xp {
            return 0;
        }
        let crossed = (self.xp - self.next_level_xp) / THRESHOLD_STEP + 1;
        let headroom = (u32::MAX - self.next_level_xp) / THRESHOLD_STEP;
        let gained = crossed.min(headroom);
        self.level = self.level.saturating_add(gained);
        self.next_level_xp += gained * THRESHOLD_STEP;
        gained
    }

    /// Progress towards the next level, 0-100
    pub fn progress_percent(&self) -> f64 {
        (self.xp as f64 / self.next_level_xp as f64 * 100.0).min(100.0)
    }

    /// Unlock an achievement
    pub fn unlock_achievement(&mut self, achievement: Achievement) -> bool {
        self.achievements.insert(achievement)
    }

    /// Check if player has achievement
    pub fn has_achievement(&self, achievement: Achievement) -> bool {
        self.achievements.contains(&achievement)
    }

    /// Rank title for the dashboard header
    pub fn title(&self) -> String {
        format!("Level {} Hacker", self.level)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new("Hacker", 7, 2450, 3000)
    }
}
