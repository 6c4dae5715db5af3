//! Training module catalogue shown on the dashboard

use super::Difficulty;
use serde::{Deserialize, Serialize};

/// Which training module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    PasswordChecker,
    PhishingSimulator,
    EncryptionLab,
    FirewallDefense,
}

impl ModuleKind {
    pub fn slug(&self) -> &'static str {
        match self {
            ModuleKind::PasswordChecker => "password-checker",
            ModuleKind::PhishingSimulator => "phishing-sim",
            ModuleKind::EncryptionLab => "encryption-lab",
            ModuleKind::FirewallDefense => "attack-defense",
        }
    }
}

/// Whether the player can enter a module yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleStatus {
    Active,
    Locked,
}

/// A dashboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingModule {
    pub kind: ModuleKind,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub xp_reward: u32,
    pub status: ModuleStatus,
}

impl TrainingModule {
    fn new(
        kind: ModuleKind,
        title: &str,
        description: &str,
        difficulty: Difficulty,
        xp_reward: u32,
        status: ModuleStatus,
    ) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.to_string(),
            difficulty,
            xp_reward,
            status,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.status == ModuleStatus::Locked
    }
}

/// The four modules, in dashboard order. Only the password checker starts unlocked.
pub fn module_catalogue() -> Vec<TrainingModule> {
    vec![
        TrainingModule::new(
            ModuleKind::PasswordChecker,
            "Password Fortress",
            "Test password strength against cyber attacks",
            Difficulty::Beginner,
            150,
            ModuleStatus::Active,
        ),
        TrainingModule::new(
            ModuleKind::PhishingSimulator,
            "Phishing Hunter",
            "Detect malicious emails in the wild",
            Difficulty::Intermediate,
            300,
            ModuleStatus::Locked,
        ),
        TrainingModule::new(
            ModuleKind::EncryptionLab,
            "Crypto Lab",
            "Explore encryption algorithms",
            Difficulty::Advanced,
            500,
            ModuleStatus::Locked,
        ),
        TrainingModule::new(
            ModuleKind::FirewallDefense,
            "Firewall Defense",
            "Defend against brute force attacks",
            Difficulty::Expert,
            750,
            ModuleStatus::Locked,
        ),
    ]
}
