//! Core logic units and the dashboard that ties them together

pub mod cipher;
pub mod defense;
pub mod lab;
pub mod password;
pub mod phishing;
pub mod random;
pub mod ticker;

use crate::config::AcademyConfig;
use crate::data::*;
use chrono::{DateTime, Utc};
use defense::DefenseSimulator;
use lab::EncryptionLab;
use phishing::PhishingSession;
use serde::Serialize;

/// A line in the activity feed
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    pub module: ModuleKind,
    pub message: String,
    pub xp: u32,
}

/// The academy dashboard: the player, the module catalogue and one live
/// session per module.
#[derive(Debug, Clone)]
pub struct Academy {
    pub player: Player,
    pub modules: Vec<TrainingModule>,
    pub lab: EncryptionLab,
    pub phishing: PhishingSession,
    pub defense: DefenseSimulator,
    pub activity: Vec<ActivityEntry>,
}

impl Academy {
    pub fn new(config: &AcademyConfig) -> Self {
        let p = &config.player;
        Self {
            player: Player::new(&p.name, p.level, p.xp, p.next_level_xp),
            modules: module_catalogue(),
            lab: EncryptionLab::new(config.lab.clone()),
            phishing: PhishingSession::new(),
            defense: DefenseSimulator::new(config.defense.clone()),
            activity: Vec::new(),
        }
    }

    pub fn module(&self, kind: ModuleKind) -> Option<&TrainingModule> {
        self.modules.iter().find(|m| m.kind == kind)
    }

    /// Open a locked module. Returns true if it was locked before.
    pub fn unlock_module(&mut self, kind: ModuleKind) -> bool {
        match self.modules.iter_mut().find(|m| m.kind == kind) {
            Some(module) if module.is_locked() => {
                module.status = ModuleStatus::Active;
                tracing::info!(module = kind.slug(), "Module unlocked");
                true
            }
            _ => false,
        }
    }

    /// Credit XP earned in a module and record it in the activity feed.
    /// Returns the number of levels gained.
    pub fn award(&mut self, module: ModuleKind, xp: u32, message: &str) -> u32 {
        let gained = self.player.award_xp(xp);
        self.activity.push(ActivityEntry {
            timestamp: Utc::now(),
            module,
            message: message.to_string(),
            xp,
        });
        if gained > 0 {
            tracing::info!(level = self.player.level, "Player levelled up");
        }
        gained
    }

    /// Score a password and credit its XP
    pub fn check_password(&mut self, password: &str) -> password::StrengthResult {
        let result = password::evaluate(password);
        let message = format!("Password rated {}", result.label);
        self.award(ModuleKind::PasswordChecker, result.xp, &message);
        result
    }

    /// Answer the current phishing email and credit the module reward on a
    /// perfect round
    pub fn answer_phishing(&mut self, user_says_safe: bool) -> Result<phishing::Judgement, crate::AcademyError> {
        let judgement = self.phishing.decide(user_says_safe)?;
        if self.phishing.is_perfect_round() && self.player.unlock_achievement(Achievement::PhishingExpert) {
            let reward = self
                .module(ModuleKind::PhishingSimulator)
                .map_or(0, |m| m.xp_reward);
            self.award(ModuleKind::PhishingSimulator, reward, "Spotted every phishing email");
        }
        Ok(judgement)
    }

    /// Decrypt in the lab; a clean round trip unlocks Crypto Master
    pub fn lab_decrypt(&mut self) -> u32 {
        let xp = self.lab.decrypt();
        if xp > 0 {
            self.award(ModuleKind::EncryptionLab, xp, "Decrypted a message");
            if self.lab.round_trip_ok() {
                self.player.unlock_achievement(Achievement::CryptoMaster);
            }
        }
        xp
    }

    pub fn lab_encrypt(&mut self) -> u32 {
        let xp = self.lab.encrypt();
        if xp > 0 {
            self.award(ModuleKind::EncryptionLab, xp, "Encrypted a message");
        }
        xp
    }

    pub fn total_xp_earned(&self) -> u32 {
        self.activity.iter().map(|a| a.xp).sum()
    }
}

impl Default for Academy {
    fn default() -> Self {
        Self::new(&AcademyConfig::default())
    }
}
