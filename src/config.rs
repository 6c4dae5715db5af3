//! Academy configuration
//!
//! Every field has a default matching the stock game, so an empty file
//! (or no file at all) yields the standard experience.

use crate::{AcademyError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config files larger than this are refused
const MAX_CONFIG_BYTES: u64 = 1_048_576;

/// How unblocked attacks damage the shield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamagePolicy {
    /// Each unblocked attack lands once and is then resolved
    #[default]
    OncePerEvent,
    /// Unblocked attacks land again on every tick they stay in the window
    EveryTick,
}

/// Firewall defense tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenseConfig {
    pub tick_interval_ms: u64,
    pub base_spawn_chance: f64,
    pub spawn_chance_per_level: f64,
    pub level_interval_secs: u32,
    pub window_size: usize,
    pub damage_factor: f64,
    /// Ticks an attack waits in the window before it can land
    pub grace_ticks: u32,
    pub damage_policy: DamagePolicy,
}

impl Default for DefenseConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            base_spawn_chance: 0.3,
            spawn_chance_per_level: 0.1,
            level_interval_secs: 30,
            window_size: 10,
            damage_factor: 0.1,
            grace_ticks: 1,
            damage_policy: DamagePolicy::OncePerEvent,
        }
    }
}

impl DefenseConfig {
    /// Repeated damage: no grace, every unblocked attack hits on every tick
    pub fn classic() -> Self {
        Self {
            grace_ticks: 0,
            damage_policy: DamagePolicy::EveryTick,
            ..Self::default()
        }
    }
}

/// Encryption lab tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub default_shift: i32,
    pub encode_xp: u32,
    pub decode_xp: u32,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            default_shift: 3,
            encode_xp: 50,
            decode_xp: 75,
        }
    }
}

/// Starting player profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    pub level: u32,
    pub xp: u32,
    pub next_level_xp: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Hacker".to_string(),
            level: 7,
            xp: 2450,
            next_level_xp: 3000,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcademyConfig {
    pub defense: DefenseConfig,
    pub lab: LabConfig,
    pub player: PlayerConfig,
}

impl AcademyConfig {
    /// Read and validate a YAML config file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AcademyError::Config(format!("Config file not found: {}", path.display())).into());
        }

        let metadata = std::fs::metadata(path)
            .with_context(|| format!("reading metadata of {}", path.display()))?;
        if metadata.len() > MAX_CONFIG_BYTES {
            return Err(AcademyError::Config("Config file exceeds 1MB limit".into()).into());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse and validate YAML text. Blank text gives the defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content).context("parsing config YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values make sense together
    pub fn validate(&self) -> std::result::Result<(), AcademyError> {
        let defense = &self.defense;
        if defense.window_size == 0 {
            return Err(AcademyError::Config("defense.window_size must be at least 1".into()));
        }
        if defense.grace_ticks as usize >= defense.window_size {
            return Err(AcademyError::Config(
                "defense.grace_ticks must be less than defense.window_size".into(),
            ));
        }
        if defense.level_interval_secs == 0 {
            return Err(AcademyError::Config("defense.level_interval_secs must be at least 1".into()));
        }
        for (name, value) in [
            ("defense.base_spawn_chance", defense.base_spawn_chance),
            ("defense.spawn_chance_per_level", defense.spawn_chance_per_level),
            ("defense.damage_factor", defense.damage_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AcademyError::Config(format!("{name} must be a non-negative number")));
            }
        }
        if !(1..=25).contains(&self.lab.default_shift) {
            return Err(AcademyError::Config("lab.default_shift must be between 1 and 25".into()));
        }
        if self.player.next_level_xp == 0 {
            return Err(AcademyError::Config("player.next_level_xp must be at least 1".into()));
        }
        Ok(())
    }
}
