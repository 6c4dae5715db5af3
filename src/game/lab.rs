//! The encryption lab: a scratchpad around the cipher engine that awards
//! XP for each encode and decode.

use super::cipher::{self, CipherMethod, Direction};
use crate::config::LabConfig;
use crate::AcademyError;
use serde::Serialize;

/// Somewhere transformed text can be copied to
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), AcademyError>;
}

/// In-process clipboard
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), AcademyError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Which lab output to copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabOutput {
    Encrypted,
    Decrypted,
}

/// Method picker in the lab. The Caesar shift is held separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LabMethod {
    Caesar,
    Base64,
    Rot13,
}

#[derive(Debug, Clone, Serialize)]
pub struct EncryptionLab {
    pub input: String,
    pub encrypted: String,
    pub decrypted: String,
    pub method: LabMethod,
    pub shift: i32,
    pub xp_earned: u32,
    #[serde(skip)]
    config: LabConfig,
}

impl EncryptionLab {
    pub fn new(config: LabConfig) -> Self {
        Self {
            input: String::new(),
            encrypted: String::new(),
            decrypted: String::new(),
            method: LabMethod::Caesar,
            shift: config.default_shift.clamp(1, 25),
            xp_earned: 0,
            config,
        }
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    pub fn set_method(&mut self, method: LabMethod) {
        self.method = method;
    }

    /// Clamped to 1-25
    pub fn set_shift(&mut self, shift: i32) {
        self.shift = shift.clamp(1, 25);
    }

    pub fn cipher_method(&self) -> CipherMethod {
        match self.method {
            LabMethod::Caesar => CipherMethod::Caesar(self.shift),
            LabMethod::Base64 => CipherMethod::Base64,
            LabMethod::Rot13 => CipherMethod::Rot13,
        }
    }

    /// Transform the input. Returns the XP awarded, 0 if there was no input.
    pub fn encrypt(&mut self) -> u32 {
        if self.input.is_empty() {
            return 0;
        }
        self.encrypted = cipher::transform_or_sentinel(&self.input, self.cipher_method(), Direction::Encode);
        self.xp_earned += self.config.encode_xp;
        self.config.encode_xp
    }

    /// Reverse the last encryption. Returns the XP awarded, 0 if there was
    /// nothing to decrypt.
    pub fn decrypt(&mut self) -> u32 {
        if self.encrypted.is_empty() {
            return 0;
        }
        self.decrypted = cipher::transform_or_sentinel(&self.encrypted, self.cipher_method(), Direction::Decode);
        self.xp_earned += self.config.decode_xp;
        self.config.decode_xp
    }

    /// Did the last decrypt reproduce the input?
    pub fn round_trip_ok(&self) -> bool {
        !self.input.is_empty() && self.decrypted == self.input
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.encrypted.clear();
        self.decrypted.clear();
        self.xp_earned = 0;
    }

    /// Copy an output to the clipboard. Empty outputs are not copied.
    pub fn copy_to(&self, clipboard: &mut dyn Clipboard, which: LabOutput) -> Result<(), AcademyError> {
        let text = match which {
            LabOutput::Encrypted => &self.encrypted,
            LabOutput::Decrypted => &self.decrypted,
        };
        if text.is_empty() {
            return Err(AcademyError::Clipboard("nothing to copy".into()));
        }
        clipboard.write_text(text)
    }
}

impl Default for EncryptionLab {
    fn default() -> Self {
        Self::new(LabConfig::default())
    }
}
