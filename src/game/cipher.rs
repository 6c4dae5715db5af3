//! Toy text transforms: Caesar shift, ROT13 and Base64
//!
//! None of these are encryption in any real sense. They exist to show how
//! simple substitution and encoding work.

use crate::AcademyError;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Text shown in place of a decode result when the input is not Base64
pub const INVALID_BASE64: &str = "Invalid Base64";

/// Standard alphabet, padding optional on decode
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Which transform to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CipherMethod {
    /// Shift letters by the given amount. Intended range is 1-25; other
    /// values are reduced modulo 26.
    Caesar(i32),
    Rot13,
    Base64,
}

impl CipherMethod {
    pub fn name(&self) -> &'static str {
        match self {
            CipherMethod::Caesar(_) => "Caesar Cipher",
            CipherMethod::Rot13 => "ROT13",
            CipherMethod::Base64 => "Base64",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CipherMethod::Caesar(_) => "Classic shift cipher",
            CipherMethod::Rot13 => "Simple letter substitution",
            CipherMethod::Base64 => "Encoding algorithm",
        }
    }

    /// Parse a method name as typed on the command line
    pub fn parse(name: &str, shift: i32) -> Result<Self, AcademyError> {
        match name.to_ascii_lowercase().as_str() {
            "caesar" => Ok(CipherMethod::Caesar(shift)),
            "rot13" => Ok(CipherMethod::Rot13),
            "base64" => Ok(CipherMethod::Base64),
            other => Err(AcademyError::UnknownMethod(other.to_string())),
        }
    }
}

/// Transform direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Encode,
    Decode,
}

/// Apply `method` to `text`.
///
/// Only a Base64 decode can fail, with [`AcademyError::InvalidBase64`].
pub fn transform(text: &str, method: CipherMethod, direction: Direction) -> Result<String, AcademyError> {
    match (method, direction) {
        (CipherMethod::Caesar(shift), Direction::Encode) => Ok(caesar(text, shift)),
        (CipherMethod::Caesar(shift), Direction::Decode) => Ok(caesar(text, 26 - shift.rem_euclid(26))),
        (CipherMethod::Rot13, _) => Ok(rot13(text)),
        (CipherMethod::Base64, Direction::Encode) => Ok(base64_encode(text)),
        (CipherMethod::Base64, Direction::Decode) => base64_decode(text),
    }
}

/// Like [`transform`], but a failed decode yields [`INVALID_BASE64`]
pub fn transform_or_sentinel(text: &str, method: CipherMethod, direction: Direction) -> String {
    transform(text, method, direction).unwrap_or_else(|_| INVALID_BASE64.to_string())
}

/// Rotate ASCII letters within their case. Everything else passes through.
pub fn caesar(text: &str, shift: i32) -> String {
    let shift = shift.rem_euclid(26) as u8;
    text.chars()
        .map(|c| {
            let base = if c.is_ascii_uppercase() {
                b'A'
            } else if c.is_ascii_lowercase() {
                b'a'
            } else {
                return c;
            };
            (((c as u8 - base + shift) % 26) + base) as char
        })
        .collect()
}

/// Caesar with a fixed shift of 13. Its own inverse.
pub fn rot13(text: &str) -> String {
    caesar(text, 13)
}

/// Base64 of the UTF-8 bytes
pub fn base64_encode(text: &str) -> String {
    BASE64.encode(text.as_bytes())
}

/// Reverse [`base64_encode`]. ASCII whitespace is ignored; the decoded
/// bytes must be valid UTF-8.
pub fn base64_decode(text: &str) -> Result<String, AcademyError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|_| AcademyError::InvalidBase64)?;
    String::from_utf8(bytes).map_err(|_| AcademyError::InvalidBase64)
}
