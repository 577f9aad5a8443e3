//! Opaque capability tokens.
//!
//! A capability token grants access by possession alone. Tokens are
//! [`CAPABILITY_TOKEN_BYTES`] bytes from the operating system CSPRNG,
//! hex-encoded.

use rand::rngs::OsRng;
use rand::TryRngCore;
use thiserror::Error;

/// Random bytes per token (96 bits of entropy).
pub const CAPABILITY_TOKEN_BYTES: usize = 12;

/// Length of an encoded token.
pub const CAPABILITY_TOKEN_LENGTH: usize = CAPABILITY_TOKEN_BYTES * 2;

/// Error type for capability token generation.
#[derive(Debug, Clone, Error)]
pub enum CapabilityError {
    #[error("Random source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Generate a new capability token.
///
/// # Returns
/// Lowercase hex string of `CAPABILITY_TOKEN_LENGTH` characters
///
/// # Errors
/// * `EntropyUnavailable` - The OS random source failed
pub fn generate_token() -> Result<String, CapabilityError> {
    let mut bytes = [0u8; CAPABILITY_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CapabilityError::EntropyUnavailable(e.to_string()))?;

    Ok(hex::encode(bytes))
}

/// Check that a string has the shape of a generated token.
pub fn is_well_formed(token: &str) -> bool {
    token.len() == CAPABILITY_TOKEN_LENGTH
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
