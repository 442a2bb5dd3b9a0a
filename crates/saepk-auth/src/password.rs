//! SAE-PK password model.
//!
//! A password is only usable for SAE-PK when it has the expected shape:
//! blocks of four base32 characters separated by hyphens, at least nine
//! characters in total. The decoded bytes and the `lambda` parameter (the
//! number of non-separator characters) feed the fingerprint check.

use crate::base32;
use saepk_types::SaePkError;
use zeroize::Zeroize;

/// Check whether a password has valid SAE-PK syntax.
///
/// Shorter passwords do not meet the minimum required resistance to
/// preimage attacks and are not considered usable for SAE-PK.
pub fn valid_password(pw: &str) -> bool {
    if pw.len() < 9 {
        return false;
    }
    for (pos, byte) in pw.bytes().enumerate() {
        if pos % 5 == 4 {
            if byte != b'-' {
                return false;
            }
            continue;
        }
        if !base32::BASE32_ALPHABET.contains(&byte) {
            return false;
        }
    }
    !pw.ends_with('-')
}

/// A configured SAE-PK password: decoded bytes plus the derived lambda.
///
/// The decoded bytes are secret material and are erased on drop.
pub struct SaePassword {
    bytes: Vec<u8>,
    lambda: usize,
}

impl Drop for SaePassword {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl SaePassword {
    /// Decode a password string into its SAE-PK form.
    ///
    /// Rejects anything failing [`valid_password`]: the decoder skips
    /// characters outside the alphabet, so lambda and the decoded bytes
    /// only line up for a syntactically valid password.
    pub fn new(pw: &str) -> Result<Self, SaePkError> {
        if pw.is_empty() {
            return Err(SaePkError::MalformedInput("empty password"));
        }
        if !valid_password(pw) {
            return Err(SaePkError::MalformedInput("invalid password syntax"));
        }
        let bytes = base32::decode(pw)?;
        if bytes.is_empty() {
            return Err(SaePkError::MalformedInput("password decodes to nothing"));
        }
        let lambda = pw.len() - pw.len() / 5;
        Ok(SaePassword { bytes, lambda })
    }

    /// The decoded password bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Count of non-separator characters in the textual form.
    pub fn lambda(&self) -> usize {
        self.lambda
    }
}
