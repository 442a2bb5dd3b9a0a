//! AP-side SAE-PK credential parsing.
//!
//! An AP operator provisions SAE-PK as a single text record of the form
//! `hex(M):base64(DER private key)`. Parsing yields the in-memory identity:
//! the modifier M, the private key, its derived SubjectPublicKeyInfo
//! encoding, and the curve group.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use saepk_crypto::ec::EcPrivateKey;
use saepk_types::{EcGroupId, SaePkError, SAE_PK_M_LEN};
use zeroize::{Zeroize, Zeroizing};

/// A parsed AP SAE-PK credential. Immutable once parsed; the modifier is
/// erased on drop.
pub struct SaePkCredential {
    modifier: [u8; SAE_PK_M_LEN],
    key: EcPrivateKey,
    pubkey: Vec<u8>,
    group: EcGroupId,
}

impl Drop for SaePkCredential {
    fn drop(&mut self) {
        self.modifier.zeroize();
    }
}

impl SaePkCredential {
    /// Parse a `hex(M):base64(DER private key)` record.
    pub fn parse(record: &str) -> Result<Self, SaePkError> {
        let (hex_m, key_b64) = record
            .split_once(':')
            .ok_or(SaePkError::MalformedInput("missing ':' separator"))?;

        if hex_m.len() % 2 != 0 {
            return Err(SaePkError::MalformedInput("odd modifier hex length"));
        }
        if hex_m.len() / 2 != SAE_PK_M_LEN {
            return Err(SaePkError::MalformedInput("unexpected modifier length"));
        }
        let mut modifier = [0u8; SAE_PK_M_LEN];
        for (i, out) in modifier.iter_mut().enumerate() {
            *out = u8::from_str_radix(&hex_m[2 * i..2 * i + 2], 16)
                .map_err(|_| SaePkError::MalformedInput("invalid modifier hex"))?;
        }

        let der = Zeroizing::new(
            BASE64
                .decode(key_b64)
                .map_err(|_| SaePkError::MalformedInput("invalid base64 private key"))?,
        );
        let key = EcPrivateKey::from_der(&der)?;
        let pubkey = key.subject_public_key()?;
        let group = key.group();

        Ok(SaePkCredential {
            modifier,
            key,
            pubkey,
            group,
        })
    }

    /// The modifier M.
    pub fn modifier(&self) -> &[u8] {
        &self.modifier
    }

    /// The private key.
    pub fn key(&self) -> &EcPrivateKey {
        &self.key
    }

    /// DER SubjectPublicKeyInfo encoding of the AP public key.
    pub fn subject_public_key(&self) -> &[u8] {
        &self.pubkey
    }

    /// The curve group of the key pair.
    pub fn group(&self) -> EcGroupId {
        self.group
    }
}
