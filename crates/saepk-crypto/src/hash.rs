//! Hash dispatch by output length.
//!
//! SAE-PK selects the hash function from the negotiated group: 32 bytes
//! means SHA-256, 48 bytes SHA-384, 64 bytes SHA-512. Nothing else is a
//! valid selector.

use saepk_types::SaePkError;
use sha2::{Digest, Sha256, Sha384, Sha512};

/// One-shot digest of `data` with the hash selected by `hash_len`.
pub fn hash_by_len(hash_len: usize, data: &[u8]) -> Result<Vec<u8>, SaePkError> {
    match hash_len {
        32 => Ok(Sha256::digest(data).to_vec()),
        48 => Ok(Sha384::digest(data).to_vec()),
        64 => Ok(Sha512::digest(data).to_vec()),
        _ => Err(SaePkError::CryptoFailure("unsupported hash length")),
    }
}
