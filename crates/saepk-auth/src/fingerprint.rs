//! AP public key fingerprint validation.
//!
//! The password commits to the AP public key through
//! `Fingerprint = L(Hash(SSID || M || K_AP), 0, 8*Sec + 5*Lambda - 2)`.
//! `Sec` is encoded in the top two bits of the first password byte and the
//! remaining password bits, shifted left by two, must match the hash after
//! `Sec` leading zero bytes. The bit-count formula and the `Sec` extraction
//! follow the protocol definition exactly.

use crate::session::SaePkSession;
use saepk_crypto::hash;
use saepk_types::{EcGroupId, SaePkError};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Validate the AP public key fingerprint against the session password.
///
/// `ap_pubkey` is the DER SubjectPublicKeyInfo exactly as received. Fails
/// closed when no password is configured.
pub fn validate_fingerprint(
    session: &SaePkSession,
    modifier: &[u8],
    ap_pubkey: &[u8],
    group: EcGroupId,
) -> Result<(), SaePkError> {
    let password = session
        .password
        .as_ref()
        .ok_or(SaePkError::NotConfigured("no password for fingerprint check"))?;
    let pw = password.bytes();
    let hash_len = group.hash_len();

    let mut data = Zeroizing::new(Vec::with_capacity(
        session.ssid.len() + modifier.len() + ap_pubkey.len(),
    ));
    data.extend_from_slice(&session.ssid);
    data.extend_from_slice(modifier);
    data.extend_from_slice(ap_pubkey);
    let mut digest = hash::hash_by_len(hash_len, &data)?;

    let sec = usize::from(pw[0] >> 6) + 2;
    let fingerprint_bits = 8 * sec + 5 * password.lambda() - 2;
    if fingerprint_bits > hash_len * 8 {
        return Err(SaePkError::CapacityExceeded {
            need: fingerprint_bits,
            got: hash_len * 8,
        });
    }
    let fingerprint_bytes = fingerprint_bits.div_ceil(8);

    // Zero out the bits past the fingerprint in the last octet.
    if fingerprint_bits % 8 != 0 {
        let extra = 8 - fingerprint_bits % 8;
        let last = &mut digest[fingerprint_bits / 8];
        *last = (*last >> extra) << extra;
    }

    // Expected pattern: Sec zero bytes, then the password bytes shifted
    // left by two (dropping the Sec selector bits).
    let mut expected = Zeroizing::new(vec![0u8; sec + pw.len()]);
    for i in 0..pw.len() {
        let next = if i + 1 < pw.len() { pw[i + 1] } else { 0 };
        expected[sec + i] = pw[i] << 2 | next >> 6;
    }

    let matches: bool = digest[..fingerprint_bytes]
        .ct_eq(&expected[..fingerprint_bytes])
        .into();
    if !matches {
        return Err(SaePkError::FingerprintMismatch);
    }
    Ok(())
}
