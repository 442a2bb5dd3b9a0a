//! ECDSA key handling for SAE-PK.
//!
//! Wraps the NIST P-256 / P-384 / P-521 curve implementations behind the
//! small capability SAE-PK needs: parse a DER private key, derive the
//! SubjectPublicKeyInfo encoding, sign and verify a precomputed digest,
//! and serialize commit points and scalars at the fixed field width.

use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey};
use saepk_types::{EcGroupId, SaePkError};

/// An elliptic curve private key usable for SAE-PK KeyAuth signing.
///
/// Key material is owned by the curve crates and zeroized on drop.
pub enum EcPrivateKey {
    P256(p256::SecretKey),
    P384(p384::SecretKey),
    P521(p521::SecretKey),
}

impl EcPrivateKey {
    /// Parse a DER private key, accepting SEC1 ECPrivateKey or PKCS#8.
    ///
    /// The curve is taken from the key's own parameters; anything outside
    /// the three supported groups fails.
    pub fn from_der(der: &[u8]) -> Result<Self, SaePkError> {
        if let Ok(key) = p256::SecretKey::from_sec1_der(der) {
            return Ok(EcPrivateKey::P256(key));
        }
        if let Ok(key) = p384::SecretKey::from_sec1_der(der) {
            return Ok(EcPrivateKey::P384(key));
        }
        if let Ok(key) = p521::SecretKey::from_sec1_der(der) {
            return Ok(EcPrivateKey::P521(key));
        }
        if let Ok(key) = p256::SecretKey::from_pkcs8_der(der) {
            return Ok(EcPrivateKey::P256(key));
        }
        if let Ok(key) = p384::SecretKey::from_pkcs8_der(der) {
            return Ok(EcPrivateKey::P384(key));
        }
        if let Ok(key) = p521::SecretKey::from_pkcs8_der(der) {
            return Ok(EcPrivateKey::P521(key));
        }
        Err(SaePkError::CryptoFailure("private key parse"))
    }

    /// The curve group this key lives on.
    pub fn group(&self) -> EcGroupId {
        match self {
            EcPrivateKey::P256(_) => EcGroupId::P256,
            EcPrivateKey::P384(_) => EcGroupId::P384,
            EcPrivateKey::P521(_) => EcGroupId::P521,
        }
    }

    /// DER SubjectPublicKeyInfo encoding of the public key.
    pub fn subject_public_key(&self) -> Result<Vec<u8>, SaePkError> {
        let doc = match self {
            EcPrivateKey::P256(key) => key.public_key().to_public_key_der(),
            EcPrivateKey::P384(key) => key.public_key().to_public_key_der(),
            EcPrivateKey::P521(key) => key.public_key().to_public_key_der(),
        };
        doc.map(|d| d.as_bytes().to_vec())
            .map_err(|_| SaePkError::CryptoFailure("public key encode"))
    }

    /// ECDSA-sign a precomputed digest, returning the DER signature.
    pub fn sign(&self, digest: &[u8]) -> Result<Vec<u8>, SaePkError> {
        let sig = match self {
            EcPrivateKey::P256(key) => {
                let signer = p256::ecdsa::SigningKey::from(key);
                let sig: p256::ecdsa::Signature = signer
                    .sign_prehash(digest)
                    .map_err(|_| SaePkError::CryptoFailure("ecdsa sign"))?;
                sig.to_der().as_bytes().to_vec()
            }
            EcPrivateKey::P384(key) => {
                let signer = p384::ecdsa::SigningKey::from(key);
                let sig: p384::ecdsa::Signature = signer
                    .sign_prehash(digest)
                    .map_err(|_| SaePkError::CryptoFailure("ecdsa sign"))?;
                sig.to_der().as_bytes().to_vec()
            }
            EcPrivateKey::P521(key) => {
                // p521's SigningKey is a wrapper without a From<&SecretKey>
                // impl, so it is built from the scalar bytes instead.
                let signer = p521::ecdsa::SigningKey::from_bytes(&key.to_bytes())
                    .map_err(|_| SaePkError::CryptoFailure("ecdsa sign"))?;
                let sig: p521::ecdsa::Signature = signer
                    .sign_prehash(digest)
                    .map_err(|_| SaePkError::CryptoFailure("ecdsa sign"))?;
                sig.to_der().as_bytes().to_vec()
            }
        };
        Ok(sig)
    }
}

/// An elliptic curve public key parsed from a received SAE-PK element.
pub enum EcPublicKey {
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
    P521(p521::ecdsa::VerifyingKey),
}

impl EcPublicKey {
    /// Parse a DER SubjectPublicKeyInfo, detecting the curve from the
    /// algorithm parameters.
    pub fn from_subject_public_key(der: &[u8]) -> Result<Self, SaePkError> {
        if let Ok(key) = p256::PublicKey::from_public_key_der(der) {
            return Ok(EcPublicKey::P256(p256::ecdsa::VerifyingKey::from(&key)));
        }
        if let Ok(key) = p384::PublicKey::from_public_key_der(der) {
            return Ok(EcPublicKey::P384(p384::ecdsa::VerifyingKey::from(&key)));
        }
        if let Ok(key) = p521::PublicKey::from_public_key_der(der) {
            let key = p521::ecdsa::VerifyingKey::from_affine(*key.as_affine())
                .map_err(|_| SaePkError::CryptoFailure("public key parse"))?;
            return Ok(EcPublicKey::P521(key));
        }
        Err(SaePkError::CryptoFailure("public key parse"))
    }

    /// The curve group this key lives on.
    pub fn group(&self) -> EcGroupId {
        match self {
            EcPublicKey::P256(_) => EcGroupId::P256,
            EcPublicKey::P384(_) => EcGroupId::P384,
            EcPublicKey::P521(_) => EcGroupId::P521,
        }
    }

    /// Verify a DER ECDSA signature over a precomputed digest.
    pub fn verify(&self, digest: &[u8], signature: &[u8]) -> Result<(), SaePkError> {
        let bad_sig = SaePkError::CryptoFailure("invalid KeyAuth signature");
        match self {
            EcPublicKey::P256(key) => {
                let sig = p256::ecdsa::Signature::from_der(signature).map_err(|_| bad_sig)?;
                key.verify_prehash(digest, &sig)
                    .map_err(|_| SaePkError::CryptoFailure("invalid KeyAuth signature"))
            }
            EcPublicKey::P384(key) => {
                let sig = p384::ecdsa::Signature::from_der(signature).map_err(|_| bad_sig)?;
                key.verify_prehash(digest, &sig)
                    .map_err(|_| SaePkError::CryptoFailure("invalid KeyAuth signature"))
            }
            EcPublicKey::P521(key) => {
                let sig = p521::ecdsa::Signature::from_der(signature).map_err(|_| bad_sig)?;
                key.verify_prehash(digest, &sig)
                    .map_err(|_| SaePkError::CryptoFailure("invalid KeyAuth signature"))
            }
        }
    }
}

/// A commit element as affine big-endian coordinates.
///
/// The SAE commit machinery owns the curve arithmetic; SAE-PK only needs
/// to serialize the point at the fixed field width of the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcPoint {
    x: Vec<u8>,
    y: Vec<u8>,
}

impl EcPoint {
    /// Wrap big-endian affine coordinates.
    pub fn new(x: &[u8], y: &[u8]) -> Self {
        EcPoint {
            x: x.to_vec(),
            y: y.to_vec(),
        }
    }

    /// Append `x || y`, each left-padded to `prime_len` bytes.
    pub fn write_coords(&self, prime_len: usize, out: &mut Vec<u8>) -> Result<(), SaePkError> {
        put_fixed_be(out, &self.x, prime_len)?;
        put_fixed_be(out, &self.y, prime_len)
    }
}

/// Append a big-endian integer left-padded to `width` bytes.
///
/// Fails when the value does not fit, which indicates a commit value that
/// cannot belong to the negotiated group.
pub fn put_fixed_be(out: &mut Vec<u8>, bytes: &[u8], width: usize) -> Result<(), SaePkError> {
    let mut value = bytes;
    while value.len() > width && value[0] == 0 {
        value = &value[1..];
    }
    if value.len() > width {
        return Err(SaePkError::CryptoFailure("value exceeds field width"));
    }
    out.resize(out.len() + width - value.len(), 0);
    out.extend_from_slice(value);
    Ok(())
}
