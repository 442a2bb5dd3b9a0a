/// SAE-PK operation errors.
///
/// Every variant is non-fatal to the surrounding SAE exchange: a failed
/// parse or verification rejects the current authentication attempt and
/// leaves the session state intact for a fresh attempt or a graceful abort.
#[derive(Debug, thiserror::Error)]
pub enum SaePkError {
    /// Bad password syntax, truncated or oversized wire element, or an
    /// invalid hex/base64 text record.
    #[error("malformed input: {0}")]
    MalformedInput(&'static str),

    /// Key parse, sign, verify, encrypt/decrypt, or hash failure, including
    /// ones caused by an unsupported group or key size.
    #[error("crypto failure: {0}")]
    CryptoFailure(&'static str),

    /// The AP public key fingerprint does not match the configured password.
    #[error("public key fingerprint mismatch")]
    FingerprintMismatch,

    /// The AP public key lives on a different curve than the negotiated
    /// SAE group. Cross-group acceptance is out of scope.
    #[error("group mismatch: AP key group {ap_group}, negotiated group {negotiated}")]
    GroupMismatch { ap_group: u16, negotiated: u16 },

    /// Insufficient room in an output buffer, or insufficient hash bits for
    /// the fingerprint length required by the password.
    #[error("capacity exceeded: need {need}, got {got}")]
    CapacityExceeded { need: usize, got: usize },

    /// Operation attempted without a required password, key, or derived key.
    #[error("not configured: {0}")]
    NotConfigured(&'static str),
}
