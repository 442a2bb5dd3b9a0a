//! Elliptic curve group identifiers for SAE-PK.

/// An elliptic curve group usable for SAE-PK.
///
/// SAE-PK supports the three NIST groups from the IANA "Group Description"
/// registry. The group fixes both the field width used when serializing
/// commit scalars and elements and the hash length of the fingerprint and
/// KeyAuth computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcGroupId {
    /// Group 19, NIST P-256.
    P256,
    /// Group 20, NIST P-384.
    P384,
    /// Group 21, NIST P-521.
    P521,
}

impl EcGroupId {
    /// Look up a group by its IANA group description id.
    pub fn from_ike_id(id: u16) -> Option<Self> {
        match id {
            19 => Some(EcGroupId::P256),
            20 => Some(EcGroupId::P384),
            21 => Some(EcGroupId::P521),
            _ => None,
        }
    }

    /// The IANA group description id.
    pub fn ike_id(self) -> u16 {
        match self {
            EcGroupId::P256 => 19,
            EcGroupId::P384 => 20,
            EcGroupId::P521 => 21,
        }
    }

    /// Hash output length in bytes used with this group.
    pub fn hash_len(self) -> usize {
        match self {
            EcGroupId::P256 => 32,
            EcGroupId::P384 => 48,
            EcGroupId::P521 => 64,
        }
    }

    /// Width in bytes of a field element (and of a commit scalar).
    pub fn prime_len(self) -> usize {
        match self {
            EcGroupId::P256 => 32,
            EcGroupId::P384 => 48,
            EcGroupId::P521 => 66,
        }
    }
}
