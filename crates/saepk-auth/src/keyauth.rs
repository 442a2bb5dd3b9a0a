//! Canonical KeyAuth signing data.
//!
//! Both peers hash the same byte string to sign or verify KeyAuth:
//! `eleAP || eleSTA || scaAP || scaSTA || M || K_AP || AP-MAC || STA-MAC`.
//! Each side assembles it from its own view of the session, so the element
//! and scalar order flips with the local role while the addresses stay
//! AP-first.

use crate::session::SaePkSession;
use saepk_crypto::ec::put_fixed_be;
use saepk_crypto::hash;
use saepk_types::{SaePkError, ETH_ALEN};
use zeroize::Zeroizing;

/// Local role in the SAE exchange, deciding canonical data ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaeRole {
    Ap,
    Station,
}

/// Hash the canonical KeyAuth data for this session.
///
/// `modifier` and `ap_pubkey` are passed explicitly because the station
/// side hashes the received bytes exactly as they appeared on the wire.
pub fn keyauth_hash(
    session: &SaePkSession,
    hash_len: usize,
    role: SaeRole,
    modifier: &[u8],
    ap_pubkey: &[u8],
) -> Result<Vec<u8>, SaePkError> {
    let group = session
        .group
        .ok_or(SaePkError::NotConfigured("no ECC group in use"))?;
    let prime_len = group.prime_len();

    let own_element = session
        .own_commit_element
        .as_ref()
        .ok_or(SaePkError::NotConfigured("no own commit element"))?;
    let peer_element = session
        .peer_commit_element
        .as_ref()
        .ok_or(SaePkError::NotConfigured("no peer commit element"))?;
    let own_scalar = session
        .own_commit_scalar
        .as_deref()
        .ok_or(SaePkError::NotConfigured("no own commit scalar"))?;
    let peer_scalar = session
        .peer_commit_scalar
        .as_deref()
        .ok_or(SaePkError::NotConfigured("no peer commit scalar"))?;

    let (first_element, second_element, first_scalar, second_scalar) = match role {
        SaeRole::Ap => (own_element, peer_element, own_scalar, peer_scalar),
        SaeRole::Station => (peer_element, own_element, peer_scalar, own_scalar),
    };
    let (ap_addr, sta_addr) = match role {
        SaeRole::Ap => (&session.own_addr, &session.peer_addr),
        SaeRole::Station => (&session.peer_addr, &session.own_addr),
    };

    let mut data = Zeroizing::new(Vec::with_capacity(
        6 * prime_len + modifier.len() + ap_pubkey.len() + 2 * ETH_ALEN,
    ));
    first_element.write_coords(prime_len, &mut data)?;
    second_element.write_coords(prime_len, &mut data)?;
    put_fixed_be(&mut data, first_scalar, prime_len)?;
    put_fixed_be(&mut data, second_scalar, prime_len)?;
    data.extend_from_slice(modifier);
    data.extend_from_slice(ap_pubkey);
    data.extend_from_slice(ap_addr);
    data.extend_from_slice(sta_addr);

    hash::hash_by_len(hash_len, &data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use saepk_crypto::ec::EcPoint;
    use saepk_types::EcGroupId;

    fn ap_session() -> SaePkSession {
        let mut session = SaePkSession::new(b"net", [0xa0; 6], [0xb0; 6]);
        session.set_group(EcGroupId::P256);
        session.set_own_commit(&[0x01; 32], EcPoint::new(&[0x11; 32], &[0x12; 32]));
        session.set_peer_commit(&[0x02; 32], EcPoint::new(&[0x21; 32], &[0x22; 32]));
        session
    }

    fn sta_session() -> SaePkSession {
        let mut session = SaePkSession::new(b"net", [0xb0; 6], [0xa0; 6]);
        session.set_group(EcGroupId::P256);
        session.set_own_commit(&[0x02; 32], EcPoint::new(&[0x21; 32], &[0x22; 32]));
        session.set_peer_commit(&[0x01; 32], EcPoint::new(&[0x11; 32], &[0x12; 32]));
        session
    }

    #[test]
    fn test_role_symmetry() {
        let m = [0xee; 8];
        let pk = [0x30, 0x59, 0x01, 0x02];
        let ap = keyauth_hash(&ap_session(), 32, SaeRole::Ap, &m, &pk).unwrap();
        let sta = keyauth_hash(&sta_session(), 32, SaeRole::Station, &m, &pk).unwrap();
        assert_eq!(ap, sta);
    }

    #[test]
    fn test_any_field_changes_hash() {
        let m = [0xee; 8];
        let pk = [0x30, 0x59, 0x01, 0x02];
        let base = keyauth_hash(&ap_session(), 32, SaeRole::Ap, &m, &pk).unwrap();

        let mut bad_m = m;
        bad_m[0] ^= 1;
        assert_ne!(
            base,
            keyauth_hash(&ap_session(), 32, SaeRole::Ap, &bad_m, &pk).unwrap()
        );

        let mut bad_pk = pk;
        bad_pk[1] ^= 1;
        assert_ne!(
            base,
            keyauth_hash(&ap_session(), 32, SaeRole::Ap, &m, &bad_pk).unwrap()
        );

        let mut moved = ap_session();
        moved.peer_addr = [0xb1; 6];
        assert_ne!(
            base,
            keyauth_hash(&moved, 32, SaeRole::Ap, &m, &pk).unwrap()
        );

        let mut scalar = ap_session();
        scalar.set_own_commit(&[0x03; 32], EcPoint::new(&[0x11; 32], &[0x12; 32]));
        assert_ne!(
            base,
            keyauth_hash(&scalar, 32, SaeRole::Ap, &m, &pk).unwrap()
        );
    }

    #[test]
    fn test_missing_state_fails() {
        let mut session = SaePkSession::new(b"net", [0xa0; 6], [0xb0; 6]);
        session.set_group(EcGroupId::P256);
        assert!(matches!(
            keyauth_hash(&session, 32, SaeRole::Ap, &[0; 8], &[0; 4]),
            Err(SaePkError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_oversized_scalar_fails() {
        let mut session = ap_session();
        session.set_own_commit(&[0x01; 33], EcPoint::new(&[0x11; 32], &[0x12; 32]));
        assert!(keyauth_hash(&session, 32, SaeRole::Ap, &[0; 8], &[0; 4]).is_err());
    }
}
