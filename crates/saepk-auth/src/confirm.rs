//! SAE-PK confirm element construction and validation.
//!
//! The AP appends a vendor specific element to its SAE confirm message:
//! the AES-SIV encrypted modifier, the AP public key as a FILS Public Key
//! sub-element, and the KeyAuth signature as a FILS Key Confirmation
//! sub-element. The station locates the element in the received confirm,
//! decrypts the modifier, checks the password fingerprint, and verifies
//! the signature.

use crate::buffer::ElementBuffer;
use crate::fingerprint::validate_fingerprint;
use crate::keyauth::{keyauth_hash, SaeRole};
use crate::session::SaePkSession;
use saepk_crypto::ec::EcPublicKey;
use saepk_crypto::siv;
use saepk_types::{
    SaePkError, EID_EXTENSION, EID_EXT_FILS_KEY_CONFIRM, EID_EXT_FILS_PUBLIC_KEY,
    EID_VENDOR_SPECIFIC, SAE_PK_ENCR_M_LEN, SAE_PK_IE_VENDOR_TYPE, SAE_PK_KEY_TYPE_ECDSA,
};

/// Largest inner payload: one-byte element length minus the vendor type.
/// Element fragmentation is out of scope, so anything bigger fails.
const MAX_INNER_LEN: usize = 255 - 4;

fn kek_usable(session: &SaePkSession) -> Result<&[u8], SaePkError> {
    let kek = session
        .kek
        .as_ref()
        .ok_or(SaePkError::NotConfigured("no KEK available for confirm"))?;
    if !matches!(kek.len(), 32 | 48 | 64) {
        return Err(SaePkError::NotConfigured("unsupported KEK length"));
    }
    Ok(kek.bytes())
}

/// AP role: build the SAE-PK element and append it to `buf`.
///
/// A session without a local AP credential is not advertising SAE-PK, so
/// this is a successful no-op.
pub fn write_confirm_element(
    session: &SaePkSession,
    buf: &mut ElementBuffer,
) -> Result<(), SaePkError> {
    let Some(credential) = session.credential.as_ref() else {
        return Ok(());
    };
    let kek = kek_usable(session)?;
    if session.group.is_none() {
        // Only ECC groups are supported for SAE-PK.
        return Err(SaePkError::NotConfigured("SAE commit did not use an ECC group"));
    }

    let hash_len = credential.group().hash_len();
    let digest = keyauth_hash(
        session,
        hash_len,
        SaeRole::Ap,
        credential.modifier(),
        credential.subject_public_key(),
    )?;
    let signature = credential.key().sign(&digest)?;

    // EncryptedModifier = AES-SIV-Q(M); no AAD.
    let encr_mod = siv::encrypt(kek, credential.modifier(), &[])?;

    let mut elem = ElementBuffer::new(MAX_INNER_LEN);
    elem.put_u8(SAE_PK_ENCR_M_LEN as u8)?;
    elem.put_bytes(&encr_mod)?;

    // FILS Public Key sub-element.
    let pubkey = credential.subject_public_key();
    elem.put_u8(EID_EXTENSION)?;
    elem.put_u8(sub_elem_len(2, pubkey.len())?)?;
    elem.put_u8(EID_EXT_FILS_PUBLIC_KEY)?;
    elem.put_u8(SAE_PK_KEY_TYPE_ECDSA)?;
    elem.put_bytes(pubkey)?;

    // FILS Key Confirmation sub-element (KeyAuth).
    elem.put_u8(EID_EXTENSION)?;
    elem.put_u8(sub_elem_len(1, signature.len())?)?;
    elem.put_u8(EID_EXT_FILS_KEY_CONFIRM)?;
    elem.put_bytes(&signature)?;

    if buf.tailroom() < 2 + 4 + elem.len() {
        return Err(SaePkError::CapacityExceeded {
            need: buf.len() + 2 + 4 + elem.len(),
            got: buf.len() + buf.tailroom(),
        });
    }

    buf.put_u8(EID_VENDOR_SPECIFIC)?;
    buf.put_u8((4 + elem.len()) as u8)?;
    buf.put_be32(SAE_PK_IE_VENDOR_TYPE)?;
    buf.put_bytes(elem.as_slice())?;
    Ok(())
}

fn sub_elem_len(header: usize, body: usize) -> Result<u8, SaePkError> {
    let len = header + body;
    u8::try_from(len).map_err(|_| SaePkError::CapacityExceeded { need: len, got: 255 })
}

/// Station role: locate and validate the SAE-PK element in the confirm IEs.
///
/// A session that is not using SAE-PK, or that has already accepted the AP
/// identity, succeeds without doing anything. On success the AP public key
/// is authenticated for this session; recording that acceptance is the
/// caller's responsibility.
pub fn check_confirm_element(session: &SaePkSession, ies: &[u8]) -> Result<(), SaePkError> {
    if !session.pk_enabled || session.ap_validated {
        return Ok(());
    }
    let kek = kek_usable(session)?;
    let negotiated = session
        .group
        .ok_or(SaePkError::NotConfigured("SAE commit did not use an ECC group"))?;

    let elem = find_vendor_element(ies, SAE_PK_IE_VENDOR_TYPE)
        .ok_or(SaePkError::MalformedInput("no SAE-PK element included"))?;

    if elem.len() < 1 + SAE_PK_ENCR_M_LEN {
        return Err(SaePkError::MalformedInput("no room for EncryptedModifier"));
    }
    if elem[0] as usize != SAE_PK_ENCR_M_LEN {
        return Err(SaePkError::MalformedInput("unexpected EncryptedModifier length"));
    }
    let encr_mod = &elem[1..1 + SAE_PK_ENCR_M_LEN];
    let mut pos = 1 + SAE_PK_ENCR_M_LEN;

    // FILS Public Key sub-element.
    if elem.len() - pos < 4
        || elem[pos] != EID_EXTENSION
        || elem[pos + 1] < 2
        || elem[pos + 1] as usize > elem.len() - pos - 2
        || elem[pos + 2] != EID_EXT_FILS_PUBLIC_KEY
    {
        return Err(SaePkError::MalformedInput("no FILS Public Key sub-element"));
    }
    if elem[pos + 3] != SAE_PK_KEY_TYPE_ECDSA {
        return Err(SaePkError::MalformedInput("unsupported public key type"));
    }
    let k_ap_len = elem[pos + 1] as usize - 2;
    let k_ap = &elem[pos + 4..pos + 4 + k_ap_len];
    pos += 2 + elem[pos + 1] as usize;

    // FILS Key Confirmation sub-element.
    if elem.len() - pos < 4
        || elem[pos] != EID_EXTENSION
        || elem[pos + 1] < 1
        || elem[pos + 1] as usize > elem.len() - pos - 2
        || elem[pos + 2] != EID_EXT_FILS_KEY_CONFIRM
    {
        return Err(SaePkError::MalformedInput("no FILS Key Confirmation sub-element"));
    }
    let key_auth_len = elem[pos + 1] as usize - 1;
    let key_auth = &elem[pos + 3..pos + 3 + key_auth_len];
    // Trailing bytes after the three fields are tolerated and ignored.

    let modifier = siv::decrypt(kek, encr_mod, &[])?;

    let key = EcPublicKey::from_subject_public_key(k_ap)?;
    let ap_group = key.group();

    validate_fingerprint(session, &modifier, k_ap, ap_group)?;

    // Alternative groups could be acceptable in principle, but only the
    // negotiated group is supported here.
    if ap_group != negotiated {
        return Err(SaePkError::GroupMismatch {
            ap_group: ap_group.ike_id(),
            negotiated: negotiated.ike_id(),
        });
    }

    let digest = keyauth_hash(session, ap_group.hash_len(), SaeRole::Station, &modifier, k_ap)?;
    key.verify(&digest, key_auth)?;
    Ok(())
}

/// Find the payload of the first vendor specific element carrying the
/// given type, skipping unrelated elements.
fn find_vendor_element(ies: &[u8], vendor_type: u32) -> Option<&[u8]> {
    let mut rest = ies;
    while rest.len() >= 2 {
        let len = rest[1] as usize;
        if rest.len() - 2 < len {
            return None;
        }
        let payload = &rest[2..2 + len];
        if rest[0] == EID_VENDOR_SPECIFIC
            && len >= 4
            && u32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]]) == vendor_type
        {
            return Some(&payload[4..]);
        }
        rest = &rest[2 + len..];
    }
    None
}
