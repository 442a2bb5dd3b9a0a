//! Integration tests for the SAE-PK crates.
//! Full AP-writes, station-verifies confirm element exchanges.

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;
    use saepk_auth::base32;
    use saepk_auth::buffer::ElementBuffer;
    use saepk_auth::confirm::{check_confirm_element, write_confirm_element};
    use saepk_auth::credential::SaePkCredential;
    use saepk_auth::password::SaePassword;
    use saepk_auth::session::SaePkSession;
    use saepk_crypto::ec::EcPoint;
    use saepk_crypto::hash::hash_by_len;
    use saepk_types::{EcGroupId, SaePkError};

    const SSID: &[u8] = b"SAE-PK interop";
    const AP_ADDR: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];
    const STA_ADDR: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x02];
    const KEK: [u8; 32] = [0x7e; 32];

    /// Deterministic P-256 AP key pair for the whole module.
    fn ap_key_der() -> Vec<u8> {
        let secret = p256::SecretKey::from_slice(&[0x42; 32]).unwrap();
        secret.to_sec1_der().unwrap().as_slice().to_vec()
    }

    /// Search for a modifier whose fingerprint hash has two leading zero
    /// bytes (Sec = 2), then derive the 19-character password the hash
    /// commits to. This is the credential generation side of the protocol.
    fn provision(spki: &[u8]) -> ([u8; 8], String) {
        for counter in 0u64.. {
            let modifier = counter.to_be_bytes();
            let mut data = SSID.to_vec();
            data.extend_from_slice(&modifier);
            data.extend_from_slice(spki);
            let digest = hash_by_len(32, &data).unwrap();
            if digest[0] != 0 || digest[1] != 0 {
                continue;
            }
            let mut pw = [0u8; 10];
            pw[0] = digest[2] >> 2;
            for i in 1..10 {
                pw[i] = digest[i + 1] << 6 | digest[i + 2] >> 2;
            }
            return (modifier, base32::encode(&pw, 80).unwrap());
        }
        unreachable!();
    }

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    fn credential() -> (SaePkCredential, String) {
        let key_der = ap_key_der();
        let spki = saepk_crypto::ec::EcPrivateKey::from_der(&key_der)
            .unwrap()
            .subject_public_key()
            .unwrap();
        let (modifier, password) = provision(&spki);
        let record = format!("{}:{}", hex(&modifier), BASE64.encode(&key_der));
        (SaePkCredential::parse(&record).unwrap(), password)
    }

    fn ap_session(cred: SaePkCredential) -> SaePkSession {
        let mut session = SaePkSession::new(SSID, AP_ADDR, STA_ADDR);
        session.set_group(EcGroupId::P256);
        session.set_own_commit(&[0x11; 32], EcPoint::new(&[0x21; 32], &[0x22; 32]));
        session.set_peer_commit(&[0x33; 32], EcPoint::new(&[0x43; 32], &[0x44; 32]));
        session.set_kek(&KEK);
        session.set_credential(cred);
        session
    }

    fn sta_session(password: &str) -> SaePkSession {
        let mut session = SaePkSession::new(SSID, STA_ADDR, AP_ADDR);
        session.set_group(EcGroupId::P256);
        session.set_own_commit(&[0x33; 32], EcPoint::new(&[0x43; 32], &[0x44; 32]));
        session.set_peer_commit(&[0x11; 32], EcPoint::new(&[0x21; 32], &[0x22; 32]));
        session.set_kek(&KEK);
        session.set_password(SaePassword::new(password).unwrap());
        session.enable_pk();
        session
    }

    fn written_element() -> (Vec<u8>, String) {
        let (cred, password) = credential();
        let ap = ap_session(cred);
        let mut buf = ElementBuffer::new(512);
        write_confirm_element(&ap, &mut buf).unwrap();
        (buf.into_vec(), password)
    }

    // -------------------------------------------------------
    // 1. Full exchange: AP writes, station accepts
    // -------------------------------------------------------
    #[test]
    fn test_exchange_accepted() {
        let (ies, password) = written_element();
        let sta = sta_session(&password);
        check_confirm_element(&sta, &ies).unwrap();
    }

    #[test]
    fn test_exchange_accepted_with_preceding_elements() {
        let (ies, password) = written_element();
        // SSID element ahead of the SAE-PK one.
        let mut full = vec![0x00, 0x03, b'n', b'e', b't'];
        full.extend_from_slice(&ies);
        let sta = sta_session(&password);
        check_confirm_element(&sta, &full).unwrap();
    }

    // -------------------------------------------------------
    // 2. Element framing
    // -------------------------------------------------------
    #[test]
    fn test_element_framing() {
        let (ies, _) = written_element();
        assert_eq!(ies[0], 221);
        assert_eq!(ies[1] as usize, ies.len() - 2);
        assert_eq!(&ies[2..6], &0x506f_9a1fu32.to_be_bytes());
        // EncryptedModifier: one length byte, then 8 + 16 SIV bytes.
        assert_eq!(ies[6], 24);
    }

    // -------------------------------------------------------
    // 3. Tampering
    // -------------------------------------------------------
    #[test]
    fn test_tampered_modifier_rejected() {
        let (mut ies, password) = written_element();
        // Flip a bit inside the SIV ciphertext.
        ies[10] ^= 0x01;
        let sta = sta_session(&password);
        assert!(matches!(
            check_confirm_element(&sta, &ies),
            Err(SaePkError::CryptoFailure(_))
        ));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let (mut ies, password) = written_element();
        let last = ies.len() - 1;
        ies[last] ^= 0x01;
        let sta = sta_session(&password);
        assert!(matches!(
            check_confirm_element(&sta, &ies),
            Err(SaePkError::CryptoFailure(_))
        ));
    }

    #[test]
    fn test_swapped_commits_rejected() {
        // A station that mixes up whose commit was whose hashes the
        // KeyAuth fields in the wrong order, so the signature cannot
        // verify.
        let (ies, password) = written_element();
        let mut sta = sta_session(&password);
        sta.set_own_commit(&[0x11; 32], EcPoint::new(&[0x21; 32], &[0x22; 32]));
        sta.set_peer_commit(&[0x33; 32], EcPoint::new(&[0x43; 32], &[0x44; 32]));
        assert!(matches!(
            check_confirm_element(&sta, &ies),
            Err(SaePkError::CryptoFailure(_))
        ));
    }

    #[test]
    fn test_wrong_kek_rejected() {
        let (ies, password) = written_element();
        let mut sta = sta_session(&password);
        sta.set_kek(&[0x1f; 32]);
        assert!(matches!(
            check_confirm_element(&sta, &ies),
            Err(SaePkError::CryptoFailure(_))
        ));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let (ies, _) = written_element();
        let sta = sta_session("abcd-efgh-ijkl-mnop-qrst");
        assert!(matches!(
            check_confirm_element(&sta, &ies),
            Err(SaePkError::FingerprintMismatch)
        ));
    }

    // -------------------------------------------------------
    // 4. Group agreement
    // -------------------------------------------------------
    #[test]
    fn test_group_mismatch_rejected() {
        let (ies, password) = written_element();
        let mut sta = sta_session(&password);
        sta.set_group(EcGroupId::P384);
        assert!(matches!(
            check_confirm_element(&sta, &ies),
            Err(SaePkError::GroupMismatch {
                ap_group: 19,
                negotiated: 20,
            })
        ));
    }

    // -------------------------------------------------------
    // 5. Idempotent acceptance
    // -------------------------------------------------------
    #[test]
    fn test_validated_session_skips_recheck() {
        let (ies, password) = written_element();
        let mut sta = sta_session(&password);
        check_confirm_element(&sta, &ies).unwrap();
        sta.set_ap_validated();
        // Garbage is fine once the AP identity has been accepted.
        check_confirm_element(&sta, b"not an element").unwrap();
    }
}
