//! Per-exchange SAE-PK session state.
//!
//! One `SaePkSession` belongs to exactly one SAE exchange; the surrounding
//! commit/confirm state machine feeds it the negotiated group, the commit
//! scalars and elements of both peers, and the derived KEK. Secret values
//! (password, KEK) are erased when replaced and when the session drops.

use crate::credential::SaePkCredential;
use crate::password::SaePassword;
use saepk_crypto::ec::EcPoint;
use saepk_types::{EcGroupId, ETH_ALEN};
use zeroize::Zeroize;

/// The session-derived confirmation key used to encrypt the modifier.
pub(crate) struct Kek(Vec<u8>);

impl Drop for Kek {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl Kek {
    pub(crate) fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

/// State of one SAE-PK capable authentication session.
pub struct SaePkSession {
    pub(crate) ssid: Vec<u8>,
    pub(crate) own_addr: [u8; ETH_ALEN],
    pub(crate) peer_addr: [u8; ETH_ALEN],
    pub(crate) group: Option<EcGroupId>,
    pub(crate) own_commit_scalar: Option<Vec<u8>>,
    pub(crate) peer_commit_scalar: Option<Vec<u8>>,
    pub(crate) own_commit_element: Option<EcPoint>,
    pub(crate) peer_commit_element: Option<EcPoint>,
    pub(crate) kek: Option<Kek>,
    pub(crate) password: Option<SaePassword>,
    pub(crate) credential: Option<SaePkCredential>,
    pub(crate) pk_enabled: bool,
    pub(crate) ap_validated: bool,
}

impl SaePkSession {
    /// Create a session for the given SSID and peer pair.
    pub fn new(ssid: &[u8], own_addr: [u8; ETH_ALEN], peer_addr: [u8; ETH_ALEN]) -> Self {
        SaePkSession {
            ssid: ssid.to_vec(),
            own_addr,
            peer_addr,
            group: None,
            own_commit_scalar: None,
            peer_commit_scalar: None,
            own_commit_element: None,
            peer_commit_element: None,
            kek: None,
            password: None,
            credential: None,
            pk_enabled: false,
            ap_validated: false,
        }
    }

    /// Record the negotiated elliptic curve group.
    pub fn set_group(&mut self, group: EcGroupId) {
        self.group = Some(group);
    }

    /// Record this side's commit scalar and element.
    pub fn set_own_commit(&mut self, scalar: &[u8], element: EcPoint) {
        self.own_commit_scalar = Some(scalar.to_vec());
        self.own_commit_element = Some(element);
    }

    /// Record the peer's commit scalar and element.
    pub fn set_peer_commit(&mut self, scalar: &[u8], element: EcPoint) {
        self.peer_commit_scalar = Some(scalar.to_vec());
        self.peer_commit_element = Some(element);
    }

    /// Install the derived confirmation key, erasing any previous one.
    pub fn set_kek(&mut self, kek: &[u8]) {
        self.kek = Some(Kek(kek.to_vec()));
    }

    /// Install a configured password, erasing any previous one.
    pub fn set_password(&mut self, password: SaePassword) {
        self.password = Some(password);
    }

    /// Install the local AP credential (AP role only).
    pub fn set_credential(&mut self, credential: SaePkCredential) {
        self.credential = Some(credential);
    }

    /// Mark the session as wanting SAE-PK validation (station role).
    pub fn enable_pk(&mut self) {
        self.pk_enabled = true;
    }

    /// Record that the AP identity has been accepted for this session.
    pub fn set_ap_validated(&mut self) {
        self.ap_validated = true;
    }

    /// Whether the AP identity has been accepted for this session.
    pub fn ap_validated(&self) -> bool {
        self.ap_validated
    }
}
