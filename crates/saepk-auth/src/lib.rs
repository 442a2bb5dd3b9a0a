#![forbid(unsafe_code)]
#![doc = "SAE-PK: station-side verification of an AP public key bound to the SAE password."]

//! SAE-PK (IEEE 802.11 SAE with Public Key) lets a station verify an access
//! point's identity during the SAE confirm exchange. The AP proves
//! possession of a private key whose public half is fingerprinted into the
//! human-memorable password; the station checks the fingerprint and a
//! signature over the canonical commit data of both peers.
//!
//! The surrounding SAE commit/confirm state machine owns scalars, elements,
//! the negotiated group, and the derived KEK, and hands them to this crate
//! through [`session::SaePkSession`] at two points: the AP appends the
//! SAE-PK element to its confirm message with [`confirm::write_confirm_element`],
//! and the station validates a received confirm with
//! [`confirm::check_confirm_element`].

pub mod base32;
pub mod buffer;
pub mod confirm;
pub mod credential;
pub mod fingerprint;
pub mod keyauth;
pub mod password;
pub mod session;

pub use buffer::ElementBuffer;
pub use confirm::{check_confirm_element, write_confirm_element};
pub use credential::SaePkCredential;
pub use keyauth::SaeRole;
pub use password::{valid_password, SaePassword};
pub use session::SaePkSession;
