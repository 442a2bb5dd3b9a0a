#![forbid(unsafe_code)]
#![doc = "Cryptographic capability layer for SAE-PK."]

pub mod ec;
pub mod hash;
pub mod siv;
