#![forbid(unsafe_code)]
#![doc = "Common types, error codes, group identifiers, and protocol constants for SAE-PK."]

pub mod consts;
pub mod error;
pub mod group;

pub use consts::*;
pub use error::*;
pub use group::*;
