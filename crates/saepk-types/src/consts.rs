//! Protocol constants shared across the SAE-PK crates.

/// Length of the SAE-PK password modifier M in bytes.
pub const SAE_PK_M_LEN: usize = 8;

/// AES block size; the AES-SIV synthetic IV is one block.
pub const AES_BLOCK_SIZE: usize = 16;

/// Length of the EncryptedModifier field: SIV tag followed by the modifier.
pub const SAE_PK_ENCR_M_LEN: usize = SAE_PK_M_LEN + AES_BLOCK_SIZE;

/// Largest hash output used by any supported group (SHA-512).
pub const SAE_MAX_HASH_LEN: usize = 64;

/// Length of an IEEE 802.11 MAC address.
pub const ETH_ALEN: usize = 6;

/// Vendor Specific element identifier.
pub const EID_VENDOR_SPECIFIC: u8 = 221;

/// Element ID Extension identifier.
pub const EID_EXTENSION: u8 = 255;

/// Element ID extension: FILS Key Confirmation.
pub const EID_EXT_FILS_KEY_CONFIRM: u8 = 3;

/// Element ID extension: FILS Public Key.
pub const EID_EXT_FILS_PUBLIC_KEY: u8 = 12;

/// Key Type value carried in the FILS Public Key element for an ECDSA key.
pub const SAE_PK_KEY_TYPE_ECDSA: u8 = 3;

/// WFA OUI and type identifying the SAE-PK vendor specific element.
pub const SAE_PK_IE_VENDOR_TYPE: u32 = 0x506f_9a1f;
