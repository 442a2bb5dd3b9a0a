//! AES-SIV deterministic authenticated encryption (RFC 5297).
//!
//! SAE-PK encrypts the password modifier under the session KEK with
//! AES-SIV and no associated data. The KEK may be 32, 48, or 64 bytes,
//! selecting AES-128, AES-192, or AES-256 for both the S2V and CTR halves.
//! The output is the 16-byte synthetic IV followed by the ciphertext.

use aes::cipher::consts::U16;
use aes::cipher::{
    BlockCipher, BlockEncrypt, BlockEncryptMut, BlockSizeUser, KeyInit, KeyIvInit, StreamCipher,
};
use aes::{Aes128, Aes192, Aes256};
use cmac::{Cmac, Mac};
use ctr::Ctr128BE;
use saepk_types::{SaePkError, AES_BLOCK_SIZE};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

/// Encrypt `plaintext` under `key`, authenticating each slice in `ad`.
///
/// Returns `V || C` where `V` is the synthetic IV (also the tag).
pub fn encrypt(key: &[u8], plaintext: &[u8], ad: &[&[u8]]) -> Result<Vec<u8>, SaePkError> {
    let (k1, k2) = split_key(key)?;
    match key.len() {
        32 => encrypt_with::<Aes128>(k1, k2, plaintext, ad),
        48 => encrypt_with::<Aes192>(k1, k2, plaintext, ad),
        _ => encrypt_with::<Aes256>(k1, k2, plaintext, ad),
    }
}

/// Decrypt `V || C` produced by [`encrypt`], verifying the tag in constant
/// time. The recovered plaintext is zeroized on drop; on tag mismatch it is
/// erased before the error returns.
pub fn decrypt(key: &[u8], ciphertext: &[u8], ad: &[&[u8]]) -> Result<Zeroizing<Vec<u8>>, SaePkError> {
    let (k1, k2) = split_key(key)?;
    match key.len() {
        32 => decrypt_with::<Aes128>(k1, k2, ciphertext, ad),
        48 => decrypt_with::<Aes192>(k1, k2, ciphertext, ad),
        _ => decrypt_with::<Aes256>(k1, k2, ciphertext, ad),
    }
}

/// Split a SIV key into its S2V (leftmost) and CTR (rightmost) halves.
fn split_key(key: &[u8]) -> Result<(&[u8], &[u8]), SaePkError> {
    match key.len() {
        32 | 48 | 64 => Ok(key.split_at(key.len() / 2)),
        _ => Err(SaePkError::CryptoFailure("invalid AES-SIV key length")),
    }
}

fn encrypt_with<C>(
    k1: &[u8],
    k2: &[u8],
    plaintext: &[u8],
    ad: &[&[u8]],
) -> Result<Vec<u8>, SaePkError>
where
    C: BlockCipher + BlockEncrypt + BlockEncryptMut + KeyInit + Clone,
    C: BlockSizeUser<BlockSize = U16>,
    Cmac<C>: Mac + KeyInit,
    Ctr128BE<C>: KeyIvInit + StreamCipher,
{
    let v = s2v::<C>(k1, ad, plaintext)?;

    let mut out = Vec::with_capacity(AES_BLOCK_SIZE + plaintext.len());
    out.extend_from_slice(&v);
    out.extend_from_slice(plaintext);
    ctr_xor::<C>(k2, &v, &mut out[AES_BLOCK_SIZE..])?;
    Ok(out)
}

fn decrypt_with<C>(
    k1: &[u8],
    k2: &[u8],
    ciphertext: &[u8],
    ad: &[&[u8]],
) -> Result<Zeroizing<Vec<u8>>, SaePkError>
where
    C: BlockCipher + BlockEncrypt + BlockEncryptMut + KeyInit + Clone,
    C: BlockSizeUser<BlockSize = U16>,
    Cmac<C>: Mac + KeyInit,
    Ctr128BE<C>: KeyIvInit + StreamCipher,
{
    if ciphertext.len() < AES_BLOCK_SIZE {
        return Err(SaePkError::CryptoFailure("AES-SIV ciphertext too short"));
    }
    let (v, data) = ciphertext.split_at(AES_BLOCK_SIZE);

    let mut plaintext = Zeroizing::new(data.to_vec());
    ctr_xor::<C>(k2, v, &mut plaintext)?;

    let expected = s2v::<C>(k1, ad, &plaintext)?;
    if !bool::from(expected.ct_eq(v)) {
        plaintext.zeroize();
        return Err(SaePkError::CryptoFailure("AES-SIV tag mismatch"));
    }
    Ok(plaintext)
}

/// S2V pseudo-random function from RFC 5297 section 2.4.
fn s2v<C>(k1: &[u8], ad: &[&[u8]], plaintext: &[u8]) -> Result<[u8; AES_BLOCK_SIZE], SaePkError>
where
    C: BlockCipher + BlockEncrypt + BlockEncryptMut + KeyInit + Clone,
    C: BlockSizeUser<BlockSize = U16>,
    Cmac<C>: Mac + KeyInit,
{
    let mut d = cmac_block::<C>(k1, &[0u8; AES_BLOCK_SIZE])?;

    for s in ad {
        let m = cmac_block::<C>(k1, s)?;
        d = dbl(&d);
        for (a, b) in d.iter_mut().zip(m.iter()) {
            *a ^= b;
        }
    }

    if plaintext.len() >= AES_BLOCK_SIZE {
        // T = Sn xorend D: xor D into the final block of the plaintext.
        let split = plaintext.len() - AES_BLOCK_SIZE;
        let mut mac = <Cmac<C> as KeyInit>::new_from_slice(k1)
            .map_err(|_| SaePkError::CryptoFailure("CMAC key setup"))?;
        mac.update(&plaintext[..split]);
        let mut last = [0u8; AES_BLOCK_SIZE];
        last.copy_from_slice(&plaintext[split..]);
        for (a, b) in last.iter_mut().zip(d.iter()) {
            *a ^= b;
        }
        mac.update(&last);
        let tag = mac.finalize().into_bytes();
        let mut out = [0u8; AES_BLOCK_SIZE];
        out.copy_from_slice(&tag);
        last.zeroize();
        Ok(out)
    } else {
        // T = dbl(D) xor pad(Sn)
        d = dbl(&d);
        let mut padded = [0u8; AES_BLOCK_SIZE];
        padded[..plaintext.len()].copy_from_slice(plaintext);
        padded[plaintext.len()] = 0x80;
        for (a, b) in d.iter_mut().zip(padded.iter()) {
            *a ^= b;
        }
        padded.zeroize();
        cmac_block::<C>(k1, &d)
    }
}

fn cmac_block<C>(key: &[u8], data: &[u8]) -> Result<[u8; AES_BLOCK_SIZE], SaePkError>
where
    C: BlockCipher + BlockEncrypt + BlockEncryptMut + KeyInit + Clone,
    C: BlockSizeUser<BlockSize = U16>,
    Cmac<C>: Mac + KeyInit,
{
    let mut mac = <Cmac<C> as KeyInit>::new_from_slice(key)
        .map_err(|_| SaePkError::CryptoFailure("CMAC key setup"))?;
    mac.update(data);
    let tag = mac.finalize().into_bytes();
    let mut out = [0u8; AES_BLOCK_SIZE];
    out.copy_from_slice(&tag);
    Ok(out)
}

/// Doubling in GF(2^128): left shift by one, conditionally xor 0x87.
/// Branch-free so the operation cost does not depend on the MSB.
fn dbl(block: &[u8; AES_BLOCK_SIZE]) -> [u8; AES_BLOCK_SIZE] {
    let mut out = [0u8; AES_BLOCK_SIZE];
    let mut carry = 0u8;
    for i in (0..AES_BLOCK_SIZE).rev() {
        out[i] = (block[i] << 1) | carry;
        carry = block[i] >> 7;
    }
    out[AES_BLOCK_SIZE - 1] ^= 0x87 & carry.wrapping_neg();
    out
}

/// AES-CTR keystream xor with the SIV counter (V with bits 63 and 31 cleared).
fn ctr_xor<C>(k2: &[u8], v: &[u8], data: &mut [u8]) -> Result<(), SaePkError>
where
    C: BlockCipher + BlockEncrypt + BlockEncryptMut + KeyInit + Clone,
    C: BlockSizeUser<BlockSize = U16>,
    Ctr128BE<C>: KeyIvInit + StreamCipher,
{
    let mut q = [0u8; AES_BLOCK_SIZE];
    q.copy_from_slice(v);
    q[8] &= 0x7f;
    q[12] &= 0x7f;

    let mut cipher = <Ctr128BE<C>>::new_from_slices(k2, &q)
        .map_err(|_| SaePkError::CryptoFailure("CTR key setup"))?;
    cipher.apply_keystream(data);
    Ok(())
}
