//! FRMPayload keystream cipher
//!
//! Block `i` (1-indexed) of the keystream is `AES-128(AppSKey, A_i)` with
//! `A_i = [0x01, 0, 0, 0, 0, dir, dev_addr(LE), f_cnt(LE), 0, i]`. The payload
//! is XORed with the keystream, the last block truncated to the remaining
//! bytes. Applying the cipher twice yields the original input.

use crate::{AppSKey, CipherError, FrameContext, Result};
use aes::Aes128;
use aes::cipher::{BlockEncrypt, KeyInit, generic_array::GenericArray};

const BLOCK_SIZE: usize = 16;

/// Tag byte of the A_i counter block
const A_BLOCK_TAG: u8 = 0x01;

/// Largest payload the one-byte block index can cover
pub const MAX_PAYLOAD_LEN: usize = BLOCK_SIZE * u8::MAX as usize;

/// AES-128 keystream bound to one application session key
#[derive(Clone)]
pub struct PayloadCipher {
    cipher: Aes128,
}

impl PayloadCipher {
    /// Prepare the block cipher for `key`
    #[must_use]
    pub fn new(key: &AppSKey) -> Self {
        Self {
            cipher: Aes128::new(GenericArray::from_slice(key.key().as_bytes())),
        }
    }

    /// XOR `data` with the keystream for `ctx`
    ///
    /// The output has the same length as the input; an empty input yields an
    /// empty output without generating any block.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::PayloadTooLong` if `data` needs more than 255 blocks.
    pub fn apply(&self, ctx: &FrameContext, data: &[u8]) -> Result<Vec<u8>> {
        if data.len() > MAX_PAYLOAD_LEN {
            return Err(CipherError::PayloadTooLong {
                len: data.len(),
                max: MAX_PAYLOAD_LEN,
            });
        }

        let mut out = Vec::with_capacity(data.len());
        for (index, chunk) in (1u8..=u8::MAX).zip(data.chunks(BLOCK_SIZE)) {
            let mut block = GenericArray::from(ctx.block(A_BLOCK_TAG, index));
            self.cipher.encrypt_block(&mut block);
            out.extend(chunk.iter().zip(block.iter()).map(|(d, s)| d ^ s));
        }

        Ok(out)
    }

    /// Encrypt cleartext FRMPayload
    ///
    /// # Errors
    ///
    /// See [`PayloadCipher::apply`].
    pub fn encrypt(&self, ctx: &FrameContext, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.apply(ctx, plaintext)
    }

    /// Decrypt FRMPayload
    ///
    /// # Errors
    ///
    /// See [`PayloadCipher::apply`].
    pub fn decrypt(&self, ctx: &FrameContext, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.apply(ctx, ciphertext)
    }
}

/// One-shot keystream application
///
/// # Errors
///
/// Returns `CipherError::PayloadTooLong` if `data` needs more than 255 blocks.
pub fn encrypt_or_decrypt(key: &AppSKey, ctx: &FrameContext, data: &[u8]) -> Result<Vec<u8>> {
    PayloadCipher::new(key).apply(ctx, data)
}
