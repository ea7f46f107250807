//! Message integrity code
//!
//! `MIC = AES-CMAC(NwkSKey, B0 | MHDR | MACPayload)[0..4]` with
//! `B0 = [0x49, 0, 0, 0, 0, dir, dev_addr(LE), f_cnt(LE), 0, len(MHDR | MACPayload)]`.

use crate::{CipherError, FrameContext, NwkSKey, Result};
use aes::Aes128;
use aes::cipher::generic_array::GenericArray;
use cmac::{Cmac, Mac};
use subtle::ConstantTimeEq;

/// MIC size in bytes
pub const MIC_SIZE: usize = 4;

/// Tag byte of the B0 authentication block
const B0_BLOCK_TAG: u8 = 0x49;

/// Largest message the one-byte length field of B0 can describe
const MAX_MESSAGE_LEN: usize = u8::MAX as usize;

/// 4-byte LoRaWAN message integrity code
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Mic(pub [u8; MIC_SIZE]);

impl Mic {
    /// Wire bytes
    #[must_use]
    pub const fn to_bytes(self) -> [u8; MIC_SIZE] {
        self.0
    }

    /// Constant-time comparison
    #[must_use]
    pub fn ct_matches(&self, other: &Mic) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl From<[u8; MIC_SIZE]> for Mic {
    fn from(bytes: [u8; MIC_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Mic {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// AES-CMAC integrity code generator bound to one network session key
#[derive(Clone)]
pub struct MicGenerator {
    mac: Cmac<Aes128>,
}

impl MicGenerator {
    /// Prepare the CMAC state for `key`
    #[must_use]
    pub fn new(key: &NwkSKey) -> Self {
        Self {
            mac: <Cmac<Aes128> as Mac>::new(GenericArray::from_slice(key.key().as_bytes())),
        }
    }

    /// Compute the MIC of `mhdr | mac_payload` for `ctx`
    ///
    /// # Errors
    ///
    /// Returns `CipherError::MessageTooLong` when `1 + mac_payload.len()`
    /// does not fit the length byte of B0.
    pub fn compute(&self, ctx: &FrameContext, mhdr: u8, mac_payload: &[u8]) -> Result<Mic> {
        let len = 1 + mac_payload.len();
        let len_byte = u8::try_from(len).map_err(|_| CipherError::MessageTooLong {
            len,
            max: MAX_MESSAGE_LEN,
        })?;

        let mut mac = self.mac.clone();
        mac.update(&ctx.block(B0_BLOCK_TAG, len_byte));
        mac.update(&[mhdr]);
        mac.update(mac_payload);
        let tag = mac.finalize().into_bytes();

        let mut mic = [0u8; MIC_SIZE];
        mic.copy_from_slice(&tag[..MIC_SIZE]);
        Ok(Mic(mic))
    }

    /// Recompute and compare against a received MIC in constant time
    ///
    /// # Errors
    ///
    /// Same as [`MicGenerator::compute`].
    pub fn verify(&self, ctx: &FrameContext, mhdr: u8, mac_payload: &[u8], mic: &Mic) -> Result<bool> {
        Ok(self.compute(ctx, mhdr, mac_payload)?.ct_matches(mic))
    }
}
