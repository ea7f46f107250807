//! # Lorasim Cipher
//!
//! LoRaWAN 1.0.x security primitives for an ABP end device:
//!
//! - [`PayloadCipher`]: the AES-128 keystream applied to FRMPayload, its own inverse
//! - [`MicGenerator`]: the 4-byte AES-CMAC message integrity code
//! - [`SessionKeys`]: the two independent 128-bit session keys
//!
//! ```rust
//! use lorasim_cipher::{AppSKey, Cipher, DevAddr, FrameContext};
//!
//! # fn main() -> lorasim_cipher::Result<()> {
//! let key = AppSKey::from_hex("2B7E151628AED2A6ABF7158809CF4F3C")?;
//! let ctx = FrameContext::uplink(DevAddr::from_hex("26011BDA")?, 1);
//! let encrypted = Cipher::payload(&key).encrypt(&ctx, &[1, 2, 3, 4])?;
//! assert_eq!(encrypted, [0x83, 0xf1, 0x3a, 0x6b]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod context;
pub mod error;
pub mod keys;
pub mod keystream;
pub mod mic;

pub use context::{DevAddr, Direction, FrameContext};
pub use error::{CipherError, Result};
pub use keys::{Aes128Key, AppSKey, NwkSKey, SessionKeys, KEY_SIZE};
pub use keystream::{PayloadCipher, encrypt_or_decrypt};
pub use mic::{Mic, MicGenerator, MIC_SIZE};

/// Entry point for the session-key primitives
pub struct Cipher;

impl Cipher {
    /// Keystream cipher for FRMPayload under the application session key
    #[must_use]
    pub fn payload(key: &AppSKey) -> PayloadCipher {
        PayloadCipher::new(key)
    }

    /// Integrity code generator under the network session key
    #[must_use]
    pub fn mic(key: &NwkSKey) -> MicGenerator {
        MicGenerator::new(key)
    }
}
