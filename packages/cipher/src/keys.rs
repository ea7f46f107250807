//! AES-128 session keys
//!
//! The application and network session keys are distinct types so they
//! cannot be swapped at a call site. Key bytes are zeroized on drop and never
//! appear in `Debug` output.

use crate::{CipherError, Result};
use lorasim_common::{LoggingTransformer, decode_hex};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Session key size in bytes
pub const KEY_SIZE: usize = 16;

/// Raw 128-bit AES key
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aes128Key([u8; KEY_SIZE]);

impl Aes128Key {
    /// Build from exactly 16 bytes
    #[must_use]
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Build from a slice, refusing anything but 16 bytes
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidKeyLength` if `bytes` is not 16 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let key = <[u8; KEY_SIZE]>::try_from(bytes).map_err(|_| CipherError::InvalidKeyLength {
            expected: KEY_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self(key))
    }

    /// Parse a 32-digit hex string
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Input` for malformed hex and
    /// `CipherError::InvalidKeyLength` when it does not decode to 16 bytes.
    pub fn from_hex(field: &'static str, input: &str) -> Result<Self> {
        let mut bytes = decode_hex(field, input)?;
        let key = Self::from_slice(&bytes);
        bytes.zeroize();
        key
    }

    /// Borrow the key bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Log-safe identifier for this key
    #[must_use]
    pub fn fingerprint(&self) -> String {
        LoggingTransformer::fingerprint(&self.0)
    }
}

impl PartialEq for Aes128Key {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for Aes128Key {}

impl core::fmt::Debug for Aes128Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Aes128Key({})", self.fingerprint())
    }
}

macro_rules! session_key {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name(Aes128Key);

        impl $name {
            /// Build from exactly 16 bytes
            #[must_use]
            pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
                Self(Aes128Key::from_bytes(bytes))
            }

            /// Build from a slice, refusing anything but 16 bytes
            ///
            /// # Errors
            ///
            /// Returns `CipherError::InvalidKeyLength` if `bytes` is not 16 bytes long.
            pub fn from_slice(bytes: &[u8]) -> Result<Self> {
                Aes128Key::from_slice(bytes).map(Self)
            }

            /// Parse a 32-digit hex string
            ///
            /// # Errors
            ///
            /// Returns `CipherError::Input` for malformed hex and
            /// `CipherError::InvalidKeyLength` when it does not decode to 16 bytes.
            pub fn from_hex(input: &str) -> Result<Self> {
                Aes128Key::from_hex($field, input).map(Self)
            }

            /// Borrow the underlying key
            #[must_use]
            pub fn key(&self) -> &Aes128Key {
                &self.0
            }

            /// Log-safe identifier for this key
            #[must_use]
            pub fn fingerprint(&self) -> String {
                self.0.fingerprint()
            }
        }
    };
}

session_key!(
    /// Application session key, used only for the FRMPayload keystream
    AppSKey,
    "app_s_key"
);

session_key!(
    /// Network session key, used only for the message integrity code
    NwkSKey,
    "nwk_s_key"
);

/// The two independent keys of an ABP session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionKeys {
    /// Application session key
    pub app_s_key: AppSKey,
    /// Network session key
    pub nwk_s_key: NwkSKey,
}

impl SessionKeys {
    /// Pair an application and a network session key
    #[must_use]
    pub fn new(app_s_key: AppSKey, nwk_s_key: NwkSKey) -> Self {
        Self {
            app_s_key,
            nwk_s_key,
        }
    }

    /// Parse both keys from hex strings
    ///
    /// # Errors
    ///
    /// Fails if either key is malformed or not 16 bytes long; no cipher or
    /// MIC computation can start without both keys.
    pub fn from_hex(app_s_key: &str, nwk_s_key: &str) -> Result<Self> {
        Ok(Self::new(
            AppSKey::from_hex(app_s_key)?,
            NwkSKey::from_hex(nwk_s_key)?,
        ))
    }
}
