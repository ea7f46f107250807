//! # Lorasim Frame
//!
//! Byte-exact LoRaWAN 1.0.x data frames for a Class A device activated by
//! personalization:
//!
//! ```text
//! PHYPayload = MHDR(1) | MACPayload | MIC(4)
//! MACPayload = DevAddr(4, LE) | FCtrl(1) | FCnt(2, LE) | FOpts(0..15) | [FPort(1) | FRMPayload]
//! ```
//!
//! ```rust
//! use lorasim_cipher::{DevAddr, SessionKeys};
//! use lorasim_frame::{AbpSession, Uplink};
//!
//! # fn main() -> lorasim_frame::Result<()> {
//! let keys = SessionKeys::from_hex(
//!     "2B7E151628AED2A6ABF7158809CF4F3C",
//!     "000102030405060708090A0B0C0D0E0F",
//! )?;
//! let mut session = AbpSession::new(DevAddr::from_hex("26011BDA")?, keys).starting_at(1);
//! let frame = Uplink::unconfirmed().port(1).payload(vec![1, 2, 3, 4]).build(&mut session)?;
//! assert_eq!(frame.to_encoded().to_hex(), "40da1b01268001000183f13a6b1e023292");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod fctrl;
pub mod fhdr;
pub mod mac_payload;
pub mod mhdr;
pub mod phy_payload;
pub mod session;
pub mod uplink;

pub use error::{FrameError, Result};
pub use fctrl::FrameControl;
pub use fhdr::{FrameHeader, MAX_F_OPTS_LEN};
pub use mac_payload::{MacPayload, build_mac_payload};
pub use mhdr::{MType, MacHeader, Major};
pub use phy_payload::{DataFrame, PhyPayload, PhyPayloadEncoder, encode_phy_payload};
pub use session::AbpSession;
pub use uplink::{Uplink, UplinkBuilder, pack_abp_uplink};
