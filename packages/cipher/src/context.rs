//! Frame counter context: the per-frame inputs shared by cipher and MIC

use crate::Result;
use lorasim_common::decode_hex_array;
use std::fmt;

/// 32-bit LoRaWAN device address
///
/// Textual form is the conventional big-endian hex (`26011BDA`); on the wire
/// it travels little-endian.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DevAddr(u32);

impl DevAddr {
    /// Wrap a numeric device address
    #[must_use]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Parse exactly eight hex digits
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Input` for malformed hex or a length other than 4 bytes.
    pub fn from_hex(input: &str) -> Result<Self> {
        let bytes: [u8; 4] = decode_hex_array("dev_addr", input)?;
        Ok(Self(u32::from_be_bytes(bytes)))
    }

    /// Numeric value
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Wire representation (little-endian)
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Read from the wire representation
    #[must_use]
    pub const fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }
}

impl fmt::Display for DevAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl From<u32> for DevAddr {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

/// Link direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Device to network
    #[default]
    Uplink = 0,
    /// Network to device
    Downlink = 1,
}

impl Direction {
    /// Byte value used inside the A and B0 blocks
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

/// Device address, full 32-bit frame counter and direction of one frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameContext {
    /// Device address
    pub dev_addr: DevAddr,
    /// Full 32-bit frame counter; only the low 16 bits travel in the header
    pub f_cnt: u32,
    /// Link direction
    pub direction: Direction,
}

impl FrameContext {
    /// Context for an arbitrary direction
    #[must_use]
    pub const fn new(dev_addr: DevAddr, f_cnt: u32, direction: Direction) -> Self {
        Self {
            dev_addr,
            f_cnt,
            direction,
        }
    }

    /// Context for an uplink frame
    #[must_use]
    pub const fn uplink(dev_addr: DevAddr, f_cnt: u32) -> Self {
        Self::new(dev_addr, f_cnt, Direction::Uplink)
    }

    /// Low 16 bits of the frame counter, as carried in FHDR
    #[must_use]
    pub const fn f_cnt_low16(&self) -> u16 {
        (self.f_cnt & 0xffff) as u16
    }

    /// 16-byte block shared by the keystream (A_i) and MIC (B0) constructions
    ///
    /// Layout: `[tag, 0, 0, 0, 0, dir, dev_addr(4, LE), f_cnt(4, LE), 0, last]`
    pub(crate) fn block(&self, tag: u8, last: u8) -> [u8; 16] {
        let mut block = [0u8; 16];
        block[0] = tag;
        block[5] = self.direction.as_byte();
        block[6..10].copy_from_slice(&self.dev_addr.to_le_bytes());
        block[10..14].copy_from_slice(&self.f_cnt.to_le_bytes());
        block[15] = last;
        block
    }
}
