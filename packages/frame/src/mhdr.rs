//! MAC header: `MType(3) | RFU(3) | Major(2)`

use crate::{FrameError, Result};
use lorasim_cipher::Direction;

/// LoRaWAN message type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MType {
    /// Join-request
    JoinRequest = 0b000,
    /// Join-accept
    JoinAccept = 0b001,
    /// Unconfirmed data up
    UnconfirmedDataUp = 0b010,
    /// Unconfirmed data down
    UnconfirmedDataDown = 0b011,
    /// Confirmed data up
    ConfirmedDataUp = 0b100,
    /// Confirmed data down
    ConfirmedDataDown = 0b101,
    /// Rejoin-request
    RejoinRequest = 0b110,
    /// Proprietary
    Proprietary = 0b111,
}

impl MType {
    /// Decode from the three high bits of MHDR
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0b000 => Self::JoinRequest,
            0b001 => Self::JoinAccept,
            0b010 => Self::UnconfirmedDataUp,
            0b011 => Self::UnconfirmedDataDown,
            0b100 => Self::ConfirmedDataUp,
            0b101 => Self::ConfirmedDataDown,
            0b110 => Self::RejoinRequest,
            _ => Self::Proprietary,
        }
    }

    /// Direction of a data message, `None` for anything else
    #[must_use]
    pub const fn data_direction(self) -> Option<Direction> {
        match self {
            Self::UnconfirmedDataUp | Self::ConfirmedDataUp => Some(Direction::Uplink),
            Self::UnconfirmedDataDown | Self::ConfirmedDataDown => Some(Direction::Downlink),
            _ => None,
        }
    }
}

/// Major version of the frame format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Major {
    /// LoRaWAN R1
    #[default]
    LoRaWanR1 = 0b00,
}

/// One-byte MAC header
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MacHeader {
    /// Message type
    pub mtype: MType,
    /// Major version
    pub major: Major,
}

impl MacHeader {
    /// Header for `mtype` with major version R1
    #[must_use]
    pub const fn new(mtype: MType) -> Self {
        Self {
            mtype,
            major: Major::LoRaWanR1,
        }
    }

    /// Pack into the wire byte; RFU bits are zero
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        ((self.mtype as u8) << 5) | self.major as u8
    }

    /// Unpack a wire byte
    ///
    /// # Errors
    ///
    /// Returns `FrameError::InvalidMacHeader` if RFU bits are set or the major
    /// version is not R1.
    pub fn from_byte(byte: u8) -> Result<Self> {
        if byte & 0b0001_1111 != 0 {
            return Err(FrameError::InvalidMacHeader(byte));
        }
        Ok(Self::new(MType::from_bits(byte >> 5)))
    }
}
