//! Uplink frame control byte
//!
//! `ADR(7) | ADRACKReq(6) | ACK(5) | ClassB(4) | FOptsLen(3..0)`

use crate::{FrameError, MAX_F_OPTS_LEN, Result};

const ADR: u8 = 0b1000_0000;
const ADR_ACK_REQ: u8 = 0b0100_0000;
const ACK: u8 = 0b0010_0000;
const CLASS_B: u8 = 0b0001_0000;
const F_OPTS_LEN_MASK: u8 = 0b0000_1111;

/// Decoded FCtrl of an uplink
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrameControl {
    /// Adaptive data rate enabled
    pub adr: bool,
    /// ADR acknowledgement requested
    pub adr_ack_req: bool,
    /// Acknowledges the last confirmed downlink
    pub ack: bool,
    /// Device has switched to Class B
    pub class_b: bool,
    f_opts_len: u8,
}

impl FrameControl {
    /// Control byte with ADR on and every other flag off
    #[must_use]
    pub fn with_adr() -> Self {
        Self {
            adr: true,
            ..Self::default()
        }
    }

    /// Declared FOpts length
    #[must_use]
    pub const fn f_opts_len(&self) -> u8 {
        self.f_opts_len
    }

    /// Set the declared FOpts length
    ///
    /// # Errors
    ///
    /// Returns `FrameError::FOptsTooLong` above 15.
    pub fn set_f_opts_len(&mut self, len: usize) -> Result<()> {
        if len > MAX_F_OPTS_LEN {
            return Err(FrameError::FOptsTooLong { len });
        }
        // Bounded by MAX_F_OPTS_LEN above
        self.f_opts_len = len as u8;
        Ok(())
    }

    /// Pack into the wire byte
    #[must_use]
    pub const fn to_byte(&self) -> u8 {
        let mut byte = self.f_opts_len & F_OPTS_LEN_MASK;
        if self.adr {
            byte |= ADR;
        }
        if self.adr_ack_req {
            byte |= ADR_ACK_REQ;
        }
        if self.ack {
            byte |= ACK;
        }
        if self.class_b {
            byte |= CLASS_B;
        }
        byte
    }

    /// Unpack a wire byte
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        Self {
            adr: byte & ADR != 0,
            adr_ack_req: byte & ADR_ACK_REQ != 0,
            ack: byte & ACK != 0,
            class_b: byte & CLASS_B != 0,
            f_opts_len: byte & F_OPTS_LEN_MASK,
        }
    }
}
