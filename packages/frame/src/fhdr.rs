//! Frame header: `DevAddr(4, LE) | FCtrl(1) | FCnt(2, LE) | FOpts(0..15)`

use crate::{FrameControl, FrameError, Result};
use lorasim_cipher::DevAddr;

/// Largest FOpts field the 4-bit FOptsLen can describe
pub const MAX_F_OPTS_LEN: usize = 15;

/// Fixed part of FHDR, without FOpts
pub(crate) const FHDR_FIXED_LEN: usize = 7;

/// Frame header of a data message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    dev_addr: DevAddr,
    f_ctrl: FrameControl,
    f_cnt: u16,
    f_opts: Vec<u8>,
}

impl FrameHeader {
    /// Build a header, deriving FOptsLen from `f_opts`
    ///
    /// # Errors
    ///
    /// Returns `FrameError::FOptsTooLong` when `f_opts` exceeds 15 bytes.
    pub fn new(dev_addr: DevAddr, mut f_ctrl: FrameControl, f_cnt: u16, f_opts: Vec<u8>) -> Result<Self> {
        f_ctrl.set_f_opts_len(f_opts.len())?;
        Ok(Self {
            dev_addr,
            f_ctrl,
            f_cnt,
            f_opts,
        })
    }

    /// Device address
    #[must_use]
    pub const fn dev_addr(&self) -> DevAddr {
        self.dev_addr
    }

    /// Frame control byte
    #[must_use]
    pub const fn f_ctrl(&self) -> FrameControl {
        self.f_ctrl
    }

    /// Low 16 bits of the frame counter
    #[must_use]
    pub const fn f_cnt(&self) -> u16 {
        self.f_cnt
    }

    /// MAC commands piggybacked in the header
    #[must_use]
    pub fn f_opts(&self) -> &[u8] {
        &self.f_opts
    }

    /// Encoded length in bytes
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        FHDR_FIXED_LEN + self.f_opts.len()
    }

    /// Append the wire form to `out`
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.dev_addr.to_le_bytes());
        out.push(self.f_ctrl.to_byte());
        out.extend_from_slice(&self.f_cnt.to_le_bytes());
        out.extend_from_slice(&self.f_opts);
    }

    /// Parse FHDR from the start of `bytes`, returning the header and its length
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Truncated` if the fixed part or the declared FOpts
    /// do not fit.
    pub fn decode(bytes: &[u8]) -> Result<(Self, usize)> {
        let Some(fixed) = bytes.get(..FHDR_FIXED_LEN) else {
            return Err(FrameError::Truncated {
                len: bytes.len(),
                min: FHDR_FIXED_LEN,
            });
        };
        let dev_addr = DevAddr::from_le_bytes([fixed[0], fixed[1], fixed[2], fixed[3]]);
        let f_ctrl = FrameControl::from_byte(fixed[4]);
        let f_cnt = u16::from_le_bytes([fixed[5], fixed[6]]);

        let end = FHDR_FIXED_LEN + usize::from(f_ctrl.f_opts_len());
        let Some(f_opts) = bytes.get(FHDR_FIXED_LEN..end) else {
            return Err(FrameError::FOptsLenMismatch {
                declared: f_ctrl.f_opts_len(),
                actual: bytes.len() - FHDR_FIXED_LEN,
            });
        };

        Ok((
            Self {
                dev_addr,
                f_ctrl,
                f_cnt,
                f_opts: f_opts.to_vec(),
            },
            end,
        ))
    }
}
