//! MACPayload: `FHDR | [FPort | FRMPayload]`

use crate::{FrameControl, FrameError, FrameHeader, Result};
use lorasim_cipher::DevAddr;

/// MACPayload of a data message
///
/// `frm_payload` is stored exactly as it travels on the wire, i.e. already
/// encrypted when built for transmission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacPayload {
    header: FrameHeader,
    f_port: Option<u8>,
    frm_payload: Vec<u8>,
}

impl MacPayload {
    /// Assemble a MACPayload
    ///
    /// # Errors
    ///
    /// Returns `FrameError::MissingPort` if `frm_payload` is non-empty without a port.
    pub fn new(header: FrameHeader, f_port: Option<u8>, frm_payload: Vec<u8>) -> Result<Self> {
        if f_port.is_none() && !frm_payload.is_empty() {
            return Err(FrameError::MissingPort);
        }
        Ok(Self {
            header,
            f_port,
            frm_payload,
        })
    }

    /// Frame header
    #[must_use]
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Port, if present
    #[must_use]
    pub const fn f_port(&self) -> Option<u8> {
        self.f_port
    }

    /// FRMPayload as carried on the wire
    #[must_use]
    pub fn frm_payload(&self) -> &[u8] {
        &self.frm_payload
    }

    /// Serialize to wire bytes
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.header.encoded_len() + 1 + self.frm_payload.len());
        self.header.encode_into(&mut out);
        if let Some(port) = self.f_port {
            out.push(port);
            out.extend_from_slice(&self.frm_payload);
        }
        out
    }

    /// Parse wire bytes
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Truncated` or `FrameError::FOptsLenMismatch` for
    /// bytes that cannot hold the declared header.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let (header, offset) = FrameHeader::decode(bytes)?;
        let (f_port, frm_payload) = match bytes.get(offset..) {
            Some([port, rest @ ..]) => (Some(*port), rest.to_vec()),
            _ => (None, Vec::new()),
        };
        Ok(Self {
            header,
            f_port,
            frm_payload,
        })
    }
}

/// Build and serialize a MACPayload in one step
///
/// `f_cnt` is truncated to its low 16 bits; `frm_payload` is taken as-is.
///
/// # Errors
///
/// Returns `FrameError::FOptsTooLong` or `FrameError::MissingPort`.
pub fn build_mac_payload(
    dev_addr: DevAddr,
    f_ctrl: FrameControl,
    f_cnt: u32,
    f_opts: &[u8],
    f_port: Option<u8>,
    frm_payload: &[u8],
) -> Result<Vec<u8>> {
    let header = FrameHeader::new(dev_addr, f_ctrl, (f_cnt & 0xffff) as u16, f_opts.to_vec())?;
    Ok(MacPayload::new(header, f_port, frm_payload.to_vec())?.encode())
}
