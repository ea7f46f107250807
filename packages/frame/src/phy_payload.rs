//! PHYPayload: `MHDR(1) | MACPayload | MIC(4)`

use crate::{FrameError, MacHeader, MacPayload, Result};
use crate::fhdr::FHDR_FIXED_LEN;
use lorasim_cipher::{
    AppSKey, Direction, FrameContext, MIC_SIZE, Mic, MicGenerator, NwkSKey, PayloadCipher,
};
use lorasim_common::Encoded;

/// Smallest data frame: MHDR, bare FHDR and MIC
const MIN_DATA_FRAME_LEN: usize = 1 + FHDR_FIXED_LEN + MIC_SIZE;

/// Complete over-the-air frame
///
/// Length is always `1 + mac_payload.len() + 4`; nothing trails the MIC.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhyPayload {
    mac_header: MacHeader,
    mac_payload: Vec<u8>,
    mic: Mic,
}

impl PhyPayload {
    /// Compose a frame from its three parts
    #[must_use]
    pub fn new(mac_header: MacHeader, mac_payload: Vec<u8>, mic: Mic) -> Self {
        Self {
            mac_header,
            mac_payload,
            mic,
        }
    }

    /// MAC header
    #[must_use]
    pub const fn mac_header(&self) -> MacHeader {
        self.mac_header
    }

    /// Encoded MACPayload
    #[must_use]
    pub fn mac_payload(&self) -> &[u8] {
        &self.mac_payload
    }

    /// Integrity code
    #[must_use]
    pub const fn mic(&self) -> Mic {
        self.mic
    }

    /// Wire bytes
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        encode_phy_payload(self.mac_header.to_byte(), &self.mac_payload, &self.mic)
    }

    /// Wire bytes with hex and base64 views
    #[must_use]
    pub fn to_encoded(&self) -> Encoded {
        Encoded::new(self.encode())
    }
}

/// Final-stage frame encoder
pub struct PhyPayloadEncoder;

impl PhyPayloadEncoder {
    /// Concatenate `[mhdr] | mac_payload | mic`, no length prefix
    #[must_use]
    pub fn encode(mhdr: u8, mac_payload: &[u8], mic: &Mic) -> Vec<u8> {
        encode_phy_payload(mhdr, mac_payload, mic)
    }
}

/// Concatenate `[mhdr] | mac_payload | mic`
#[must_use]
pub fn encode_phy_payload(mhdr: u8, mac_payload: &[u8], mic: &Mic) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + mac_payload.len() + MIC_SIZE);
    out.push(mhdr);
    out.extend_from_slice(mac_payload);
    out.extend_from_slice(mic.as_ref());
    out
}

/// A data message split back into its fields
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataFrame {
    mac_header: MacHeader,
    direction: Direction,
    raw_mac_payload: Vec<u8>,
    mac_payload: MacPayload,
    mic: Mic,
}

impl DataFrame {
    /// Split a data-message PHYPayload
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Truncated` for short input,
    /// `FrameError::InvalidMacHeader` for RFU bits,
    /// `FrameError::NotDataMessage` for join or proprietary frames and
    /// `FrameError::FOptsLenMismatch` when FCtrl overstates FOpts.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MIN_DATA_FRAME_LEN {
            return Err(FrameError::Truncated {
                len: bytes.len(),
                min: MIN_DATA_FRAME_LEN,
            });
        }

        let mac_header = MacHeader::from_byte(bytes[0])?;
        let direction = mac_header
            .mtype
            .data_direction()
            .ok_or(FrameError::NotDataMessage(mac_header.mtype))?;

        let (body, tail) = bytes[1..].split_at(bytes.len() - 1 - MIC_SIZE);
        let mut mic = [0u8; MIC_SIZE];
        mic.copy_from_slice(tail);

        Ok(Self {
            mac_header,
            direction,
            raw_mac_payload: body.to_vec(),
            mac_payload: MacPayload::decode(body)?,
            mic: Mic(mic),
        })
    }

    /// MAC header
    #[must_use]
    pub const fn mac_header(&self) -> MacHeader {
        self.mac_header
    }

    /// Direction implied by the message type
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Parsed MACPayload
    #[must_use]
    pub fn mac_payload(&self) -> &MacPayload {
        &self.mac_payload
    }

    /// Received MIC
    #[must_use]
    pub const fn mic(&self) -> Mic {
        self.mic
    }

    fn context(&self, f_cnt: u32) -> Result<FrameContext> {
        let header = self.mac_payload.header();
        let wire = header.f_cnt();
        if (f_cnt & 0xffff) as u16 != wire {
            return Err(FrameError::CounterMismatch { f_cnt, wire });
        }
        Ok(FrameContext::new(header.dev_addr(), f_cnt, self.direction))
    }

    /// Recompute the MIC with the full 32-bit counter and compare
    ///
    /// # Errors
    ///
    /// Returns `FrameError::CounterMismatch` if the low 16 bits of `f_cnt`
    /// differ from the header.
    pub fn verify_mic(&self, key: &NwkSKey, f_cnt: u32) -> Result<bool> {
        let ctx = self.context(f_cnt)?;
        Ok(MicGenerator::new(key).verify(
            &ctx,
            self.mac_header.to_byte(),
            &self.raw_mac_payload,
            &self.mic,
        )?)
    }

    /// Recover the cleartext FRMPayload
    ///
    /// # Errors
    ///
    /// Returns `FrameError::CounterMismatch` as for [`DataFrame::verify_mic`].
    pub fn decrypt_payload(&self, key: &AppSKey, f_cnt: u32) -> Result<Vec<u8>> {
        let ctx = self.context(f_cnt)?;
        Ok(PayloadCipher::new(key).decrypt(&ctx, self.mac_payload.frm_payload())?)
    }
}
