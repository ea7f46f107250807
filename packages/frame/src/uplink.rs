//! Uplink construction: encrypt, frame, authenticate

use crate::{
    AbpSession, FrameControl, FrameError, FrameHeader, MAX_F_OPTS_LEN, MType, MacHeader,
    MacPayload, PhyPayload, Result,
};
use crate::fhdr::FHDR_FIXED_LEN;
use lorasim_cipher::{DevAddr, FrameContext, MicGenerator, PayloadCipher, SessionKeys};
use lorasim_common::LoggingTransformer;

/// Largest MHDR plus MACPayload the MIC block can authenticate
const MAX_AUTHENTICATED_LEN: usize = u8::MAX as usize;

/// Default application port of the simulated device
const DEFAULT_F_PORT: u8 = 1;

/// Entry point for uplink builders
pub struct Uplink;

impl Uplink {
    /// Unconfirmed data up with ADR on, port 1, no FOpts
    #[must_use]
    pub fn unconfirmed() -> UplinkBuilder {
        UplinkBuilder::new(MType::UnconfirmedDataUp)
    }

    /// Confirmed data up with the same defaults
    #[must_use]
    pub fn confirmed() -> UplinkBuilder {
        UplinkBuilder::new(MType::ConfirmedDataUp)
    }
}

/// Fluent description of one uplink
#[derive(Clone, Debug)]
pub struct UplinkBuilder {
    mtype: MType,
    f_ctrl: FrameControl,
    f_port: Option<u8>,
    f_opts: Vec<u8>,
    payload: Vec<u8>,
}

impl UplinkBuilder {
    fn new(mtype: MType) -> Self {
        Self {
            mtype,
            f_ctrl: FrameControl::with_adr(),
            f_port: Some(DEFAULT_F_PORT),
            f_opts: Vec::new(),
            payload: Vec::new(),
        }
    }

    /// Application port, 1..=255
    #[must_use]
    pub fn port(mut self, port: u8) -> Self {
        self.f_port = Some(port);
        self
    }

    /// Omit FPort; only valid with an empty payload
    #[must_use]
    pub fn without_port(mut self) -> Self {
        self.f_port = None;
        self
    }

    /// Adaptive data rate flag
    #[must_use]
    pub fn adr(mut self, on: bool) -> Self {
        self.f_ctrl.adr = on;
        self
    }

    /// ADR acknowledgement request flag
    #[must_use]
    pub fn adr_ack_req(mut self, on: bool) -> Self {
        self.f_ctrl.adr_ack_req = on;
        self
    }

    /// Acknowledge the last confirmed downlink
    #[must_use]
    pub fn ack(mut self, on: bool) -> Self {
        self.f_ctrl.ack = on;
        self
    }

    /// Class B flag
    #[must_use]
    pub fn class_b(mut self, on: bool) -> Self {
        self.f_ctrl.class_b = on;
        self
    }

    /// MAC commands carried in FOpts, at most 15 bytes
    #[must_use]
    pub fn f_opts(mut self, f_opts: Vec<u8>) -> Self {
        self.f_opts = f_opts;
        self
    }

    /// Cleartext application payload
    #[must_use]
    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    fn validate(&self) -> Result<()> {
        match self.f_port {
            Some(0) => return Err(FrameError::ReservedPort(0)),
            None if !self.payload.is_empty() => return Err(FrameError::MissingPort),
            _ => {}
        }
        if self.f_opts.len() > MAX_F_OPTS_LEN {
            return Err(FrameError::FOptsTooLong {
                len: self.f_opts.len(),
            });
        }
        let len = 1
            + FHDR_FIXED_LEN
            + self.f_opts.len()
            + usize::from(self.f_port.is_some())
            + self.payload.len();
        if len > MAX_AUTHENTICATED_LEN {
            return Err(FrameError::FrameTooLong {
                len,
                max: MAX_AUTHENTICATED_LEN,
            });
        }
        Ok(())
    }

    /// Take the next counter from `session` and seal the frame
    ///
    /// Validation runs first, so a rejected uplink does not consume a counter.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::ReservedPort`, `FrameError::MissingPort`,
    /// `FrameError::FOptsTooLong` or `FrameError::FrameTooLong` for an invalid
    /// description and `FrameError::CounterExhausted` for a spent session.
    pub fn build(self, session: &mut AbpSession) -> Result<PhyPayload> {
        self.validate()?;
        let ctx = session.issue_next_uplink()?;
        self.seal(session.keys(), &ctx)
    }

    /// Seal the frame for an explicit context, bypassing session bookkeeping
    ///
    /// # Errors
    ///
    /// Same as [`UplinkBuilder::build`], minus counter exhaustion.
    pub fn seal(self, keys: &SessionKeys, ctx: &FrameContext) -> Result<PhyPayload> {
        self.validate()?;

        let encrypted = PayloadCipher::new(&keys.app_s_key).encrypt(ctx, &self.payload)?;
        let header = FrameHeader::new(ctx.dev_addr, self.f_ctrl, ctx.f_cnt_low16(), self.f_opts)?;
        let mac_payload = MacPayload::new(header, self.f_port, encrypted)?.encode();

        let mac_header = MacHeader::new(self.mtype);
        let mic = MicGenerator::new(&keys.nwk_s_key).compute(ctx, mac_header.to_byte(), &mac_payload)?;

        let frame = PhyPayload::new(mac_header, mac_payload, mic);
        LoggingTransformer::log_frame_built(&ctx.dev_addr.to_string(), ctx.f_cnt, frame.encode().len());
        Ok(frame)
    }
}

/// One-shot unconfirmed uplink for a fixed counter
///
/// # Errors
///
/// Same as [`UplinkBuilder::seal`].
pub fn pack_abp_uplink(
    dev_addr: DevAddr,
    keys: &SessionKeys,
    f_cnt: u32,
    f_port: u8,
    payload: &[u8],
) -> Result<PhyPayload> {
    Uplink::unconfirmed()
        .port(f_port)
        .payload(payload.to_vec())
        .seal(keys, &FrameContext::uplink(dev_addr, f_cnt))
}
