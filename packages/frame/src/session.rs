//! ABP session state
//!
//! The session is the sole owner of the uplink frame counter. Counters are
//! handed out by [`AbpSession::issue_next_uplink`] and never reused.

use crate::{FrameError, Result};
use lorasim_cipher::{DevAddr, FrameContext, SessionKeys};
use lorasim_common::LoggingTransformer;

/// One personalized device session
#[derive(Debug)]
pub struct AbpSession {
    dev_addr: DevAddr,
    keys: SessionKeys,
    // u32::MAX + 1 once the last counter has been issued
    next_f_cnt_up: u64,
}

impl AbpSession {
    /// Provision a session with its counter at zero
    #[must_use]
    pub fn new(dev_addr: DevAddr, keys: SessionKeys) -> Self {
        LoggingTransformer::log_session_provisioned(
            &dev_addr.to_string(),
            keys.app_s_key.key().as_bytes(),
            keys.nwk_s_key.key().as_bytes(),
        );
        Self {
            dev_addr,
            keys,
            next_f_cnt_up: 0,
        }
    }

    /// Start issuing from `f_cnt` instead of zero
    #[must_use]
    pub fn starting_at(mut self, f_cnt: u32) -> Self {
        self.next_f_cnt_up = u64::from(f_cnt);
        self
    }

    /// Device address
    #[must_use]
    pub const fn dev_addr(&self) -> DevAddr {
        self.dev_addr
    }

    /// Session keys
    #[must_use]
    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    /// Counter the next uplink will carry, `None` once exhausted
    #[must_use]
    pub fn next_f_cnt_up(&self) -> Option<u32> {
        u32::try_from(self.next_f_cnt_up).ok()
    }

    /// Take the next uplink counter
    ///
    /// # Errors
    ///
    /// Returns `FrameError::CounterExhausted` after `u32::MAX` has been issued.
    pub fn issue_next_uplink(&mut self) -> Result<FrameContext> {
        let f_cnt = self.next_f_cnt_up().ok_or(FrameError::CounterExhausted)?;
        self.next_f_cnt_up += 1;
        log::debug!("Issued uplink f_cnt={f_cnt} for {}", self.dev_addr);
        Ok(FrameContext::uplink(self.dev_addr, f_cnt))
    }

    /// Move the counter forward, e.g. after restoring persisted state
    ///
    /// # Errors
    ///
    /// Returns `FrameError::CounterRegression` if `f_cnt` is below the next
    /// counter; a counter is never issued twice.
    pub fn resume_at(&mut self, f_cnt: u32) -> Result<()> {
        if u64::from(f_cnt) < self.next_f_cnt_up {
            return Err(FrameError::CounterRegression {
                requested: f_cnt,
                next: self.next_f_cnt_up,
            });
        }
        self.next_f_cnt_up = u64::from(f_cnt);
        Ok(())
    }
}
