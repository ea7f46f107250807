//! Time source for the reception timestamp

use chrono::{DateTime, Utc};

/// Supplier of "now" for the envelope encoder
pub trait TimeSource: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant, for reproducible envelopes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Freeze at `instant`
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Freeze at a Unix timestamp; `None` if out of range
    #[must_use]
    pub fn from_unix(seconds: i64, nanos: u32) -> Option<Self> {
        DateTime::from_timestamp(seconds, nanos).map(Self)
    }
}

impl TimeSource for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
