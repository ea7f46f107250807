//! # Lorasim Gateway
//!
//! The gateway side of the simulator: a PHYPayload plus radio descriptors
//! becomes a serialized `gw.UplinkFrame` envelope, handed to a [`Publisher`].
//!
//! ```rust
//! use lorasim_gateway::{
//!     FixedClock, GatewayEnvelopeEncoder, GatewayId, RadioRxMetadata, RadioTxContext,
//!     decode_uplink_frame,
//! };
//!
//! # fn main() -> lorasim_gateway::Result<()> {
//! let tx = RadioTxContext::lora(868_100_000, 125_000, 7)?;
//! let rx = RadioRxMetadata::new(GatewayId::from_hex("0102030405060708")?);
//! let clock = FixedClock::from_unix(1_700_000_000, 0).expect("in range");
//!
//! let envelope = GatewayEnvelopeEncoder::new(clock).encode(&[0x40], &tx, &rx);
//! let frame = decode_uplink_frame(envelope.as_bytes())?;
//! assert_eq!(frame.phy_payload, [0x40]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod clock;
pub mod envelope;
pub mod error;
pub mod proto;
pub mod publisher;
pub mod radio;

pub use clock::{FixedClock, SystemClock, TimeSource};
pub use envelope::{GatewayEnvelopeEncoder, GatewayUplinkEnvelope, decode_uplink_frame};
pub use error::{GatewayError, PublishError, Result};
pub use publisher::{ChannelPublisher, PublishedMessage, Publisher, StdoutPublisher};
pub use radio::{GatewayId, RadioRxMetadata, RadioTxContext, ReceptionCrc};
