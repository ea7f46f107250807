//! Delivery seam between the encoder and a publish/subscribe transport
//!
//! Connection lifecycle belongs to the transport; implementations only hand
//! one serialized envelope to one topic. On failure the envelope comes back
//! inside the error so it can be replayed as-is.

use crate::PublishError;
use lorasim_common::{Encoded, LoggingTransformer};
use std::future::Future;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

/// Sink for serialized gateway envelopes
pub trait Publisher: Send + Sync {
    /// Deliver `payload` to `topic`, at most once
    fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
    ) -> impl Future<Output = Result<(), PublishError>> + Send;
}

impl<P: Publisher> Publisher for &P {
    fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
    ) -> impl Future<Output = Result<(), PublishError>> + Send {
        (**self).publish(topic, payload)
    }
}

/// Envelope as delivered to a channel
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishedMessage {
    /// Destination topic
    pub topic: String,
    /// Serialized envelope
    pub payload: Vec<u8>,
}

/// Publisher feeding a tokio channel, for embedders and tests
#[derive(Clone, Debug)]
pub struct ChannelPublisher {
    sender: mpsc::Sender<PublishedMessage>,
}

impl ChannelPublisher {
    /// Bounded channel holding up to `capacity` undelivered envelopes
    #[must_use]
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<PublishedMessage>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }

    /// Publish into an existing channel
    #[must_use]
    pub fn from_sender(sender: mpsc::Sender<PublishedMessage>) -> Self {
        Self { sender }
    }
}

impl Publisher for ChannelPublisher {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), PublishError> {
        let len = payload.len();
        let message = PublishedMessage {
            topic: topic.to_string(),
            payload,
        };
        match self.sender.send(message).await {
            Ok(()) => {
                LoggingTransformer::log_publish(topic, len, None);
                Ok(())
            }
            Err(mpsc::error::SendError(message)) => {
                let err = PublishError::ChannelClosed {
                    topic: message.topic,
                    payload: message.payload,
                };
                LoggingTransformer::log_publish(topic, len, Some(&err as &dyn std::error::Error));
                Err(err)
            }
        }
    }
}

/// Publisher printing the topic and the base64 envelope to stdout
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutPublisher;

impl Publisher for StdoutPublisher {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), PublishError> {
        let line = format!("{topic} {}\n", Encoded::new(payload.clone()).to_base64());
        let mut stdout = tokio::io::stdout();
        let written = match stdout.write_all(line.as_bytes()).await {
            Ok(()) => stdout.flush().await,
            Err(e) => Err(e),
        };
        match written {
            Ok(()) => {
                LoggingTransformer::log_publish(topic, payload.len(), None);
                Ok(())
            }
            Err(source) => {
                let err = PublishError::Io {
                    topic: topic.to_string(),
                    payload,
                    source,
                };
                LoggingTransformer::log_publish(topic, err.payload().len(), Some(&err as &dyn std::error::Error));
                Err(err)
            }
        }
    }
}
