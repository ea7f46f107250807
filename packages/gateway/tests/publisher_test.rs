//! Publisher seam: delivery and failure with the envelope kept

use lorasim_common::ErrorKind;
use lorasim_gateway::{ChannelPublisher, PublishError, PublishedMessage, Publisher, StdoutPublisher};

const TOPIC: &str = "eu868/gateway/0102030405060708/event/up";

#[tokio::test]
async fn test_channel_publisher_delivers() {
    let (publisher, mut receiver) = ChannelPublisher::new(4);
    publisher
        .publish(TOPIC, vec![0x0a, 0x01, 0x40])
        .await
        .expect("delivered");

    let message = receiver.recv().await.expect("message");
    assert_eq!(
        message,
        PublishedMessage {
            topic: TOPIC.to_string(),
            payload: vec![0x0a, 0x01, 0x40],
        }
    );
}

#[tokio::test]
async fn test_closed_channel_returns_envelope() {
    let (publisher, receiver) = ChannelPublisher::new(1);
    drop(receiver);

    let err = publisher
        .publish(TOPIC, vec![1, 2, 3])
        .await
        .expect_err("receiver dropped");
    assert!(matches!(err, PublishError::ChannelClosed { .. }));
    assert_eq!(err.kind(), ErrorKind::TransportFailure);
    assert_eq!(err.topic(), TOPIC);
    assert_eq!(err.into_payload(), vec![1, 2, 3]);
}

async fn publish_once<P: Publisher>(publisher: P, payload: Vec<u8>) -> Result<(), PublishError> {
    publisher.publish(TOPIC, payload).await
}

#[tokio::test]
async fn test_publisher_by_reference() {
    let (publisher, mut receiver) = ChannelPublisher::new(1);
    publish_once(&publisher, vec![9]).await.expect("delivered");
    assert_eq!(receiver.recv().await.expect("message").payload, vec![9]);
}

#[tokio::test]
async fn test_stdout_publisher() {
    StdoutPublisher
        .publish(TOPIC, vec![0x40])
        .await
        .expect("stdout writable");
}
