//! End-to-end uplink through a channel publisher

use hex_literal::hex;
use lorasim::{LorasimError, Simulation, SimulatorConfig};
use lorasim_cipher::SessionKeys;
use lorasim_common::{Encoded, ErrorKind};
use lorasim_frame::DataFrame;
use lorasim_gateway::{ChannelPublisher, FixedClock, PublishError, SystemClock, decode_uplink_frame};

const CONFIG: &str = r#"{
    "gateway": { "id": "0102030405060708", "ip_addr": "127.0.0.1" },
    "dev": {
        "addr": "26011BDA",
        "app_s_key": "2B7E151628AED2A6ABF7158809CF4F3C",
        "nwk_s_key": "000102030405060708090A0B0C0D0E0F",
        "tx_freq": 868100000,
        "tx_bw": 125000,
        "tx_sf": 7
    },
    "mqtt": {
        "host": "localhost",
        "port": 1883,
        "username": "",
        "password": "",
        "topic_up": "eu868/gateway/0102030405060708/event/up"
    }
}"#;

const GOLDEN_ENVELOPE: &str = "0a1140da1b01268001000183f13a6b1e023292221208a0cff89d03120a1a0808c8d007100728012a380a10303130323033303430353036303730381a0b0880e2cfaa0610c0a9d33a38ccffffffffffffffff014500005c41720401020304800102";

fn simulation() -> Simulation {
    let config = SimulatorConfig::from_json(CONFIG).expect("config");
    Simulation::from_config(&config).expect("simulation")
}

fn clock() -> FixedClock {
    FixedClock::from_unix(1_700_000_000, 123_000_000).expect("in range")
}

#[tokio::test]
async fn test_reference_uplink_end_to_end() {
    let (publisher, mut receiver) = ChannelPublisher::new(1);
    let mut simulation = simulation();

    let report = simulation.run(&publisher, clock()).await.expect("run");
    assert_eq!(report.f_cnt, 1);
    assert_eq!(report.phy_payload.to_hex(), "40da1b01268001000183f13a6b1e023292");
    assert_eq!(report.envelope.to_hex(), GOLDEN_ENVELOPE);
    assert_eq!(report.topic, "eu868/gateway/0102030405060708/event/up");

    let message = receiver.recv().await.expect("published");
    assert_eq!(message.topic, report.topic);
    assert_eq!(message.payload, report.envelope.as_bytes());
}

#[tokio::test]
async fn test_each_run_takes_a_fresh_counter() {
    let (publisher, mut receiver) = ChannelPublisher::new(4);
    let mut simulation = simulation();
    let keys = SessionKeys::from_hex(
        "2B7E151628AED2A6ABF7158809CF4F3C",
        "000102030405060708090A0B0C0D0E0F",
    )
    .expect("keys");

    for expected in 1..=3u32 {
        let report = simulation.run(&publisher, SystemClock).await.expect("run");
        assert_eq!(report.f_cnt, expected);

        let message = receiver.recv().await.expect("published");
        let envelope = decode_uplink_frame(&message.payload).expect("envelope");
        let frame = DataFrame::parse(&envelope.phy_payload).expect("frame");
        assert!(frame.verify_mic(&keys.nwk_s_key, expected).expect("verify"));
        assert_eq!(
            frame.decrypt_payload(&keys.app_s_key, expected).expect("decrypt"),
            hex!("01020304")
        );
    }
    assert_eq!(simulation.session().next_f_cnt_up(), Some(4));
}

#[tokio::test]
async fn test_transport_failure_keeps_envelope() {
    let (publisher, receiver) = ChannelPublisher::new(1);
    drop(receiver);
    let mut simulation = simulation();

    let err = simulation.run(&publisher, clock()).await.expect_err("closed");
    assert_eq!(err.kind(), ErrorKind::TransportFailure);
    let publish = match err {
        LorasimError::Publish(publish) => publish,
        other => panic!("expected a publish error, got {other:?}"),
    };
    assert!(matches!(publish, PublishError::ChannelClosed { .. }));
    assert_eq!(Encoded::new(publish.into_payload()).to_hex(), GOLDEN_ENVELOPE);

    // The counter was spent on the failed uplink
    assert_eq!(simulation.session().next_f_cnt_up(), Some(2));
}

#[tokio::test]
async fn test_exhausted_counter_stops_the_pipeline() {
    let mut json: serde_json::Value = serde_json::from_str(CONFIG).expect("json");
    json["uplink"] = serde_json::json!({ "f_cnt": u32::MAX });
    let config: SimulatorConfig = serde_json::from_value(json).expect("config");
    let mut simulation = Simulation::from_config(&config).expect("simulation");
    let (publisher, _receiver) = ChannelPublisher::new(2);

    let report = simulation.run(&publisher, clock()).await.expect("last counter");
    assert_eq!(report.f_cnt, u32::MAX);

    let err = simulation.run(&publisher, clock()).await.expect_err("exhausted");
    assert_eq!(err.kind(), ErrorKind::CryptographicPrecondition);
}
