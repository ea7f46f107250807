//! Golden uplinks, session counter discipline and parse-back

use hex_literal::hex;
use lorasim_cipher::{DevAddr, FrameContext, SessionKeys};
use lorasim_common::ErrorKind;
use lorasim_frame::{AbpSession, DataFrame, FrameError, MType, Uplink, pack_abp_uplink};
use proptest::prelude::*;

const APP_S_KEY: &str = "2B7E151628AED2A6ABF7158809CF4F3C";
const NWK_S_KEY: &str = "000102030405060708090A0B0C0D0E0F";
const DEV_ADDR: DevAddr = DevAddr::new(0x2601_1BDA);

fn keys() -> SessionKeys {
    SessionKeys::from_hex(APP_S_KEY, NWK_S_KEY).expect("valid keys")
}

fn session() -> AbpSession {
    AbpSession::new(DEV_ADDR, keys()).starting_at(1)
}

#[test]
fn test_golden_uplink() {
    let mut session = session();
    let frame = Uplink::unconfirmed()
        .port(1)
        .payload(hex!("01020304").to_vec())
        .build(&mut session)
        .expect("frame");

    let encoded = frame.to_encoded();
    assert_eq!(encoded.to_hex(), "40da1b01268001000183f13a6b1e023292");
    assert_eq!(encoded.to_base64(), "QNobASaAAQABg/E6ax4CMpI=");
    assert_eq!(frame.mic().to_bytes(), hex!("1e023292"));
}

#[test]
fn test_pack_abp_uplink_matches_builder() {
    let frame = pack_abp_uplink(DEV_ADDR, &keys(), 1, 1, &hex!("01020304")).expect("frame");
    assert_eq!(frame.encode(), hex!("40da1b01268001000183f13a6b1e023292"));
}

#[test]
fn test_published_lorawan_frame() {
    let keys = SessionKeys::from_hex(
        "ec925802ae430ca77fd3dd73cb2cc588",
        "44024241ed4ce9a68c6a8bc055233fd3",
    )
    .expect("valid keys");
    let frame = Uplink::unconfirmed()
        .adr(false)
        .port(1)
        .payload(b"test".to_vec())
        .seal(&keys, &FrameContext::uplink(DevAddr::new(0x49be_7df1), 2))
        .expect("frame");
    assert_eq!(frame.encode(), hex!("40f17dbe4900020001954378762b11ff0d"));
}

#[test]
fn test_empty_body_without_port() {
    let frame = Uplink::unconfirmed()
        .without_port()
        .seal(&keys(), &FrameContext::uplink(DEV_ADDR, 7))
        .expect("frame");
    assert_eq!(frame.encode(), hex!("40da1b0126800700bce32641"));
}

#[test]
fn test_confirmed_uplink_with_f_opts_and_high_counter() {
    let frame = Uplink::confirmed()
        .port(10)
        .f_opts(vec![0x02])
        .payload(hex!("cafe").to_vec())
        .seal(&keys(), &FrameContext::uplink(DEV_ADDR, 0x0001_0005))
        .expect("frame");
    assert_eq!(frame.mac_header().mtype, MType::ConfirmedDataUp);
    assert_eq!(frame.encode(), hex!("80da1b0126810500020ac4d2d0f19379"));
}

#[test]
fn test_port_zero_is_rejected() {
    let mut session = session();
    let err = Uplink::unconfirmed()
        .port(0)
        .payload(vec![1])
        .build(&mut session)
        .expect_err("port 0");
    assert_eq!(err, FrameError::ReservedPort(0));
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
    // Rejected before a counter was taken
    assert_eq!(session.next_f_cnt_up(), Some(1));
}

#[test]
fn test_missing_port_with_body_is_rejected() {
    let mut session = session();
    let err = Uplink::unconfirmed()
        .without_port()
        .payload(vec![1])
        .build(&mut session)
        .expect_err("body without port");
    assert_eq!(err, FrameError::MissingPort);
}

#[test]
fn test_oversized_uplink_is_rejected_before_counter() {
    let mut session = session();
    let err = Uplink::unconfirmed()
        .payload(vec![0; 247])
        .build(&mut session)
        .expect_err("too long");
    assert_eq!(err, FrameError::FrameTooLong { len: 256, max: 255 });
    assert_eq!(session.next_f_cnt_up(), Some(1));

    assert!(Uplink::unconfirmed().payload(vec![0; 246]).build(&mut session).is_ok());
}

#[test]
fn test_long_f_opts_are_rejected() {
    let err = Uplink::unconfirmed()
        .f_opts(vec![0; 16])
        .seal(&keys(), &FrameContext::uplink(DEV_ADDR, 1))
        .expect_err("16 bytes of FOpts");
    assert_eq!(err, FrameError::FOptsTooLong { len: 16 });
}

#[test]
fn test_session_issues_each_counter_once() {
    let mut session = session();
    let first = session.issue_next_uplink().expect("counter");
    let second = session.issue_next_uplink().expect("counter");
    assert_eq!(first.f_cnt, 1);
    assert_eq!(second.f_cnt, 2);
    assert_eq!(session.next_f_cnt_up(), Some(3));
}

#[test]
fn test_session_refuses_regression() {
    let mut session = session();
    session.resume_at(100).expect("forward");
    let err = session.resume_at(99).expect_err("backwards");
    assert_eq!(
        err,
        FrameError::CounterRegression {
            requested: 99,
            next: 100
        }
    );
    assert_eq!(err.kind(), ErrorKind::CryptographicPrecondition);

    // Resuming at the current position is a no-op
    session.resume_at(100).expect("same position");
    assert_eq!(session.issue_next_uplink().expect("counter").f_cnt, 100);
    assert!(session.resume_at(100).is_err());
}

#[test]
fn test_session_exhaustion() {
    let mut session = AbpSession::new(DEV_ADDR, keys()).starting_at(u32::MAX);
    assert_eq!(session.issue_next_uplink().expect("last").f_cnt, u32::MAX);
    assert_eq!(session.next_f_cnt_up(), None);

    let err = Uplink::unconfirmed().build(&mut session).expect_err("exhausted");
    assert_eq!(err, FrameError::CounterExhausted);
    assert_eq!(err.kind(), ErrorKind::CryptographicPrecondition);
}

#[test]
fn test_parse_back_golden_frame() {
    let keys = keys();
    let frame = DataFrame::parse(&hex!("40da1b01268001000183f13a6b1e023292")).expect("parse");

    assert_eq!(frame.mac_header().mtype, MType::UnconfirmedDataUp);
    assert_eq!(frame.mac_payload().header().dev_addr(), DEV_ADDR);
    assert!(frame.mac_payload().header().f_ctrl().adr);
    assert_eq!(frame.mac_payload().f_port(), Some(1));
    assert!(frame.verify_mic(&keys.nwk_s_key, 1).expect("verify"));
    assert_eq!(
        frame.decrypt_payload(&keys.app_s_key, 1).expect("decrypt"),
        hex!("01020304")
    );
}

#[test]
fn test_parse_needs_full_counter_to_verify() {
    let keys = keys();
    let frame = DataFrame::parse(&hex!("80da1b0126810500020ac4d2d0f19379")).expect("parse");
    assert_eq!(frame.mac_payload().header().f_opts(), &[0x02]);
    assert!(frame.verify_mic(&keys.nwk_s_key, 0x0001_0005).expect("verify"));
    assert!(!frame.verify_mic(&keys.nwk_s_key, 0x0002_0005).expect("verify"));
    assert_eq!(
        frame.verify_mic(&keys.nwk_s_key, 6),
        Err(FrameError::CounterMismatch { f_cnt: 6, wire: 5 })
    );
}

#[test]
fn test_parse_rejects_non_data_and_short_input() {
    assert_eq!(
        DataFrame::parse(&hex!("00000000000000000000000000")),
        Err(FrameError::NotDataMessage(MType::JoinRequest))
    );
    assert_eq!(
        DataFrame::parse(&hex!("40da1b01268001")),
        Err(FrameError::Truncated { len: 7, min: 12 })
    );
}

proptest! {
    #[test]
    fn prop_build_then_parse_recovers_payload(
        payload in prop::collection::vec(any::<u8>(), 0..64),
        port in 1u8..=255,
        f_cnt in any::<u32>(),
    ) {
        let keys = keys();
        let frame = Uplink::unconfirmed()
            .port(port)
            .payload(payload.clone())
            .seal(&keys, &FrameContext::uplink(DEV_ADDR, f_cnt))
            .expect("frame");
        let bytes = frame.encode();
        prop_assert_eq!(bytes.len(), 1 + 7 + 1 + payload.len() + 4);

        let parsed = DataFrame::parse(&bytes).expect("parse");
        prop_assert!(parsed.verify_mic(&keys.nwk_s_key, f_cnt).expect("verify"));
        prop_assert_eq!(parsed.decrypt_payload(&keys.app_s_key, f_cnt).expect("decrypt"), payload);
    }
}
