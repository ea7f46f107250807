//! Keystream cipher vectors and self-inverse property

use hex_literal::hex;
use lorasim_cipher::{
    AppSKey, Cipher, CipherError, DevAddr, Direction, FrameContext, PayloadCipher,
    encrypt_or_decrypt,
};
use proptest::prelude::*;

const APP_S_KEY: [u8; 16] = hex!("2b7e151628aed2a6abf7158809cf4f3c");
const DEV_ADDR: DevAddr = DevAddr::new(0x2601_1BDA);

fn cipher() -> PayloadCipher {
    Cipher::payload(&AppSKey::from_bytes(APP_S_KEY))
}

#[test]
fn test_reference_payload_vector() {
    let ctx = FrameContext::uplink(DEV_ADDR, 1);
    let encrypted = cipher()
        .encrypt(&ctx, &hex!("01020304"))
        .expect("four byte payload should encrypt");
    assert_eq!(encrypted, hex!("83f13a6b"));
}

#[test]
fn test_multi_block_vector_truncates_last_block() {
    let ctx = FrameContext::uplink(DEV_ADDR, 1);
    let plaintext: Vec<u8> = (0u8..17).collect();
    let encrypted = cipher().encrypt(&ctx, &plaintext).expect("17 bytes");
    assert_eq!(encrypted, hex!("82f23b6c10ca129d405958b44c4caa4316"));
}

#[test]
fn test_downlink_and_high_counter_vector() {
    let ctx = FrameContext::new(DEV_ADDR, 0x0001_0002, Direction::Downlink);
    let plaintext: Vec<u8> = (0u8..32).collect();
    let encrypted = cipher().encrypt(&ctx, &plaintext).expect("32 bytes");
    assert_eq!(
        encrypted,
        hex!("200a0d7acbba9295fa1aa4c42588fa9f62c1081cf25dd196b9bad1dc3bbce11b")
    );
}

#[test]
fn test_published_lorawan_vector() {
    let key = AppSKey::from_hex("ec925802ae430ca77fd3dd73cb2cc588").expect("valid key");
    let ctx = FrameContext::uplink(DevAddr::from_hex("49BE7DF1").expect("valid addr"), 2);
    let encrypted = encrypt_or_decrypt(&key, &ctx, b"test").expect("encrypt");
    assert_eq!(encrypted, hex!("95437876"));
}

#[test]
fn test_empty_payload_yields_empty_output() {
    let ctx = FrameContext::uplink(DEV_ADDR, 1);
    assert!(cipher().encrypt(&ctx, &[]).expect("empty payload").is_empty());
}

#[test]
fn test_deterministic_across_calls() {
    let ctx = FrameContext::uplink(DEV_ADDR, 42);
    let data = b"deterministic keystream";
    let first = cipher().encrypt(&ctx, data).expect("first");
    let second = cipher().encrypt(&ctx, data).expect("second");
    assert_eq!(first, second);
}

#[test]
fn test_keystream_depends_on_direction_and_counter() {
    let data = [0u8; 16];
    let up = cipher()
        .apply(&FrameContext::uplink(DEV_ADDR, 1), &data)
        .expect("uplink");
    let down = cipher()
        .apply(&FrameContext::new(DEV_ADDR, 1, Direction::Downlink), &data)
        .expect("downlink");
    let next = cipher()
        .apply(&FrameContext::uplink(DEV_ADDR, 2), &data)
        .expect("next counter");
    assert_ne!(up, down);
    assert_ne!(up, next);
}

#[test]
fn test_self_inverse_for_boundary_lengths() {
    let ctx = FrameContext::uplink(DEV_ADDR, 7);
    for len in [0usize, 1, 15, 16, 17, 255] {
        let plaintext: Vec<u8> = (0..len).map(|i| (i * 7 % 256) as u8).collect();
        let encrypted = cipher().encrypt(&ctx, &plaintext).expect("encrypt");
        assert_eq!(encrypted.len(), len);
        let decrypted = cipher().decrypt(&ctx, &encrypted).expect("decrypt");
        assert_eq!(decrypted, plaintext, "length {len}");
    }
}

#[test]
fn test_rejects_payload_beyond_block_index() {
    let ctx = FrameContext::uplink(DEV_ADDR, 1);
    let max = vec![0u8; 255 * 16];
    assert_eq!(cipher().encrypt(&ctx, &max).expect("255 blocks").len(), max.len());

    let too_long = vec![0u8; 255 * 16 + 1];
    let err = cipher().encrypt(&ctx, &too_long).expect_err("256 blocks");
    assert!(matches!(err, CipherError::PayloadTooLong { len: 4081, max: 4080 }));
}

proptest! {
    #[test]
    fn prop_cipher_is_its_own_inverse(
        payload in proptest::collection::vec(any::<u8>(), 0..=255),
        addr in any::<u32>(),
        f_cnt in any::<u32>(),
        downlink in any::<bool>(),
    ) {
        let direction = if downlink { Direction::Downlink } else { Direction::Uplink };
        let ctx = FrameContext::new(DevAddr::new(addr), f_cnt, direction);
        let encrypted = cipher().encrypt(&ctx, &payload).expect("encrypt");
        prop_assert_eq!(encrypted.len(), payload.len());
        prop_assert_eq!(cipher().decrypt(&ctx, &encrypted).expect("decrypt"), payload);
    }
}
