//! MIC vectors and bit-flip sensitivity

use hex_literal::hex;
use lorasim_cipher::{Cipher, CipherError, DevAddr, Direction, FrameContext, Mic, MicGenerator, NwkSKey};
use proptest::prelude::*;

const NWK_S_KEY: [u8; 16] = hex!("000102030405060708090a0b0c0d0e0f");
const DEV_ADDR: DevAddr = DevAddr::new(0x2601_1BDA);
const MHDR: u8 = 0x40;
const MAC_PAYLOAD: [u8; 12] = hex!("da1b01268001000183f13a6b");

fn generator() -> MicGenerator {
    Cipher::mic(&NwkSKey::from_bytes(NWK_S_KEY))
}

#[test]
fn test_reference_mic_vector() {
    let ctx = FrameContext::uplink(DEV_ADDR, 1);
    let mic = generator().compute(&ctx, MHDR, &MAC_PAYLOAD).expect("mic");
    assert_eq!(mic, Mic(hex!("1e023292")));
}

#[test]
fn test_published_lorawan_mic_vector() {
    let key = NwkSKey::from_hex("44024241ed4ce9a68c6a8bc055233fd3").expect("valid key");
    let ctx = FrameContext::uplink(DevAddr::new(0x49be_7df1), 2);
    let mic = MicGenerator::new(&key)
        .compute(&ctx, 0x40, &hex!("f17dbe490002000195437876"))
        .expect("mic");
    assert_eq!(mic.to_bytes(), hex!("2b11ff0d"));
}

#[test]
fn test_verify_accepts_own_mic_and_rejects_other() {
    let ctx = FrameContext::uplink(DEV_ADDR, 1);
    let mic_gen = generator();
    let mic = mic_gen.compute(&ctx, MHDR, &MAC_PAYLOAD).expect("mic");
    assert!(mic_gen.verify(&ctx, MHDR, &MAC_PAYLOAD, &mic).expect("verify"));
    assert!(!mic_gen
        .verify(&ctx, MHDR, &MAC_PAYLOAD, &Mic(hex!("00000000")))
        .expect("verify"));
}

#[test]
fn test_full_counter_is_authenticated() {
    // Same low 16 bits on the wire, different high bits
    let mic_gen = generator();
    let low = mic_gen
        .compute(&FrameContext::uplink(DEV_ADDR, 0x0000_0001), MHDR, &MAC_PAYLOAD)
        .expect("mic");
    let high = mic_gen
        .compute(&FrameContext::uplink(DEV_ADDR, 0x0001_0001), MHDR, &MAC_PAYLOAD)
        .expect("mic");
    assert_ne!(low, high);
}

#[test]
fn test_rejects_message_longer_than_length_byte() {
    let ctx = FrameContext::uplink(DEV_ADDR, 1);
    assert!(generator().compute(&ctx, MHDR, &[0u8; 254]).is_ok());
    let err = generator()
        .compute(&ctx, MHDR, &[0u8; 255])
        .expect_err("256-byte message");
    assert_eq!(err, CipherError::MessageTooLong { len: 256, max: 255 });
}

fn flip(bytes: &mut [u8], bit: usize) {
    let idx = bit % (bytes.len() * 8);
    bytes[idx / 8] ^= 1 << (idx % 8);
}

proptest! {
    #[test]
    fn prop_payload_bit_flip_changes_mic(
        payload in proptest::collection::vec(any::<u8>(), 1..64),
        bit in any::<usize>(),
    ) {
        let ctx = FrameContext::uplink(DEV_ADDR, 1);
        let original = generator().compute(&ctx, MHDR, &payload).expect("mic");
        let mut mutated = payload.clone();
        flip(&mut mutated, bit);
        prop_assert_ne!(original, generator().compute(&ctx, MHDR, &mutated).expect("mic"));
    }

    #[test]
    fn prop_header_bit_flip_changes_mic(bit in 0u32..8) {
        let ctx = FrameContext::uplink(DEV_ADDR, 1);
        let original = generator().compute(&ctx, MHDR, &MAC_PAYLOAD).expect("mic");
        let mutated = generator().compute(&ctx, MHDR ^ (1 << bit), &MAC_PAYLOAD).expect("mic");
        prop_assert_ne!(original, mutated);
    }

    #[test]
    fn prop_dev_addr_bit_flip_changes_mic(addr in any::<u32>(), bit in 0u32..32) {
        let original = generator()
            .compute(&FrameContext::uplink(DevAddr::new(addr), 1), MHDR, &MAC_PAYLOAD)
            .expect("mic");
        let mutated = generator()
            .compute(&FrameContext::uplink(DevAddr::new(addr ^ (1 << bit)), 1), MHDR, &MAC_PAYLOAD)
            .expect("mic");
        prop_assert_ne!(original, mutated);
    }

    #[test]
    fn prop_counter_bit_flip_changes_mic(f_cnt in any::<u32>(), bit in 0u32..32) {
        let original = generator()
            .compute(&FrameContext::uplink(DEV_ADDR, f_cnt), MHDR, &MAC_PAYLOAD)
            .expect("mic");
        let mutated = generator()
            .compute(&FrameContext::uplink(DEV_ADDR, f_cnt ^ (1 << bit)), MHDR, &MAC_PAYLOAD)
            .expect("mic");
        prop_assert_ne!(original, mutated);
    }

    #[test]
    fn prop_direction_changes_mic(f_cnt in any::<u32>()) {
        let up = generator()
            .compute(&FrameContext::new(DEV_ADDR, f_cnt, Direction::Uplink), MHDR, &MAC_PAYLOAD)
            .expect("mic");
        let down = generator()
            .compute(&FrameContext::new(DEV_ADDR, f_cnt, Direction::Downlink), MHDR, &MAC_PAYLOAD)
            .expect("mic");
        prop_assert_ne!(up, down);
    }
}
