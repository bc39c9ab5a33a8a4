use googletest::prelude::*;

use super::super::*;

#[googletest::test]
fn test_try_from_raw_round_trip() {
    let mut raw = [0u8; 77];
    raw[0..5].copy_from_slice(&[0x50, 0xCE, 0x30, 0xC0, 0xD1]);
    for (i, byte) in raw[5..77].iter_mut().enumerate() {
        *byte = i as u8;
    }

    let audio = Audio::try_from_raw(&raw);
    expect_that!(audio.pack, eq([0x50, 0xCE, 0x30, 0xC0, 0xD1]));
    expect_that!(audio.audio_data[0], eq(0));
    expect_that!(audio.audio_data[71], eq(71));
    expect_that!(audio.to_raw(), eq(raw));
}
