use googletest::prelude::*;

use super::super::*;

#[googletest::test]
fn test_try_from_raw_round_trip() {
    let mut raw = [0u8; 77];
    for (i, chunk) in raw.chunks_mut(5).take(PACKS_PER_BLOCK).enumerate() {
        chunk.copy_from_slice(&[i as u8, 0x11, 0x22, 0x33, 0x44]);
    }
    raw[75..77].copy_from_slice(&[0xEE, 0xFF]);

    let vaux = Vaux::try_from_raw(&raw);
    for (i, pack) in vaux.packs.iter().enumerate() {
        expect_that!(pack[0], eq(i as u8));
    }
    expect_that!(vaux.reserved_end, eq([0xEE, 0xFF]));
    expect_that!(vaux.to_raw(), eq(raw));
}
