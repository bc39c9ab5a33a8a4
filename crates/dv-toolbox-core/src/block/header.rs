//! The single header block that starts every DIF sequence.

use arbitrary_int::{u1, u3, u4, u6, Number};
use bitbybit::bitfield;
use garde::Validate;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::{file, pack::PackContext};


/// The 77-byte payload of a header DIF block.
///
/// DV standards:
///
/// - SMPTE 306M-2002 Section 11.2.2 Header
/// - IEC 61834-2:1998 Section 11.4.2 Header
///
/// Binary layout of the first 5 bytes (big-endian bit numbering); the remaining 72 bytes are
/// `reserved_end`, preserved verbatim across decode/encode:
///
/// ```text
/// byte 0: dsf[1] | zero=0[1] | reserved_0[6]
/// byte 1: dftia[4] | reserved_1=1[1] | apt[3]
/// byte 2: tf1[1] | reserved_2[4] | ap1[3]
/// byte 3: tf2[1] | reserved_3[4] | ap2[3]
/// byte 4: tf3[1] | reserved_4[4] | ap3[3]
/// ```
///
/// Bytes 2 through 4 share a field order (flag bit first) that differs from byte 1's (flag bit
/// in the middle): they are two distinct bit layouts, not one struct reused three times.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Validate, Serialize, Deserialize)]
#[garde(context(PackContext))]
pub struct Header {
    /// The video system that this DIF sequence was recorded under.
    #[garde(skip)]
    pub system: file::System,

    /// Track pickup: arbitrary bits carried straight through from `dftia`.
    #[garde(skip)]
    pub track_pickup: u8,

    /// Track application ID.
    #[garde(skip)]
    pub track_application_id: u8,

    /// `true` if the first track in this frame has already been recorded.
    #[garde(skip)]
    pub track_flag_1: bool,

    /// Audio application ID.
    #[garde(skip)]
    pub audio_application_id: u8,

    /// Reserved nibble alongside [`Header::track_flag_1`] and [`Header::audio_application_id`],
    /// preserved verbatim.
    #[garde(skip)]
    pub reserved_2: u8,

    /// `true` if the second track in this frame has already been recorded.
    #[garde(skip)]
    pub track_flag_2: bool,

    /// Video application ID.
    #[garde(skip)]
    pub video_application_id: u8,

    /// Reserved nibble alongside [`Header::track_flag_2`] and [`Header::video_application_id`],
    /// preserved verbatim.
    #[garde(skip)]
    pub reserved_3: u8,

    /// `true` if the third track in this frame has already been recorded.
    #[garde(skip)]
    pub track_flag_3: bool,

    /// Subcode application ID.
    #[garde(skip)]
    pub subcode_application_id: u8,

    /// Reserved nibble alongside [`Header::track_flag_3`] and [`Header::subcode_application_id`],
    /// preserved verbatim.
    #[garde(skip)]
    pub reserved_4: u8,

    /// Reserved bytes following the fixed-layout header fields, preserved verbatim.
    #[garde(skip)]
    pub reserved_end: [u8; 72],
}

#[bitfield(u8)]
struct RawHeaderByte0 {
    #[bit(7, rw)]
    dsf: u1,
    #[bit(6, rw)]
    zero: u1,
    #[bits(0..=5, rw)]
    reserved_0: u6,
}

/// Byte 1 (`dftia`/`reserved_1`/`apt`): the flag-like bit sits in the middle of the byte.
#[bitfield(u8)]
struct RawHeaderDftiaByte {
    #[bits(4..=7, rw)]
    high_nibble: u4,
    #[bit(3, rw)]
    reserved: u1,
    #[bits(0..=2, rw)]
    application_id: u3,
}

/// Bytes 2 through 4 (`tf1..3`/`reserved_2..4`/`ap1..3`): the flag bit is the top bit of the byte,
/// followed by a 4-bit reserved nibble.
#[bitfield(u8)]
struct RawHeaderApByte {
    #[bit(7, rw)]
    track_flag: u1,
    #[bits(3..=6, rw)]
    reserved: u4,
    #[bits(0..=2, rw)]
    application_id: u3,
}

/// Error decoding the raw bytes of a [`Header`] block payload.
#[derive(Debug, snafu::Snafu, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum HeaderError {
    #[snafu(display("reserved \"zero\" bit of header block must be cleared"))]
    ZeroBitSet,
}

impl Header {
    /// Parse a [`Header`] from the 77-byte payload of a header DIF block.
    pub fn try_from_raw(raw: &[u8; 77]) -> Result<Self, HeaderError> {
        let byte0 = RawHeaderByte0::new_with_raw_value(raw[0]);
        ensure!(byte0.zero() == u1::new(0), ZeroBitSetSnafu);
        let dftia_byte = RawHeaderDftiaByte::new_with_raw_value(raw[1]);
        let ap1_byte = RawHeaderApByte::new_with_raw_value(raw[2]);
        let ap2_byte = RawHeaderApByte::new_with_raw_value(raw[3]);
        let ap3_byte = RawHeaderApByte::new_with_raw_value(raw[4]);

        let mut reserved_end = [0u8; 72];
        reserved_end.copy_from_slice(&raw[5..77]);

        Ok(Header {
            system: if byte0.dsf() == u1::new(0) { file::System::Sys525_60 } else { file::System::Sys625_50 },
            track_pickup: dftia_byte.high_nibble().value(),
            track_application_id: dftia_byte.application_id().value(),
            track_flag_1: ap1_byte.track_flag() == u1::new(1),
            audio_application_id: ap1_byte.application_id().value(),
            reserved_2: ap1_byte.reserved().value(),
            track_flag_2: ap2_byte.track_flag() == u1::new(1),
            video_application_id: ap2_byte.application_id().value(),
            reserved_3: ap2_byte.reserved().value(),
            track_flag_3: ap3_byte.track_flag() == u1::new(1),
            subcode_application_id: ap3_byte.application_id().value(),
            reserved_4: ap3_byte.reserved().value(),
            reserved_end,
        })
    }

    /// Serialize this [`Header`] back to the 77-byte payload of a header DIF block.
    pub fn to_raw(&self) -> [u8; 77] {
        let byte0 = RawHeaderByte0::builder()
            .with_dsf(u1::new(if self.system == file::System::Sys525_60 { 0 } else { 1 }))
            .with_zero(u1::new(0))
            .with_reserved_0(u6::new(0x3F))
            .build()
            .raw_value();
        let dftia_byte = RawHeaderDftiaByte::builder()
            .with_high_nibble(u4::new(self.track_pickup))
            .with_reserved(u1::new(1))
            .with_application_id(u3::new(self.track_application_id))
            .build()
            .raw_value();
        let ap1_byte = RawHeaderApByte::builder()
            .with_track_flag(u1::new(self.track_flag_1 as u8))
            .with_reserved(u4::new(self.reserved_2))
            .with_application_id(u3::new(self.audio_application_id))
            .build()
            .raw_value();
        let ap2_byte = RawHeaderApByte::builder()
            .with_track_flag(u1::new(self.track_flag_2 as u8))
            .with_reserved(u4::new(self.reserved_3))
            .with_application_id(u3::new(self.video_application_id))
            .build()
            .raw_value();
        let ap3_byte = RawHeaderApByte::builder()
            .with_track_flag(u1::new(self.track_flag_3 as u8))
            .with_reserved(u4::new(self.reserved_4))
            .with_application_id(u3::new(self.subcode_application_id))
            .build()
            .raw_value();

        let mut raw = [0u8; 77];
        raw[0] = byte0;
        raw[1] = dftia_byte;
        raw[2] = ap1_byte;
        raw[3] = ap2_byte;
        raw[4] = ap3_byte;
        raw[5..77].copy_from_slice(&self.reserved_end);
        raw
    }
}
