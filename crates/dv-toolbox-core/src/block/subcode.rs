//! The two subcode blocks present in every DIF sequence.

use garde::Validate;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::pack::{PackContext, RawPack};


/// Number of sub-code sync blocks (SSYBs) carried by a single subcode DIF block.
pub const SYNC_BLOCKS_PER_DIF_BLOCK: usize = 6;

/// One of the six sub-code sync blocks (SSYBs) held by a subcode DIF block.
///
/// DV standards:
///
/// - IEC 61834-2:1998 Section 3.5.3 ID part (Subcode sector)
/// - SMPTE 306M-2002 Section 11.2.3 Subcode
///
/// Binary layout of the 3-byte ID plus 5-byte pack (big-endian bit numbering):
///
/// ```text
/// byte 0: reserved_0=0xF[4] | ssyb_index[4]
/// byte 1: reserved_1=0b11[2] | track_application_id[3] | subcode_application_id[3]
/// byte 2: parity=0xFF[8]
/// bytes 3..=7: pack
/// ```
///
/// The ID's third byte is a parity byte that is always `0xFF` over a digital interface; it is
/// validated on decode rather than stored, since it carries no information of its own.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Validate, Serialize, Deserialize)]
#[garde(context(PackContext))]
pub struct SyncBlock {
    /// Absolute sync block number within the DIF sequence, in range `[0, 11]`.
    ///
    /// The two physical subcode DIF blocks within a sequence each carry six of these; block
    /// `dif_block == 0` carries indices `[0, 5]` and `dif_block == 1` carries `[6, 11]`.
    #[garde(range(min = 0, max = 11))]
    pub ssyb_index: u8,

    /// Track application ID, repeated on every sync block of the frame.
    #[garde(skip)]
    pub track_application_id: u8,

    /// Subcode application ID, repeated on every sync block of the frame.
    #[garde(skip)]
    pub subcode_application_id: u8,

    /// The raw 5-byte pack carried by this sync block.
    ///
    /// The pack header byte (first byte) identifies the pack type; see [`crate::pack::Type`].
    #[garde(skip)]
    pub pack: RawPack,
}

/// Error decoding the raw bytes of a [`SyncBlock`].
#[derive(Debug, Snafu, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum SyncBlockError {
    #[snafu(display("reserved bits in subcode sync block were unexpectedly cleared"))]
    ReservedBits,

    #[snafu(display("parity byte of subcode sync block ID was {value:#04X}, not 0xFF"))]
    Parity { value: u8 },
}

impl SyncBlock {
    fn try_from_raw(raw: &[u8; 8]) -> Result<Self, SyncBlockError> {
        let reserved_0 = (raw[0] >> 4) & 0xF;
        let ssyb_index = raw[0] & 0xF;
        let reserved_1 = (raw[1] >> 6) & 0x3;
        let track_application_id = (raw[1] >> 3) & 0x7;
        let subcode_application_id = raw[1] & 0x7;

        if reserved_0 != 0xF || reserved_1 != 0x3 {
            return ReservedBitsSnafu.fail();
        }
        ensure!(raw[2] == 0xFF, ParitySnafu { value: raw[2] });

        Ok(SyncBlock {
            ssyb_index,
            track_application_id,
            subcode_application_id,
            pack: raw[3..8].try_into().unwrap(),
        })
    }

    fn to_raw(&self) -> [u8; 8] {
        let mut raw = [0u8; 8];
        raw[0] = 0xF0 | (self.ssyb_index & 0xF);
        raw[1] = 0xC0 | ((self.track_application_id & 0x7) << 3) | (self.subcode_application_id & 0x7);
        raw[2] = 0xFF;
        raw[3..8].copy_from_slice(&self.pack);
        raw
    }
}

/// Number of bytes occupied by a single sync block: a 3-byte ID plus a 5-byte pack.
const SYNC_BLOCK_SIZE: usize = 8;

/// One of the two subcode DIF blocks present in every DIF sequence.
///
/// The 77-byte payload is six [`SyncBlock`] entries of 8 bytes each (48 bytes), followed by 29
/// reserved bytes preserved verbatim across decode/encode.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Validate, Serialize, Deserialize)]
#[garde(context(PackContext))]
pub struct Subcode {
    /// The six sync blocks carried by this subcode DIF block.
    #[garde(dive)]
    pub sync_blocks: [SyncBlock; SYNC_BLOCKS_PER_DIF_BLOCK],

    /// Reserved bytes following the sync blocks, preserved verbatim.
    #[garde(skip)]
    pub reserved_end: [u8; 29],
}

impl Subcode {
    /// Parse a [`Subcode`] from the 77-byte payload of a subcode DIF block.
    pub fn try_from_raw(raw: &[u8; 77]) -> Result<Self, SyncBlockError> {
        let mut sync_blocks = [SyncBlock {
            ssyb_index: 0,
            track_application_id: 0,
            subcode_application_id: 0,
            pack: [0; 5],
        }; SYNC_BLOCKS_PER_DIF_BLOCK];
        for (i, sync_block) in sync_blocks.iter_mut().enumerate() {
            let offset = i * SYNC_BLOCK_SIZE;
            *sync_block =
                SyncBlock::try_from_raw(raw[offset..offset + SYNC_BLOCK_SIZE].try_into().unwrap())?;
        }

        let mut reserved_end = [0u8; 29];
        let tail_start = SYNC_BLOCKS_PER_DIF_BLOCK * SYNC_BLOCK_SIZE;
        reserved_end.copy_from_slice(&raw[tail_start..77]);

        Ok(Subcode { sync_blocks, reserved_end })
    }

    /// Serialize this [`Subcode`] back to the 77-byte payload of a subcode DIF block.
    pub fn to_raw(&self) -> [u8; 77] {
        let mut raw = [0u8; 77];
        for (i, sync_block) in self.sync_blocks.iter().enumerate() {
            let offset = i * SYNC_BLOCK_SIZE;
            raw[offset..offset + SYNC_BLOCK_SIZE].copy_from_slice(&sync_block.to_raw());
        }
        let tail_start = SYNC_BLOCKS_PER_DIF_BLOCK * SYNC_BLOCK_SIZE;
        raw[tail_start..77].copy_from_slice(&self.reserved_end);
        raw
    }
}
