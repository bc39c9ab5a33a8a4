//! The 3-byte block identifier found at the start of every 80-byte DIF block.

use garde::Validate;
use snafu::prelude::*;

use crate::{file::ValidInfoMethods, pack::PackContext};

#[cfg(test)]
mod tests;

/// DIF block type, encoded in the `sct` field of [`BlockId`].
///
/// DV standards:
/// - SMPTE 306M-2002 Section 11.2.1 ID / Table 52 - DIF block type
/// - IEC 61834-2:1998 Section 11.4.1 ID part / Table 36 - DIF block type
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum BlockType {
    /// The single header block starting every DIF sequence.
    Header,

    /// One of the two subcode blocks in a DIF sequence.
    Subcode,

    /// One of the three video-auxiliary blocks in a DIF sequence.
    Vaux,

    /// One of the nine audio blocks in a DIF sequence.
    Audio,

    /// One of the 135 video blocks in a DIF sequence.
    Video,
}

impl BlockType {
    /// The maximum [`BlockId::dif_block`] value permitted for this block type within a single
    /// DIF sequence.
    fn max_dif_block(self) -> u8 {
        match self {
            BlockType::Header => 0,
            BlockType::Subcode => 1,
            BlockType::Vaux => 2,
            BlockType::Audio => 8,
            BlockType::Video => 134,
        }
    }
}

impl TryFrom<u8> for BlockType {
    type Error = BlockIdError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x0 => Ok(BlockType::Header),
            0x1 => Ok(BlockType::Subcode),
            0x2 => Ok(BlockType::Vaux),
            0x3 => Ok(BlockType::Audio),
            0x4 => Ok(BlockType::Video),
            sct => UnknownBlockTypeSnafu { sct }.fail(),
        }
    }
}

impl From<BlockType> for u8 {
    fn from(value: BlockType) -> Self {
        match value {
            BlockType::Header => 0x0,
            BlockType::Subcode => 0x1,
            BlockType::Vaux => 0x2,
            BlockType::Audio => 0x3,
            BlockType::Video => 0x4,
        }
    }
}

/// Common DIF block identifier found at the start of every DIF block.
///
/// DV standards:
/// - SMPTE 306M-2002 Section 11.2.1 ID / Table 51 - ID data in a DIF block
/// - IEC 61834-2:1998 Section 11.4.1 ID part / Figure 66 - ID data in a DIF block
///
/// Binary layout of the 3 bytes (big-endian bit numbering):
///
/// ```text
/// byte 0: sct[3] | reserved_0=1[1] | seq[4]
/// byte 1: dseq[4] | fsc[1] | reserved_1=7[3]
/// byte 2: dbn[8]
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Validate)]
#[garde(context(PackContext))]
pub struct BlockId {
    /// Which of the five DIF block flavors this is.
    #[garde(skip)]
    pub block_type: BlockType,

    /// Sequence number; arbitrary bits in SMPTE 306M, but a real sequence number under IEC
    /// 61834-2.
    ///
    /// The value is kept constant throughout an entire frame, except that header and subcode
    /// blocks always carry `0xF` here.
    #[garde(custom(check_sequence(&self)))]
    pub sequence: u8,

    /// Channel number the DIF block appears in: `0` or `1`.
    #[garde(skip)]
    pub channel: u8,

    /// DIF sequence number: `[0, 9]` for the 525-60 system, `[0, 11]` for the 625-50 system.
    #[garde(custom(check_dif_sequence))]
    pub dif_sequence: u8,

    /// DIF block number: the index of this block among other blocks of the same
    /// [`BlockId::block_type`] within the DIF sequence.
    #[garde(custom(check_dif_block(&self)))]
    pub dif_block: u8,
}

fn check_sequence(block_id: &BlockId) -> impl FnOnce(&u8, &PackContext) -> garde::Result + '_ {
    |sequence, _ctx| {
        if matches!(block_id.block_type, BlockType::Header | BlockType::Subcode)
            && *sequence != 0xF
        {
            return Err(garde::Error::new(format!(
                "header or subcode block has unexpected non-0xF sequence number of {sequence:#03X}"
            )));
        }
        Ok(())
    }
}

fn check_dif_sequence(dif_sequence: &u8, ctx: &PackContext) -> garde::Result {
    let max_dif_sequence = ctx.file_info.video_frame_dif_sequence_count();
    if *dif_sequence >= max_dif_sequence {
        return Err(garde::Error::new(format!(
            "DIF sequence number {dif_sequence} is too high for system {}",
            ctx.file_info.system()
        )));
    }
    Ok(())
}

fn check_dif_block(block_id: &BlockId) -> impl FnOnce(&u8, &PackContext) -> garde::Result + '_ {
    |dif_block, _ctx| {
        let max = block_id.block_type.max_dif_block();
        if *dif_block > max {
            return Err(garde::Error::new(format!(
                "DIF block number {dif_block} is too high for a block type of \
                {:?}",
                block_id.block_type
            )));
        }
        Ok(())
    }
}

/// Error decoding the raw bytes of a [`BlockId`].
#[derive(Debug, Snafu, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum BlockIdError {
    #[snafu(display("reserved bits in DIF block identifier were unexpectedly cleared"))]
    ReservedBits,

    #[snafu(display("DIF block identifier has unrecognized block type value {sct:#03X}"))]
    UnknownBlockType { sct: u8 },
}

impl BlockId {
    /// Parse a [`BlockId`] from the first 3 bytes of a raw 80-byte DIF block.
    ///
    /// The returned value is not validated against a [`PackContext`]; use
    /// [`garde::Validate::validate_with`] to do so.
    pub fn try_from_raw(id_bytes: &[u8; 3]) -> Result<Self, BlockIdError> {
        let sct = (id_bytes[0] >> 5) & 0x7;
        let reserved_0 = (id_bytes[0] >> 4) & 0x1;
        let seq = id_bytes[0] & 0xF;
        let dseq = (id_bytes[1] >> 4) & 0xF;
        let fsc = (id_bytes[1] >> 3) & 0x1;
        let reserved_1 = id_bytes[1] & 0x7;
        let dbn = id_bytes[2];

        if reserved_0 != 0x1 || reserved_1 != 0x7 {
            return ReservedBitsSnafu.fail();
        }

        Ok(BlockId {
            block_type: BlockType::try_from(sct)?,
            sequence: seq,
            channel: fsc,
            dif_sequence: dseq,
            dif_block: dbn,
        })
    }

    /// Serialize this [`BlockId`] back to the first 3 bytes of a raw 80-byte DIF block.
    ///
    /// Callers should validate the [`BlockId`] prior to calling this function; the standard's
    /// invariants are not re-checked here.
    pub fn to_raw(&self) -> [u8; 3] {
        let sct = u8::from(self.block_type);
        [
            (sct << 5) | (0x1 << 4) | (self.sequence & 0xF),
            ((self.dif_sequence & 0xF) << 4) | ((self.channel & 0x1) << 3) | 0x7,
            self.dif_block,
        ]
    }
}
