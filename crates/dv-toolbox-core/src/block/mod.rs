//! Model structures for working with the 80-byte DIF blocks that a DV frame is composed of, as
//! defined in [IEC 61834-2](https://webstore.iec.ch/en/publication/5984) and related standards.
//!
//! The [`BlockId`] type models the 3-byte identifier common to every DIF block.  The body of each
//! block is modeled by one of [`Header`], [`Subcode`], [`Vaux`], [`Audio`], or [`Video`],
//! depending on [`BlockId::block_type`].

pub use audio::Audio;
pub use header::{Header, HeaderError};
pub use id::*;
pub use subcode::{SyncBlock, SyncBlockError, Subcode, SYNC_BLOCKS_PER_DIF_BLOCK};
pub use vaux::{Vaux, PACKS_PER_BLOCK};
pub use video::Video;

mod audio;
mod header;
mod id;
mod subcode;
mod vaux;
mod video;

#[cfg(test)]
pub(crate) mod testutil;

/// Size, in bytes, of the payload that follows a block's 3-byte [`BlockId`].
pub const PAYLOAD_SIZE: usize = 77;

/// Total size, in bytes, of a single DIF block: a 3-byte [`BlockId`] followed by a 77-byte
/// payload.
pub const BLOCK_SIZE: usize = 3 + PAYLOAD_SIZE;

/// Total number of DIF blocks carried by a single DIF sequence: 1 header, 2 subcode, 3 VAUX, 9
/// audio, and 135 video blocks.
pub const BLOCKS_PER_SEQUENCE_COUNT: usize = 1 + 2 + 3 + 9 + 135;
