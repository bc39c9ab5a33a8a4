//! The three video-auxiliary (VAUX) blocks present in every DIF sequence.

use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::pack::{PackContext, RawPack};

#[cfg(test)]
mod tests;

/// Number of packs carried by a single VAUX DIF block.
pub const PACKS_PER_BLOCK: usize = 15;

/// One of the three video-auxiliary (VAUX) DIF blocks present in every DIF sequence.
///
/// DV standards:
///
/// - IEC 61834-2:1998 Section 3.4.4 VAUX
/// - SMPTE 306M-2002 Section 11.2.4 VAUX
///
/// The 77-byte payload holds 15 five-byte packs, followed by 2 reserved bytes preserved verbatim
/// across decode/encode.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Validate, Serialize, Deserialize)]
#[garde(context(PackContext))]
pub struct Vaux {
    /// The 15 packs carried by this VAUX DIF block.
    #[garde(skip)]
    pub packs: [RawPack; PACKS_PER_BLOCK],

    /// Reserved bytes following the packs, preserved verbatim.
    #[garde(skip)]
    pub reserved_end: [u8; 2],
}

impl Vaux {
    /// Parse a [`Vaux`] from the 77-byte payload of a VAUX DIF block.
    pub fn try_from_raw(raw: &[u8; 77]) -> Self {
        let mut packs = [[0u8; 5]; PACKS_PER_BLOCK];
        for (i, pack) in packs.iter_mut().enumerate() {
            let offset = i * 5;
            pack.copy_from_slice(&raw[offset..offset + 5]);
        }
        let mut reserved_end = [0u8; 2];
        reserved_end.copy_from_slice(&raw[75..77]);
        Vaux { packs, reserved_end }
    }

    /// Serialize this [`Vaux`] back to the 77-byte payload of a VAUX DIF block.
    pub fn to_raw(&self) -> [u8; 77] {
        let mut raw = [0u8; 77];
        for (i, pack) in self.packs.iter().enumerate() {
            let offset = i * 5;
            raw[offset..offset + 5].copy_from_slice(pack);
        }
        raw[75..77].copy_from_slice(&self.reserved_end);
        raw
    }
}
