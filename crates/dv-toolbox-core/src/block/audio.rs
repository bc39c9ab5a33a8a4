//! The nine audio blocks present in every DIF sequence.

use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::pack::{PackContext, RawPack};

#[cfg(test)]
mod tests;

/// One of the nine audio DIF blocks present in every DIF sequence.
///
/// DV standards:
///
/// - IEC 61834-2:1998 Section 3.3.4 Audio sector data
/// - SMPTE 306M-2002 Section 11.2.5 Audio
///
/// The 77-byte payload holds one leading pack, followed by 72 bytes of compressed audio sample
/// data that this crate does not interpret.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Validate, Serialize, Deserialize)]
#[garde(context(PackContext))]
pub struct Audio {
    /// The pack carried by this audio DIF block.
    #[garde(skip)]
    pub pack: RawPack,

    /// Opaque audio sample data.
    #[garde(skip)]
    pub audio_data: [u8; 72],
}

impl Audio {
    /// Parse an [`Audio`] block from the 77-byte payload of an audio DIF block.
    pub fn try_from_raw(raw: &[u8; 77]) -> Self {
        let mut audio_data = [0u8; 72];
        audio_data.copy_from_slice(&raw[5..77]);
        Audio { pack: raw[0..5].try_into().unwrap(), audio_data }
    }

    /// Serialize this [`Audio`] block back to the 77-byte payload of an audio DIF block.
    pub fn to_raw(&self) -> [u8; 77] {
        let mut raw = [0u8; 77];
        raw[0..5].copy_from_slice(&self.pack);
        raw[5..77].copy_from_slice(&self.audio_data);
        raw
    }
}
