//! The 135 video blocks present in every DIF sequence.

use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::pack::PackContext;


/// One of the 135 video DIF blocks present in every DIF sequence.
///
/// DV standards:
///
/// - IEC 61834-2:1998 Section 3.4.4 Video sector data
/// - SMPTE 306M-2002 Section 11.2.6 Video
///
/// This crate treats the entire 77-byte payload as opaque compressed video data: decoding and
/// repairing actual video pixels is outside the scope of the DIF/pack codec.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Validate, Serialize, Deserialize)]
#[garde(context(PackContext))]
pub struct Video {
    /// Opaque compressed video data.
    #[garde(skip)]
    pub payload: [u8; 77],
}

impl Video {
    /// Parse a [`Video`] block from the 77-byte payload of a video DIF block.
    pub fn try_from_raw(raw: &[u8; 77]) -> Self {
        Video { payload: *raw }
    }

    /// Serialize this [`Video`] block back to the 77-byte payload of a video DIF block.
    pub fn to_raw(&self) -> [u8; 77] {
        self.payload
    }
}
