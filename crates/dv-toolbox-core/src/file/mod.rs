//! Structures and functions related to working with entire DV files.

mod info;
mod reader;

pub use info::CheckSimilarError;
pub use info::Info;
pub use info::System;
pub use info::UnvalidatedInfo;
pub use info::ValidInfo;
pub use info::ValidInfoMethods;
pub use reader::{read_frame_data, write_frame_data, FrameDataIoError};
