use std::sync::LazyLock;

use garde::Validate;
use num::rational::Ratio;

use crate::{
    file::{Info, UnvalidatedInfo},
    pack::PackContext,
};

pub(crate) static NTSC: LazyLock<PackContext> = LazyLock::new(|| PackContext {
    file_info: UnvalidatedInfo::new(Info {
        file_size: 120_000,
        video_frame_rate: Ratio::<u32>::new(30_000, 1_001),
        video_duration: Ratio::<u128>::new(1_001, 30_000),
        audio_stereo_stream_count: 1,
        audio_sample_rate: Some(48_000),
    })
    .validate()
    .unwrap(),
});

pub(crate) static PAL: LazyLock<PackContext> = LazyLock::new(|| PackContext {
    file_info: UnvalidatedInfo::new(Info {
        file_size: 144_000,
        video_frame_rate: Ratio::<u32>::from(25),
        video_duration: Ratio::<u128>::new(1, 25),
        audio_stereo_stream_count: 1,
        audio_sample_rate: Some(48_000),
    })
    .validate()
    .unwrap(),
});
