use garde::{Unvalidated, Valid, Validate};
use num::rational::Ratio;
use snafu::Snafu;


/// Which DV broadcast system a frame was recorded for.
///
/// DV standards: SMPTE 306M-2002 Section 11.2 Data Structure; IEC 61834-2 Section 11.2 Data
/// Structure.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum System {
    /// 525 signal lines at 29.97 frames/sec (NTSC).
    Sys525_60,

    /// 625 signal lines at 25.00 frames/sec (PAL/SECAM).
    Sys625_50,
}

impl std::fmt::Display for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            System::Sys525_60 => "525-60",
            System::Sys625_50 => "625-50",
        })
    }
}

/// Number of DIF blocks within a single DIF sequence.
const DIF_BLOCKS_PER_SEQUENCE: u128 = 150;

/// Number of bytes within a single DIF block.
const BYTES_PER_DIF_BLOCK: u128 = 80;

/// The supported combinations of channel count and DIF sequence count per video frame, in the
/// order they should be tried when decomposing a frame size.
///
/// 25 Mbps files use a single channel; 50 Mbps files use two.  10 DIF sequences per frame is
/// NTSC; 12 is PAL/SECAM.
const CHANNEL_AND_SEQUENCE_COUNTS: [(u8, u8); 4] = [(1, 10), (1, 12), (2, 10), (2, 12)];

/// Figure out the channel count and DIF sequence count that together explain a video frame size,
/// if any combination does.
fn decompose_frame_size(frame_size: u128) -> Option<(u8, u8)> {
    CHANNEL_AND_SEQUENCE_COUNTS.into_iter().find(|&(channels, sequences)| {
        u128::from(channels) * u128::from(sequences) * DIF_BLOCKS_PER_SEQUENCE
            * BYTES_PER_DIF_BLOCK
            == frame_size
    })
}

/// Top-level metadata about a DV file.
///
/// This information is not derived by this crate: it is expected to come from an external
/// container prober (for example, an FFmpeg-based tool), since this crate only works with the
/// raw elementary DV stream.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Validate)]
pub struct Info {
    /// Size of the DV file in bytes.
    #[garde(skip)]
    pub file_size: u64,

    /// Frame rate of the video stream, in frames per second.
    #[garde(custom(check_video_frame_rate))]
    pub video_frame_rate: Ratio<u32>,

    /// Duration of the entire video stream, in seconds.
    #[garde(custom(check_video_duration(&self)))]
    pub video_duration: Ratio<u128>,

    /// Number of stereo audio streams present: 0, 1, or 2.
    #[garde(custom(check_audio_stereo_stream_count))]
    pub audio_stereo_stream_count: u8,

    /// Sample rate of the audio streams, in Hz.
    ///
    /// This is `None` if and only if [`Info::audio_stereo_stream_count`] is zero.
    #[garde(custom(check_audio_sample_rate(&self)))]
    pub audio_sample_rate: Option<u32>,
}

/// Only a few exact frame rates are supported by DV standards.
fn check_video_frame_rate(value: &Ratio<u32>, _ctx: &()) -> garde::Result {
    if *value == Ratio::new(30_000, 1_001) || *value == Ratio::from(25) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "Video frame rate {value} is not a supported NTSC/PAL/SECAM rate"
        )))
    }
}

/// The video duration must combine with the frame rate and file size to produce a whole number
/// of video frames, all of which are the same, supported size.
fn check_video_duration(info: &Info) -> impl FnOnce(&Ratio<u128>, &()) -> garde::Result + '_ {
    |video_duration, _ctx| {
        let video_frame_rate = Ratio::<u128>::new(
            u128::from(*info.video_frame_rate.numer()),
            u128::from(*info.video_frame_rate.denom()),
        );
        let total = video_frame_rate * video_duration;
        if !total.is_integer() {
            return Err(garde::Error::new(format!(
                "Total video frame count {total} is not an integer; it resulted from \
                multiplying video frame rate {} by video duration {video_duration}",
                info.video_frame_rate
            )));
        }
        let frame_count = *total.numer();
        if frame_count == 0 {
            return Err(garde::Error::new(
                "Video frame count is zero, so cannot calculate the frame size",
            ));
        }
        let file_size = u128::from(info.file_size);
        if file_size % frame_count != 0 {
            return Err(garde::Error::new(format!(
                "File size {} is not evenly divisible by video frame count {frame_count}",
                info.file_size
            )));
        }
        let frame_size = file_size / frame_count;
        if decompose_frame_size(frame_size).is_none() {
            return Err(garde::Error::new(format!("Unsupported frame size {frame_size}")));
        }
        Ok(())
    }
}

/// Files are only known to ever contain zero, one, or two stereo audio streams.
fn check_audio_stereo_stream_count(value: &u8, _ctx: &()) -> garde::Result {
    if *value <= 2 {
        Ok(())
    } else {
        Err(garde::Error::new(format!("Audio stereo stream count {value} is not 0, 1, or 2")))
    }
}

/// The audio sample rate must be present with a supported value if and only if there is at least
/// one audio stream.
fn check_audio_sample_rate(info: &Info) -> impl FnOnce(&Option<u32>, &()) -> garde::Result + '_ {
    |audio_sample_rate, _ctx| {
        if info.audio_stereo_stream_count > 0 {
            match *audio_sample_rate {
                Some(rate) if matches!(rate, 32_000 | 44_100 | 48_000) => Ok(()),
                Some(rate) => {
                    Err(garde::Error::new(format!("Unsupported audio sample rate {rate}")))
                }
                None => Err(garde::Error::new("Could not detect sample rate for audio streams")),
            }
        } else {
            match *audio_sample_rate {
                None => Ok(()),
                Some(_) => Err(garde::Error::new(
                    "Audio sample rate cannot be provided if there are no audio streams",
                )),
            }
        }
    }
}

/// Validated contents of [`Info`].
pub type ValidInfo = Valid<Info>;

/// Unvalidated contents of [`Info`], to be validated into a [`ValidInfo`].
pub type UnvalidatedInfo = Unvalidated<Info>;

/// Methods available on a validated [`Info`] structure.
///
/// These are all derived from the validated fields of [`Info`]; validation guarantees that they
/// can always be calculated without error.
pub trait ValidInfoMethods {
    /// Total number of video frames contained in the file.
    fn video_frame_count(&self) -> u64;

    /// Number of bytes used to store a single video frame.
    fn video_frame_size(&self) -> u32;

    /// Number of channels used to store a single video frame: 1 for 25 Mbps, 2 for 50 Mbps.
    fn video_frame_channel_count(&self) -> u8;

    /// Number of DIF sequences within a single video frame: 10 for NTSC, 12 for PAL/SECAM.
    fn video_frame_dif_sequence_count(&self) -> u8;

    /// The DV broadcast [`System`] that the file was recorded for.
    fn system(&self) -> System;

    /// The ideal number of audio samples that should be contained in a single video frame, if the
    /// file has any audio.
    ///
    /// This is often not a whole number: see
    /// [`crate::file::ValidInfo::ideal_audio_samples_per_frame`] for further discussion of why.
    fn ideal_audio_samples_per_frame(&self) -> Option<Ratio<u32>>;

    /// Checks whether `self` and `other` describe files in the same recording format, returning
    /// details of the first mismatch found, if any.
    fn check_similar(&self, other: &Self) -> Result<(), CheckSimilarError>;
}

impl ValidInfoMethods for ValidInfo {
    fn video_frame_count(&self) -> u64 {
        let video_frame_rate = Ratio::<u128>::new(
            u128::from(*self.video_frame_rate.numer()),
            u128::from(*self.video_frame_rate.denom()),
        );
        let total = video_frame_rate * self.video_duration;
        u64::try_from(*total.numer())
            .expect("validation guarantees an integral, in-range video frame count")
    }

    fn video_frame_size(&self) -> u32 {
        let frame_count = u128::from(self.video_frame_count());
        u32::try_from(u128::from(self.file_size) / frame_count)
            .expect("validation guarantees a supported video frame size")
    }

    fn video_frame_channel_count(&self) -> u8 {
        decompose_frame_size(u128::from(self.video_frame_size()))
            .expect("validation guarantees a decomposable video frame size")
            .0
    }

    fn video_frame_dif_sequence_count(&self) -> u8 {
        decompose_frame_size(u128::from(self.video_frame_size()))
            .expect("validation guarantees a decomposable video frame size")
            .1
    }

    fn system(&self) -> System {
        match self.video_frame_dif_sequence_count() {
            10 => System::Sys525_60,
            12 => System::Sys625_50,
            other => unreachable!("unsupported DIF sequence count {other}"),
        }
    }

    fn ideal_audio_samples_per_frame(&self) -> Option<Ratio<u32>> {
        self.audio_sample_rate.map(|rate| Ratio::<u32>::new(rate, 1) / self.video_frame_rate)
    }

    fn check_similar(&self, other: &Self) -> Result<(), CheckSimilarError> {
        if self.video_frame_rate != other.video_frame_rate {
            return Err(CheckSimilarError::FrameRate {
                expected: self.video_frame_rate,
                comparison: other.video_frame_rate,
            });
        }
        if self.video_frame_size() != other.video_frame_size() {
            return Err(CheckSimilarError::FrameSize {
                expected: self.video_frame_size(),
                comparison: other.video_frame_size(),
            });
        }
        if self.audio_stereo_stream_count != other.audio_stereo_stream_count {
            return Err(CheckSimilarError::AudioStreamCount {
                expected: self.audio_stereo_stream_count,
                comparison: other.audio_stereo_stream_count,
            });
        }
        if self.audio_sample_rate != other.audio_sample_rate {
            return Err(CheckSimilarError::AudioSampleRate {
                expected: self.audio_sample_rate.unwrap_or_default(),
                comparison: other.audio_sample_rate.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

/// Error type for [`ValidInfoMethods::check_similar`].
#[derive(Debug, Snafu, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum CheckSimilarError {
    #[snafu(display("Video frame rate {comparison} does not match {expected}"))]
    FrameRate { expected: Ratio<u32>, comparison: Ratio<u32> },

    #[snafu(display("Video frame size {comparison} does not match {expected}"))]
    FrameSize { expected: u32, comparison: u32 },

    #[snafu(display("Audio stereo stream count {comparison} does not match {expected}"))]
    AudioStreamCount { expected: u8, comparison: u8 },

    #[snafu(display("Audio sample rate {comparison} does not match {expected}"))]
    AudioSampleRate { expected: u32, comparison: u32 },
}
