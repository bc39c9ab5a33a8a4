//! Reads and writes whole video frames from and to a raw DV elementary stream.

use std::io::{Read, Seek, SeekFrom, Write};

use snafu::prelude::*;

use super::{ValidInfo, ValidInfoMethods};
use crate::frame::{self, FrameData};
use crate::ioutil::retry_if_interrupted;


/// Error reading or writing the frames of a raw DV file.
#[derive(Debug, Snafu)]
#[allow(missing_docs)]
pub enum FrameDataIoError {
    #[snafu(display("couldn't seek to frame {frame_number}"))]
    Seek { frame_number: u64, source: std::io::Error },

    #[snafu(display("couldn't read frame {frame_number}"))]
    Read { frame_number: u64, source: std::io::Error },

    #[snafu(display("couldn't write frame {frame_number}"))]
    Write { frame_number: u64, source: std::io::Error },

    #[snafu(display("couldn't decode frame {frame_number}"))]
    Decode { frame_number: u64, source: frame::FrameError },

    #[snafu(display("couldn't patch frame {frame_number}"))]
    Patch { frame_number: u64, source: frame::FrameError },
}

/// Reads every video frame out of a raw DV elementary stream, in file order.
///
/// `info` describes the file's layout; it is not derived from `reader` by this crate, since
/// that requires an external container prober.
pub fn read_frame_data<R: Read + Seek>(
    reader: &mut R,
    info: &ValidInfo,
) -> Result<Vec<FrameData>, FrameDataIoError> {
    let frame_size = info.video_frame_size() as usize;
    let frame_count = info.video_frame_count();
    let mut buf = vec![0u8; frame_size];
    let mut frames = Vec::with_capacity(frame_count as usize);
    for frame_number in 0..frame_count {
        reader
            .seek(SeekFrom::Start(frame_number * frame_size as u64))
            .context(SeekSnafu { frame_number })?;
        retry_if_interrupted(|| reader.read_exact(&mut buf)).context(ReadSnafu { frame_number })?;
        let data =
            frame::decode_frame(&buf, info, frame_number).context(DecodeSnafu { frame_number })?;
        frames.push(data);
    }
    Ok(frames)
}

/// Patches every frame of a raw DV elementary stream in place, using the edited [`FrameData`]
/// values in `frames`.
///
/// `frames` must be in the same order, and describe the same frames, as a prior call to
/// [`read_frame_data`] against the same file; only the bytes this crate understands are
/// overwritten, matching [`frame::patch_frame`].
pub fn write_frame_data<RW: Read + Write + Seek>(
    writer: &mut RW,
    frames: &[FrameData],
    info: &ValidInfo,
) -> Result<(), FrameDataIoError> {
    let frame_size = info.video_frame_size() as usize;
    let mut buf = vec![0u8; frame_size];
    for data in frames {
        let frame_number = data.frame_number;
        writer
            .seek(SeekFrom::Start(frame_number * frame_size as u64))
            .context(SeekSnafu { frame_number })?;
        retry_if_interrupted(|| writer.read_exact(&mut buf)).context(ReadSnafu { frame_number })?;
        frame::patch_frame(&mut buf, data, info).context(PatchSnafu { frame_number })?;
        writer
            .seek(SeekFrom::Start(frame_number * frame_size as u64))
            .context(SeekSnafu { frame_number })?;
        writer.write_all(&buf).context(WriteSnafu { frame_number })?;
    }
    Ok(())
}
