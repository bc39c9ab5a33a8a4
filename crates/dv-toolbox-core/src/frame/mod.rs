//! Aggregates the individual DIF blocks that compose one video frame into a single
//! [`FrameData`] summary, and supports patching a raw frame buffer back from an edited
//! [`FrameData`].
//!
//! A single video frame is a sequence of one or two channels, each made up of 10 (525-60) or 12
//! (625-50) DIF sequences, each of which carries exactly 150 DIF blocks in a fixed order: one
//! [`block::Header`], two [`block::Subcode`], three [`block::Vaux`], nine [`block::Audio`], and
//! 135 [`block::Video`] blocks.

use garde::Validate;
use snafu::prelude::*;

use crate::{
    block::{self, BlockId, BlockType},
    file::{self, ValidInfoMethods},
    pack::{self, Pack, PackContext, RawPack, ValidPack},
};

#[cfg(test)]
pub(crate) mod tests;

/// Number of sub-code pack slots carried across both subcode DIF blocks of a single DIF
/// sequence: 2 blocks of 6 sync blocks each.
pub const SUBCODE_PACK_SLOTS_PER_SEQUENCE: usize =
    2 * block::SYNC_BLOCKS_PER_DIF_BLOCK;

/// Summary of the metadata found across every DIF block of a single video frame.
///
/// This is a lossy view intended for inspection and editing: it captures the fields that are
/// useful to examine or repair, but does not retain the bulk audio/video payload or every
/// reserved byte.  To actually modify a frame, decode it with [`decode_frame`], edit the
/// returned value, and pass it back to [`patch_frame`] together with the original raw bytes; this
/// overwrites only the bytes this crate understands, leaving everything else untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameData {
    /// Caller-supplied index of this frame within its source, e.g. its position in a file.
    pub frame_number: u64,

    /// The `sequence` field shared by every non-header, non-subcode [`BlockId`] in the frame.
    ///
    /// SMPTE 306M treats these bits as arbitrary; IEC 61834-2 defines them as a real sequence
    /// number.  This crate does not interpret the value, but expects it to be consistent across
    /// the whole frame.
    ///
    /// Read-only: [`patch_frame`] checks it for consistency but never writes it back, since it is
    /// derived from every non-header, non-subcode [`BlockId::sequence`] rather than independently
    /// editable data. Editing this field before calling [`patch_frame`] has no effect on the
    /// patched bytes.
    pub arbitrary_bits: u8,

    /// Track application ID, copied from the header blocks.
    pub header_track_application_id: u8,

    /// Audio application ID, copied from the header blocks.
    pub header_audio_application_id: u8,

    /// Video application ID, copied from the header blocks.
    pub header_video_application_id: u8,

    /// Subcode application ID, copied from the header blocks.
    pub header_subcode_application_id: u8,

    /// Track application ID, copied from the subcode sync blocks.
    pub subcode_track_application_id: u8,

    /// Subcode application ID, copied from the subcode sync blocks.
    pub subcode_subcode_application_id: u8,

    /// The pack type tag byte found in each subcode pack slot, indexed by `[channel]
    /// [dif_sequence][slot]`.
    ///
    /// The outer dimensions are sized to this frame's actual channel and DIF sequence counts.
    pub subcode_pack_types: Vec<Vec<[u8; SUBCODE_PACK_SLOTS_PER_SEQUENCE]>>,

    /// The title timecode, if a valid one was found anywhere in the subcode area.
    pub smpte_timecode: Option<ValidPack<pack::TitleTimecode>>,

    /// The title binary group, if a valid one was found anywhere in the subcode area.
    pub smpte_binary_group: Option<ValidPack<pack::BinaryGroup>>,

    /// The recording date, if a valid AAUX or VAUX recording date pack was found.
    pub recording_date: Option<ValidPack<pack::RecordingDate>>,

    /// The recording time, if a valid AAUX or VAUX recording time pack was found.
    pub recording_time: Option<ValidPack<pack::RecordingTime>>,
}

/// Error decoding a raw video frame into a [`FrameData`], or patching one back.
#[derive(Debug, Snafu)]
#[allow(missing_docs)]
pub enum FrameError {
    #[snafu(display(
        "raw frame buffer is {actual} bytes long, but the file's frame size is {expected} bytes"
    ))]
    WrongSize { expected: u32, actual: usize },

    #[snafu(display("couldn't parse block identifier at raw byte offset {offset}"))]
    BlockId { source: block::BlockIdError, offset: usize },

    #[snafu(display("block identifier at raw byte offset {offset} failed validation"))]
    BlockIdValidation { source: garde::Report, offset: usize },

    #[snafu(display(
        "expected a {expected:?} block at channel {channel} dif_sequence {dif_sequence} \
        block_index {block_index}, but found a {actual:?} block"
    ))]
    UnexpectedBlockType {
        expected: BlockType,
        actual: BlockType,
        channel: u8,
        dif_sequence: u8,
        block_index: usize,
    },

    #[snafu(display("couldn't parse header block at raw byte offset {offset}"))]
    Header { source: block::HeaderError, offset: usize },

    #[snafu(display("couldn't parse subcode block at raw byte offset {offset}"))]
    Subcode { source: block::SyncBlockError, offset: usize },

    #[snafu(display(
        "field {field} was {first} in the first block that carried it, but {other} in a later \
        block; this crate expects it to be constant across the whole frame"
    ))]
    Inconsistent { field: &'static str, first: u8, other: u8 },
}

/// The fixed transmission order of block flavors within a single 150-block DIF sequence.
fn expected_block(block_index: usize) -> (BlockType, u8) {
    const HEADER: usize = 1;
    const SUBCODE: usize = HEADER + 2;
    const VAUX: usize = SUBCODE + 3;
    const AUDIO: usize = VAUX + 9;
    match block_index {
        i if i < HEADER => (BlockType::Header, 0),
        i if i < SUBCODE => (BlockType::Subcode, (i - HEADER) as u8),
        i if i < VAUX => (BlockType::Vaux, (i - SUBCODE) as u8),
        i if i < AUDIO => (BlockType::Audio, (i - VAUX) as u8),
        i => (BlockType::Video, (i - AUDIO) as u8),
    }
}

/// Byte offset of a DIF block within a raw frame buffer, given a channel-major, sequence-major,
/// block-major layout.
fn block_offset(channel: u8, dif_sequence: u8, block_index: usize, dif_sequence_count: u8) -> usize {
    let sequence_size = block::BLOCKS_PER_SEQUENCE_COUNT * block::BLOCK_SIZE;
    usize::from(channel) * usize::from(dif_sequence_count) * sequence_size
        + usize::from(dif_sequence) * sequence_size
        + block_index * block::BLOCK_SIZE
}

/// Update `current` to `value`, checking it is consistent with any value already seen.
fn check_consistent(
    field: &'static str,
    current: &mut Option<u8>,
    value: u8,
) -> Result<(), FrameError> {
    match *current {
        None => {
            *current = Some(value);
            Ok(())
        }
        Some(first) if first == value => Ok(()),
        Some(first) => InconsistentSnafu { field, first, other: value }.fail(),
    }
}

/// Decode every DIF block of a raw video frame into a [`FrameData`] summary.
///
/// `raw` must be exactly [`file::ValidInfoMethods::video_frame_size`] bytes long.
pub fn decode_frame(raw: &[u8], info: &file::ValidInfo, frame_number: u64) -> Result<FrameData, FrameError> {
    let expected = info.video_frame_size();
    ensure!(raw.len() == expected as usize, WrongSizeSnafu { expected, actual: raw.len() });

    let ctx = PackContext { file_info: *info };
    let channel_count = info.video_frame_channel_count();
    let dif_sequence_count = info.video_frame_dif_sequence_count();

    let mut arbitrary_bits = None;
    let mut header_track_application_id = None;
    let mut header_audio_application_id = None;
    let mut header_video_application_id = None;
    let mut header_subcode_application_id = None;
    let mut subcode_track_application_id = None;
    let mut subcode_subcode_application_id = None;

    let mut subcode_pack_types =
        vec![vec![[0u8; SUBCODE_PACK_SLOTS_PER_SEQUENCE]; dif_sequence_count as usize]; channel_count as usize];
    let mut candidate_packs: Vec<RawPack> = Vec::new();

    for channel in 0..channel_count {
        for dif_sequence in 0..dif_sequence_count {
            for block_index in 0..block::BLOCKS_PER_SEQUENCE_COUNT {
                let offset = block_offset(channel, dif_sequence, block_index, dif_sequence_count);
                let id_bytes: &[u8; 3] = raw[offset..offset + 3].try_into().unwrap();
                let payload: &[u8; 77] =
                    raw[offset + 3..offset + block::BLOCK_SIZE].try_into().unwrap();

                let id = BlockId::try_from_raw(id_bytes).context(BlockIdSnafu { offset })?;
                id.validate_with(&ctx).context(BlockIdValidationSnafu { offset })?;

                let (expected_type, expected_dif_block) = expected_block(block_index);
                ensure!(
                    id.block_type == expected_type && id.dif_block == expected_dif_block,
                    UnexpectedBlockTypeSnafu {
                        expected: expected_type,
                        actual: id.block_type,
                        channel,
                        dif_sequence,
                        block_index,
                    }
                );

                match id.block_type {
                    BlockType::Header => {
                        let header = block::Header::try_from_raw(payload).context(HeaderSnafu { offset })?;
                        check_consistent(
                            "header_track_application_id",
                            &mut header_track_application_id,
                            header.track_application_id,
                        )?;
                        check_consistent(
                            "header_audio_application_id",
                            &mut header_audio_application_id,
                            header.audio_application_id,
                        )?;
                        check_consistent(
                            "header_video_application_id",
                            &mut header_video_application_id,
                            header.video_application_id,
                        )?;
                        check_consistent(
                            "header_subcode_application_id",
                            &mut header_subcode_application_id,
                            header.subcode_application_id,
                        )?;
                    }
                    BlockType::Subcode => {
                        let subcode =
                            block::Subcode::try_from_raw(payload).context(SubcodeSnafu { offset })?;
                        for (i, sync_block) in subcode.sync_blocks.iter().enumerate() {
                            check_consistent(
                                "subcode_track_application_id",
                                &mut subcode_track_application_id,
                                sync_block.track_application_id,
                            )?;
                            check_consistent(
                                "subcode_subcode_application_id",
                                &mut subcode_subcode_application_id,
                                sync_block.subcode_application_id,
                            )?;
                            let slot = usize::from(id.dif_block) * block::SYNC_BLOCKS_PER_DIF_BLOCK + i;
                            subcode_pack_types[usize::from(channel)][usize::from(dif_sequence)][slot] =
                                sync_block.pack[0];
                            candidate_packs.push(sync_block.pack);
                        }
                    }
                    BlockType::Vaux => {
                        let vaux = block::Vaux::try_from_raw(payload);
                        candidate_packs.extend(vaux.packs);
                        check_consistent("arbitrary_bits", &mut arbitrary_bits, id.sequence)?;
                    }
                    BlockType::Audio => {
                        let audio = block::Audio::try_from_raw(payload);
                        candidate_packs.push(audio.pack);
                        check_consistent("arbitrary_bits", &mut arbitrary_bits, id.sequence)?;
                    }
                    BlockType::Video => {
                        check_consistent("arbitrary_bits", &mut arbitrary_bits, id.sequence)?;
                    }
                }
            }
        }
    }

    let mut smpte_timecode = None;
    let mut smpte_binary_group = None;
    let mut recording_date = None;
    let mut recording_time = None;
    for raw_pack in &candidate_packs {
        let (pack, _err) = Pack::from_raw(raw_pack, &ctx);
        match pack {
            Pack::TitleTimecode(v) if smpte_timecode.is_none() => smpte_timecode = Some(v),
            Pack::TitleBinaryGroup(v) if smpte_binary_group.is_none() => smpte_binary_group = Some(v),
            Pack::AAUXRecordingDate(v) | Pack::VAUXRecordingDate(v) if recording_date.is_none() => {
                recording_date = Some(v)
            }
            Pack::AAUXRecordingTime(v) | Pack::VAUXRecordingTime(v) if recording_time.is_none() => {
                recording_time = Some(v)
            }
            _ => {}
        }
    }

    Ok(FrameData {
        frame_number,
        arbitrary_bits: arbitrary_bits.unwrap_or(0),
        header_track_application_id: header_track_application_id.unwrap_or(0),
        header_audio_application_id: header_audio_application_id.unwrap_or(0),
        header_video_application_id: header_video_application_id.unwrap_or(0),
        header_subcode_application_id: header_subcode_application_id.unwrap_or(0),
        subcode_track_application_id: subcode_track_application_id.unwrap_or(0),
        subcode_subcode_application_id: subcode_subcode_application_id.unwrap_or(0),
        subcode_pack_types,
        smpte_timecode,
        smpte_binary_group,
        recording_date,
        recording_time,
    })
}

/// Overwrite the bytes of `raw` that correspond to the editable fields of `data`, leaving every
/// other byte (audio/video payload, reserved bytes, packs not modeled by [`FrameData`])
/// untouched.
///
/// `raw` must be the same frame that `data` was originally decoded from via [`decode_frame`], or
/// at least one with an identical block layout; this function does not re-validate the overall
/// block structure the way [`decode_frame`] does.
///
/// [`FrameData::arbitrary_bits`] is not among the editable fields: it is read but never written
/// back, so editing it has no effect on `raw`.
pub fn patch_frame(raw: &mut [u8], data: &FrameData, info: &file::ValidInfo) -> Result<(), FrameError> {
    let expected = info.video_frame_size();
    ensure!(raw.len() == expected as usize, WrongSizeSnafu { expected, actual: raw.len() });

    let ctx = PackContext { file_info: *info };
    let channel_count = info.video_frame_channel_count();
    let dif_sequence_count = info.video_frame_dif_sequence_count();

    for channel in 0..channel_count {
        for dif_sequence in 0..dif_sequence_count {
            for block_index in 0..block::BLOCKS_PER_SEQUENCE_COUNT {
                let offset = block_offset(channel, dif_sequence, block_index, dif_sequence_count);
                let id_bytes: [u8; 3] = raw[offset..offset + 3].try_into().unwrap();
                let id = BlockId::try_from_raw(&id_bytes).context(BlockIdSnafu { offset })?;
                let payload_start = offset + 3;
                let payload_end = offset + block::BLOCK_SIZE;

                match id.block_type {
                    BlockType::Header => {
                        let payload: &[u8; 77] = raw[payload_start..payload_end].try_into().unwrap();
                        let mut header =
                            block::Header::try_from_raw(payload).context(HeaderSnafu { offset })?;
                        header.track_application_id = data.header_track_application_id;
                        header.audio_application_id = data.header_audio_application_id;
                        header.video_application_id = data.header_video_application_id;
                        header.subcode_application_id = data.header_subcode_application_id;
                        raw[payload_start..payload_end].copy_from_slice(&header.to_raw());
                    }
                    BlockType::Subcode => {
                        let payload: &[u8; 77] = raw[payload_start..payload_end].try_into().unwrap();
                        let mut subcode =
                            block::Subcode::try_from_raw(payload).context(SubcodeSnafu { offset })?;
                        for sync_block in &mut subcode.sync_blocks {
                            sync_block.track_application_id = data.subcode_track_application_id;
                            sync_block.subcode_application_id = data.subcode_subcode_application_id;
                            patch_pack(&mut sync_block.pack, data, &ctx);
                        }
                        raw[payload_start..payload_end].copy_from_slice(&subcode.to_raw());
                    }
                    BlockType::Vaux => {
                        let payload: &[u8; 77] = raw[payload_start..payload_end].try_into().unwrap();
                        let mut vaux = block::Vaux::try_from_raw(payload);
                        for pack in &mut vaux.packs {
                            patch_pack(pack, data, &ctx);
                        }
                        raw[payload_start..payload_end].copy_from_slice(&vaux.to_raw());
                    }
                    BlockType::Audio | BlockType::Video => {
                        // Payload data is not modeled by FrameData; leave it untouched.
                    }
                }
            }
        }
    }
    Ok(())
}

/// Overwrite `raw_pack` in place if its tag matches one of the principal packs carried by `data`
/// and that field is present; otherwise leave it untouched.
fn patch_pack(raw_pack: &mut RawPack, data: &FrameData, ctx: &PackContext) {
    match pack::Type::from(raw_pack[0]) {
        pack::Type::TitleTimecode => {
            if let Some(v) = data.smpte_timecode {
                *raw_pack = Pack::TitleTimecode(v).to_raw(ctx);
            }
        }
        pack::Type::TitleBinaryGroup => {
            if let Some(v) = data.smpte_binary_group {
                *raw_pack = Pack::TitleBinaryGroup(v).to_raw(ctx);
            }
        }
        pack::Type::AAUXRecordingDate => {
            if let Some(v) = data.recording_date {
                *raw_pack = Pack::AAUXRecordingDate(v).to_raw(ctx);
            }
        }
        pack::Type::VAUXRecordingDate => {
            if let Some(v) = data.recording_date {
                *raw_pack = Pack::VAUXRecordingDate(v).to_raw(ctx);
            }
        }
        pack::Type::AAUXRecordingTime => {
            if let Some(v) = data.recording_time {
                *raw_pack = Pack::AAUXRecordingTime(v).to_raw(ctx);
            }
        }
        pack::Type::VAUXRecordingTime => {
            if let Some(v) = data.recording_time {
                *raw_pack = Pack::VAUXRecordingTime(v).to_raw(ctx);
            }
        }
        _ => {}
    }
}
