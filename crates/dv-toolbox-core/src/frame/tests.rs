use googletest::prelude::*;

use super::*;
use crate::block;

/// Builds one full, valid, minimal raw NTSC video frame: a single channel, 10 DIF sequences, with
/// every pack slot holding a `NoInfo` pack.
pub(crate) fn build_raw_frame(info: &file::ValidInfo) -> Vec<u8> {
    let channel_count = info.video_frame_channel_count();
    let dif_sequence_count = info.video_frame_dif_sequence_count();
    let no_info_pack: [u8; 5] = [0xFF; 5];

    let mut raw = Vec::with_capacity(info.video_frame_size() as usize);
    for channel in 0..channel_count {
        for dif_sequence in 0..dif_sequence_count {
            // Header
            let id = BlockId {
                block_type: BlockType::Header,
                sequence: 0xF,
                channel,
                dif_sequence,
                dif_block: 0,
            };
            raw.extend_from_slice(&id.to_raw());
            let header = block::Header {
                system: file::System::Sys525_60,
                track_pickup: 0xF,
                track_application_id: 0x1,
                track_flag_1: true,
                audio_application_id: 0x1,
                reserved_2: 0xF,
                track_flag_2: true,
                video_application_id: 0x1,
                reserved_3: 0xF,
                track_flag_3: true,
                subcode_application_id: 0x1,
                reserved_4: 0xF,
                reserved_end: [0xAA; 72],
            };
            raw.extend_from_slice(&header.to_raw());

            // Subcode
            for dif_block in 0..2u8 {
                let id = BlockId {
                    block_type: BlockType::Subcode,
                    sequence: 0xF,
                    channel,
                    dif_sequence,
                    dif_block,
                };
                raw.extend_from_slice(&id.to_raw());
                let sync_blocks = std::array::from_fn(|i| block::SyncBlock {
                    ssyb_index: (dif_block as usize * block::SYNC_BLOCKS_PER_DIF_BLOCK + i) as u8,
                    track_application_id: 0x2,
                    subcode_application_id: 0x3,
                    pack: no_info_pack,
                });
                let subcode = block::Subcode { sync_blocks, reserved_end: [0u8; 29] };
                raw.extend_from_slice(&subcode.to_raw());
            }

            // VAUX
            for dif_block in 0..3u8 {
                let id = BlockId {
                    block_type: BlockType::Vaux,
                    sequence: 0x5,
                    channel,
                    dif_sequence,
                    dif_block,
                };
                raw.extend_from_slice(&id.to_raw());
                let vaux = block::Vaux { packs: [no_info_pack; block::PACKS_PER_BLOCK], reserved_end: [0u8; 2] };
                raw.extend_from_slice(&vaux.to_raw());
            }

            // Audio
            for dif_block in 0..9u8 {
                let id = BlockId {
                    block_type: BlockType::Audio,
                    sequence: 0x5,
                    channel,
                    dif_sequence,
                    dif_block,
                };
                raw.extend_from_slice(&id.to_raw());
                let audio = block::Audio { pack: no_info_pack, audio_data: [0u8; 72] };
                raw.extend_from_slice(&audio.to_raw());
            }

            // Video
            for dif_block in 0..135u8 {
                let id = BlockId {
                    block_type: BlockType::Video,
                    sequence: 0x5,
                    channel,
                    dif_sequence,
                    dif_block,
                };
                raw.extend_from_slice(&id.to_raw());
                let video = block::Video { payload: [0u8; 77] };
                raw.extend_from_slice(&video.to_raw());
            }
        }
    }
    raw
}

#[googletest::test]
fn test_decode_frame_minimal() {
    let info = *crate::block::testutil::NTSC;
    let raw = build_raw_frame(&info.file_info);
    let data = decode_frame(&raw, &info.file_info, 7).unwrap();

    expect_that!(data.frame_number, eq(7));
    expect_that!(data.arbitrary_bits, eq(0x5));
    expect_that!(data.header_track_application_id, eq(0x1));
    expect_that!(data.header_audio_application_id, eq(0x1));
    expect_that!(data.header_video_application_id, eq(0x1));
    expect_that!(data.header_subcode_application_id, eq(0x1));
    expect_that!(data.subcode_track_application_id, eq(0x2));
    expect_that!(data.subcode_subcode_application_id, eq(0x3));
    expect_that!(data.smpte_timecode, none());
    expect_that!(data.smpte_binary_group, none());
    expect_that!(data.recording_date, none());
    expect_that!(data.recording_time, none());
    for sequence in &data.subcode_pack_types[0] {
        for slot in sequence {
            expect_that!(*slot, eq(0xFF));
        }
    }
}

#[googletest::test]
fn test_decode_frame_wrong_size() {
    let info = *crate::block::testutil::NTSC;
    let result = decode_frame(&[0u8; 10], &info.file_info, 0);
    expect_that!(result, err(anything()));
}

#[googletest::test]
fn test_patch_frame_updates_header_application_ids() {
    let info = *crate::block::testutil::NTSC;
    let mut raw = build_raw_frame(&info.file_info);
    let mut data = decode_frame(&raw, &info.file_info, 0).unwrap();
    data.header_track_application_id = 0x6;
    data.header_audio_application_id = 0x6;
    data.header_video_application_id = 0x6;
    data.header_subcode_application_id = 0x6;

    patch_frame(&mut raw, &data, &info.file_info).unwrap();
    let reparsed = decode_frame(&raw, &info.file_info, 0).unwrap();
    expect_that!(reparsed.header_track_application_id, eq(0x6));
    expect_that!(reparsed.header_audio_application_id, eq(0x6));
    expect_that!(reparsed.header_video_application_id, eq(0x6));
    expect_that!(reparsed.header_subcode_application_id, eq(0x6));
}
