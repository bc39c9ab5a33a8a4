//! Converts a decoded [`FrameData`](crate::frame::FrameData) to and from a flat set of named text
//! fields, suitable for storing in a spreadsheet or CSV file for manual inspection and bulk
//! editing of frame metadata.
//!
//! Integer fields are rendered as `0xNN` hexadecimal.  Byte strings are rendered as `0x` followed
//! by one hex pair per byte; a `__` placeholder in place of a pair means that byte is unknown.
//! Enumerated fields are rendered using their symbolic name.  Fields that are not present in the
//! frame are rendered as an empty string.

use std::collections::HashMap;

use arbitrary_int::{u2, u4, Number};
use chrono::{Datelike, FixedOffset, NaiveDate, Weekday};
use garde::{Unvalidated, Validate};
use snafu::prelude::*;

use crate::{
    frame::{FrameData, SUBCODE_PACK_SLOTS_PER_SEQUENCE},
    pack::{self, PackContext, ValidPack},
};

pub mod csv;


/// Maximum number of channels ever present in a frame: 50 Mbps files use both.
const MAX_CHANNELS: usize = 2;

/// Maximum number of DIF sequences ever present in a frame: 625-50 systems use 12.
const MAX_DIF_SEQUENCES: usize = 12;

/// Error converting between a [`FrameData`] and its text field representation.
#[derive(Debug, Snafu)]
#[allow(missing_docs)]
pub enum TextError {
    #[snafu(display("field {field} has invalid hexadecimal integer value {value:?}"))]
    HexInt { field: &'static str, value: String },

    #[snafu(display("field {field} has invalid or missing integer value {value:?}"))]
    Integer { field: &'static str, value: String },

    #[snafu(display("field {field} has invalid hexadecimal byte string value {value:?}"))]
    HexBytes { field: &'static str, value: String },

    #[snafu(display(
        "subcode pack types for channel {channel} dif_sequence {dif_sequence} has invalid \
        hexadecimal byte string value {value:?}"
    ))]
    SubcodePackBytes { channel: usize, dif_sequence: usize, value: String },

    #[snafu(display("field {field} has unrecognized symbol {value:?}"))]
    Symbol { field: &'static str, value: String },

    #[snafu(display("field {field} has invalid date or time value {value:?}"))]
    DateTime { field: &'static str, value: String },

    #[snafu(display("pack assembled from field {field} failed validation"))]
    PackValidation { field: &'static str, source: garde::Report },
}

fn field(name: &'static str, record: &HashMap<String, String>) -> String {
    record.get(name).cloned().unwrap_or_default()
}

fn hex_int(value: u8) -> String {
    format!("0x{value:02X}")
}

fn parse_hex_int(field: &'static str, value: &str) -> Result<u8, TextError> {
    let digits =
        value.strip_prefix("0x").with_context(|| HexIntSnafu { field, value: value.to_string() })?;
    u8::from_str_radix(digits, 16)
        .ok()
        .with_context(|| HexIntSnafu { field, value: value.to_string() })
}

fn parse_frame_number(field: &'static str, value: &str) -> Result<u64, TextError> {
    value.parse::<u64>().ok().with_context(|| IntegerSnafu { field, value: value.to_string() })
}

fn hex_bytes(bytes: &[u8]) -> String {
    let mut s = String::from("0x");
    for b in bytes {
        s.push_str(&format!("{b:02X}"));
    }
    s
}

/// Parses a `0x`-prefixed string of hex byte pairs.  A `__` placeholder in place of a byte pair
/// means that byte's true value is unknown or unchanged; it is decoded as `0x00`.
fn parse_hex_bytes(field: &'static str, value: &str, len: usize) -> Result<Vec<u8>, TextError> {
    let digits =
        value.strip_prefix("0x").with_context(|| HexBytesSnafu { field, value: value.to_string() })?;
    ensure!(digits.len() == len * 2, HexBytesSnafu { field, value: value.to_string() });
    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair).unwrap();
            if pair == "__" {
                Ok(0)
            } else {
                u8::from_str_radix(pair, 16)
                    .map_err(|_| HexBytesSnafu { field, value: value.to_string() }.build())
            }
        })
        .collect()
}

fn color_frame_name(v: pack::ColorFrame) -> &'static str {
    match v {
        pack::ColorFrame::Unsynchronized => "Unsynchronized",
        pack::ColorFrame::Synchronized => "Synchronized",
    }
}

fn parse_color_frame(field: &'static str, value: &str) -> Result<pack::ColorFrame, TextError> {
    match value {
        "Unsynchronized" => Ok(pack::ColorFrame::Unsynchronized),
        "Synchronized" => Ok(pack::ColorFrame::Synchronized),
        _ => SymbolSnafu { field, value: value.to_string() }.fail(),
    }
}

fn polarity_correction_name(v: pack::PolarityCorrection) -> &'static str {
    match v {
        pack::PolarityCorrection::Even => "Even",
        pack::PolarityCorrection::Odd => "Odd",
    }
}

fn parse_polarity_correction(
    field: &'static str,
    value: &str,
) -> Result<pack::PolarityCorrection, TextError> {
    match value {
        "Even" => Ok(pack::PolarityCorrection::Even),
        "Odd" => Ok(pack::PolarityCorrection::Odd),
        _ => SymbolSnafu { field, value: value.to_string() }.fail(),
    }
}

fn blank_flag_name(v: pack::BlankFlag) -> &'static str {
    match v {
        pack::BlankFlag::Discontinuous => "Discontinuous",
        pack::BlankFlag::Continuous => "Continuous",
    }
}

fn parse_blank_flag(field: &'static str, value: &str) -> Result<pack::BlankFlag, TextError> {
    match value {
        "Discontinuous" => Ok(pack::BlankFlag::Discontinuous),
        "Continuous" => Ok(pack::BlankFlag::Continuous),
        _ => SymbolSnafu { field, value: value.to_string() }.fail(),
    }
}

fn daylight_saving_time_name(v: pack::DaylightSavingTime) -> &'static str {
    match v {
        pack::DaylightSavingTime::DaylightSavingTime => "DaylightSavingTime",
        pack::DaylightSavingTime::Normal => "Normal",
    }
}

fn parse_daylight_saving_time(
    field: &'static str,
    value: &str,
) -> Result<pack::DaylightSavingTime, TextError> {
    match value {
        "DaylightSavingTime" => Ok(pack::DaylightSavingTime::DaylightSavingTime),
        "Normal" => Ok(pack::DaylightSavingTime::Normal),
        _ => SymbolSnafu { field, value: value.to_string() }.fail(),
    }
}

fn binary_group_flag_name(v: pack::BinaryGroupFlag) -> &'static str {
    match v {
        pack::BinaryGroupFlag::TimeUnspecifiedGroupUnspecified => "TimeUnspecifiedGroupUnspecified",
        pack::BinaryGroupFlag::TimeUnspecifiedGroup8BitCodes => "TimeUnspecifiedGroup8BitCodes",
        pack::BinaryGroupFlag::TimeUnspecifiedGroupDateTimeZone => "TimeUnspecifiedGroupDateTimeZone",
        pack::BinaryGroupFlag::TimeUnspecifiedGroupPageLine => "TimeUnspecifiedGroupPageLine",
        pack::BinaryGroupFlag::TimeClockGroupUnspecified => "TimeClockGroupUnspecified",
        pack::BinaryGroupFlag::TimeUnassignedGroupReserved => "TimeUnassignedGroupReserved",
        pack::BinaryGroupFlag::TimeClockGroupDateTimeZone => "TimeClockGroupDateTimeZone",
        pack::BinaryGroupFlag::TimeClockGroupPageLine => "TimeClockGroupPageLine",
    }
}

fn parse_binary_group_flag(field: &'static str, value: &str) -> Result<pack::BinaryGroupFlag, TextError> {
    match value {
        "TimeUnspecifiedGroupUnspecified" => {
            Ok(pack::BinaryGroupFlag::TimeUnspecifiedGroupUnspecified)
        }
        "TimeUnspecifiedGroup8BitCodes" => Ok(pack::BinaryGroupFlag::TimeUnspecifiedGroup8BitCodes),
        "TimeUnspecifiedGroupDateTimeZone" => {
            Ok(pack::BinaryGroupFlag::TimeUnspecifiedGroupDateTimeZone)
        }
        "TimeUnspecifiedGroupPageLine" => Ok(pack::BinaryGroupFlag::TimeUnspecifiedGroupPageLine),
        "TimeClockGroupUnspecified" => Ok(pack::BinaryGroupFlag::TimeClockGroupUnspecified),
        "TimeUnassignedGroupReserved" => Ok(pack::BinaryGroupFlag::TimeUnassignedGroupReserved),
        "TimeClockGroupDateTimeZone" => Ok(pack::BinaryGroupFlag::TimeClockGroupDateTimeZone),
        "TimeClockGroupPageLine" => Ok(pack::BinaryGroupFlag::TimeClockGroupPageLine),
        _ => SymbolSnafu { field, value: value.to_string() }.fail(),
    }
}

/// Formats `hh:mm:ss[:;]ff`, or just `hh:mm:ss` if there is no frame number.
fn format_time(hour: u8, minute: u8, second: u8, drop_frame: bool, frame: Option<u8>) -> String {
    match frame {
        None => format!("{hour:02}:{minute:02}:{second:02}"),
        Some(f) if drop_frame => format!("{hour:02}:{minute:02}:{second:02};{f:02}"),
        Some(f) => format!("{hour:02}:{minute:02}:{second:02}:{f:02}"),
    }
}

type TimeComponents = (u8, u8, u8, bool, Option<u8>);

fn parse_time(field: &'static str, value: &str) -> Result<TimeComponents, TextError> {
    let invalid = || DateTimeSnafu { field, value: value.to_string() };
    ensure!(value.len() == 8 || value.len() == 11, invalid());
    let digit_pair = |s: &str| s.parse::<u8>().map_err(|_| invalid().build());
    let hour = digit_pair(&value[0..2])?;
    ensure!(value.as_bytes()[2] == b':', invalid());
    let minute = digit_pair(&value[3..5])?;
    ensure!(value.as_bytes()[5] == b':', invalid());
    let second = digit_pair(&value[6..8])?;
    if value.len() == 8 {
        return Ok((hour, minute, second, false, None));
    }
    let separator = value.as_bytes()[8];
    ensure!(separator == b':' || separator == b';', invalid());
    let frame = digit_pair(&value[9..11])?;
    Ok((hour, minute, second, separator == b';', Some(frame)))
}

fn validate_pack<T: pack::PackData>(
    field: &'static str,
    value: T,
    ctx: &PackContext,
) -> Result<ValidPack<T>, TextError> {
    Unvalidated::new(value)
        .validate_with(ctx)
        .context(PackValidationSnafu { field })
        .map(ValidPack::from)
}

/// The stable, ordered list of text field names produced by [`to_record`].
pub fn field_names() -> Vec<String> {
    let mut names: Vec<String> = vec![
        "frame_number",
        "arbitrary_bits",
        "h_track_application_id",
        "h_audio_application_id",
        "h_video_application_id",
        "h_subcode_application_id",
        "sc_track_application_id",
        "sc_subcode_application_id",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    for channel in 0..MAX_CHANNELS {
        for dif_sequence in 0..MAX_DIF_SEQUENCES {
            names.push(format!("sc_pack_types_{channel}_{dif_sequence}"));
        }
    }
    names.extend(
        [
            "sc_smpte_timecode",
            "sc_smpte_timecode_color_frame",
            "sc_smpte_timecode_polarity_correction",
            "sc_smpte_timecode_binary_group_flags",
            "sc_smpte_timecode_blank_flag",
            "sc_smpte_binary_group",
            "sc_rec_date",
            "sc_rec_date_week",
            "sc_rec_date_tz",
            "sc_rec_date_dst",
            "sc_rec_date_reserved",
            "sc_recording_time",
            "sc_recording_time_reserved",
        ]
        .into_iter()
        .map(String::from),
    );
    names
}

/// Packs [`pack::RecordingTime`]'s color frame, polarity correction, and binary group flag fields
/// (which carry no independent semantic meaning once the time itself is known) into a single byte
/// for the `sc_recording_time_reserved` text field.
fn pack_recording_time_reserved(
    color_frame: pack::ColorFrame,
    polarity_correction: pack::PolarityCorrection,
    binary_group_flag: pack::BinaryGroupFlag,
) -> u8 {
    (color_frame as u8) << 4 | (polarity_correction as u8) << 3 | (binary_group_flag as u8)
}

fn unpack_recording_time_reserved(
    value: u8,
) -> (pack::ColorFrame, pack::PolarityCorrection, pack::BinaryGroupFlag) {
    let color_frame = if value & 0x10 != 0 {
        pack::ColorFrame::Synchronized
    } else {
        pack::ColorFrame::Unsynchronized
    };
    let polarity_correction =
        if value & 0x08 != 0 { pack::PolarityCorrection::Odd } else { pack::PolarityCorrection::Even };
    let binary_group_flag = match value & 0x07 {
        0b000 => pack::BinaryGroupFlag::TimeUnspecifiedGroupUnspecified,
        0b001 => pack::BinaryGroupFlag::TimeUnspecifiedGroup8BitCodes,
        0b100 => pack::BinaryGroupFlag::TimeUnspecifiedGroupDateTimeZone,
        0b101 => pack::BinaryGroupFlag::TimeUnspecifiedGroupPageLine,
        0b010 => pack::BinaryGroupFlag::TimeClockGroupUnspecified,
        0b011 => pack::BinaryGroupFlag::TimeUnassignedGroupReserved,
        0b110 => pack::BinaryGroupFlag::TimeClockGroupDateTimeZone,
        _ => pack::BinaryGroupFlag::TimeClockGroupPageLine,
    };
    (color_frame, polarity_correction, binary_group_flag)
}

/// Converts a [`FrameData`] into its flat text field representation.
pub fn to_record(data: &FrameData) -> Vec<(String, String)> {
    let mut out = Vec::new();
    out.push(("frame_number".to_string(), data.frame_number.to_string()));
    out.push(("arbitrary_bits".to_string(), hex_int(data.arbitrary_bits)));
    out.push(("h_track_application_id".to_string(), hex_int(data.header_track_application_id)));
    out.push(("h_audio_application_id".to_string(), hex_int(data.header_audio_application_id)));
    out.push(("h_video_application_id".to_string(), hex_int(data.header_video_application_id)));
    out.push((
        "h_subcode_application_id".to_string(),
        hex_int(data.header_subcode_application_id),
    ));
    out.push(("sc_track_application_id".to_string(), hex_int(data.subcode_track_application_id)));
    out.push((
        "sc_subcode_application_id".to_string(),
        hex_int(data.subcode_subcode_application_id),
    ));

    for channel in 0..MAX_CHANNELS {
        for dif_sequence in 0..MAX_DIF_SEQUENCES {
            let name = format!("sc_pack_types_{channel}_{dif_sequence}");
            let value = data
                .subcode_pack_types
                .get(channel)
                .and_then(|c| c.get(dif_sequence))
                .map(|slots| hex_bytes(slots))
                .unwrap_or_default();
            out.push((name, value));
        }
    }

    match data.smpte_timecode {
        Some(tc) => {
            let t = tc.timecode.time;
            out.push((
                "sc_smpte_timecode".to_string(),
                format_time(t.hour, t.minute, t.second, t.drop_frame, Some(t.frame)),
            ));
            out.push((
                "sc_smpte_timecode_color_frame".to_string(),
                color_frame_name(tc.timecode.color_frame).to_string(),
            ));
            out.push((
                "sc_smpte_timecode_polarity_correction".to_string(),
                polarity_correction_name(tc.timecode.polarity_correction).to_string(),
            ));
            out.push((
                "sc_smpte_timecode_binary_group_flags".to_string(),
                binary_group_flag_name(tc.timecode.binary_group_flag).to_string(),
            ));
            out.push((
                "sc_smpte_timecode_blank_flag".to_string(),
                blank_flag_name(tc.blank_flag).to_string(),
            ));
        }
        None => {
            for name in [
                "sc_smpte_timecode",
                "sc_smpte_timecode_color_frame",
                "sc_smpte_timecode_polarity_correction",
                "sc_smpte_timecode_binary_group_flags",
                "sc_smpte_timecode_blank_flag",
            ] {
                out.push((name.to_string(), String::new()));
            }
        }
    }

    match data.smpte_binary_group {
        Some(bg) => {
            let mut s = String::from("0x");
            for nibble in bg.group_data {
                s.push_str(&format!("{:X}", nibble.value()));
            }
            out.push(("sc_smpte_binary_group".to_string(), s));
        }
        None => out.push(("sc_smpte_binary_group".to_string(), String::new())),
    }

    match data.recording_date {
        Some(rd) => {
            out.push((
                "sc_rec_date".to_string(),
                rd.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            ));
            out.push(("sc_rec_date_week".to_string(), rd.weekday.map(|w| w.to_string()).unwrap_or_default()));
            out.push((
                "sc_rec_date_tz".to_string(),
                rd.timezone.map(|tz| (tz.local_minus_utc() / 60).to_string()).unwrap_or_default(),
            ));
            out.push((
                "sc_rec_date_dst".to_string(),
                rd.daylight_saving_time.map(daylight_saving_time_name).unwrap_or_default().to_string(),
            ));
            out.push(("sc_rec_date_reserved".to_string(), hex_int(rd.reserved.value())));
        }
        None => {
            for name in ["sc_rec_date", "sc_rec_date_week", "sc_rec_date_tz", "sc_rec_date_dst", "sc_rec_date_reserved"]
            {
                out.push((name.to_string(), String::new()));
            }
        }
    }

    match data.recording_time {
        Some(rt) => {
            let time_str = rt
                .time
                .map(|t| format_time(t.hour, t.minute, t.second, t.drop_frame, t.frame))
                .unwrap_or_default();
            out.push(("sc_recording_time".to_string(), time_str));
            out.push((
                "sc_recording_time_reserved".to_string(),
                hex_int(pack_recording_time_reserved(
                    rt.color_frame,
                    rt.polarity_correction,
                    rt.binary_group_flag,
                )),
            ));
        }
        None => {
            for name in ["sc_recording_time", "sc_recording_time_reserved"] {
                out.push((name.to_string(), String::new()));
            }
        }
    }

    out
}

/// Reconstructs a [`FrameData`] from its flat text field representation.
///
/// `channel_count` and `dif_sequence_count` size the [`FrameData::subcode_pack_types`] array; they
/// would normally come from [`crate::file::ValidInfoMethods`] for the file the frame belongs to.
pub fn from_record(
    record: &HashMap<String, String>,
    ctx: &PackContext,
    channel_count: u8,
    dif_sequence_count: u8,
) -> Result<FrameData, TextError> {
    let frame_number = parse_frame_number("frame_number", &field("frame_number", record))?;
    let arbitrary_bits = parse_hex_int("arbitrary_bits", &field("arbitrary_bits", record))?;
    let header_track_application_id =
        parse_hex_int("h_track_application_id", &field("h_track_application_id", record))?;
    let header_audio_application_id =
        parse_hex_int("h_audio_application_id", &field("h_audio_application_id", record))?;
    let header_video_application_id =
        parse_hex_int("h_video_application_id", &field("h_video_application_id", record))?;
    let header_subcode_application_id =
        parse_hex_int("h_subcode_application_id", &field("h_subcode_application_id", record))?;
    let subcode_track_application_id =
        parse_hex_int("sc_track_application_id", &field("sc_track_application_id", record))?;
    let subcode_subcode_application_id =
        parse_hex_int("sc_subcode_application_id", &field("sc_subcode_application_id", record))?;

    let mut subcode_pack_types =
        vec![vec![[0u8; SUBCODE_PACK_SLOTS_PER_SEQUENCE]; dif_sequence_count as usize]; channel_count as usize];
    for channel in 0..channel_count as usize {
        for dif_sequence in 0..dif_sequence_count as usize {
            let name = format!("sc_pack_types_{channel}_{dif_sequence}");
            let raw = record.get(&name).cloned().unwrap_or_default();
            if !raw.is_empty() {
                let parsed = parse_hex_bytes("sc_pack_types", &raw, SUBCODE_PACK_SLOTS_PER_SEQUENCE)
                    .map_err(|_| SubcodePackBytesSnafu { channel, dif_sequence, value: raw.clone() }.build())?;
                subcode_pack_types[channel][dif_sequence] = parsed.try_into().unwrap();
            }
        }
    }

    let smpte_timecode_str = field("sc_smpte_timecode", record);
    let smpte_timecode = if smpte_timecode_str.is_empty() {
        None
    } else {
        let (hour, minute, second, drop_frame, frame) = parse_time("sc_smpte_timecode", &smpte_timecode_str)?;
        let frame = frame.with_context(|| DateTimeSnafu {
            field: "sc_smpte_timecode",
            value: smpte_timecode_str.clone(),
        })?;
        let color_frame = parse_color_frame(
            "sc_smpte_timecode_color_frame",
            &field("sc_smpte_timecode_color_frame", record),
        )?;
        let polarity_correction = parse_polarity_correction(
            "sc_smpte_timecode_polarity_correction",
            &field("sc_smpte_timecode_polarity_correction", record),
        )?;
        let binary_group_flag = parse_binary_group_flag(
            "sc_smpte_timecode_binary_group_flags",
            &field("sc_smpte_timecode_binary_group_flags", record),
        )?;
        let blank_flag = parse_blank_flag(
            "sc_smpte_timecode_blank_flag",
            &field("sc_smpte_timecode_blank_flag", record),
        )?;
        let value = pack::TitleTimecode {
            timecode: pack::Timecode {
                time: pack::TimeValue { hour, minute, second, drop_frame, frame },
                color_frame,
                polarity_correction,
                binary_group_flag,
            },
            blank_flag,
        };
        Some(validate_pack("sc_smpte_timecode", value, ctx)?)
    };

    let smpte_binary_group_str = field("sc_smpte_binary_group", record);
    let smpte_binary_group = if smpte_binary_group_str.is_empty() {
        None
    } else {
        let digits = smpte_binary_group_str.strip_prefix("0x").with_context(|| HexBytesSnafu {
            field: "sc_smpte_binary_group",
            value: smpte_binary_group_str.clone(),
        })?;
        ensure!(
            digits.len() == 8,
            HexBytesSnafu { field: "sc_smpte_binary_group", value: smpte_binary_group_str.clone() }
        );
        let mut group_data = [u4::new(0); 8];
        for (i, nibble) in group_data.iter_mut().enumerate() {
            let digit = u8::from_str_radix(&digits[i..i + 1], 16).map_err(|_| {
                HexBytesSnafu { field: "sc_smpte_binary_group", value: smpte_binary_group_str.clone() }
                    .build()
            })?;
            *nibble = u4::new(digit);
        }
        Some(validate_pack("sc_smpte_binary_group", pack::BinaryGroup { group_data }, ctx)?)
    };

    let rec_date_str = field("sc_rec_date", record);
    let recording_date = if rec_date_str.is_empty()
        && field("sc_rec_date_week", record).is_empty()
        && field("sc_rec_date_tz", record).is_empty()
        && field("sc_rec_date_dst", record).is_empty()
    {
        None
    } else {
        let date = if rec_date_str.is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(&rec_date_str, "%Y-%m-%d")
                    .map_err(|_| DateTimeSnafu { field: "sc_rec_date", value: rec_date_str.clone() }.build())?,
            )
        };
        let week_str = field("sc_rec_date_week", record);
        let weekday = if week_str.is_empty() {
            None
        } else {
            Some(week_str.parse::<Weekday>().map_err(|_| {
                DateTimeSnafu { field: "sc_rec_date_week", value: week_str.clone() }.build()
            })?)
        };
        let tz_str = field("sc_rec_date_tz", record);
        let timezone = if tz_str.is_empty() {
            None
        } else {
            let minutes = tz_str
                .parse::<i32>()
                .map_err(|_| DateTimeSnafu { field: "sc_rec_date_tz", value: tz_str.clone() }.build())?;
            Some(FixedOffset::east_opt(minutes * 60).with_context(|| DateTimeSnafu {
                field: "sc_rec_date_tz",
                value: tz_str.clone(),
            })?)
        };
        let dst_str = field("sc_rec_date_dst", record);
        let daylight_saving_time = if dst_str.is_empty() {
            None
        } else {
            Some(parse_daylight_saving_time("sc_rec_date_dst", &dst_str)?)
        };
        let reserved = u2::new(parse_hex_int("sc_rec_date_reserved", &field("sc_rec_date_reserved", record))?);
        Some(validate_pack(
            "sc_rec_date",
            pack::RecordingDate { date, weekday, timezone, daylight_saving_time, reserved },
            ctx,
        )?)
    };

    let recording_time_str = field("sc_recording_time", record);
    let recording_time = if recording_time_str.is_empty() {
        None
    } else {
        let (hour, minute, second, drop_frame, frame) = parse_time("sc_recording_time", &recording_time_str)?;
        let reserved =
            parse_hex_int("sc_recording_time_reserved", &field("sc_recording_time_reserved", record))?;
        let (color_frame, polarity_correction, binary_group_flag) =
            unpack_recording_time_reserved(reserved);
        let value = pack::Timecode {
            time: Some(pack::TimeValue { hour, minute, second, drop_frame, frame }),
            color_frame,
            polarity_correction,
            binary_group_flag,
        };
        Some(validate_pack("sc_recording_time", value, ctx)?)
    };

    Ok(FrameData {
        frame_number,
        arbitrary_bits,
        header_track_application_id,
        header_audio_application_id,
        header_video_application_id,
        header_subcode_application_id,
        subcode_track_application_id,
        subcode_subcode_application_id,
        subcode_pack_types,
        smpte_timecode,
        smpte_binary_group,
        recording_date,
        recording_time,
    })
}
