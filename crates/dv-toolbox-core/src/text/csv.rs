//! Reads and writes [`FrameData`] rows to and from CSV files, using the flat text field
//! representation defined by [`super`].

use std::collections::HashMap;
use std::io::{Read, Write};

use snafu::prelude::*;

use super::{field_names, from_record, to_record, TextError};
use crate::{frame::FrameData, pack::PackContext};


/// Error reading or writing a CSV file of [`FrameData`] rows.
#[derive(Debug, Snafu)]
#[allow(missing_docs)]
pub enum CsvError {
    #[snafu(display("couldn't read CSV data"))]
    Read { source: ::csv::Error },

    #[snafu(display("couldn't write CSV data"))]
    Write { source: ::csv::Error },

    #[snafu(display("couldn't flush CSV writer"))]
    Flush { source: std::io::Error },

    #[snafu(display("couldn't convert row for frame {frame_number} to frame data"))]
    Convert { frame_number: u64, source: TextError },

    #[snafu(display("row {row} has invalid or missing frame_number value {value:?}"))]
    RowFrameNumber { row: usize, value: String },
}

/// Writes one header row followed by one row per frame, in the order given.
pub fn write_frame_data_csv<W: Write>(writer: W, frames: &[FrameData]) -> Result<(), CsvError> {
    let names = field_names();
    let mut writer = ::csv::WriterBuilder::new().from_writer(writer);
    writer.write_record(&names).context(WriteSnafu)?;
    for frame in frames {
        let by_name: HashMap<String, String> = to_record(frame).into_iter().collect();
        let row: Vec<String> =
            names.iter().map(|name| by_name.get(name).cloned().unwrap_or_default()).collect();
        writer.write_record(&row).context(WriteSnafu)?;
    }
    writer.flush().context(FlushSnafu)?;
    Ok(())
}

/// Counts how many channels and DIF sequences a header row describes, by looking for the
/// highest-numbered `sc_pack_types_{channel}_{sequence}` column present.
///
/// A column for channel 0 and sequence 9 but not sequence 10 implies an NTSC-style 10-sequence
/// system; one that goes up through sequence 11 implies a PAL-style 12-sequence system, per the
/// same convention `to_record` writes.
fn infer_dimensions(headers: &::csv::StringRecord) -> (u8, u8) {
    let mut channel_count = 0u8;
    while headers.iter().any(|h| h == format!("sc_pack_types_{channel_count}_0")) {
        channel_count += 1;
    }
    let mut dif_sequence_count = 0u8;
    while headers.iter().any(|h| h == format!("sc_pack_types_0_{dif_sequence_count}")) {
        dif_sequence_count += 1;
    }
    (channel_count, dif_sequence_count)
}

/// Reads every row of a CSV file of [`FrameData`] rows, in file order.
///
/// The channel and DIF sequence counts are inferred from the `sc_pack_types_*` columns present
/// in the header row, so the caller does not need to already know the file's system.
pub fn read_frame_data_csv<R: Read>(reader: R, ctx: &PackContext) -> Result<Vec<FrameData>, CsvError> {
    let mut reader = ::csv::ReaderBuilder::new().from_reader(reader);
    let headers = reader.headers().context(ReadSnafu)?.clone();
    let (channel_count, dif_sequence_count) = infer_dimensions(&headers);
    let mut frames = Vec::new();
    for (row_index, result) in reader.records().enumerate() {
        let row = result.context(ReadSnafu)?;
        let map: HashMap<String, String> =
            headers.iter().zip(row.iter()).map(|(name, value)| (name.to_string(), value.to_string())).collect();
        let frame_number_value = map.get("frame_number").cloned().unwrap_or_default();
        let frame_number = frame_number_value
            .parse::<u64>()
            .ok()
            .with_context(|| RowFrameNumberSnafu { row: row_index, value: frame_number_value.clone() })?;
        let frame = from_record(&map, ctx, channel_count, dif_sequence_count)
            .context(ConvertSnafu { frame_number })?;
        frames.push(frame);
    }
    Ok(frames)
}
