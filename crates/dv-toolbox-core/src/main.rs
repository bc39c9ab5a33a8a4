//! Command-line front end for decoding a raw DV elementary stream to CSV, and patching one back
//! from an edited CSV.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use dv_toolbox_core::file::{self, Info, UnvalidatedInfo};
use dv_toolbox_core::pack::PackContext;
use dv_toolbox_core::text::csv::{self as frame_csv, CsvError};
use garde::Validate;
use num::rational::Ratio;
use snafu::prelude::*;

/// Inspects and repairs raw DV elementary streams.
#[derive(Parser)]
#[command(name = "dv-toolbox", about = "Inspect and repair raw DV elementary streams", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode every frame of a raw DV file's metadata into a CSV file.
    Read {
        /// Path to the raw DV elementary stream.
        input: PathBuf,

        /// Path to write the decoded CSV to.
        #[arg(long)]
        output_csv: PathBuf,

        #[command(flatten)]
        descriptor: Descriptor,
    },

    /// Patch a raw DV file's metadata in place using a previously-decoded, possibly edited CSV.
    Write {
        /// Path to the raw DV elementary stream to patch in place.
        input: PathBuf,

        /// Path to the CSV of frame metadata to apply.
        #[arg(long)]
        input_csv: PathBuf,

        #[command(flatten)]
        descriptor: Descriptor,
    },
}

/// Flags describing the container-level layout of a raw DV file.
///
/// This crate only works with the raw elementary stream, so this information normally comes
/// from an external container prober; on the command line, the caller supplies it directly.
#[derive(clap::Args)]
struct Descriptor {
    /// DV broadcast system the file was recorded for.
    #[arg(long, value_enum)]
    system: SystemArg,

    /// Number of stereo audio streams present in the file: 0, 1, or 2.
    #[arg(long, default_value_t = 1)]
    audio_stereo_stream_count: u8,

    /// Audio sample rate in Hz; required unless `audio-stereo-stream-count` is 0.
    #[arg(long)]
    audio_sample_rate: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SystemArg {
    /// 525 signal lines at 29.97 frames/sec.
    Ntsc,
    /// 625 signal lines at 25.00 frames/sec.
    Pal,
}

/// Top-level error type for the command-line tool.
#[derive(Debug, Snafu)]
enum CliError {
    #[snafu(display("couldn't open {path:?}"))]
    Open { path: PathBuf, source: std::io::Error },

    #[snafu(display("couldn't determine size of {path:?}"))]
    Metadata { path: PathBuf, source: std::io::Error },

    #[snafu(display("no supported channel count explains the file size for the given system"))]
    Descriptor { source: garde::Report },

    #[snafu(display("couldn't read frame data"))]
    ReadFrames { source: file::FrameDataIoError },

    #[snafu(display("couldn't write frame data"))]
    WriteFrames { source: file::FrameDataIoError },

    #[snafu(display("couldn't write CSV"))]
    WriteCsv { source: CsvError },

    #[snafu(display("couldn't read CSV"))]
    ReadCsv { source: CsvError },
}

/// Builds a validated [`file::ValidInfo`] from the command-line descriptor flags and the raw
/// file's actual size on disk.
///
/// The channel count isn't a command-line flag: it's inferred by trying both supported values
/// and keeping whichever one evenly divides the file into whole frames.
fn build_info(path: &PathBuf, descriptor: &Descriptor) -> Result<file::ValidInfo, CliError> {
    let file_size = path.metadata().context(MetadataSnafu { path: path.clone() })?.len();
    let (video_frame_rate, dif_sequence_count) = match descriptor.system {
        SystemArg::Ntsc => (Ratio::<u32>::new(30_000, 1_001), 10u128),
        SystemArg::Pal => (Ratio::<u32>::from(25), 12u128),
    };

    let mut last_attempt = None;
    for channels in [1u128, 2u128] {
        let frame_size = channels * dif_sequence_count * 150 * 80;
        let frame_count = u128::from(file_size) / frame_size;
        let video_duration = Ratio::<u128>::new(
            frame_count * u128::from(*video_frame_rate.denom()),
            u128::from(*video_frame_rate.numer()),
        );
        let info = UnvalidatedInfo::new(Info {
            file_size,
            video_frame_rate,
            video_duration,
            audio_stereo_stream_count: descriptor.audio_stereo_stream_count,
            audio_sample_rate: descriptor.audio_sample_rate,
        });
        match info.validate() {
            Ok(valid) => return Ok(valid),
            Err(e) => last_attempt = Some(e),
        }
    }
    Err(last_attempt.expect("at least one channel count was tried")).context(DescriptorSnafu)
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Read { input, output_csv, descriptor } => {
            let info = build_info(&input, &descriptor)?;
            let mut reader = File::open(&input).context(OpenSnafu { path: input.clone() })?;
            let frames = file::read_frame_data(&mut reader, &info).context(ReadFramesSnafu)?;
            let output = File::create(&output_csv).context(OpenSnafu { path: output_csv })?;
            frame_csv::write_frame_data_csv(output, &frames).context(WriteCsvSnafu)?;
        }
        Command::Write { input, input_csv, descriptor } => {
            let info = build_info(&input, &descriptor)?;
            let ctx = PackContext { file_info: info };
            let csv_file = File::open(&input_csv).context(OpenSnafu { path: input_csv })?;
            let frames = frame_csv::read_frame_data_csv(csv_file, &ctx).context(ReadCsvSnafu)?;
            let mut dv_file = OpenOptions::new()
                .read(true)
                .write(true)
                .open(&input)
                .context(OpenSnafu { path: input.clone() })?;
            file::write_frame_data(&mut dv_file, &frames, &info).context(WriteFramesSnafu)?;
        }
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
