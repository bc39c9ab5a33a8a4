//! This crate provides functions for working with and restoring videos in
//! [Digital Video (DV) format](https://en.wikipedia.org/wiki/DV_(video_format)).
//!
//! Currently supported formats:
//! - [IEC 61834-2](https://webstore.iec.ch/en/publication/5984): this format was recorded by many
//!   consumer camcorders, among other devices.

pub mod block;
pub mod file;
pub mod frame;
pub mod ioutil;
pub mod pack;
pub mod text;

#[cfg(test)]
pub(crate) mod testutil;
