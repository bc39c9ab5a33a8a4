//! Contains general-purpose I/O utility functions.

use std::io;
use std::io::ErrorKind;

/// Retry function for as long as we are interrupted
pub fn retry_if_interrupted<F, O>(mut f: F) -> io::Result<O>
where
    F: FnMut() -> io::Result<O>,
{
    loop {
        match f() {
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            result => break result,
        }
    }
}
