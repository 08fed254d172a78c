//! Byte-oriented line reading shared by the OBJ and MTL decoders
//!
//! Lines are split on `\n` from raw bytes. Text that is not valid UTF-8 is
//! decoded lossily, so a stray Latin-1 comment only fails if a field that
//! actually gets parsed is affected.

use std::borrow::Cow;
use std::io::BufRead;

use super::error::ObjError;

/// Call `handle` with each 1-based line number and its text, line ending removed
pub(crate) fn for_each_line<R, F>(mut reader: R, origin: &str, mut handle: F) -> Result<(), ObjError>
where
    R: BufRead,
    F: FnMut(usize, &str) -> Result<(), ObjError>,
{
    let mut buf = Vec::new();
    let mut line = 0;
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| ObjError::io(origin, e))?;
        if read == 0 {
            return Ok(());
        }
        line += 1;
        handle(line, &decode_line(&buf))?;
    }
}

fn decode_line(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes)
}
