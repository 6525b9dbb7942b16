//! Streaming gzip decompression of a fetched payload.

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

/// Decompresses the gzip file `src` into `dest` (created or truncated).
/// Concatenated gzip members are decoded back to back, as `gunzip` does.
/// Returns the number of decompressed bytes. A truncated or corrupt stream is
/// an `InvalidData`/`UnexpectedEof` error; `dest` then holds partial output.
pub fn gunzip_file(src: &Path, dest: &Path) -> io::Result<u64> {
    let input = File::open(src)?;
    let mut decoder = MultiGzDecoder::new(BufReader::new(input));
    let mut out = BufWriter::new(File::create(dest)?);
    let n = io::copy(&mut decoder, &mut out)?;
    out.flush()?;
    out.get_ref().sync_all()?;
    Ok(n)
}
