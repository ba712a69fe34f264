//! Whole-content input/output against a named file or the standard streams.
//!
//! Content is held entirely in memory; there is no streaming.

use std::io::{Read, Write};
use std::path::Path;

use crate::error::IoError;

/// Read all bytes from `filename`, or from stdin when `filename` is empty.
pub fn read_input(filename: &str) -> Result<Vec<u8>, IoError> {
    if !filename.is_empty() {
        tracing::debug!("Reading input from {}", filename);
        return std::fs::read(filename).map_err(|source| IoError::ReadFile {
            path: filename.into(),
            source,
        });
    }

    tracing::debug!("Reading input from stdin");
    read_all(std::io::stdin().lock()).map_err(IoError::ReadStdin)
}

/// Write `content` to `filename`, or to stdout when `filename` is empty.
///
/// Files are created or truncated; on Unix new files get mode `0o644`.
pub fn write_output(filename: &str, content: &[u8]) -> Result<(), IoError> {
    if !filename.is_empty() {
        tracing::debug!("Writing {} bytes to {}", content.len(), filename);
        return write_file(Path::new(filename), content).map_err(|source| IoError::WriteFile {
            path: filename.into(),
            source,
        });
    }

    write_all(std::io::stdout().lock(), content).map_err(IoError::WriteStdout)
}

/// Read a stream to its end.
pub fn read_all<R: Read>(mut reader: R) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(buf)
}

/// Write every byte of `content` to a stream and flush it.
pub fn write_all<W: Write>(mut writer: W, content: &[u8]) -> std::io::Result<()> {
    writer.write_all(content)?;
    writer.flush()
}

fn write_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let file = options.open(path)?;
    write_all(file, content)
}
