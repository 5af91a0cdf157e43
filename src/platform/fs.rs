// LogTint - platform/fs.rs
//
// Reading documents to classify: files (memory-mapped when large) and stdin.
// Invalid UTF-8 is replaced rather than rejected; a log viewer must still
// show the readable parts of a damaged file.

use crate::util::constants;
use crate::util::error::InputError;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Display name used for stdin in messages and exports.
pub const STDIN_NAME: &str = "-";

/// Read a whole file as text, refusing files above `max_size` bytes.
pub fn read_document(path: &Path, max_size: u64) -> Result<String, InputError> {
    let io_err = |source: io::Error| InputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > max_size {
        return Err(InputError::TooLarge {
            path: path.to_path_buf(),
            size,
            max_size,
        });
    }

    let text = if size >= constants::MMAP_THRESHOLD {
        read_mapped(path).map_err(io_err)?
    } else {
        let bytes = std::fs::read(path).map_err(io_err)?;
        into_text(bytes)
    };

    tracing::debug!(file = %path.display(), bytes = size, "Document read");
    Ok(text)
}

/// Read all of stdin as text.
pub fn read_stdin() -> Result<String, InputError> {
    let mut bytes = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut bytes)
        .map_err(|source| InputError::Io {
            path: PathBuf::from(STDIN_NAME),
            source,
        })?;
    Ok(into_text(bytes))
}

/// Memory-map a large file (avoids a second full-size heap buffer for the
/// raw bytes).
fn read_mapped(path: &Path) -> io::Result<String> {
    let file = std::fs::File::open(path)?;
    // SAFETY: the map is read-only and dropped before returning. External
    // modification of the file while it is mapped could produce garbage
    // text, which is acceptable for a viewer reading already-written logs.
    let mmap = unsafe { memmap2::Mmap::map(&file)? };
    Ok(String::from_utf8_lossy(&mmap).into_owned())
}

/// Convert without copying when the bytes are already valid UTF-8.
fn into_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!("Input is not valid UTF-8; replacing invalid sequences");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}
