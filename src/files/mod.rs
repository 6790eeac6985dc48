//! Script file reading and writing.
//!
//! Input must be valid UTF-8; an undecodable file is rejected before any
//! pipeline stage runs. Output is written as UTF-8 with CRLF terminators,
//! one per line, because downstream typesetting tools depend on that framing
//! bit-for-bit.

use std::fs;
use std::path::{Path, PathBuf};

/// File-level errors surfaced before or after a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8 text")]
    Encoding { path: PathBuf },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Read a script into lines. Accepts both LF and CRLF input.
pub fn read_script(path: &Path) -> Result<Vec<String>, FileError> {
    let bytes = fs::read(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| FileError::Encoding {
        path: path.to_path_buf(),
    })?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Write lines with CRLF terminators, returning how many were written.
pub fn write_script(path: &Path, lines: &[String]) -> Result<usize, FileError> {
    let mut content = String::with_capacity(lines.iter().map(|l| l.len() + 2).sum());
    for line in lines {
        content.push_str(line);
        content.push_str("\r\n");
    }
    fs::write(path, content).map_err(|source| FileError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(lines.len())
}

/// Resolve a raw output name against the input path.
///
/// A name containing a dot is used as-is; a bare name is treated as a suffix
/// on the input's stem: `script.txt` + `clean` becomes `scriptclean.txt`.
pub fn derive_output_path(input: &Path, raw: &str) -> PathBuf {
    if raw.contains('.') {
        return PathBuf::from(raw);
    }
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{raw}.txt"))
}
