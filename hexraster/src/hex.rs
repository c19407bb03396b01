//! Parsing of hex-dumped byte streams.

use log::warn;
use snafu::{ResultExt, Snafu};
use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum ReadError {
    #[snafu(display("source file `{}` not found", path.display()))]
    SourceNotFound { path: PathBuf },
    #[snafu(display("failed to read source file `{}`", path.display()))]
    ReadSource { path: PathBuf, source: io::Error },
    #[snafu(display("line {line}: `{token}` is not a hexadecimal byte"))]
    TokenParse { token: String, line: usize },
}

/// Reports a dump that held fewer bytes than the frame needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub required: usize,
    pub available: usize,
}

impl Shortfall {
    #[inline]
    pub fn missing(&self) -> usize {
        self.required - self.available
    }
}

/// A byte buffer of exactly the length a frame needs.
#[derive(Debug)]
pub struct FrameBytes {
    pub bytes: Vec<u8>,
    /// Set if the tail of `bytes` was zero-filled.
    pub shortfall: Option<Shortfall>,
}

/// Parses a single token: an optional `+`, an optional `0x`/`0X` prefix, then hex digits.
pub fn parse_hex_byte(token: &str) -> Option<u8> {
    let unsigned = token.strip_prefix('+').unwrap_or(token);
    let digits = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
        .unwrap_or(unsigned);
    // The sign was handled above, `from_str_radix` must not see another one.
    if digits.starts_with(['+', '-']) {
        return None;
    }
    u8::from_str_radix(digits, 16).ok()
}

/// Parses every whitespace-separated token on one line. `line` is only used for error reporting.
pub fn parse_hex_line(text: &str, line: usize) -> Result<Vec<u8>, ReadError> {
    text.split_whitespace()
        .map(|token| {
            parse_hex_byte(token).ok_or_else(|| ReadError::TokenParse {
                token: token.to_owned(),
                line,
            })
        })
        .collect()
}

/// Parses a whole dump. Line breaks are treated like any other whitespace.
pub fn parse_hex_tokens(text: &str) -> Result<Vec<u8>, ReadError> {
    let mut bytes = Vec::with_capacity(text.len() / 3);
    for (idx, line) in text.lines().enumerate() {
        bytes.extend(parse_hex_line(line, idx + 1)?);
    }
    Ok(bytes)
}

/// Opens a source file, telling a missing file apart from other I/O failures.
pub fn open_source(path: &Path) -> Result<File, ReadError> {
    File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ReadError::SourceNotFound {
            path: path.to_owned(),
        },
        _ => ReadError::ReadSource {
            path: path.to_owned(),
            source,
        },
    })
}

/// Reads a whole source file into a string.
pub fn read_source(path: &Path) -> Result<String, ReadError> {
    let mut text = String::new();
    open_source(path)?
        .read_to_string(&mut text)
        .context(read_error::ReadSourceSnafu { path })?;
    Ok(text)
}

/// Zero-pads or truncates `bytes` to exactly `required` bytes.
pub fn fit_to_length(mut bytes: Vec<u8>, required: usize) -> FrameBytes {
    let available = bytes.len();
    let shortfall = if available < required {
        warn!("not enough data: {required} bytes required, {available} bytes available; padding with zeros");
        bytes.resize(required, 0);
        Some(Shortfall {
            required,
            available,
        })
    } else {
        if available > required {
            warn!("ignoring {} trailing bytes", available - required);
            bytes.truncate(required);
        }
        None
    };

    FrameBytes { bytes, shortfall }
}

/// Reads and parses a dump, then fits it to `required` bytes.
pub fn read_frame(path: &Path, required: usize) -> Result<FrameBytes, ReadError> {
    let text = read_source(path)?;
    let bytes = parse_hex_tokens(&text)?;
    Ok(fit_to_length(bytes, required))
}
