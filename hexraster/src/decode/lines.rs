//! Line-buffered ingestion: every text line of the source is one image row.
//!
//! Unlike the flat path, each line is expected to hold one value per pixel already, so no
//! chroma is skipped. Lines beyond `height` are ignored and a source with fewer lines yields a
//! shorter image. Excess tokens on a line are dropped, but a line with fewer than `width`
//! values is rejected.

use crate::{
    hex::{self, ReadError},
    Channels, Geometry, PixelGrid,
};
use log::{debug, warn};
use snafu::{ResultExt, Snafu};
use std::{
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum LinesError {
    #[snafu(display("{source}"), context(false))]
    Read { source: ReadError },
    #[snafu(display("failed to read line {line} of `{}`", path.display()))]
    ReadLine {
        path: PathBuf,
        line: usize,
        source: io::Error,
    },
    #[snafu(display("row {row} has {actual} values, expected {expected}"))]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[snafu(display("source contains no rows"))]
    NoRows,
}

/// Decodes a line-buffered source file into a single-channel grid.
pub fn decode_lines_file(path: &Path, geometry: Geometry) -> Result<PixelGrid, LinesError> {
    let file = hex::open_source(path)?;
    decode_lines(BufReader::new(file), path, geometry)
}

/// Decodes up to `geometry.height` lines from `reader`. `path` is only used for error reporting.
pub fn decode_lines<R: BufRead>(
    reader: R,
    path: &Path,
    geometry: Geometry,
) -> Result<PixelGrid, LinesError> {
    let width = geometry.width();
    // `height` is only an upper bound, so memory grows with the rows actually read.
    let mut samples = Vec::new();
    let mut rows = 0;

    for (row, line) in reader.lines().take(geometry.height()).enumerate() {
        let line = line.context(lines_error::ReadLineSnafu {
            path,
            line: row + 1,
        })?;
        let mut values = hex::parse_hex_line(&line, row + 1)?;

        if values.len() < width {
            return Err(LinesError::RaggedRow {
                row,
                expected: width,
                actual: values.len(),
            });
        }
        if values.len() > width {
            warn!(
                "row {row}: ignoring {} values past width {width}",
                values.len() - width
            );
            values.truncate(width);
        }

        samples.reserve(width);
        samples.extend_from_slice(&values);
        rows += 1;
    }

    if rows == 0 {
        return Err(LinesError::NoRows);
    }
    if rows < geometry.height() {
        debug!(
            "source ended after {rows} of {} rows",
            geometry.height
        );
    }

    Ok(PixelGrid::new(
        geometry.width.get(),
        rows as u32,
        Channels::Luma,
        samples,
    ))
}
