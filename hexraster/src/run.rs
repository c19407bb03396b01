//! One decode invocation: read, decode, name, write.

use crate::{
    config::{DecodeConfig, Ingest},
    decode::{
        self,
        lines::{self, LinesError},
    },
    hex::{self, ReadError, Shortfall},
    naming::NamingError,
    PixelFormat, PixelGrid,
};
use log::debug;
use snafu::{ensure, Snafu};
use std::{error::Error, path::Path, path::PathBuf};

/// Persists a finished grid. The grid's [`Channels`](crate::Channels) decide whether the image
/// is written as grayscale or RGB.
pub trait ImageSink {
    type Error: Into<Box<dyn Error + Send + Sync>>;

    fn write(&mut self, grid: &PixelGrid, path: &Path) -> Result<(), Self::Error>;
}

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum RunError {
    #[snafu(display("YUYV422 to RGB needs an even width, got {width}"))]
    OddWidth { width: u32 },
    #[snafu(display("{source}"), context(false))]
    Read { source: ReadError },
    #[snafu(display("{source}"), context(false))]
    Lines { source: LinesError },
    #[snafu(display("{source}"), context(false))]
    Naming { source: NamingError },
    #[snafu(display("failed to write image to `{}`: {source}", path.display()))]
    SinkWrite {
        path: PathBuf,
        source: Box<dyn Error + Send + Sync>,
    },
}

/// A decoded frame, plus the padding report of the flat path.
#[derive(Debug)]
pub struct Decoded {
    pub grid: PixelGrid,
    pub shortfall: Option<Shortfall>,
}

/// Result of a successful [`run`].
#[derive(Debug)]
pub struct Written {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub shortfall: Option<Shortfall>,
}

/// Reads and decodes the configured source without writing anything.
pub fn decode_source(config: &DecodeConfig) -> Result<Decoded, RunError> {
    let geometry = config.geometry;

    match config.ingest {
        Ingest::Flat(format) => {
            ensure!(
                format != PixelFormat::Yuyv422Rgb || geometry.width() % 2 == 0,
                run_error::OddWidthSnafu {
                    width: geometry.width.get()
                }
            );

            let frame = hex::read_frame(&config.source_path, format.required_bytes(geometry))?;
            Ok(Decoded {
                grid: decode::decode(&frame.bytes, geometry, format),
                shortfall: frame.shortfall,
            })
        }
        Ingest::Lines => Ok(Decoded {
            grid: lines::decode_lines_file(&config.source_path, geometry)?,
            shortfall: None,
        }),
    }
}

/// Decodes the configured source and hands the grid to `sink`.
///
/// The output path is resolved only after decoding succeeded, so a failed run never claims a
/// number.
pub fn run<S: ImageSink>(config: &DecodeConfig, sink: &mut S) -> Result<Written, RunError> {
    let Decoded { grid, shortfall } = decode_source(config)?;

    let path = config.output.resolve()?;
    debug!("writing {}x{} image to `{}`", grid.width(), grid.height(), path.display());
    if let Err(e) = sink.write(&grid, &path) {
        return Err(RunError::SinkWrite {
            path,
            source: e.into(),
        });
    }

    Ok(Written {
        path,
        width: grid.width(),
        height: grid.height(),
        shortfall,
    })
}
