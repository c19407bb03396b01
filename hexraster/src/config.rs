use crate::{
    naming::{self, NamingError},
    Geometry, PixelFormat,
};
use core::num::NonZeroU32;
use std::path::{Path, PathBuf};

/// How the source text is turned into rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    /// The whole source is one token stream in the given layout.
    Flat(PixelFormat),
    /// Every line is one row of single-channel values.
    Lines,
}

/// Where the decoded image goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Path(PathBuf),
    /// `<dir>/<prefix><n>.<extension>`, numbered after the highest existing `n`.
    Numbered {
        dir: PathBuf,
        prefix: String,
        extension: String,
    },
}

impl OutputTarget {
    pub fn resolve(&self) -> Result<PathBuf, NamingError> {
        match self {
            OutputTarget::Path(path) => Ok(path.clone()),
            OutputTarget::Numbered {
                dir,
                prefix,
                extension,
            } => naming::next_output_path(dir, prefix, extension),
        }
    }
}

/// Everything a single decode needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeConfig {
    pub source_path: PathBuf,
    pub geometry: Geometry,
    pub ingest: Ingest,
    pub output: OutputTarget,
}

impl DecodeConfig {
    pub const DEFAULT_SOURCE: &'static str = "screenlog.0";
    pub const DEFAULT_GEOMETRY: Geometry = match (NonZeroU32::new(320), NonZeroU32::new(240)) {
        (Some(width), Some(height)) => Geometry { width, height },
        _ => panic!("default geometry must be non-zero"),
    };
    pub const DEFAULT_PREFIX: &'static str = "output_grayscale_image";
    pub const DEFAULT_EXTENSION: &'static str = "png";

    pub fn new(
        source_path: impl AsRef<Path>,
        geometry: Geometry,
        ingest: Ingest,
        output: OutputTarget,
    ) -> Self {
        Self {
            source_path: source_path.as_ref().to_owned(),
            geometry,
            ingest,
            output,
        }
    }
}

impl Default for DecodeConfig {
    /// A 320x240 YUYV422 grayscale decode of `screenlog.0`, numbered into the working directory.
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(Self::DEFAULT_SOURCE),
            geometry: Self::DEFAULT_GEOMETRY,
            ingest: Ingest::Flat(PixelFormat::Yuyv422Gray),
            output: OutputTarget::Numbered {
                dir: PathBuf::from("."),
                prefix: Self::DEFAULT_PREFIX.to_owned(),
                extension: Self::DEFAULT_EXTENSION.to_owned(),
            },
        }
    }
}
