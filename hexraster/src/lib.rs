//! Decoder for raw camera frames that were captured as hex-dumped text.
//!
//! Serial consoles and debug logs often carry frame buffers as whitespace-separated hexadecimal
//! byte tokens (`10 80 10 80 ...`). This crate turns such a dump back into a pixel grid, given the
//! frame geometry and the pixel layout the sensor was configured for.
//!
//! # Supported layouts
//!
//! - [`PixelFormat::Yuyv422Rgb`]: packed 4:2:2 luma/chroma, converted to 8-bit RGB.
//! - [`PixelFormat::Yuyv422Gray`]: the luma plane of a YUYV422 frame, as 8-bit grayscale.
//! - [`PixelFormat::Rgb565`]: 16-bit packed truecolor, rescaled to 8-bit RGB.
//!
//! Geometry and layout are never inferred from the dump; see [`consts`] for the exact byte
//! layouts.
//!
//! # Pipeline
//!
//! [`hex`] parses the text into bytes (padding short dumps with zeros), [`decode`] unpacks them
//! with one function per layout, and [`utils`] holds the colorspace math. [`decode::lines`] is an
//! alternative ingestion path where each text line is one image row. [`run`] ties the steps
//! together for a single [`config::DecodeConfig`] and hands the result to an [`run::ImageSink`].

use core::num::NonZeroU32;

pub mod config;
pub mod decode;
pub mod hex;
pub mod naming;
pub mod run;
pub mod utils;

pub use config::{DecodeConfig, Ingest, OutputTarget};
pub use decode::decode;
pub use run::{ImageSink, RunError};

/// Pixel dimensions of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

impl Geometry {
    /// Returns `None` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width.get() as usize
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height.get() as usize
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }
}

/// Byte order of the 16-bit words in an RGB565 stream.
///
/// Camera modules usually emit the high byte first, which is why that is the default. Reading a
/// stream with the wrong order doesn't fail, it just scrambles the channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rgb565ByteOrder {
    #[default]
    BigEndian,
    LittleEndian,
}

/// Source pixel layout, together with the conversion applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Yuyv422Rgb,
    Yuyv422Gray,
    Rgb565(Rgb565ByteOrder),
}

impl PixelFormat {
    /// Number of source bytes per pixel. All supported layouts average two bytes per pixel.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Yuyv422Rgb | PixelFormat::Yuyv422Gray => consts::YUYV_BYTES_PER_PAIR / 2,
            PixelFormat::Rgb565(_) => consts::RGB565_BYTES_PER_PIXEL,
        }
    }

    /// Channel layout of the decoded grid.
    #[inline]
    pub const fn channels(self) -> Channels {
        match self {
            PixelFormat::Yuyv422Gray => Channels::Luma,
            PixelFormat::Yuyv422Rgb | PixelFormat::Rgb565(_) => Channels::Rgb,
        }
    }

    /// Exact number of source bytes a frame of `geometry` occupies.
    #[inline]
    pub fn required_bytes(self, geometry: Geometry) -> usize {
        geometry.pixel_count() * self.bytes_per_pixel()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// One 8-bit luma sample per pixel.
    Luma,
    /// Three 8-bit samples per pixel, in R, G, B order.
    Rgb,
}

impl Channels {
    #[inline]
    pub const fn count(self) -> usize {
        match self {
            Channels::Luma => 1,
            Channels::Rgb => 3,
        }
    }
}

/// A decoded frame: row-major 8-bit samples, `channels.count()` samples per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    channels: Channels,
    samples: Vec<u8>,
}

impl PixelGrid {
    /// # Panics
    ///
    /// Panics if `samples` doesn't hold exactly `width * height * channels.count()` values.
    pub fn new(width: u32, height: u32, channels: Channels, samples: Vec<u8>) -> Self {
        assert_eq!(
            samples.len(),
            width as usize * height as usize * channels.count(),
            "sample count doesn't match a {width}x{height} grid with {} channel(s)",
            channels.count()
        );

        Self {
            width,
            height,
            channels,
            samples,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    #[inline]
    fn row_len(&self) -> usize {
        self.width as usize * self.channels.count()
    }

    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let row_len = self.row_len();
        Some(&self.samples[y as usize * row_len..][..row_len])
    }

    /// The samples of a single pixel (1 or 3 values).
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width {
            return None;
        }
        let channels = self.channels.count();
        self.row(y)
            .map(|row| &row[x as usize * channels..][..channels])
    }
}

/// Byte layouts of the supported source formats.
pub mod consts {
    /// YUYV422 packs two horizontally adjacent pixels into four bytes.
    ///
    /// ```plain
    /// .- YUYV422 pixel pair ------------------------------.
    /// |   Byte[0]  |   Byte[1]  |   Byte[2]  |   Byte[3]  |
    /// |------------+------------+------------+------------|
    /// |     Y0     |      U     |     Y1     |      V     |
    /// `---------------------------------------------------`
    /// ```
    ///
    /// - `Y0`/`Y1`: luma of the left/right pixel
    /// - `U`/`V`: chroma shared by both pixels, offset-binary around 128
    ///
    /// A row of `width` pixels therefore spans `width * 2` bytes. Luma sits at every even offset,
    /// U at offsets ≡ 1 (mod 4), V at offsets ≡ 3 (mod 4).
    pub const YUYV_BYTES_PER_PAIR: usize = 4;
    pub const YUYV_Y0_OFFSET: usize = 0;
    pub const YUYV_U_OFFSET: usize = 1;
    pub const YUYV_Y1_OFFSET: usize = 2;
    pub const YUYV_V_OFFSET: usize = 3;

    /// RGB565 stores one pixel per 16-bit word.
    ///
    /// ```plain
    /// .- RGB565 word --------------------------------------------.
    /// | 15 14 13 12 11 | 10  9  8  7  6  5 |  4  3  2  1  0 |
    /// |----------------+-------------------+----------------|
    /// |       R        |         G         |       B        |
    /// `--------------------------------------------------------`
    /// ```
    ///
    /// The word's byte order in the stream is given by
    /// [`Rgb565ByteOrder`](crate::Rgb565ByteOrder), high byte first unless configured otherwise.
    pub const RGB565_BYTES_PER_PIXEL: usize = 2;
    pub const RGB565_R_MASK: u16 = 0b1111_1000_0000_0000;
    pub const RGB565_G_MASK: u16 = 0b0000_0111_1110_0000;
    pub const RGB565_B_MASK: u16 = 0b0000_0000_0001_1111;
}
