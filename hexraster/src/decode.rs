use crate::{Geometry, PixelFormat, PixelGrid, Rgb565ByteOrder};
use byteorder::{BigEndian, LittleEndian};
use log::debug;

pub mod lines;
mod rgb565;
mod yuyv;

pub use rgb565::decode_rgb565;
pub use yuyv::{decode_yuyv422_gray, decode_yuyv422_rgb};

/// Decodes a frame with the strategy matching `format`.
///
/// `bytes` must already be fitted to the frame size (see [`crate::hex::fit_to_length`]).
///
/// # Panics
///
/// Panics if `bytes.len()` differs from `format.required_bytes(geometry)`, or if a YUYV422 to RGB
/// decode is requested for an odd width.
pub fn decode(bytes: &[u8], geometry: Geometry, format: PixelFormat) -> PixelGrid {
    debug!(
        "decoding {}x{} frame as {format:?}",
        geometry.width, geometry.height
    );

    match format {
        PixelFormat::Yuyv422Rgb => decode_yuyv422_rgb(bytes, geometry),
        PixelFormat::Yuyv422Gray => decode_yuyv422_gray(bytes, geometry),
        PixelFormat::Rgb565(Rgb565ByteOrder::BigEndian) => {
            decode_rgb565::<BigEndian>(bytes, geometry)
        }
        PixelFormat::Rgb565(Rgb565ByteOrder::LittleEndian) => {
            decode_rgb565::<LittleEndian>(bytes, geometry)
        }
    }
}

#[inline]
fn assert_frame_len(bytes: &[u8], geometry: Geometry, format: PixelFormat) {
    let required = format.required_bytes(geometry);
    assert_eq!(
        bytes.len(),
        required,
        "{}x{} {format:?} frame needs exactly {required} bytes",
        geometry.width,
        geometry.height
    );
}
