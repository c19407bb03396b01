use super::assert_frame_len;
use crate::{
    consts::RGB565_BYTES_PER_PIXEL,
    utils::{decode_565, rgb565_to_rgb888},
    Channels, Geometry, PixelFormat, PixelGrid, Rgb565ByteOrder,
};
use byteorder::ByteOrder;

/// Decodes an RGB565 frame to RGB888, reading each 16-bit word with byte order `B`.
///
/// # Panics
///
/// Panics if the buffer length doesn't match the geometry.
pub fn decode_rgb565<B: ByteOrder>(bytes: &[u8], geometry: Geometry) -> PixelGrid {
    // Byte order doesn't affect the length.
    assert_frame_len(
        bytes,
        geometry,
        PixelFormat::Rgb565(Rgb565ByteOrder::BigEndian),
    );

    let mut samples = Vec::with_capacity(geometry.pixel_count() * Channels::Rgb.count());
    for cell in bytes.chunks_exact(RGB565_BYTES_PER_PIXEL) {
        let pixel = B::read_u16(cell);
        samples.extend_from_slice(&rgb565_to_rgb888(decode_565(pixel)));
    }

    PixelGrid::new(
        geometry.width.get(),
        geometry.height.get(),
        Channels::Rgb,
        samples,
    )
}
