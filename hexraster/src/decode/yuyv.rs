use super::assert_frame_len;
use crate::{
    consts::{
        YUYV_BYTES_PER_PAIR, YUYV_U_OFFSET, YUYV_V_OFFSET, YUYV_Y0_OFFSET, YUYV_Y1_OFFSET,
    },
    utils::yuv_to_rgb,
    Channels, Geometry, PixelFormat, PixelGrid,
};

/// Decodes a YUYV422 frame to RGB888.
///
/// Each pixel pair keeps its own U and V: both pixels are converted with the same chroma, nothing
/// is interpolated across pairs.
///
/// # Panics
///
/// Panics if the buffer length doesn't match the geometry, or if the width is odd (the last pixel
/// of a row would have no V sample).
pub fn decode_yuyv422_rgb(bytes: &[u8], geometry: Geometry) -> PixelGrid {
    assert_frame_len(bytes, geometry, PixelFormat::Yuyv422Rgb);
    assert!(
        geometry.width() % 2 == 0,
        "YUYV422 to RGB needs an even width, got {}",
        geometry.width
    );

    let mut samples = Vec::with_capacity(geometry.pixel_count() * Channels::Rgb.count());
    for pair in bytes.chunks_exact(YUYV_BYTES_PER_PAIR) {
        let u = pair[YUYV_U_OFFSET];
        let v = pair[YUYV_V_OFFSET];

        samples.extend_from_slice(&yuv_to_rgb(pair[YUYV_Y0_OFFSET], u, v));
        samples.extend_from_slice(&yuv_to_rgb(pair[YUYV_Y1_OFFSET], u, v));
    }

    PixelGrid::new(
        geometry.width.get(),
        geometry.height.get(),
        Channels::Rgb,
        samples,
    )
}

/// Extracts the luma plane of a YUYV422 frame.
///
/// Pixel `(x, y)` is the byte at `y * width * 2 + x * 2`, the same Y the RGB path converts.
///
/// # Panics
///
/// Panics if the buffer length doesn't match the geometry.
pub fn decode_yuyv422_gray(bytes: &[u8], geometry: Geometry) -> PixelGrid {
    assert_frame_len(bytes, geometry, PixelFormat::Yuyv422Gray);

    // Rows are `width * 2` bytes, so luma sits at every even offset of the whole buffer.
    let samples = bytes.iter().step_by(2).copied().collect();

    PixelGrid::new(
        geometry.width.get(),
        geometry.height.get(),
        Channels::Luma,
        samples,
    )
}
