use crate::consts::{RGB565_B_MASK, RGB565_G_MASK, RGB565_R_MASK};

/// Offset of the U and V samples in offset-binary encoding.
pub const CHROMA_BIAS: f64 = 128.0;

pub const YUV_V_TO_R: f64 = 1.402;
pub const YUV_U_TO_G: f64 = 0.344136;
pub const YUV_V_TO_G: f64 = 0.714136;
pub const YUV_U_TO_B: f64 = 1.772;

/// Converts one full-range YUV sample to RGB888.
///
/// Every channel is clipped to `0..=255` first and then truncated, so over- and undershoot of the
/// linear transform saturates instead of wrapping.
#[inline]
pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = f64::from(y);
    let u = f64::from(u) - CHROMA_BIAS;
    let v = f64::from(v) - CHROMA_BIAS;

    let r = y + YUV_V_TO_R * v;
    let g = y - YUV_U_TO_G * u - YUV_V_TO_G * v;
    let b = y + YUV_U_TO_B * u;

    [clip_to_u8(r), clip_to_u8(g), clip_to_u8(b)]
}

#[inline]
fn clip_to_u8(value: f64) -> u8 {
    // `as` truncates toward zero, which is floor after the clip.
    value.clamp(0.0, 255.0) as u8
}

/// Splits a RGB565 pixel into its components.
#[inline]
pub const fn decode_565(pixel: u16) -> [u8; 3] {
    let r = (pixel & RGB565_R_MASK) >> 11;
    let g = (pixel & RGB565_G_MASK) >> 5;
    let b = pixel & RGB565_B_MASK;

    [r as u8, g as u8, b as u8]
}

/// Compose the 5-bit R, 6-bit G, and 5-bit B values into a RGB565 u16 pixel. Does not mask off
/// higher bits if they are set.
#[inline]
pub const fn encode_rgb565_unchecked([r, g, b]: [u8; 3]) -> u16 {
    ((r as u16) << 11) | ((g as u16) << 5) | (b as u16)
}

/// Converts an RGB888 pixel into 5/6/5-bit components by dropping the low bits.
#[inline]
pub const fn rgb888_to_rgb565([r, g, b]: [u8; 3]) -> [u8; 3] {
    [r >> 3, g >> 2, b >> 3]
}

/// Rescales 5/6/5-bit components to 8 bits.
///
/// Uses `c * 255 / max` with integer truncation, so only full intensity maps to 255.
#[inline]
pub const fn rgb565_to_rgb888([r, g, b]: [u8; 3]) -> [u8; 3] {
    [scale_5(r), scale_6(g), scale_5(b)]
}

#[inline]
pub const fn scale_5(c: u8) -> u8 {
    (c as u32 * 255 / 31) as u8
}

#[inline]
pub const fn scale_6(c: u8) -> u8 {
    (c as u32 * 255 / 63) as u8
}
