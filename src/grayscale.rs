// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Packed pixels and their luminosity
//!
//! The carver keeps color as one `u32` per pixel, `0xRRGGBB`.  The
//! grayscale map uses the same packing with the luminosity replicated
//! into all three channels, so it can be written out as an image
//! unchanged.

use crate::twodmap::TwoDimensionalMap;

/// Pack three 8-bit channels into `0xRRGGBB`.
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b)
}

/// Split `0xRRGGBB` back into `[r, g, b]`.
#[inline]
pub fn unpack_rgb(p: u32) -> [u8; 3] {
    [(p >> 16) as u8, (p >> 8) as u8, p as u8]
}

/// The luminance of a packed pixel, truncated, using the ITU-R 601
/// weights.
#[inline]
pub fn luminosity(p: u32) -> u8 {
    let [r, g, b] = unpack_rgb(p);
    (f64::from(r) * 0.2989 + f64::from(g) * 0.5870 + f64::from(b) * 0.1140) as u8
}

/// The brightness channel of a grayscale sample.
#[inline]
pub fn gray_level(p: u32) -> u8 {
    p as u8
}

/// Convert a map of packed colors into a map of packed grays.
pub fn to_grayscale(pixels: &TwoDimensionalMap<u32>) -> TwoDimensionalMap<u32> {
    let (width, height) = pixels.dimensions();
    let data = pixels
        .as_slice()
        .iter()
        .map(|&p| {
            let l = luminosity(p);
            pack_rgb(l, l, l)
        })
        .collect();
    TwoDimensionalMap {
        width,
        height,
        data,
    }
}
