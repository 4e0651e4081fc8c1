// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Moving maps in and out of ImageRS
//!
//! The carver works on packed `0xRRGGBB` maps.  These helpers convert
//! any ImageRS image into one, and turn pixel and energy maps back
//! into images that can be saved.

use crate::errors::SeamError;
use crate::grayscale::{pack_rgb, unpack_rgb};
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, GrayImage, ImageBuffer, Luma, Pixel, Primitive, Rgb, RgbImage};
use itertools::iproduct;
use num_traits::{NumCast, ToPrimitive};
use std::path::Path;

// Scale a channel of any subpixel type into 0..=255, against the
// type's nominal white (255 for u8, 65535 for u16, 1.0 for floats).
#[inline]
fn to_u8_channel<S: Primitive>(c: S) -> u8 {
    let max = S::DEFAULT_MAX_VALUE.to_f32().unwrap_or(255.0);
    let c = c.to_f32().unwrap_or(0.0);
    NumCast::from((c / max * 255.0).round().max(0.0).min(255.0)).unwrap_or(0)
}

/// Convert any image into a map of packed RGB pixels.  Alpha is
/// dropped.
pub fn pixels_from_image<I, P, S>(image: &I) -> TwoDimensionalMap<u32>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    let data = iproduct!(0..height, 0..width)
        .map(|(y, x)| {
            let rgb = image.get_pixel(x, y).to_rgb();
            let [r, g, b] = rgb.0;
            pack_rgb(to_u8_channel(r), to_u8_channel(g), to_u8_channel(b))
        })
        .collect();
    TwoDimensionalMap {
        width,
        height,
        data,
    }
}

/// Unpack a map of `0xRRGGBB` pixels into an RGB image.
pub fn pixels_to_image(pixels: &TwoDimensionalMap<u32>) -> RgbImage {
    let (width, height) = pixels.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| Rgb(unpack_rgb(pixels[(x, y)])))
}

/// Render an energy map as a grayscale image.  Energies above 255 are
/// clamped, which is also where the border padding sits, so the frame
/// of the image is always white.
pub fn energy_to_image(energy: &TwoDimensionalMap<u32>) -> GrayImage {
    let (width, height) = energy.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| Luma([energy[(x, y)].min(255) as u8]))
}

/// Read an image file into a pixel map.  The format is guessed from
/// the file's contents and extension.
pub fn load_image(path: &Path) -> Result<TwoDimensionalMap<u32>, SeamError> {
    let image = image::open(path).map_err(|e| SeamError::ImageRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(pixels_from_image(&image))
}

/// Write a pixel map to disk, in the format named by the extension.
pub fn save_image(pixels: &TwoDimensionalMap<u32>, path: &Path) -> Result<(), SeamError> {
    pixels_to_image(pixels)
        .save(path)
        .map_err(|e| SeamError::ImageWrite {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

/// Write an energy map to disk as a grayscale image.
pub fn save_energy(energy: &TwoDimensionalMap<u32>, path: &Path) -> Result<(), SeamError> {
    energy_to_image(energy)
        .save(path)
        .map_err(|e| SeamError::ImageWrite {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_images_pack_losslessly() {
        let img: RgbImage = ImageBuffer::from_fn(3, 2, |x, y| Rgb([x as u8 * 100, y as u8 * 50, 7]));
        let pixels = pixels_from_image(&img);
        assert_eq!(pixels.dimensions(), (3, 2));
        assert_eq!(pixels[(2, 1)], 0xc8_32_07);
        assert_eq!(pixels_to_image(&pixels), img);
    }

    #[test]
    fn sixteen_bit_channels_are_scaled() {
        let img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_raw(2, 1, vec![0, 65535]).unwrap();
        let pixels = pixels_from_image(&img);
        assert_eq!(pixels.as_slice(), &[0x00_00_00, 0xff_ff_ff]);
    }

    #[test]
    fn energy_is_clamped_for_display() {
        let energy = TwoDimensionalMap::from_raw(3, 1, vec![0, 200, 1020]).unwrap();
        let img = energy_to_image(&energy);
        assert_eq!(img.into_raw(), vec![0, 200, 255]);
    }

    #[test]
    fn unreadable_files_are_reported() {
        let err = load_image(Path::new("/nonexistent/picture.png")).unwrap_err();
        match err {
            SeamError::ImageRead { path, .. } => assert_eq!(path, "/nonexistent/picture.png"),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
