// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main engine
//!
//! The carver owns every per-pixel map of one image and keeps them in
//! lockstep.  The grayscale and energy maps are computed once, when
//! the carver is built; after that each removed seam splices all three
//! maps and patches the energy map only where the splice disturbed
//! it.  The seam digraph is rebuilt for every search, but its
//! allocation lives as long as the carver.

use crate::dump::pixels_from_image;
use crate::energy::{calculate_energy, repair_energy};
use crate::errors::SeamError;
use crate::grayscale::to_grayscale;
use crate::highlight::highlight_seams;
use crate::seamfinder::{Seam, SeamFinder};
use crate::twodmap::{check_seam, TwoDimensionalMap};
use image::{GenericImageView, Pixel, Primitive};
use log::{debug, info};
use std::convert::TryFrom;

/// How many columns a `percent` reduction removes from an image
/// `width` pixels wide, rounded down.  Counts too large for a `u32`
/// saturate, so they are still refused as too many seams.
pub fn seams_for_percent(width: u32, percent: u32) -> u32 {
    u32::try_from(u64::from(width) * u64::from(percent) / 100).unwrap_or(u32::MAX)
}

/// A struct for holding the image being carved, and everything
/// derived from it.
#[derive(Debug)]
pub struct SeamCarver {
    pixels: TwoDimensionalMap<u32>,
    grayscale: TwoDimensionalMap<u32>,
    energy: TwoDimensionalMap<u32>,
    finder: SeamFinder,
}

impl SeamCarver {
    /// Creates a new SeamCarver from a map of packed `0xRRGGBB` pixels.
    /// The image must be at least 3x3.
    pub fn new(pixels: TwoDimensionalMap<u32>) -> Result<Self, SeamError> {
        let (width, height) = pixels.dimensions();
        if width < 3 || height < 3 {
            return Err(SeamError::InvalidDimensions { width, height });
        }
        let grayscale = to_grayscale(&pixels);
        let energy = calculate_energy(&grayscale);
        Ok(SeamCarver {
            pixels,
            grayscale,
            energy,
            finder: SeamFinder::new(),
        })
    }

    /// Creates a new SeamCarver from any ImageRS image.
    pub fn from_image<I, P, S>(image: &I) -> Result<Self, SeamError>
    where
        I: GenericImageView<Pixel = P>,
        P: Pixel<Subpixel = S> + 'static,
        S: Primitive + 'static,
    {
        Self::new(pixels_from_image(image))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// The image as carved so far.
    pub fn pixels(&self) -> &TwoDimensionalMap<u32> {
        &self.pixels
    }

    /// The grayscale copy of the image, packed like the pixels.
    pub fn grayscale(&self) -> &TwoDimensionalMap<u32> {
        &self.grayscale
    }

    pub fn energy(&self) -> &TwoDimensionalMap<u32> {
        &self.energy
    }

    pub fn into_pixels(self) -> TwoDimensionalMap<u32> {
        self.pixels
    }

    /// The cheapest seam through the current energy map.
    pub fn find_minimum_seam(&mut self) -> Result<Seam, SeamError> {
        self.finder.find_minimum_seam(&self.energy)
    }

    /// Remove one seam from every map and repair the energy around it.
    /// The seam is checked before anything is touched, so a bad seam
    /// leaves the carver exactly as it was.
    pub fn remove_seam(&mut self, seam: &[u32]) -> Result<(), SeamError> {
        check_seam(seam, self.width(), self.height())?;
        self.pixels.remove_seam(seam)?;
        self.grayscale.remove_seam(seam)?;
        self.energy.remove_seam(seam)?;
        repair_energy(&self.grayscale, &mut self.energy, seam);
        Ok(())
    }

    /// Find and remove the cheapest seam; returns the seam removed.
    pub fn carve_once(&mut self) -> Result<Seam, SeamError> {
        let seam = self.find_minimum_seam()?;
        self.remove_seam(&seam)?;
        Ok(seam)
    }

    /// Narrow the image by `count` columns, one seam at a time.  The
    /// request is refused up front if it would leave no columns.
    pub fn carve_columns(&mut self, count: u32) -> Result<(), SeamError> {
        let width = self.width();
        if count >= width {
            return Err(SeamError::InvalidReductionRequest {
                requested: count,
                width,
            });
        }

        info!("carving {} of {} columns", count, width);
        for i in 0..count {
            self.carve_once()?;
            debug!("removed seam {} of {}, width now {}", i + 1, count, self.width());
        }
        info!("carved to {}x{}", self.width(), self.height());
        Ok(())
    }

    /// Narrow the image by `percent` of its current width, rounded
    /// down.  Returns the number of seams removed.
    pub fn carve_percent(&mut self, percent: u32) -> Result<u32, SeamError> {
        let count = seams_for_percent(self.width(), percent);
        self.carve_columns(count)?;
        Ok(count)
    }

    /// A copy of the image with the `n` cheapest seams painted red.
    /// Nothing is removed.
    pub fn highlight_seams(&mut self, n: u32) -> Result<TwoDimensionalMap<u32>, SeamError> {
        debug!("highlighting {} seams", n);
        highlight_seams(&mut self.finder, &self.pixels, &self.energy, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::BORDER_ENERGY;
    use crate::grayscale::pack_rgb;
    use crate::highlight::HIGHLIGHT;

    const BLACK: u32 = 0x00_00_00;
    const WHITE: u32 = 0xff_ff_ff;

    fn noise(width: u32, height: u32) -> TwoDimensionalMap<u32> {
        TwoDimensionalMap::from_fn(width, height, |x, y| {
            let l = ((x * 37 + y * 91 + x * y * 13) % 256) as u8;
            pack_rgb(l, l.wrapping_mul(3), 255 - l)
        })
    }

    fn borders_are_padded(energy: &TwoDimensionalMap<u32>) -> bool {
        let (width, height) = energy.dimensions();
        (0..height).all(|y| {
            (0..width).all(|x| {
                let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                !border || energy[(x, y)] == BORDER_ENERGY
            })
        })
    }

    #[test]
    fn percent_is_rounded_down() {
        assert_eq!(seams_for_percent(100, 29), 29);
        assert_eq!(seams_for_percent(7, 50), 3);
        assert_eq!(seams_for_percent(640, 0), 0);
        assert_eq!(seams_for_percent(640, 100), 640);
    }

    #[test]
    fn huge_percentages_saturate_instead_of_wrapping() {
        assert_eq!(seams_for_percent(200, 2_147_483_651), u32::MAX);
        assert_eq!(seams_for_percent(u32::MAX, u32::MAX), u32::MAX);

        let mut carver = SeamCarver::new(noise(200, 5)).unwrap();
        match carver.carve_percent(2_147_483_651) {
            Err(SeamError::InvalidReductionRequest { width: 200, .. }) => (),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(carver.dimensions(), (200, 5));
    }

    // A one-pixel bright line has an edge on each side but none down its
    // middle, so Sobel energy steers the cheapest seam straight into it.
    #[test]
    fn thin_bright_line_is_carved_through() {
        let pixels = TwoDimensionalMap::from_fn(4, 4, |x, _| if x == 2 { WHITE } else { BLACK });
        let mut carver = SeamCarver::new(pixels).unwrap();
        for y in 1..3 {
            assert_eq!(carver.energy().row(y), &[255, 1016, 0, 255]);
        }

        let seam = carver.find_minimum_seam().unwrap();
        assert_eq!(seam, [1, 2, 2, 1]);
        carver.remove_seam(&seam).unwrap();
        assert_eq!(carver.pixels().row(1), &[BLACK, BLACK, BLACK]);
        assert_eq!(carver.pixels().row(2), &[BLACK, BLACK, BLACK]);
    }

    #[test]
    fn tiny_images_are_refused() {
        match SeamCarver::new(noise(2, 10)) {
            Err(SeamError::InvalidDimensions { width: 2, height: 10 }) => (),
            other => panic!("unexpected {:?}", other),
        }
        assert!(SeamCarver::new(noise(10, 2)).is_err());
        assert!(SeamCarver::new(noise(3, 3)).is_ok());
    }

    #[test]
    fn every_map_shrinks_together() {
        let mut carver = SeamCarver::new(noise(12, 8)).unwrap();
        for k in 1..=6 {
            let seam = carver.carve_once().unwrap();
            assert_eq!(seam.len(), 8);
            assert_eq!(carver.dimensions(), (12 - k, 8));
            assert_eq!(carver.grayscale().dimensions(), (12 - k, 8));
            assert_eq!(carver.energy().dimensions(), (12 - k, 8));
            assert_eq!(carver.pixels().as_slice().len(), ((12 - k) * 8) as usize);
            assert!(borders_are_padded(carver.energy()));
        }
    }

    #[test]
    fn seams_are_connected_and_in_bounds() {
        let mut carver = SeamCarver::new(noise(15, 10)).unwrap();
        for _ in 0..10 {
            let width = carver.width();
            let seam = carver.find_minimum_seam().unwrap();
            assert_eq!(seam.len(), 10);
            assert!(seam.iter().all(|&x| x < width));
            assert!(seam.windows(2).all(|w| (w[0] as i64 - w[1] as i64).abs() <= 1));
            carver.remove_seam(&seam).unwrap();
        }
    }

    #[test]
    fn grayscale_follows_the_pixels() {
        let mut carver = SeamCarver::new(noise(9, 6)).unwrap();
        carver.carve_columns(4).unwrap();
        assert_eq!(carver.grayscale(), &to_grayscale(carver.pixels()));
    }

    // A hard black/white step: the Sobel energy is concentrated on the
    // two columns either side of it, so seams go around the step and
    // both halves lose columns while the step survives.
    #[test]
    fn strong_edges_survive_carving() {
        let pixels = TwoDimensionalMap::from_fn(8, 6, |x, _| if x < 4 { BLACK } else { WHITE });
        let mut carver = SeamCarver::new(pixels).unwrap();
        carver.carve_columns(2).unwrap();
        for row in carver.pixels().rows() {
            assert_eq!(row, &[BLACK, BLACK, WHITE, WHITE, WHITE, WHITE]);
        }
    }

    #[test]
    fn carving_down_to_one_column() {
        let mut carver = SeamCarver::new(noise(6, 5)).unwrap();
        carver.carve_columns(5).unwrap();
        assert_eq!(carver.dimensions(), (1, 5));
        assert_eq!(carver.pixels().as_slice().len(), 5);
        assert_eq!(carver.grayscale().as_slice().len(), 5);
        assert_eq!(carver.energy().as_slice(), &[BORDER_ENERGY; 5]);
    }

    #[test]
    fn removing_the_whole_width_is_refused() {
        let mut carver = SeamCarver::new(noise(6, 5)).unwrap();
        let before = carver.pixels().clone();
        for count in &[6, 7, 100] {
            match carver.carve_columns(*count) {
                Err(SeamError::InvalidReductionRequest { width: 6, .. }) => (),
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(carver.pixels(), &before);
        assert_eq!(carver.energy().dimensions(), (6, 5));
        assert!(carver.carve_percent(100).is_err());
    }

    #[test]
    fn bad_seams_do_not_corrupt_the_carver() {
        let mut carver = SeamCarver::new(noise(6, 5)).unwrap();
        let before = carver.energy().clone();
        assert!(carver.remove_seam(&[0, 1, 2, 3]).is_err());
        assert!(carver.remove_seam(&[0, 1, 2, 3, 6]).is_err());
        assert_eq!(carver.energy(), &before);
        assert_eq!(carver.dimensions(), (6, 5));
    }

    #[test]
    fn carving_is_deterministic() {
        let run = || {
            let mut carver = SeamCarver::new(noise(20, 12)).unwrap();
            carver.carve_percent(40).unwrap();
            carver.into_pixels()
        };
        let first = run();
        assert_eq!(first.dimensions(), (12, 12));
        assert_eq!(first, run());
    }

    #[test]
    fn highlighting_leaves_the_carver_alone() {
        let mut carver = SeamCarver::new(noise(10, 7)).unwrap();
        let pixels = carver.pixels().clone();
        let energy = carver.energy().clone();
        let painted = carver.highlight_seams(3).unwrap();

        assert_eq!(carver.pixels(), &pixels);
        assert_eq!(carver.energy(), &energy);
        assert_eq!(painted.dimensions(), (10, 7));
        let bottom = painted.row(6).iter().filter(|&&p| p == HIGHLIGHT).count();
        assert_eq!(bottom, 3);
        let first = carver.find_minimum_seam().unwrap();
        assert_eq!(painted[(first[6], 6)], HIGHLIGHT);
    }

    #[test]
    fn builds_from_imagers_images() {
        let img = image::RgbImage::from_fn(5, 4, |x, y| image::Rgb([x as u8, y as u8, 9]));
        let carver = SeamCarver::from_image(&img).unwrap();
        assert_eq!(carver.dimensions(), (5, 4));
        assert_eq!(carver.pixels()[(4, 3)], 0x04_03_09);
    }
}
