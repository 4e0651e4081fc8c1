// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! Energy is the Sobel gradient magnitude of the grayscale image.  The
//! 3x3 kernels need a full neighborhood, so the outermost rows and
//! columns are never computed: they are padded with a fixed value
//! instead.  After a seam is removed, only the pixels that now border
//! the gap are recomputed, and the padding is reapplied.

use crate::cq;
use crate::grayscale::gray_level;
use crate::twodmap::TwoDimensionalMap;

/// The energy given to every border pixel.  Unclamped Sobel magnitudes
/// reach well past this (up to 1442), so the border discourages seams
/// from hugging the edges without forbidding it.
pub const BORDER_ENERGY: u32 = 255;

type Kernel3 = [[i32; 3]; 3];

const SOBEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_Y: Kernel3 = [[1, 2, 1], [0, 0, 0], [-1, -2, -1]];

/// The gradient magnitude at an interior pixel: floor(√(gx² + gy²)).
/// The caller guarantees that all eight neighbors exist.
#[inline]
pub fn energy_at(gray: &TwoDimensionalMap<u32>, x: u32, y: u32) -> u32 {
    let (mut gx, mut gy) = (0i32, 0i32);
    for (ky, row) in (y - 1..=y + 1).enumerate() {
        for (kx, col) in (x - 1..=x + 1).enumerate() {
            let l = i32::from(gray_level(gray[(col, row)]));
            gx += l * SOBEL_X[ky][kx];
            gy += l * SOBEL_Y[ky][kx];
        }
    }
    f64::from(gx * gx + gy * gy).sqrt() as u32
}

// Fill in the interior columns of one row of the energy map.  Border
// columns are left alone; `pad_borders` owns them.
fn fill_energy_row(gray: &TwoDimensionalMap<u32>, y: u32, row: &mut [u32]) {
    let (width, height) = gray.dimensions();
    if y == 0 || y + 1 >= height || width < 3 {
        return;
    }
    for x in 1..width - 1 {
        row[x as usize] = energy_at(gray, x, y);
    }
}

/// Force every pixel of the outermost rows and columns to
/// `BORDER_ENERGY`.
pub fn pad_borders(energy: &mut TwoDimensionalMap<u32>) {
    let (width, height) = energy.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let last = height - 1;
    for (y, row) in energy.rows_mut().enumerate() {
        let y = y as u32;
        cq!(
            y == 0 || y == last,
            row.iter_mut().for_each(|e| *e = BORDER_ENERGY),
            {
                row[0] = BORDER_ENERGY;
                row[width as usize - 1] = BORDER_ENERGY;
            }
        );
    }
}

/// Compute the energy map for a grayscale image, borders padded.
#[cfg(not(feature = "threaded"))]
pub fn calculate_energy(gray: &TwoDimensionalMap<u32>) -> TwoDimensionalMap<u32> {
    let (width, height) = gray.dimensions();
    let mut emap = TwoDimensionalMap::new(width, height);
    for (y, row) in emap.rows_mut().enumerate() {
        fill_energy_row(gray, y as u32, row);
    }
    pad_borders(&mut emap);
    emap
}

/// Compute the energy map for a grayscale image, borders padded.
///
/// Rows are independent of one another, so the map is broken into
/// bands of whole rows by `chunks_mut`, and each band is filled by its
/// own scoped thread.
#[cfg(feature = "threaded")]
pub fn calculate_energy(gray: &TwoDimensionalMap<u32>) -> TwoDimensionalMap<u32> {
    let (width, height) = gray.dimensions();
    let mut emap = TwoDimensionalMap::new(width, height);
    let rows_per_band = (height as usize / num_cpus::get()).max(1);
    let band_len = rows_per_band * (width.max(1) as usize);

    let outcome = crossbeam::scope(|scope| {
        for (band, chunk) in emap.as_mut_slice().chunks_mut(band_len).enumerate() {
            scope.spawn(move |_| {
                for (i, row) in chunk.chunks_mut(width.max(1) as usize).enumerate() {
                    fill_energy_row(gray, (band * rows_per_band + i) as u32, row);
                }
            });
        }
    });
    if let Err(panic) = outcome {
        std::panic::resume_unwind(panic);
    }

    pad_borders(&mut emap);
    emap
}

/// Patch the energy map after `seam` has been removed from both maps.
///
/// Only the two pixels now flanking the gap in each row are
/// recomputed; everything else keeps the energy it had before the
/// removal.  Pixels that land on the border are skipped, since the
/// final padding pass overwrites them anyway.
pub fn repair_energy(gray: &TwoDimensionalMap<u32>, energy: &mut TwoDimensionalMap<u32>, seam: &[u32]) {
    let (width, height) = energy.dimensions();
    debug_assert_eq!(gray.dimensions(), energy.dimensions());

    if width >= 3 {
        let interior = |x: u32| x > 0 && x < width - 1;
        for y in 1..height.saturating_sub(1) {
            let right = seam[y as usize];
            let left = right.checked_sub(1);
            for x in left.into_iter().chain(Some(right)) {
                if interior(x) {
                    energy[(x, y)] = energy_at(gray, x, y);
                }
            }
        }
    }
    pad_borders(energy);
}
