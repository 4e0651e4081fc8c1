// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Paint the cheapest seams onto a copy of the image
//!
//! A diagnostic view: one digraph rebuild, then the `n` cheapest
//! bottom-row cells are traced upward.  The seams are not removed
//! between traces, so they can share pixels.

use crate::errors::SeamError;
use crate::seamfinder::SeamFinder;
use crate::twodmap::TwoDimensionalMap;
use itertools::Itertools;

/// Pure red, `0xRRGGBB`.
pub const HIGHLIGHT: u32 = 0xff_00_00;

/// Return a copy of `pixels` with the `n` cheapest seams through
/// `energy` painted in `HIGHLIGHT`.  Seam ends are ranked by total
/// energy, lowest column first among equals; asking for more seams
/// than there are columns paints one seam per column.
pub fn highlight_seams(
    finder: &mut SeamFinder,
    pixels: &TwoDimensionalMap<u32>,
    energy: &TwoDimensionalMap<u32>,
    n: u32,
) -> Result<TwoDimensionalMap<u32>, SeamError> {
    finder.rebuild(energy)?;
    let mut painted = pixels.clone();

    finder
        .seam_ends()
        .sorted_by_key(|&(_, total)| total)
        .take(n as usize)
        .for_each(|(column, _)| {
            for (y, x) in finder.trace_from(column).into_iter().enumerate() {
                painted[(x, y as u32)] = HIGHLIGHT;
            }
        });
    Ok(painted)
}
