// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest vertical seam
//!
//! The seam digraph is built top-down: every cell holds the cheapest
//! total energy of any connected path from the top row down to it,
//! and the column in the row above that the path came through.  The
//! cheapest seam ends at the cheapest cell of the bottom row, and is
//! read back by following the parents upward.

use crate::cq;
use crate::errors::SeamError;
use crate::twodmap::{EnergyAndBackPointer, TwoDimensionalMap};

/// One top-to-bottom seam: `seam[y]` is the column of the pixel to
/// remove from row `y`.
pub type Seam = Vec<u32>;

type SeamDigraph = TwoDimensionalMap<EnergyAndBackPointer<u32>>;

/// Holds the seam digraph between searches so its allocation can be
/// reused as the image narrows.
#[derive(Debug)]
pub struct SeamFinder {
    target: SeamDigraph,
}

impl Default for SeamFinder {
    fn default() -> Self {
        SeamFinder::new()
    }
}

impl SeamFinder {
    pub fn new() -> Self {
        SeamFinder {
            target: TwoDimensionalMap::new(0, 0),
        }
    }

    /// The cheapest total energy of any path from the top row to
    /// `(x, y)`, as of the last rebuild.
    pub fn accumulated(&self, x: u32, y: u32) -> u32 {
        self.target[(x, y)].energy
    }

    /// The column, in row `y - 1`, through which the cheapest path to
    /// `(x, y)` arrives.  Top-row cells are their own parents.
    pub fn parent(&self, x: u32, y: u32) -> u32 {
        self.target[(x, y)].parent
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.target.dimensions()
    }

    /// Rebuild the seam digraph from an energy map.
    ///
    /// Candidate parents are examined left to right, and a later
    /// candidate only wins if it is strictly cheaper, so ties always go
    /// to the leftmost column.
    pub fn rebuild(&mut self, energy: &TwoDimensionalMap<u32>) -> Result<(), SeamError> {
        let (width, height) = energy.dimensions();
        self.target.reshape(width, height);
        if width == 0 || height == 0 {
            return Ok(());
        }

        // Populate the first row with their native energies.
        for x in 0..width {
            self.target[(x, 0)] = EnergyAndBackPointer {
                energy: energy[(x, 0)],
                parent: x,
            };
        }

        let maxwidth = width - 1;
        for y in 1..height {
            for x in 0..width {
                let range = cq!(x == 0, 0, x - 1)..=cq!(x == maxwidth, maxwidth, x + 1);
                let parent_x = range
                    .min_by_key(|px| self.target[(*px, y - 1)].energy)
                    .ok_or_else(|| SeamError::InternalConsistency {
                        x,
                        y,
                        reason: "no parent in the row above",
                    })?;
                let parent = self.target[(parent_x, y - 1)];
                self.target[(x, y)] = EnergyAndBackPointer {
                    energy: energy[(x, y)] + parent.energy,
                    parent: parent_x,
                };
            }
        }
        Ok(())
    }

    /// The bottom row of the digraph, as `(column, total energy)`.
    pub fn seam_ends(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let (width, height) = self.target.dimensions();
        let bottom = height.saturating_sub(1);
        (0..cq!(height == 0, 0, width)).map(move |x| (x, self.target[(x, bottom)].energy))
    }

    /// Follow the parents from the bottom-row cell at `column` to the
    /// top row, and return the seam ordered top to bottom.
    pub fn trace_from(&self, column: u32) -> Seam {
        let height = self.target.height();
        let mut seam_col = column;
        // Working backwards, generate a vec of x coordinates that map to
        // the seam, reverse and return.
        (0..height)
            .rev()
            .fold(Vec::<u32>::with_capacity(height as usize), |mut acc, y| {
                acc.push(seam_col);
                seam_col = self.target[(seam_col, y)].parent;
                acc
            })
            .into_iter()
            .rev()
            .collect()
    }

    /// Rebuild the digraph and return the cheapest seam through the
    /// energy map.  Ties at the bottom go to the leftmost column.
    pub fn find_minimum_seam(&mut self, energy: &TwoDimensionalMap<u32>) -> Result<Seam, SeamError> {
        self.rebuild(energy)?;
        let (seam_col, _) = self
            .seam_ends()
            .min_by_key(|&(_, total)| total)
            .ok_or_else(|| SeamError::InternalConsistency {
                x: 0,
                y: energy.height(),
                reason: "seam digraph has no bottom row",
            })?;
        Ok(self.trace_from(seam_col))
    }
}
