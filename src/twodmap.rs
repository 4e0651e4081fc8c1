// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Two-dimensional maps
//!
//! Every per-pixel buffer the carver keeps (the packed RGB pixels, the
//! grayscale copy, the energy map, and the seam digraph) is one of
//! these.  The map tracks its *logical* width and height separately
//! from the allocation behind it, so a map can be narrowed by a seam,
//! or reshaped for the next seam search, without reallocating.

use crate::errors::SeamError;
use std::ops::{Index, IndexMut};
use std::slice::{Chunks, ChunksMut};

/// An addressable two-dimensional field of values, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map filled with the content type's default.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![P::default(); width as usize * height as usize],
        }
    }

    /// Wrap an existing row-major buffer.  Returns `None` if the
    /// buffer does not hold exactly `width * height` values.
    pub fn from_raw(width: u32, height: u32, data: Vec<P>) -> Option<Self> {
        if data.len() != width as usize * height as usize {
            return None;
        }
        Some(TwoDimensionalMap {
            width,
            height,
            data,
        })
    }

    /// Build a map by evaluating `f(x, y)` at every address.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> P,
    {
        let mut map = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                map[(x, y)] = f(x, y);
            }
        }
        map
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    #[inline]
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The flat, row-major view of the live values.
    pub fn as_slice(&self) -> &[P] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [P] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<P> {
        self.data
    }

    /// How many values the map could hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Get the value at a single pixel's address
    #[inline]
    pub fn get_pt(&self, x: u32, y: u32) -> P {
        self.data[self.get_index(x, y)]
    }

    /// Set a value at a single pixel's address
    #[inline]
    pub fn put_pt(&mut self, x: u32, y: u32, e: P) {
        let index = self.get_index(x, y);
        self.data[index] = e;
    }

    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.data[start..start + self.width as usize]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [P] {
        let start = self.get_index(0, y);
        let width = self.width as usize;
        &mut self.data[start..start + width]
    }

    pub fn rows(&self) -> Chunks<'_, P> {
        self.data.chunks(self.width.max(1) as usize)
    }

    pub fn rows_mut(&mut self) -> ChunksMut<'_, P> {
        let width = self.width.max(1) as usize;
        self.data.chunks_mut(width)
    }

    /// Give the map a new logical shape, every value reset to the
    /// default.  The allocation is kept whenever it is large enough,
    /// so nothing from a previous shape can leak into the new one.
    pub fn reshape(&mut self, width: u32, height: u32) {
        self.data.clear();
        self.data.resize(width as usize * height as usize, P::default());
        self.width = width;
        self.height = height;
    }

    /// Delete one value from every row, left-shifting the rest of the
    /// row over it.  `seam[y]` is the column to remove from row `y`.
    ///
    /// The whole buffer is compacted in a single left-to-right pass:
    /// every value moves left by the number of values already removed
    /// above and to the left of it, so the write cursor never passes
    /// the read cursor.  The map is narrowed by one column and the
    /// tail is truncated; the allocation is not released.
    pub fn remove_seam(&mut self, seam: &[u32]) -> Result<(), SeamError> {
        check_seam(seam, self.width, self.height)?;

        let width = self.width as usize;
        let mut write = 0;
        for (y, &column) in seam.iter().enumerate() {
            let start = y * width;
            let column = column as usize;
            self.data.copy_within(start..start + column, write);
            write += column;
            self.data.copy_within(start + column + 1..start + width, write);
            write += width - column - 1;
        }
        self.data.truncate(write);
        self.width -= 1;
        Ok(())
    }
}

/// A seam must name one in-bounds column for every row, and walk
/// down the image without jumping more than one column per row.
pub(crate) fn check_seam(seam: &[u32], width: u32, height: u32) -> Result<(), SeamError> {
    if seam.len() != height as usize {
        return Err(SeamError::InternalConsistency {
            x: 0,
            y: seam.len() as u32,
            reason: "seam length does not match image height",
        });
    }
    for (y, &x) in seam.iter().enumerate() {
        if x >= width {
            return Err(SeamError::InternalConsistency {
                x,
                y: y as u32,
                reason: "seam leaves the image",
            });
        }
        if y > 0 && (i64::from(x) - i64::from(seam[y - 1])).abs() > 1 {
            return Err(SeamError::InternalConsistency {
                x,
                y: y as u32,
                reason: "seam is not connected",
            });
        }
    }
    Ok(())
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}

/// One cell of the seam digraph: the cheapest total energy of any
/// path from the top row down to this pixel, and the column of the
/// pixel in the row above through which that path arrives.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct EnergyAndBackPointer<P: Default + Copy> {
    pub energy: P,
    pub parent: u32,
}
