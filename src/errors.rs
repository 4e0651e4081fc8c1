// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong while carving.

use failure::Fail;

#[derive(Debug, Fail)]
pub enum SeamError {
    /// The energy map needs a full 3x3 neighborhood somewhere in the
    /// image.
    #[fail(
        display = "image is {}x{}, but seam carving needs at least 3x3 pixels",
        width, height
    )]
    InvalidDimensions { width: u32, height: u32 },

    #[fail(
        display = "cannot remove {} seams from an image {} pixels wide",
        requested, width
    )]
    InvalidReductionRequest { requested: u32, width: u32 },

    /// The seam tables or a seam disagree with the buffers they
    /// describe.  This is a bug, never a user error.
    #[fail(display = "internal inconsistency at ({}, {}): {}", x, y, reason)]
    InternalConsistency {
        x: u32,
        y: u32,
        reason: &'static str,
    },

    #[fail(display = "could not read image {}: {}", path, reason)]
    ImageRead { path: String, reason: String },

    #[fail(display = "could not write image {}: {}", path, reason)]
    ImageWrite { path: String, reason: String },
}
