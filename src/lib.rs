// #![deny(missing_docs)]

//! Seam carving: narrow an image by repeatedly removing the
//! connected top-to-bottom path of pixels with the least edge energy.

extern crate image;

mod ternary;

pub mod dump;
pub mod energy;
pub mod errors;
pub mod grayscale;
pub mod highlight;
pub mod seamcarver;
pub mod seamfinder;
pub mod twodmap;

pub use dump::{load_image, save_energy, save_image};
pub use errors::SeamError;
pub use highlight::HIGHLIGHT;
pub use seamcarver::{seams_for_percent, SeamCarver};
pub use seamfinder::{Seam, SeamFinder};
pub use twodmap::TwoDimensionalMap;
