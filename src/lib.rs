#[macro_use]
extern crate bitflags;

/// Connect to a Brother P-touch label printer, query its status and print raster lines with it.
pub mod printer;

/// Turn images and patterns into the 128-dot raster lines of the print head.
pub mod raster;
