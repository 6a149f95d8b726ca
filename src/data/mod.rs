//! Data module: coordinates and padded connectivity tables
#![warn(missing_docs)]

pub mod coordinates;
pub mod padded;

pub use coordinates::Coordinates;
pub use padded::{PaddedArray, PaddedIds};
