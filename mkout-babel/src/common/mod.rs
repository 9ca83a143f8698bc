//! Helpers shared by several formats.

pub mod links;
pub mod normalize;
pub mod params;
