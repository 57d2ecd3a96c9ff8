//! Base types shared by the goosempl crates: colors and geometry.
pub mod color;
pub mod geom;
