pub mod image;
pub mod seo;

pub use image::*;
pub use seo::*;
