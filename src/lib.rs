mod exports;
pub use exports::*;

pub mod index;
pub mod raytrace;
pub mod fov;
pub mod scanner;
pub mod projdata;
pub mod viewgram;
pub mod image;
pub mod projector;
pub mod utils;
