pub mod banner;
pub mod cards;
pub mod colors;
pub mod footer;
pub mod options;
pub mod popup;
mod render;
pub mod utils;

pub use render::render;
