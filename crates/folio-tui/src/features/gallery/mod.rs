//! Project gallery: the landing screen.

pub mod render;
pub mod state;
pub mod update;

pub use state::GalleryState;
