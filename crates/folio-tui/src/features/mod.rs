//! Feature slices. Each owns its state, key handling and rendering.

pub mod admin;
pub mod gallery;
pub mod session;
