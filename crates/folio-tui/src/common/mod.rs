//! Helpers shared by the feature slices.

pub mod render_utils;
mod task;
mod text;

pub use task::{TaskId, TaskSeq, TaskState, Tasks};
pub use text::{mask, truncate_with_ellipsis};
