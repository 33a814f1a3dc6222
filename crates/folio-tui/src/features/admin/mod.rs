//! Admin surface: project visibility, deletion and theme overview.
//!
//! Only reachable through a successful terminal login.

pub mod render;
pub mod state;
pub mod update;

pub use state::AdminState;
pub use update::AdminAction;
