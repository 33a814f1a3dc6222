//! Interactive terminal: transcript, command grammar and the credential
//! handshake that reveals the admin surface.

pub mod command;
pub mod render;
pub mod state;
pub mod transcript;
pub mod update;

pub use state::{SessionMode, SessionState};
pub use transcript::{Entry, OutputLine, Transcript};
pub use update::{SessionContext, SessionEvent};
