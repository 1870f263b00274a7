//! Studio — command parsing, the session that ties script, call, and
//! analytics together, text rendering, and the main loop.

pub mod command;
pub mod render;
pub mod runner;
pub mod session;

pub use command::{CommandParser, StudioCommand};
pub use runner::run;
pub use session::{SessionReply, StudioSession};
