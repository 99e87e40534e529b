//! CLI command implementations.

mod serve;
mod transcribe;

pub use serve::run_serve;
pub use transcribe::run_transcribe;
