//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod generation;
mod output;

pub use check::CheckReport;
pub use generation::{
    GenerationReport, GenerationResult, PreviewFile, PreviewResult, WrittenFile, WrittenResult,
};
pub use output::{Report, TerminalOutput};
