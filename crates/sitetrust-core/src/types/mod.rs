//! Data model shared by the engine and the probes.

mod address;
mod finding;
mod report;

pub use address::*;
pub use finding::*;
pub use report::*;
