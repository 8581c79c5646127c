//! Infrastructure layer: I/O implementations and DI container
//!
//! This layer implements the terminal and debugger boundary traits and wires
//! them up.

pub mod debugger;
pub mod di;
pub mod terminal;
pub mod traits;

pub use debugger::ProcessDebugger;
pub use di::ServiceContainer;
pub use terminal::StdTerminal;
pub use traits::{Debugger, OutputTerminal};
