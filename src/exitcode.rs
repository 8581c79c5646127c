//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// General failure (executor reported `false`)
pub const FAILURE: i32 = 1;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// System error (e.g., can't start the runtime or attach a debugger)
pub const OSERR: i32 = 71;

/// Configuration error
pub const CONFIG: i32 = 78;
