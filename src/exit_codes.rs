//! Exit code constants for the rota CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable config or scenario)
//! - 2: Validation failure (blank or malformed input)
//! - 3: Referenced agent or issue does not exist
//! - 4: Issue status transition rejected
//! - 5: Invalid issue filter

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable or unparsable input files.
pub const USER_ERROR: i32 = 1;

/// Validation failure: blank required field, empty expertise, etc.
pub const VALIDATION_FAILURE: i32 = 2;

/// An agent or issue id did not resolve.
pub const NOT_FOUND: i32 = 3;

/// The issue state machine rejected the requested transition.
pub const INVALID_TRANSITION: i32 = 4;

/// A filter carried an unknown key, category, or status.
pub const INVALID_FILTER: i32 = 5;
