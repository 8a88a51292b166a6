//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error; `lookup` found no candidate           |
//! | 2    | Usage error (bad args; clap reports these itself)    |
//! | 3    | Config file failed to parse or validate              |
//! | 4    | Input could not be read (not a missing source file)  |
//! | 5    | Output could not be written                          |
//!
//! A missing source file is never an error: it contributes zero names.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error. Also `lookup` with no matching candidate, like grep(1).
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Config parse or validation error.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Unreadable input (permissions, directory in place of a file, bad JSON).
pub const EXIT_IO: u8 = 4;

/// Output file could not be created or written.
pub const EXIT_WRITE: u8 = 5;
