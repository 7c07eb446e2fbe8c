//! Command implementations behind the `pipegen` binary.

pub mod commands;
