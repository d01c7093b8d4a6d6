//! Application layer: port trait definitions and use-case orchestration.
//!
//! Depends on `crate::domain` alone. Everything that touches a process,
//! the filesystem, or the terminal sits behind the port traits.

pub mod ports;
pub mod services;

pub use ports::{
    BEACON_PID_PATTERN, BEACON_PROGRAM, BEACON_READY_PATTERN, BEACON_SIGNATURE, CommandOutput,
    CommandRunner, ProcessTable, ProgressReporter, ServiceLauncher, ServiceStream,
};
