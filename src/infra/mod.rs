//! Infrastructure layer: concrete implementations of application port traits.
//!
//! All I/O-performing code lives here: process execution, the process-table
//! query, service launching, and manifest loading. Adapters may reach into
//! `crate::domain` and the port traits, nothing else.

pub mod command_runner;
pub mod config;
pub mod launcher;
pub mod process_table;
