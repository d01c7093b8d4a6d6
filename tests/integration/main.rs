//! End-to-end tests driving the compiled bosun binary.
//!
//! Everything here goes through process spawn and exit codes, so the
//! suite is slower than the in-process unit tests.

mod cli_tests;
mod provision_cli;
