//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::net`. All functions are
//! synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod service;

pub use config::{BootstrapConfig, Manifest, Overrides};
pub use error::{CommandError, ConfigError, DiscoveryError, PipelineAbort, StartupError};
pub use service::{Liveness, ManagedProcess, ProcessEntry, ServiceHandles};
