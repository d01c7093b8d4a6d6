//! Application services: use-case orchestration.
//!
//! Each module composes domain logic with port trait calls. Services import
//! only from `crate::domain` and `crate::application::ports`, never from
//! `crate::infra`, `crate::commands`, or `crate::output`.

pub mod discovery;
pub mod pipeline;
pub mod plan;
pub mod steps;
pub mod supervisor;
