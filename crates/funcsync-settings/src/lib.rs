//! Shared settings and runtime-identity types for funcsync
//!
//! This crate holds the types both the reconciliation engine and the CLI
//! depend on: the ordered settings map, the well-known setting names of the
//! function-app platform, and the runtime version / worker runtime
//! identifiers compared during deploy preflight.

pub mod keys;
pub mod map;
pub mod runtime;
pub mod version;

pub use map::SettingsMap;
pub use runtime::{ProjectLanguage, WorkerRuntime};
pub use version::RuntimeVersion;
