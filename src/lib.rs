//! funcsync — app settings sync and deploy preflight
//!
//! This crate wires the reconciliation engine (`funcsync-reconcile`) to the
//! local project files and a remote app seam: download remote settings into
//! `local.settings.json`, upload modified local values, and verify an app's
//! settings before a deploy. A file-backed simulated app stands in for the
//! real platform client.

pub mod console;
pub mod local;
pub mod mock;
pub mod pipeline;
pub mod remote;
pub mod series;

pub use mock::{AppState, SimulatedApp};
pub use pipeline::{
    download_app_settings, upload_app_settings, verify_app_settings, SyncError, SyncResult,
    SyncSummary, VerifySummary,
};
pub use remote::{PlanOs, PlanTier, RemoteApp, RemoteError};
pub use series::SeriesGate;
