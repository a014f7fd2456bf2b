//! Remote app seam
//!
//! The reconciliation pipeline talks to the remote side through the
//! [`RemoteApp`] trait: name, plan characteristics, and whole-map
//! list/update of the application settings. Updates are always batched —
//! one call per pass, never per key.

use std::fmt;
use std::io;

use funcsync_settings::SettingsMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operating system of the plan hosting an app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanOs {
    Linux,
    Windows,
}

/// Hosting tier of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Consumption,
    Dedicated,
}

impl fmt::Display for PlanOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanOs::Linux => write!(f, "linux"),
            PlanOs::Windows => write!(f, "windows"),
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanTier::Consumption => write!(f, "consumption"),
            PlanTier::Dedicated => write!(f, "dedicated"),
        }
    }
}

/// Errors from the remote side.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The app's host information cannot be fetched at all. Hard failure,
    /// no retry.
    #[error("failed to get host information for app \"{0}\"")]
    HostInformationUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed app state: {0}")]
    State(#[from] serde_json::Error),
}

/// An app reachable for settings sync and deploy preflight.
pub trait RemoteApp {
    fn name(&self) -> &str;

    fn os(&self) -> PlanOs;

    fn tier(&self) -> PlanTier;

    /// Fetch the full application settings map.
    fn list_settings(&mut self) -> Result<SettingsMap, RemoteError>;

    /// Replace the full application settings map.
    fn update_settings(&mut self, settings: &SettingsMap) -> Result<(), RemoteError>;
}
