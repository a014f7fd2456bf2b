//! Sync and preflight orchestration
//!
//! Composes the engine passes with the local files and the remote app seam.
//! Each operation runs inside the series gate keyed by app name, fetches
//! the remote map once, and persists at most once: the local settings file
//! for downloads, the remote map for uploads and verification. A
//! cancellation or remote failure aborts the pass immediately — earlier
//! in-memory mutations are not rolled back, and the batched write is simply
//! never issued.

use std::path::Path;

use chrono::{DateTime, Utc};
use funcsync_reconcile::{
    download_settings, download_settings_picked, normalize_remote_build,
    normalize_run_from_package, normalize_web_content_settings, upload_settings,
    verify_version_and_runtime, DecisionMaker, OutputChannel, PlanFlags, ReconcileError,
    SyncReport,
};
use funcsync_settings::{ProjectLanguage, RuntimeVersion};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::local::{LocalError, LocalSettingsFile, ProjectConfig};
use crate::remote::{PlanOs, PlanTier, RemoteApp, RemoteError};
use crate::series::SeriesGate;

/// Errors from a sync or preflight operation.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Local(#[from] LocalError),

    /// Required deploy metadata is neither on the command line nor in the
    /// project config.
    #[error("missing project metadata: {0} (pass it as a flag or set it in funcsync.toml)")]
    MissingMetadata(&'static str),
}

impl SyncError {
    /// Exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            SyncError::Reconcile(ReconcileError::Cancelled) => 80,
            SyncError::Reconcile(ReconcileError::RuntimeMismatch { .. }) => 30,
            SyncError::Remote(_) => 20,
            SyncError::Local(_) => 10,
            SyncError::MissingMetadata(_) => 2,
        }
    }
}

/// Result type for pipeline operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Summary of a completed download or upload pass.
#[derive(Debug, Clone, Serialize)]
pub struct SyncSummary {
    pub operation: String,
    pub operation_id: String,
    pub app: String,
    pub completed_at: DateTime<Utc>,
    /// SHA-256 of the local settings file after the pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_digest: Option<String>,
    pub report: SyncReport,
}

/// Summary of a completed verification pass.
#[derive(Debug, Clone, Serialize)]
pub struct VerifySummary {
    pub operation: String,
    pub operation_id: String,
    pub app: String,
    pub completed_at: DateTime<Utc>,
    /// Whether a batched settings update was pushed to the app.
    pub settings_updated: bool,
}

fn new_operation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Download the app's settings into the local settings file.
///
/// Keys redacted during the pass are merged into the project config's
/// `upload_ignore` list so the next upload skips them.
pub fn download_app_settings(
    app: &mut dyn RemoteApp,
    settings_path: &Path,
    config_path: &Path,
    use_picker: bool,
    gate: &SeriesGate,
    decisions: &mut dyn DecisionMaker,
    out: &mut dyn OutputChannel,
) -> SyncResult<SyncSummary> {
    let app_name = app.name().to_string();
    gate.run(&app_name, || {
        let remote_settings = app.list_settings()?;
        let mut local = LocalSettingsFile::load(settings_path)?;

        let report = if use_picker {
            download_settings_picked(
                &remote_settings,
                &mut local.settings.values,
                &app_name,
                decisions,
                out,
            )?
        } else {
            download_settings(
                &remote_settings,
                &mut local.settings.values,
                &app_name,
                decisions,
                out,
            )?
        };

        local.save()?;

        if !report.ignore_on_upload.is_empty() {
            let mut config = ProjectConfig::load(config_path)?;
            config.merge_upload_ignore(&report.ignore_on_upload);
            config.save(config_path)?;
        }

        Ok(SyncSummary {
            operation: "download".to_string(),
            operation_id: new_operation_id(),
            app: app_name.clone(),
            completed_at: Utc::now(),
            settings_digest: local.digest().map(str::to_string),
            report,
        })
    })
}

/// Upload modified local settings to the app.
///
/// The remote map is written back in one batched update, and only when the
/// pass actually changed it.
pub fn upload_app_settings(
    app: &mut dyn RemoteApp,
    settings_path: &Path,
    config_path: &Path,
    gate: &SeriesGate,
    decisions: &mut dyn DecisionMaker,
    out: &mut dyn OutputChannel,
) -> SyncResult<SyncSummary> {
    let app_name = app.name().to_string();
    gate.run(&app_name, || {
        let local = LocalSettingsFile::load(settings_path)?;
        let config = ProjectConfig::load(config_path)?;
        let ignored = config.upload_ignore_set();

        let mut remote_settings = app.list_settings()?;
        let report = upload_settings(
            &local.settings.values,
            &mut remote_settings,
            &ignored,
            &app_name,
            decisions,
            out,
        )?;

        if !report.added.is_empty() || !report.updated.is_empty() {
            app.update_settings(&remote_settings)?;
        }

        Ok(SyncSummary {
            operation: "upload".to_string(),
            operation_id: new_operation_id(),
            app: app_name.clone(),
            completed_at: Utc::now(),
            settings_digest: local.digest().map(str::to_string),
            report,
        })
    })
}

/// Verify the app's settings before a deploy.
///
/// Runs the version/runtime compatibility check, then the normalizations
/// that apply to the app's plan. Everything the pass changed is persisted in
/// exactly one batched update.
pub fn verify_app_settings(
    app: &mut dyn RemoteApp,
    local_version: RuntimeVersion,
    local_language: ProjectLanguage,
    remote_build: Option<bool>,
    gate: &SeriesGate,
    decisions: &mut dyn DecisionMaker,
    out: &mut dyn OutputChannel,
) -> SyncResult<VerifySummary> {
    let app_name = app.name().to_string();
    gate.run(&app_name, || {
        let mut remote_settings = app.list_settings()?;

        verify_version_and_runtime(
            &app_name,
            local_version,
            local_language,
            &remote_settings,
            decisions,
        )?;

        let plan = PlanFlags {
            linux: app.os() == PlanOs::Linux,
            consumption: app.tier() == PlanTier::Consumption,
            remote_build,
        };

        let mut changed = false;
        if plan.linux {
            if plan.consumption {
                changed |= normalize_web_content_settings(&mut remote_settings, decisions)?;
            }
            changed |= normalize_remote_build(&mut remote_settings, plan);
        } else {
            changed |= normalize_run_from_package(&app_name, &mut remote_settings, out);
        }

        if changed {
            app.update_settings(&remote_settings)?;
        }

        Ok(VerifySummary {
            operation: "verify".to_string(),
            operation_id: new_operation_id(),
            app: app_name.clone(),
            completed_at: Utc::now(),
            settings_updated: changed,
        })
    })
}
