//! Deploy preflight over remote settings
//!
//! One-shot compatibility check plus idempotent normalization of a small
//! fixed set of platform settings. The caller fetches the remote map, runs
//! the checks that apply to the app's plan, and persists the whole map back
//! exactly once when anything changed.

use funcsync_settings::{keys, ProjectLanguage, RuntimeVersion, SettingsMap, WorkerRuntime};

use crate::error::{ReconcileError, ReconcileResult};
use crate::interact::DecisionMaker;
use crate::output::OutputChannel;

/// Plan characteristics that gate which normalizations run.
///
/// Bundled in one struct to avoid ordering mistakes across three booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanFlags {
    /// The app runs on a Linux plan.
    pub linux: bool,
    /// The app runs on a consumption plan.
    pub consumption: bool,
    /// Whether the deploy requests a remote build; `None` behaves as
    /// not-requested.
    pub remote_build: Option<bool>,
}

/// Compare the remote-reported runtime and version against the local
/// project.
///
/// The worker-runtime check runs first and only when both identifiers are
/// recognized; a mismatch is a hard error with no override. It is skipped
/// entirely for the legacy `~1` local version. The version check raises a
/// blocking "deploy anyway" confirmation; declining cancels the pass.
/// Unrecognized identifiers on either side are silently skipped.
pub fn verify_version_and_runtime(
    app_name: &str,
    local_version: RuntimeVersion,
    local_language: ProjectLanguage,
    remote: &SettingsMap,
    decisions: &mut dyn DecisionMaker,
) -> ReconcileResult<()> {
    if !local_version.is_legacy() {
        let remote_runtime = remote
            .get(keys::WORKER_RUNTIME)
            .and_then(WorkerRuntime::parse);
        let local_runtime = local_language.worker_runtime();
        if let (Some(remote_runtime), Some(local_runtime)) = (remote_runtime, local_runtime) {
            if remote_runtime != local_runtime {
                return Err(ReconcileError::RuntimeMismatch {
                    app: app_name.to_string(),
                    remote: remote_runtime.to_string(),
                    local: local_runtime.to_string(),
                });
            }
        }
    }

    if let Some(raw_remote_version) = remote.get(keys::EXTENSION_VERSION) {
        if !raw_remote_version.is_empty()
            && RuntimeVersion::parse(raw_remote_version) != Some(local_version)
        {
            decisions.acknowledge(&format!(
                "The remote version \"{raw_remote_version}\" for app \"{app_name}\" does not \
                 match your local version \"{local_version}\". Deploy anyway?"
            ))?;
        }
    }

    Ok(())
}

/// Remove stale content-share settings from a Linux consumption app.
///
/// When either content-reference setting carries a non-empty value, asks a
/// single yes-only confirmation and removes both keys. Returns whether the
/// removal happened.
pub fn normalize_web_content_settings(
    remote: &mut SettingsMap,
    decisions: &mut dyn DecisionMaker,
) -> ReconcileResult<bool> {
    let should_remove = remote.has_value(keys::CONTENT_CONNECTION_STRING)
        || remote.has_value(keys::CONTENT_SHARE);
    if should_remove {
        decisions.acknowledge(&format!(
            "The selected app is not configured for deployment from a local project. \
             Remove settings \"{}\" and \"{}\"?",
            keys::CONTENT_CONNECTION_STRING,
            keys::CONTENT_SHARE
        ))?;
        remote.remove(keys::CONTENT_CONNECTION_STRING);
        remote.remove(keys::CONTENT_SHARE);
    }
    Ok(should_remove)
}

/// Set the run-from-package flag on Windows plans.
///
/// Idempotent: an existing non-empty value is left alone and the function
/// reports no change.
pub fn normalize_run_from_package(
    app_name: &str,
    remote: &mut SettingsMap,
    out: &mut dyn OutputChannel,
) -> bool {
    let should_add = !remote.has_value(keys::RUN_FROM_PACKAGE);
    if should_add {
        remote.insert(keys::RUN_FROM_PACKAGE, "1");
        out.log_line(&format!(
            "Added setting \"{}\" to improve the performance of app \"{app_name}\".",
            keys::RUN_FROM_PACKAGE
        ));
    }
    should_add
}

/// Align the remote-build settings of a Linux plan with the deploy request.
///
/// Deterministic, never prompts. Remote build requested: the required
/// build settings are set to their required values (writes only when the
/// value differs) and both run-mode keys are removed. Not requested: every
/// managed key is removed if present. The build settings only apply to
/// dedicated plans and are skipped entirely on consumption plans.
pub fn normalize_remote_build(remote: &mut SettingsMap, plan: PlanFlags) -> bool {
    let mut changed = false;
    let remote_build = plan.remote_build.unwrap_or(false);

    let mut keys_to_remove: Vec<&str> = Vec::new();

    if remote_build {
        if !plan.consumption {
            for &(key, value) in keys::REMOTE_BUILD_SETTINGS {
                if remote.get(key) != Some(value) {
                    remote.insert(key, value);
                    changed = true;
                }
            }
        }
    } else if !plan.consumption {
        keys_to_remove.extend(keys::REMOTE_BUILD_SETTINGS.iter().map(|&(key, _)| key));
    }
    keys_to_remove.extend_from_slice(keys::RUN_MODE_SETTINGS);

    for key in keys_to_remove {
        if remote.has_value(key) {
            remote.remove(key);
            changed = true;
        }
    }

    changed
}
