//! Deploy preflight over a simulated app.

use std::path::PathBuf;
use std::time::Duration;

use funcsync::pipeline::{verify_app_settings, SyncError};
use funcsync::{AppState, PlanOs, PlanTier, RemoteError, SeriesGate, SimulatedApp};
use funcsync_reconcile::{BufferedOutput, ReconcileError, ScriptedAnswer, ScriptedDecisions};
use funcsync_settings::{ProjectLanguage, RuntimeVersion};
use tempfile::TempDir;

fn make_app(
    dir: &TempDir,
    os: PlanOs,
    tier: PlanTier,
    settings: &[(&str, &str)],
) -> (PathBuf, SimulatedApp) {
    let path = dir.path().join("app.json");
    let app = SimulatedApp::create(
        &path,
        AppState {
            name: "my-app".into(),
            os,
            tier,
            reachable: true,
            settings: settings.iter().copied().collect(),
        },
    )
    .unwrap();
    (path, app)
}

fn fast_gate() -> SeriesGate {
    SeriesGate::with_poll_interval(Duration::from_millis(5))
}

#[test]
fn test_windows_plan_gets_run_from_package() {
    let dir = TempDir::new().unwrap();
    let (path, mut app) = make_app(&dir, PlanOs::Windows, PlanTier::Dedicated, &[]);
    let gate = fast_gate();
    let mut decisions = ScriptedDecisions::expecting_no_prompts();
    let mut out = BufferedOutput::new();

    let summary = verify_app_settings(
        &mut app,
        RuntimeVersion::V3,
        ProjectLanguage::JavaScript,
        None,
        &gate,
        &mut decisions,
        &mut out,
    )
    .unwrap();

    assert!(summary.settings_updated);
    assert!(out.contains("WEBSITE_RUN_FROM_PACKAGE"));

    let reloaded = SimulatedApp::load(&path).unwrap();
    assert_eq!(reloaded.state().settings.get("WEBSITE_RUN_FROM_PACKAGE"), Some("1"));
}

#[test]
fn test_verify_is_idempotent_and_batches_updates() {
    let dir = TempDir::new().unwrap();
    let (path, mut app) = make_app(&dir, PlanOs::Windows, PlanTier::Dedicated, &[]);
    let gate = fast_gate();
    let mut out = BufferedOutput::new();

    let mut decisions = ScriptedDecisions::expecting_no_prompts();
    verify_app_settings(
        &mut app,
        RuntimeVersion::V3,
        ProjectLanguage::JavaScript,
        None,
        &gate,
        &mut decisions,
        &mut out,
    )
    .unwrap();
    assert_eq!(app.updates_applied(), 1);

    // Second pass over the already-normalized app: no further write.
    let mut app = SimulatedApp::load(&path).unwrap();
    let mut decisions = ScriptedDecisions::expecting_no_prompts();
    let summary = verify_app_settings(
        &mut app,
        RuntimeVersion::V3,
        ProjectLanguage::JavaScript,
        None,
        &gate,
        &mut decisions,
        &mut out,
    )
    .unwrap();

    assert!(!summary.settings_updated);
    assert_eq!(app.updates_applied(), 0);
}

#[test]
fn test_linux_consumption_removes_content_settings() {
    let dir = TempDir::new().unwrap();
    let (path, mut app) = make_app(
        &dir,
        PlanOs::Linux,
        PlanTier::Consumption,
        &[
            ("WEBSITE_CONTENTAZUREFILECONNECTIONSTRING", "conn"),
            ("WEBSITE_CONTENTSHARE", "share"),
        ],
    );
    let gate = fast_gate();
    let mut decisions = ScriptedDecisions::new(vec![ScriptedAnswer::Acknowledge]);
    let mut out = BufferedOutput::new();

    let summary = verify_app_settings(
        &mut app,
        RuntimeVersion::V3,
        ProjectLanguage::Python,
        None,
        &gate,
        &mut decisions,
        &mut out,
    )
    .unwrap();

    assert!(summary.settings_updated);

    let reloaded = SimulatedApp::load(&path).unwrap();
    assert!(!reloaded
        .state()
        .settings
        .contains_key("WEBSITE_CONTENTAZUREFILECONNECTIONSTRING"));
    assert!(!reloaded.state().settings.contains_key("WEBSITE_CONTENTSHARE"));
}

#[test]
fn test_linux_dedicated_remote_build_settings_pushed() {
    let dir = TempDir::new().unwrap();
    let (path, mut app) = make_app(
        &dir,
        PlanOs::Linux,
        PlanTier::Dedicated,
        &[("WEBSITE_RUN_FROM_PACKAGE", "1")],
    );
    let gate = fast_gate();
    let mut decisions = ScriptedDecisions::expecting_no_prompts();
    let mut out = BufferedOutput::new();

    let summary = verify_app_settings(
        &mut app,
        RuntimeVersion::V3,
        ProjectLanguage::Python,
        Some(true),
        &gate,
        &mut decisions,
        &mut out,
    )
    .unwrap();

    assert!(summary.settings_updated);

    let reloaded = SimulatedApp::load(&path).unwrap();
    let settings = &reloaded.state().settings;
    assert_eq!(settings.get("ENABLE_ORYX_BUILD"), Some("true"));
    assert_eq!(settings.get("SCM_DO_BUILD_DURING_DEPLOYMENT"), Some("1"));
    assert_eq!(settings.get("BUILD_FLAGS"), Some("UseExpressBuild"));
    assert_eq!(settings.get("XDG_CACHE_HOME"), Some("/tmp/.cache"));
    assert!(!settings.contains_key("WEBSITE_RUN_FROM_PACKAGE"));
}

#[test]
fn test_version_mismatch_declined_cancels_without_write() {
    let dir = TempDir::new().unwrap();
    let (path, mut app) = make_app(
        &dir,
        PlanOs::Windows,
        PlanTier::Dedicated,
        &[("FUNCTIONS_EXTENSION_VERSION", "~2")],
    );
    let gate = fast_gate();
    let mut decisions = ScriptedDecisions::new(vec![ScriptedAnswer::Cancel]);
    let mut out = BufferedOutput::new();

    let result = verify_app_settings(
        &mut app,
        RuntimeVersion::V3,
        ProjectLanguage::JavaScript,
        None,
        &gate,
        &mut decisions,
        &mut out,
    );

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        SyncError::Reconcile(ReconcileError::Cancelled)
    ));
    assert_eq!(err.exit_code(), 80);

    // The remote map was never written.
    assert_eq!(app.updates_applied(), 0);
    let reloaded = SimulatedApp::load(&path).unwrap();
    assert_eq!(
        reloaded.state().settings.get("FUNCTIONS_EXTENSION_VERSION"),
        Some("~2")
    );
    assert!(!reloaded.state().settings.contains_key("WEBSITE_RUN_FROM_PACKAGE"));
}

#[test]
fn test_runtime_mismatch_is_not_recoverable() {
    let dir = TempDir::new().unwrap();
    let (_path, mut app) = make_app(
        &dir,
        PlanOs::Windows,
        PlanTier::Dedicated,
        &[("FUNCTIONS_WORKER_RUNTIME", "dotnet")],
    );
    let gate = fast_gate();
    let mut decisions = ScriptedDecisions::expecting_no_prompts();
    let mut out = BufferedOutput::new();

    let result = verify_app_settings(
        &mut app,
        RuntimeVersion::V3,
        ProjectLanguage::JavaScript,
        None,
        &gate,
        &mut decisions,
        &mut out,
    );

    assert!(matches!(
        result,
        Err(SyncError::Reconcile(ReconcileError::RuntimeMismatch { .. }))
    ));
    assert_eq!(app.updates_applied(), 0);
}

#[test]
fn test_unreachable_app_fails_immediately() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.json");
    let mut app = SimulatedApp::create(
        &path,
        AppState {
            name: "my-app".into(),
            os: PlanOs::Windows,
            tier: PlanTier::Dedicated,
            reachable: false,
            settings: Default::default(),
        },
    )
    .unwrap();
    let gate = fast_gate();
    let mut decisions = ScriptedDecisions::expecting_no_prompts();
    let mut out = BufferedOutput::new();

    let result = verify_app_settings(
        &mut app,
        RuntimeVersion::V3,
        ProjectLanguage::JavaScript,
        None,
        &gate,
        &mut decisions,
        &mut out,
    );

    assert!(matches!(
        result,
        Err(SyncError::Remote(RemoteError::HostInformationUnavailable(_)))
    ));
}
