//! Interactive settings reconciliation and deploy preflight engine
//!
//! Pure decision logic over [`funcsync_settings::SettingsMap`] pairs: the
//! download/upload reconciliation passes and the pre-deploy verification
//! checks. All IO happens behind two injected collaborators — a
//! [`DecisionMaker`] for modal prompts and pickers, and an [`OutputChannel`]
//! for progress lines — so the engine itself never touches the terminal,
//! the filesystem, or the network.

pub mod download;
pub mod error;
pub mod interact;
pub mod output;
pub mod report;
pub mod scripted;
pub mod upload;
pub mod verify;

pub use download::{download_settings, download_settings_picked};
pub use error::{ReconcileError, ReconcileResult};
pub use interact::{Choice, DecisionMaker, PickOption, StickyDecision};
pub use output::{BufferedOutput, OutputChannel};
pub use report::SyncReport;
pub use scripted::{ScriptedAnswer, ScriptedDecisions};
pub use upload::upload_settings;
pub use verify::{
    normalize_remote_build, normalize_run_from_package, normalize_web_content_settings,
    verify_version_and_runtime, PlanFlags,
};
