//! Well-known setting names
//!
//! Exact wire names of the platform settings funcsync reads or manages.

/// Storage account connection string backing the app.
pub const STORAGE_CONNECTION: &str = "AzureWebJobsStorage";

/// Connection string for the file share holding app content.
pub const CONTENT_CONNECTION_STRING: &str = "WEBSITE_CONTENTAZUREFILECONNECTIONSTRING";

/// Name of the file share holding app content.
pub const CONTENT_SHARE: &str = "WEBSITE_CONTENTSHARE";

/// Remote-reported runtime extension version (e.g. `~3`).
pub const EXTENSION_VERSION: &str = "FUNCTIONS_EXTENSION_VERSION";

/// Remote-reported worker runtime identifier (e.g. `node`).
pub const WORKER_RUNTIME: &str = "FUNCTIONS_WORKER_RUNTIME";

/// Run-from-package flag; `"1"` runs the app from the deployed package.
pub const RUN_FROM_PACKAGE: &str = "WEBSITE_RUN_FROM_PACKAGE";

/// Legacy run-from-zip flag, superseded by [`RUN_FROM_PACKAGE`].
pub const RUN_FROM_ZIP: &str = "WEBSITE_RUN_FROM_ZIP";

pub const ENABLE_ORYX_BUILD: &str = "ENABLE_ORYX_BUILD";
pub const SCM_DO_BUILD_DURING_DEPLOYMENT: &str = "SCM_DO_BUILD_DURING_DEPLOYMENT";
pub const BUILD_FLAGS: &str = "BUILD_FLAGS";
pub const XDG_CACHE_HOME: &str = "XDG_CACHE_HOME";

/// Placeholder written locally in place of a sensitive value that was not
/// downloaded.
pub const REDACTED_VALUE: &str = "_REDACTED_";

/// Settings treated as security-sensitive: never synced without an explicit
/// decision.
pub const SECURITY_SENSITIVE: &[&str] = &[
    STORAGE_CONNECTION,
    CONTENT_CONNECTION_STRING,
    CONTENT_SHARE,
];

/// Returns true if the setting is on the fixed security-sensitive list.
pub fn is_security_sensitive(key: &str) -> bool {
    SECURITY_SENSITIVE.contains(&key)
}

/// Build settings required on dedicated Linux plans when remote build is
/// requested, with their required values.
pub const REMOTE_BUILD_SETTINGS: &[(&str, &str)] = &[
    (ENABLE_ORYX_BUILD, "true"),
    (SCM_DO_BUILD_DURING_DEPLOYMENT, "1"),
    (BUILD_FLAGS, "UseExpressBuild"),
    (XDG_CACHE_HOME, "/tmp/.cache"),
];

/// Run-mode settings incompatible with remote build.
pub const RUN_MODE_SETTINGS: &[&str] = &[RUN_FROM_ZIP, RUN_FROM_PACKAGE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_sensitive_membership() {
        assert!(is_security_sensitive("AzureWebJobsStorage"));
        assert!(is_security_sensitive("WEBSITE_CONTENTSHARE"));
        assert!(!is_security_sensitive("MY_APP_SETTING"));
        // Case-sensitive by contract.
        assert!(!is_security_sensitive("azurewebjobsstorage"));
    }
}
