//! Pass report
//!
//! Every key of the source map lands in exactly one of the five categories.
//! The side-list (`ignore_on_upload`) is not a category of its own: keys on
//! it are always also recorded as security- or user-ignored.

use funcsync_settings::SettingsMap;
use serde::Serialize;

use crate::output::OutputChannel;

/// Categorized outcome of one reconciliation pass, in key-processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Keys copied into a destination that had no value for them.
    pub added: Vec<String>,
    /// Keys whose destination value was overwritten.
    pub updated: Vec<String>,
    /// Keys already equal on both sides; never prompted for.
    pub matching: Vec<String>,
    /// Keys the user chose not to sync.
    pub user_ignored: Vec<String>,
    /// Security-sensitive keys that were not synced.
    pub security_ignored: Vec<String>,
    /// Keys redacted locally that must be skipped on the next upload.
    pub ignore_on_upload: Vec<String>,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of keys across the five disjoint categories.
    pub fn categorized_len(&self) -> usize {
        self.added.len()
            + self.updated.len()
            + self.matching.len()
            + self.user_ignored.len()
            + self.security_ignored.len()
    }

    /// Log each non-empty category as a header line followed by one
    /// `- <key>` line per member.
    pub fn log_summary(&self, out: &mut dyn OutputChannel) {
        let sections: [(&str, &Vec<String>); 5] = [
            ("Added the following settings:", &self.added),
            ("Updated the following settings:", &self.updated),
            (
                "Ignored the following settings that were already the same:",
                &self.matching,
            ),
            (
                "Ignored the following settings based on user input:",
                &self.user_ignored,
            ),
            (
                "Ignored the following settings based on security and privacy:",
                &self.security_ignored,
            ),
        ];

        for (header, keys) in sections {
            if !keys.is_empty() {
                out.log_line(header);
                for key in keys {
                    out.log_line(&format!("- {key}"));
                }
            }
        }
    }
}

/// Warn when the destination holds keys the source does not: no pass ever
/// deletes a destination key.
pub(crate) fn warn_no_delete(
    source: &SettingsMap,
    destination: &SettingsMap,
    destination_name: &str,
    out: &mut dyn OutputChannel,
) {
    if destination.len() > source.len() {
        out.log_line(&format!(
            "WARNING: This operation will not delete any settings in \"{destination_name}\". \
             You must manually delete settings if desired."
        ));
    }
}
