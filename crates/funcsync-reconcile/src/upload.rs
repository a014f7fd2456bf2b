//! Upload reconciliation
//!
//! Pushes local settings into a remote destination map. Only keys whose
//! values differ (or are absent remotely) and that are not on the ignore set
//! are candidates; they are offered in one multi-select and copied when
//! selected. Ignore-set keys are never offered: when they differ they are
//! recorded as security-ignored and left alone.

use std::collections::HashSet;

use funcsync_settings::SettingsMap;

use crate::error::ReconcileResult;
use crate::interact::{DecisionMaker, PickOption};
use crate::output::OutputChannel;
use crate::report::{warn_no_delete, SyncReport};

/// Upload local settings into the remote map via one picker.
///
/// `ignored` is the full ignore set for this pass: the fixed
/// security-sensitive names plus any keys redacted by an earlier download.
pub fn upload_settings(
    source: &SettingsMap,
    destination: &mut SettingsMap,
    ignored: &[String],
    destination_name: &str,
    decisions: &mut dyn DecisionMaker,
    out: &mut dyn OutputChannel,
) -> ReconcileResult<SyncReport> {
    let mut report = SyncReport::new();
    let is_ignored = |key: &str| ignored.iter().any(|k| k == key);

    let options: Vec<PickOption> = source
        .iter()
        .filter(|&(key, value)| !is_ignored(key) && destination.get(key) != Some(value))
        .map(|(key, _)| PickOption::unchecked(key))
        .collect();

    let selected: HashSet<String> = if options.is_empty() {
        HashSet::new()
    } else {
        decisions
            .pick_many("Select the modified settings to upload:", options)?
            .into_iter()
            .collect()
    };

    for (key, value) in source.iter() {
        if destination.get(key) == Some(value) {
            report.matching.push(key.to_string());
        } else if selected.contains(key) {
            if destination.contains_key(key) {
                report.updated.push(key.to_string());
            } else {
                report.added.push(key.to_string());
            }
            destination.insert(key, value);
        } else if is_ignored(key) {
            report.security_ignored.push(key.to_string());
        } else {
            report.user_ignored.push(key.to_string());
        }
    }

    report.log_summary(out);
    warn_no_delete(source, destination, destination_name, out);
    Ok(report)
}
