//! Download reconciliation
//!
//! Copies settings from a remote source map into a local destination map.
//! Two variants: [`download_settings`] prompts per conflicting key with
//! memoized "to all" answers, [`download_settings_picked`] asks once up
//! front with a multi-select. Both mutate the destination in place, never
//! delete from it, and return a categorized [`SyncReport`].
//!
//! Security-sensitive keys the user declines are written as the redaction
//! sentinel and recorded on the ignore-on-upload side-list. Side-list and
//! category ordering is key-processing (FIFO) order in both variants.

use std::collections::HashSet;

use funcsync_settings::{keys, SettingsMap};

use crate::error::ReconcileResult;
use crate::interact::{DecisionMaker, PickOption, StickyDecision};
use crate::output::OutputChannel;
use crate::report::{warn_no_delete, SyncReport};

/// Download with a per-key prompt for sensitive keys and overwrite
/// conflicts.
pub fn download_settings(
    source: &SettingsMap,
    destination: &mut SettingsMap,
    destination_name: &str,
    decisions: &mut dyn DecisionMaker,
    out: &mut dyn OutputChannel,
) -> ReconcileResult<SyncReport> {
    let mut report = SyncReport::new();
    let mut download_sensitive = StickyDecision::new();
    let mut overwrite_existing = StickyDecision::new();

    for (key, value) in source.iter() {
        if keys::is_security_sensitive(key) {
            let message =
                format!("Setting \"{key}\" has been identified as unsafe. Download?");
            if download_sensitive.resolve(decisions, &message)? {
                report.updated.push(key.to_string());
                destination.insert(key, value);
            } else {
                report.security_ignored.push(key.to_string());
                report.ignore_on_upload.push(key.to_string());
                destination.insert(key, keys::REDACTED_VALUE);
            }
        } else if !destination.contains_key(key) {
            report.added.push(key.to_string());
            destination.insert(key, value);
        } else if destination.get(key) == Some(value) {
            report.matching.push(key.to_string());
        } else if !value.is_empty() {
            let message = format!(
                "Setting \"{key}\" already exists in \"{destination_name}\". Overwrite?"
            );
            if overwrite_existing.resolve(decisions, &message)? {
                report.updated.push(key.to_string());
                destination.insert(key, value);
            } else {
                report.user_ignored.push(key.to_string());
            }
        } else {
            // Differing but empty on the source side: nothing worth
            // overwriting with, counts as ignored without a prompt.
            report.user_ignored.push(key.to_string());
        }
    }

    report.log_summary(out);
    warn_no_delete(source, destination, destination_name, out);
    Ok(report)
}

/// Download with one up-front multi-select instead of per-key prompts.
///
/// Security-sensitive keys start unchecked, everything else checked. Checked
/// keys overwrite unconditionally; unchecked keys are redacted into the
/// destination and recorded on the ignore-on-upload side-list.
pub fn download_settings_picked(
    source: &SettingsMap,
    destination: &mut SettingsMap,
    destination_name: &str,
    decisions: &mut dyn DecisionMaker,
    out: &mut dyn OutputChannel,
) -> ReconcileResult<SyncReport> {
    let mut report = SyncReport::new();

    let options: Vec<PickOption> = source
        .keys()
        .map(|key| {
            if keys::is_security_sensitive(key) {
                PickOption::unchecked(key)
            } else {
                PickOption::checked(key)
            }
        })
        .collect();

    let selected: HashSet<String> = if options.is_empty() {
        HashSet::new()
    } else {
        decisions
            .pick_many("Select the settings to download:", options)?
            .into_iter()
            .collect()
    };

    for (key, value) in source.iter() {
        if selected.contains(key) {
            if !destination.contains_key(key) {
                report.added.push(key.to_string());
                destination.insert(key, value);
            } else if destination.get(key) == Some(value) {
                report.matching.push(key.to_string());
            } else {
                report.updated.push(key.to_string());
                destination.insert(key, value);
            }
        } else {
            if keys::is_security_sensitive(key) {
                report.security_ignored.push(key.to_string());
            } else {
                report.user_ignored.push(key.to_string());
            }
            report.ignore_on_upload.push(key.to_string());
            destination.insert(key, keys::REDACTED_VALUE);
        }
    }

    report.log_summary(out);
    warn_no_delete(source, destination, destination_name, out);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReconcileError;
    use crate::interact::Choice;
    use crate::output::BufferedOutput;
    use crate::scripted::{ScriptedAnswer, ScriptedDecisions};

    fn map(entries: &[(&str, &str)]) -> SettingsMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_download_no_conflicts_no_prompts() {
        let source = map(&[("A", "1"), ("B", "2")]);
        let mut destination = SettingsMap::new();
        let mut decisions = ScriptedDecisions::expecting_no_prompts();
        let mut out = BufferedOutput::new();

        let report = download_settings(
            &source,
            &mut destination,
            "my-app",
            &mut decisions,
            &mut out,
        )
        .unwrap();

        assert_eq!(report.added, vec!["A", "B"]);
        assert_eq!(destination, map(&[("A", "1"), ("B", "2")]));
        assert!(decisions.prompts().is_empty());
    }

    #[test]
    fn test_download_matching_short_circuits() {
        let source = map(&[("A", "1")]);
        let mut destination = map(&[("A", "1")]);
        let mut decisions = ScriptedDecisions::expecting_no_prompts();
        let mut out = BufferedOutput::new();

        let report = download_settings(
            &source,
            &mut destination,
            "my-app",
            &mut decisions,
            &mut out,
        )
        .unwrap();

        assert_eq!(report.matching, vec!["A"]);
        assert!(report.added.is_empty() && report.updated.is_empty());
    }

    #[test]
    fn test_download_overwrite_prompt_yes_and_no() {
        let source = map(&[("A", "new"), ("B", "new")]);
        let mut destination = map(&[("A", "old"), ("B", "old")]);
        let mut decisions = ScriptedDecisions::new(vec![
            ScriptedAnswer::Confirm(Choice::Yes),
            ScriptedAnswer::Confirm(Choice::No),
        ]);
        let mut out = BufferedOutput::new();

        let report = download_settings(
            &source,
            &mut destination,
            "my-app",
            &mut decisions,
            &mut out,
        )
        .unwrap();

        assert_eq!(report.updated, vec!["A"]);
        assert_eq!(report.user_ignored, vec!["B"]);
        assert_eq!(destination.get("A"), Some("new"));
        assert_eq!(destination.get("B"), Some("old"));
    }

    #[test]
    fn test_download_yes_to_all_suppresses_later_prompts() {
        let source = map(&[("A", "new"), ("B", "new"), ("C", "new")]);
        let mut destination = map(&[("A", "old"), ("B", "old"), ("C", "old")]);
        let mut decisions =
            ScriptedDecisions::new(vec![ScriptedAnswer::Confirm(Choice::YesToAll)]);
        let mut out = BufferedOutput::new();

        let report = download_settings(
            &source,
            &mut destination,
            "my-app",
            &mut decisions,
            &mut out,
        )
        .unwrap();

        assert_eq!(report.updated, vec!["A", "B", "C"]);
        assert_eq!(decisions.prompts().len(), 1);
    }

    #[test]
    fn test_download_sensitive_declined_redacts_and_side_lists() {
        let source = map(&[("AzureWebJobsStorage", "secret"), ("A", "1")]);
        let mut destination = SettingsMap::new();
        let mut decisions = ScriptedDecisions::new(vec![ScriptedAnswer::Confirm(Choice::No)]);
        let mut out = BufferedOutput::new();

        let report = download_settings(
            &source,
            &mut destination,
            "my-app",
            &mut decisions,
            &mut out,
        )
        .unwrap();

        assert_eq!(destination.get("AzureWebJobsStorage"), Some("_REDACTED_"));
        assert_eq!(report.security_ignored, vec!["AzureWebJobsStorage"]);
        assert_eq!(report.ignore_on_upload, vec!["AzureWebJobsStorage"]);
        assert_eq!(report.added, vec!["A"]);
    }

    #[test]
    fn test_download_sensitive_accepted_copies_value() {
        let source = map(&[("AzureWebJobsStorage", "secret")]);
        let mut destination = SettingsMap::new();
        let mut decisions = ScriptedDecisions::new(vec![ScriptedAnswer::Confirm(Choice::Yes)]);
        let mut out = BufferedOutput::new();

        let report = download_settings(
            &source,
            &mut destination,
            "my-app",
            &mut decisions,
            &mut out,
        )
        .unwrap();

        assert_eq!(destination.get("AzureWebJobsStorage"), Some("secret"));
        assert_eq!(report.updated, vec!["AzureWebJobsStorage"]);
        assert!(report.ignore_on_upload.is_empty());
    }

    #[test]
    fn test_download_partition_and_monotonic_growth() {
        let source = map(&[
            ("AzureWebJobsStorage", "secret"),
            ("A", "1"),
            ("B", "2"),
            ("C", "3"),
        ]);
        let mut destination = map(&[("B", "2"), ("C", "old"), ("EXTRA", "x")]);
        let original_len = destination.len();
        let mut decisions = ScriptedDecisions::new(vec![
            ScriptedAnswer::Confirm(Choice::No),
            ScriptedAnswer::Confirm(Choice::No),
        ]);
        let mut out = BufferedOutput::new();

        let report = download_settings(
            &source,
            &mut destination,
            "my-app",
            &mut decisions,
            &mut out,
        )
        .unwrap();

        // Every source key lands in exactly one category.
        assert_eq!(report.categorized_len(), source.len());
        // Destination only grows.
        assert!(destination.len() >= original_len);
        assert_eq!(destination.get("EXTRA"), Some("x"));
    }

    #[test]
    fn test_download_cancellation_propagates() {
        let source = map(&[("A", "new"), ("B", "new")]);
        let mut destination = map(&[("A", "old"), ("B", "old")]);
        let mut decisions = ScriptedDecisions::new(vec![ScriptedAnswer::Cancel]);
        let mut out = BufferedOutput::new();

        let result = download_settings(
            &source,
            &mut destination,
            "my-app",
            &mut decisions,
            &mut out,
        );

        assert_eq!(result, Err(ReconcileError::Cancelled));
        // Nothing was logged for the aborted pass.
        assert!(out.lines().is_empty());
    }

    #[test]
    fn test_download_picked_defaults_and_redaction() {
        let source = map(&[
            ("AzureWebJobsStorage", "secret"),
            ("A", "1"),
            ("B", "2"),
        ]);
        let mut destination = SettingsMap::new();
        // Keep the defaults: sensitive key unchecked, the rest checked.
        let mut decisions =
            ScriptedDecisions::new(vec![ScriptedAnswer::pick(["A", "B"])]);
        let mut out = BufferedOutput::new();

        let report = download_settings_picked(
            &source,
            &mut destination,
            "my-app",
            &mut decisions,
            &mut out,
        )
        .unwrap();

        let offered = &decisions.offered()[0];
        assert!(!offered[0].checked, "sensitive key starts unchecked");
        assert!(offered[1].checked && offered[2].checked);

        assert_eq!(report.added, vec!["A", "B"]);
        assert_eq!(report.security_ignored, vec!["AzureWebJobsStorage"]);
        assert_eq!(report.ignore_on_upload, vec!["AzureWebJobsStorage"]);
        assert_eq!(destination.get("AzureWebJobsStorage"), Some("_REDACTED_"));
    }

    #[test]
    fn test_download_picked_overwrites_without_prompting() {
        let source = map(&[("A", "new")]);
        let mut destination = map(&[("A", "old")]);
        let mut decisions = ScriptedDecisions::new(vec![ScriptedAnswer::pick(["A"])]);
        let mut out = BufferedOutput::new();

        let report = download_settings_picked(
            &source,
            &mut destination,
            "my-app",
            &mut decisions,
            &mut out,
        )
        .unwrap();

        assert_eq!(report.updated, vec!["A"]);
        assert_eq!(destination.get("A"), Some("new"));
        // Only the picker itself prompted.
        assert_eq!(decisions.prompts().len(), 1);
    }

    #[test]
    fn test_download_picked_unchecked_plain_key_is_user_ignored() {
        let source = map(&[("A", "1"), ("B", "2")]);
        let mut destination = SettingsMap::new();
        let mut decisions = ScriptedDecisions::new(vec![ScriptedAnswer::pick(["A"])]);
        let mut out = BufferedOutput::new();

        let report = download_settings_picked(
            &source,
            &mut destination,
            "my-app",
            &mut decisions,
            &mut out,
        )
        .unwrap();

        assert_eq!(report.user_ignored, vec!["B"]);
        assert_eq!(report.ignore_on_upload, vec!["B"]);
        assert_eq!(destination.get("B"), Some("_REDACTED_"));
    }

    #[test]
    fn test_download_picked_empty_source_skips_picker() {
        let source = SettingsMap::new();
        let mut destination = SettingsMap::new();
        let mut decisions = ScriptedDecisions::expecting_no_prompts();
        let mut out = BufferedOutput::new();

        let report = download_settings_picked(
            &source,
            &mut destination,
            "my-app",
            &mut decisions,
            &mut out,
        )
        .unwrap();

        assert_eq!(report, SyncReport::default());
    }

    #[test]
    fn test_download_warns_when_destination_has_extra_keys() {
        let source = map(&[("A", "1")]);
        let mut destination = map(&[("LOCAL_ONLY", "x")]);
        let mut decisions = ScriptedDecisions::expecting_no_prompts();
        let mut out = BufferedOutput::new();

        download_settings(
            &source,
            &mut destination,
            "my-app",
            &mut decisions,
            &mut out,
        )
        .unwrap();

        assert!(out.contains("will not delete any settings"));
    }
}
