//! Decision-maker collaborator
//!
//! Every ambiguous step of a pass — overwrite conflicts, sensitive keys,
//! which modified settings to push — is referred to a [`DecisionMaker`].
//! Dismissing any prompt cancels the whole pass.

use crate::error::ReconcileResult;

/// Answer to a four-way modal confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Yes,
    No,
    /// Yes, and stop asking for the rest of the pass.
    YesToAll,
    /// No, and stop asking for the rest of the pass.
    NoToAll,
}

impl Choice {
    /// Returns true for `Yes` and `YesToAll`.
    pub fn is_affirmative(self) -> bool {
        matches!(self, Choice::Yes | Choice::YesToAll)
    }

    /// Returns true for the "to all" answers that suppress further prompts.
    pub fn is_sticky(self) -> bool {
        matches!(self, Choice::YesToAll | Choice::NoToAll)
    }
}

/// One entry of a multi-select picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickOption {
    /// The setting name shown to the user.
    pub label: String,
    /// Whether the entry starts checked.
    pub checked: bool,
}

impl PickOption {
    pub fn checked(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: true,
        }
    }

    pub fn unchecked(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: false,
        }
    }
}

/// Human decision-maker behind the reconciliation passes.
///
/// Implementations map each call to a modal prompt. All three methods treat
/// dismissal as [`crate::error::ReconcileError::Cancelled`].
pub trait DecisionMaker {
    /// Four-way yes / no / yes-to-all / no-to-all confirmation.
    fn confirm(&mut self, message: &str) -> ReconcileResult<Choice>;

    /// Confirmation whose only way forward is the affirmative option.
    fn acknowledge(&mut self, message: &str) -> ReconcileResult<()>;

    /// Multi-select over the given options; returns the labels left checked.
    fn pick_many(&mut self, prompt: &str, options: Vec<PickOption>) -> ReconcileResult<Vec<String>>;
}

/// Memoized outcome of a repeated yes/no question within one pass.
///
/// A "to all" answer suppresses the prompt and replays the cached answer for
/// every later key of the same category. Scoped to one pass: create a fresh
/// instance per call, never share across passes.
#[derive(Debug, Default)]
pub struct StickyDecision {
    suppress_prompt: bool,
    last_answer: bool,
}

impl StickyDecision {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the question, or replay the memoized answer after a "to all".
    pub fn resolve(
        &mut self,
        decisions: &mut dyn DecisionMaker,
        message: &str,
    ) -> ReconcileResult<bool> {
        if !self.suppress_prompt {
            let choice = decisions.confirm(message)?;
            self.last_answer = choice.is_affirmative();
            self.suppress_prompt = choice.is_sticky();
        }
        Ok(self.last_answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReconcileError;
    use crate::scripted::{ScriptedAnswer, ScriptedDecisions};

    #[test]
    fn test_sticky_decision_prompts_until_to_all() {
        let mut decisions = ScriptedDecisions::new(vec![
            ScriptedAnswer::Confirm(Choice::Yes),
            ScriptedAnswer::Confirm(Choice::NoToAll),
        ]);
        let mut sticky = StickyDecision::new();

        assert!(sticky.resolve(&mut decisions, "first?").unwrap());
        assert!(!sticky.resolve(&mut decisions, "second?").unwrap());
        // No script left: any further prompt would panic, proving the memo
        // suppressed it.
        assert!(!sticky.resolve(&mut decisions, "third?").unwrap());
        assert_eq!(decisions.prompts(), &["first?", "second?"]);
    }

    #[test]
    fn test_sticky_decision_propagates_cancellation() {
        let mut decisions = ScriptedDecisions::new(vec![ScriptedAnswer::Cancel]);
        let mut sticky = StickyDecision::new();

        assert_eq!(
            sticky.resolve(&mut decisions, "first?"),
            Err(ReconcileError::Cancelled)
        );
    }
}
